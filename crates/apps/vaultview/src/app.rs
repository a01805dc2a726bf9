//! Main application state and event loop

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use vault::{ArchiveApi, ArchiveClient, Completion, InMemoryViewPort, Request, Session};

use crate::input::{Command, render_help};
use crate::views;

/// Fallback width when the terminal doesn't report one
const DEFAULT_WIDTH: usize = 80;

/// Root application
///
/// Owns the session and hands its requests to blocking worker threads. Each
/// finished request comes back over a channel and is applied on the loop.
pub struct VaultApp {
    session: Session<InMemoryViewPort>,
    api: Arc<dyn ArchiveApi>,
    /// Set when talking to a real server; attachments can only be saved then
    downloader: Option<Arc<ArchiveClient>>,
    completions: Option<UnboundedSender<Completion>>,
    width: usize,
    drawn_revision: Option<u64>,
}

impl VaultApp {
    pub fn new(api: Arc<dyn ArchiveApi>, downloader: Option<Arc<ArchiveClient>>) -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.parse().ok())
            .filter(|w: &usize| *w >= 20)
            .unwrap_or(DEFAULT_WIDTH);

        Self {
            session: Session::new(InMemoryViewPort::new()),
            api,
            downloader,
            completions: None,
            width,
            drawn_revision: None,
        }
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(mut self) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        self.completions = Some(tx);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("Type \"help\" for commands.");
        let request = self.session.refresh_recent();
        self.dispatch(request);
        self.draw(true);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        break;
                    };
                    if !self.handle_command(Command::parse(&line)).await {
                        break;
                    }
                }
                Some(completion) = rx.recv() => {
                    if let Some(next) = self.session.complete(completion) {
                        self.dispatch(next);
                    }
                }
            }

            self.draw(false);
        }

        info!("Exiting");
        Ok(())
    }

    /// Apply one command, returning false when the app should exit
    async fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Search(text) => match self.session.submit_search(&text) {
                Ok(Some(request)) => self.dispatch(request),
                Ok(None) => debug!("Search for {:?} already shown", text.trim()),
                // The session already raised an alert
                Err(e) => debug!("Search rejected: {}", e),
            },
            Command::Open(n) => match self.session.select_index(n - 1) {
                Some(request) => self.dispatch(request),
                None => println!("No row {}.", n),
            },
            Command::Save(n) => {
                if let Err(e) = self.save_attachment(n).await {
                    error!("Failed to save attachment: {:#}", e);
                    println!("Could not save attachment {}: {}", n, e);
                }
            }
            Command::Recent => {
                self.session.show_recent();
            }
            Command::Results => {
                self.session.show_results();
            }
            Command::Check => {
                let request = self.session.check_emails();
                self.dispatch(request);
            }
            Command::Help => print!("{}", render_help()),
            Command::Redraw => self.draw(true),
            Command::Invalid(message) => println!("{}", message),
            Command::Quit => return false,
        }
        true
    }

    /// Run `request` on a blocking worker and feed its completion back
    fn dispatch(&self, request: Request) {
        let Some(tx) = self.completions.clone() else {
            warn!("Dropping request {:?}, event loop not running", request.ticket());
            return;
        };
        let api = Arc::clone(&self.api);

        tokio::task::spawn_blocking(move || {
            let completion = request.execute(api.as_ref());
            if tx.send(completion).is_err() {
                debug!("Completion arrived after shutdown");
            }
        });
    }

    /// Download attachment `n` (1-based) of the displayed email and open it
    async fn save_attachment(&self, n: usize) -> Result<()> {
        let attachment = self
            .session
            .port()
            .attachments()
            .get(n - 1)
            .cloned()
            .ok_or_else(|| anyhow!("no attachment {} on the displayed email", n))?;

        let client = self
            .downloader
            .clone()
            .ok_or_else(|| anyhow!("downloads need a server connection"))?;

        let dir: PathBuf = config::download_dir()
            .ok_or_else(|| anyhow!("could not determine a download directory"))?;

        let path = tokio::task::spawn_blocking(move || client.download(&attachment, &dir))
            .await
            .context("Download task failed")??;

        println!("Saved {}", path.display());
        if let Err(e) = open::that(&path) {
            warn!("Failed to open {}: {}", path.display(), e);
        }
        Ok(())
    }

    /// Print alerts and, if anything changed, the visible panels
    fn draw(&mut self, force: bool) {
        for alert in self.session.port_mut().take_alerts() {
            println!("! {}", alert);
        }

        let revision = self.session.port().revision();
        if !force && self.drawn_revision == Some(revision) {
            return;
        }
        self.drawn_revision = Some(revision);

        println!();
        print!(
            "{}",
            views::render_screen(self.session.port(), self.session.last_query(), self.width)
        );
        println!();
    }
}
