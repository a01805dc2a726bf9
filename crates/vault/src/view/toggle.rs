//! Recent-emails / search-results panel switch

use log::debug;

use super::{ViewMode, ViewPort};

/// Tracks which panel is visible; exactly one is at any time
#[derive(Debug, Default)]
pub struct ViewToggle {
    mode: ViewMode,
}

impl ViewToggle {
    /// Start on the recent-emails panel
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Hide recent emails, show search results
    ///
    /// Returns `false` (and leaves the port alone) if results were already shown.
    pub fn show_results<P: ViewPort + ?Sized>(&mut self, port: &mut P) -> bool {
        self.switch(ViewMode::SearchResults, port)
    }

    /// Hide search results, show recent emails
    pub fn show_recent<P: ViewPort + ?Sized>(&mut self, port: &mut P) -> bool {
        self.switch(ViewMode::RecentEmails, port)
    }

    fn switch<P: ViewPort + ?Sized>(&mut self, mode: ViewMode, port: &mut P) -> bool {
        if self.mode == mode {
            return false;
        }
        debug!("View mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        port.set_view_mode(mode);
        true
    }
}
