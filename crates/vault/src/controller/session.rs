//! One client instance: the controllers, the panel toggle and the view port

use log::warn;

use super::{Completion, RecentController, Request, SearchController, SelectionController};
use crate::api::ArchiveApi;
use crate::models::{EmailPath, SearchResultItem, ValidationError};
use crate::view::{Region, ViewMode, ViewPort, ViewToggle};

/// All mutable client state, owned in one place
///
/// Independent sessions share nothing, so several can run side by side.
pub struct Session<P: ViewPort> {
    port: P,
    search: SearchController,
    selection: SelectionController,
    recent: RecentController,
    toggle: ViewToggle,
}

impl<P: ViewPort> Session<P> {
    /// Create a session showing recent emails with every region idle
    pub fn new(mut port: P) -> Self {
        port.set_view_mode(ViewMode::RecentEmails);
        port.set_idle(Region::Results);
        port.set_idle(Region::Content);
        port.set_idle(Region::Attachments);
        port.set_idle(Region::Recent);

        Self {
            port,
            search: SearchController::new(),
            selection: SelectionController::new(),
            recent: RecentController::new(),
            toggle: ViewToggle::new(),
        }
    }

    /// Submit the search form
    ///
    /// An accepted query also abandons the current selection, since its row
    /// is about to disappear.
    pub fn submit_search(&mut self, raw_input: &str) -> Result<Option<Request>, ValidationError> {
        let request = self
            .search
            .submit(raw_input, &mut self.toggle, &mut self.port)?;

        if request.is_some() {
            self.selection.reset(&mut self.port);
        }
        Ok(request)
    }

    /// Choose a rendered row from the search results or the recent list
    ///
    /// Paths that appear in neither list are ignored.
    pub fn select_result(&mut self, path: &EmailPath) -> Option<Request> {
        if !self.search.contains(path) && !self.recent.contains(path) {
            warn!("Ignoring selection of {} (not in current results)", path);
            return None;
        }
        Some(self.selection.select(path.clone(), &mut self.port))
    }

    /// Choose the row at `index` (0-based) of the visible panel
    pub fn select_index(&mut self, index: usize) -> Option<Request> {
        let rows = match self.toggle.mode() {
            ViewMode::RecentEmails => self.recent.emails(),
            ViewMode::SearchResults => self.search.results(),
        };
        let path = rows.get(index)?.path.clone();
        self.select_result(&path)
    }

    /// Reload the recent-emails panel
    pub fn refresh_recent(&mut self) -> Request {
        self.recent.refresh(&mut self.port)
    }

    /// Ask the server to pull new mail; the recent panel reloads afterwards
    pub fn check_emails(&mut self) -> Request {
        self.recent.check(&mut self.port)
    }

    /// Apply a finished request, returning any follow-up request
    pub fn complete(&mut self, completion: Completion) -> Option<Request> {
        match completion {
            Completion::Search { ticket, result } => {
                self.search.complete(ticket, result, &mut self.port);
                None
            }
            Completion::View {
                ticket,
                path,
                result,
            } => self
                .selection
                .complete_view(ticket, path, result, &mut self.port),
            Completion::Attachments {
                ticket,
                path,
                result,
            } => {
                self.selection
                    .complete_attachments(ticket, &path, result, &mut self.port);
                None
            }
            Completion::Recent { ticket, result } => {
                self.recent.complete(ticket, result, &mut self.port);
                None
            }
            Completion::CheckEmails { ticket, result } => {
                self.recent.complete_check(ticket, result, &mut self.port)
            }
        }
    }

    /// Run `request` and every follow-up it triggers, blocking throughout
    pub fn drive<A: ArchiveApi + ?Sized>(&mut self, api: &A, request: Request) {
        let mut next = Some(request);
        while let Some(request) = next {
            next = self.complete(request.execute(api));
        }
    }

    /// Switch to the recent-emails panel (results are kept)
    pub fn show_recent(&mut self) -> bool {
        self.toggle.show_recent(&mut self.port)
    }

    /// Switch back to the search-results panel
    pub fn show_results(&mut self) -> bool {
        self.toggle.show_results(&mut self.port)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.toggle.mode()
    }

    pub fn results(&self) -> &[SearchResultItem] {
        self.search.results()
    }

    pub fn recent(&self) -> &[SearchResultItem] {
        self.recent.emails()
    }

    pub fn active(&self) -> Option<&EmailPath> {
        self.selection.active()
    }

    pub fn last_query(&self) -> &str {
        self.search.last_query()
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, Endpoint, InMemoryArchive};
    use crate::models::{AttachmentDescriptor, SearchResultItem};
    use crate::view::{InMemoryViewPort, RegionState};

    fn archive() -> InMemoryArchive {
        let archive = InMemoryArchive::new();
        archive.insert_email(
            SearchResultItem::new("e1.html", "Invoice #9"),
            "<p>Invoice body</p>",
            vec![],
        );
        archive.insert_email(
            SearchResultItem::new("e2.html", "Invoice #10"),
            "<p>Another invoice</p>",
            vec![AttachmentDescriptor::new("inv10.pdf", "/attachments/2/download")],
        );
        archive
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(InMemoryViewPort::new());
        assert_eq!(session.view_mode(), ViewMode::RecentEmails);
        assert_eq!(session.port().state(Region::Content), &RegionState::Idle);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_search_then_select() {
        let archive = archive();
        let mut session = Session::new(InMemoryViewPort::new());

        let request = session.submit_search("invoice").unwrap().unwrap();
        session.drive(&archive, request);
        assert_eq!(session.port().result_rows().len(), 2);

        let request = session.select_index(1).unwrap();
        session.drive(&archive, request);

        let path = EmailPath::new("e2.html");
        assert_eq!(session.port().html(), Some("<p>Another invoice</p>"));
        assert_eq!(session.port().attachments().len(), 1);
        assert_eq!(session.active(), Some(&path));
        assert_eq!(
            archive.calls()[1..],
            [ApiCall::View(path.clone()), ApiCall::Attachments(path)]
        );
    }

    #[test]
    fn test_select_unknown_path_ignored() {
        let mut session = Session::new(InMemoryViewPort::new());
        assert!(session.select_result(&EmailPath::new("nope.html")).is_none());
        assert!(session.select_index(0).is_none());
    }

    #[test]
    fn test_new_search_abandons_selection() {
        let archive = archive();
        let mut session = Session::new(InMemoryViewPort::new());

        let request = session.submit_search("invoice").unwrap().unwrap();
        session.drive(&archive, request);
        let pending = session.select_index(0).unwrap();

        let request = session.submit_search("#10").unwrap().unwrap();
        let stale = pending.execute(&archive);
        assert!(session.complete(stale).is_none());

        session.drive(&archive, request);
        assert!(session.port().html().is_none());
        assert_eq!(session.port().state(Region::Content), &RegionState::Idle);
        assert_eq!(session.port().result_rows().len(), 1);
        assert_eq!(archive.call_count(Endpoint::Attachments), 0);
    }

    #[test]
    fn test_toggle_keeps_results() {
        let archive = archive();
        let mut session = Session::new(InMemoryViewPort::new());

        let request = session.submit_search("invoice").unwrap().unwrap();
        session.drive(&archive, request);
        let before = session.port().result_rows().to_vec();

        assert!(session.show_recent());
        assert_eq!(session.port().view_mode(), ViewMode::RecentEmails);
        assert!(session.show_results());

        assert_eq!(session.port().result_rows(), before.as_slice());
        assert_eq!(session.port().view_mode(), ViewMode::SearchResults);
    }

    #[test]
    fn test_select_from_recent_panel() {
        let archive = archive();
        let mut session = Session::new(InMemoryViewPort::new());

        let request = session.refresh_recent();
        session.drive(&archive, request);
        assert_eq!(session.port().recent_rows().len(), 2);

        let request = session.select_index(1).unwrap();
        session.drive(&archive, request);

        let path = EmailPath::new("e2.html");
        assert_eq!(session.active(), Some(&path));
        assert_eq!(session.port().html(), Some("<p>Another invoice</p>"));
        assert_eq!(session.port().attachments().len(), 1);
        assert_eq!(session.view_mode(), ViewMode::RecentEmails);
    }

    #[test]
    fn test_index_follows_visible_panel() {
        let archive = archive();
        let mut session = Session::new(InMemoryViewPort::new());

        let request = session.refresh_recent();
        session.drive(&archive, request);
        let request = session.submit_search("#10").unwrap().unwrap();
        session.drive(&archive, request);

        assert!(session.select_index(1).is_none());
        session.show_recent();
        assert!(session.select_index(1).is_some());
    }

    #[test]
    fn test_check_emails_reloads_recent() {
        let archive = archive();
        archive.queue_incoming(
            SearchResultItem::new("e3.html", "Just arrived").with_received("03/14/2024 02:05 PM"),
            "<p>New</p>",
            vec![],
        );
        let mut session = Session::new(InMemoryViewPort::new());

        let request = session.check_emails();
        session.drive(&archive, request);

        assert_eq!(session.recent().len(), 3);
        assert_eq!(session.port().recent_rows()[0].path.as_str(), "e3.html");
        assert!(
            session
                .port()
                .alerts()
                .iter()
                .any(|a| a == "Emails checked successfully")
        );
        assert_eq!(
            archive.calls(),
            vec![ApiCall::CheckEmails, ApiCall::Recent(crate::controller::RECENT_LIMIT)]
        );
    }
}
