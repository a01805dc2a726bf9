//! Result selection: content first, then attachments
//!
//! Selecting a row issues a fresh ticket. Content and attachment responses
//! are applied only while their ticket is still the latest, so the most
//! recent selection is the one that ends up on screen and at most one row is
//! ever highlighted.

use log::{debug, error, info};

use super::{Request, Ticket, TicketCounter};
use crate::api::ApiError;
use crate::models::{AttachmentDescriptor, EmailPath};
use crate::view::{Region, RegionContent, ViewPort, messages};

#[derive(Debug, Default)]
pub struct SelectionController {
    tickets: TicketCounter,
    active: Option<EmailPath>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `path`, returning the content request
    pub fn select<P: ViewPort + ?Sized>(&mut self, path: EmailPath, port: &mut P) -> Request {
        let ticket = self.tickets.issue();
        debug!("Selecting {} (ticket {})", path, ticket.value());

        port.set_loading(Region::Content);
        port.set_loading(Region::Attachments);

        Request::View { ticket, path }
    }

    /// Apply a content response
    ///
    /// On success the row is highlighted and the attachment request for the
    /// same path is returned.
    pub fn complete_view<P: ViewPort + ?Sized>(
        &mut self,
        ticket: Ticket,
        path: EmailPath,
        result: Result<String, ApiError>,
        port: &mut P,
    ) -> Option<Request> {
        if !self.tickets.is_current(ticket) {
            debug!("Discarding stale content for {} (ticket {})", path, ticket.value());
            return None;
        }

        match result {
            Ok(html) => {
                port.set_content(Region::Content, RegionContent::Html(html));
                port.set_active(Some(&path));
                self.active = Some(path.clone());
                Some(Request::Attachments { ticket, path })
            }
            Err(e) => {
                error!("Error loading email {}: {}", path, e);
                port.set_error(
                    Region::Content,
                    &format!("{}: {}. Please try again.", messages::CONTENT_ERROR, e),
                );
                port.set_idle(Region::Attachments);
                None
            }
        }
    }

    /// Apply an attachment-list response
    ///
    /// Returns `false` if the response belonged to a superseded selection.
    pub fn complete_attachments<P: ViewPort + ?Sized>(
        &mut self,
        ticket: Ticket,
        path: &EmailPath,
        result: Result<Vec<AttachmentDescriptor>, ApiError>,
        port: &mut P,
    ) -> bool {
        if !self.tickets.is_current(ticket) {
            debug!("Discarding stale attachments for {} (ticket {})", path, ticket.value());
            return false;
        }

        match result {
            Ok(list) if list.is_empty() => {
                port.set_empty(Region::Attachments);
            }
            Ok(list) => {
                info!("{} has {} attachments", path, list.len());
                port.set_content(Region::Attachments, RegionContent::Attachments(list));
            }
            Err(e) => {
                error!("Error loading attachments for {}: {}", path, e);
                port.set_error(
                    Region::Attachments,
                    &format!("{}: {}", messages::ATTACHMENTS_ERROR, e),
                );
            }
        }
        true
    }

    /// Forget the current selection and drop anything still in flight
    pub fn reset<P: ViewPort + ?Sized>(&mut self, port: &mut P) {
        self.tickets.issue();
        self.active = None;
        port.set_active(None);
        port.set_idle(Region::Attachments);
    }

    /// Highlighted row, if any
    pub fn active(&self) -> Option<&EmailPath> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{InMemoryViewPort, RegionState};

    fn view_ticket(request: &Request) -> Ticket {
        match request {
            Request::View { ticket, .. } => *ticket,
            other => panic!("expected view request, got {:?}", other),
        }
    }

    #[test]
    fn test_select_sets_loading() {
        let mut controller = SelectionController::new();
        let mut port = InMemoryViewPort::new();

        let request = controller.select(EmailPath::new("e1.html"), &mut port);
        assert!(matches!(request, Request::View { ref path, .. } if path.as_str() == "e1.html"));
        assert!(port.state(Region::Content).is_loading());
        assert!(port.state(Region::Attachments).is_loading());
    }

    #[test]
    fn test_content_success_highlights_and_chains() {
        let mut controller = SelectionController::new();
        let mut port = InMemoryViewPort::new();
        let path = EmailPath::new("e1.html");

        let ticket = view_ticket(&controller.select(path.clone(), &mut port));
        let next = controller.complete_view(ticket, path.clone(), Ok("<p>hi</p>".into()), &mut port);

        assert_eq!(
            next,
            Some(Request::Attachments {
                ticket,
                path: path.clone()
            })
        );
        assert_eq!(port.html(), Some("<p>hi</p>"));
        assert_eq!(port.active(), Some(&path));
        assert_eq!(controller.active(), Some(&path));
    }

    #[test]
    fn test_content_failure_resets_attachments() {
        let mut controller = SelectionController::new();
        let mut port = InMemoryViewPort::new();
        let path = EmailPath::new("e1.html");

        let ticket = view_ticket(&controller.select(path.clone(), &mut port));
        let next = controller.complete_view(
            ticket,
            path,
            Err(ApiError::from_status(404, "Not Found", None)),
            &mut port,
        );

        assert!(next.is_none());
        assert_eq!(
            port.state(Region::Content),
            &RegionState::Error("Error loading email content: 404 Not Found. Please try again.".into())
        );
        assert_eq!(port.state(Region::Attachments), &RegionState::Idle);
        assert!(port.active().is_none());
    }

    #[test]
    fn test_attachment_outcomes() {
        let mut controller = SelectionController::new();
        let mut port = InMemoryViewPort::new();
        let path = EmailPath::new("e1.html");
        let ticket = view_ticket(&controller.select(path.clone(), &mut port));

        controller.complete_attachments(ticket, &path, Ok(vec![]), &mut port);
        assert_eq!(port.state(Region::Attachments), &RegionState::Empty);

        let list = vec![AttachmentDescriptor::new("a.pdf", "/attachments/1/download")];
        controller.complete_attachments(ticket, &path, Ok(list.clone()), &mut port);
        assert_eq!(port.attachments(), list.as_slice());

        controller.complete_attachments(
            ticket,
            &path,
            Err(ApiError::from_status(500, "Internal Server Error", None)),
            &mut port,
        );
        assert_eq!(
            port.state(Region::Attachments),
            &RegionState::Error("Error loading attachments: 500 Internal Server Error".into())
        );
    }

    #[test]
    fn test_later_selection_wins_regardless_of_completion_order() {
        let mut controller = SelectionController::new();
        let mut port = InMemoryViewPort::new();
        let a = EmailPath::new("a.html");
        let b = EmailPath::new("b.html");

        let ticket_a = view_ticket(&controller.select(a.clone(), &mut port));
        let ticket_b = view_ticket(&controller.select(b.clone(), &mut port));

        let next_b = controller.complete_view(ticket_b, b.clone(), Ok("B".into()), &mut port);
        let next_a = controller.complete_view(ticket_a, a.clone(), Ok("A".into()), &mut port);

        assert!(next_b.is_some());
        assert!(next_a.is_none());
        assert_eq!(port.html(), Some("B"));
        assert_eq!(port.active(), Some(&b));
    }

    #[test]
    fn test_stale_attachments_discarded() {
        let mut controller = SelectionController::new();
        let mut port = InMemoryViewPort::new();
        let a = EmailPath::new("a.html");
        let b = EmailPath::new("b.html");

        let ticket_a = view_ticket(&controller.select(a.clone(), &mut port));
        controller.complete_view(ticket_a, a.clone(), Ok("A".into()), &mut port);
        controller.select(b, &mut port);

        let applied = controller.complete_attachments(
            ticket_a,
            &a,
            Ok(vec![AttachmentDescriptor::new("a.pdf", "/x")]),
            &mut port,
        );
        assert!(!applied);
        assert!(port.state(Region::Attachments).is_loading());
    }

    #[test]
    fn test_reset_drops_in_flight() {
        let mut controller = SelectionController::new();
        let mut port = InMemoryViewPort::new();
        let a = EmailPath::new("a.html");

        let ticket = view_ticket(&controller.select(a.clone(), &mut port));
        controller.reset(&mut port);

        assert!(controller.complete_view(ticket, a, Ok("A".into()), &mut port).is_none());
        assert!(port.html().is_none());
        assert_eq!(port.state(Region::Attachments), &RegionState::Idle);
        assert!(controller.active().is_none());
    }
}
