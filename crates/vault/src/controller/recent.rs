//! Recent-emails panel and mail checks

use log::{debug, error, info};

use super::{Request, Ticket, TicketCounter};
use crate::api::ApiError;
use crate::models::{EmailPath, SearchResultItem};
use crate::view::{Region, RegionContent, ViewPort, messages};

/// Most emails the recent panel lists
pub const RECENT_LIMIT: usize = 15;

/// Owns the recent-emails list and the mail-check round trip
#[derive(Debug, Default)]
pub struct RecentController {
    tickets: TicketCounter,
    checks: TicketCounter,
    emails: Vec<SearchResultItem>,
}

impl RecentController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the recent list, returning the request to run
    pub fn refresh<P: ViewPort + ?Sized>(&mut self, port: &mut P) -> Request {
        let ticket = self.tickets.issue();
        self.emails.clear();
        port.set_loading(Region::Recent);
        Request::Recent {
            ticket,
            limit: RECENT_LIMIT,
        }
    }

    /// Apply a recent-emails response
    ///
    /// Returns `false` if a newer refresh has been issued since.
    pub fn complete<P: ViewPort + ?Sized>(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<SearchResultItem>, ApiError>,
        port: &mut P,
    ) -> bool {
        if !self.tickets.is_current(ticket) {
            debug!("Discarding stale recent emails (ticket {})", ticket.value());
            return false;
        }

        match result {
            Ok(items) if items.is_empty() => port.set_empty(Region::Recent),
            Ok(mut items) => {
                items.sort_by_key(|item| std::cmp::Reverse(item.received_at()));
                items.truncate(RECENT_LIMIT);
                info!("Loaded {} recent emails", items.len());
                self.emails = items.clone();
                port.set_content(Region::Recent, RegionContent::Results(items));
            }
            Err(e) => {
                error!("Error loading recent emails: {}", e);
                port.set_error(
                    Region::Recent,
                    &format!("{}: {}", messages::RECENT_ERROR, e),
                );
            }
        }
        true
    }

    /// Ask the server to pull new mail
    pub fn check<P: ViewPort + ?Sized>(&mut self, port: &mut P) -> Request {
        let ticket = self.checks.issue();
        port.alert(messages::CHECKING);
        Request::CheckEmails { ticket }
    }

    /// Apply a mail-check response
    ///
    /// A successful check refreshes the recent list.
    pub fn complete_check<P: ViewPort + ?Sized>(
        &mut self,
        ticket: Ticket,
        result: Result<String, ApiError>,
        port: &mut P,
    ) -> Option<Request> {
        if !self.checks.is_current(ticket) {
            debug!("Discarding stale mail check (ticket {})", ticket.value());
            return None;
        }

        match result {
            Ok(message) => {
                info!("Mail check finished: {}", message);
                port.alert(&message);
                Some(self.refresh(port))
            }
            Err(e) => {
                error!("Mail check failed: {}", e);
                port.alert(&format!("{}: {}", messages::CHECK_ERROR, e));
                None
            }
        }
    }

    /// Emails currently listed, newest first
    pub fn emails(&self) -> &[SearchResultItem] {
        &self.emails
    }

    pub fn contains(&self, path: &EmailPath) -> bool {
        self.emails.iter().any(|item| &item.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{InMemoryViewPort, RegionState};

    fn ticket_of(request: &Request) -> Ticket {
        request.ticket()
    }

    #[test]
    fn test_refresh_sets_loading() {
        let mut controller = RecentController::new();
        let mut port = InMemoryViewPort::new();

        let request = controller.refresh(&mut port);
        assert!(matches!(request, Request::Recent { limit: RECENT_LIMIT, .. }));
        assert!(port.state(Region::Recent).is_loading());
    }

    #[test]
    fn test_complete_sorts_newest_first_and_caps() {
        let mut controller = RecentController::new();
        let mut port = InMemoryViewPort::new();
        let ticket = ticket_of(&controller.refresh(&mut port));

        let mut items: Vec<_> = (1..=20)
            .map(|day| {
                SearchResultItem::new(format!("d{}.html", day), format!("Day {}", day))
                    .with_received(format!("03/{:02}/2024 09:00 AM", day))
            })
            .collect();
        items.reverse();
        items.swap(0, 5);

        assert!(controller.complete(ticket, Ok(items), &mut port));
        let rows = port.recent_rows();
        assert_eq!(rows.len(), RECENT_LIMIT);
        assert_eq!(rows[0].path.as_str(), "d20.html");
        assert_eq!(rows[RECENT_LIMIT - 1].path.as_str(), "d6.html");
        assert!(controller.contains(&EmailPath::new("d20.html")));
        assert!(!controller.contains(&EmailPath::new("d1.html")));
    }

    #[test]
    fn test_empty_and_error() {
        let mut controller = RecentController::new();
        let mut port = InMemoryViewPort::new();

        let ticket = ticket_of(&controller.refresh(&mut port));
        controller.complete(ticket, Ok(vec![]), &mut port);
        assert_eq!(port.state(Region::Recent), &RegionState::Empty);

        let ticket = ticket_of(&controller.refresh(&mut port));
        controller.complete(
            ticket,
            Err(ApiError::from_status(500, "Internal Server Error", None)),
            &mut port,
        );
        assert_eq!(
            port.state(Region::Recent),
            &RegionState::Error(
                "Error loading recent emails: 500 Internal Server Error".to_string()
            )
        );
    }

    #[test]
    fn test_stale_refresh_is_discarded() {
        let mut controller = RecentController::new();
        let mut port = InMemoryViewPort::new();

        let first = ticket_of(&controller.refresh(&mut port));
        let second = ticket_of(&controller.refresh(&mut port));

        let stale = vec![SearchResultItem::new("old.html", "Old")];
        assert!(!controller.complete(first, Ok(stale), &mut port));
        assert!(port.state(Region::Recent).is_loading());

        let fresh = vec![SearchResultItem::new("new.html", "New")];
        assert!(controller.complete(second, Ok(fresh), &mut port));
        assert_eq!(port.recent_rows()[0].path.as_str(), "new.html");
    }

    #[test]
    fn test_successful_check_refreshes() {
        let mut controller = RecentController::new();
        let mut port = InMemoryViewPort::new();

        let ticket = ticket_of(&controller.check(&mut port));
        let next = controller.complete_check(
            ticket,
            Ok("Emails checked successfully".into()),
            &mut port,
        );

        assert!(matches!(next, Some(Request::Recent { .. })));
        assert!(port.state(Region::Recent).is_loading());
        assert_eq!(
            port.take_alerts(),
            vec![messages::CHECKING, "Emails checked successfully"]
        );
    }

    #[test]
    fn test_failed_check_alerts_without_refresh() {
        let mut controller = RecentController::new();
        let mut port = InMemoryViewPort::new();

        let ticket = ticket_of(&controller.check(&mut port));
        port.take_alerts();
        let next = controller.complete_check(
            ticket,
            Err(ApiError::from_status(
                500,
                "Internal Server Error",
                Some("Exchange login failed".to_string()),
            )),
            &mut port,
        );

        assert!(next.is_none());
        assert_eq!(
            port.take_alerts(),
            vec!["Error checking emails: Exchange login failed"]
        );
        assert_eq!(port.state(Region::Recent), &RegionState::Idle);
    }
}
