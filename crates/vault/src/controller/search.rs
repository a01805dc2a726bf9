//! Search lifecycle: validate, de-duplicate, request, render

use log::{debug, error, info};

use super::{Request, Ticket, TicketCounter};
use crate::api::ApiError;
use crate::guard::QueryGuard;
use crate::models::{EmailPath, Query, SearchResultItem, ValidationError};
use crate::view::{Region, RegionContent, ViewPort, ViewToggle, messages};

/// Owns the query guard and the currently rendered result list
#[derive(Debug, Default)]
pub struct SearchController {
    guard: QueryGuard,
    tickets: TicketCounter,
    results: Vec<SearchResultItem>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a search form submission
    ///
    /// Returns the request to run, `Ok(None)` for a suppressed duplicate, or
    /// the validation error that was already shown to the user.
    pub fn submit<P: ViewPort + ?Sized>(
        &mut self,
        raw_input: &str,
        toggle: &mut ViewToggle,
        port: &mut P,
    ) -> Result<Option<Request>, ValidationError> {
        let query = match Query::parse(raw_input) {
            Ok(query) => query,
            Err(e) => {
                port.alert(&e.to_string());
                return Err(e);
            }
        };

        toggle.show_results(port);

        if !self.guard.should_run(&query) {
            debug!("Skipping duplicate search for \"{}\"", query);
            return Ok(None);
        }

        let ticket = self.tickets.issue();
        self.results.clear();

        port.set_loading(Region::Results);
        port.show_back_to_recent();
        port.set_idle(Region::Content);

        Ok(Some(Request::Search { ticket, query }))
    }

    /// Apply a search response
    ///
    /// Returns `false` if the response belonged to a superseded query.
    pub fn complete<P: ViewPort + ?Sized>(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<SearchResultItem>, ApiError>,
        port: &mut P,
    ) -> bool {
        if !self.tickets.is_current(ticket) {
            debug!("Discarding stale search response (ticket {})", ticket.value());
            return false;
        }

        match result {
            Ok(items) if items.is_empty() => {
                info!("Search returned no results");
                port.set_empty(Region::Results);
            }
            Ok(items) => {
                info!("Search returned {} results", items.len());
                self.results = items.clone();
                port.set_content(Region::Results, RegionContent::Results(items));
            }
            Err(ApiError::ServerReported(message)) => {
                error!("Search rejected by server: {}", message);
                port.set_error(Region::Results, &message);
            }
            Err(e) => {
                error!("Search failed: {}", e);
                port.set_error(
                    Region::Results,
                    &format!("{}: {}", messages::SEARCH_ERROR, e),
                );
            }
        }

        port.show_back_to_recent();
        true
    }

    /// Results currently on screen, in server order
    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    /// Whether `path` belongs to a rendered result row
    pub fn contains(&self, path: &EmailPath) -> bool {
        self.results.iter().any(|item| &item.path == path)
    }

    pub fn last_query(&self) -> &str {
        self.guard.last()
    }
}
