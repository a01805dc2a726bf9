//! Request orchestration for search and selection
//!
//! Controllers never perform I/O. Each operation updates the view port and
//! hands back a [`Request`] describing the fetch to run; the host executes it
//! (on whatever executor it likes) and feeds the resulting [`Completion`]
//! back in. Every request carries the [`Ticket`] that was current when it
//! was issued, and a completion whose ticket has since been superseded is
//! dropped without touching the UI.

mod recent;
mod search;
mod selection;
mod session;

pub use recent::{RECENT_LIMIT, RecentController};
pub use search::SearchController;
pub use selection::SelectionController;
pub use session::Session;

use log::info;

use crate::api::{ApiError, ArchiveApi};
use crate::models::{AttachmentDescriptor, EmailPath, Query, SearchResultItem};

/// Monotonic token identifying the operation a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues tickets and remembers the latest one
#[derive(Debug, Default)]
struct TicketCounter {
    current: u64,
}

impl TicketCounter {
    fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}

/// A fetch the host must run against the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search { ticket: Ticket, query: Query },
    View { ticket: Ticket, path: EmailPath },
    Attachments { ticket: Ticket, path: EmailPath },
    Recent { ticket: Ticket, limit: usize },
    CheckEmails { ticket: Ticket },
}

/// The outcome of a [`Request`]
#[derive(Debug)]
pub enum Completion {
    Search {
        ticket: Ticket,
        result: Result<Vec<SearchResultItem>, ApiError>,
    },
    View {
        ticket: Ticket,
        path: EmailPath,
        result: Result<String, ApiError>,
    },
    Attachments {
        ticket: Ticket,
        path: EmailPath,
        result: Result<Vec<AttachmentDescriptor>, ApiError>,
    },
    Recent {
        ticket: Ticket,
        result: Result<Vec<SearchResultItem>, ApiError>,
    },
    CheckEmails {
        ticket: Ticket,
        result: Result<String, ApiError>,
    },
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::Search { ticket, .. }
            | Self::View { ticket, .. }
            | Self::Attachments { ticket, .. }
            | Self::Recent { ticket, .. }
            | Self::CheckEmails { ticket } => *ticket,
        }
    }

    /// Run the request, blocking until the archive answers
    pub fn execute<A: ArchiveApi + ?Sized>(self, api: &A) -> Completion {
        match self {
            Self::Search { ticket, query } => {
                info!("Searching for \"{}\"", query);
                Completion::Search {
                    ticket,
                    result: api.search(&query),
                }
            }
            Self::View { ticket, path } => {
                info!("Loading email {}", path);
                let result = api.view(&path);
                Completion::View {
                    ticket,
                    path,
                    result,
                }
            }
            Self::Attachments { ticket, path } => {
                info!("Loading attachments for {}", path);
                let result = api.list_attachments(&path);
                Completion::Attachments {
                    ticket,
                    path,
                    result,
                }
            }
            Self::Recent { ticket, limit } => {
                info!("Loading {} most recent emails", limit);
                Completion::Recent {
                    ticket,
                    result: api.recent(limit),
                }
            }
            Self::CheckEmails { ticket } => {
                info!("Checking for new emails");
                Completion::CheckEmails {
                    ticket,
                    result: api.check_emails(),
                }
            }
        }
    }
}
