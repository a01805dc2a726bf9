//! Fixed user-facing texts for the regions

use super::Region;

pub const SEARCHING: &str = "Searching...";
pub const LOADING_CONTENT: &str = "Loading...";
pub const LOADING_ATTACHMENTS: &str = "Loading attachments...";
pub const LOADING_RECENT: &str = "Loading recent emails...";

pub const NO_RESULTS: &str = "No results found.";
pub const NO_ATTACHMENTS: &str = "No attachments.";
pub const NO_RECENT: &str = "No emails in the archive yet.";

pub const SELECT_PROMPT: &str = "Select an email from the search results to view its content.";
pub const SEARCH_PROMPT: &str = "Enter a search query to find emails.";

pub const BACK_TO_RECENT: &str = "\u{2190} Back to Recent Emails";

pub const SEARCH_ERROR: &str = "Error performing search";
pub const CONTENT_ERROR: &str = "Error loading email content";
pub const ATTACHMENTS_ERROR: &str = "Error loading attachments";
pub const RECENT_ERROR: &str = "Error loading recent emails";
pub const CHECKING: &str = "Checking for new emails...";
pub const CHECK_ERROR: &str = "Error checking emails";

/// Prompt a region shows before anything was requested
pub fn idle(region: Region) -> &'static str {
    match region {
        Region::Results => SEARCH_PROMPT,
        Region::Content => SELECT_PROMPT,
        Region::Attachments => "",
        Region::Recent => "",
    }
}

pub fn loading(region: Region) -> &'static str {
    match region {
        Region::Results => SEARCHING,
        Region::Content => LOADING_CONTENT,
        Region::Attachments => LOADING_ATTACHMENTS,
        Region::Recent => LOADING_RECENT,
    }
}

pub fn empty(region: Region) -> &'static str {
    match region {
        Region::Results => NO_RESULTS,
        Region::Content => "",
        Region::Attachments => NO_ATTACHMENTS,
        Region::Recent => NO_RECENT,
    }
}
