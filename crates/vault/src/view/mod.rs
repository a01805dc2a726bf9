//! View port abstraction over the named UI regions
//!
//! Controllers describe what each region should show; a host decides how
//! to draw it. Nothing in this module knows about a rendering surface.

mod memory;
pub mod messages;
mod toggle;

pub use memory::{InMemoryViewPort, RegionState};
pub use toggle::ViewToggle;

use crate::models::{AttachmentDescriptor, EmailPath, SearchResultItem};

/// Named regions the controllers write into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Search result rows
    Results,
    /// Rendered email content
    Content,
    /// Attachment links for the displayed email
    Attachments,
    /// Most recently received emails, newest first
    Recent,
}

/// Which of the two mutually exclusive panels is visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    RecentEmails,
    SearchResults,
}

/// Populated payload for a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionContent {
    /// Email rows, for the results or recent region
    Results(Vec<SearchResultItem>),
    Html(String),
    Attachments(Vec<AttachmentDescriptor>),
}

/// Side-effect channel from the controllers to the UI
pub trait ViewPort {
    /// Show the region's default prompt
    fn set_idle(&mut self, region: Region);

    /// Show a loading placeholder
    fn set_loading(&mut self, region: Region);

    /// Replace the region with an error message
    fn set_error(&mut self, region: Region, message: &str);

    /// Show the region's explicit empty-state message
    fn set_empty(&mut self, region: Region);

    /// Replace the region with a populated payload
    fn set_content(&mut self, region: Region, content: RegionContent);

    /// Highlight one result row, or none
    fn set_active(&mut self, path: Option<&EmailPath>);

    /// Insert the "back to recent emails" affordance at the top of the results region
    fn show_back_to_recent(&mut self);

    /// Switch the visible panel
    fn set_view_mode(&mut self, mode: ViewMode);

    /// Inline notice that doesn't belong to a region
    fn alert(&mut self, message: &str);
}
