//! In-memory view port
//!
//! Keeps the latest state of every region so a host can draw from it and
//! tests can assert on it.

use super::{Region, RegionContent, ViewMode, ViewPort, messages};
use crate::models::{AttachmentDescriptor, EmailPath, SearchResultItem};

/// What a region currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegionState {
    #[default]
    Idle,
    Loading,
    Empty,
    Error(String),
    Populated(RegionContent),
}

impl RegionState {
    /// Placeholder or message text for non-populated states
    pub fn message(&self, region: Region) -> Option<&str> {
        match self {
            Self::Idle => Some(messages::idle(region)),
            Self::Loading => Some(messages::loading(region)),
            Self::Empty => Some(messages::empty(region)),
            Self::Error(message) => Some(message.as_str()),
            Self::Populated(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// View port that records region state instead of drawing it
#[derive(Debug, Default)]
pub struct InMemoryViewPort {
    results: RegionState,
    content: RegionState,
    attachments: RegionState,
    recent: RegionState,
    active: Option<EmailPath>,
    mode: ViewMode,
    back_to_recent: bool,
    alerts: Vec<String>,
    revision: u64,
}

impl InMemoryViewPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, region: Region) -> &RegionState {
        match region {
            Region::Results => &self.results,
            Region::Content => &self.content,
            Region::Attachments => &self.attachments,
            Region::Recent => &self.recent,
        }
    }

    fn write(&mut self, region: Region, state: RegionState) {
        if region == Region::Results {
            self.back_to_recent = false;
        }
        let slot = match region {
            Region::Results => &mut self.results,
            Region::Content => &mut self.content,
            Region::Attachments => &mut self.attachments,
            Region::Recent => &mut self.recent,
        };
        *slot = state;
        self.revision += 1;
    }

    /// Rendered result rows, empty unless the results region is populated
    pub fn result_rows(&self) -> &[SearchResultItem] {
        match &self.results {
            RegionState::Populated(RegionContent::Results(rows)) => rows.as_slice(),
            _ => &[],
        }
    }

    /// Rows of the recent-emails panel
    pub fn recent_rows(&self) -> &[SearchResultItem] {
        match &self.recent {
            RegionState::Populated(RegionContent::Results(rows)) => rows.as_slice(),
            _ => &[],
        }
    }

    /// HTML shown in the content pane, if any
    pub fn html(&self) -> Option<&str> {
        match &self.content {
            RegionState::Populated(RegionContent::Html(html)) => Some(html.as_str()),
            _ => None,
        }
    }

    /// Attachment links shown in the attachment pane
    pub fn attachments(&self) -> &[AttachmentDescriptor] {
        match &self.attachments {
            RegionState::Populated(RegionContent::Attachments(list)) => list.as_slice(),
            _ => &[],
        }
    }

    pub fn active(&self) -> Option<&EmailPath> {
        self.active.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn has_back_to_recent(&self) -> bool {
        self.back_to_recent
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drain alerts raised since the last call
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Incremented on every change; hosts redraw when it moves
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl ViewPort for InMemoryViewPort {
    fn set_idle(&mut self, region: Region) {
        self.write(region, RegionState::Idle);
    }

    fn set_loading(&mut self, region: Region) {
        self.write(region, RegionState::Loading);
    }

    fn set_error(&mut self, region: Region, message: &str) {
        self.write(region, RegionState::Error(message.to_string()));
    }

    fn set_empty(&mut self, region: Region) {
        self.write(region, RegionState::Empty);
    }

    fn set_content(&mut self, region: Region, content: RegionContent) {
        self.write(region, RegionState::Populated(content));
    }

    fn set_active(&mut self, path: Option<&EmailPath>) {
        self.active = path.cloned();
        self.revision += 1;
    }

    fn show_back_to_recent(&mut self) {
        self.back_to_recent = true;
        self.revision += 1;
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.revision += 1;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
        self.revision += 1;
    }
}
