//! Vault crate - Client logic for searching an email archive
//!
//! This crate provides platform-independent client functionality including:
//! - Domain models (SearchResultItem, AttachmentDescriptor, Query)
//! - HTTP client for the archive server's search/view/attachment, recent-emails
//!   and mail-check endpoints
//! - Duplicate-query suppression
//! - Search, selection and recent-emails controllers driving a view port
//!   abstraction
//! - Client settings loading
//!
//! This crate has zero UI dependencies and never spawns threads; hosts run
//! the returned requests on whatever executor they use.

pub mod api;
pub mod controller;
pub mod guard;
pub mod models;
pub mod settings;
pub mod view;

pub use api::{ApiCall, ApiError, ArchiveApi, ArchiveClient, Endpoint, InMemoryArchive};
pub use controller::{
    Completion, RECENT_LIMIT, RecentController, Request, SearchController, SelectionController,
    Session, Ticket,
};
pub use guard::QueryGuard;
pub use models::{AttachmentDescriptor, EmailPath, Query, SearchResultItem, ValidationError};
pub use settings::ClientSettings;
pub use view::{
    InMemoryViewPort, Region, RegionContent, RegionState, ViewMode, ViewPort, ViewToggle,
    messages,
};
