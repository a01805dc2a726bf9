//! Domain models for archived email entities

mod attachment;
mod email;
mod query;

pub use attachment::AttachmentDescriptor;
pub use email::{EmailPath, SearchResultItem};
pub use query::{Query, ValidationError};
