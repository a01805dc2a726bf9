//! Command-line input handling
//!
//! Each line typed at the prompt is parsed into a [`Command`].

pub mod commands;
pub mod help;

pub use commands::Command;
pub use help::render_help;
