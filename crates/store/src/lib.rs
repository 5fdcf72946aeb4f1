//! Store - Project persistence and editor settings
//!
//! This crate handles project serialization, file operations,
//! editor settings, and the recent files list.

mod format;
mod serializer;
mod file_io;
mod error;
mod settings;
mod recent;

pub use format::*;
pub use serializer::*;
pub use file_io::*;
pub use error::*;
pub use settings::*;
pub use recent::*;
