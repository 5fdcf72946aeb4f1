//! Edit Engine - Layout commands, undo/redo, and selection sync
//!
//! This crate implements the reversible editing commands of the scene
//! composer, the bounded linear history they are recorded in, and the
//! selection bookkeeping that keeps observers in step with every change.

mod command;
mod error;
mod executor;
mod undo;
mod selection;
mod move_commands;
mod table_commands;
mod child_commands;

pub use command::*;
pub use error::*;
pub use executor::*;
pub use undo::*;
pub use selection::*;
pub use move_commands::*;
pub use table_commands::*;
pub use child_commands::*;
