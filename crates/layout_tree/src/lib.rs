//! Layout Tree - Scene composer layout model
//!
//! This crate provides the hierarchical layout model edited by the scene
//! composer: a root group holding tables and leaf elements, tables holding
//! ordered cells addressed by `(row, column)`, and cells holding at most one
//! child. Nodes refer to each other by stable [`NodeId`]s only.

mod node;
mod node_id;
mod error;
mod name;
mod root;
mod element;
pub mod table;
mod tree;

pub use node::*;
pub use node_id::*;
pub use error::*;
pub use name::*;
pub use root::*;
pub use element::*;
pub use table::*;
pub use tree::*;
