//! Arbor Core: tree hierarchies over flat document storage
//!
//! Every document carries a single parent reference. This crate derives the
//! whole tree from that field alone (parent, children, ancestors,
//! descendants, siblings, roots, depth) and removes entire subtrees when a
//! node is destroyed. No tree structure is ever persisted.
//!
//! # Modules
//!
//! - [`behaviors`] - `TreeNode`, the capability a record needs to join a tree
//! - [`config`] - Field mapping (parent reference and order fields)
//! - [`db`] - `DocumentStore` abstraction and the in-memory store
//! - [`models`] - `Document`, the flat record type
//! - [`services`] - `TreeAccessor` and `CascadeDeleter`
//!
//! # Preconditions
//!
//! The parent graph must be acyclic. Cycles are neither detected nor repaired.

pub mod behaviors;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use behaviors::TreeNode;
pub use config::{ConfigError, TreeConfig};
pub use db::{DocumentStore, MemoryStore, SortKey, StoreError};
pub use models::{Document, Fields};
pub use services::{CascadeDeleter, CascadeReport, TreeAccessor, TreeError};
