//! Data Models
//!
//! - `Document` - Flat, schemaless record held by the in-memory store
//!
//! A document knows nothing about trees. Its parent reference is an ordinary
//! field, read through the [`TreeNode`](crate::behaviors::TreeNode) capability.

mod document;

pub use document::{Document, Fields};
