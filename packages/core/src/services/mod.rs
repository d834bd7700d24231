//! Tree Services
//!
//! - `TreeAccessor` - Read-only derivation of parent, children, ancestors,
//!   descendants, siblings, roots and depth from a flat collection
//! - `CascadeDeleter` - Subtree removal built on the accessor's children query
//!
//! Both are generic over a [`DocumentStore`](crate::db::DocumentStore) and
//! take the store handle explicitly; there is no global connection.

pub mod cascade;
pub mod error;
pub mod tree_accessor;

pub use cascade::{CascadeDeleter, CascadeReport};
pub use error::TreeError;
pub use tree_accessor::TreeAccessor;
