//! Storage Layer
//!
//! The tree engine talks to storage only through the [`DocumentStore`] trait:
//!
//! - `insert` / `find_by_id` / `remove` / `set_field` - record primitives
//! - `find_where` - equality query with a total sort order
//! - `count` - collection size
//!
//! [`MemoryStore`] is a volatile implementation used by tests, benchmarks and
//! applications that want a scratch collection. Production backends implement
//! the trait over their own connection.

mod document_store;
mod error;
mod memory_store;
pub mod ordering;

pub use document_store::DocumentStore;
pub use error::StoreError;
pub use memory_store::MemoryStore;
pub use ordering::SortKey;
