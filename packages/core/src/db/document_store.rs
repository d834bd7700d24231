//! DocumentStore Trait - Storage Abstraction Layer
//!
//! This module defines the `DocumentStore` trait: the minimal set of document
//! primitives the tree engine needs from whatever database owns the
//! collection. The engine issues queries only through this trait, so any
//! backend (embedded, networked, in-memory) can carry a derived tree.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: All methods are async so network backends fit without
//!    blocking the caller's runtime
//! 2. **Associated Record Type**: Each store chooses its record type; the
//!    engine only requires [`TreeNode`] access to it
//! 3. **Ordered Queries**: `find_where` always returns a total order (sort keys,
//!    then identity), which is what sibling order is built on
//! 4. **No Transactions**: Cross-record atomicity is not part of the contract
//!
//! # Examples
//!
//! ```rust
//! use arbor_core::db::{DocumentStore, MemoryStore, SortKey};
//! use serde_json::{json, Value};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! let fields = json!({"parent_id": null}).as_object().cloned().unwrap();
//! let created = store.insert(fields).await?;
//!
//! let roots = store.find_where("parent_id", &Value::Null, &[]).await?;
//! assert_eq!(roots, vec![created]);
//! # Ok::<(), arbor_core::db::StoreError>(())
//! # }).unwrap();
//! ```

use super::{SortKey, StoreError};
use crate::behaviors::TreeNode;
use crate::models::Fields;
use async_trait::async_trait;
use serde_json::Value;

/// Abstraction over a flat document collection
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so tree services can be shared
/// across tasks.
///
/// # Method Categories
///
/// - **Core CRUD**: insert, find_by_id, set_field, remove
/// - **Querying**: find_where, count
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Record type returned by reads
    type Record: TreeNode;

    /// Insert a new document and return it with its assigned identity
    ///
    /// # Arguments
    ///
    /// * `fields` - Document fields (ownership transferred to avoid cloning)
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the write.
    async fn insert(&self, fields: Fields) -> Result<Self::Record, StoreError>;

    /// Get document by ID
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if the document exists
    /// - `Ok(None)` if it doesn't (not an error)
    /// - `Err(_)` if the backend fails
    async fn find_by_id(&self, id: &str) -> Result<Option<Self::Record>, StoreError>;

    /// Query documents whose `field` equals `value`
    ///
    /// A `null` value also matches documents where `field` is absent.
    ///
    /// Results are sorted by `order_by`, then by identity ascending.
    async fn find_where(
        &self,
        field: &str,
        value: &Value,
        order_by: &[SortKey],
    ) -> Result<Vec<Self::Record>, StoreError>;

    /// Remove document by ID
    ///
    /// # Returns
    ///
    /// `true` if a document was removed, `false` if it did not exist.
    /// Deleting a missing document is not an error.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;

    /// Overwrite a single field of an existing document
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the document does not exist.
    async fn set_field(
        &self,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Self::Record, StoreError>;

    /// Number of documents in the collection
    async fn count(&self) -> Result<usize, StoreError>;
}
