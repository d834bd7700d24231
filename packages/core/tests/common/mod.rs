//! Shared fixtures for integration tests
//!
//! - `CountingStore` counts store round-trips per primitive
//! - `FailingStore` injects backend failures on chosen ids
//! - `SixNodeTree` builds the reference scenario used across test files

#![allow(dead_code)]

use arbor_core::db::{DocumentStore, MemoryStore, SortKey, StoreError};
use arbor_core::models::{Document, Fields};
use arbor_core::services::{CascadeDeleter, TreeAccessor};
use arbor_core::TreeNode;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Install a test log subscriber once (`RUST_LOG=arbor_core=debug` to see queries)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn ids<R: TreeNode>(records: &[R]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

// =========================================================================
// Counting store
// =========================================================================

/// Store wrapper that counts every call
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read round-trips (`find_by_id`, `find_where`, `count`) since the last reset
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Write round-trips (`insert`, `remove`, `set_field`) since the last reset
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.reads.store(0, Ordering::SeqCst);
        self.writes.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    type Record = Document;

    async fn insert(&self, fields: Fields) -> Result<Document, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(fields).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_where(
        &self,
        field: &str,
        value: &Value,
        order_by: &[SortKey],
    ) -> Result<Vec<Document>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_where(field, value, order_by).await
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(id).await
    }

    async fn set_field(
        &self,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Document, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_field(id, field, value).await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.count().await
    }
}

// =========================================================================
// Failing store
// =========================================================================

/// Store wrapper that fails selected operations
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    fail_remove: Mutex<HashSet<String>>,
    fail_children_of: Mutex<HashSet<String>>,
    fail_lookup: Mutex<HashSet<String>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `remove(id)` fail
    pub fn fail_remove_of(&self, id: &str) {
        self.fail_remove.lock().unwrap().insert(id.to_string());
    }

    /// Make any `find_where` matching the value `id` fail
    pub fn fail_children_of(&self, id: &str) {
        self.fail_children_of.lock().unwrap().insert(id.to_string());
    }

    /// Make `find_by_id(id)` fail
    pub fn fail_lookup_of(&self, id: &str) {
        self.fail_lookup.lock().unwrap().insert(id.to_string());
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    type Record = Document;

    async fn insert(&self, fields: Fields) -> Result<Document, StoreError> {
        self.inner.insert(fields).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        if self.fail_lookup.lock().unwrap().contains(id) {
            return Err(StoreError::backend(format!("lookup of {} failed", id)));
        }
        self.inner.find_by_id(id).await
    }

    async fn find_where(
        &self,
        field: &str,
        value: &Value,
        order_by: &[SortKey],
    ) -> Result<Vec<Document>, StoreError> {
        let poisoned = value
            .as_str()
            .map(|id| self.fail_children_of.lock().unwrap().contains(id))
            .unwrap_or(false);
        if poisoned {
            return Err(StoreError::backend(format!("query on {} failed", value)));
        }
        self.inner.find_where(field, value, order_by).await
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        if self.fail_remove.lock().unwrap().contains(id) {
            return Err(StoreError::backend(format!("remove of {} failed", id)));
        }
        self.inner.remove(id).await
    }

    async fn set_field(
        &self,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Document, StoreError> {
        self.inner.set_field(id, field, value).await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.inner.count().await
    }
}

// =========================================================================
// Reference scenario
// =========================================================================

/// root1 ─┬─ root_child1 ── child1_child
///        └─ root_child2
/// root2
/// root3
pub struct SixNodeTree {
    pub root1: Document,
    pub root_child1: Document,
    pub child1_child: Document,
    pub root_child2: Document,
    pub root2: Document,
    pub root3: Document,
}

impl SixNodeTree {
    /// Insert the six nodes in the canonical creation order
    pub async fn build<S>(tree: &TreeAccessor<S>) -> anyhow::Result<Self>
    where
        S: DocumentStore<Record = Document>,
    {
        let root1 = tree.create_root(Fields::new()).await?;
        let root_child1 = tree.create_child(&root1, Fields::new()).await?;
        let child1_child = tree.create_child(&root_child1, Fields::new()).await?;
        let root_child2 = tree.create_child(&root1, Fields::new()).await?;
        let root2 = tree.create_root(Fields::new()).await?;
        let root3 = tree.create_root(Fields::new()).await?;

        Ok(Self {
            root1,
            root_child1,
            child1_child,
            root_child2,
            root2,
            root3,
        })
    }

    pub fn all(&self) -> Vec<&Document> {
        vec![
            &self.root1,
            &self.root_child1,
            &self.child1_child,
            &self.root_child2,
            &self.root2,
            &self.root3,
        ]
    }
}

/// Accessor and deleter over a fresh in-memory store
pub fn memory_tree() -> (TreeAccessor<MemoryStore>, CascadeDeleter<MemoryStore>) {
    init_tracing();
    let tree = TreeAccessor::with_defaults(Arc::new(MemoryStore::new()));
    let deleter = CascadeDeleter::new(tree.clone());
    (tree, deleter)
}
