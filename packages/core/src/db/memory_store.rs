//! In-Memory Document Store
//!
//! A volatile [`DocumentStore`] backed by a `BTreeMap` behind a tokio
//! `RwLock`. Identities come from a monotonic sequence rendered as 24 hex
//! digits, so identity order is insertion order and sorting by id reproduces
//! creation order.

use super::ordering::{field_matches, sort_records};
use super::{DocumentStore, SortKey, StoreError};
use crate::models::{Document, Fields};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Flat document collection held in memory
#[derive(Debug)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Document>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a store pre-populated with existing documents
    ///
    /// Their ids are kept as-is. The sequence resumes after the largest
    /// seeded id that reads as hex, so later inserts still sort after every
    /// seeded document.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let documents: BTreeMap<String, Document> = documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();

        let next_id = documents
            .keys()
            .filter_map(|id| u64::from_str_radix(id, 16).ok())
            .max()
            .map_or(1, |highest| highest.saturating_add(1));

        Self {
            documents: RwLock::new(documents),
            next_id: AtomicU64::new(next_id),
        }
    }

    /// All documents, in identity order
    pub async fn documents(&self) -> Vec<Document> {
        self.documents.read().await.values().cloned().collect()
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{:024x}", n)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    type Record = Document;

    async fn insert(&self, fields: Fields) -> Result<Document, StoreError> {
        let mut documents = self.documents.write().await;

        let mut id = self.allocate_id();
        while documents.contains_key(&id) {
            id = self.allocate_id();
        }

        let document = Document::new(id.clone(), fields);
        documents.insert(id, document.clone());
        tracing::trace!("Inserted document {}", document.id);
        Ok(document)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn find_where(
        &self,
        field: &str,
        value: &Value,
        order_by: &[SortKey],
    ) -> Result<Vec<Document>, StoreError> {
        let mut matches: Vec<Document> = self
            .documents
            .read()
            .await
            .values()
            .filter(|doc| field_matches(doc.fields.get(field), value))
            .cloned()
            .collect();

        sort_records(&mut matches, order_by);
        Ok(matches)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let existed = self.documents.write().await.remove(id).is_some();
        tracing::trace!("Removed document {} (existed: {})", id, existed);
        Ok(existed)
    }

    async fn set_field(
        &self,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Document, StoreError> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;

        document.set(field, value);
        Ok(document.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.documents.read().await.len())
    }
}
