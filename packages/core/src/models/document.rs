//! Document Data Structure
//!
//! A `Document` is a record in a flat collection: a store-assigned `id`, a JSON
//! object of arbitrary fields and bookkeeping timestamps.
//!
//! # Examples
//!
//! ```rust
//! use arbor_core::behaviors::TreeNode;
//! use arbor_core::models::Document;
//! use serde_json::json;
//!
//! let doc = Document::from_value("000000000000000000000001".to_string(), json!({
//!     "title": "Chapter 1",
//!     "parent_id": null,
//! }))
//! .unwrap();
//!
//! assert_eq!(doc.id(), "000000000000000000000001");
//! assert_eq!(doc.parent_ref("parent_id"), None);
//! ```

use crate::behaviors::TreeNode;
use crate::db::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field map of a document
pub type Fields = Map<String, Value>;

/// Record in a flat document collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique, store-assigned identifier
    pub id: String,

    /// All user data, including the parent reference and order fields
    pub fields: Fields,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl Document {
    /// Create a document with the given identity and fields
    pub fn new(id: String, fields: Fields) -> Self {
        let now = Utc::now();
        Self {
            id,
            fields,
            created_at: now,
            modified_at: now,
        }
    }

    /// Create a document from a JSON value, which must be an object
    pub fn from_value(id: String, value: Value) -> Result<Self, StoreError> {
        match value {
            Value::Object(fields) => Ok(Self::new(id, fields)),
            other => Err(StoreError::invalid_record(format!(
                "document fields must be a JSON object, got {}",
                other
            ))),
        }
    }

    /// Replace (or add) a single field and bump `modified_at`
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
        self.modified_at = Utc::now();
    }
}

impl TreeNode for Document {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
