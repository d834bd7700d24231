//! Tree Field Mapping
//!
//! Names the document fields the tree engine reads: the parent reference
//! (`foreign_key`) and the optional sibling ordering field (`order`).
//!
//! ```rust
//! use arbor_core::config::TreeConfig;
//!
//! let config = TreeConfig::default().with_order("position");
//! assert_eq!(config.foreign_key, "parent_id");
//! assert_eq!(config.order.as_deref(), Some("position"));
//! ```

use crate::db::SortKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default name of the parent-reference field
pub const DEFAULT_FOREIGN_KEY: &str = "parent_id";

/// Errors raised while loading or validating a [`TreeConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configured field name is empty
    #[error("Tree option '{option}' must name a field")]
    EmptyField { option: &'static str },

    /// The order field is the parent reference itself
    #[error("Order field '{field}' cannot be the parent reference field")]
    OrderIsForeignKey { field: String },

    /// Configuration text could not be parsed
    #[error("Invalid tree configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Field mapping for a tree over a flat collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Field holding the parent's id (`null` or absent for roots)
    pub foreign_key: String,

    /// Field used to order siblings; `None` orders by record identity
    pub order: Option<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            foreign_key: DEFAULT_FOREIGN_KEY.to_string(),
            order: None,
        }
    }
}

impl TreeConfig {
    /// Use a different parent-reference field
    pub fn with_foreign_key(mut self, field: impl Into<String>) -> Self {
        self.foreign_key = field.into();
        self
    }

    /// Order siblings by `field` (ties still fall back to identity)
    pub fn with_order(mut self, field: impl Into<String>) -> Self {
        self.order = Some(field.into());
        self
    }

    /// Parse a mapping such as `{"foreign_key": "folder", "order": "rank"}`
    ///
    /// Missing options take their defaults. The parsed mapping is validated.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: TreeConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the mapping names usable, distinct fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.foreign_key.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                option: "foreign_key",
            });
        }

        if let Some(order) = &self.order {
            if order.trim().is_empty() {
                return Err(ConfigError::EmptyField { option: "order" });
            }
            if order == &self.foreign_key {
                return Err(ConfigError::OrderIsForeignKey {
                    field: order.clone(),
                });
            }
        }

        Ok(())
    }

    /// Sort keys implementing sibling order
    ///
    /// The store always breaks ties by identity, so an unconfigured order
    /// yields no explicit keys.
    pub fn sibling_order(&self) -> Vec<SortKey> {
        self.order
            .iter()
            .map(|field| SortKey::ascending(field.clone()))
            .collect()
    }
}
