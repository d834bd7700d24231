//! Tree Accessor
//!
//! Derives tree relationships from a flat collection in which every document
//! carries a parent reference. Nothing about the tree is stored besides that
//! reference: parent, children, ancestors, descendants, siblings, roots and
//! depth are all computed by querying the store on each call.
//!
//! # Query Cost
//!
//! | Operation                    | Store round-trips            |
//! |------------------------------|------------------------------|
//! | `parent`, `children`, `roots`, `root`, `self_and_siblings`, `siblings`, `is_leaf` | 1 |
//! | `ancestors`, `root_of`, `depth` | 1 per level up to the root |
//! | `descendants`                | 1 per visited node           |
//! | `is_root`                    | 0                            |
//!
//! # Preconditions
//!
//! The parent graph must be acyclic. Cycles are not detected; walking up or
//! down a cycle does not terminate.
//!
//! # Examples
//!
//! ```rust
//! use arbor_core::db::MemoryStore;
//! use arbor_core::services::TreeAccessor;
//! use arbor_core::models::Fields;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let tree = TreeAccessor::with_defaults(Arc::new(MemoryStore::new()));
//!
//! let root = tree.create_root(Fields::new()).await?;
//! let child = tree.create_child(&root, Fields::new()).await?;
//! let grandchild = tree.create_child(&child, Fields::new()).await?;
//!
//! assert_eq!(tree.ancestors(&grandchild).await?, vec![child.clone(), root.clone()]);
//! assert_eq!(tree.descendants(&root).await?, vec![child, grandchild.clone()]);
//! assert_eq!(tree.depth(&grandchild).await?, 2);
//! # Ok::<(), arbor_core::services::TreeError>(())
//! # }).unwrap();
//! ```

use crate::behaviors::TreeNode;
use crate::config::{ConfigError, TreeConfig};
use crate::db::{DocumentStore, StoreError};
use crate::models::Fields;
use crate::services::TreeError;
use serde_json::Value;
use std::sync::Arc;

/// Read access to the tree derived from a flat collection
///
/// Holds an explicit store handle and the field mapping. Cloning is cheap
/// (two `Arc`s). No relationship is cached between calls.
pub struct TreeAccessor<S: DocumentStore> {
    store: Arc<S>,
    config: Arc<TreeConfig>,
}

// Manual Clone implementation because S doesn't need to be Clone
impl<S: DocumentStore> Clone for TreeAccessor<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: DocumentStore> TreeAccessor<S> {
    /// Create an accessor with a validated field mapping
    pub fn new(store: Arc<S>, config: TreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            config: Arc::new(config),
        })
    }

    /// Create an accessor using `parent_id` and identity order
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self {
            store,
            config: Arc::new(TreeConfig::default()),
        }
    }

    /// Get access to the underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Field mapping this accessor queries with
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// All records whose parent field equals `parent`, in sibling order
    pub(crate) async fn query_by_parent(
        &self,
        parent: &Value,
    ) -> Result<Vec<S::Record>, StoreError> {
        tracing::debug!(
            "Querying {} = {} ordered by {:?}",
            self.config.foreign_key,
            parent,
            self.config.order
        );
        self.store
            .find_where(&self.config.foreign_key, parent, &self.config.sibling_order())
            .await
    }

    pub(crate) async fn fetch_children(
        &self,
        node: &S::Record,
    ) -> Result<Vec<S::Record>, StoreError> {
        self.query_by_parent(&Value::String(node.id().to_string()))
            .await
    }

    //
    // LOOKUPS
    //

    /// Get a record by ID, `None` if it doesn't exist
    pub async fn find(&self, id: &str) -> Result<Option<S::Record>, TreeError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Get a record by ID
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the record doesn't exist.
    pub async fn get(&self, id: &str) -> Result<S::Record, TreeError> {
        self.find(id)
            .await?
            .ok_or_else(|| TreeError::node_not_found(id))
    }

    /// Number of records in the collection
    pub async fn count(&self) -> Result<usize, TreeError> {
        Ok(self.store.count().await?)
    }

    //
    // UPWARD
    //

    /// Whether the node has no parent reference (no store call)
    pub fn is_root(&self, node: &S::Record) -> bool {
        node.parent_ref(&self.config.foreign_key).is_none()
    }

    /// Get the parent of a node
    ///
    /// Returns `None` for roots and for nodes whose parent reference points
    /// at a record that no longer exists.
    pub async fn parent(&self, node: &S::Record) -> Result<Option<S::Record>, TreeError> {
        match node.parent_ref(&self.config.foreign_key) {
            Some(parent_id) => Ok(self.store.find_by_id(parent_id).await?),
            None => Ok(None),
        }
    }

    /// Get the parent of a node, treating a missing parent as an error
    ///
    /// # Errors
    ///
    /// - [`TreeError::RootHasNoParent`] if the node is a root
    /// - [`TreeError::ParentNotFound`] if the reference is dangling
    pub async fn require_parent(&self, node: &S::Record) -> Result<S::Record, TreeError> {
        let parent_id = node
            .parent_ref(&self.config.foreign_key)
            .ok_or_else(|| TreeError::RootHasNoParent {
                id: node.id().to_string(),
            })?;

        self.store
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| TreeError::parent_not_found(node.id(), parent_id))
    }

    /// Get all ancestors, nearest first
    ///
    /// Empty for a root. The walk stops at the first node without a
    /// resolvable parent.
    pub async fn ancestors(&self, node: &S::Record) -> Result<Vec<S::Record>, TreeError> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(node).await?;

        while let Some(parent) = current {
            current = self.parent(&parent).await?;
            ancestors.push(parent);
        }

        Ok(ancestors)
    }

    /// The node followed by its ancestors, nearest first
    pub async fn self_and_ancestors(
        &self,
        node: &S::Record,
    ) -> Result<Vec<S::Record>, TreeError> {
        let mut chain = vec![node.clone()];
        chain.extend(self.ancestors(node).await?);
        Ok(chain)
    }

    /// Get the root of the tree containing `node`
    ///
    /// Traverses up the parent chain until finding a node without a parent;
    /// that is the node itself if it is already a root.
    pub async fn root_of(&self, node: &S::Record) -> Result<S::Record, TreeError> {
        let mut current = node.clone();

        loop {
            match self.parent(&current).await? {
                Some(parent) => current = parent,
                None => return Ok(current),
            }
        }
    }

    /// Number of ancestors; roots have depth 0
    pub async fn depth(&self, node: &S::Record) -> Result<usize, TreeError> {
        Ok(self.ancestors(node).await?.len())
    }

    //
    // DOWNWARD
    //

    /// Get all direct children, in sibling order
    pub async fn children(&self, node: &S::Record) -> Result<Vec<S::Record>, TreeError> {
        Ok(self.fetch_children(node).await?)
    }

    /// Whether the node has no children
    pub async fn is_leaf(&self, node: &S::Record) -> Result<bool, TreeError> {
        Ok(self.fetch_children(node).await?.is_empty())
    }

    /// Get all descendants in depth-first pre-order
    ///
    /// Each child is emitted before its own descendants, and children are
    /// visited in sibling order. Issues one children query per visited node.
    pub async fn descendants(&self, node: &S::Record) -> Result<Vec<S::Record>, TreeError> {
        let mut descendants = Vec::new();

        // Stack holds pending nodes with the next one to visit on top
        let mut pending: Vec<S::Record> = self.fetch_children(node).await?;
        pending.reverse();

        while let Some(next) = pending.pop() {
            let mut children = self.fetch_children(&next).await?;
            children.reverse();
            pending.extend(children);
            descendants.push(next);
        }

        Ok(descendants)
    }

    //
    // ROOTS AND SIBLINGS
    //

    /// Get all roots of the collection, in sibling order
    pub async fn roots(&self) -> Result<Vec<S::Record>, TreeError> {
        Ok(self.query_by_parent(&Value::Null).await?)
    }

    /// Get the first root in sibling order
    ///
    /// A collection may hold several roots; this is simply the first one.
    pub async fn root(&self) -> Result<Option<S::Record>, TreeError> {
        Ok(self.roots().await?.into_iter().next())
    }

    /// Get every node sharing this node's parent, including the node itself
    ///
    /// For a root this is the set of roots.
    pub async fn self_and_siblings(
        &self,
        node: &S::Record,
    ) -> Result<Vec<S::Record>, TreeError> {
        let parent = node.parent_value(&self.config.foreign_key);
        Ok(self.query_by_parent(&parent).await?)
    }

    /// Get every node sharing this node's parent, excluding the node itself
    pub async fn siblings(&self, node: &S::Record) -> Result<Vec<S::Record>, TreeError> {
        let mut siblings = self.self_and_siblings(node).await?;
        siblings.retain(|sibling| sibling.id() != node.id());
        Ok(siblings)
    }

    //
    // WRITES
    //

    /// Insert a new root
    ///
    /// Any parent reference in `fields` is overwritten with `null`.
    pub async fn create_root(&self, mut fields: Fields) -> Result<S::Record, TreeError> {
        fields.insert(self.config.foreign_key.clone(), Value::Null);
        Ok(self.store.insert(fields).await?)
    }

    /// Insert a new child of `parent`
    ///
    /// Any parent reference in `fields` is overwritten with `parent`'s id.
    pub async fn create_child(
        &self,
        parent: &S::Record,
        mut fields: Fields,
    ) -> Result<S::Record, TreeError> {
        fields.insert(
            self.config.foreign_key.clone(),
            Value::String(parent.id().to_string()),
        );
        Ok(self.store.insert(fields).await?)
    }

    /// Point `node` at a new parent, or make it a root with `None`
    ///
    /// The move is not validated: making a node a child of its own
    /// descendant creates a cycle, which breaks every upward and downward walk.
    pub async fn set_parent(
        &self,
        node: &S::Record,
        new_parent: Option<&S::Record>,
    ) -> Result<S::Record, TreeError> {
        let value = match new_parent {
            Some(parent) => Value::String(parent.id().to_string()),
            None => Value::Null,
        };

        tracing::debug!("Reparenting {} under {}", node.id(), value);
        Ok(self
            .store
            .set_field(node.id(), &self.config.foreign_key, value)
            .await?)
    }
}
