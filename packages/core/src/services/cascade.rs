//! Cascade Deleter
//!
//! Destroying a node removes its entire subtree: children are located through
//! the [`TreeAccessor`], each subtree is destroyed in turn, and the node itself
//! is removed last. The walk keeps its own stack, so tree depth is bounded by
//! memory rather than by the call stack. After a successful destroy no record in the collection has the
//! destroyed node as an ancestor.
//!
//! # Partial Failure
//!
//! The cascade is not a transaction. If a store call fails, the cascade stops
//! and returns [`TreeError::CascadeAborted`] naming the node it stopped at and
//! the ids already removed. Removed records are not restored.

use crate::behaviors::TreeNode;
use crate::db::{DocumentStore, StoreError};
use crate::services::{TreeAccessor, TreeError};
use serde::{Deserialize, Serialize};

/// Failure inside the walk: the node being processed and the store error
type CascadeFailure = (String, StoreError);

/// Outcome of a completed cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    /// Node the cascade was started on
    pub root_id: String,

    /// Every removed id in removal order (descendants before their parent)
    pub removed_ids: Vec<String>,
}

impl CascadeReport {
    /// Number of records removed, including the starting node
    pub fn removed_count(&self) -> usize {
        self.removed_ids.len()
    }
}

/// Subtree removal on top of a [`TreeAccessor`]
pub struct CascadeDeleter<S: DocumentStore> {
    tree: TreeAccessor<S>,
}

impl<S: DocumentStore> Clone for CascadeDeleter<S> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<S: DocumentStore> CascadeDeleter<S> {
    /// Create a deleter that resolves children through `tree`
    pub fn new(tree: TreeAccessor<S>) -> Self {
        Self { tree }
    }

    /// Accessor used for children queries and removals
    pub fn tree(&self) -> &TreeAccessor<S> {
        &self.tree
    }

    /// Destroy `node` together with all of its descendants
    ///
    /// # Returns
    ///
    /// A [`CascadeReport`] listing removed ids, descendants first. A record
    /// that was already gone when its turn came is still listed, since the
    /// store treats removing a missing record as success.
    ///
    /// # Errors
    ///
    /// [`TreeError::CascadeAborted`] if any children query or removal fails.
    /// Records removed before the failure stay removed.
    pub async fn destroy(&self, node: &S::Record) -> Result<CascadeReport, TreeError> {
        let mut removed = Vec::new();

        match self.destroy_subtree(node, &mut removed).await {
            Ok(()) => {
                tracing::info!(
                    "Cascade delete of {} removed {} node(s)",
                    node.id(),
                    removed.len()
                );
                Ok(CascadeReport {
                    root_id: node.id().to_string(),
                    removed_ids: removed,
                })
            }
            Err((failed_id, source)) => {
                tracing::warn!(
                    "Cascade delete of {} aborted at {} after removing {} node(s): {}",
                    node.id(),
                    failed_id,
                    removed.len(),
                    source
                );
                Err(TreeError::cascade_aborted(failed_id, removed, source))
            }
        }
    }

    /// Look up a node by ID and destroy it with its subtree
    ///
    /// # Errors
    ///
    /// [`TreeError::NodeNotFound`] if no record has this id, otherwise as
    /// [`destroy`](Self::destroy).
    pub async fn destroy_by_id(&self, id: &str) -> Result<CascadeReport, TreeError> {
        let node = self.tree.get(id).await?;
        self.destroy(&node).await
    }

    // Post-order walk: a node is expanded (children pushed) on its first pop
    // and removed on its second, after its whole subtree is gone.
    async fn destroy_subtree(
        &self,
        node: &S::Record,
        removed: &mut Vec<String>,
    ) -> Result<(), CascadeFailure> {
        let mut stack: Vec<(S::Record, bool)> = vec![(node.clone(), false)];

        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                let existed = self
                    .tree
                    .store()
                    .remove(current.id())
                    .await
                    .map_err(|e| (current.id().to_string(), e))?;

                tracing::trace!("Removed {} (existed: {})", current.id(), existed);
                removed.push(current.id().to_string());
                continue;
            }

            let children = self
                .tree
                .fetch_children(&current)
                .await
                .map_err(|e| (current.id().to_string(), e))?;

            stack.push((current, true));
            // Reversed so the first sibling is destroyed first
            stack.extend(children.into_iter().rev().map(|child| (child, false)));
        }

        Ok(())
    }
}
