//! Tree Node Capability
//!
//! The tree engine never owns a record type. Anything stored in a
//! [`DocumentStore`](crate::db::DocumentStore) participates in a tree by
//! implementing [`TreeNode`]: an identity plus read access to named fields.
//! The parent reference and ordering fields are looked up by name, using the
//! mapping from [`TreeConfig`](crate::config::TreeConfig).

use serde_json::Value;

/// Read access a record must offer to take part in a derived tree
pub trait TreeNode: Clone + Send + Sync {
    /// Store-assigned identity
    fn id(&self) -> &str;

    /// Value of a named field, `None` when absent
    fn field(&self, name: &str) -> Option<&Value>;

    /// Parent id held in `foreign_key`
    ///
    /// `None` for roots (`null` or missing field). Non-string values cannot
    /// reference a record and are treated the same way.
    fn parent_ref(&self, foreign_key: &str) -> Option<&str> {
        self.field(foreign_key).and_then(Value::as_str)
    }

    /// Raw value of `foreign_key`, with a missing field read as `null`
    ///
    /// This is the value siblings share, so it is what sibling queries match on.
    fn parent_value(&self, foreign_key: &str) -> Value {
        self.field(foreign_key).cloned().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone)]
    struct Folder {
        id: String,
        folder: Value,
    }

    impl TreeNode for Folder {
        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, name: &str) -> Option<&Value> {
            (name == "folder").then_some(&self.folder)
        }
    }

    #[test]
    fn test_parent_ref_reads_string_ids() {
        let node = Folder {
            id: "b".into(),
            folder: json!("a"),
        };
        assert_eq!(node.parent_ref("folder"), Some("a"));
        assert_eq!(node.parent_value("folder"), json!("a"));
    }

    #[test]
    fn test_null_and_missing_parent_are_roots() {
        let node = Folder {
            id: "a".into(),
            folder: Value::Null,
        };
        assert_eq!(node.parent_ref("folder"), None);
        assert_eq!(node.parent_ref("parent_id"), None);
        assert_eq!(node.parent_value("parent_id"), Value::Null);
    }
}
