//! Namespaced storage keys for cart entries.

use crate::ids::ProductId;

/// Derives the storage key for each cart entry.
///
/// Keys take the form `"<namespace>:CartItem<id>"`. The namespace
/// isolates cart entries from unrelated data persisted in the same
/// store; rehydration only considers keys carrying this prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    prefix: String,
}

impl Keyspace {
    /// Namespace used by [`Keyspace::default`].
    pub const DEFAULT_NAMESPACE: &'static str = "pocketmarket";

    /// Create a keyspace under the given application namespace.
    pub fn new(namespace: impl AsRef<str>) -> Self {
        Self {
            prefix: format!("{}:CartItem", namespace.as_ref()),
        }
    }

    /// Storage key for a product's cart entry.
    pub fn item_key(&self, id: &ProductId) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// Whether `key` belongs to this keyspace.
    pub fn contains(&self, key: &str) -> bool {
        key.starts_with(&self.prefix)
    }
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_format() {
        let keyspace = Keyspace::default();
        let key = keyspace.item_key(&ProductId::new("sku-1"));
        assert_eq!(key, "pocketmarket:CartItemsku-1");
    }

    #[test]
    fn test_custom_namespace() {
        let keyspace = Keyspace::new("acme");
        let key = keyspace.item_key(&ProductId::new("42"));
        assert_eq!(key, "acme:CartItem42");
    }

    #[test]
    fn test_contains_own_keys() {
        let keyspace = Keyspace::new("acme");
        assert!(keyspace.contains("acme:CartItem42"));
        assert!(!keyspace.contains("acme:Session42"));
        assert!(!keyspace.contains("other:CartItem42"));
    }
}
