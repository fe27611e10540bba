use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::store::{CatalogStore, SchemaObjectRef};
use crate::Result;

/// MemoryCatalog is a map from range id to schema object that implements the CatalogStore trait.
/// SHOULD BE USED ONLY FOR TESTING PURPOSES
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<DashMap<String, SchemaObjectRef>>,
    lookups: Arc<AtomicUsize>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, range_id: impl Into<String>, object: SchemaObjectRef) {
        self.inner.insert(range_id.into(), object);
    }

    /// Number of lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn lookup_range(&self, range_id: &str) -> Result<Option<SchemaObjectRef>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.inner.get(range_id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_hit_and_miss() {
        let catalog = MemoryCatalog::new();
        catalog.insert("42", SchemaObjectRef::new("bank", "accounts", "primary"));

        let hit = catalog.lookup_range("42").await.unwrap();
        let miss = catalog.lookup_range("43").await.unwrap();

        assert_eq!(hit, Some(SchemaObjectRef::new("bank", "accounts", "primary")));
        assert_eq!(miss, None);
        assert_eq!(catalog.lookups(), 2);
    }

    #[test]
    fn test_display_empty_names() {
        let object = SchemaObjectRef::new("", "", "");
        assert_eq!(object.to_string(), "-, -, -");
    }
}
