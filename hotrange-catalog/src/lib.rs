mod providers;
pub use providers::postgres::{PostgresCatalog, PostgresOptions, SELECT_RANGE_OBJECT};

use async_trait::async_trait;
use hotrange_core::{CatalogStore, MemoryCatalog, Result, SchemaObjectRef};

#[derive(Debug, Clone)]
pub enum CatalogStorage {
    Postgres(PostgresCatalog),
    InMemory(MemoryCatalog), // InMemory is used for testing purposes
}

#[async_trait]
impl CatalogStore for CatalogStorage {
    async fn lookup_range(&self, range_id: &str) -> Result<Option<SchemaObjectRef>> {
        match self {
            CatalogStorage::Postgres(store) => store.lookup_range(range_id).await,
            CatalogStorage::InMemory(store) => store.lookup_range(range_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_dispatch() {
        let memory = MemoryCatalog::new();
        memory.insert("5", SchemaObjectRef::new("db", "t", "i"));
        let storage = CatalogStorage::InMemory(memory.clone());

        assert_eq!(
            storage.lookup_range("5").await.unwrap(),
            Some(SchemaObjectRef::new("db", "t", "i"))
        );
        assert_eq!(storage.lookup_range("6").await.unwrap(), None);
        assert_eq!(memory.lookups(), 2);
    }
}
