use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::Result;

/// The schema object a range stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaObjectRef {
    pub database_name: String,
    pub table_name: String,
    pub index_name: String,
}

impl SchemaObjectRef {
    pub fn new(
        database_name: impl Into<String>,
        table_name: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            table_name: table_name.into(),
            index_name: index_name.into(),
        }
    }
}

impl fmt::Display for SchemaObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
        write!(
            f,
            "{}, {}, {}",
            name(&self.database_name),
            name(&self.table_name),
            name(&self.index_name)
        )
    }
}

/// Point lookups against the live schema catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    /// Returns `Ok(None)` when no schema object maps to the range.
    async fn lookup_range(&self, range_id: &str) -> Result<Option<SchemaObjectRef>>;
}
