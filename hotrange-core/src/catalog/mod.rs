mod store;
pub use store::{CatalogStore, SchemaObjectRef};

mod memory_store;
pub use memory_store::MemoryCatalog;
