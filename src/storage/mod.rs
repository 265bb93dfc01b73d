pub mod json;
pub mod memory;
pub mod postgrest;
pub mod store;

pub use json::JsonWriter;
pub use memory::MemoryStore;
pub use postgrest::SupabaseStore;
pub use store::{CatalogStore, Condition, Filter, Table};
