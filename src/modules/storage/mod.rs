//! Storage module for entity collections
//!
//! Every collection (services, tips, gallery, users, messages and the three
//! category lists) is persisted as a whole through one `StorageBackend`.
//! Three interchangeable backends exist:
//!
//! | Backend | Persistence |
//! |---------|-------------|
//! | `MemoryStorage` | process memory, key → serialized JSON string |
//! | `JsonFileStorage` | one `<collection>.json` file per collection |
//! | `SqliteStorage` | `collections` / `collection_records` tables |

mod backend;
mod collection;
mod json_file;
mod memory;
mod sqlite;

pub use backend::{StorageBackend, StorageError};
pub use collection::Collection;
pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
