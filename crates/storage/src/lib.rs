//! Storage layer for prepdesk
//!
//! PostgreSQL is the system of record; `MemoryStorage` mirrors its contracts
//! for tests and throwaway runs. `StorageBackend` picks one at startup.

mod backend;
pub mod error;
mod memory;
mod pg_migrations;
pub mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::PgStorage;
