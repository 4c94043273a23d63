//! Infrastructure layer: persistence adapters
//!
//! - `database`: SeaORM entities, migrations and repositories
//! - `memory`: process-local repositories for development and tests

pub mod database;
pub mod memory;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use memory::InMemoryRepositoryProvider;
