//! Database module: models, schema, and the books store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: pool-backed gateway executing parameterized statements

pub mod models;
pub mod schema;
pub mod store;

pub use models::Book;
pub use schema::SQLITE_INIT;
pub use store::BookStore;
