//! # Records Database Crate
//!
//! This crate is the system's entity store: one generic CRUD abstraction shared
//! by every record type, backed by PostgreSQL.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the workspace talks to the
//!   `Repository<T>` trait and never sees a query.
//! - **One Implementation, Many Tables:** An `Entity` describes its table and
//!   binds its own columns, so `PgRepository<T>` needs no per-type code and no
//!   runtime type inspection.
//! - **Asynchronous & Pooled:** All operations are asynchronous and share a
//!   connection pool (`PgPool`). No operation spans more than one statement.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: Applies the embedded schema migrations.
//! - `Repository`, `PgRepository`, `InMemoryRepository`: the entity store.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod entity;
pub mod error;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use entity::Entity;
pub use error::DbError;
pub use memory::InMemoryRepository;
pub use repository::{PgRepository, Repository};
pub use sqlx::PgPool;
