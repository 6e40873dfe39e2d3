//! SQLite storage implementation for QuoteHub.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the store traits defined in `quotehub-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor used for every mutation
//! - The durable price cache repository
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//!
//! ```text
//!          core (PriceStore trait)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod prices;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, ping, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use prices::PriceRepository;

// Re-export from quotehub-core for convenience
pub use quotehub_core::errors::{DatabaseError, Error, Result};
