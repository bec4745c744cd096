//! SQLite storage implementation for Loanbook.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `loanbook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The loan and payment repositories
//! - Database-specific model types (with Diesel derives)
//!
//! Reads go through the r2d2 pool. Every write is funnelled through a single
//! writer actor that runs each job inside an immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod loans;
pub mod payments;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use loans::LoanRepository;
pub use payments::PaymentRepository;

// Re-export from loanbook-core for convenience
pub use loanbook_core::errors::{DatabaseError, Error, Result};
