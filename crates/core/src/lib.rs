//! Loanbook Core - installment loan accounting.
//!
//! This crate contains the accounting logic for loanbook: the payment
//! waterfall, the periodic interest formulas, the ledger recomputation and
//! the payment submission workflow. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod loans;
pub mod payments;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
