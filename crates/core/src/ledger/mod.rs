//! Ledger module - payment waterfall, interest formulas and recomputation.

mod allocation;
mod interest_calculator;
mod ledger_model;
mod ledger_service;
mod ledger_traits;
mod loan_locks;
mod recompute;


pub use allocation::{allocate, allocate_against, Allocation, PendingBuckets};
pub use interest_calculator::{expected_installment, periodic_interest, round_money};
pub use ledger_model::RecomputeSummary;
pub use ledger_service::LedgerService;
pub use ledger_traits::LedgerServiceTrait;
pub use loan_locks::{LoanLockGuard, LoanLocks};
pub use recompute::{classify_status, summarize_history};
