//! Loans module - domain models, services, and traits.

mod loans_model;
mod loans_service;
mod loans_traits;

#[cfg(test)]
mod loans_model_tests;

pub use loans_model::{DashboardStats, InstallmentQuote, Loan, LoanSnapshot, LoanStatus, NewLoan};
pub use loans_service::LoanService;
pub use loans_traits::{LoanRepositoryTrait, LoanServiceTrait};
