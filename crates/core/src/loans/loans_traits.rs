//! Loan repository and service traits.
//!
//! These traits define the contract for loan operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::loans_model::{DashboardStats, InstallmentQuote, Loan, LoanSnapshot, NewLoan};
use crate::errors::Result;
use crate::utils::pagination::{Page, PageRequest};

/// Trait defining the contract for Loan repository operations.
///
/// The derived accounting fields may only be written through
/// `update_aggregates`, which overwrites all of them in one statement.
#[async_trait]
pub trait LoanRepositoryTrait: Send + Sync {
    /// Persists a new loan with its opening snapshot.
    async fn create(&self, new_loan: NewLoan) -> Result<Loan>;

    /// Retrieves a loan by its ID, `None` when it does not exist.
    fn find_by_id(&self, loan_id: &str) -> Result<Option<Loan>>;

    /// Lists loans, optionally restricted to one borrower.
    fn list(&self, client_id: Option<&str>) -> Result<Vec<Loan>>;

    /// Lists one page of loans, newest first.
    fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Loan>>;

    /// Number of loans stored.
    fn count(&self) -> Result<i64>;

    /// Overwrites the loan's derived fields and status.
    async fn update_aggregates(&self, loan_id: &str, snapshot: LoanSnapshot) -> Result<Loan>;
}

/// Trait defining the contract for Loan service operations.
#[async_trait]
pub trait LoanServiceTrait: Send + Sync {
    /// Creates a loan after validating its terms.
    async fn create_loan(&self, new_loan: NewLoan) -> Result<Loan>;

    /// Retrieves a loan, failing with `LoanNotFound` when unknown.
    fn get_loan(&self, loan_id: &str) -> Result<Loan>;

    fn list_loans(&self, client_id: Option<&str>) -> Result<Vec<Loan>>;

    fn list_loans_page(&self, request: PageRequest) -> Result<Page<Loan>>;

    /// Periodic interest and expected installment for a stored loan.
    fn installment_quote(&self, loan_id: &str) -> Result<InstallmentQuote>;

    fn dashboard_stats(&self) -> Result<DashboardStats>;
}
