use async_trait::async_trait;

use super::payments_model::{AllocatedPayment, NewPayment, Payment, PaymentReceipt};
use crate::errors::Result;
use crate::utils::pagination::{Page, PageRequest};

/// Trait for payment repository operations.
///
/// The store is append-only: payments are never updated or deleted.
#[async_trait]
pub trait PaymentRepositoryTrait: Send + Sync {
    async fn create(&self, payment: AllocatedPayment) -> Result<Payment>;

    /// All payments of a loan, in any order.
    fn list_by_loan(&self, loan_id: &str) -> Result<Vec<Payment>>;

    /// One page of payments across all loans, newest first.
    fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Payment>>;

    fn count(&self) -> Result<i64>;
}

/// Trait for payment service operations
#[async_trait]
pub trait PaymentServiceTrait: Send + Sync {
    /// Allocates, records and books a payment against its loan.
    async fn submit_payment(&self, new_payment: NewPayment) -> Result<PaymentReceipt>;

    /// Payments of one loan, oldest first.
    fn list_payments(&self, loan_id: &str) -> Result<Vec<Payment>>;

    fn list_payments_page(&self, request: PageRequest) -> Result<Page<Payment>>;
}
