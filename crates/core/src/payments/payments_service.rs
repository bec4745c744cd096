use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::payments_model::{
    AllocatedPayment, NewPayment, Payment, PaymentReceipt, PendingBucketSource,
};
use super::payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
use crate::errors::{Error, Result};
use crate::ledger::{allocate_against, LedgerService, LoanLocks};
use crate::loans::{Loan, LoanRepositoryTrait};
use crate::utils::pagination::{Page, PageInfo, PageRequest};

/// Payment submission workflow.
///
/// Holding the loan's lock for the whole sequence, it loads the loan, splits
/// the payment across the pending buckets, stores the payment with its
/// breakdown and then lets the ledger rebuild the loan from full history.
pub struct PaymentService {
    loan_repository: Arc<dyn LoanRepositoryTrait>,
    repository: Arc<dyn PaymentRepositoryTrait>,
    ledger: Arc<LedgerService>,
    locks: Arc<LoanLocks>,
    pending_source: PendingBucketSource,
}

impl PaymentService {
    pub fn new(
        loan_repository: Arc<dyn LoanRepositoryTrait>,
        repository: Arc<dyn PaymentRepositoryTrait>,
        ledger: Arc<LedgerService>,
        pending_source: PendingBucketSource,
    ) -> Self {
        let locks = ledger.locks();
        Self {
            loan_repository,
            repository,
            ledger,
            locks,
            pending_source,
        }
    }

    fn load_loan(&self, loan_id: &str) -> Result<Loan> {
        self.loan_repository
            .find_by_id(loan_id)?
            .ok_or_else(|| Error::LoanNotFound(loan_id.to_string()))
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn submit_payment(&self, new_payment: NewPayment) -> Result<PaymentReceipt> {
        new_payment.validate()?;

        // Unknown ids are rejected before they take a lock entry.
        self.load_loan(&new_payment.loan_id)?;
        let _guard = self.locks.acquire(&new_payment.loan_id).await;
        let loan = self.load_loan(&new_payment.loan_id)?;

        let pending = match self.pending_source {
            PendingBucketSource::StoredSnapshot => loan.pending_buckets(),
            PendingBucketSource::LedgerHistory => {
                self.ledger.snapshot_from_history(&loan)?.pending_buckets()
            }
        };
        debug!(
            "Allocating {} on loan {} against {:?} ({:?})",
            new_payment.amount, loan.id, pending, self.pending_source
        );

        let allocation = allocate_against(new_payment.amount, &pending)?;
        if allocation.remainder > Decimal::ZERO {
            warn!(
                "Payment of {} on loan {} leaves {} unapplied",
                new_payment.amount, loan.id, allocation.remainder
            );
        }

        let record = AllocatedPayment::new(new_payment, &allocation, Utc::now().naive_utc());
        let payment = self.repository.create(record).await?;
        info!(
            "Recorded payment {} of {} on loan {}",
            payment.id, payment.amount, loan.id
        );

        // No compensation on failure: the payment is durable and a standalone
        // recompute of the loan restores its aggregates.
        let snapshot = self.ledger.recompute_locked(&loan).await.map_err(|e| {
            error!(
                "Payment {} stored but loan {} was not recomputed: {}",
                payment.id, loan.id, e
            );
            e
        })?;

        Ok(PaymentReceipt {
            payment,
            snapshot,
            unapplied: allocation.remainder,
        })
    }

    fn list_payments(&self, loan_id: &str) -> Result<Vec<Payment>> {
        self.load_loan(loan_id)?;
        let mut payments = self.repository.list_by_loan(loan_id)?;
        payments.sort_by(|a, b| {
            a.paid_at
                .cmp(&b.paid_at)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(payments)
    }

    fn list_payments_page(&self, request: PageRequest) -> Result<Page<Payment>> {
        let items = self.repository.list_page(request.offset(), request.limit)?;
        let total = self.repository.count()?;
        Ok(Page {
            items,
            pagination: PageInfo::new(request, total),
        })
    }
}
