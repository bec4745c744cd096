use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info, warn};

use super::ledger_model::RecomputeSummary;
use super::ledger_traits::LedgerServiceTrait;
use super::loan_locks::LoanLocks;
use super::recompute::summarize_history;
use crate::errors::{Error, Result};
use crate::loans::{Loan, LoanRepositoryTrait, LoanSnapshot};
use crate::payments::PaymentRepositoryTrait;

/// Rebuilds loan aggregates from the payment store and writes them back.
pub struct LedgerService {
    loan_repository: Arc<dyn LoanRepositoryTrait>,
    payment_repository: Arc<dyn PaymentRepositoryTrait>,
    locks: Arc<LoanLocks>,
}

impl LedgerService {
    pub fn new(
        loan_repository: Arc<dyn LoanRepositoryTrait>,
        payment_repository: Arc<dyn PaymentRepositoryTrait>,
        locks: Arc<LoanLocks>,
    ) -> Self {
        Self {
            loan_repository,
            payment_repository,
            locks,
        }
    }

    /// Lock registry shared with the payment workflow.
    pub fn locks(&self) -> Arc<LoanLocks> {
        self.locks.clone()
    }

    /// Snapshot derived from the stored history, without writing it.
    ///
    /// Callers must hold the loan's lock.
    pub(crate) fn snapshot_from_history(&self, loan: &Loan) -> Result<LoanSnapshot> {
        let history = self.payment_repository.list_by_loan(&loan.id)?;
        summarize_history(loan.principal, &history)
    }

    /// Reads the full history, summarizes it and performs one aggregate write.
    ///
    /// Callers must hold the loan's lock.
    pub(crate) async fn recompute_locked(&self, loan: &Loan) -> Result<LoanSnapshot> {
        let snapshot = self.snapshot_from_history(loan)?;
        self.loan_repository
            .update_aggregates(&loan.id, snapshot)
            .await
            .map_err(|e| {
                error!("Failed to store recomputed aggregates for loan {}: {}", loan.id, e);
                e
            })?;
        debug!(
            "Loan {} recomputed: balance {}, status {}",
            loan.id, snapshot.balance, snapshot.status
        );
        Ok(snapshot)
    }

    fn load_loan(&self, loan_id: &str) -> Result<Loan> {
        self.loan_repository
            .find_by_id(loan_id)?
            .ok_or_else(|| Error::LoanNotFound(loan_id.to_string()))
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn recompute(&self, loan_id: &str) -> Result<LoanSnapshot> {
        self.load_loan(loan_id)?;
        let _guard = self.locks.acquire(loan_id).await;
        let loan = self.load_loan(loan_id)?;
        self.recompute_locked(&loan).await
    }

    async fn recompute_all(&self) -> Result<RecomputeSummary> {
        let loans = self.loan_repository.list(None)?;
        let mut summary = RecomputeSummary::default();
        for loan in loans {
            let _guard = self.locks.acquire(&loan.id).await;
            // Re-read under the lock so the write never races a submission.
            let outcome = match self.load_loan(&loan.id) {
                Ok(current) => self.recompute_locked(&current).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(_) => summary.recomputed += 1,
                Err(e) => {
                    warn!("Skipping loan {} in repair pass: {}", loan.id, e);
                    summary.failed.push(loan.id);
                }
            }
        }
        info!(
            "Recomputed aggregates for {} loans, {} failed",
            summary.recomputed,
            summary.failed.len()
        );
        Ok(summary)
    }
}
