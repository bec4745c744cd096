use async_trait::async_trait;

use super::ledger_model::RecomputeSummary;
use crate::errors::Result;
use crate::loans::LoanSnapshot;

/// Recomputation of loan aggregates from payment history.
///
/// Both operations are idempotent and double as the repair path after a
/// payment was stored but its loan was not updated.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Re-derives and stores the aggregate fields of one loan.
    async fn recompute(&self, loan_id: &str) -> Result<LoanSnapshot>;

    /// Recomputes every loan. A loan that fails is logged and skipped so the
    /// rest of the pass still runs.
    async fn recompute_all(&self) -> Result<RecomputeSummary>;
}
