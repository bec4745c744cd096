use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<String, Arc<Mutex<()>>>;

/// Keyed async mutex: one writer per loan id.
///
/// Operations on the same loan queue behind each other; different loans
/// never contend. An entry lives only while some caller holds or waits for
/// it.
#[derive(Debug, Default)]
pub struct LoanLocks {
    locks: Arc<LockTable>,
}

/// Exclusive access to one loan. Dropping it releases the lock and forgets
/// the loan id once nobody else is queued on it.
#[derive(Debug)]
pub struct LoanLockGuard {
    locks: Arc<LockTable>,
    loan_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for LoanLockGuard {
    fn drop(&mut self) {
        // Release the mutex first so its Arc no longer counts as a holder.
        self.guard.take();
        self.locks
            .remove_if(&self.loan_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

impl LoanLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `loan_id`. The lock is released when the
    /// returned guard is dropped.
    pub async fn acquire(&self, loan_id: &str) -> LoanLockGuard {
        // The map shard guard must be released before awaiting.
        let mutex = self
            .locks
            .entry(loan_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        LoanLockGuard {
            locks: self.locks.clone(),
            loan_id: loan_id.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of loan ids currently held or waited on.
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}
