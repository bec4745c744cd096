//! In-memory repositories used by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::errors::{DatabaseError, Error, Result};
use crate::loans::{Loan, LoanRepositoryTrait, LoanSnapshot, NewLoan};
use crate::payments::{AllocatedPayment, Payment, PaymentRepositoryTrait};

pub(crate) fn ts(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub(crate) fn new_loan(principal: Decimal, term: i32, rate: Decimal) -> NewLoan {
    NewLoan {
        id: None,
        client_id: "client-1".to_string(),
        principal,
        term,
        annual_rate_pct: rate,
        payment_frequency: None,
        arrears_conditions: None,
        originated_at: Some(ts(1)),
    }
}

#[derive(Default)]
pub(crate) struct MockLoanRepository {
    loans: Mutex<HashMap<String, Loan>>,
    next_id: AtomicUsize,
    pub fail_updates: AtomicBool,
    pub failing_loan: Mutex<Option<String>>,
    pub updates: AtomicUsize,
}

impl MockLoanRepository {
    pub fn insert(&self, loan: Loan) {
        self.loans.lock().unwrap().insert(loan.id.clone(), loan);
    }

    pub fn get(&self, loan_id: &str) -> Loan {
        self.loans.lock().unwrap().get(loan_id).cloned().unwrap()
    }

    /// Seeds a loan straight into the store, bypassing the service.
    pub fn seed(&self, id: &str, principal: Decimal) -> Loan {
        let loan = new_loan(principal, 12, Decimal::from(24)).into_loan(id.to_string(), ts(1));
        self.insert(loan.clone());
        loan
    }

    /// Overwrites the stored aggregates without going through the ledger.
    pub fn force_snapshot(&self, loan_id: &str, snapshot: LoanSnapshot) {
        let mut loans = self.loans.lock().unwrap();
        let loan = loans.get_mut(loan_id).unwrap();
        apply_snapshot(loan, snapshot);
    }
}

fn apply_snapshot(loan: &mut Loan, snapshot: LoanSnapshot) {
    loan.balance = snapshot.balance;
    loan.total_paid = snapshot.total_paid;
    loan.accrued_interest = snapshot.accrued_interest;
    loan.accrued_arrears = snapshot.accrued_arrears;
    loan.total_payable = snapshot.total_payable;
    loan.status = snapshot.status;
}

#[async_trait]
impl LoanRepositoryTrait for MockLoanRepository {
    async fn create(&self, new_loan: NewLoan) -> Result<Loan> {
        let id = new_loan.id.clone().unwrap_or_else(|| {
            format!("loan-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
        });
        let loan = new_loan.into_loan(id, ts(1));
        self.insert(loan.clone());
        Ok(loan)
    }

    fn find_by_id(&self, loan_id: &str) -> Result<Option<Loan>> {
        Ok(self.loans.lock().unwrap().get(loan_id).cloned())
    }

    fn list(&self, client_id: Option<&str>) -> Result<Vec<Loan>> {
        let mut loans: Vec<Loan> = self
            .loans
            .lock()
            .unwrap()
            .values()
            .filter(|l| client_id.map_or(true, |c| l.client_id == c))
            .cloned()
            .collect();
        loans.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(loans)
    }

    fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Loan>> {
        let loans = self.list(None)?;
        Ok(loans
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    fn count(&self) -> Result<i64> {
        Ok(self.loans.lock().unwrap().len() as i64)
    }

    async fn update_aggregates(&self, loan_id: &str, snapshot: LoanSnapshot) -> Result<Loan> {
        let targeted = self.failing_loan.lock().unwrap().as_deref() == Some(loan_id);
        if targeted || self.fail_updates.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk I/O error".to_string(),
            )));
        }
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut loans = self.loans.lock().unwrap();
        let loan = loans
            .get_mut(loan_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(loan_id.to_string())))?;
        apply_snapshot(loan, snapshot);
        Ok(loan.clone())
    }
}

#[derive(Default)]
pub(crate) struct MockPaymentRepository {
    payments: Mutex<Vec<Payment>>,
    pub fail_reads: AtomicBool,
}

impl MockPaymentRepository {
    pub fn push(&self, payment: Payment) {
        self.payments.lock().unwrap().push(payment);
    }

    pub fn all(&self) -> Vec<Payment> {
        self.payments.lock().unwrap().clone()
    }

    /// Records a payment with an explicit breakdown, bypassing the workflow.
    pub fn seed(
        &self,
        loan_id: &str,
        amount: Decimal,
        arrears: Decimal,
        interest: Decimal,
        principal: Decimal,
    ) -> Payment {
        let mut payments = self.payments.lock().unwrap();
        let payment = Payment {
            id: format!("seed-{}", payments.len() + 1),
            loan_id: loan_id.to_string(),
            paid_at: ts(2),
            amount,
            receipt_ref: None,
            recorded_by: "seeder".to_string(),
            arrears_applied: arrears,
            interest_applied: interest,
            principal_applied: principal,
            created_at: ts(2),
        };
        payments.push(payment.clone());
        payment
    }
}

#[async_trait]
impl PaymentRepositoryTrait for MockPaymentRepository {
    async fn create(&self, payment: AllocatedPayment) -> Result<Payment> {
        // Lets concurrent submissions interleave between their read and write.
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        let mut payments = self.payments.lock().unwrap();
        let stored = Payment {
            id: format!("payment-{}", payments.len() + 1),
            loan_id: payment.loan_id,
            paid_at: payment.paid_at,
            amount: payment.amount,
            receipt_ref: payment.receipt_ref,
            recorded_by: payment.recorded_by,
            arrears_applied: payment.arrears_applied,
            interest_applied: payment.interest_applied,
            principal_applied: payment.principal_applied,
            created_at: payment.paid_at,
        };
        payments.push(stored.clone());
        Ok(stored)
    }

    fn list_by_loan(&self, loan_id: &str) -> Result<Vec<Payment>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::ConnectionFailed(
                "pool exhausted".to_string(),
            )));
        }
        // Reverse insertion order so callers cannot rely on ordering.
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|p| p.loan_id == loan_id)
            .cloned()
            .collect())
    }

    fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<i64> {
        Ok(self.payments.lock().unwrap().len() as i64)
    }
}
