use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use loanbook_core::ledger as core_ledger;
use loanbook_core::loans as core_loans;
use loanbook_core::payments as core_payments;
use loanbook_core::utils::pagination as core_pagination;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Paid,
    Overdue,
}

impl From<core_loans::LoanStatus> for LoanStatus {
    fn from(s: core_loans::LoanStatus) -> Self {
        match s {
            core_loans::LoanStatus::Active => LoanStatus::Active,
            core_loans::LoanStatus::Paid => LoanStatus::Paid,
            core_loans::LoanStatus::Overdue => LoanStatus::Overdue,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub client_id: String,
    pub principal: Decimal,
    pub term: i32,
    pub annual_rate_pct: Decimal,
    pub payment_frequency: String,
    pub arrears_conditions: String,
    pub originated_at: NaiveDateTime,
    pub status: LoanStatus,
    pub balance: Decimal,
    pub total_paid: Decimal,
    pub accrued_interest: Decimal,
    pub accrued_arrears: Decimal,
    pub total_payable: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_loans::Loan> for Loan {
    fn from(l: core_loans::Loan) -> Self {
        Self {
            id: l.id,
            client_id: l.client_id,
            principal: l.principal,
            term: l.term,
            annual_rate_pct: l.annual_rate_pct,
            payment_frequency: l.payment_frequency,
            arrears_conditions: l.arrears_conditions,
            originated_at: l.originated_at,
            status: l.status.into(),
            balance: l.balance,
            total_paid: l.total_paid,
            accrued_interest: l.accrued_interest,
            accrued_arrears: l.accrued_arrears,
            total_payable: l.total_payable,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub client_id: String,
    pub principal: Decimal,
    pub term: i32,
    pub annual_rate_pct: Decimal,
    pub payment_frequency: Option<String>,
    pub arrears_conditions: Option<String>,
    pub originated_at: Option<NaiveDateTime>,
}

impl From<NewLoan> for core_loans::NewLoan {
    fn from(l: NewLoan) -> Self {
        Self {
            id: l.id,
            client_id: l.client_id,
            principal: l.principal,
            term: l.term,
            annual_rate_pct: l.annual_rate_pct,
            payment_frequency: l.payment_frequency,
            arrears_conditions: l.arrears_conditions,
            originated_at: l.originated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoanSnapshot {
    pub balance: Decimal,
    pub total_paid: Decimal,
    pub accrued_interest: Decimal,
    pub accrued_arrears: Decimal,
    pub total_payable: Decimal,
    pub status: LoanStatus,
}

impl From<core_loans::LoanSnapshot> for LoanSnapshot {
    fn from(s: core_loans::LoanSnapshot) -> Self {
        Self {
            balance: s.balance,
            total_paid: s.total_paid,
            accrued_interest: s.accrued_interest,
            accrued_arrears: s.accrued_arrears,
            total_payable: s.total_payable,
            status: s.status.into(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentQuote {
    pub loan_id: String,
    pub periodic_interest: Decimal,
    pub expected_installment: Decimal,
    pub expected_installment_rounded: Decimal,
}

impl From<core_loans::InstallmentQuote> for InstallmentQuote {
    fn from(q: core_loans::InstallmentQuote) -> Self {
        Self {
            loan_id: q.loan_id,
            periodic_interest: q.periodic_interest,
            expected_installment: q.expected_installment,
            expected_installment_rounded: q.expected_installment_rounded,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_loans: i64,
    pub total_payments: i64,
    pub total_principal: Decimal,
}

impl From<core_loans::DashboardStats> for DashboardStats {
    fn from(s: core_loans::DashboardStats) -> Self {
        Self {
            total_loans: s.total_loans,
            total_payments: s.total_payments,
            total_principal: s.total_principal,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub loan_id: String,
    pub paid_at: NaiveDateTime,
    pub amount: Decimal,
    pub receipt_ref: Option<String>,
    pub recorded_by: String,
    pub arrears_applied: Decimal,
    pub interest_applied: Decimal,
    pub principal_applied: Decimal,
    pub created_at: NaiveDateTime,
}

impl From<core_payments::Payment> for Payment {
    fn from(p: core_payments::Payment) -> Self {
        Self {
            id: p.id,
            loan_id: p.loan_id,
            paid_at: p.paid_at,
            amount: p.amount,
            receipt_ref: p.receipt_ref,
            recorded_by: p.recorded_by,
            arrears_applied: p.arrears_applied,
            interest_applied: p.interest_applied,
            principal_applied: p.principal_applied,
            created_at: p.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub loan_id: String,
    pub amount: Decimal,
    pub paid_at: Option<NaiveDateTime>,
    pub receipt_ref: Option<String>,
    pub recorded_by: String,
}

impl From<NewPayment> for core_payments::NewPayment {
    fn from(p: NewPayment) -> Self {
        Self {
            loan_id: p.loan_id,
            amount: p.amount,
            paid_at: p.paid_at,
            receipt_ref: p.receipt_ref,
            recorded_by: p.recorded_by,
        }
    }
}

/// Stored payment, the loan's recomputed aggregates and the part of the
/// amount no bucket could absorb.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub snapshot: LoanSnapshot,
    pub unapplied: Decimal,
}

impl From<core_payments::PaymentReceipt> for PaymentReceipt {
    fn from(r: core_payments::PaymentReceipt) -> Self {
        Self {
            payment: r.payment.into(),
            snapshot: r.snapshot.into(),
            unapplied: r.unapplied,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub amount: Decimal,
    pub pending_arrears: Decimal,
    pub pending_interest: Decimal,
    pub pending_principal: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub arrears_applied: Decimal,
    pub interest_applied: Decimal,
    pub principal_applied: Decimal,
    pub remainder: Decimal,
}

impl From<core_ledger::Allocation> for Allocation {
    fn from(a: core_ledger::Allocation) -> Self {
        Self {
            arrears_applied: a.arrears_applied,
            interest_applied: a.interest_applied,
            principal_applied: a.principal_applied,
            remainder: a.remainder,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentRequest {
    pub capital: Decimal,
    pub term: i32,
    pub annual_rate_pct: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentCalculation {
    pub periodic_interest: Decimal,
    pub expected_installment: Decimal,
    pub expected_installment_rounded: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeAllResult {
    pub recomputed: usize,
    pub failed: Vec<String>,
}

impl From<core_ledger::RecomputeSummary> for RecomputeAllResult {
    fn from(s: core_ledger::RecomputeSummary) -> Self {
        Self {
            recomputed: s.recomputed,
            failed: s.failed,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LoansQuery {
    pub client_id: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl From<core_pagination::PageInfo> for PageInfo {
    fn from(p: core_pagination::PageInfo) -> Self {
        Self {
            page: p.page,
            limit: p.limit,
            total: p.total,
            pages: p.pages,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoanPage {
    pub items: Vec<Loan>,
    pub pagination: PageInfo,
}

impl From<core_pagination::Page<core_loans::Loan>> for LoanPage {
    fn from(p: core_pagination::Page<core_loans::Loan>) -> Self {
        Self {
            items: p.items.into_iter().map(Loan::from).collect(),
            pagination: p.pagination.into(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPage {
    pub items: Vec<Payment>,
    pub pagination: PageInfo,
}

impl From<core_pagination::Page<core_payments::Payment>> for PaymentPage {
    fn from(p: core_pagination::Page<core_payments::Payment>) -> Self {
        Self {
            items: p.items.into_iter().map(Payment::from).collect(),
            pagination: p.pagination.into(),
        }
    }
}
