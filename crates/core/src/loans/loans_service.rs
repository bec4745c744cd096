use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::loans_model::{DashboardStats, InstallmentQuote, Loan, NewLoan};
use super::loans_traits::{LoanRepositoryTrait, LoanServiceTrait};
use crate::errors::{Error, Result};
use crate::ledger::{expected_installment, periodic_interest, round_money};
use crate::payments::PaymentRepositoryTrait;
use crate::utils::pagination::{Page, PageInfo, PageRequest};

/// Service for creating and reading loans.
pub struct LoanService {
    repository: Arc<dyn LoanRepositoryTrait>,
    payment_repository: Arc<dyn PaymentRepositoryTrait>,
}

impl LoanService {
    pub fn new(
        repository: Arc<dyn LoanRepositoryTrait>,
        payment_repository: Arc<dyn PaymentRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            payment_repository,
        }
    }
}

#[async_trait::async_trait]
impl LoanServiceTrait for LoanService {
    async fn create_loan(&self, new_loan: NewLoan) -> Result<Loan> {
        new_loan.validate()?;
        debug!(
            "Creating loan for client {}: principal {}, term {}, rate {}%",
            new_loan.client_id, new_loan.principal, new_loan.term, new_loan.annual_rate_pct
        );
        let loan = self.repository.create(new_loan).await?;
        info!("Created loan {}", loan.id);
        Ok(loan)
    }

    fn get_loan(&self, loan_id: &str) -> Result<Loan> {
        self.repository
            .find_by_id(loan_id)?
            .ok_or_else(|| Error::LoanNotFound(loan_id.to_string()))
    }

    fn list_loans(&self, client_id: Option<&str>) -> Result<Vec<Loan>> {
        self.repository.list(client_id)
    }

    fn list_loans_page(&self, request: PageRequest) -> Result<Page<Loan>> {
        let items = self.repository.list_page(request.offset(), request.limit)?;
        let total = self.repository.count()?;
        Ok(Page {
            items,
            pagination: PageInfo::new(request, total),
        })
    }

    fn installment_quote(&self, loan_id: &str) -> Result<InstallmentQuote> {
        let loan = self.get_loan(loan_id)?;
        let interest = periodic_interest(loan.principal, loan.annual_rate_pct)?;
        let installment = expected_installment(loan.principal, loan.term, loan.annual_rate_pct)?;
        Ok(InstallmentQuote {
            loan_id: loan.id,
            periodic_interest: interest,
            expected_installment: installment,
            expected_installment_rounded: round_money(installment),
        })
    }

    fn dashboard_stats(&self) -> Result<DashboardStats> {
        let loans = self.repository.list(None)?;
        let total_principal = loans
            .iter()
            .try_fold(Decimal::ZERO, |acc, loan| acc.checked_add(loan.principal))
            .ok_or_else(|| Error::Unexpected("Total principal overflowed".to_string()))?;
        Ok(DashboardStats {
            total_loans: loans.len() as i64,
            total_payments: self.payment_repository.count()?,
            total_principal,
        })
    }
}
