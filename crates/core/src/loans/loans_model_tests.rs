#[cfg(test)]
mod tests {
    use crate::constants::{DEFAULT_ARREARS_CONDITIONS, DEFAULT_PAYMENT_FREQUENCY};
    use crate::errors::{Error, ValidationError};
    use crate::ledger::PendingBuckets;
    use crate::loans::{
        LoanRepositoryTrait, LoanService, LoanServiceTrait, LoanSnapshot, LoanStatus, NewLoan,
    };
    use crate::testing::{new_loan, ts, MockLoanRepository, MockPaymentRepository};
    use crate::utils::pagination::PageRequest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::str::FromStr;
    use std::sync::Arc;

    fn service() -> (Arc<MockLoanRepository>, Arc<MockPaymentRepository>, LoanService) {
        let loans = Arc::new(MockLoanRepository::default());
        let payments = Arc::new(MockPaymentRepository::default());
        let service = LoanService::new(loans.clone(), payments.clone());
        (loans, payments, service)
    }

    #[test]
    fn test_new_loan_validation() {
        assert!(new_loan(dec!(1000), 12, dec!(24)).validate().is_ok());
        assert!(new_loan(dec!(1000), 12, Decimal::ZERO).validate().is_ok());

        let invalid = [
            new_loan(Decimal::ZERO, 12, dec!(24)),
            new_loan(dec!(-10), 12, dec!(24)),
            new_loan(dec!(1000), 0, dec!(24)),
            new_loan(dec!(1000), 12, dec!(-1)),
        ];
        for loan in invalid {
            assert!(matches!(
                loan.validate(),
                Err(Error::Validation(ValidationError::InvalidInput(_)))
            ));
        }

        let mut anonymous = new_loan(dec!(1000), 12, dec!(24));
        anonymous.client_id = String::new();
        assert!(matches!(
            anonymous.validate(),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
    }

    #[test]
    fn test_into_loan_applies_defaults_and_opening_snapshot() {
        let loan = NewLoan {
            payment_frequency: Some("  ".to_string()),
            originated_at: None,
            ..new_loan(dec!(2500), 10, dec!(18))
        }
        .into_loan("loan-9".to_string(), ts(5));

        assert_eq!(loan.payment_frequency, DEFAULT_PAYMENT_FREQUENCY);
        assert_eq!(loan.arrears_conditions, DEFAULT_ARREARS_CONDITIONS);
        assert_eq!(loan.originated_at, ts(5));
        assert_eq!(loan.snapshot(), LoanSnapshot::opening(dec!(2500)));
        assert_eq!(loan.status, LoanStatus::Active);
    }

    #[test]
    fn test_pending_buckets_clamp_negative_fields() {
        let snapshot = LoanSnapshot {
            balance: dec!(-5),
            total_paid: dec!(105),
            accrued_interest: dec!(3),
            accrued_arrears: dec!(2),
            total_payable: dec!(105),
            status: LoanStatus::Paid,
        };
        assert_eq!(
            snapshot.pending_buckets(),
            PendingBuckets {
                arrears: dec!(2),
                interest: dec!(3),
                principal: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&LoanStatus::Overdue).unwrap(), "\"overdue\"");
        assert_eq!(LoanStatus::from_str("PAID").unwrap(), LoanStatus::Paid);
        assert!(LoanStatus::from_str("settled").is_err());
    }

    #[test]
    fn test_money_serializes_as_string() {
        let snapshot = LoanSnapshot::opening(dec!(1234.50));
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["balance"], "1234.50");
        assert_eq!(json["status"], "active");
    }

    #[tokio::test]
    async fn test_create_and_get_loan() {
        let (_, _, service) = service();
        let created = service
            .create_loan(new_loan(dec!(240000), 12, dec!(24)))
            .await
            .unwrap();

        let fetched = service.get_loan(&created.id).unwrap();
        assert_eq!(fetched, created);
        assert!(matches!(
            service.get_loan("nope"),
            Err(Error::LoanNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_loan_rejects_invalid_terms() {
        let (loans, _, service) = service();
        let result = service.create_loan(new_loan(dec!(1000), 0, dec!(5))).await;
        assert!(result.is_err());
        assert!(service.list_loans(None).unwrap().is_empty());
        assert_eq!(loans.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_installment_quote() {
        let (_, _, service) = service();
        let loan = service
            .create_loan(new_loan(dec!(240000), 12, dec!(24)))
            .await
            .unwrap();

        let quote = service.installment_quote(&loan.id).unwrap();

        assert_eq!(quote.periodic_interest, dec!(2400));
        assert_eq!(quote.expected_installment, dec!(22400));
        assert_eq!(quote.expected_installment_rounded, dec!(22400.00));
    }

    #[tokio::test]
    async fn test_list_loans_filters_by_client() {
        let (_, _, service) = service();
        service
            .create_loan(new_loan(dec!(100), 2, dec!(1)))
            .await
            .unwrap();
        let mut other = new_loan(dec!(200), 2, dec!(1));
        other.client_id = "client-2".to_string();
        service.create_loan(other).await.unwrap();

        assert_eq!(service.list_loans(None).unwrap().len(), 2);
        let filtered = service.list_loans(Some("client-2")).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].principal, dec!(200));

        let page = service
            .list_loans_page(PageRequest { page: 1, limit: 1 })
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.pages, 2);
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let (_, payments, service) = service();
        service
            .create_loan(new_loan(dec!(1000.50), 2, dec!(1)))
            .await
            .unwrap();
        service
            .create_loan(new_loan(dec!(500), 2, dec!(1)))
            .await
            .unwrap();
        payments.seed("loan-1", dec!(10), Decimal::ZERO, Decimal::ZERO, dec!(10));

        let stats = service.dashboard_stats().unwrap();

        assert_eq!(stats.total_loans, 2);
        assert_eq!(stats.total_payments, 1);
        assert_eq!(stats.total_principal, dec!(1500.50));
    }
}
