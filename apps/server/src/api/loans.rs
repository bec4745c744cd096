use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{
        InstallmentQuote, Loan, LoanPage, LoanSnapshot, LoansQuery, NewLoan, PageQuery, Payment,
    },
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use loanbook_core::utils::pagination::PageRequest;
use tracing::info;

#[utoipa::path(get, path = "/api/v1/loans", params(LoansQuery), responses((status = 200, body = [Loan])))]
pub async fn list_loans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoansQuery>,
) -> ApiResult<Json<Vec<Loan>>> {
    let loans = state.loan_service.list_loans(query.client_id.as_deref())?;
    Ok(Json(loans.into_iter().map(Loan::from).collect()))
}

#[utoipa::path(post, path = "/api/v1/loans", request_body = NewLoan, responses((status = 200, body = Loan)))]
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewLoan>,
) -> ApiResult<Json<Loan>> {
    let created = state.loan_service.create_loan(payload.into()).await?;
    Ok(Json(Loan::from(created)))
}

#[utoipa::path(get, path = "/api/v1/loans/paginated", params(PageQuery), responses((status = 200, body = LoanPage)))]
pub async fn list_loans_paginated(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<LoanPage>> {
    let request = PageRequest::from_query(query.page, query.limit, state.page_limit_max);
    let page = state.loan_service.list_loans_page(request)?;
    Ok(Json(page.into()))
}

#[utoipa::path(get, path = "/api/v1/loans/{id}", params(("id" = String, Path, description = "Loan id")), responses((status = 200, body = Loan), (status = 404, description = "Unknown loan")))]
pub async fn get_loan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Loan>> {
    let loan = state.loan_service.get_loan(&id)?;
    Ok(Json(Loan::from(loan)))
}

#[utoipa::path(get, path = "/api/v1/loans/{id}/installment", params(("id" = String, Path, description = "Loan id")), responses((status = 200, body = InstallmentQuote), (status = 404, description = "Unknown loan")))]
pub async fn get_installment_quote(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<InstallmentQuote>> {
    let quote = state.loan_service.installment_quote(&id)?;
    Ok(Json(quote.into()))
}

#[utoipa::path(post, path = "/api/v1/loans/{id}/recompute", params(("id" = String, Path, description = "Loan id")), responses((status = 200, body = LoanSnapshot), (status = 404, description = "Unknown loan")))]
pub async fn recompute_loan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LoanSnapshot>> {
    let snapshot = state.ledger_service.recompute(&id).await?;
    info!("Recomputed loan {} on request", id);
    Ok(Json(snapshot.into()))
}

#[utoipa::path(get, path = "/api/v1/loans/{id}/payments", params(("id" = String, Path, description = "Loan id")), responses((status = 200, body = [Payment]), (status = 404, description = "Unknown loan")))]
pub async fn list_loan_payments(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Payment>>> {
    let payments = state.payment_service.list_payments(&id)?;
    Ok(Json(payments.into_iter().map(Payment::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/loans", get(list_loans).post(create_loan))
        .route("/loans/paginated", get(list_loans_paginated))
        .route("/loans/{id}", get(get_loan))
        .route("/loans/{id}/installment", get(get_installment_quote))
        .route("/loans/{id}/recompute", post(recompute_loan))
        .route("/loans/{id}/payments", get(list_loan_payments))
}
