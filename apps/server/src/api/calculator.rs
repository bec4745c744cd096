//! Stateless access to the allocation and installment formulas.

use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{Allocation, AllocationRequest, InstallmentCalculation, InstallmentRequest},
};
use axum::{routing::post, Json, Router};
use loanbook_core::ledger::{allocate, expected_installment, periodic_interest, round_money};

#[utoipa::path(post, path = "/api/v1/calculator/allocate", request_body = AllocationRequest, responses((status = 200, body = Allocation), (status = 400, description = "Invalid input")))]
pub async fn allocate_payment(Json(request): Json<AllocationRequest>) -> ApiResult<Json<Allocation>> {
    let allocation = allocate(
        request.amount,
        request.pending_arrears,
        request.pending_interest,
        request.pending_principal,
    )?;
    Ok(Json(allocation.into()))
}

#[utoipa::path(post, path = "/api/v1/calculator/installment", request_body = InstallmentRequest, responses((status = 200, body = InstallmentCalculation), (status = 400, description = "Invalid input")))]
pub async fn calculate_installment(
    Json(request): Json<InstallmentRequest>,
) -> ApiResult<Json<InstallmentCalculation>> {
    let interest = periodic_interest(request.capital, request.annual_rate_pct)?;
    let installment = expected_installment(request.capital, request.term, request.annual_rate_pct)?;
    Ok(Json(InstallmentCalculation {
        periodic_interest: interest,
        expected_installment: installment,
        expected_installment_rounded: round_money(installment),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/calculator/allocate", post(allocate_payment))
        .route("/calculator/installment", post(calculate_installment))
}
