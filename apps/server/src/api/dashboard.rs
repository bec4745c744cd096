use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::DashboardStats};
use axum::{extract::State, routing::get, Json, Router};

#[utoipa::path(get, path = "/api/v1/dashboard/stats", responses((status = 200, body = DashboardStats)))]
pub async fn get_dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardStats>> {
    let stats = state.loan_service.dashboard_stats()?;
    Ok(Json(stats.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/stats", get(get_dashboard_stats))
}
