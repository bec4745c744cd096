use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use loanbook_core::payments::PendingBucketSource;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use loanbook_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        pending_source: PendingBucketSource::LedgerHistory,
        log_format: "text".to_string(),
        page_limit_max: 50,
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn money(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

async fn create_loan(app: &Router, principal: &str) -> String {
    let (status, loan) = send(
        app,
        Method::POST,
        "/api/v1/loans",
        Some(json!({
            "clientId": "client-1",
            "principal": principal,
            "term": 12,
            "annualRatePct": "24"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    loan["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn healthz_and_request_id() {
    let (app, _tmp) = build_test_router().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn loan_lifecycle_and_payment_waterfall() {
    let (app, _tmp) = build_test_router().await;
    let loan_id = create_loan(&app, "240000").await;

    let (status, loan) = send(&app, Method::GET, &format!("/api/v1/loans/{loan_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loan["status"], "active");
    assert_eq!(loan["paymentFrequency"], "15 dias");

    let (status, quote) = send(
        &app,
        Method::GET,
        &format!("/api/v1/loans/{loan_id}/installment"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&quote["periodicInterest"]), dec!(2400));
    assert_eq!(money(&quote["expectedInstallment"]), dec!(22400));

    let (status, receipt) = send(
        &app,
        Method::POST,
        "/api/v1/payments",
        Some(json!({
            "loanId": loan_id,
            "amount": "22400",
            "receiptRef": "receipts/1.pdf",
            "recordedBy": "admin-1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&receipt["payment"]["principalApplied"]), dec!(22400));
    assert_eq!(money(&receipt["unapplied"]), dec!(0));
    assert_eq!(money(&receipt["snapshot"]["balance"]), dec!(217600));

    let (status, payments) = send(
        &app,
        Method::GET,
        &format!("/api/v1/loans/{loan_id}/payments"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments.as_array().unwrap().len(), 1);

    let (status, snapshot) = send(
        &app,
        Method::POST,
        &format!("/api/v1/loans/{loan_id}/recompute"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot, receipt["snapshot"]);
}

#[tokio::test]
async fn overpayment_settles_the_loan() {
    let (app, _tmp) = build_test_router().await;
    let loan_id = create_loan(&app, "1000").await;

    let (status, receipt) = send(
        &app,
        Method::POST,
        "/api/v1/payments",
        Some(json!({ "loanId": loan_id, "amount": "1200", "recordedBy": "admin-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&receipt["unapplied"]), dec!(200));
    assert_eq!(receipt["snapshot"]["status"], "paid");
}

#[tokio::test]
async fn error_responses() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/loans/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/payments",
        Some(json!({ "loanId": "missing", "amount": "10", "recordedBy": "admin-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let loan_id = create_loan(&app, "1000").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/payments",
        Some(json!({ "loanId": loan_id, "amount": "0", "recordedBy": "admin-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/loans",
        Some(json!({ "clientId": "c", "principal": "100", "term": 0, "annualRatePct": "5" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn calculator_endpoints() {
    let (app, _tmp) = build_test_router().await;

    let (status, allocation) = send(
        &app,
        Method::POST,
        "/api/v1/calculator/allocate",
        Some(json!({
            "amount": "100000",
            "pendingArrears": "20000",
            "pendingInterest": "15000",
            "pendingPrincipal": "500000"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&allocation["arrearsApplied"]), dec!(20000));
    assert_eq!(money(&allocation["interestApplied"]), dec!(15000));
    assert_eq!(money(&allocation["principalApplied"]), dec!(65000));
    assert_eq!(money(&allocation["remainder"]), dec!(0));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/calculator/allocate",
        Some(json!({
            "amount": "-1",
            "pendingArrears": "0",
            "pendingInterest": "0",
            "pendingPrincipal": "0"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, installment) = send(
        &app,
        Method::POST,
        "/api/v1/calculator/installment",
        Some(json!({ "capital": "240000", "term": 12, "annualRatePct": "24" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&installment["expectedInstallment"]), dec!(22400));
}

#[tokio::test]
async fn pagination_dashboard_and_recompute_all() {
    let (app, _tmp) = build_test_router().await;
    for principal in ["100", "200", "300"] {
        create_loan(&app, principal).await;
    }

    let (status, page) = send(&app, Method::GET, "/api/v1/loans/paginated?page=2&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["pagination"]["total"], 3);
    assert_eq!(page["pagination"]["pages"], 2);

    let (_, page) = send(&app, Method::GET, "/api/v1/loans/paginated?limit=500", None).await;
    assert_eq!(page["pagination"]["limit"], 50);

    let (status, stats) = send(&app, Method::GET, "/api/v1/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalLoans"], 3);
    assert_eq!(stats["totalPayments"], 0);
    assert_eq!(money(&stats["totalPrincipal"]), dec!(600));

    let (status, result) = send(&app, Method::POST, "/api/v1/ledger/recompute-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["recomputed"], 3);
    assert_eq!(result["failed"], json!([]));

    let (status, payments) = send(&app, Method::GET, "/api/v1/payments/paginated", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments["pagination"]["total"], 0);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let (app, _tmp) = build_test_router().await;
    let (status, doc) = send(&app, Method::GET, "/api/v1/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/payments"].is_object());
}
