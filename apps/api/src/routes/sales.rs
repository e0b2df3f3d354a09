//! Sale entry and the sales log.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use dsr_core::report::recent;
use dsr_core::validation::{validate_checkout, validate_new_sale};
use dsr_core::{CheckoutLine, NewSale, SaleRecord};

use crate::error::ApiResult;
use crate::routes::reports::load_records;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sales", get(list).post(create))
        .route("/api/sales/recent", get(list_recent))
        .route("/api/sales/checkout", post(checkout))
}

/// Sales log page.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesLog {
    pub sales: Vec<SaleRecord>,
    /// Stored rows left out because they are malformed
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub lines: Vec<CheckoutLine>,
}

/// GET /api/sales - every valid record, newest first
async fn list(State(state): State<AppState>) -> ApiResult<Json<SalesLog>> {
    let ingested = load_records(&state.db.sales()).await?;
    let sales = recent(&ingested.records, ingested.records.len())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(SalesLog {
        sales,
        skipped: ingested.skipped(),
    }))
}

/// GET /api/sales/recent?limit=N
async fn list_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Json<SalesLog>> {
    let limit = query.limit.unwrap_or(state.config.recent_limit);
    let ingested = load_records(&state.db.sales()).await?;
    let sales = recent(&ingested.records, limit).into_iter().cloned().collect();

    Ok(Json(SalesLog {
        sales,
        skipped: ingested.skipped(),
    }))
}

/// POST /api/sales
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewSale>,
) -> ApiResult<(StatusCode, Json<SaleRecord>)> {
    validate_new_sale(&payload)?;

    let record = state.db.sales().insert(&payload).await?;
    info!(id = %record.id, item = %record.item_name, total = record.total_paise, "Sale recorded");

    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/sales/checkout - every line shares one timestamp
async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<Vec<SaleRecord>>)> {
    validate_checkout(&payload.lines)?;

    let now = Utc::now();
    let sales = payload
        .lines
        .into_iter()
        .map(|line| line.into_sale(now))
        .collect::<Result<Vec<NewSale>, _>>()?;

    let records = state.db.sales().insert_many(&sales).await?;

    Ok((StatusCode::CREATED, Json(records)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::*;
    use crate::routes::test_support::get;
    use dsr_core::{RawSaleRecord, MAX_ITEM_QUANTITY, MAX_LINE_TOTAL_PAISE, MAX_UNIT_PRICE_PAISE};
    use serde_json::json;

    fn sale_json(name: &str, quantity: i64, unit: i64, total: i64, sold_at: &str) -> serde_json::Value {
        json!({
            "itemName": name,
            "quantity": quantity,
            "unitPricePaise": unit,
            "totalPaise": total,
            "soldAt": sold_at,
        })
    }

    #[tokio::test]
    async fn test_create_keeps_given_total() {
        let (app, _) = test_app().await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/sales",
                &sale_json("Tea", 3, 1000, 2500, "2024-01-01T09:00:00Z"),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["totalPaise"], 2500);
        assert_eq!(body["itemName"], "Tea");
    }

    #[tokio::test]
    async fn test_create_rejects_zero_quantity() {
        let (app, _) = test_app().await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/sales",
                &sale_json("Tea", 0, 1000, 0, "2024-01-01T09:00:00Z"),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_checkout_computes_line_totals() {
        let (app, state) = test_app().await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/sales/checkout",
                &json!({"lines": [
                    {"itemName": "Idli", "quantity": 2, "unitPricePaise": 4000},
                    {"itemName": "Vada", "quantity": 3, "unitPricePaise": 3000},
                ]}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body[0]["totalPaise"], 8000);
        assert_eq!(body[1]["totalPaise"], 9000);
        assert_eq!(body[0]["soldAt"], body[1]["soldAt"]);
        assert_eq!(state.db.sales().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_checkout_is_rejected() {
        let (app, state) = test_app().await;

        let response = send(
            &app,
            json_request("POST", "/api/sales/checkout", &json!({"lines": []})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Cart is empty");
        assert_eq!(state.db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_amounts_are_rejected() {
        let (app, state) = test_app().await;
        let half = i64::MAX / 2 + 1;

        for body in [
            sale_json("Thali", 1, 1000, half, "2024-01-01T09:00:00Z"),
            sale_json("Thali", 1, i64::MAX, 1000, "2024-01-01T09:00:00Z"),
        ] {
            let response = send(&app, json_request("POST", "/api/sales", &body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/sales/checkout",
                &json!({"lines": [
                    {"itemName": "Thali", "quantity": 999, "unitPricePaise": i64::MAX / 10},
                ]}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        assert_eq!(state.db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_largest_checkout_is_accepted_and_reported() {
        let (app, _) = test_app().await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/sales/checkout",
                &json!({"lines": [
                    {"itemName": "Thali", "quantity": MAX_ITEM_QUANTITY, "unitPricePaise": MAX_UNIT_PRICE_PAISE},
                    {"itemName": "Thali", "quantity": MAX_ITEM_QUANTITY, "unitPricePaise": MAX_UNIT_PRICE_PAISE},
                ]}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await[0]["totalPaise"], MAX_LINE_TOTAL_PAISE);

        let body = body_json(send(&app, get("/api/reports/today")).await).await;
        assert_eq!(body["report"]["totalRevenuePaise"], MAX_LINE_TOTAL_PAISE * 2);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let (app, _) = test_app().await;

        for (name, at) in [
            ("Tea", "2024-01-01T09:00:00Z"),
            ("Coffee", "2024-01-03T09:00:00Z"),
            ("Vada", "2024-01-02T09:00:00Z"),
        ] {
            send(
                &app,
                json_request("POST", "/api/sales", &sale_json(name, 1, 1000, 1000, at)),
            )
            .await;
        }

        let body = body_json(send(&app, get("/api/sales/recent?limit=2")).await).await;
        let names: Vec<&str> = body["sales"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["itemName"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Coffee", "Vada"]);

        let all = body_json(send(&app, get("/api/sales")).await).await;
        assert_eq!(all["sales"].as_array().unwrap().len(), 3);
        assert_eq!(all["sales"][2]["itemName"], "Tea");
    }

    #[tokio::test]
    async fn test_log_counts_malformed_rows() {
        let (app, state) = test_app().await;

        state
            .db
            .sales()
            .insert_raw(&RawSaleRecord {
                id: "legacy".to_string(),
                item_name: Some("Chai".to_string()),
                ..RawSaleRecord::default()
            })
            .await
            .unwrap();

        let body = body_json(send(&app, get("/api/sales")).await).await;
        assert_eq!(body["skipped"], 1);
        assert!(body["sales"].as_array().unwrap().is_empty());
    }
}
