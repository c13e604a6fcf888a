//! Request handlers for the public API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::choices::{ChoiceEntry, ChoiceLogError};
use crate::dataset::CustomerRecord;
use crate::http::error::ApiError;
use crate::http::extract::{ApiJson, ApiPath};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::segments::RetentionOption;

const CUSTOMER_NOT_FOUND: &str = "Customer_ID not found";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub status: &'static str,
    #[serde(rename = "Customer_ID")]
    pub customer_id: i64,
    #[serde(rename = "Segment")]
    pub segment: String,
    #[serde(rename = "Pred_Repurchase_Count")]
    pub pred_repurchase_count: f64,
    #[serde(rename = "Options")]
    pub options: &'static [RetentionOption],
}

impl From<&CustomerRecord> for CustomerResponse {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            status: "ok",
            customer_id: record.id,
            segment: record.segment.clone(),
            pred_repurchase_count: record.pred_repurchase_count,
            options: record.options(),
        }
    }
}

/// Body of `POST /choice`. Segment data is never taken from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceRequest {
    pub customer_id: i64,
    pub selected_option: String,
}

/// `GET /health`
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// `GET /customer/{customer_id}`
pub async fn get_customer(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<i64>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customers = state
        .customers
        .as_deref()
        .ok_or_else(|| ApiError::InternalUnavailable("customer dataset not loaded".into()))?;

    let record = customers
        .get(customer_id)
        .ok_or_else(|| ApiError::NotFound(CUSTOMER_NOT_FOUND.into()))?;

    Ok(Json(CustomerResponse::from(record)))
}

/// `POST /choice`
pub async fn submit_choice(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ChoiceRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let result = save_choice(&state, payload).await;

    metrics::record_choice(match &result {
        Ok(()) => "saved",
        Err(ApiError::InvalidOption { .. }) => "invalid_option",
        Err(ApiError::NotFound(_)) => "not_found",
        Err(_) => "error",
    });

    result.map(|()| Json(StatusResponse { status: "saved" }))
}

async fn save_choice(state: &AppState, payload: ChoiceRequest) -> Result<(), ApiError> {
    let record = state
        .customers
        .as_deref()
        .and_then(|customers| customers.get(payload.customer_id))
        .ok_or_else(|| ApiError::NotFound(CUSTOMER_NOT_FOUND.into()))?;

    let allowed = record.options();
    let option = payload
        .selected_option
        .parse::<RetentionOption>()
        .ok()
        .filter(|option| allowed.contains(option))
        .ok_or_else(|| ApiError::InvalidOption {
            segment: record.segment.clone(),
            allowed,
        })?;

    let entry = ChoiceEntry::snapshot(record, option);
    let choices = state.choices.clone();
    tokio::task::spawn_blocking(move || choices.replace(entry))
        .await
        .map_err(|e| ApiError::Storage(format!("choice log task failed: {e}")))??;

    tracing::info!(
        customer_id = record.id,
        segment = %record.segment,
        option = %option,
        "Choice saved"
    );
    Ok(())
}

/// `GET /choice/latest/{customer_id}`
pub async fn get_latest_choice(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<i64>,
) -> Result<Json<ChoiceEntry>, ApiError> {
    let choices = state.choices.clone();
    let latest = tokio::task::spawn_blocking(move || choices.latest(customer_id))
        .await
        .map_err(|e| ApiError::Storage(format!("choice log task failed: {e}")))?;

    match latest {
        Ok(Some(entry)) => Ok(Json(entry)),
        Ok(None) => Err(ApiError::NotFound("No choice for this customer_id".into())),
        Err(ChoiceLogError::Missing(_)) => Err(ApiError::NotFound("No choices yet".into())),
        Err(e) => Err(e.into()),
    }
}
