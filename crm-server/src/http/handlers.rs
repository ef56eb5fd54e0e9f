use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;
use uuid::Uuid;

use crm_core::common::error::CrmError;
use crm_core::domain::{ContactEntry, CustomerStatus, Note};
use crm_core::storage::LeadFilter;

use crate::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub source: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub filters: Option<LeadFilter>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// PATCH body: each action touches exactly the field it names.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "snake_case")]
pub enum CustomerPatch {
    UpdateStatus {
        status: CustomerStatus,
    },
    AddNote {
        content: String,
    },
    AddContact {
        #[serde(rename = "type")]
        contact_type: String,
        #[serde(default)]
        notes: String,
        #[serde(default = "default_timestamp")]
        date: DateTime<Utc>,
    },
}

/// Client-facing error mapping: input errors are specific, infrastructure
/// errors are generic with the detail kept in the server log.
fn error_response(err: CrmError) -> Response {
    let (status, message) = match &err {
        CrmError::InvalidSource(_) | CrmError::NoValidCustomers => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        CrmError::CustomerNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        _ => {
            error!("request failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    };
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

pub async fn import_customers(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Response {
    let use_case = state.import_use_case();
    match use_case
        .run(&request.source, request.data, request.filters)
        .await
    {
        Ok(summary) => (
            StatusCode::OK,
            Json(json!({ "success": true, "results": summary })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(50);
    let offset = query.offset.unwrap_or(0);

    let result = async {
        let customers = state.customers.list(Some(limit), Some(offset)).await?;
        let total = state.customers.count().await?;
        Ok::<_, CrmError>((customers, total))
    }
    .await;

    match result {
        Ok((customers, total)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "customers": customers,
                "total": total,
                "limit": limit,
                "offset": offset,
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_customer(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.customers.get_by_id(id).await {
        Ok(Some(customer)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "customer": customer })),
        )
            .into_response(),
        Ok(None) => error_response(CrmError::CustomerNotFound(id)),
        Err(e) => error_response(e),
    }
}

pub async fn patch_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    let patch: CustomerPatch = match serde_json::from_value(body) {
        Ok(patch) => patch,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": format!("invalid action: {e}") })),
            )
                .into_response()
        }
    };

    let result = match patch {
        CustomerPatch::UpdateStatus { status } => state.customers.update_status(id, status).await,
        CustomerPatch::AddNote { content } => {
            state
                .customers
                .append_note(
                    id,
                    Note {
                        content,
                        created_at: Utc::now(),
                    },
                )
                .await
        }
        CustomerPatch::AddContact {
            contact_type,
            notes,
            date,
        } => {
            state
                .customers
                .append_contact(
                    id,
                    ContactEntry {
                        contact_type,
                        notes,
                        date,
                    },
                )
                .await
        }
    };

    match result {
        Ok(customer) => (
            StatusCode::OK,
            Json(json!({ "success": true, "customer": customer })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
