//! Record endpoints - JSON document and form action
//!
//! Endpoints:
//! - api_record_detail: Get single record (JSON)
//! - record_action: Update or delete a record from a form submission

use crate::ApiError;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use finboard_core::{ActionOutcome, FormFields, RecordEndpoint, ResourceKind};

/// Get single record detail (JSON API)
pub async fn api_record_detail<K: ResourceKind>(
    State(endpoint): State<RecordEndpoint<K>>,
    Path(id): Path<String>,
) -> Result<Json<K::Record>, ApiError> {
    let record = endpoint.read(Some(&id)).await?;
    Ok(Json(record))
}

/// Form action - dispatches on the `intent` field.
///
/// `update` answers `{"success": true}`; `delete` redirects to the
/// referring page, or to the listing page when the referrer shows the
/// deleted record.
pub async fn record_action<K: ResourceKind>(
    State(endpoint): State<RecordEndpoint<K>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, ApiError> {
    let fields = FormFields::parse(&body);
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());

    let outcome = endpoint.action(Some(&id), &fields, referer).await?;
    let response = match outcome {
        ActionOutcome::Updated(ack) => Json(ack).into_response(),
        ActionOutcome::Deleted { redirect_to } => Redirect::to(&redirect_to).into_response(),
    };
    Ok(response)
}
