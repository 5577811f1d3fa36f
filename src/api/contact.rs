use crate::api::AppState;
use crate::domain::submission::SubmissionRecord;
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};
use bytes::Bytes;
use serde_json::json;

/// Lightweight website-inquiry submission.
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let record = parse_submission(&headers, &body)?;
    let confirmation = state.contact_service.handle(record).await?;
    Ok(Json(json!({ "message": confirmation })))
}

/// Detailed new-patient intake submission.
pub async fn submit_intake(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let record = parse_submission(&headers, &body)?;
    let confirmation = state.intake_service.handle(record).await?;
    Ok(Json(json!({ "message": confirmation })))
}

/// Decodes the request body by declared content type. JSON is the
/// default; HTML form posts are accepted as well.
fn parse_submission(headers: &HeaderMap, body: &Bytes) -> Result<SubmissionRecord> {
    let content_type =
        headers.get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok()).unwrap_or_default();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        Ok(SubmissionRecord::from_form_pairs(url::form_urlencoded::parse(body)))
    } else {
        serde_json::from_slice(body).map_err(|e| AppError::MalformedRequest(e.to_string()))
    }
}
