use crate::api::MgmtState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub audit_log: String,
    pub mail: String,
}

/// Liveness probe: returns 200 OK as long as the server is running.
pub async fn livez() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe: checks the audit log and the mail transport.
pub async fn readyz(State(state): State<MgmtState>) -> impl IntoResponse {
    let (audit_res, mail_res) = tokio::join!(
        state.health_service.check_audit_log(),
        state.health_service.check_mailer()
    );

    let mut status_code = StatusCode::OK;
    let audit_status = if let Err(e) = audit_res {
        tracing::warn!(error = %e, component = "audit_log", "Readiness probe failed");
        status_code = StatusCode::SERVICE_UNAVAILABLE;
        "error"
    } else {
        "ok"
    };

    let mail_status = if let Err(e) = mail_res {
        tracing::warn!(error = %e, component = "mail", "Readiness probe failed");
        status_code = StatusCode::SERVICE_UNAVAILABLE;
        "error"
    } else {
        "ok"
    };

    let response = HealthResponse {
        status: if status_code == StatusCode::OK { "ok" } else { "error" }.to_string(),
        audit_log: audit_status.to_string(),
        mail: mail_status.to_string(),
    };

    (status_code, Json(response))
}
