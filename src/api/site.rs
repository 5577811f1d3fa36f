use crate::api::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

/// Browser-facing settings. Secrets never appear here: the Turnstile
/// secret and SMTP credentials stay server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub contact_api_url: String,
    pub enable_turnstile: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnstile_site_key: Option<String>,
    pub analytics_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_domain: Option<String>,
}

/// Settings consumed by the website's scripts at page load.
pub async fn client_config(State(state): State<AppState>) -> impl IntoResponse {
    let config = &state.config;

    Json(ClientConfig {
        contact_api_url: config.site.contact_endpoint.clone(),
        enable_turnstile: config.turnstile.site_key.is_some(),
        turnstile_site_key: config.turnstile.site_key.clone(),
        analytics_enabled: config.site.analytics_enabled,
        analytics_domain: config.site.analytics_domain.clone(),
    })
}
