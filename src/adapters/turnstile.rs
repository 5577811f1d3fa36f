use crate::config::TurnstileConfig;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct VerifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
}

/// Server-side Turnstile challenge verification.
///
/// Opt-in per deployment: with no secret configured every submission
/// passes. Fail-closed otherwise: a transport error, a non-decodable
/// body, or `success != true` all count as a failed verification, and
/// no error ever escapes [`TurnstileVerifier::verify`].
#[derive(Clone, Debug)]
pub struct TurnstileVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret: Option<String>,
}

impl TurnstileVerifier {
    #[must_use]
    pub fn new(config: &TurnstileConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            verify_url: config.verify_url.clone(),
            secret: config.secret.clone(),
        }
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// One round trip to the siteverify endpoint.
    pub async fn verify(&self, token: &str) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            return true;
        };

        let request = VerifyRequest { secret, response: token };
        match self.client.post(&self.verify_url).json(&request).send().await {
            Ok(response) => match response.json::<VerifyResponse>().await {
                Ok(body) => body.success,
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable siteverify response");
                    false
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "siteverify request failed");
                false
            }
        }
    }
}
