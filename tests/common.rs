#![allow(dead_code)]

use async_trait::async_trait;
use inquiry_server::adapters::audit::AuditLog;
use inquiry_server::adapters::mailer::{DeliveryError, Mailer, ReplyTo};
use inquiry_server::adapters::turnstile::TurnstileVerifier;
use inquiry_server::api::MgmtState;
use inquiry_server::config::{
    AuditConfig, Config, LogFormat, MailConfig, ServerConfig, SiteConfig, TelemetryConfig,
    TurnstileConfig,
};
use inquiry_server::domain::message::RenderedMessage;
use inquiry_server::services::health_service::HealthService;
use inquiry_server::services::submission_service::{SubmissionProfile, SubmissionService};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("inquiry_server=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

/// Captures outbound messages instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(RenderedMessage, ReplyTo)>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.fail.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> (RenderedMessage, ReplyTo) {
        self.sent.lock().unwrap().last().cloned().expect("no message was sent")
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &RenderedMessage, reply_to: &ReplyTo) -> Result<(), DeliveryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DeliveryError::Transport("simulated outage".to_owned()));
        }
        self.sent.lock().unwrap().push((message.clone(), reply_to.clone()));
        Ok(())
    }

    async fn check(&self) -> Result<(), DeliveryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DeliveryError::Transport("simulated outage".to_owned()));
        }
        Ok(())
    }
}

pub fn temp_audit_path() -> PathBuf {
    std::env::temp_dir().join(format!("inquiry-audit-{}.log", uuid::Uuid::new_v4()))
}

pub fn get_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // 0 means let OS choose
            mgmt_port: 0,
        },
        mail: MailConfig {
            smtp_url: "smtp://127.0.0.1:2525".to_string(),
            smtp_username: None,
            smtp_password: None,
            to_email: "frontdesk@example.com".to_string(),
            from_email: "noreply@example.com".to_string(),
            practice_name: "Spring Valley Dental Associates".to_string(),
        },
        turnstile: TurnstileConfig {
            secret: None,
            site_key: None,
            // Unroutable unless a test points it at a local stub.
            verify_url: "http://127.0.0.1:1/siteverify".to_string(),
        },
        audit: AuditConfig { log_path: temp_audit_path() },
        site: SiteConfig {
            analytics_domain: None,
            analytics_enabled: false,
            contact_endpoint: "/v1/contact".to_string(),
        },
        telemetry: TelemetryConfig { log_format: LogFormat::Text },
    }
}

pub struct TestApp {
    pub api_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub mailer: Arc<RecordingMailer>,
    pub config: Config,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(get_test_config()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        Self::spawn_with_mailer(config, Arc::new(RecordingMailer::default())).await
    }

    pub async fn spawn_with_mailer(config: Config, mailer: Arc<RecordingMailer>) -> Self {
        setup_tracing();

        let audit = AuditLog::new(config.audit.log_path.clone());
        let verifier = TurnstileVerifier::new(&config.turnstile);
        let dyn_mailer: Arc<dyn Mailer> = Arc::<RecordingMailer>::clone(&mailer);

        let contact_service = SubmissionService::new(
            SubmissionProfile::Inquiry,
            &config.mail.practice_name,
            verifier.clone(),
            Arc::clone(&dyn_mailer),
            audit.clone(),
        );
        let intake_service = SubmissionService::new(
            SubmissionProfile::Intake,
            &config.mail.practice_name,
            verifier,
            Arc::clone(&dyn_mailer),
            audit.clone(),
        );
        let health_service = HealthService::new(audit, dyn_mailer);

        let app = inquiry_server::api::app_router(config.clone(), contact_service, intake_service);
        let mgmt = inquiry_server::api::mgmt_router(MgmtState { health_service });

        let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let api_addr = api_listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(api_listener, app).await.unwrap();
        });

        let mgmt_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_addr = mgmt_listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt).await.unwrap();
        });

        Self {
            api_url: format!("http://{api_addr}/v1"),
            mgmt_url: format!("http://{mgmt_addr}"),
            client: reqwest::Client::new(),
            mailer,
            config,
        }
    }
}

/// Local stand-in for the Cloudflare siteverify endpoint: succeeds
/// only for the expected token.
pub async fn spawn_siteverify_stub(expected_token: &'static str) -> String {
    use axum::{Json, Router, routing::post};

    let app = Router::new().route(
        "/siteverify",
        post(move |Json(body): Json<serde_json::Value>| async move {
            let ok = body.get("response").and_then(serde_json::Value::as_str) == Some(expected_token);
            Json(serde_json::json!({ "success": ok }))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/siteverify")
}

/// Epoch milliseconds, as the browser would compute for `startTime`.
pub fn epoch_millis_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis()
        .try_into()
        .unwrap()
}
