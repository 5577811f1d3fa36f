#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use inquiry_server::adapters::audit::AuditLog;
use inquiry_server::adapters::mailer::{Mailer, SmtpMailer};
use inquiry_server::adapters::turnstile::TurnstileVerifier;
use inquiry_server::api::MgmtState;
use inquiry_server::config::Config;
use inquiry_server::services::health_service::HealthService;
use inquiry_server::services::submission_service::{SubmissionProfile, SubmissionService};
use inquiry_server::telemetry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    telemetry::init_telemetry(&config.telemetry);

    inquiry_server::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app, shutdown_rx) = async {
        // Phase 1: Adapters
        let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(&config.mail)?);
        let audit = AuditLog::new(config.audit.log_path.clone());
        let verifier = TurnstileVerifier::new(&config.turnstile);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        inquiry_server::spawn_signal_handler(shutdown_tx);

        // Phase 2: Services (pure wiring, no side effects)
        let contact_service = SubmissionService::new(
            SubmissionProfile::Inquiry,
            &config.mail.practice_name,
            verifier.clone(),
            Arc::clone(&mailer),
            audit.clone(),
        );
        let intake_service = SubmissionService::new(
            SubmissionProfile::Intake,
            &config.mail.practice_name,
            verifier,
            Arc::clone(&mailer),
            audit.clone(),
        );
        let health_service = HealthService::new(audit, mailer);

        // Phase 3: Routers and listeners
        let app_router =
            inquiry_server::api::app_router(config.clone(), contact_service, intake_service);
        let mgmt_app = inquiry_server::api::mgmt_router(MgmtState { health_service });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr =
            format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        Ok::<
            (
                tokio::net::TcpListener,
                tokio::net::TcpListener,
                axum::Router,
                axum::Router,
                watch::Receiver<bool>,
            ),
            anyhow::Error,
        >((api_listener, mgmt_listener, app_router, mgmt_app, shutdown_rx))
    }
    .instrument(boot_span)
    .await?;

    // Phase 4: Serve until shutdown is signalled
    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router).with_graceful_shutdown(async move {
        let _ = api_rx.wait_for(|&s| s).await;
    });

    let mut mgmt_rx = shutdown_rx;
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app).with_graceful_shutdown(async move {
        let _ = mgmt_rx.wait_for(|&s| s).await;
    });

    if let Err(e) = tokio::try_join!(api_server, mgmt_server) {
        tracing::error!(error = %e, "Server error");
    }

    Ok(())
}
