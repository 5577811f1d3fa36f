use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub mail: MailConfig,

    #[command(flatten)]
    pub turnstile: TurnstileConfig,

    #[command(flatten)]
    pub audit: AuditConfig,

    #[command(flatten)]
    pub site: SiteConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "INQUIRY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "INQUIRY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management (health probe) listener
    #[arg(long, env = "INQUIRY_MGMT_PORT", default_value_t = 3001)]
    pub mgmt_port: u16,
}

#[derive(Clone, Debug, Args)]
pub struct MailConfig {
    /// SMTP relay URL, e.g. smtps://email-smtp.us-east-1.amazonaws.com
    #[arg(long, env = "INQUIRY_SMTP_URL")]
    pub smtp_url: String,

    /// SMTP username (credentials are only sent over TLS)
    #[arg(long, env = "INQUIRY_SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[arg(long, env = "INQUIRY_SMTP_PASSWORD")]
    pub smtp_password: Option<String>,

    /// Mailbox that receives submissions
    #[arg(long, env = "INQUIRY_TO_EMAIL")]
    pub to_email: String,

    /// Verified sender address
    #[arg(long, env = "INQUIRY_FROM_EMAIL")]
    pub from_email: String,

    /// Display name used in the From header and message branding
    #[arg(long, env = "INQUIRY_PRACTICE_NAME", default_value = "Spring Valley Dental Associates")]
    pub practice_name: String,
}

#[derive(Clone, Debug, Args)]
pub struct TurnstileConfig {
    /// Turnstile secret key; presence enables server-side verification
    #[arg(long = "turnstile-secret", env = "INQUIRY_TURNSTILE_SECRET")]
    pub secret: Option<String>,

    /// Turnstile site key surfaced to the browser widget
    #[arg(long = "turnstile-site-key", env = "INQUIRY_TURNSTILE_SITE_KEY")]
    pub site_key: Option<String>,

    /// Challenge verification endpoint
    #[arg(
        long = "turnstile-verify-url",
        env = "INQUIRY_TURNSTILE_VERIFY_URL",
        default_value = "https://challenges.cloudflare.com/turnstile/v0/siteverify"
    )]
    pub verify_url: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuditConfig {
    /// Append-only log of successful submissions
    #[arg(long = "audit-log", env = "INQUIRY_AUDIT_LOG", default_value = "contact_submissions.log")]
    pub log_path: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SiteConfig {
    /// Analytics domain served to the browser
    #[arg(long, env = "INQUIRY_ANALYTICS_DOMAIN")]
    pub analytics_domain: Option<String>,

    /// Whether the browser should load analytics
    #[arg(long, env = "INQUIRY_ANALYTICS_ENABLED", default_value_t = false)]
    pub analytics_enabled: bool,

    /// Submission endpoint the browser form posts to
    #[arg(long, env = "INQUIRY_CONTACT_ENDPOINT", default_value = "/v1/contact")]
    pub contact_endpoint: String,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "INQUIRY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
