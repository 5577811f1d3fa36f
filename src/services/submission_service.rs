use crate::adapters::audit::AuditLog;
use crate::adapters::mailer::{Mailer, ReplyTo};
use crate::adapters::turnstile::TurnstileVerifier;
use crate::domain::message::RenderedMessage;
use crate::domain::submission::SubmissionRecord;
use crate::error::{AppError, Result};
use crate::services::render::MessageRenderer;
use crate::services::spam;
use crate::services::validation::{FieldValidator, INQUIRY_REQUIRED, INTAKE_REQUIRED};
use std::sync::Arc;

/// Which form a service instance handles. The two paths keep separate
/// required-field sets and response wording; merging them would change
/// externally observable accept/reject behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionProfile {
    /// Lightweight website-inquiry form.
    Inquiry,
    /// Detailed new-patient intake form.
    Intake,
}

impl SubmissionProfile {
    const fn required_fields(self) -> &'static [crate::services::validation::Field] {
        match self {
            Self::Inquiry => INQUIRY_REQUIRED,
            Self::Intake => INTAKE_REQUIRED,
        }
    }

    const fn confirmation(self) -> &'static str {
        match self {
            Self::Inquiry => "Your message was sent. Thank you!",
            Self::Intake => {
                "Your message has been sent successfully. We will contact you within 24 hours."
            }
        }
    }
}

/// Orchestrates one submission through screening, validation,
/// verification, rendering and delivery.
///
/// Stateless across requests; safe to invoke concurrently.
#[derive(Clone, Debug)]
pub struct SubmissionService {
    profile: SubmissionProfile,
    validator: FieldValidator,
    renderer: MessageRenderer,
    verifier: TurnstileVerifier,
    mailer: Arc<dyn Mailer>,
    audit: AuditLog,
}

impl SubmissionService {
    #[must_use]
    pub fn new(
        profile: SubmissionProfile,
        practice_name: &str,
        verifier: TurnstileVerifier,
        mailer: Arc<dyn Mailer>,
        audit: AuditLog,
    ) -> Self {
        Self {
            profile,
            validator: FieldValidator::new(profile.required_fields()),
            renderer: MessageRenderer::new(practice_name.to_owned()),
            verifier,
            mailer,
            audit,
        }
    }

    /// Runs the pipeline for one record. All-or-nothing: the first
    /// failing stage terminates the request.
    ///
    /// # Errors
    /// Returns [`AppError::SpamRejected`], [`AppError::ValidationFailed`],
    /// [`AppError::CaptchaFailed`] or [`AppError::DeliveryFailed`]
    /// depending on the stage that rejected the submission.
    #[tracing::instrument(skip(self, record), fields(profile = ?self.profile))]
    pub async fn handle(&self, record: SubmissionRecord) -> Result<&'static str> {
        if !spam::is_human(&record, spam::epoch_millis_now()) {
            return Err(AppError::SpamRejected);
        }

        self.validator.validate(&record).map_err(AppError::ValidationFailed)?;

        if self.verifier.enabled() {
            let token = record.turnstile_token.as_deref().unwrap_or_default();
            if !self.verifier.verify(token).await {
                return Err(AppError::CaptchaFailed);
            }
        }

        let message = self.render(&record);
        let reply_to = ReplyTo { name: record.full_name(), email: record.email.trim().to_owned() };

        self.mailer.send(&message, &reply_to).await.map_err(|e| {
            tracing::error!(error = %e, "delivery failed");
            AppError::DeliveryFailed
        })?;

        let urgency = record.urgency.trim();
        let urgency = if urgency.is_empty() { "routine" } else { urgency };
        self.audit.record(&record.full_name(), record.email.trim(), urgency).await;

        tracing::info!(email = %record.email.trim(), "submission delivered");
        Ok(self.profile.confirmation())
    }

    fn render(&self, record: &SubmissionRecord) -> RenderedMessage {
        match self.profile {
            SubmissionProfile::Inquiry => self.renderer.render_inquiry(record),
            SubmissionProfile::Intake => self.renderer.render_intake(record),
        }
    }
}
