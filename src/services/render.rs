use crate::domain::message::RenderedMessage;
use crate::domain::priority::Priority;
use crate::domain::submission::SubmissionRecord;
use std::fmt::Write;

/// Builds the staff-facing email for a validated submission.
///
/// Rendering is deterministic: the same record always produces
/// byte-identical output. Every interpolated value is HTML-escaped
/// before it reaches the HTML body; submission content is
/// attacker-controlled and the result is opened in staff mail clients.
#[derive(Clone, Debug)]
pub struct MessageRenderer {
    practice_name: String,
}

impl MessageRenderer {
    #[must_use]
    pub const fn new(practice_name: String) -> Self {
        Self { practice_name }
    }

    /// Renders the lightweight website-inquiry message.
    #[must_use]
    pub fn render_inquiry(&self, record: &SubmissionRecord) -> RenderedMessage {
        let subject = format!("Website inquiry from {}", record.full_name());

        let mut text = String::new();
        let _ = writeln!(text, "Name: {}", record.full_name());
        let _ = writeln!(text, "Email: {}", record.email.trim());
        let _ = writeln!(text, "Phone: {}", record.phone.trim());
        let _ = writeln!(text, "Message: {}", record.message.trim());
        let _ = writeln!(text, "Page: {}", record.page.trim());

        let mut html = String::new();
        push_field(&mut html, "Name", &record.full_name());
        push_field(&mut html, "Email", record.email.trim());
        push_field(&mut html, "Phone", record.phone.trim());
        let _ = writeln!(html, "<p><strong>Message:</strong><br>{}</p>", multiline_html(record.message.trim()));
        let _ = writeln!(html, "<p><em>Page:</em> {}</p>", escape_html(record.page.trim()));

        RenderedMessage { subject, text_body: text, html_body: html }
    }

    /// Renders the detailed new-patient intake message.
    #[must_use]
    pub fn render_intake(&self, record: &SubmissionRecord) -> RenderedMessage {
        let priority = Priority::from_urgency(&record.urgency);
        let subject = format!("{} - {} - New Patient Inquiry", priority.marker(), record.full_name());

        let contact_method = capitalize(&display_or(&record.contact_method, "Email"));
        let reason = contact_reason_display(record.contact_reason.trim());
        let date_of_birth = display_or(&record.date_of_birth, "Not provided");
        let preferred_date = display_or(&record.preferred_date, "Not specified");
        let preferred_time = capitalize(&display_or(&record.preferred_time, "No preference"));
        let referral = title_case_or(&record.referral_source, "Not specified");
        let insurance = capitalize(&display_or(&record.insurance, "Not specified"));
        let availability = availability_display(&record.availability);

        let mut text = String::new();
        let _ = writeln!(text, "Priority: {}", priority.marker());
        let _ = writeln!(text, "Name: {}", record.full_name());
        let _ = writeln!(text, "Email: {}", record.email.trim());
        let _ = writeln!(text, "Phone: {}", record.phone.trim());
        let _ = writeln!(text, "Date of birth: {date_of_birth}");
        let _ = writeln!(text, "Preferred contact method: {contact_method}");
        let _ = writeln!(text, "Reason: {reason}");
        let _ = writeln!(text, "Preferred date: {preferred_date}");
        let _ = writeln!(text, "Preferred time: {preferred_time}");
        let _ = writeln!(text, "Availability: {availability}");
        let _ = writeln!(text, "Services of interest: {}", services_text(&record.services));
        let _ = writeln!(text, "Insurance: {insurance}");
        let _ = writeln!(text, "Referral source: {referral}");
        let _ = writeln!(text, "Message: {}", record.message.trim());

        let mut html = String::new();
        let _ = writeln!(html, "<h2>{} - New Patient Inquiry</h2>", escape_html(&self.practice_name));
        push_field(&mut html, "Priority", priority.marker());
        push_field(&mut html, "Name", &record.full_name());
        push_field(&mut html, "Email", record.email.trim());
        push_field(&mut html, "Phone", record.phone.trim());
        push_field(&mut html, "Date of birth", &date_of_birth);
        push_field(&mut html, "Preferred contact method", &contact_method);
        push_field(&mut html, "Reason", &reason);
        push_field(&mut html, "Preferred date", &preferred_date);
        push_field(&mut html, "Preferred time", &preferred_time);
        push_field(&mut html, "Availability", &availability);
        let _ = writeln!(html, "<p><strong>Services of interest:</strong> {}</p>", services_html(&record.services));
        push_field(&mut html, "Insurance", &insurance);
        push_field(&mut html, "Referral source", &referral);
        let _ = writeln!(html, "<p><strong>Message:</strong><br>{}</p>", multiline_html(record.message.trim()));

        RenderedMessage { subject, text_body: text, html_body: html }
    }
}

fn push_field(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(html, "<p><strong>{label}:</strong> {}</p>", escape_html(value));
}

/// Escapes `&`, `<`, `>`, `"` and `'` for embedding in HTML.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes a free-text value and converts its line breaks to `<br>`.
fn multiline_html(value: &str) -> String {
    escape_html(value).replace("\r\n", "<br>").replace('\n', "<br>")
}

fn display_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() { default.to_owned() } else { trimmed.to_owned() }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().collect::<String>() + chars.as_str())
}

/// Hyphens become spaces and each word is capitalized, so the tag
/// values the form posts (`teeth-whitening`) read naturally.
fn title_case(value: &str) -> String {
    value.replace('-', " ").split_whitespace().map(capitalize).collect::<Vec<_>>().join(" ")
}

fn title_case_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() { default.to_owned() } else { title_case(trimmed) }
}

fn availability_display(availability: &[String]) -> String {
    if availability.is_empty() {
        "Not specified".to_owned()
    } else {
        availability.iter().map(|slot| capitalize(slot.trim())).collect::<Vec<_>>().join(", ")
    }
}

fn services_text(services: &[String]) -> String {
    if services.is_empty() {
        "None specified".to_owned()
    } else {
        services.iter().map(|tag| title_case(tag)).collect::<Vec<_>>().join(", ")
    }
}

fn services_html(services: &[String]) -> String {
    if services.is_empty() {
        return r#"<span class="value">None specified</span>"#.to_owned();
    }
    services
        .iter()
        .map(|tag| format!(r#"<span class="service-tag">{}</span>"#, escape_html(&title_case(tag))))
        .collect::<String>()
}

fn contact_reason_display(reason: &str) -> String {
    match reason {
        "new-patient" => "New Patient Inquiry".to_owned(),
        "appointment" => "Schedule Appointment".to_owned(),
        "emergency" => "Dental Emergency".to_owned(),
        "consultation" => "Consultation Request".to_owned(),
        "insurance" => "Insurance Questions".to_owned(),
        "general" => "General Question".to_owned(),
        "complaint" => "Complaint/Concern".to_owned(),
        "other" => "Other".to_owned(),
        other => title_case(other),
    }
}
