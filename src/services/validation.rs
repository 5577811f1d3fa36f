use crate::domain::submission::SubmissionRecord;

/// A field the validator can require, with its user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    ContactReason,
    Message,
}

impl Field {
    fn value(self, record: &SubmissionRecord) -> &str {
        match self {
            Self::FirstName => &record.first_name,
            Self::LastName => &record.last_name,
            Self::Email => &record.email,
            Self::Phone => &record.phone,
            Self::ContactReason => &record.contact_reason,
            Self::Message => &record.message,
        }
    }

    const fn error_message(self) -> &'static str {
        match self {
            Self::FirstName => "First name is required",
            Self::LastName => "Last name is required",
            Self::Email => "Valid email is required",
            Self::Phone => "Phone number is required",
            Self::ContactReason => "Contact reason is required",
            Self::Message => "Message is required",
        }
    }
}

/// Required fields for the lightweight website-inquiry form.
pub const INQUIRY_REQUIRED: &[Field] = &[Field::FirstName, Field::LastName, Field::Email];

/// Required fields for the detailed new-patient intake form.
pub const INTAKE_REQUIRED: &[Field] = &[
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Phone,
    Field::ContactReason,
    Field::Message,
];

/// Required-field and email-format checks over a submission.
///
/// The two submission paths require different field sets, so the list
/// is a construction parameter rather than baked in.
#[derive(Clone, Copy, Debug)]
pub struct FieldValidator {
    required: &'static [Field],
}

impl FieldValidator {
    #[must_use]
    pub const fn new(required: &'static [Field]) -> Self {
        Self { required }
    }

    /// Checks each required field for presence (after trimming) and
    /// the email field for address shape.
    ///
    /// # Errors
    /// Returns one message per failing field; present fields are never
    /// reported.
    pub fn validate(&self, record: &SubmissionRecord) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for field in self.required {
            let value = field.value(record).trim();
            let ok = match field {
                Field::Email => !value.is_empty() && is_valid_email(value),
                _ => !value.is_empty(),
            };
            if !ok {
                errors.push(field.error_message().to_owned());
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Minimal address grammar: a non-empty local part, a single `@`, and
/// a domain containing at least one interior dot. No whitespace.
#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
