use serde::Deserialize;
use std::borrow::Cow;

/// One contact-form submission as received from the browser.
///
/// The record is ephemeral: it exists for the duration of a single
/// request and is never persisted as a structured object. Optional
/// text fields default to the empty string; display defaults such as
/// "Not specified" are applied at render time, not here.
///
/// Unknown keys in either wire format are dropped.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub contact_method: String,
    pub contact_reason: String,
    pub urgency: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub referral_source: String,
    pub insurance: String,
    pub date_of_birth: String,
    /// Page the form was submitted from.
    pub page: String,
    pub services: Vec<String>,
    pub availability: Vec<String>,
    /// Honeypot field. Hidden from humans; bots fill every input.
    pub company: String,
    /// Epoch milliseconds captured when the form was rendered.
    pub start_time: FormTimestamp,
    #[serde(alias = "cf-turnstile-response")]
    pub turnstile_token: Option<String>,
}

impl SubmissionRecord {
    /// Builds a record from decoded `application/x-www-form-urlencoded`
    /// pairs. Repeated keys extend the list-valued fields; the
    /// bracketed spellings (`services[]`) some form markups emit are
    /// accepted as well. Unrecognized keys are ignored.
    pub fn from_form_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    {
        let mut record = Self::default();
        for (key, value) in pairs {
            let value = value.into_owned();
            match key.as_ref() {
                "firstName" => record.first_name = value,
                "lastName" => record.last_name = value,
                "email" => record.email = value,
                "phone" => record.phone = value,
                "message" => record.message = value,
                "contactMethod" => record.contact_method = value,
                "contactReason" => record.contact_reason = value,
                "urgency" => record.urgency = value,
                "preferredDate" => record.preferred_date = value,
                "preferredTime" => record.preferred_time = value,
                "referralSource" => record.referral_source = value,
                "insurance" => record.insurance = value,
                "dateOfBirth" => record.date_of_birth = value,
                "page" => record.page = value,
                "services" | "services[]" => record.services.push(value),
                "availability" | "availability[]" => record.availability.push(value),
                "company" => record.company = value,
                "startTime" => record.start_time = FormTimestamp::from_raw(value),
                "turnstileToken" | "cf-turnstile-response" => record.turnstile_token = Some(value),
                _ => {}
            }
        }
        record
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Raw `startTime` value. Clients send epoch milliseconds, but the
/// field may be absent, and form posts always deliver it as a string.
///
/// An absent or empty value counts as 0; a non-numeric value yields
/// `None`, which callers treat as "skip the elapsed-time check".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormTimestamp(Option<String>);

impl FormTimestamp {
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(Some(raw.into()))
    }

    #[must_use]
    pub fn epoch_millis(&self) -> Option<f64> {
        match self.0.as_deref().map(str::trim) {
            None | Some("") => Some(0.0),
            Some(raw) => raw.parse::<f64>().ok(),
        }
    }
}

impl<'de> Deserialize<'de> for FormTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RawVisitor;

        impl serde::de::Visitor<'_> for RawVisitor {
            type Value = FormTimestamp;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("an epoch-millisecond number or string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(FormTimestamp(Some(v.to_string())))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(FormTimestamp(Some(v.to_string())))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(FormTimestamp(Some(v.to_string())))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(FormTimestamp(Some(v.to_owned())))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(FormTimestamp(None))
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(FormTimestamp(None))
            }
        }

        deserializer.deserialize_any(RawVisitor)
    }
}
