/// Priority tier derived from the submitter-selected urgency value.
///
/// Unrecognized values classify as [`Priority::Routine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    Emergency,
    Urgent,
    Soon,
    Routine,
}

impl Priority {
    #[must_use]
    pub fn from_urgency(urgency: &str) -> Self {
        match urgency.trim() {
            "emergency" => Self::Emergency,
            "urgent" => Self::Urgent,
            "soon" => Self::Soon,
            _ => Self::Routine,
        }
    }

    /// Subject-line marker used by front-desk staff for triage.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Emergency => "🔴 EMERGENCY",
            Self::Urgent => "🟡 URGENT",
            Self::Soon => "🟡 SOON",
            Self::Routine => "🟢 ROUTINE",
        }
    }
}
