/// A fully rendered outbound email, ready for delivery.
///
/// Derived deterministically from a validated submission; never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}
