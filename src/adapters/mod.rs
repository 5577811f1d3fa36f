pub mod audit;
pub mod mailer;
pub mod turnstile;
