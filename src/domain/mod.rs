pub mod message;
pub mod priority;
pub mod submission;
