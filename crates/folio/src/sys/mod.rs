pub mod mailer;
pub mod runtime;
