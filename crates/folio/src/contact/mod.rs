//! Contact form state and email delivery.

pub mod emailjs;
pub mod form;

pub use emailjs::{DeliveryStatus, EmailJsClient, EmailTransport, TransportError};
pub use form::{ContactFields, ContactForm, EmailRequest, SubmitStatus, TemplateParams};

use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum Field {
    #[strum(serialize = "full name")]
    FullName,
    #[strum(serialize = "email address")]
    Email,
    #[strum(serialize = "phone number")]
    Phone,
    #[strum(serialize = "subject")]
    Subject,
    #[strum(serialize = "message")]
    Message,
}

impl Field {
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Phone)
    }
}

/// EmailJS identifiers. All three must be present before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Credentials with every identifier present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredentials<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub public_key: &'a str,
}

impl Credentials {
    pub fn new(service_id: &str, template_id: &str, public_key: &str) -> Self {
        Self {
            service_id: Some(service_id.to_string()),
            template_id: Some(template_id.to_string()),
            public_key: Some(public_key.to_string()),
        }
    }

    pub fn resolve(&self) -> Result<ResolvedCredentials<'_>, ContactError> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }

        match (
            present(&self.service_id),
            present(&self.template_id),
            present(&self.public_key),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Ok(ResolvedCredentials {
                service_id,
                template_id,
                public_key,
            }),
            _ => Err(ContactError::MissingCredentials),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContactError {
    #[error("Email delivery credentials are missing. Please check your configuration.")]
    MissingCredentials,
    #[error("Please fill in your {0}.")]
    MissingField(Field),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Provider rejected the message ({status}): {text}")]
    Provider { status: u16, text: String },
    #[error("Delivery failed: {0}")]
    Network(String),
    #[error("A message is already being sent.")]
    Busy,
}

impl From<TransportError> for ContactError {
    fn from(e: TransportError) -> Self {
        Self::Network(e.to_string())
    }
}

impl ContactError {
    /// Text shown under the form.
    pub fn user_message(&self, direct_email: &str) -> String {
        match self {
            Self::Provider { text, .. } if !text.trim().is_empty() => {
                format!("Error: {}", text.trim())
            }
            Self::Provider { .. } | Self::Network(_) => format!(
                "Failed to send message. Please try again or contact me directly at {}",
                direct_email
            ),
            Self::MissingCredentials | Self::MissingField(_) | Self::InvalidEmail | Self::Busy => {
                self.to_string()
            }
        }
    }
}

/// Sends one request and maps the provider's answer. Only status 200 counts
/// as delivered; nothing is retried.
pub async fn deliver<T: EmailTransport>(
    transport: &T,
    request: &EmailRequest,
) -> Result<(), ContactError> {
    let status = transport.send(request).await?;
    if status.code == 200 {
        Ok(())
    } else {
        Err(ContactError::Provider {
            status: status.code,
            text: status.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_all_three() {
        let cases = vec![
            (Credentials::default(), false),
            (Credentials::new("svc", "tpl", ""), false),
            (Credentials::new("svc", "  ", "key"), false),
            (
                Credentials {
                    service_id: None,
                    ..Credentials::new("svc", "tpl", "key")
                },
                false,
            ),
            (Credentials::new("svc", "tpl", "key"), true),
        ];

        for (credentials, ok) in cases {
            assert_eq!(credentials.resolve().is_ok(), ok, "{credentials:?}");
        }
    }

    #[test]
    fn test_user_messages() {
        let direct = "me@example.com";

        let provider = ContactError::Provider {
            status: 400,
            text: "The template ID is invalid".to_string(),
        };
        assert_eq!(
            provider.user_message(direct),
            "Error: The template ID is invalid"
        );

        let silent = ContactError::Provider {
            status: 500,
            text: String::new(),
        };
        assert!(silent.user_message(direct).ends_with(direct));
        assert!(
            ContactError::Network("timed out".into())
                .user_message(direct)
                .contains(direct)
        );
        assert!(
            ContactError::MissingCredentials
                .user_message(direct)
                .contains("credentials are missing")
        );
        assert_eq!(
            ContactError::MissingField(Field::Subject).user_message(direct),
            "Please fill in your subject."
        );
        assert_eq!(
            ContactError::InvalidEmail.user_message(direct),
            "Please enter a valid email address."
        );
    }
}
