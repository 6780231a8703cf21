use super::{ContactError, Credentials, EmailTransport, Field};
use chrono::{DateTime, Local};
use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn first_missing(&self) -> Option<Field> {
        Field::iter().find(|f| f.is_required() && self.get(*f).trim().is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Accepts `local@domain.tld`: one `@`, no whitespace, and a dotted domain
/// without empty labels.
pub fn is_valid_email(address: &str) -> bool {
    let address = address.trim();
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !address.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error(String),
}

/// Variables the EmailJS template renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub title: String,
    pub name: String,
    pub time: String,
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

pub struct ContactForm {
    pub fields: ContactFields,
    status: SubmitStatus,
    direct_email: String,
}

impl ContactForm {
    pub fn new(direct_email: impl Into<String>) -> Self {
        Self {
            fields: ContactFields::default(),
            status: SubmitStatus::Idle,
            direct_email: direct_email.into(),
        }
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == SubmitStatus::Sending
    }

    pub fn direct_email(&self) -> &str {
        &self.direct_email
    }

    pub fn set_direct_email(&mut self, direct_email: impl Into<String>) {
        self.direct_email = direct_email.into();
    }

    /// Validates the form and builds the request to send. Failures are
    /// recorded in the status and nothing should be sent.
    pub fn begin_submit(
        &mut self,
        credentials: &Credentials,
        sent_at: DateTime<Local>,
    ) -> Result<EmailRequest, ContactError> {
        if self.is_sending() {
            return Err(ContactError::Busy);
        }
        match self.build_request(credentials, sent_at) {
            Ok(request) => {
                self.status = SubmitStatus::Sending;
                Ok(request)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn build_request(
        &self,
        credentials: &Credentials,
        sent_at: DateTime<Local>,
    ) -> Result<EmailRequest, ContactError> {
        if let Some(field) = self.fields.first_missing() {
            return Err(ContactError::MissingField(field));
        }
        if !is_valid_email(&self.fields.email) {
            return Err(ContactError::InvalidEmail);
        }
        let creds = credentials.resolve()?;

        Ok(EmailRequest {
            service_id: creds.service_id.to_string(),
            template_id: creds.template_id.to_string(),
            user_id: creds.public_key.to_string(),
            template_params: TemplateParams {
                title: self.fields.subject.trim().to_string(),
                name: self.fields.full_name.trim().to_string(),
                time: sent_at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
                message: self.fields.message.clone(),
                email: self.fields.email.trim().to_string(),
            },
        })
    }

    /// Records the delivery outcome. A delivered message clears the fields.
    pub fn finish(&mut self, outcome: Result<(), ContactError>) {
        match outcome {
            Ok(()) => {
                self.status = SubmitStatus::Success;
                self.fields.clear();
            }
            Err(e) => self.fail(&e),
        }
    }

    fn fail(&mut self, error: &ContactError) {
        self.status = SubmitStatus::Error(error.user_message(&self.direct_email));
    }

    pub async fn submit<T: EmailTransport>(
        &mut self,
        transport: &T,
        credentials: &Credentials,
        sent_at: DateTime<Local>,
    ) -> &SubmitStatus {
        if let Ok(request) = self.begin_submit(credentials, sent_at) {
            let outcome = super::deliver(transport, &request).await;
            self.finish(outcome);
        }
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::emailjs::{DeliveryStatus, TransportError};
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct RecordingTransport {
        reply: Result<DeliveryStatus, String>,
        sent: Mutex<Vec<EmailRequest>>,
    }

    impl RecordingTransport {
        fn replying(code: u16, text: &str) -> Self {
            Self {
                reply: Ok(DeliveryStatus {
                    code,
                    text: text.to_string(),
                }),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: Err("Cannot connect to api.emailjs.com".to_string()),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<EmailRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl EmailTransport for RecordingTransport {
        async fn send(&self, request: &EmailRequest) -> Result<DeliveryStatus, TransportError> {
            self.sent.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(TransportError::Connection)
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new("me@example.com");
        form.fields.set(Field::FullName, "Ada Lovelace");
        form.fields.set(Field::Email, "ada@example.com");
        form.fields.set(Field::Subject, "Hello");
        form.fields.set(Field::Message, "Nice orbits.");
        form
    }

    fn sent_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[tokio::test]
    async fn test_successful_submit_clears_fields() {
        let transport = RecordingTransport::replying(200, "OK");
        let mut form = filled_form();

        let status = form
            .submit(&transport, &Credentials::new("svc", "tpl", "key"), sent_at())
            .await;

        assert_eq!(status, &SubmitStatus::Success);
        assert_eq!(form.fields, ContactFields::default());

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].service_id, "svc");
        assert_eq!(sent[0].user_id, "key");
        assert_eq!(sent[0].template_params.title, "Hello");
        assert_eq!(sent[0].template_params.name, "Ada Lovelace");
        assert_eq!(sent[0].template_params.time, "3/9/2024, 2:05:07 PM");
    }

    #[tokio::test]
    async fn test_missing_credentials_never_reach_transport() {
        let transport = RecordingTransport::replying(200, "OK");
        let mut form = filled_form();

        let status = form
            .submit(&transport, &Credentials::new("svc", "", "key"), sent_at())
            .await
            .clone();

        assert!(matches!(status, SubmitStatus::Error(ref msg) if msg.contains("credentials")));
        assert!(transport.sent().is_empty());
        assert_eq!(form.fields.subject, "Hello");
    }

    #[tokio::test]
    async fn test_provider_error_keeps_fields() {
        let transport = RecordingTransport::replying(400, "The public key is required");
        let mut form = filled_form();

        let status = form
            .submit(&transport, &Credentials::new("svc", "tpl", "key"), sent_at())
            .await
            .clone();

        assert_eq!(
            status,
            SubmitStatus::Error("Error: The public key is required".to_string())
        );
        assert_eq!(form.fields.full_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_network_failure_points_to_direct_contact() {
        let transport = RecordingTransport::unreachable();
        let mut form = filled_form();

        let status = form
            .submit(&transport, &Credentials::new("svc", "tpl", "key"), sent_at())
            .await
            .clone();

        let SubmitStatus::Error(msg) = status else {
            panic!("expected an error status");
        };
        assert!(msg.contains("me@example.com"));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn test_required_fields() {
        let mut form = filled_form();
        form.fields.set(Field::Message, "   ");
        let result = form.begin_submit(&Credentials::new("svc", "tpl", "key"), sent_at());
        assert_eq!(result, Err(ContactError::MissingField(Field::Message)));

        // phone stays optional
        let mut form = filled_form();
        form.fields.set(Field::Phone, "");
        assert!(
            form.begin_submit(&Credentials::new("svc", "tpl", "key"), sent_at())
                .is_ok()
        );
        assert!(form.is_sending());

        let again = form.begin_submit(&Credentials::new("svc", "tpl", "key"), sent_at());
        assert_eq!(again, Err(ContactError::Busy));
        assert!(form.is_sending());
    }

    #[test]
    fn test_email_shape() {
        let cases = vec![
            ("ada@example.com", true),
            ("  ada.l@mail.example.org ", true),
            ("ada", false),
            ("ada@", false),
            ("@example.com", false),
            ("ada@example", false),
            ("ada@example.", false),
            ("ada@@example.com", false),
            ("ada lovelace@example.com", false),
        ];

        for (address, ok) in cases {
            assert_eq!(is_valid_email(address), ok, "{address:?}");
        }
    }

    #[tokio::test]
    async fn test_malformed_email_is_reported_before_credentials() {
        let transport = RecordingTransport::replying(200, "OK");
        let mut form = filled_form();
        form.fields.set(Field::Email, "ada");

        let status = form
            .submit(&transport, &Credentials::default(), sent_at())
            .await
            .clone();

        assert_eq!(
            status,
            SubmitStatus::Error("Please enter a valid email address.".to_string())
        );
        assert!(transport.sent().is_empty());
        assert_eq!(form.fields.email, "ada");
    }

    #[test]
    fn test_request_serialization() {
        let mut form = filled_form();
        let request = form
            .begin_submit(&Credentials::new("svc", "tpl", "key"), sent_at())
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["template_id"], "tpl");
        assert_eq!(json["template_params"]["email"], "ada@example.com");
        assert_eq!(json["template_params"]["message"], "Nice orbits.");
    }
}
