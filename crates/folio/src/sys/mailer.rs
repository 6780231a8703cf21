use crate::contact::{self, ContactError, EmailJsClient, EmailRequest};
use crate::events::AppEvent;
use async_channel::{Receiver, Sender};

/// Delivers contact form messages one at a time and reports each outcome.
pub async fn run_mail_worker(jobs: Receiver<EmailRequest>, tx: Sender<AppEvent>) {
    let client = match EmailJsClient::new() {
        Ok(c) => Some(c),
        Err(e) => {
            log::error!("Failed to create email client: {}", e);
            None
        }
    };

    while let Ok(request) = jobs.recv().await {
        let outcome = match &client {
            Some(client) => contact::deliver(client, &request).await,
            None => Err(ContactError::Network("email client unavailable".to_string())),
        };

        match &outcome {
            Ok(()) => log::info!(
                "Delivered message '{}' via service {}",
                request.template_params.title,
                request.service_id
            ),
            Err(e) => log::error!("EmailJS delivery failed: {}", e),
        }

        if tx.send(AppEvent::Delivered(outcome)).await.is_err() {
            break;
        }
    }
}
