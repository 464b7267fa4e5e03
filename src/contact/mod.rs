//! Contact form submission

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::MessageResponse;
use crate::error::{Error, FieldError};
use crate::fetch::Fetch;

/// A contact form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactMessage {
    /// Required-field validation, surfaced per field so a form can highlight
    /// exactly what is wrong.
    pub fn validate(&self) -> Result<(), Error> {
        let mut fields = Vec::new();

        if self.name.trim().is_empty() {
            fields.push(FieldError {
                field: "name".to_string(),
                message: "Name is required".to_string(),
            });
        }
        if self.email.trim().is_empty() {
            fields.push(FieldError {
                field: "email".to_string(),
                message: "Email is required".to_string(),
            });
        } else if !self.email.contains('@') || !self.email.contains('.') {
            fields.push(FieldError {
                field: "email".to_string(),
                message: "Email is invalid".to_string(),
            });
        }
        if self.message.trim().is_empty() {
            fields.push(FieldError {
                field: "message".to_string(),
                message: "Message is required".to_string(),
            });
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(Error::validation("contact form is incomplete", fields))
        }
    }
}

/// Client for the contact endpoint
#[derive(Debug, Clone)]
pub struct ContactClient {
    base_url: String,
    client: Client,
}

impl ContactClient {
    pub(crate) fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    /// Validate and submit a contact message
    pub async fn submit(&self, message: &ContactMessage) -> Result<MessageResponse, Error> {
        message.validate()?;
        let url = format!("{}/api/contact/submit", self.base_url);
        Fetch::post(&self.client, &url)
            .json(message)?
            .execute()
            .await
    }
}
