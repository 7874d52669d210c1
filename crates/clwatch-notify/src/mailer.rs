//! Transactional-mail delivery over the Brevo-style HTTP API.

use serde::Serialize;

use clwatch_feed::Listing;

use crate::error::NotifyError;
use crate::render::{render_html, render_text};

const DEFAULT_BASE_URL: &str = "https://api.brevo.com";
const SUBJECT: &str = "Craigslist Post Matches";

/// Mail client. Use [`Mailer::new`] for production or
/// [`Mailer::with_base_url`] to point at a mock server in tests.
pub struct Mailer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    sender_name: String,
    sender_email: String,
}

#[derive(Serialize)]
struct Party<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MailPayload<'a> {
    sender: Party<'a>,
    to: Vec<Party<'a>>,
    subject: &'a str,
    text_content: String,
    html_content: String,
}

impl Mailer {
    /// Creates a mailer pointed at the production mail API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        sender_name: &str,
        sender_email: &str,
    ) -> Result<Self, NotifyError> {
        Self::with_base_url(api_key, sender_name, sender_email, DEFAULT_BASE_URL)
    }

    /// Creates a mailer with a custom API base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        sender_name: &str,
        sender_email: &str,
        base_url: &str,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            sender_name: sender_name.to_owned(),
            sender_email: sender_email.to_owned(),
        })
    }

    /// Sends one message carrying both the plaintext and the HTML rendering
    /// of the new listings.
    ///
    /// The caller invokes this only after the dedup state has been persisted;
    /// a delivery failure therefore never causes a listing to be re-reported
    /// as new on a later run.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] on network failure or
    /// [`NotifyError::Api`] if the API answers with a non-success status.
    pub async fn send_new_listings(
        &self,
        user: &str,
        email: &str,
        listings: &[Listing],
    ) -> Result<(), NotifyError> {
        let payload = MailPayload {
            sender: Party {
                name: &self.sender_name,
                email: &self.sender_email,
            },
            to: vec![Party { name: user, email }],
            subject: SUBJECT,
            text_content: render_text(user, listings),
            html_content: render_html(user, listings),
        };

        let response = self
            .client
            .post(format!("{}/v3/smtp/email", self.base_url))
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(count = listings.len(), to = %email, "sent new-listing digest");
        Ok(())
    }
}
