pub mod embed;

use anyhow::{Context, Result};
use reqwest::{
    IntoUrl, StatusCode, Url,
    blocking::{Client, Response},
};
use serde::Serialize;

use crate::{FormData, discord::embed::Embed};

#[derive(Debug, Clone)]
pub struct WebhookClient {
    http_client: Client,
    url: Url,
}

#[derive(Debug, Clone, Serialize)]
struct WebhookRequest<'a> {
    embeds: [&'a Embed; 1],
}

/// How a submission ended, short of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// No webhook URL was given, nothing was sent.
    MissingUrl,
    Sent,
    Rejected(StatusCode),
}

impl Submission {
    /// The status text to show for a rejected request.
    #[must_use]
    pub fn reason(self) -> Option<&'static str> {
        match self {
            Self::Rejected(status) => Some(status.canonical_reason().unwrap_or("Unknown Status")),
            Self::MissingUrl | Self::Sent => None,
        }
    }
}

impl WebhookClient {
    pub fn with_client(http_client: Client, webhook_url: impl IntoUrl) -> Result<Self> {
        let url = webhook_url.into_url().context("Invalid WebHook URL")?;
        Ok(Self { http_client, url })
    }

    /// Posts `{"embeds": [embed]}` once. There is no retry.
    ///
    /// # Errors
    /// The request could not be sent or no response arrived.
    pub fn send_embed(&self, embed: &Embed) -> Result<Submission> {
        log::info!("Sending embed to {}", self.url);
        let body = WebhookRequest { embeds: [embed] };
        let resp: Response = self
            .http_client
            .post(self.url.clone())
            .json(&body)
            .send()
            .with_context(|| format!("Could not send POST request to {}", self.url))?;
        Ok(handle_response(resp))
    }
}

/// Sends the embed of `data` to its webhook URL.
///
/// Nothing goes over the network if the URL is blank.
pub fn submit(data: &FormData) -> Result<Submission> {
    submit_with(Client::new(), data)
}

pub fn submit_with(http_client: Client, data: &FormData) -> Result<Submission> {
    let url = data.webhook_url.trim();
    if url.is_empty() {
        log::warn!("Refusing to send without a webhook URL");
        return Ok(Submission::MissingUrl);
    }
    WebhookClient::with_client(http_client, url)?.send_embed(&data.embed)
}

fn handle_response(response: Response) -> Submission {
    let status: StatusCode = response.status();
    if status.is_success() {
        log::info!("Webhook accepted the embed ({status})");
        return Submission::Sent;
    }

    match response.text() {
        Ok(text) => log::warn!("Webhook rejected the embed with status {status}: {text}"),
        Err(err) => log::warn!("Webhook rejected the embed with status {status}: <{err}>"),
    }
    Submission::Rejected(status)
}
