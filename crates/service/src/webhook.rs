//! Best-effort notification of an external enrichment workflow after intake.

use std::time::Duration;

use prepdesk_core::{IntakeOutcome, ProspectId, WEBHOOK_TIMEOUT_SECS};
use serde::Serialize;
use tokio::task::JoinHandle;

/// Header the enrichment workflow authenticates on.
pub const WEBHOOK_TOKEN_HEADER: &str = "x-make-apikey";

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    event: &'static str,
    data: WebhookData<'a>,
}

#[derive(Debug, Serialize)]
struct WebhookData<'a> {
    #[serde(rename = "prospectId")]
    prospect_id: ProspectId,
    email: &'a str,
    country: &'a str,
    product_interest: &'a str,
    message: Option<&'a str>,
}

/// Fires a POST per intake on a detached task. Failures are logged and dropped.
#[derive(Clone, Debug)]
pub struct EnrichmentNotifier {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl EnrichmentNotifier {
    /// `None` when the client cannot be built; intake then runs without notifications.
    pub fn new(url: String, token: Option<String>) -> Option<Self> {
        match reqwest::Client::builder().timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS)).build() {
            Ok(client) => Some(Self { client, url, token }),
            Err(e) => {
                tracing::warn!(error = %e, "enrichment webhook client unavailable, notifications disabled");
                None
            },
        }
    }

    /// Spawn the notification. The handle is only awaited by tests.
    pub fn notify(&self, outcome: &IntakeOutcome) -> JoinHandle<()> {
        let prospect = &outcome.prospect;
        let payload = WebhookPayload {
            event: if outcome.created { "prospect_created" } else { "prospect_updated" },
            data: WebhookData {
                prospect_id: prospect.id,
                email: &prospect.email,
                country: &prospect.country,
                product_interest: prospect.product_interest.as_str(),
                message: prospect.message.as_deref(),
            },
        };
        let body = serde_json::to_value(&payload);
        let prospect_id = prospect.id;
        let this = self.clone();

        tokio::spawn(async move {
            let body = match body {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(prospect_id = %prospect_id, error = %e, "webhook payload not serializable");
                    return;
                },
            };
            let mut request = this.client.post(&this.url).json(&body);
            if let Some(token) = &this.token {
                request = request.header(WEBHOOK_TOKEN_HEADER, token);
            }
            match request.send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!(prospect_id = %prospect_id, "enrichment webhook delivered");
                },
                Ok(resp) => {
                    tracing::warn!(prospect_id = %prospect_id, status = resp.status().as_u16(), "enrichment webhook rejected");
                },
                Err(e) => {
                    tracing::warn!(prospect_id = %prospect_id, error = %e, "enrichment webhook failed");
                },
            }
        })
    }
}
