// Webhook notification sink
// Discord-style embed payloads over reqwest with bounded retries. Delivery
// is fire-and-forget from the cycles' point of view: state never waits on it.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use backend_domain::ports::NotificationSink;
use backend_domain::{
    DeliveryRecord,
    NotificationMessage,
    SinkUnconfigured,
    DELIVERY_STATUS_DELIVERED,
    DELIVERY_STATUS_FAILED,
};

use crate::utils::{current_millis, millis_to_rfc3339};

const DELIVERY_RING_CAPACITY: usize = 200;

pub struct WebhookNotifySink {
    client: Client,
    webhook_url: Option<String>,
    retry_attempts: u32,
    retry_backoff_ms: u64,
    deliveries: Mutex<VecDeque<DeliveryRecord>>,
}

impl WebhookNotifySink {
    pub fn new(
        webhook_url: Option<String>,
        timeout_seconds: u64,
        retry_attempts: u32,
        retry_backoff_ms: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(1)))
            .build()?;
        Ok(Self {
            client,
            webhook_url,
            retry_attempts: retry_attempts.max(1),
            retry_backoff_ms,
            deliveries: Mutex::new(VecDeque::with_capacity(DELIVERY_RING_CAPACITY)),
        })
    }

    fn build_payload(message: &NotificationMessage) -> serde_json::Value {
        let fields: Vec<serde_json::Value> = message
            .fields
            .iter()
            .map(|field| {
                json!({
                    "name": field.name,
                    "value": field.value,
                    "inline": true,
                })
            })
            .collect();
        json!({
            "embeds": [{
                "title": message.title,
                "description": message.description,
                "color": message.color,
                "fields": fields,
                "timestamp": millis_to_rfc3339(message.timestamp_millis),
            }]
        })
    }

    async fn post_once(&self, url: &str, payload: &serde_json::Value) -> Result<()> {
        self.client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn record(&self, record: DeliveryRecord) {
        let mut ring = self.deliveries.lock().await;
        if ring.len() == DELIVERY_RING_CAPACITY {
            ring.pop_front();
        }
        ring.push_back(record);
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifySink {
    fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn deliver(&self, message: &NotificationMessage) -> Result<()> {
        let Some(url) = &self.webhook_url else {
            return Err(SinkUnconfigured.into());
        };
        let payload = Self::build_payload(message);

        let mut attempts = 0u8;
        let mut last_error = None;
        for attempt in 0..self.retry_attempts {
            attempts = attempts.saturating_add(1);
            match self.post_once(url, &payload).await {
                Ok(()) => {
                    self.record(DeliveryRecord {
                        id: Uuid::new_v4().to_string(),
                        timestamp_ms: current_millis(),
                        title: message.title.clone(),
                        status: DELIVERY_STATUS_DELIVERED.to_string(),
                        attempts,
                        error: None,
                    })
                    .await;
                    return Ok(());
                }
                Err(err) => {
                    warn!(
                        "webhook delivery attempt {}/{} failed: {}",
                        attempt + 1,
                        self.retry_attempts,
                        err
                    );
                    last_error = Some(err);
                    if attempt + 1 < self.retry_attempts {
                        let backoff = self.retry_backoff_ms.saturating_mul(1 << attempt.min(6));
                        tokio::time::sleep(Duration::from_millis(backoff)).await;
                    }
                }
            }
        }

        let err = last_error.unwrap_or_else(|| anyhow::anyhow!("webhook delivery failed"));
        self.record(DeliveryRecord {
            id: Uuid::new_v4().to_string(),
            timestamp_ms: current_millis(),
            title: message.title.clone(),
            status: DELIVERY_STATUS_FAILED.to_string(),
            attempts,
            error: Some(err.to_string()),
        })
        .await;
        Err(err)
    }

    async fn check_target(&self) -> Result<()> {
        let Some(url) = &self.webhook_url else {
            return Err(SinkUnconfigured.into());
        };
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("webhook responded {}", response.status());
        }
        Ok(())
    }

    async fn list_deliveries(&self, limit: usize) -> Vec<DeliveryRecord> {
        let ring = self.deliveries.lock().await;
        ring.iter().rev().take(limit).cloned().collect()
    }

    async fn last_delivery(&self) -> Option<DeliveryRecord> {
        self.deliveries.lock().await.back().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> NotificationMessage {
        NotificationMessage::new("Vehicle lost", "BPC_Dirtbike (Destroyed)", 0xE74C3C, 0)
            .with_field("Vehicle ID", "4242")
    }

    #[test]
    fn embed_payload_carries_title_fields_and_timestamp() {
        let payload = WebhookNotifySink::build_payload(&message());
        let embed = &payload["embeds"][0];
        assert_eq!(embed["title"], "Vehicle lost");
        assert_eq!(embed["fields"][0]["name"], "Vehicle ID");
        assert_eq!(embed["fields"][0]["value"], "4242");
        assert_eq!(embed["timestamp"], "1970-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn unconfigured_sink_refuses_delivery() {
        let sink = WebhookNotifySink::new(None, 1, 1, 0).expect("sink builds");
        assert!(!sink.is_configured());
        let err = sink.deliver(&message()).await.expect_err("no target");
        assert!(err.downcast_ref::<SinkUnconfigured>().is_some());
    }

    #[tokio::test]
    async fn failed_deliveries_are_recorded_with_attempt_counts() {
        // nothing listens on this port; every attempt errors fast
        let sink = WebhookNotifySink::new(
            Some("http://127.0.0.1:9/webhook".to_string()),
            1,
            2,
            1,
        )
        .expect("sink builds");

        let result = sink.deliver(&message()).await;
        assert!(result.is_err());

        let last = sink.last_delivery().await.expect("recorded");
        assert_eq!(last.status, DELIVERY_STATUS_FAILED);
        assert_eq!(last.attempts, 2);
        assert!(last.error.is_some());
        assert_eq!(sink.list_deliveries(10).await.len(), 1);
    }
}
