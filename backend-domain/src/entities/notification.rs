// Notification entities
// Neutral outbound message shape; the sink maps it to the webhook wire format

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub fields: Vec<NotificationField>,
    pub color: u32,
    pub timestamp_millis: i64,
}

impl NotificationMessage {
    pub fn new(title: &str, description: &str, color: u32, timestamp_millis: i64) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            fields: Vec::new(),
            color,
            timestamp_millis,
        }
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.push(NotificationField {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub id: String,
    pub timestamp_ms: i64,
    pub title: String,
    pub status: String,
    pub attempts: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub const DELIVERY_STATUS_DELIVERED: &str = "DELIVERED";
pub const DELIVERY_STATUS_FAILED: &str = "FAILED";
