//! Nostr event payloads delivered to the webhook.
//!
//! Events are decoded per request, logged, and dropped. Nothing is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Nostr event as sent by the relay (NIP-01 wire shape).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NostrEvent {
    pub id: String,
    pub pubkey: String,
    /// Unix timestamp in seconds.
    pub created_at: i64,
    pub kind: u32,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    #[serde(default)]
    pub content: String,
    pub sig: String,
}

impl NostrEvent {
    /// Decode an event from a raw JSON request body.
    pub fn from_body(body: &[u8]) -> anyhow::Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// `created_at` as a UTC timestamp, or `None` when it is out of chrono's range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}
