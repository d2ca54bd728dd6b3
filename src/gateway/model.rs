use serde::{Deserialize, Serialize};

/// Events emitted in a single block.
///
/// The fetcher treats `events` as opaque; only `height` is used, for the
/// optional final sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEvents {
    pub block_id: String,
    pub height: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub events: Vec<Event>,
}

/// A single emitted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub transaction_id: String,
    pub transaction_index: u32,
    pub event_index: u32,
    /// Encoded payload exactly as returned by the node
    pub payload: String,
}

impl BlockEvents {
    pub fn new(block_id: impl Into<String>, height: u64) -> Self {
        Self {
            block_id: block_id.into(),
            height,
            timestamp: None,
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
