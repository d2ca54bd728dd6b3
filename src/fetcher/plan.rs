//! Splitting a height range into bounded per-type queries

use crate::error::{ConfigError, Result};
use std::fmt;

/// One remote call: events of `event_type` in `start_height..=end_height`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventQuery {
    pub event_type: String,
    pub start_height: u64,
    pub end_height: u64,
}

impl EventQuery {
    /// Number of blocks covered, inclusive of both ends
    pub fn span(&self) -> u64 {
        self.end_height - self.start_height + 1
    }
}

impl fmt::Display for EventQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}..={}]",
            self.event_type, self.start_height, self.end_height
        )
    }
}

/// Ordered queries for one fetch
pub type QueryPlan = Vec<EventQuery>;

/// Split `start..=end` into consecutive sub-ranges of at most `max_span` blocks.
///
/// `start > end` gives no sub-ranges.
pub fn calculate_chunks(start: u64, end: u64, max_span: u64) -> Result<Vec<(u64, u64)>> {
    if max_span < 1 {
        return Err(ConfigError::InvalidMaxSpan(max_span).into());
    }

    let mut chunks = Vec::new();
    let mut current = start;

    while current <= end {
        let chunk_end = current.saturating_add(max_span - 1).min(end);
        chunks.push((current, chunk_end));
        if chunk_end == end {
            break;
        }
        current = chunk_end + 1;
    }

    Ok(chunks)
}

/// Expand a range and a list of event types into queries.
///
/// Sub-ranges ascend; within each sub-range the event types keep their input
/// order.
pub fn plan(event_types: &[String], start: u64, end: u64, max_span: u64) -> Result<QueryPlan> {
    let chunks = calculate_chunks(start, end, max_span)?;

    let mut queries = Vec::with_capacity(chunks.len() * event_types.len());
    for (from, to) in chunks {
        for event_type in event_types {
            queries.push(EventQuery {
                event_type: event_type.clone(),
                start_height: from,
                end_height: to,
            });
        }
    }

    Ok(queries)
}
