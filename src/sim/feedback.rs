//! Transient feedback messages
//!
//! At most one message is visible at a time. A new post supersedes the current one;
//! otherwise it is cleared once its display lifetime runs out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    Correct,
    TryAgain,
    Encourage,
    /// Neutral announcement (instructions, "your turn", phase names)
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub seq: u64,
    pub kind: FeedbackKind,
    pub message: String,
    pub issued_at_ms: u64,
    pub expires_at_ms: u64,
}

impl FeedbackEvent {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackChannel {
    current: Option<FeedbackEvent>,
    next_seq: u64,
}

impl FeedbackChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a message, replacing whatever is showing
    pub fn post(
        &mut self,
        kind: FeedbackKind,
        message: impl Into<String>,
        now_ms: u64,
        ttl_ms: u32,
    ) -> FeedbackEvent {
        self.next_seq += 1;
        let event = FeedbackEvent {
            seq: self.next_seq,
            kind,
            message: message.into(),
            issued_at_ms: now_ms,
            expires_at_ms: now_ms + ttl_ms as u64,
        };
        self.current = Some(event.clone());
        event
    }

    /// Clear the current message if its lifetime has run out
    pub fn expire(&mut self, now_ms: u64) -> Option<FeedbackEvent> {
        if self.current.as_ref().is_some_and(|f| f.is_expired(now_ms)) {
            return self.current.take();
        }
        None
    }

    pub fn current(&self) -> Option<&FeedbackEvent> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) -> Option<FeedbackEvent> {
        self.current.take()
    }
}
