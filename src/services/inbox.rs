//! Sample conversations with contacted manufacturers.

use crate::domain::ManufacturerId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub from_me: bool,
}

/// Conversation threads keyed by manufacturer
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    threads: HashMap<ManufacturerId, Vec<Message>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a thread with the contact request as its first message.
    /// An existing thread gets the request appended instead.
    pub fn open_thread(&mut self, manufacturer: ManufacturerId, request: String) {
        self.threads.entry(manufacturer).or_default().push(Message {
            content: request,
            sent_at: Utc::now(),
            from_me: true,
        });
    }

    /// Append an outgoing message. Blank text is ignored.
    pub fn send(&mut self, manufacturer: ManufacturerId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.threads.entry(manufacturer).or_default().push(Message {
            content: text.to_string(),
            sent_at: Utc::now(),
            from_me: true,
        });
        true
    }

    pub fn thread(&self, manufacturer: ManufacturerId) -> &[Message] {
        self.threads
            .get(&manufacturer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
