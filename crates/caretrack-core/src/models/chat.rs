// ABOUTME: Team chat channels and the messages appended to them in the realtime store
// ABOUTME: Channel keys are display names with whitespace runs replaced by underscores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};

use crate::constants::realtime;

/// Realtime-store key for a channel display name
///
/// `"General Ward"` becomes `"General_Ward"`; a run of whitespace collapses to
/// a single underscore.
#[must_use]
pub fn channel_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                key.push('_');
            }
            in_whitespace = true;
        } else {
            key.push(c);
            in_whitespace = false;
        }
    }
    key
}

/// A chat channel addressed by its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatChannel {
    /// Name shown in the app
    pub name: String,
}

impl ChatChannel {
    /// Channel with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Key under `chat/`
    #[must_use]
    pub fn key(&self) -> String {
        channel_key(&self.name)
    }

    /// Messages on the urgent-alerts channel are flagged urgent
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        self.key() == realtime::URGENT_CHANNEL_KEY
    }

    /// Realtime-store path of the channel's message list
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", realtime::CHAT_ROOT, self.key())
    }
}

/// Message appended to `chat/{channelKey}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Message body
    pub text: String,
    /// Sender label
    pub sender: String,
    /// Sender identity id, empty for system messages
    pub sender_id: String,
    /// Shown as an alert when set
    pub is_urgent: bool,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ChatMessage {
    /// System-authored seed message for a channel
    #[must_use]
    pub fn seed_for(channel: &ChatChannel, timestamp_ms: i64) -> Self {
        Self {
            text: format!("Seed message for {}", channel.name),
            sender: "System".to_owned(),
            sender_id: String::new(),
            is_urgent: channel.is_urgent(),
            timestamp: timestamp_ms,
        }
    }
}
