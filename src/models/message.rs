use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{MessageCategory, Sender};

/// One conversational turn as shown on the display surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: NaiveDateTime,
    /// Present on bot messages only.
    pub category: Option<MessageCategory>,
}

impl Message {
    pub fn user(id: u64, text: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            text: text.to_string(),
            sender: Sender::User,
            timestamp,
            category: None,
        }
    }

    pub fn bot(id: u64, text: String, category: MessageCategory, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            text,
            sender: Sender::Bot,
            timestamp,
            category: Some(category),
        }
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}
