//! Mapping raw message records into notifications

use crate::types::{MessageMeta, Notification, SourceType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static FROM_HEADER_RE: OnceLock<Regex> = OnceLock::new();

/// A message record as delivered by a mail integration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sender: String,
    #[serde(default, alias = "senderEmail")]
    pub sender_address: String,
    /// Raw `From` header, used when sender fields are missing
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub is_unread: bool,
    #[serde(default)]
    pub is_important: bool,
}

impl RawMessage {
    /// Parse one JSON record
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Map 1:1 into an email notification. `fallback_id` is used when the
    /// record carries no id of its own.
    pub fn into_notification(self, fallback_id: impl FnOnce() -> String) -> Notification {
        let (mut sender, mut sender_address) = (self.sender, self.sender_address);
        if let Some(from) = self.from.as_deref() {
            if sender.is_empty() || sender_address.is_empty() {
                let (name, address) = split_from_header(from);
                if sender.is_empty() {
                    sender = name;
                }
                if sender_address.is_empty() {
                    sender_address = address;
                }
            }
        }

        let id = self.id.unwrap_or_else(fallback_id);
        let metadata = MessageMeta {
            is_unread: self.is_unread,
            is_important: self.is_important,
            subject_text: self.subject.clone(),
            sender_address,
        };

        Notification::new(id, SourceType::Email, sender, self.subject).with_metadata(metadata)
    }
}

/// Split a `From` header like `"Sarah Chen" <sarah@company.com>` into
/// display name and address. A bare address is used for both.
pub fn split_from_header(from: &str) -> (String, String) {
    let re = FROM_HEADER_RE.get_or_init(|| Regex::new(r"^\s*(.*?)\s*<(.+?)>").unwrap());

    match re.captures(from) {
        Some(caps) => {
            let address = caps[2].trim().to_string();
            let name = caps[1].replace('"', "").trim().to_string();
            if name.is_empty() {
                (address.clone(), address)
            } else {
                (name, address)
            }
        }
        None => {
            let bare = from.trim().to_string();
            (bare.clone(), bare)
        }
    }
}
