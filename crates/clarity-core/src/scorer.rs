//! Heuristic urgency scoring for message-like notifications
//!
//! Additive and deterministic: base 0.3, +0.3 important, +0.2 unread, +0.3 for
//! an urgent keyword in the subject, -0.3 for an automated sender, clamped to
//! `[0, 1]`.

use crate::types::{MessageMeta, Notification};

pub const BASE_SCORE: f64 = 0.3;
pub const IMPORTANT_BOOST: f64 = 0.3;
pub const UNREAD_BOOST: f64 = 0.2;
pub const KEYWORD_BOOST: f64 = 0.3;
pub const AUTOMATED_PENALTY: f64 = 0.3;

/// Case-insensitive substrings that mark a subject as time-sensitive
pub const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "important",
    "critical",
    "emergency",
    "re:",
    "fwd:",
];

const AUTOMATED_SENDER_MARKERS: &[&str] = &["noreply", "no-reply"];

pub fn has_urgent_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    URGENT_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn is_automated_sender(address: &str) -> bool {
    let lower = address.to_lowercase();
    AUTOMATED_SENDER_MARKERS.iter().any(|m| lower.contains(m))
}

/// Clamp into `[0, 1]`; NaN counts as zero urgency.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Score a message from its attributes
pub fn score_message(meta: &MessageMeta) -> f64 {
    let mut score = BASE_SCORE;

    if meta.is_important {
        score += IMPORTANT_BOOST;
    }
    if meta.is_unread {
        score += UNREAD_BOOST;
    }
    if has_urgent_keyword(&meta.subject_text) {
        score += KEYWORD_BOOST;
    }
    if is_automated_sender(&meta.sender_address) {
        score -= AUTOMATED_PENALTY;
    }

    clamp_score(score)
}

/// Urgency for any notification: the precomputed value when present,
/// otherwise derived from metadata (or from the content when there is none).
pub fn score_notification(notification: &Notification) -> f64 {
    if let Some(raw) = notification.raw_urgency {
        return clamp_score(raw);
    }

    match &notification.metadata {
        Some(meta) if !meta.subject_text.is_empty() => score_message(meta),
        Some(meta) => score_message(&MessageMeta {
            subject_text: notification.content.clone(),
            ..meta.clone()
        }),
        None => score_message(&MessageMeta {
            subject_text: notification.content.clone(),
            ..MessageMeta::default()
        }),
    }
}
