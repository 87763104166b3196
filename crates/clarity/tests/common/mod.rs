#![allow(dead_code)]

use clarity_core::{
    ContextMode, MessageMeta, Notification, SourceType, TriageConfig, TriagePipeline,
};

pub fn sample_config() -> TriageConfig {
    TriageConfig {
        classify_delay_ms: 1500,
        arrival_interval_ms: 800,
        retry_delay_ms: 1000,
        ..TriageConfig::default()
    }
}

pub fn pipeline_in(mode: ContextMode) -> TriagePipeline {
    TriagePipeline::new(sample_config(), Box::new(mode)).unwrap()
}

pub fn notification(id: &str, source_type: SourceType, urgency: f64) -> Notification {
    Notification::new(id, source_type, "Sender", format!("{} content", id)).with_urgency(urgency)
}

pub fn email(id: &str, subject: &str, address: &str, unread: bool, important: bool) -> Notification {
    Notification::new(id, SourceType::Email, "Sender", subject).with_metadata(MessageMeta {
        is_unread: unread,
        is_important: important,
        subject_text: subject.to_string(),
        sender_address: address.to_string(),
    })
}
