use crate::cli::BatchArgs;
use crate::io;
use anyhow::Context;
use clarity_core::{Notification, RawMessage};
use std::collections::HashSet;
use std::path::Path;

pub fn run(file: Option<&Path>, args: &BatchArgs) -> anyhow::Result<()> {
    let records = io::read_messages_from(file).with_context(|| match file {
        Some(path) => format!("failed to read {}", path.display()),
        None => "failed to read stdin".to_string(),
    })?;

    if records.is_empty() {
        println!("No message records found");
        return Ok(());
    }

    super::run_batch(to_notifications(records), args)
}

/// Map records 1:1 into notifications. Records without an id get
/// `msg-<n>`, skipping any id another record in the batch already carries.
fn to_notifications(records: Vec<RawMessage>) -> Vec<Notification> {
    let mut taken: HashSet<String> = records.iter().filter_map(|r| r.id.clone()).collect();
    let mut next = 0usize;

    records
        .into_iter()
        .map(|raw| {
            raw.into_notification(|| loop {
                next += 1;
                let candidate = format!("msg-{}", next);
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
            })
        })
        .collect()
}
