mod common;

use clarity_core::{ContextMode, RouteOutcome, SourceType, Stage, Step, Verdict, VirtualScheduler};
use common::{email, notification, pipeline_in};
use std::time::Duration;

#[test]
fn test_deep_focus_urgent_and_deferred() {
    let mut pipeline = pipeline_in(ContextMode::deep_focus());
    let mut scheduler = VirtualScheduler::new();

    scheduler.schedule_all(pipeline.ingest_batch(vec![
        notification("ceo", SourceType::Email, 0.95),
        notification("marketing", SourceType::Email, 0.3),
    ]));
    scheduler.run_until_idle(&mut pipeline);

    assert_eq!(pipeline.urgent().len(), 1);
    let urgent = &pipeline.urgent()[0];
    assert_eq!(urgent.notification().id, "ceo");
    assert_eq!(urgent.stage(), Stage::Routed);
    assert!(urgent.classification().unwrap().rationale.contains("95%"));

    assert_eq!(pipeline.deferred().len(), 1);
    assert_eq!(
        pipeline.deferred()[0].classification().unwrap().rationale,
        "Below urgency threshold for Deep Focus mode"
    );
    assert_eq!(pipeline.stats().deferred_count, 1);
}

#[test]
fn test_calendar_in_available_mode() {
    let mut pipeline = pipeline_in(ContextMode::available());
    let handle = pipeline
        .admit(notification("standup", SourceType::Calendar, 0.75))
        .unwrap()
        .handle;

    assert_eq!(
        pipeline.classify_and_route(handle),
        RouteOutcome::Routed {
            handle,
            verdict: Verdict::Urgent
        }
    );
}

#[test]
fn test_calendar_bar_in_meeting() {
    let mut pipeline = pipeline_in(ContextMode::in_meeting());
    let reminder = pipeline
        .admit(notification("reminder", SourceType::Calendar, 0.85))
        .unwrap()
        .handle;
    let client = pipeline
        .admit(notification("client", SourceType::Email, 0.85))
        .unwrap()
        .handle;

    pipeline.classify_and_route(reminder);
    pipeline.classify_and_route(client);

    assert_eq!(pipeline.urgent()[0].handle(), reminder);
    assert_eq!(pipeline.deferred()[0].handle(), client);
}

#[test]
fn test_scored_email_reaches_full_urgency() {
    let mut pipeline = pipeline_in(ContextMode::in_meeting());
    let handle = pipeline
        .admit(email(
            "timeline",
            "Re: timeline",
            "john.davis@client.com",
            true,
            true,
        ))
        .unwrap()
        .handle;

    pipeline.classify_and_route(handle);
    assert_eq!(pipeline.entry(handle).unwrap().score(), Some(1.0));
    assert_eq!(pipeline.urgent().len(), 1);
}

#[test]
fn test_noreply_email_is_deferred_while_focused() {
    let mut pipeline = pipeline_in(ContextMode::deep_focus());
    let handle = pipeline
        .admit(email(
            "github",
            "Pull request merged",
            "NoReply@github.com",
            false,
            false,
        ))
        .unwrap()
        .handle;

    pipeline.classify_and_route(handle);
    assert_eq!(pipeline.entry(handle).unwrap().score(), Some(0.0));
    assert_eq!(pipeline.deferred().len(), 1);
}

#[test]
fn test_reset_before_classification_leaves_nothing() {
    let mut pipeline = pipeline_in(ContextMode::available());
    let mut scheduler = VirtualScheduler::new();

    for i in 0..5 {
        let admission = pipeline
            .admit(notification(&format!("n{}", i), SourceType::Chat, 0.9))
            .unwrap();
        scheduler.schedule(admission.classify);
    }
    assert_eq!(pipeline.incoming().len(), 5);

    pipeline.reset_batch();
    let steps = scheduler.run_until_idle(&mut pipeline);

    assert_eq!(steps.len(), 5);
    assert!(steps.iter().all(|s| matches!(s, Step::Stale { .. })));
    assert!(pipeline.incoming().is_empty());
    assert!(pipeline.urgent().is_empty());
    assert!(pipeline.deferred().is_empty());
    assert_eq!(pipeline.stats().deferred_count, 0);
}

#[test]
fn test_reset_mid_batch_then_new_batch() {
    let mut pipeline = pipeline_in(ContextMode::available());
    let mut scheduler = VirtualScheduler::new();

    scheduler.schedule_all(pipeline.ingest_batch(vec![
        notification("old-1", SourceType::Chat, 0.9),
        notification("old-2", SourceType::Chat, 0.9),
    ]));
    scheduler.advance(Duration::from_millis(100), &mut pipeline);

    let generation = pipeline.reset_batch();
    scheduler.cancel_before(generation);
    scheduler.schedule_all(
        pipeline.ingest_batch(vec![notification("new", SourceType::Chat, 0.2)]),
    );
    scheduler.run_until_idle(&mut pipeline);

    assert!(pipeline.urgent().is_empty());
    let ids: Vec<_> = pipeline
        .deferred()
        .iter()
        .map(|e| e.notification().id.as_str())
        .collect();
    assert_eq!(ids, vec!["new"]);
}

#[test]
fn test_entry_lives_in_exactly_one_lane() {
    let mut pipeline = pipeline_in(ContextMode::deep_focus());
    let mut scheduler = VirtualScheduler::new();

    let urgencies = [0.95, 0.9, 0.3, 0.2, 0.4, 0.5, 0.75, 0.85, 0.15, 0.25];
    scheduler.schedule_all(pipeline.ingest_batch(
        urgencies
            .iter()
            .enumerate()
            .map(|(i, u)| notification(&format!("n{}", i), SourceType::App, *u)),
    ));

    while !scheduler.is_empty() {
        scheduler.advance(Duration::from_millis(100), &mut pipeline);
        let total = pipeline.incoming().len() + pipeline.urgent().len() + pipeline.deferred().len();
        let mut handles: Vec<_> = pipeline
            .incoming()
            .iter()
            .chain(pipeline.urgent())
            .chain(pipeline.deferred())
            .map(|e| e.handle())
            .collect();
        handles.sort();
        handles.dedup();
        assert_eq!(handles.len(), total);

        assert!(pipeline.incoming().iter().all(|e| e.stage() == Stage::Incoming));
        assert!(pipeline
            .urgent()
            .iter()
            .chain(pipeline.deferred())
            .all(|e| e.stage() == Stage::Routed));
    }

    assert_eq!(pipeline.urgent().len(), 3);
    assert_eq!(pipeline.deferred().len(), 7);
}
