pub mod config;
pub mod emails;
pub mod modes;
pub mod score;
pub mod simulate;
pub mod triage;
pub mod version;

use crate::cli::BatchArgs;
use crate::config::AppConfig;
use crate::paths::Paths;
use clarity::LiveDriver;
use clarity_context::{CalendarSource, ContextRegistry, ManualOverride, TimeOfDaySource};
use clarity_core::{
    ContextMode, ModeKind, Notification, RouteOutcome, Stats, Step, TriageEntry, TriagePipeline,
    VirtualScheduler,
};
use serde::Serialize;
use tracing::debug;

/// Load the config from the standard location
pub fn load_config() -> anyhow::Result<AppConfig> {
    let paths = Paths::new()?;
    AppConfig::load(&paths.config_file())
}

/// Override (if any), then calendar, then time of day
pub fn build_context(
    config: &AppConfig,
    forced: Option<ModeKind>,
) -> anyhow::Result<ContextRegistry> {
    let catalog = config.triage.catalog()?;
    let mut registry = ContextRegistry::new();

    if let Some(kind) = forced.or(config.default_mode) {
        registry.register(Box::new(ManualOverride::with_mode(catalog.get(kind))));
    }
    registry.register(Box::new(CalendarSource::new(&catalog, config.calendar.clone())));
    registry.register(Box::new(TimeOfDaySource::new(catalog)));

    debug!(sources = ?registry.names(), "Context chain ready");
    Ok(registry)
}

/// Mode in effect at the start of a batch
#[derive(Debug, Clone, Serialize)]
pub struct ActiveMode {
    pub source: String,
    pub mode: ContextMode,
}

/// Run notifications through a fresh pipeline and print the outcome
pub fn run_batch(notifications: Vec<Notification>, args: &BatchArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    let registry = build_context(&config, args.mode)?;
    let active = registry.resolve().map(|(source, mode)| ActiveMode {
        source: source.to_string(),
        mode,
    });

    let mut pipeline = TriagePipeline::new(config.triage.clone(), Box::new(registry))?;

    if args.instant {
        let mut scheduler = VirtualScheduler::new();
        scheduler.schedule_all(pipeline.ingest_batch(notifications));
        scheduler.run_until_idle(&mut pipeline);
        print_report(&pipeline, active.as_ref(), args.json)
    } else {
        run_live(pipeline, notifications, active.as_ref(), args.json)
    }
}

fn run_live(
    pipeline: TriagePipeline,
    notifications: Vec<Notification>,
    active: Option<&ActiveMode>,
    json: bool,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let (driver, mut events) = LiveDriver::new(pipeline);
        driver.start_batch(notifications).await;

        let idle = driver.wait_idle();
        tokio::pin!(idle);

        loop {
            tokio::select! {
                Some(step) = events.recv() => {
                    if !json {
                        driver.with_pipeline(|p| print_step(p, &step)).await;
                    }
                }
                _ = &mut idle => break,
            }
        }
        while let Ok(step) = events.try_recv() {
            if !json {
                driver.with_pipeline(|p| print_step(p, &step)).await;
            }
        }

        driver
            .with_pipeline(|p| print_report(p, active, json))
            .await
    })
}

fn print_step(pipeline: &TriagePipeline, step: &Step) {
    match step {
        Step::Admitted(admission) => {
            if let Some(entry) = pipeline.entry(admission.handle) {
                let n = entry.notification();
                println!("  ↓ {} [{}] {}: {}", entry.handle(), n.source_type, n.sender, n.content);
            }
        }
        Step::Route(RouteOutcome::Routed { handle, verdict }) => {
            println!("  → {} {:?}", handle, verdict);
        }
        Step::Route(RouteOutcome::Held { retry }) => {
            if let Some(handle) = retry.handle() {
                println!("  … {} waiting for a context mode", handle);
            }
        }
        Step::Rejected(err) => println!("  ✗ {}", err),
        Step::Route(RouteOutcome::Unknown(_)) | Step::Stale { .. } => {}
    }
}

#[derive(Serialize)]
struct Report<'a> {
    mode: Option<&'a ActiveMode>,
    incoming: &'a [TriageEntry],
    urgent: &'a [TriageEntry],
    deferred: &'a [TriageEntry],
    stats: &'a Stats,
}

fn report<'a>(pipeline: &'a TriagePipeline, active: Option<&'a ActiveMode>) -> Report<'a> {
    Report {
        mode: active,
        incoming: pipeline.incoming(),
        urgent: pipeline.urgent(),
        deferred: pipeline.deferred(),
        stats: pipeline.stats(),
    }
}

pub fn print_report(
    pipeline: &TriagePipeline,
    active: Option<&ActiveMode>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report(pipeline, active))?);
        return Ok(());
    }

    match active {
        Some(active) => println!(
            "\nContext: {} ({}) via {}",
            active.mode.name(),
            active.mode.filter_label(),
            active.source
        ),
        None => println!("\nContext: unresolved"),
    }

    print_lane("Urgent", pipeline.urgent());
    print_lane("Digest", pipeline.deferred());
    if !pipeline.incoming().is_empty() {
        print_lane("Still incoming", pipeline.incoming());
    }

    let stats = pipeline.stats();
    println!(
        "\nDeferred: {}  Decisions handled: {}  Focus hours: {:.1}",
        stats.deferred_count, stats.decisions_handled, stats.focus_hours
    );
    Ok(())
}

fn print_lane(title: &str, entries: &[TriageEntry]) {
    println!("\n{} ({})", title, entries.len());
    for entry in entries {
        let n = entry.notification();
        let score = entry
            .score()
            .map(|s| format!("{:>3.0}%", s * 100.0))
            .unwrap_or_else(|| "   -".to_string());
        println!("  {} [{}] {}: {}", score, n.source_type, n.sender, n.content);
        if let Some(classification) = entry.classification() {
            println!("        {}", classification.rationale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use clarity_context::CalendarWindow;
    use clarity_core::{ContextSource, SourceType, TriageConfig};

    #[test]
    fn test_forced_mode_wins() {
        let config = AppConfig::default();
        let registry = build_context(&config, Some(ModeKind::InMeeting)).unwrap();

        let (source, mode) = registry.resolve().unwrap();
        assert_eq!(source, "manual");
        assert_eq!(mode.kind(), ModeKind::InMeeting);
    }

    #[test]
    fn test_default_mode_from_config() {
        let config = AppConfig {
            default_mode: Some(ModeKind::DeepFocus),
            ..Default::default()
        };
        let registry = build_context(&config, None).unwrap();
        assert_eq!(registry.resolve().map(|(s, _)| s), Some("manual"));

        // The command line beats the config file
        let registry = build_context(&config, Some(ModeKind::Available)).unwrap();
        assert_eq!(
            registry.current_mode().map(|m| m.kind()),
            Some(ModeKind::Available)
        );
    }

    #[test]
    fn test_chain_without_override() {
        let registry = build_context(&AppConfig::default(), None).unwrap();
        // Empty calendar is disabled, so only the clock remains
        assert_eq!(registry.names(), vec!["time-of-day"]);
        assert!(registry.current_mode().is_some());
    }

    #[test]
    fn test_chain_with_calendar() {
        let config = AppConfig {
            calendar: vec![CalendarWindow::new(
                NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(0, 0, 1).unwrap(),
            )],
            ..Default::default()
        };
        let registry = build_context(&config, None).unwrap();
        assert_eq!(registry.names(), vec!["calendar", "time-of-day"]);
    }

    #[test]
    fn test_custom_thresholds_reach_the_override() {
        let mut config = AppConfig::default();
        config.triage.thresholds.deep_focus = 0.6;

        let registry = build_context(&config, Some(ModeKind::DeepFocus)).unwrap();
        assert_eq!(
            registry.current_mode().map(|m| m.urgency_threshold()),
            Some(0.6)
        );
    }

    #[test]
    fn test_json_report_shape() {
        let mode = ContextMode::deep_focus();
        let mut pipeline = TriagePipeline::new(TriageConfig::new(), Box::new(mode)).unwrap();
        let mut scheduler = VirtualScheduler::new();
        scheduler.schedule_all(pipeline.ingest_batch(vec![
            Notification::new("ceo", SourceType::Email, "CEO", "Urgent: Q4 review meeting moved")
                .with_urgency(0.95),
            Notification::new("news", SourceType::Email, "Newsletter", "Your daily tech digest")
                .with_urgency(0.15),
        ]));
        scheduler.run_until_idle(&mut pipeline);

        let active = ActiveMode {
            source: "fixed".to_string(),
            mode,
        };
        let value = serde_json::to_value(report(&pipeline, Some(&active))).unwrap();

        assert_eq!(value["mode"]["source"], "fixed");
        assert_eq!(value["mode"]["mode"]["name"], "Deep Focus");
        assert_eq!(value["mode"]["mode"]["urgency_threshold"], 0.8);

        assert_eq!(value["incoming"].as_array().unwrap().len(), 0);
        let urgent = value["urgent"].as_array().unwrap();
        assert_eq!(urgent.len(), 1);
        assert_eq!(urgent[0]["notification"]["id"], "ceo");
        assert_eq!(urgent[0]["stage"], "ROUTED");
        assert_eq!(urgent[0]["score"], 0.95);
        assert_eq!(urgent[0]["classification"]["verdict"], "URGENT");
        assert_eq!(
            urgent[0]["classification"]["rationale"],
            "High urgency (95%) + sender importance"
        );

        let deferred = value["deferred"].as_array().unwrap();
        assert_eq!(deferred.len(), 1);
        assert_eq!(deferred[0]["classification"]["verdict"], "DEFERRED");

        assert_eq!(value["stats"]["deferred_count"], 1);
        assert_eq!(value["stats"]["decisions_handled"], 0);
        assert_eq!(value["stats"]["focus_hours"], 0.0);
    }

    #[test]
    fn test_json_report_without_mode() {
        let pipeline =
            TriagePipeline::new(TriageConfig::new(), Box::new(ContextMode::available())).unwrap();
        let value = serde_json::to_value(report(&pipeline, None)).unwrap();

        assert!(value["mode"].is_null());
        assert_eq!(value["urgent"].as_array().unwrap().len(), 0);
    }
}
