use clarity_core::{
    scorer, ContextMode, MessageMeta, Notification, SourceType, TriageConfig, TriagePipeline,
    VirtualScheduler,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn batch(size: usize) -> Vec<Notification> {
    (0..size)
        .map(|i| {
            Notification::new(
                format!("n{}", i),
                SourceType::Email,
                "Client",
                "Re: Project timeline update",
            )
            .with_metadata(MessageMeta {
                is_unread: i % 2 == 0,
                is_important: i % 3 == 0,
                subject_text: "Re: Project timeline update".to_string(),
                sender_address: "john.davis@client.com".to_string(),
            })
        })
        .collect()
}

fn bench_score_message(c: &mut Criterion) {
    let meta = MessageMeta {
        is_unread: true,
        is_important: true,
        subject_text: "URGENT: Board meeting moved to 2pm today".to_string(),
        sender_address: "sarah@company.com".to_string(),
    };

    c.bench_function("score_message", |b| {
        b.iter(|| scorer::score_message(black_box(&meta)));
    });
}

fn bench_batch_100(c: &mut Criterion) {
    let notifications = batch(100);

    c.bench_function("triage_batch_100", |b| {
        b.iter(|| {
            let mut pipeline =
                TriagePipeline::new(TriageConfig::new(), Box::new(ContextMode::deep_focus()))
                    .unwrap();
            let mut scheduler = VirtualScheduler::new();
            scheduler.schedule_all(pipeline.ingest_batch(black_box(notifications.clone())));
            scheduler.run_until_idle(&mut pipeline);
            black_box(pipeline.stats().deferred_count)
        });
    });
}

criterion_group!(benches, bench_score_message, bench_batch_100);
criterion_main!(benches);
