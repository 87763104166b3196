use clarity_core::{scorer, Classifier, MessageMeta, SourceType};

pub fn run(
    subject: &str,
    sender_address: Option<&str>,
    unread: bool,
    important: bool,
) -> anyhow::Result<()> {
    let meta = MessageMeta {
        is_unread: unread,
        is_important: important,
        subject_text: subject.to_string(),
        sender_address: sender_address.unwrap_or_default().to_string(),
    };
    let score = scorer::score_message(&meta);

    println!("Urgency: {:.2} ({:.0}%)", score, (score * 100.0).round());
    if scorer::has_urgent_keyword(subject) {
        println!("  + urgent keyword in subject");
    }
    if scorer::is_automated_sender(&meta.sender_address) {
        println!("  - automated sender");
    }

    let config = super::load_config()?;
    let catalog = config.triage.catalog()?;
    let classifier = Classifier::new(config.triage.calendar_bar);

    println!();
    for mode in catalog.iter() {
        let verdict = classifier.decide(SourceType::Email, score, &mode);
        println!(
            "  {:<12} threshold {:.2}  {:?}",
            mode.name(),
            mode.urgency_threshold(),
            verdict
        );
    }

    Ok(())
}
