pub fn run() -> anyhow::Result<()> {
    let config = super::load_config()?;
    let catalog = config.triage.catalog()?;

    println!("Context modes:");
    for mode in catalog.iter() {
        println!(
            "  {:<12} {:<12} {:<20} threshold {:.2}",
            mode.kind().as_str(),
            mode.name(),
            mode.filter_label(),
            mode.urgency_threshold()
        );
    }

    let registry = super::build_context(&config, None)?;
    let now = chrono::Local::now().format("%H:%M");
    match registry.resolve() {
        Some((source, mode)) => println!("\nActive at {}: {} (via {})", now, mode.name(), source),
        None => println!("\nActive at {}: none", now),
    }

    Ok(())
}
