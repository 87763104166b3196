use crate::config::AppConfig;
use crate::paths::Paths;

pub fn run_show() -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let path = paths.config_file();
    let config = AppConfig::load(&path)?;

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn run_init(force: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let path = paths.config_file();

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save(&path)?;
    println!("✓ Wrote default configuration to {}", path.display());
    Ok(())
}
