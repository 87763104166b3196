//! Path resolution for clarity files

use std::path::PathBuf;

/// Overrides the default `~/.clarity` directory
pub const HOME_ENV: &str = "CLARITY_HOME";

/// Resolves standard paths for clarity files
#[derive(Debug, Clone)]
pub struct Paths {
    pub home: PathBuf,
}

impl Paths {
    pub fn new() -> std::io::Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self {
                home: PathBuf::from(dir),
            });
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self {
            home: home.join(".clarity"),
        })
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.json")
    }
}
