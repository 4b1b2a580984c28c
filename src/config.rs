use std::path::PathBuf;

pub const LOG_FILE_VAR: &str = "RESUME_WIZARD_LOG";

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log destination while the terminal UI owns the screen.
    pub log_file: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(LOG_FILE_VAR).ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_vars(log_file: Option<String>, rust_log: Option<String>) -> Self {
        Config {
            log_file: log_file.filter(|p| !p.trim().is_empty()).map(PathBuf::from),
            rust_log: rust_log
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "info".to_string()),
        }
    }

    /// `--verbose` raises the level to debug.
    pub fn log_level(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            &self.rust_log
        }
    }
}
