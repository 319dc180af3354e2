//! Project-wide constants.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

/// Asked when no question is given on the command line.
pub const DEFAULT_QUESTION: &str = "What is the latest research on large language models?";

/// Per-call timeout for the built-in chain adapters.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default database path: `~/.askchain/askchain.db`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(home.join(".askchain").join("askchain.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_question_is_the_sample() {
        assert_eq!(
            DEFAULT_QUESTION,
            "What is the latest research on large language models?"
        );
    }

    #[test]
    fn default_db_path_under_dot_dir() {
        if let Ok(path) = default_db_path() {
            assert!(path.ends_with(".askchain/askchain.db"));
        }
    }
}
