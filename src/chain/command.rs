use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{Chain, strip_newline};
use crate::consts::DEFAULT_TIMEOUT;
use crate::question::ValidatedQuestion;

/// Stderr beyond this many bytes is cut from error messages.
const MAX_STDERR_BYTES: usize = 4_000;

/// Environment variables passed through to the command. Everything else is stripped.
const SAFE_ENV_VARS: &[&str] = &[
    "PATH", "HOME", "USER", "SHELL", "LANG", "LC_ALL", "TERM", "TZ",
];

#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Shell command line, run with `sh -c`.
    pub command: String,
    /// Directory to run in. `None` inherits the current one.
    pub working_dir: Option<PathBuf>,
    pub timeout: Duration,
}

impl CommandConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            working_dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Hands the question to an external program: text on stdin, answer on stdout.
pub struct CommandChain {
    config: CommandConfig,
}

impl CommandChain {
    pub fn new(config: CommandConfig) -> Self {
        Self { config }
    }

    fn filtered_env() -> Vec<(String, String)> {
        SAFE_ENV_VARS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|val| (key.to_string(), val)))
            .collect()
    }

    fn truncate(text: &str, max_bytes: usize) -> &str {
        if text.len() <= max_bytes {
            return text;
        }
        let mut end = max_bytes;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }
}

#[async_trait]
impl Chain for CommandChain {
    type Output = String;

    async fn process(&self, question: ValidatedQuestion) -> Result<String> {
        let cmd = &self.config.command;
        if cmd.trim().is_empty() {
            bail!("chain command is empty");
        }
        debug!(command = %cmd, "spawning chain command");

        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(cmd)
            .env_clear()
            .envs(Self::filtered_env())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("failed to spawn chain command `{cmd}`"))?;

        // Feed stdin concurrently so a chatty command can't deadlock on a full pipe.
        let stdin = child.stdin.take();
        let input = question.into_text();
        let writer = tokio::spawn(async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(input.as_bytes()).await {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        });

        let output = match tokio::time::timeout(self.config.timeout, child.wait_with_output()).await
        {
            Ok(output) => output.context("failed to wait for chain command")?,
            Err(_) => bail!("chain command timed out after {:?}", self.config.timeout),
        };

        writer
            .await
            .context("stdin writer task failed")?
            .context("failed to write question to chain command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "chain command exited with code {}\nstderr: {}",
                output.status.code().unwrap_or(-1),
                Self::truncate(stderr.trim_end(), MAX_STDERR_BYTES)
            );
        }

        let stdout =
            String::from_utf8(output.stdout).context("chain command wrote non-UTF-8 output")?;
        Ok(strip_newline(stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(CommandChain::truncate("héllo", 2), "h");
        assert_eq!(CommandChain::truncate("short", 100), "short");
    }

    #[test]
    fn filtered_env_only_safe_vars() {
        for (key, _) in CommandChain::filtered_env() {
            assert!(SAFE_ENV_VARS.contains(&key.as_str()));
        }
    }

    #[test]
    fn config_defaults() {
        let config = CommandConfig::new("cat");
        assert_eq!(config.command, "cat");
        assert!(config.working_dir.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
