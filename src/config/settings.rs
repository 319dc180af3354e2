//! Resolving which chain to use from CLI overrides and stored config.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::time::Duration;

use super::{Config, KEY_COMMAND, KEY_TIMEOUT_SECS, KEY_URL, KEY_WORKDIR};
use crate::chain::DynChain;
use crate::chain::command::{CommandChain, CommandConfig};
use crate::chain::http::HttpChain;
use crate::consts::DEFAULT_TIMEOUT;

/// Values given on the command line. Each one beats its stored counterpart.
#[derive(Debug, Clone, Default)]
pub struct ChainOverrides {
    pub command: Option<String>,
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub workdir: Option<PathBuf>,
}

/// Where the question goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainTarget {
    Command(String),
    Http(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSettings {
    pub target: ChainTarget,
    pub timeout: Duration,
    /// Only used by the command chain.
    pub working_dir: Option<PathBuf>,
}

impl ChainSettings {
    pub fn resolve(overrides: ChainOverrides, config: &Config) -> Result<Self> {
        let target = match (overrides.command, overrides.url) {
            (Some(_), Some(_)) => bail!("give either a chain command or a chain url, not both"),
            (Some(command), None) => ChainTarget::Command(command),
            (None, Some(url)) => ChainTarget::Http(url),
            (None, None) => match (config.get(KEY_COMMAND)?, config.get(KEY_URL)?) {
                (Some(_), Some(_)) => bail!(
                    "both {KEY_COMMAND} and {KEY_URL} are set; remove one with `askchain config unset`"
                ),
                (Some(command), None) => ChainTarget::Command(command),
                (None, Some(url)) => ChainTarget::Http(url),
                (None, None) => bail!(
                    "no chain configured. Pass --command or --url, or run \
                     `askchain config set {KEY_COMMAND} <cmd>`"
                ),
            },
        };

        let timeout = match overrides.timeout_secs {
            Some(secs) => secs_to_timeout(secs)?,
            None => match config.get(KEY_TIMEOUT_SECS)? {
                Some(raw) => {
                    let secs = raw
                        .trim()
                        .parse::<u64>()
                        .with_context(|| format!("invalid {KEY_TIMEOUT_SECS}: `{raw}`"))?;
                    secs_to_timeout(secs).with_context(|| format!("invalid {KEY_TIMEOUT_SECS}"))?
                }
                None => DEFAULT_TIMEOUT,
            },
        };

        let working_dir = match overrides.workdir {
            Some(dir) => Some(dir),
            None => config.get(KEY_WORKDIR)?.map(PathBuf::from),
        };

        Ok(Self {
            target,
            timeout,
            working_dir,
        })
    }

    /// Construct the chain these settings describe.
    pub fn build(self) -> Result<DynChain> {
        match self.target {
            ChainTarget::Command(command) => Ok(Box::new(CommandChain::new(CommandConfig {
                command,
                working_dir: self.working_dir,
                timeout: self.timeout,
            }))),
            ChainTarget::Http(url) => Ok(Box::new(HttpChain::with_timeout(url, self.timeout)?)),
        }
    }
}

fn secs_to_timeout(secs: u64) -> Result<Duration> {
    if secs == 0 {
        bail!("timeout must be at least one second");
    }
    Ok(Duration::from_secs(secs))
}
