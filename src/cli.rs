//! Command-line surface. `main` parses, sets up logging and calls [`run`].

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::ValidatedQuestion;
use crate::config::{ChainOverrides, ChainSettings, Config, KNOWN_KEYS};
use crate::consts::{DEFAULT_QUESTION, default_db_path};
use crate::flow::Flow;

#[derive(Parser)]
#[command(
    name = "askchain",
    version,
    about = "Validate a question and hand it to an external chain."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Question text (defaults to a sample question)
    pub question: Option<String>,

    /// Question as a JSON document; must be a JSON string
    #[arg(long, conflicts_with = "question")]
    pub json: Option<String>,

    /// Shell command that reads the question on stdin and answers on stdout
    #[arg(short, long = "command", conflicts_with = "url")]
    pub chain_command: Option<String>,

    /// HTTP endpoint that receives the question as a JSON string
    #[arg(short, long)]
    pub url: Option<String>,

    /// Chain timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Working directory for the chain command
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// SQLite database path for stored settings
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage stored chain settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a stored value
    Get { key: String },
    /// Store a value
    Set { key: String, value: String },
    /// Remove a stored value
    Unset { key: String },
    /// Print all stored values
    List,
}

/// Execute a parsed command line, writing user-facing output to `out`.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    if let Some(Command::Config { action }) = cli.command {
        let path = match cli.db {
            Some(path) => path,
            None => default_db_path()?.to_string_lossy().into_owned(),
        };
        return handle_config(&Config::open(&path)?, action, out);
    }

    let question = match (cli.json, cli.question) {
        (Some(raw), _) => ValidatedQuestion::from_json(&raw)?,
        (None, Some(text)) => ValidatedQuestion::new(text),
        (None, None) => ValidatedQuestion::new(DEFAULT_QUESTION),
    };

    let config = stored_settings(cli.db.as_deref())?;
    let overrides = ChainOverrides {
        command: cli.chain_command,
        url: cli.url,
        timeout_secs: cli.timeout,
        workdir: cli.workdir,
    };
    let settings = ChainSettings::resolve(overrides, &config)?;
    info!(chain = ?settings.target, "chain selected");

    Flow::new(settings.build()?).run_to(question, out).await
}

/// Stored settings for an ask. Read-only: asking never creates the database.
fn stored_settings(db: Option<&str>) -> Result<Config> {
    match db {
        Some(path) => Config::open_existing(path),
        None => match default_db_path() {
            Ok(path) => Config::open_existing(&path.to_string_lossy()),
            Err(e) => {
                warn!("ignoring stored settings: {e:#}");
                Config::open(":memory:")
            }
        },
    }
}

fn handle_config<W: Write>(config: &Config, action: ConfigAction, out: &mut W) -> Result<()> {
    match action {
        ConfigAction::Get { key } => match config.get(&key)? {
            Some(value) => writeln!(out, "{}", value)?,
            None => bail!("{} is not set", key),
        },
        ConfigAction::Set { key, value } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                bail!("unknown key `{}`; expected one of: {}", key, KNOWN_KEYS.join(", "));
            }
            config.set(&key, &value)?;
            writeln!(out, "✓ {} = {}", key, value)?;
        }
        ConfigAction::Unset { key } => {
            config.remove(&key)?;
            writeln!(out, "✓ {} removed", key)?;
        }
        ConfigAction::List => {
            for (key, value) in config.list()? {
                writeln!(out, "{} = {}", key, value)?;
            }
        }
    }
    out.flush().context("failed to flush output")
}
