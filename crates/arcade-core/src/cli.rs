use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::event::{Branch, Category};
use crate::schedule::Day;

#[derive(Debug, Clone)]
pub struct PreprocessedArgs {
    pub cleaned_args: Vec<OsString>,
    pub rc_overrides: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(Self {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            }),
            _ => Err(anyhow!("override must look like KEY=VALUE: {s}")),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "arcade",
    version,
    about = "Arcade: fest event catalogue browser",
    disable_help_subcommand = true,
    arg_required_else_help = false
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "arcaderc")]
    pub arcaderc: Option<PathBuf>,

    #[arg(long = "events")]
    pub events: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    List {
        #[arg(long, value_name = "BRANCH",
              value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<Branch>()))]
        branch: Option<Branch>,

        #[arg(long, value_name = "DAY",
              value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<Day>()))]
        day: Option<Day>,

        #[arg(long, value_name = "CATEGORY",
              value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<Category>()))]
        category: Option<Category>,
    },
    Search { query: String },
    Branches,
    Days,
    Categories,
    Info { id: u64 },
    Export {
        #[arg(long, value_name = "BRANCH",
              value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<Branch>()))]
        branch: Option<Branch>,

        #[arg(long, value_name = "DAY",
              value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<Day>()))]
        day: Option<Day>,

        #[arg(long, value_name = "CATEGORY",
              value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<Category>()))]
        category: Option<Category>,
    },
    Config,
}

pub fn default_command(cfg: &Config) -> anyhow::Result<Command> {
    let name = cfg
        .get("default.command")
        .unwrap_or_else(|| "list".to_string());

    match name.as_str() {
        "list" => Ok(Command::List {
            branch: None,
            day: None,
            category: None,
        }),
        "branches" => Ok(Command::Branches),
        "days" => Ok(Command::Days),
        "categories" => Ok(Command::Categories),
        "config" => Ok(Command::Config),
        other => Err(anyhow!("unsupported default.command: {other}")),
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let fallback = match (quiet, verbose) {
        (2.., _) => "error",
        (1, _) => "warn",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|err| anyhow!("bad log filter: {err}"))?;

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .is_err()
    {
        debug!("a tracing subscriber is already installed");
    }

    Ok(())
}

fn split_rc_override(arg: &str) -> Option<(String, String)> {
    let rest = arg.strip_prefix("rc.")?;
    let (key, value) = rest
        .split_once('=')
        .or_else(|| rest.split_once(':'))?;
    Some((format!("rc.{key}"), value.to_string()))
}

#[tracing::instrument(skip_all)]
pub fn preprocess_args(raw: &[OsString]) -> anyhow::Result<PreprocessedArgs> {
    let mut cleaned = Vec::with_capacity(raw.len());
    let mut overrides = Vec::new();

    for (idx, arg) in raw.iter().enumerate() {
        if idx > 0
            && let Some((key, value)) = split_rc_override(&arg.to_string_lossy())
        {
            debug!(key = %key, value = %value, "captured rc override");
            overrides.push((key, value));
            continue;
        }
        cleaned.push(arg.clone());
    }

    Ok(PreprocessedArgs {
        cleaned_args: cleaned,
        rc_overrides: overrides,
    })
}
