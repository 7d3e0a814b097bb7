use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use services::PaymentDetails;
use services::checkout::DEFAULT_DELAY;
use study_core::model::{FolderId, ParseTierError, SubscriptionTier};

pub const DEFAULT_DB_URL: &str = "sqlite://studynotes.sqlite3";

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidDelay { raw: String },
    InvalidFolder { raw: String },
    InvalidTier(ParseTierError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --delay-ms value: {raw}"),
            ArgsError::InvalidFolder { raw } => write!(f, "invalid --folder value: {raw:?}"),
            ArgsError::InvalidTier(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_url: String,
    pub folder: FolderId,
    pub checkout_delay: Duration,
}

impl Config {
    /// Defaults overridden by `STUDY_*` variables read through `env`.
    fn from_env(env: impl Fn(&str) -> Option<String>) -> Result<Self, ArgsError> {
        let mut config = Self {
            db_url: DEFAULT_DB_URL.to_string(),
            folder: FolderId::new(services::DEFAULT_FOLDER_ID),
            checkout_delay: DEFAULT_DELAY,
        };
        if let Some(raw) = env("STUDY_DB_URL") {
            config.set_db_url(raw)?;
        }
        if let Some(raw) = env("STUDY_FOLDER") {
            config.set_folder(raw)?;
        }
        if let Some(raw) = env("STUDY_CHECKOUT_DELAY_MS") {
            config.set_delay(raw)?;
        }
        Ok(config)
    }

    fn set_db_url(&mut self, raw: String) -> Result<(), ArgsError> {
        if raw.trim().is_empty() {
            return Err(ArgsError::InvalidDbUrl { raw });
        }
        self.db_url = normalize_sqlite_url(raw);
        Ok(())
    }

    fn set_folder(&mut self, raw: String) -> Result<(), ArgsError> {
        self.folder = raw
            .parse()
            .map_err(|_| ArgsError::InvalidFolder { raw: raw.clone() })?;
        Ok(())
    }

    fn set_delay(&mut self, raw: String) -> Result<(), ArgsError> {
        let millis: u64 = raw
            .trim()
            .parse()
            .map_err(|_| ArgsError::InvalidDelay { raw: raw.clone() })?;
        self.checkout_delay = Duration::from_millis(millis);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Study,
    Tier(Option<SubscriptionTier>),
    Upgrade(PaymentDetails),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config: Config,
    pub command: Command,
}

/// Parse `args` (without the program name) on top of the environment.
///
/// Global flags may appear before or after the subcommand.
pub fn parse(
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Invocation, ArgsError> {
    let mut config = Config::from_env(env)?;
    let mut args = args.into_iter();
    let mut subcommand: Option<String> = None;
    let mut tier_arg: Option<String> = None;
    let mut payment = PaymentDetails::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => config.set_db_url(require_value(&mut args, "--db")?)?,
            "--folder" => config.set_folder(require_value(&mut args, "--folder")?)?,
            "--delay-ms" => config.set_delay(require_value(&mut args, "--delay-ms")?)?,
            "--card" if subcommand.as_deref() == Some("upgrade") => {
                payment.card_number = require_value(&mut args, "--card")?;
            }
            "--expiry" if subcommand.as_deref() == Some("upgrade") => {
                payment.expiry = require_value(&mut args, "--expiry")?;
            }
            "--cvv" if subcommand.as_deref() == Some("upgrade") => {
                payment.cvv = require_value(&mut args, "--cvv")?;
            }
            "--help" | "-h" => {
                return Ok(Invocation {
                    config,
                    command: Command::Help,
                });
            }
            flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
            _ if subcommand.is_none() => match arg.as_str() {
                "study" | "tier" | "upgrade" | "help" => subcommand = Some(arg),
                _ => return Err(ArgsError::UnknownCommand(arg)),
            },
            _ if subcommand.as_deref() == Some("tier") && tier_arg.is_none() => {
                tier_arg = Some(arg);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    let command = match subcommand.as_deref() {
        None | Some("study") => Command::Study,
        Some("tier") => Command::Tier(
            tier_arg
                .map(|raw| raw.parse::<SubscriptionTier>())
                .transpose()
                .map_err(ArgsError::InvalidTier)?,
        ),
        Some("upgrade") => Command::Upgrade(payment),
        _ => Command::Help,
    };

    Ok(Invocation { config, command })
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  studynotes [study] [--db <sqlite_url>] [--folder <id>]");
    eprintln!("  studynotes tier [free|premium] [--db <sqlite_url>]");
    eprintln!("  studynotes upgrade --card <number> --expiry <mm/yy> --cvv <nnn> [--delay-ms <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --folder {}", services::DEFAULT_FOLDER_ID);
    eprintln!("  --delay-ms {}", DEFAULT_DELAY.as_millis());
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_DB_URL, STUDY_FOLDER, STUDY_CHECKOUT_DELAY_MS, RUST_LOG");
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its directory exist before connecting.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}
