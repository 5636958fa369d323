use std::{
    env,
    net::{AddrParseError, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use thiserror::Error;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_EVENTS_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

const ENV_LISTEN_ADDR: &str = "GAME_SERVER_ADDR";
const ENV_EVENTS_URL: &str = "GAME_EVENTS_URL";
const ENV_EVENTS_FILE: &str = "GAME_EVENTS_FILE";
const ENV_DEFAULT_ROUNDS: &str = "GAME_DEFAULT_ROUNDS";
const ENV_FETCH_TIMEOUT: &str = "GAME_FETCH_TIMEOUT_SECS";
const ENV_HISTORY_OUTPUT: &str = "GAME_HISTORY_OUTPUT";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub events_url: String,
    /// When set, events are read from this JSON file instead of `events_url`.
    pub events_file: Option<PathBuf>,
    pub default_rounds: usize,
    pub fetch_timeout: Duration,
    pub history_output: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GAME_SERVER_ADDR is not a valid socket address: {0}")]
    InvalidListenAddr(#[source] AddrParseError),
    #[error("GAME_EVENTS_URL must be an http(s) URL")]
    InvalidEventsUrl,
    #[error("GAME_DEFAULT_ROUNDS must be a positive integer")]
    InvalidDefaultRounds,
    #[error("GAME_FETCH_TIMEOUT_SECS must be a positive integer")]
    InvalidFetchTimeout,
    #[error("{0} must not be empty or whitespace")]
    EmptyPath(&'static str),
    #[error("{0} contains non-unicode data")]
    NonUnicode(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match read_env(ENV_LISTEN_ADDR)? {
            Some(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(ConfigError::InvalidListenAddr)?,
        };

        let events_url = match read_env(ENV_EVENTS_URL)? {
            Some(value) => {
                let value = value.trim().trim_end_matches('/').to_owned();
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(ConfigError::InvalidEventsUrl);
                }
                value
            }
            None => DEFAULT_EVENTS_URL.to_owned(),
        };

        let default_rounds = parse_positive_env(
            ENV_DEFAULT_ROUNDS,
            game_model::DEFAULT_ROUNDS as u64,
            ConfigError::InvalidDefaultRounds,
        )? as usize;

        let fetch_timeout = Duration::from_secs(parse_positive_env(
            ENV_FETCH_TIMEOUT,
            DEFAULT_FETCH_TIMEOUT_SECS,
            ConfigError::InvalidFetchTimeout,
        )?);

        Ok(Self {
            listen_addr,
            events_url,
            events_file: parse_path_env(ENV_EVENTS_FILE)?,
            default_rounds,
            fetch_timeout,
            history_output: parse_path_env(ENV_HISTORY_OUTPUT)?,
        })
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode(key)),
    }
}

fn parse_positive_env(
    key: &'static str,
    default_value: u64,
    invalid_error: ConfigError,
) -> Result<u64, ConfigError> {
    match read_env(key)? {
        Some(value) => match value.trim().parse::<u64>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(invalid_error),
        },
        None => Ok(default_value),
    }
}

fn parse_path_env(key: &'static str) -> Result<Option<PathBuf>, ConfigError> {
    match read_env(key)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath(key)),
        Some(value) => Ok(Some(PathBuf::from(value))),
        None => Ok(None),
    }
}
