use std::env;
use std::fs::File;
use std::str::FromStr;
use std::time::Duration;

use dotenv::dotenv;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};
use url::Url;

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug)]
pub struct Config {
    api_base_url: Url,
    api_token: Option<String>,
    connect_timeout: Duration,
    timeout: Duration,
}

impl Config {
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url: with_trailing_slash(api_base_url),
            api_token: None,
            connect_timeout: Duration::from_secs(2),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            api_token: Some(token.into()),
            ..self
        }
    }

    pub fn env() -> Result<Self> {
        dotenv().ok();

        let raw_url = env::var("API_BASE_URL").map_err(|_| Error::MissingVar("API_BASE_URL"))?;
        let api_base_url = Url::parse(&raw_url)?;

        let mut config = Self::new(api_base_url);
        config.api_token = env::var("API_TOKEN").ok().filter(|t| !t.is_empty());
        config.connect_timeout = secs_var("HTTP_CONNECT_TIMEOUT", config.connect_timeout)?;
        config.timeout = secs_var("HTTP_TIMEOUT", config.timeout)?;

        Ok(config)
    }

    pub const fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Url::join drops the last path segment unless the base ends with '/'
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn secs_var(name: &'static str, default: Duration) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| Error::InvalidVar(name, raw)),
        Err(_) => Ok(default),
    }
}

pub fn init_logger() -> Result<()> {
    dotenv().ok();

    let rust_log = env::var("RUST_LOG").unwrap_or("info".into());
    let level = LevelFilter::from_str(&rust_log).unwrap_or(LevelFilter::Info);
    let log_file = env::var("SERVICE_NAME")
        .map(|pkg| format!("{pkg}.log"))
        .unwrap_or("messenger_ui.log".into());

    CombinedLogger::init(vec![
        TermLogger::new(
            level,
            simplelog::Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level, simplelog::Config::default(), File::create(log_file)?),
    ])?;

    Ok(())
}

pub fn init_http_client(config: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.timeout)
        .build()?;

    Ok(client)
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} must be set")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),

    #[error(transparent)]
    _Url(#[from] url::ParseError),
    #[error(transparent)]
    _Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    _Io(#[from] std::io::Error),
    #[error(transparent)]
    _Logger(#[from] log::SetLoggerError),
}
