use std::env;
use std::time::Duration;

use chrono::{Datelike, Utc};

use crate::error::{Error, Result};
use crate::linkedin::session::{SessionConfig, DEFAULT_API_BASE_URL, DEFAULT_SITE_BASE_URL};
use crate::models::YearMonth;

/// How the session gets its cookies.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Raw `name=value; name=value` cookie string from an existing browser session.
    Cookies(String),
    Password { username: String, password: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Option<Credentials>,
    pub api_base_url: String,
    pub site_base_url: String,
    pub proxy: Option<String>,
    pub evasion_min_secs: u64,
    pub evasion_max_secs: u64,
    pub row_delay: Duration,
    pub open_end: OpenEnd,
}

/// End bound used for positions that are still ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenEnd {
    CurrentMonth,
    Fixed(YearMonth),
}

impl OpenEnd {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("current") {
            return Ok(OpenEnd::CurrentMonth);
        }

        let (year, month) = value
            .split_once('-')
            .ok_or_else(|| Error::Config(format!("expected YYYY-MM or 'current', got '{}'", value)))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Error::Config(format!("invalid year in '{}'", value)))?;
        let month: u32 = month
            .parse()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| Error::Config(format!("invalid month in '{}'", value)))?;

        Ok(OpenEnd::Fixed(YearMonth::new(Some(month), year)))
    }

    pub fn resolve(&self) -> YearMonth {
        match self {
            OpenEnd::CurrentMonth => {
                let today = Utc::now().date_naive();
                YearMonth::new(Some(today.month()), today.year())
            }
            OpenEnd::Fixed(ym) => *ym,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let credentials = match (
            non_empty_var("LINKEDIN_COOKIES"),
            non_empty_var("LINKEDIN_USERNAME"),
            non_empty_var("LINKEDIN_PASSWORD"),
        ) {
            (Some(cookies), _, _) => Some(Credentials::Cookies(cookies)),
            (None, Some(username), Some(password)) => Some(Credentials::Password { username, password }),
            (None, Some(_), None) => {
                return Err(Error::Config(
                    "LINKEDIN_PASSWORD environment variable not set".to_string(),
                ))
            }
            _ => None,
        };

        let api_base_url = env::var("LINKEDIN_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let site_base_url = env::var("LINKEDIN_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SITE_BASE_URL.to_string());

        let proxy = non_empty_var("LINKEDIN_PROXY");

        let evasion_min_secs = env::var("EVASION_MIN_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let evasion_max_secs = env::var("EVASION_MAX_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        if evasion_min_secs > evasion_max_secs {
            return Err(Error::Config(format!(
                "EVASION_MIN_SECS ({}) is greater than EVASION_MAX_SECS ({})",
                evasion_min_secs, evasion_max_secs
            )));
        }

        let row_delay = env::var("ROW_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_secs(1));

        let open_end = match env::var("TENURE_OPEN_END") {
            Ok(v) => OpenEnd::parse(&v)?,
            Err(_) => OpenEnd::CurrentMonth,
        };

        Ok(Self {
            credentials,
            api_base_url,
            site_base_url,
            proxy,
            evasion_min_secs,
            evasion_max_secs,
            row_delay,
            open_end,
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            api_base_url: self.api_base_url.clone(),
            site_base_url: self.site_base_url.clone(),
            proxy: self.proxy.clone(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub row_delay: Duration,
    pub show_progress: bool,
}

impl From<&Config> for BatchConfig {
    fn from(config: &Config) -> Self {
        Self {
            row_delay: config.row_delay,
            show_progress: true,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            row_delay: Duration::from_secs(1),
            show_progress: false,
        }
    }
}
