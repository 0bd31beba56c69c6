//! Environment-driven configuration.
//!
//! Reads a `.env` file when one is present. CLI flags override the
//! environment. The report time zone defaults to America/New_York, where the
//! team that ran the original bot lived.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: Option<String>,
    pub timezone: Tz,
    pub webhook: Option<String>,
}

impl Config {
    /// Load from the process environment, honouring an optional `--timezone`
    /// override.
    pub fn from_env(tz_flag: Option<&str>) -> Result<Self> {
        dotenv::dotenv().ok();
        let tz_name = tz_flag
            .map(str::to_string)
            .or_else(|| std::env::var("TIMEZONE").ok())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = tz_name
            .parse()
            .map_err(|_| anyhow!("unknown time zone: {tz_name}"))?;
        Ok(Config {
            api_token: std::env::var("MONDAY_API_TOKEN").ok(),
            timezone,
            webhook: std::env::var("SLACK_WEBHOOK_URL").ok(),
        })
    }

    /// Current time in the report time zone.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }

    /// Start-of-day anchor for overdue checks.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    pub fn require_token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .context("MONDAY_API_TOKEN is not set; export it or pass --input <file>")
    }

    pub fn require_webhook(&self) -> Result<&str> {
        self.webhook
            .as_deref()
            .context("SLACK_WEBHOOK_URL is not set")
    }
}
