//! Remote holiday sources.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::config::HolidaySettings;
use crate::error::{BirthdirError, BirthdirResult};

/// Anything that can produce a raw holiday payload for a country and year.
///
/// Implementations only move bytes; shape validation happens in the provider.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch_holidays(&self, country: &str, year: i32) -> BirthdirResult<Value>;
}

/// Calendarific holiday API, reached through RapidAPI.
pub struct CalendarificSource {
    http: reqwest::Client,
    base_url: String,
    api_host: String,
    api_key: Option<String>,
}

impl CalendarificSource {
    pub fn new(settings: &HolidaySettings) -> BirthdirResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("birthdir/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| BirthdirError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(CalendarificSource {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_host: settings.api_host.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl HolidaySource for CalendarificSource {
    async fn fetch_holidays(&self, country: &str, year: i32) -> BirthdirResult<Value> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            BirthdirError::ProviderUnavailable("no holiday API key configured".into())
        })?;

        debug!("Fetching holidays for {} in {}", country, year);

        let resp = self
            .http
            .get(format!("{}/v1/holidays", self.base_url))
            .query(&[
                ("country", country.to_string()),
                ("year", year.to_string()),
                ("type", "national".to_string()),
            ])
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await
            .map_err(|e| BirthdirError::ProviderUnavailable(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(BirthdirError::ProviderUnavailable(format!(
                "holiday API returned HTTP {}",
                resp.status()
            )));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| BirthdirError::ProviderUnavailable(format!("invalid JSON: {e}")))
    }
}
