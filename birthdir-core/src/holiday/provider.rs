use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use log::{info, warn};
use tokio::time::timeout;

use super::{
    CalendarificSource, Holiday, HolidaySource, fallback_holidays, parse_payload, select_upcoming,
};
use crate::config::HolidaySettings;
use crate::constants::HOLIDAY_FETCH_TIMEOUT;
use crate::error::{BirthdirError, BirthdirResult};

type CacheKey = (String, i32);

/// Upcoming holidays with an offline fallback.
///
/// Every failure of the source (timeout, transport, HTTP status, bad shape)
/// is logged and replaced by the built-in template for the requested year.
pub struct HolidayProvider {
    source: Box<dyn HolidaySource>,
    timeout: Duration,
    /// Validated holidays per (country, year), when caching is enabled.
    cache: Option<Mutex<HashMap<CacheKey, Vec<Holiday>>>>,
}

impl HolidayProvider {
    pub fn new(source: impl HolidaySource + 'static) -> Self {
        HolidayProvider {
            source: Box::new(source),
            timeout: HOLIDAY_FETCH_TIMEOUT,
            cache: None,
        }
    }

    /// Provider backed by Calendarific, configured from settings.
    pub fn from_settings(settings: &HolidaySettings) -> BirthdirResult<Self> {
        let provider = HolidayProvider::new(CalendarificSource::new(settings)?)
            .with_timeout(Duration::from_secs(settings.timeout_secs));

        Ok(if settings.cache {
            provider.with_cache()
        } else {
            provider
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache(mut self) -> Self {
        self.cache = Some(Mutex::new(HashMap::new()));
        self
    }

    /// Up to `limit` holidays on or after `today`, earliest first.
    pub async fn get_upcoming(
        &self,
        country: &str,
        year: i32,
        today: NaiveDate,
        limit: usize,
    ) -> Vec<Holiday> {
        let holidays = match self.fetch(country, year, today).await {
            Ok(holidays) => holidays,
            Err(e) => {
                warn!("Using built-in holidays for {} {}: {}", country, year, e);
                fallback_holidays(year)
            }
        };

        select_upcoming(holidays, today, limit)
    }

    async fn fetch(&self, country: &str, year: i32, today: NaiveDate) -> BirthdirResult<Vec<Holiday>> {
        let key = (country.to_string(), year);

        if let Some(cached) = self.cached(&key, today) {
            return Ok(cached);
        }

        let payload = timeout(self.timeout, self.source.fetch_holidays(country, year))
            .await
            .map_err(|_| {
                BirthdirError::ProviderUnavailable(format!(
                    "request timed out after {:?}",
                    self.timeout
                ))
            })??;

        let holidays = parse_payload(&payload)?;
        info!("Fetched {} holidays for {} {}", holidays.len(), country, year);

        if let Some(cache) = &self.cache {
            if let Ok(mut cache) = cache.lock() {
                cache.insert(key, holidays.clone());
            }
        }

        Ok(holidays)
    }

    /// Cached holidays for `key`. Entries for years before `today` are
    /// dropped first so a year rollover never serves last year's data.
    fn cached(&self, key: &CacheKey, today: NaiveDate) -> Option<Vec<Holiday>> {
        let mut cache = self.cache.as_ref()?.lock().ok()?;
        cache.retain(|(_, year), _| *year >= today.year());
        cache.get(key).cloned()
    }
}
