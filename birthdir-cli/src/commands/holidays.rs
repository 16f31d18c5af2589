use anyhow::Result;
use birthdir_core::config::Settings;
use birthdir_core::holiday::HolidayProvider;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run(
    settings: &Settings,
    country: Option<String>,
    year: Option<i32>,
    limit: Option<usize>,
    today: NaiveDate,
) -> Result<()> {
    let country = country.unwrap_or_else(|| settings.country.clone());
    let year = year.unwrap_or_else(|| today.year());
    let limit = limit.unwrap_or(settings.holiday_limit);

    let provider = HolidayProvider::from_settings(&settings.holidays)?;
    let holidays = provider.get_upcoming(&country, year, today, limit).await;

    if holidays.is_empty() {
        println!("{}", format!("No upcoming holidays for {country} in {year}").dimmed());
        return Ok(());
    }

    println!("{}", format!("🎉 Holidays in {country}, {year}").bold());
    for holiday in &holidays {
        println!("  {}", holiday.render());
        if let Some(description) = &holiday.description {
            println!("             {}", description.dimmed());
        }
    }

    Ok(())
}
