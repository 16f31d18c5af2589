use anyhow::Result;
use birthdir_core::config::Settings;
use birthdir_core::holiday::HolidayProvider;
use birthdir_core::store::ReminderStore;
use birthdir_core::view::build_view;
use chrono::NaiveDate;

use crate::render::render_view;

pub async fn run<S: ReminderStore>(
    store: &S,
    settings: &Settings,
    today: NaiveDate,
    verbose: bool,
) -> Result<()> {
    let provider = HolidayProvider::from_settings(&settings.holidays)?;
    let view = build_view(store, &provider, settings, today).await;

    println!("{}", render_view(&view, verbose));
    Ok(())
}
