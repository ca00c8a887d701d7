//! Builds the "current day" request every scenario starts from.

use chrono::{NaiveDate, Utc};

use crate::{config::FixtureConfig, model::WeatherRequestParams};

/// Today's calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Single-day request for `day` at the configured location.
pub fn current_day(day: NaiveDate, fixture: &FixtureConfig) -> WeatherRequestParams {
    WeatherRequestParams {
        latitude: fixture.latitude,
        longitude: fixture.longitude,
        hourly: fixture.hourly.clone(),
        start_date: day,
        end_date: day,
        extra: fixture.extra.clone(),
    }
}

/// [`current_day`] for today's UTC date.
pub fn today(fixture: &FixtureConfig) -> WeatherRequestParams {
    current_day(today_utc(), fixture)
}
