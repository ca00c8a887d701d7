//! Contract scenarios for the current-day forecast.
//!
//! Each scenario checks one property of a [`ForecastReply`]. The checks are
//! plain functions over a request and its reply, so they can be driven by
//! the live suite runner or fed a canned payload in tests. [`Scenario::run`]
//! performs its own request before checking; scenarios never share replies.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::fmt;

use crate::{
    endpoint::ForecastEndpoint,
    error::{FetchError, Violation},
    model::{ForecastReply, WeatherRequestParams},
};

pub const TEMPERATURE: &str = "temperature_2m";
pub const WEATHERCODE: &str = "weathercode";
pub const PRECIPITATION: &str = "precipitation";

const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    Status,
    Location,
    Timezone,
    TemperatureUnit,
    PrecipitationUnit,
    WeathercodeUnit,
    TimeFormat,
    TemperatureCount,
    WeathercodeCount,
    PrecipitationCount,
    TemperatureRange,
    WeathercodeRange,
    PrecipitationRange,
    TimestampCount,
    TimestampHours,
    SeriesAlignment,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Status => "status",
            Scenario::Location => "location",
            Scenario::Timezone => "timezone",
            Scenario::TemperatureUnit => "temperature-unit",
            Scenario::PrecipitationUnit => "precipitation-unit",
            Scenario::WeathercodeUnit => "weathercode-unit",
            Scenario::TimeFormat => "time-format",
            Scenario::TemperatureCount => "temperature-count",
            Scenario::WeathercodeCount => "weathercode-count",
            Scenario::PrecipitationCount => "precipitation-count",
            Scenario::TemperatureRange => "temperature-range",
            Scenario::WeathercodeRange => "weathercode-range",
            Scenario::PrecipitationRange => "precipitation-range",
            Scenario::TimestampCount => "timestamp-count",
            Scenario::TimestampHours => "timestamp-hours",
            Scenario::SeriesAlignment => "series-alignment",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::Status => "API returns 200 status code for valid requests",
            Scenario::Location => "API returns correct location",
            Scenario::Timezone => "API returns correct timezone",
            Scenario::TemperatureUnit => "API returns temperature in celsius",
            Scenario::PrecipitationUnit => "API returns precipitation in millimeters",
            Scenario::WeathercodeUnit => {
                "API returns weathercode in WMO Weather interpretation codes"
            }
            Scenario::TimeFormat => "API returns time in correct format",
            Scenario::TemperatureCount => {
                "API returns correct number of hourly temperatures for current day"
            }
            Scenario::WeathercodeCount => {
                "API returns correct number of hourly weathercode for current day"
            }
            Scenario::PrecipitationCount => {
                "API returns correct number of hourly precipitation for current day"
            }
            Scenario::TemperatureRange => {
                "API returns temperatures in correct range for current day"
            }
            Scenario::WeathercodeRange => {
                "API returns weathercodes in correct range for current day"
            }
            Scenario::PrecipitationRange => {
                "API returns precipitation numbers in correct range for current day"
            }
            Scenario::TimestampCount => {
                "API returns correct number of hourly timestamps for current day"
            }
            Scenario::TimestampHours => "API returns timestamps in correct range for current day",
            Scenario::SeriesAlignment => "API returns hourly series of equal length",
        }
    }

    pub const fn all() -> &'static [Scenario] {
        &[
            Scenario::Status,
            Scenario::Location,
            Scenario::Timezone,
            Scenario::TemperatureUnit,
            Scenario::PrecipitationUnit,
            Scenario::WeathercodeUnit,
            Scenario::TimeFormat,
            Scenario::TemperatureCount,
            Scenario::WeathercodeCount,
            Scenario::PrecipitationCount,
            Scenario::TemperatureRange,
            Scenario::WeathercodeRange,
            Scenario::PrecipitationRange,
            Scenario::TimestampCount,
            Scenario::TimestampHours,
            Scenario::SeriesAlignment,
        ]
    }

    /// Assert this scenario's property against an already fetched reply.
    pub fn check(
        &self,
        params: &WeatherRequestParams,
        reply: &ForecastReply,
    ) -> Result<(), Violation> {
        match self {
            Scenario::Status => check_status(reply),
            Scenario::Location => check_location(params, reply),
            Scenario::Timezone => check_timezone(reply),
            Scenario::TemperatureUnit => check_unit(reply, TEMPERATURE, "°C"),
            Scenario::PrecipitationUnit => check_unit(reply, PRECIPITATION, "mm"),
            Scenario::WeathercodeUnit => check_unit(reply, WEATHERCODE, "wmo code"),
            Scenario::TimeFormat => check_unit(reply, "time", "iso8601"),
            Scenario::TemperatureCount => check_count(params, reply, TEMPERATURE),
            Scenario::WeathercodeCount => check_count(params, reply, WEATHERCODE),
            Scenario::PrecipitationCount => check_count(params, reply, PRECIPITATION),
            Scenario::TemperatureRange => {
                check_range(reply, TEMPERATURE, ValueRange::exclusive(-90.0, 90.0))
            }
            Scenario::WeathercodeRange => {
                check_range(reply, WEATHERCODE, ValueRange::inclusive(0.0, 99.0))
            }
            Scenario::PrecipitationRange => {
                check_range(reply, PRECIPITATION, ValueRange::inclusive(0.0, 500.0))
            }
            Scenario::TimestampCount => check_timestamp_count(params, reply),
            Scenario::TimestampHours => check_timestamp_hours(params, reply),
            Scenario::SeriesAlignment => check_series_alignment(params, reply),
        }
    }

    /// Fetch a fresh reply for `params` and check it.
    pub async fn run(
        &self,
        endpoint: &dyn ForecastEndpoint,
        params: &WeatherRequestParams,
    ) -> Outcome {
        match endpoint.get_weather_report(params).await {
            Ok(reply) => match self.check(params, &reply) {
                Ok(()) => Outcome::Passed,
                Err(violation) => Outcome::Failed(violation),
            },
            Err(err) => Outcome::Errored(err),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Scenario {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        Scenario::all().iter().copied().find(|s| s.as_str() == lower).ok_or_else(|| {
            let known: Vec<_> = Scenario::all().iter().map(Scenario::as_str).collect();
            anyhow::anyhow!("Unknown scenario '{value}'. Known scenarios: {}.", known.join(", "))
        })
    }
}

/// Result of running one scenario.
#[derive(Debug, Clone)]
pub enum Outcome {
    Passed,
    /// The reply arrived but broke the contract.
    Failed(Violation),
    /// No reply to check.
    Errored(FetchError),
    /// The scenario's task died before reporting.
    Aborted(String),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed(_) => "failed",
            Outcome::Errored(_) => "errored",
            Outcome::Aborted(_) => "aborted",
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed(v) => Some(v.to_string()),
            Outcome::Errored(e) => Some(e.to_string()),
            Outcome::Aborted(msg) => Some(msg.clone()),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        state.serialize_field("outcome", self.label())?;
        state.serialize_field("detail", &self.detail())?;
        state.end()
    }
}

/// Allowed interval for every value of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    /// Whether `min`/`max` themselves are allowed.
    pub inclusive: bool,
}

impl ValueRange {
    pub const fn inclusive(min: f64, max: f64) -> Self {
        Self { min, max, inclusive: true }
    }

    pub const fn exclusive(min: f64, max: f64) -> Self {
        Self { min, max, inclusive: false }
    }

    fn lower_ok(&self, value: f64) -> bool {
        if self.inclusive { value >= self.min } else { value > self.min }
    }

    fn upper_ok(&self, value: f64) -> bool {
        if self.inclusive { value <= self.max } else { value < self.max }
    }

    fn lower_bound(&self) -> String {
        if self.inclusive { format!(">= {}", self.min) } else { format!("> {}", self.min) }
    }

    fn upper_bound(&self) -> String {
        if self.inclusive { format!("<= {}", self.max) } else { format!("< {}", self.max) }
    }
}

pub fn check_status(reply: &ForecastReply) -> Result<(), Violation> {
    if reply.status != 200 {
        return Err(Violation::mismatch("status", 200, reply.status));
    }
    Ok(())
}

/// Coordinates must be echoed back exactly.
pub fn check_location(
    params: &WeatherRequestParams,
    reply: &ForecastReply,
) -> Result<(), Violation> {
    if reply.body.longitude != params.longitude {
        return Err(Violation::mismatch("longitude", params.longitude, reply.body.longitude));
    }
    if reply.body.latitude != params.latitude {
        return Err(Violation::mismatch("latitude", params.latitude, reply.body.latitude));
    }
    Ok(())
}

pub fn check_timezone(reply: &ForecastReply) -> Result<(), Violation> {
    let body = &reply.body;
    if body.utc_offset_seconds != 0 {
        return Err(Violation::mismatch("utc_offset_seconds", 0, body.utc_offset_seconds));
    }
    if body.timezone != "GMT" {
        return Err(Violation::mismatch("timezone", "\"GMT\"", format!("{:?}", body.timezone)));
    }
    if body.timezone_abbreviation != "GMT" {
        return Err(Violation::mismatch(
            "timezone_abbreviation",
            "\"GMT\"",
            format!("{:?}", body.timezone_abbreviation),
        ));
    }
    Ok(())
}

pub fn check_unit(reply: &ForecastReply, series: &str, expected: &str) -> Result<(), Violation> {
    let unit = reply
        .body
        .hourly_units
        .get(series)
        .ok_or_else(|| Violation::MissingUnit { series: series.to_string() })?;

    if unit != expected {
        return Err(Violation::mismatch(
            format!("hourly_units.{series}"),
            format!("{expected:?}"),
            format!("{unit:?}"),
        ));
    }
    Ok(())
}

/// One value per hour of the requested range.
pub fn check_count(
    params: &WeatherRequestParams,
    reply: &ForecastReply,
    series: &str,
) -> Result<(), Violation> {
    let actual = reply
        .body
        .hourly
        .len_of(series)
        .ok_or_else(|| Violation::MissingSeries { series: series.to_string() })?;

    let expected = params.expected_hours();
    if actual != expected {
        return Err(Violation::Count { series: series.to_string(), expected, actual });
    }
    Ok(())
}

/// Minimum and maximum of `series` must both lie within `range`.
pub fn check_range(
    reply: &ForecastReply,
    series: &str,
    range: ValueRange,
) -> Result<(), Violation> {
    let values = reply
        .body
        .hourly
        .get(series)
        .ok_or_else(|| Violation::MissingSeries { series: series.to_string() })?;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (index, value) in values.iter().enumerate() {
        let value = value.ok_or_else(|| Violation::MissingSample {
            series: series.to_string(),
            index,
        })?;
        min = min.min(value);
        max = max.max(value);
    }

    if values.is_empty() {
        return Err(Violation::EmptySeries { series: series.to_string() });
    }

    if !range.lower_ok(min) {
        return Err(Violation::OutOfRange {
            series: series.to_string(),
            which: "min",
            bound: range.lower_bound(),
            actual: min,
        });
    }
    if !range.upper_ok(max) {
        return Err(Violation::OutOfRange {
            series: series.to_string(),
            which: "max",
            bound: range.upper_bound(),
            actual: max,
        });
    }
    Ok(())
}

fn timestamps_on_start_date<'a>(
    params: &WeatherRequestParams,
    reply: &'a ForecastReply,
) -> impl Iterator<Item = (usize, &'a String)> {
    let prefix = params.start_date_prefix();
    reply.body.hourly.time.iter().enumerate().filter(move |(_, ts)| ts.starts_with(&prefix))
}

/// The requested start date must be covered by exactly one full day of hours.
pub fn check_timestamp_count(
    params: &WeatherRequestParams,
    reply: &ForecastReply,
) -> Result<(), Violation> {
    let count = timestamps_on_start_date(params, reply).count();
    if count != HOURS_PER_DAY {
        return Err(Violation::mismatch(
            format!("hourly.time entries on {}", params.start_date_prefix()),
            HOURS_PER_DAY,
            count,
        ));
    }
    Ok(())
}

/// Every timestamp on the start date parses, and their UTC hours cover
/// 0..=23 exactly once.
pub fn check_timestamp_hours(
    params: &WeatherRequestParams,
    reply: &ForecastReply,
) -> Result<(), Violation> {
    let mut seen = [false; HOURS_PER_DAY];

    for (index, value) in timestamps_on_start_date(params, reply) {
        let hour = utc_hour(value, reply.body.utc_offset_seconds)
            .ok_or_else(|| Violation::BadTimestamp { index, value: value.clone() })?;

        let slot = &mut seen[hour as usize];
        if *slot {
            return Err(Violation::DuplicateHour { index, value: value.clone(), hour });
        }
        *slot = true;
    }

    if let Some(hour) = seen.iter().position(|covered| !covered) {
        return Err(Violation::MissingHour {
            date: params.start_date_prefix(),
            hour: hour as u32,
        });
    }
    Ok(())
}

/// Every hourly series is as long as `time`, which covers the whole range.
pub fn check_series_alignment(
    params: &WeatherRequestParams,
    reply: &ForecastReply,
) -> Result<(), Violation> {
    let hourly = &reply.body.hourly;
    let expected = params.expected_hours();

    if hourly.time.len() != expected {
        return Err(Violation::Count {
            series: "time".to_string(),
            expected,
            actual: hourly.time.len(),
        });
    }

    for (name, values) in &hourly.series {
        if values.len() != hourly.time.len() {
            return Err(Violation::Count {
                series: name.clone(),
                expected: hourly.time.len(),
                actual: values.len(),
            });
        }
    }
    Ok(())
}

/// Hour of day in UTC for a local timestamp reported at `utc_offset_seconds`.
pub fn utc_hour(timestamp: &str, utc_offset_seconds: i32) -> Option<u32> {
    let local = parse_timestamp(timestamp)?;
    let offset = Duration::seconds(i64::from(utc_offset_seconds));
    Some((local - offset).hour())
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HourlySeries, WeatherResponse};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn params() -> WeatherRequestParams {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        WeatherRequestParams {
            latitude: 26.0,
            longitude: 59.0,
            hourly: vec![TEMPERATURE.into(), WEATHERCODE.into(), PRECIPITATION.into()],
            start_date: day,
            end_date: day,
            extra: BTreeMap::new(),
        }
    }

    fn reply() -> ForecastReply {
        let time = (0..24).map(|h| format!("2024-06-01T{h:02}:00")).collect();
        let series = BTreeMap::from([
            (TEMPERATURE.to_string(), (0..24u8).map(|h| Some(28.0 + f64::from(h) / 4.0)).collect()),
            (WEATHERCODE.to_string(), vec![Some(0.0); 24]),
            (PRECIPITATION.to_string(), vec![Some(0.0); 24]),
        ]);
        let units = BTreeMap::from([
            ("time".to_string(), "iso8601".to_string()),
            (TEMPERATURE.to_string(), "°C".to_string()),
            (WEATHERCODE.to_string(), "wmo code".to_string()),
            (PRECIPITATION.to_string(), "mm".to_string()),
        ]);

        ForecastReply {
            status: 200,
            headers: BTreeMap::new(),
            body: WeatherResponse {
                latitude: 26.0,
                longitude: 59.0,
                generationtime_ms: 0.04,
                utc_offset_seconds: 0,
                timezone: "GMT".into(),
                timezone_abbreviation: "GMT".into(),
                elevation: 0.0,
                hourly_units: units,
                hourly: HourlySeries { time, series },
            },
        }
    }

    fn set_series(reply: &mut ForecastReply, name: &str, values: Vec<Option<f64>>) {
        reply.body.hourly.series.insert(name.to_string(), values);
    }

    #[test]
    fn conforming_reply_passes_every_scenario() {
        let (p, r) = (params(), reply());
        for scenario in Scenario::all() {
            assert_eq!(scenario.check(&p, &r), Ok(()), "scenario {scenario}");
        }
    }

    #[test]
    fn scenario_id_roundtrip() {
        for s in Scenario::all() {
            let parsed = Scenario::try_from(s.as_str()).expect("roundtrip should succeed");
            assert_eq!(*s, parsed);
        }
    }

    #[test]
    fn unknown_scenario_lists_known_ids() {
        let err = Scenario::try_from("humidity-range").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown scenario"));
        assert!(msg.contains("temperature-range"));
    }

    #[test]
    fn status_other_than_200_fails() {
        let mut r = reply();
        r.status = 203;
        assert_eq!(check_status(&r), Err(Violation::mismatch("status", 200, 203)));
    }

    #[test]
    fn location_requires_exact_echo() {
        let mut r = reply();
        r.body.latitude = 26.000_001;
        let err = check_location(&params(), &r).unwrap_err();
        assert!(err.to_string().starts_with("latitude"));
    }

    #[test]
    fn timezone_checks_offset_then_names() {
        let mut r = reply();
        r.body.utc_offset_seconds = 14_400;
        assert!(check_timezone(&r).unwrap_err().to_string().contains("utc_offset_seconds"));

        let mut r = reply();
        r.body.timezone_abbreviation = "+04".into();
        let err = check_timezone(&r).unwrap_err();
        assert_eq!(err.to_string(), "timezone_abbreviation: expected \"GMT\", got \"+04\"");
    }

    #[test]
    fn unit_mismatch_and_missing_unit() {
        let mut r = reply();
        r.body.hourly_units.insert(TEMPERATURE.into(), "°F".into());
        assert!(Scenario::TemperatureUnit.check(&params(), &r).is_err());

        r.body.hourly_units.remove(PRECIPITATION);
        assert_eq!(
            Scenario::PrecipitationUnit.check(&params(), &r),
            Err(Violation::MissingUnit { series: PRECIPITATION.into() })
        );
    }

    #[test]
    fn count_reports_expected_and_actual() {
        let mut r = reply();
        set_series(&mut r, WEATHERCODE, vec![Some(1.0); 23]);

        assert_eq!(
            Scenario::WeathercodeCount.check(&params(), &r),
            Err(Violation::Count { series: WEATHERCODE.into(), expected: 24, actual: 23 })
        );
    }

    #[test]
    fn empty_series_fails_count_and_range() {
        let mut r = reply();
        set_series(&mut r, PRECIPITATION, Vec::new());

        assert!(matches!(
            Scenario::PrecipitationCount.check(&params(), &r),
            Err(Violation::Count { actual: 0, .. })
        ));
        assert_eq!(
            Scenario::PrecipitationRange.check(&params(), &r),
            Err(Violation::EmptySeries { series: PRECIPITATION.into() })
        );
    }

    #[test]
    fn missing_series_is_a_shape_violation() {
        let mut r = reply();
        r.body.hourly.series.remove(TEMPERATURE);

        for scenario in [Scenario::TemperatureCount, Scenario::TemperatureRange] {
            assert_eq!(
                scenario.check(&params(), &r),
                Err(Violation::MissingSeries { series: TEMPERATURE.into() })
            );
        }
    }

    #[test]
    fn temperature_bounds_are_exclusive() {
        let mut r = reply();
        let mut values = vec![Some(20.0); 24];
        values[5] = Some(-90.0);
        set_series(&mut r, TEMPERATURE, values);

        let err = Scenario::TemperatureRange.check(&params(), &r).unwrap_err();
        assert_eq!(err.to_string(), "hourly.temperature_2m: min -90 is not > -90");

        let mut values = vec![Some(20.0); 24];
        values[0] = Some(89.9);
        set_series(&mut r, TEMPERATURE, values);
        assert_eq!(Scenario::TemperatureRange.check(&params(), &r), Ok(()));
    }

    #[test]
    fn weathercode_bounds_are_inclusive() {
        let mut r = reply();
        let mut values = vec![Some(0.0); 24];
        values[3] = Some(99.0);
        set_series(&mut r, WEATHERCODE, values.clone());
        assert_eq!(Scenario::WeathercodeRange.check(&params(), &r), Ok(()));

        values[4] = Some(100.0);
        set_series(&mut r, WEATHERCODE, values);
        assert!(matches!(
            Scenario::WeathercodeRange.check(&params(), &r),
            Err(Violation::OutOfRange { which: "max", .. })
        ));
    }

    #[test]
    fn precipitation_range_inspects_precipitation() {
        let mut r = reply();
        let mut values = vec![Some(0.0); 24];
        values[12] = Some(-0.1);
        set_series(&mut r, PRECIPITATION, values);
        // weathercode stays valid; only precipitation is out of range.
        assert!(matches!(
            Scenario::PrecipitationRange.check(&params(), &r),
            Err(Violation::OutOfRange { which: "min", .. })
        ));

        let mut r = reply();
        set_series(&mut r, WEATHERCODE, vec![Some(95.0); 24]);
        set_series(&mut r, PRECIPITATION, vec![Some(500.0); 24]);
        assert_eq!(Scenario::PrecipitationRange.check(&params(), &r), Ok(()));
    }

    #[test]
    fn null_sample_is_reported_by_index() {
        let mut r = reply();
        let mut values = vec![Some(1.0); 24];
        values[7] = None;
        set_series(&mut r, TEMPERATURE, values);

        assert_eq!(
            Scenario::TemperatureRange.check(&params(), &r),
            Err(Violation::MissingSample { series: TEMPERATURE.into(), index: 7 })
        );
    }

    #[test]
    fn timestamp_count_only_counts_start_date() {
        let mut r = reply();
        r.body.hourly.time[23] = "2024-06-02T00:00".into();

        let err = Scenario::TimestampCount.check(&params(), &r).unwrap_err();
        assert_eq!(err.to_string(), "hourly.time entries on 2024-06-01: expected 24, got 23");
    }

    #[test]
    fn timestamp_hours_rejects_unparseable_entries() {
        let mut r = reply();
        r.body.hourly.time[2] = "2024-06-01T2:00pm".into();

        assert_eq!(
            Scenario::TimestampHours.check(&params(), &r),
            Err(Violation::BadTimestamp { index: 2, value: "2024-06-01T2:00pm".into() })
        );
    }

    #[test]
    fn utc_hour_applies_the_offset() {
        assert_eq!(utc_hour("2024-06-01T00:00", 0), Some(0));
        assert_eq!(utc_hour("2024-06-01T00:00", 3600), Some(23));
        assert_eq!(utc_hour("2024-06-01T13:00:00", 14_400), Some(9));
        assert_eq!(utc_hour("2024-06-01T22:00", -7200), Some(0));
        assert_eq!(utc_hour("13:00", 0), None);
    }

    #[test]
    fn timestamp_hours_accepts_offset_and_seconds() {
        let mut r = reply();
        r.body.utc_offset_seconds = 3600;
        r.body.hourly.time[0] = "2024-06-01T00:00:00".into();
        assert_eq!(Scenario::TimestampHours.check(&params(), &r), Ok(()));
    }

    #[test]
    fn timestamp_hours_reports_repeated_and_missing_hours() {
        let mut r = reply();
        r.body.hourly.time[5] = "2024-06-01T04:00".into();
        assert_eq!(
            Scenario::TimestampHours.check(&params(), &r),
            Err(Violation::DuplicateHour { index: 5, value: "2024-06-01T04:00".into(), hour: 4 })
        );

        let mut r = reply();
        r.body.hourly.time.truncate(23);
        assert_eq!(
            Scenario::TimestampHours.check(&params(), &r),
            Err(Violation::MissingHour { date: "2024-06-01".into(), hour: 23 })
        );
    }

    #[test]
    fn timestamp_hours_uses_shifted_hour() {
        // At +01:00 local 00:00 is 23:00 UTC, so a second 00:00 repeats hour 23.
        let mut r = reply();
        r.body.utc_offset_seconds = 3600;
        r.body.hourly.time[22] = "2024-06-01T00:00".into();

        assert_eq!(
            Scenario::TimestampHours.check(&params(), &r),
            Err(Violation::DuplicateHour { index: 22, value: "2024-06-01T00:00".into(), hour: 23 })
        );
    }

    #[test]
    fn series_alignment_catches_short_series() {
        let mut r = reply();
        set_series(&mut r, "relative_humidity_2m", vec![Some(50.0); 20]);

        assert_eq!(
            Scenario::SeriesAlignment.check(&params(), &r),
            Err(Violation::Count { series: "relative_humidity_2m".into(), expected: 24, actual: 20 })
        );
    }

    #[test]
    fn multi_day_request_scales_counts() {
        let mut p = params();
        p.end_date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();

        let mut r = reply();
        r.body.hourly.time.extend((0..24).map(|h| format!("2024-06-02T{h:02}:00")));
        for values in r.body.hourly.series.values_mut() {
            values.extend(vec![Some(1.0); 24]);
        }

        assert_eq!(Scenario::TemperatureCount.check(&p, &r), Ok(()));
        assert_eq!(Scenario::TimestampCount.check(&p, &r), Ok(()));
        assert_eq!(Scenario::SeriesAlignment.check(&p, &r), Ok(()));
    }

    #[test]
    fn outcome_serializes_label_and_detail() {
        let failed = Outcome::Failed(Violation::EmptySeries { series: "x".into() });
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["detail"], "hourly.x is empty, no range to check");

        let json = serde_json::to_value(Outcome::Passed).unwrap();
        assert_eq!(json["outcome"], "passed");
        assert!(json["detail"].is_null());
    }
}
