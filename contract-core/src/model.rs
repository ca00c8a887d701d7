use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scalar value allowed in the open-ended part of the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// Query parameters for one forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRequestParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Requested hourly variables, in order.
    pub hourly: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Extra query keys passed through verbatim, e.g. `timezone = "GMT"`.
    #[serde(default)]
    pub extra: BTreeMap<String, ParamValue>,
}

const NAMED_KEYS: [&str; 5] = ["latitude", "longitude", "hourly", "start_date", "end_date"];

impl WeatherRequestParams {
    /// Serialize into query pairs. `hourly` is comma-joined; extra keys that
    /// collide with a named key are dropped.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("latitude".to_string(), self.latitude.to_string()),
            ("longitude".to_string(), self.longitude.to_string()),
            ("hourly".to_string(), self.hourly.join(",")),
            ("start_date".to_string(), self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date".to_string(), self.end_date.format("%Y-%m-%d").to_string()),
        ];

        pairs.extend(
            self.extra
                .iter()
                .filter(|(key, _)| !NAMED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.to_string())),
        );

        pairs
    }

    /// Number of calendar days covered by `start_date..=end_date`.
    pub fn day_count(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days).unwrap_or(0)
    }

    /// Hourly samples expected per series for the requested range.
    pub fn expected_hours(&self) -> usize {
        self.day_count() as usize * 24
    }

    /// `start_date` as it prefixes hourly timestamps (`2024-06-01`).
    pub fn start_date_prefix(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    /// Check the input constraints the endpoint expects.
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude {} is outside -90..=90", self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude {} is outside -180..=180", self.longitude));
        }
        if self.hourly.is_empty() {
            return Err("at least one hourly variable must be requested".to_string());
        }
        if let Some(blank) = self.hourly.iter().position(|name| name.trim().is_empty()) {
            return Err(format!("hourly variable #{blank} is blank"));
        }
        if self.start_date > self.end_date {
            return Err(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            ));
        }
        Ok(())
    }
}

/// Hourly block of the forecast body. `time` is always present; every other
/// requested variable lands in `series`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(flatten)]
    pub series: BTreeMap<String, Vec<Option<f64>>>,
}

impl HourlySeries {
    pub fn get(&self, variable: &str) -> Option<&[Option<f64>]> {
        self.series.get(variable).map(Vec::as_slice)
    }

    /// Length of a series by name, `time` included.
    pub fn len_of(&self, variable: &str) -> Option<usize> {
        if variable == "time" {
            Some(self.time.len())
        } else {
            self.series.get(variable).map(Vec::len)
        }
    }
}

/// JSON body returned by the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i32,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub hourly_units: BTreeMap<String, String>,
    pub hourly: HourlySeries,
}

/// Full HTTP reply for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReply {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: WeatherResponse,
}
