use thiserror::Error;

/// Failure to obtain a [`ForecastReply`](crate::ForecastReply) at all.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Parameters were rejected before any request went out.
    #[error("invalid request parameters: {0}")]
    InvalidParams(String),

    #[error("request to forecast endpoint failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status.
    #[error("forecast endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode forecast response: {0}")]
    Decode(String),
}

/// A contract assertion that did not hold. Each variant carries what was
/// expected alongside what the endpoint actually returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("{field}: expected {expected}, got {actual}")]
    Mismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("hourly.{series} is missing from the response")]
    MissingSeries { series: String },

    #[error("hourly_units.{series} is missing from the response")]
    MissingUnit { series: String },

    #[error("hourly.{series}: expected {expected} values, got {actual}")]
    Count {
        series: String,
        expected: usize,
        actual: usize,
    },

    #[error("hourly.{series} is empty, no range to check")]
    EmptySeries { series: String },

    #[error("hourly.{series}[{index}] is null")]
    MissingSample { series: String, index: usize },

    #[error("hourly.{series}: {which} {actual} is not {bound}")]
    OutOfRange {
        series: String,
        which: &'static str,
        bound: String,
        actual: f64,
    },

    #[error("hourly.time[{index}] = {value:?} is not a valid timestamp")]
    BadTimestamp { index: usize, value: String },

    #[error("hourly.time[{index}] = {value:?} repeats UTC hour {hour}")]
    DuplicateHour {
        index: usize,
        value: String,
        hour: u32,
    },

    #[error("hourly.time has no entry for UTC hour {hour} on {date}")]
    MissingHour { date: String, hour: u32 },
}

impl Violation {
    pub(crate) fn mismatch(
        field: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Violation::Mismatch {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
