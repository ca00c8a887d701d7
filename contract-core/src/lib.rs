//! Contract checks for the Open-Meteo forecast endpoint.
//!
//! This crate defines:
//! - The request fixture for "current day" forecasts
//! - The endpoint abstraction and its reqwest-backed client
//! - The contract scenarios and a runner that executes them independently
//!
//! It is used by `forecast-contract-cli`, and its scenarios are also exercised
//! directly by the integration tests in `tests/`.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod fixture;
pub mod model;
pub mod scenario;
pub mod suite;

pub use config::{Config, EndpointConfig, FixtureConfig};
pub use endpoint::{ForecastEndpoint, endpoint_from_config, open_meteo::OpenMeteoClient};
pub use error::{FetchError, Violation};
pub use model::{ForecastReply, HourlySeries, ParamValue, WeatherRequestParams, WeatherResponse};
pub use scenario::{Outcome, Scenario};
pub use suite::{Execution, ScenarioReport, SuiteReport, run_suite};
