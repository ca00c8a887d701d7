use crate::{
    config::EndpointConfig,
    endpoint::open_meteo::OpenMeteoClient,
    error::FetchError,
    model::{ForecastReply, WeatherRequestParams},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

/// The forecast service under test.
#[async_trait]
pub trait ForecastEndpoint: Send + Sync + Debug {
    /// Issue one GET with `params` as the query. Every call hits the service.
    async fn get_weather_report(
        &self,
        params: &WeatherRequestParams,
    ) -> Result<ForecastReply, FetchError>;
}

/// Construct the HTTP endpoint described by `config`.
pub fn endpoint_from_config(
    config: &EndpointConfig,
) -> Result<Arc<dyn ForecastEndpoint>, FetchError> {
    let client = OpenMeteoClient::new(config)?;
    Ok(Arc::new(client))
}
