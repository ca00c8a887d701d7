use async_trait::async_trait;
use reqwest::Client;
use std::{collections::BTreeMap, time::Duration};
use tracing::{debug, instrument};

use crate::{
    config::EndpointConfig,
    error::FetchError,
    model::{ForecastReply, WeatherRequestParams, WeatherResponse},
};

use super::ForecastEndpoint;

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { base_url: config.base_url.clone(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ForecastEndpoint for OpenMeteoClient {
    #[instrument(
        skip(self, params),
        fields(lat = %params.latitude, lon = %params.longitude, start = %params.start_date)
    )]
    async fn get_weather_report(
        &self,
        params: &WeatherRequestParams,
    ) -> Result<ForecastReply, FetchError> {
        params.validate().map_err(FetchError::InvalidParams)?;

        let query = params.to_query();
        debug!(url = %self.base_url, ?query, "Requesting forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = res.status();
        let headers: BTreeMap<String, String> = res
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let parsed: WeatherResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(
            status = status.as_u16(),
            hours = parsed.hourly.time.len(),
            "Forecast received"
        );

        Ok(ForecastReply { status: status.as_u16(), headers, body: parsed })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
