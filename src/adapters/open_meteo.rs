use crate::config::toml_config::WeatherSection;
use crate::domain::model::WeatherReport;
use crate::domain::ports::WeatherSource;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DAILY_FIELDS: &str =
    "weathercode,temperature_2m_max,temperature_2m_min,precipitation_probability_max";

/// Today's forecast for one location from the Open-Meteo forecast API.
pub struct OpenMeteoClient {
    client: Client,
    endpoint: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: Option<CurrentWeather>,
    daily: DailyForecast,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyForecast {
    weathercode: Vec<Option<u16>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

fn first<T: Copy>(field: &str, values: &[Option<T>]) -> Result<T> {
    values
        .first()
        .copied()
        .flatten()
        .ok_or_else(|| BotError::PayloadError {
            message: format!("daily.{} has no value for today", field),
        })
}

impl OpenMeteoClient {
    pub fn new(
        endpoint: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            latitude,
            longitude,
            timezone: timezone.into(),
            timeout,
        }
    }

    pub fn from_settings(weather: &WeatherSection, timezone: &str) -> Self {
        Self::new(
            weather.endpoint.clone(),
            weather.latitude,
            weather.longitude,
            timezone,
            Duration::from_secs(weather.timeout_seconds),
        )
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn current_weather(&self) -> Result<WeatherReport> {
        tracing::debug!(
            "Requesting forecast for {},{} from {}",
            self.latitude,
            self.longitude,
            self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", self.timezone.clone()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::UpstreamStatusError {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let forecast: ForecastResponse = response.json().await?;
        let daily = &forecast.daily;

        Ok(WeatherReport {
            current_temp: forecast.current_weather.and_then(|c| c.temperature),
            max_temp: first("temperature_2m_max", &daily.temperature_2m_max)?,
            min_temp: first("temperature_2m_min", &daily.temperature_2m_min)?,
            precip_prob: daily.precipitation_probability_max.first().copied().flatten(),
            weather_code: first("weathercode", &daily.weathercode)?,
        })
    }
}
