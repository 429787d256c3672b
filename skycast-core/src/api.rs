use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    Config,
    error::{Error, Result},
    model::{Coordinates, Pm25, WeatherSnapshot},
};

/// Fields requested from the forecast endpoint. Humidity and the daily
/// UV maximum are part of the service contract even though display only
/// uses the `current` block.
const FORECAST_CURRENT_FIELDS: &str =
    "temperature_2m,precipitation,wind_speed_10m,relative_humidity_2m,weather_code,uv_index";

/// Client for the Open-Meteo geocoding, forecast and air-quality
/// services. One instance per process; holds the shared HTTP client
/// and the configured endpoints.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    config: Config,
}

impl OpenMeteoClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| Error::Network {
                endpoint: "http client",
                source,
            })?;

        Ok(Self { http, config })
    }

    /// Resolve a city name to its best geocoding match.
    ///
    /// Always takes the first result the service returns; zero results
    /// is `CityNotFound` and issues no further requests.
    pub async fn resolve(&self, city: &str) -> Result<Coordinates> {
        let city = city.trim();
        debug!(city, "resolving city name");

        let body = self
            .get_text(
                "geocoding",
                &self.config.geocoding_url,
                &[("name", city), ("count", "1")],
            )
            .await?;

        let parsed: GeocodingResponse = parse_json("geocoding", &body)?;

        let first = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| Error::CityNotFound(city.to_string()))?;

        debug!(
            name = %first.name,
            latitude = first.latitude,
            longitude = first.longitude,
            "resolved city"
        );

        Ok(Coordinates {
            latitude: first.latitude,
            longitude: first.longitude,
            display_name: first.name,
        })
    }

    /// Fetch current weather and air quality for resolved coordinates.
    ///
    /// The two requests run concurrently and are joined: if either
    /// fails there is no partial result and the whole call fails.
    /// Missing fields inside successful responses degrade to `None` /
    /// `Unavailable` instead.
    pub async fn fetch_weather(&self, coords: &Coordinates) -> Result<WeatherSnapshot> {
        debug!(
            name = %coords.display_name,
            latitude = coords.latitude,
            longitude = coords.longitude,
            "fetching weather and air quality"
        );

        let (forecast, air) = tokio::try_join!(
            self.fetch_forecast(coords),
            self.fetch_air_quality(coords)
        )?;

        let current = forecast.current.unwrap_or_default();

        let pm2_5 = Pm25::from_sample(
            air.hourly
                .and_then(|h| h.pm2_5)
                .and_then(|samples| samples.into_iter().next().flatten()),
        );

        Ok(WeatherSnapshot {
            temperature_c: current.temperature_2m,
            precipitation_mm: current.precipitation,
            wind_kph: current.wind_speed_10m,
            humidity_pct: current.relative_humidity_2m,
            weather_code: current.weather_code,
            uv_index: current.uv_index,
            pm2_5,
            fetched_at: Utc::now(),
        })
    }

    async fn fetch_forecast(&self, coords: &Coordinates) -> Result<ForecastResponse> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();

        let body = self
            .get_text(
                "forecast",
                &self.config.forecast_url,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("current", FORECAST_CURRENT_FIELDS),
                    ("hourly", "relative_humidity_2m"),
                    ("daily", "uv_index_max"),
                    ("timezone", "auto"),
                ],
            )
            .await?;

        parse_json("forecast", &body)
    }

    async fn fetch_air_quality(&self, coords: &Coordinates) -> Result<AirQualityResponse> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();

        let body = self
            .get_text(
                "air quality",
                &self.config.air_quality_url,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("hourly", "pm2_5"),
                ],
            )
            .await?;

        parse_json("air quality", &body)
    }

    /// Issue a GET and return the body text, turning transport errors
    /// and non-success statuses into typed failures.
    async fn get_text(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| Error::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(Error::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

fn parse_json<'a, T: Deserialize<'a>>(endpoint: &'static str, body: &'a str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| Error::Parse { endpoint, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    // Cut on a char boundary; a byte-offset slice can land inside a
    // multi-byte character and panic.
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

/// `current` block of the forecast response. Every field is optional;
/// the service omits what it has no data for.
#[derive(Debug, Default, Deserialize)]
struct CurrentConditions {
    temperature_2m: Option<f64>,
    precipitation: Option<f64>,
    wind_speed_10m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    weather_code: Option<i32>,
    uv_index: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    hourly: Option<AirQualityHourly>,
}

#[derive(Debug, Deserialize)]
struct AirQualityHourly {
    pm2_5: Option<Vec<Option<f64>>>,
}
