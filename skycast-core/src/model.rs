use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Best geocoding match for a city query.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// First hourly PM2.5 sample from the air-quality service.
///
/// `Unavailable` is a distinct rendering path (the gauge is suppressed
/// entirely), not a fourth quality category, so it is modeled apart
/// from the numeric value rather than as an `Option` default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pm25 {
    Value(f64),
    Unavailable,
}

impl Pm25 {
    pub fn from_sample(sample: Option<f64>) -> Self {
        match sample {
            Some(v) => Pm25::Value(v),
            None => Pm25::Unavailable,
        }
    }
}

/// Merged result of one forecast call and one air-quality call.
///
/// Every observation field is optional: the services omit fields they
/// have no data for, and an absent field renders as a placeholder
/// downstream. Defaults (temperature 20 for clothing advice, UV 0 for
/// the risk gauge) are applied at presentation time only, never here,
/// so "missing" and "zero" stay distinguishable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub wind_kph: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub weather_code: Option<i32>,
    pub uv_index: Option<f64>,
    pub pm2_5: Pm25,
    pub fetched_at: DateTime<Utc>,
}

/// Trim a raw city query, rejecting empty or whitespace-only input.
///
/// Callers validate before touching the network; an `EmptyQuery`
/// rejection here guarantees no request was issued.
pub fn normalize_query(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyQuery);
    }
    Ok(trimmed)
}
