//! Pure derivation logic: everything between a fetched snapshot and
//! the rendered output lives here, stateless and independently
//! testable. No function in this module performs I/O.

use chrono::{DateTime, Utc};

use crate::model::{Pm25, WeatherSnapshot};

/// WMO weather codes that add the umbrella suffix to clothing advice.
const RAIN_CODES: [i32; 6] = [61, 63, 65, 80, 81, 82];

/// WMO weather codes that add the boots suffix.
const SNOW_CODES: [i32; 3] = [71, 73, 75];

/// Icon name and label for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub icon: &'static str,
    pub label: &'static str,
}

/// Look up icon and label for a WMO weather code.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn condition_for(code: i32) -> Condition {
    let (icon, label) = match code {
        0 => ("wi-day-sunny", "Clear sky"),
        1 => ("wi-day-cloudy", "Mainly clear"),
        2 => ("wi-cloud", "Partly cloudy"),
        3 => ("wi-cloudy", "Overcast"),
        45 => ("wi-fog", "Fog"),
        48 => ("wi-fog", "Depositing rime fog"),
        51 => ("wi-sprinkle", "Light drizzle"),
        53 => ("wi-sprinkle", "Moderate drizzle"),
        55 => ("wi-sprinkle", "Dense drizzle"),
        56 => ("wi-sleet", "Light freezing drizzle"),
        57 => ("wi-sleet", "Dense freezing drizzle"),
        61 => ("wi-rain", "Slight rain"),
        63 => ("wi-rain", "Moderate rain"),
        65 => ("wi-rain", "Heavy rain"),
        66 => ("wi-sleet", "Light freezing rain"),
        67 => ("wi-sleet", "Heavy freezing rain"),
        71 => ("wi-snow", "Slight snow fall"),
        73 => ("wi-snow", "Moderate snow fall"),
        75 => ("wi-snow", "Heavy snow fall"),
        77 => ("wi-snowflake-cold", "Snow grains"),
        80 => ("wi-showers", "Slight rain showers"),
        81 => ("wi-showers", "Moderate rain showers"),
        82 => ("wi-showers", "Violent rain showers"),
        85 => ("wi-snow-wind", "Slight snow showers"),
        86 => ("wi-snow-wind", "Heavy snow showers"),
        95 => ("wi-thunderstorm", "Thunderstorm"),
        96 => ("wi-storm-showers", "Thunderstorm with slight hail"),
        99 => ("wi-storm-showers", "Thunderstorm with heavy hail"),
        _ => ("wi-alien", "Unknown"),
    };
    Condition { icon, label }
}

/// Feels-like temperature in whole degrees Celsius.
///
/// `round(temp + wind*0.1 - humidity*0.05)`, with any missing input
/// treated as 0. This is the product's bespoke heuristic, not a
/// meteorological wind-chill or heat-index formula, and is preserved
/// as-is.
pub fn feels_like_c(snapshot: &WeatherSnapshot) -> i32 {
    let temp = snapshot.temperature_c.unwrap_or(0.0);
    let wind = snapshot.wind_kph.unwrap_or(0.0);
    let humidity = snapshot.humidity_pct.unwrap_or(0.0);

    (temp + wind * 0.1 - humidity * 0.05).round() as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQualityLevel {
    Good,
    Moderate,
    Unhealthy,
}

impl AirQualityLevel {
    pub fn from_pm25(pm2_5: f64) -> Self {
        if pm2_5 <= 12.0 {
            AirQualityLevel::Good
        } else if pm2_5 <= 35.0 {
            AirQualityLevel::Moderate
        } else {
            AirQualityLevel::Unhealthy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AirQualityLevel::Good => "Good",
            AirQualityLevel::Moderate => "Moderate",
            AirQualityLevel::Unhealthy => "Unhealthy",
        }
    }
}

/// Air-quality gauge: PM2.5 value, category and bar width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirQualityGauge {
    pub pm2_5: f64,
    pub level: AirQualityLevel,
    /// Bar width, `min(pm2_5, 100)` percent.
    pub percent: f64,
}

/// Build the air-quality gauge, or `None` when the sample is
/// unavailable (the gauge is suppressed, not shown as a category).
pub fn air_quality_gauge(pm2_5: Pm25) -> Option<AirQualityGauge> {
    match pm2_5 {
        Pm25::Value(v) => Some(AirQualityGauge {
            pm2_5: v,
            level: AirQualityLevel::from_pm25(v),
            percent: v.min(100.0),
        }),
        Pm25::Unavailable => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvRisk {
    Low,
    Moderate,
    High,
}

impl UvRisk {
    pub fn from_index(uv_index: f64) -> Self {
        if uv_index <= 2.0 {
            UvRisk::Low
        } else if uv_index <= 5.0 {
            UvRisk::Moderate
        } else {
            UvRisk::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UvRisk::Low => "Low",
            UvRisk::Moderate => "Moderate",
            UvRisk::High => "High",
        }
    }
}

/// UV gauge: index, risk category and bar width. A missing index
/// defaults to 0 here, at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvGauge {
    pub index: f64,
    pub risk: UvRisk,
    /// Bar width, `min(index * 10, 100)` percent.
    pub percent: f64,
}

pub fn uv_gauge(uv_index: Option<f64>) -> UvGauge {
    let index = uv_index.unwrap_or(0.0);
    UvGauge {
        index,
        risk: UvRisk::from_index(index),
        percent: (index * 10.0).min(100.0),
    }
}

/// Clothing advice from temperature bands plus weather-code suffixes.
///
/// A missing temperature defaults to 20 (the mild band). Rain and snow
/// suffixes are additive and may both apply; rain comes first.
pub fn clothing_advice(temperature_c: Option<f64>, weather_code: Option<i32>) -> String {
    let temp = temperature_c.unwrap_or(20.0);

    let base = if temp > 30.0 {
        "Light clothing and sunscreen"
    } else if temp > 20.0 {
        "T-shirts and shorts weather"
    } else if temp > 10.0 {
        "Light jacket recommended"
    } else {
        "Bundle up! Wear warm layers"
    };

    let mut advice = base.to_string();

    if let Some(code) = weather_code {
        if RAIN_CODES.contains(&code) {
            advice.push_str(" • Bring an umbrella!");
        }
        if SNOW_CODES.contains(&code) {
            advice.push_str(" • Wear waterproof boots!");
        }
    }

    advice
}

/// View-model for one rendered result. The CLI formats this as text; a
/// different frontend could render the same fields without touching
/// the derivation logic.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_c: Option<f64>,
    pub feels_like_c: i32,
    pub precipitation_mm: Option<f64>,
    pub wind_kph: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub condition: Condition,
    pub air_quality: Option<AirQualityGauge>,
    pub uv: UvGauge,
    pub clothing: String,
    pub fetched_at: DateTime<Utc>,
}

/// Assemble the full report for a resolved city and fetched snapshot.
pub fn build_report(city: &str, snapshot: &WeatherSnapshot) -> WeatherReport {
    // An absent weather code renders as clear sky but adds no
    // rain/snow suffix, since the defaulted 0 is in neither set.
    let condition = condition_for(snapshot.weather_code.unwrap_or(0));

    WeatherReport {
        city: city.to_string(),
        temperature_c: snapshot.temperature_c,
        feels_like_c: feels_like_c(snapshot),
        precipitation_mm: snapshot.precipitation_mm,
        wind_kph: snapshot.wind_kph,
        humidity_pct: snapshot.humidity_pct,
        condition,
        air_quality: air_quality_gauge(snapshot.pm2_5),
        uv: uv_gauge(snapshot.uv_index),
        clothing: clothing_advice(snapshot.temperature_c, snapshot.weather_code),
        fetched_at: snapshot.fetched_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        temperature_c: Option<f64>,
        wind_kph: Option<f64>,
        humidity_pct: Option<f64>,
    ) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c,
            precipitation_mm: None,
            wind_kph,
            humidity_pct,
            weather_code: None,
            uv_index: None,
            pm2_5: Pm25::Unavailable,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn feels_like_combines_temp_wind_and_humidity() {
        // 20 + 10*0.1 - 50*0.05 = 18.5, rounded to 19.
        let s = snapshot(Some(20.0), Some(10.0), Some(50.0));
        assert_eq!(feels_like_c(&s), 19);
    }

    #[test]
    fn feels_like_treats_missing_inputs_as_zero() {
        assert_eq!(feels_like_c(&snapshot(None, None, None)), 0);
        assert_eq!(feels_like_c(&snapshot(Some(10.0), None, None)), 10);
        assert_eq!(feels_like_c(&snapshot(None, Some(20.0), None)), 2);
    }

    #[test]
    fn condition_lookup_known_codes() {
        assert_eq!(condition_for(0).label, "Clear sky");
        assert_eq!(condition_for(61).label, "Slight rain");
        assert_eq!(condition_for(95).label, "Thunderstorm");
        assert_eq!(condition_for(95).icon, "wi-thunderstorm");
    }

    #[test]
    fn condition_lookup_unknown_code_falls_back() {
        let c = condition_for(42);
        assert_eq!(c.label, "Unknown");
        assert_eq!(c.icon, "wi-alien");
    }

    #[test]
    fn air_quality_thresholds() {
        assert_eq!(AirQualityLevel::from_pm25(0.0), AirQualityLevel::Good);
        assert_eq!(AirQualityLevel::from_pm25(12.0), AirQualityLevel::Good);
        assert_eq!(AirQualityLevel::from_pm25(12.1), AirQualityLevel::Moderate);
        assert_eq!(AirQualityLevel::from_pm25(35.0), AirQualityLevel::Moderate);
        assert_eq!(AirQualityLevel::from_pm25(35.1), AirQualityLevel::Unhealthy);
    }

    #[test]
    fn air_quality_gauge_width_caps_at_100() {
        let g = air_quality_gauge(Pm25::Value(250.0)).expect("gauge");
        assert_eq!(g.percent, 100.0);
        assert_eq!(g.level, AirQualityLevel::Unhealthy);

        let g = air_quality_gauge(Pm25::Value(40.0)).expect("gauge");
        assert_eq!(g.percent, 40.0);
    }

    #[test]
    fn air_quality_gauge_suppressed_when_unavailable() {
        assert!(air_quality_gauge(Pm25::Unavailable).is_none());
    }

    #[test]
    fn uv_thresholds() {
        assert_eq!(UvRisk::from_index(0.0), UvRisk::Low);
        assert_eq!(UvRisk::from_index(2.0), UvRisk::Low);
        assert_eq!(UvRisk::from_index(2.1), UvRisk::Moderate);
        assert_eq!(UvRisk::from_index(5.0), UvRisk::Moderate);
        assert_eq!(UvRisk::from_index(5.1), UvRisk::High);
    }

    #[test]
    fn uv_gauge_width_is_ten_percent_per_point_capped() {
        assert_eq!(uv_gauge(Some(3.0)).percent, 30.0);
        assert_eq!(uv_gauge(Some(11.0)).percent, 100.0);
    }

    #[test]
    fn uv_gauge_defaults_missing_index_to_zero() {
        let g = uv_gauge(None);
        assert_eq!(g.index, 0.0);
        assert_eq!(g.risk, UvRisk::Low);
        assert_eq!(g.percent, 0.0);
    }

    #[test]
    fn clothing_bands() {
        assert_eq!(
            clothing_advice(Some(31.0), None),
            "Light clothing and sunscreen"
        );
        assert_eq!(
            clothing_advice(Some(25.0), None),
            "T-shirts and shorts weather"
        );
        assert_eq!(
            clothing_advice(Some(15.0), None),
            "Light jacket recommended"
        );
        assert_eq!(
            clothing_advice(Some(5.0), None),
            "Bundle up! Wear warm layers"
        );
    }

    #[test]
    fn clothing_missing_temperature_defaults_to_mild_band() {
        // 20 is not > 20, so the default lands in the jacket band.
        assert_eq!(clothing_advice(None, None), "Light jacket recommended");
    }

    #[test]
    fn clothing_rain_code_appends_umbrella_suffix() {
        let advice = clothing_advice(Some(25.0), Some(61));
        assert!(advice.starts_with("T-shirts and shorts weather"));
        assert!(advice.contains("Bring an umbrella!"));
        assert!(!advice.contains("waterproof boots"));
    }

    #[test]
    fn clothing_snow_code_appends_boots_suffix() {
        let advice = clothing_advice(Some(5.0), Some(73));
        assert!(advice.starts_with("Bundle up! Wear warm layers"));
        assert!(advice.contains("Wear waterproof boots!"));
        assert!(!advice.contains("umbrella"));
    }

    #[test]
    fn clothing_non_precipitation_code_adds_no_suffix() {
        assert_eq!(clothing_advice(Some(25.0), Some(3)), "T-shirts and shorts weather");
    }

    #[test]
    fn report_defaults_condition_code_to_clear_sky() {
        let s = snapshot(Some(22.0), None, None);
        let report = build_report("Oslo", &s);
        assert_eq!(report.condition.label, "Clear sky");
        assert_eq!(report.city, "Oslo");
        assert_eq!(report.clothing, "T-shirts and shorts weather");
        assert!(report.air_quality.is_none());
    }
}
