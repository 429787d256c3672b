//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration handling (service endpoints, HTTP timeout)
//! - The Open-Meteo client: geocoding resolution and the joined
//!   forecast + air-quality fetch
//! - Pure report derivation (feels-like, condition lookup, air-quality
//!   and UV gauges, clothing advice)
//!
//! It is used by `skycast-cli`, but can also be reused by other
//! binaries or services.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod report;

pub use api::OpenMeteoClient;
pub use config::Config;
pub use error::Error;
pub use model::{Coordinates, Pm25, WeatherSnapshot, normalize_query};
pub use report::{WeatherReport, build_report};
