//! Terminal rendering of a weather report. Absent observations render
//! as `--` placeholders; the air-quality and UV bars scale their
//! percent widths onto a fixed-width ASCII gauge.

use skycast_core::WeatherReport;

const BAR_WIDTH: usize = 20;

/// Format the full report as a text block.
pub fn render_report(report: &WeatherReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} - {}\n", report.city, report.condition.label));
    out.push_str(&format!(
        "  Temperature:   {} (feels like {}°C)\n",
        value_or_placeholder(report.temperature_c, "°C"),
        report.feels_like_c
    ));
    out.push_str(&format!(
        "  Precipitation: {}\n",
        value_or_placeholder(report.precipitation_mm, " mm")
    ));
    out.push_str(&format!(
        "  Wind:          {}\n",
        value_or_placeholder(report.wind_kph, " km/h")
    ));
    out.push_str(&format!(
        "  Humidity:      {}\n",
        value_or_placeholder(report.humidity_pct, "%")
    ));

    match &report.air_quality {
        Some(gauge) => {
            out.push_str(&format!(
                "  Air quality:   PM2.5 {} - {}\n",
                gauge.pm2_5,
                gauge.level.label()
            ));
            out.push_str(&format!("                 {}\n", bar(gauge.percent)));
        }
        None => out.push_str("  Air quality:   Data unavailable\n"),
    }

    out.push_str(&format!(
        "  UV index:      {} - {}\n",
        report.uv.index,
        report.uv.risk.label()
    ));
    out.push_str(&format!("                 {}\n", bar(report.uv.percent)));

    out.push_str(&format!("  Clothing:      {}\n", report.clothing));
    out.push_str(&format!(
        "  As of {}",
        report.fetched_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out
}

fn value_or_placeholder(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => "--".to_string(),
    }
}

/// Render a 0–100 percent value as a fixed-width bar.
fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);

    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}
