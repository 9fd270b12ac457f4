//! Plain-text rendering of the dashboard for the terminal.

use std::fmt::Write;

use airquality::legend_lines;
use dashboard::{Dashboard, RecordingMap};
use foundation::math::circle_bounds;

/// Everything the browser dashboard would show, one field per line.
pub fn render(dashboard: &Dashboard<RecordingMap>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", dashboard.status().text());

    if dashboard.banner().is_visible() {
        let _ = writeln!(out, "error: {}", dashboard.banner().text());
    }

    let Some(readout) = dashboard.readout() else {
        return out;
    };

    let rows = [
        ("AQI", readout.aqi.as_str()),
        ("Category", readout.category_text.as_str()),
        ("Pollutant", readout.pollutant.as_str()),
        ("Area", readout.area.as_str()),
        ("Observed", readout.observed.as_str()),
        ("Address", readout.address.as_str()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<10} {value}");
    }
    let _ = writeln!(out, "{:<10} {}, {}", "Location", readout.latitude, readout.longitude);
    let _ = writeln!(out, "{:<10} {:.1}%", "Gauge", readout.needle_pct);

    if let Some((center, style)) = dashboard.map().circle() {
        let b = circle_bounds(center, style.radius_m);
        let _ = writeln!(
            out,
            "{:<10} {} m {} ({:.5}, {:.5}) to ({:.5}, {:.5})",
            "Radius", style.radius_m, style.color, b.south, b.west, b.north, b.east
        );
    }
    out
}

pub fn legend() -> String {
    legend_lines().join("\n")
}

#[cfg(test)]
mod tests {
    use super::{legend, render};
    use airquality::Payload;
    use dashboard::{Dashboard, RecordingMap, RequestError};
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_a_successful_lookup() {
        let mut d = Dashboard::new(RecordingMap::new());
        let pending = d.start();
        let payload = Payload::from_body(
            br#"{"latitude": 39.9526, "longitude": -75.1652,
                 "airnow_observations": [{"AQI": 150, "Category": {"Number": 3},
                   "ParameterName": "PM2.5", "ReportingArea": "Philadelphia", "StateCode": "PA",
                   "DateObserved": "2024-01-01", "HourObserved": 5, "LocalTimeZone": "EST"}]}"#,
        );
        assert!(d.complete(&pending.ticket, Ok(payload)));

        let text = render(&d);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "API: Active");
        assert_eq!(lines[1], "AQI        150");
        assert_eq!(lines[2], "Category   3. Unhealthy for Sensitive Groups");
        assert_eq!(lines[5], "Observed   2024-01-01 05:00 EST");
        assert_eq!(lines[6], "Address    Coordinates lookup");
        assert_eq!(lines[7], "Location   39.95260, -75.16520");
        assert_eq!(lines[8], "Gauge      50.0%");
        assert!(lines[9].starts_with("Radius     2400 m #df8a2d ("));
    }

    #[test]
    fn failure_shows_status_and_banner_only() {
        let mut d = Dashboard::new(RecordingMap::new());
        let pending = d.submit_address("somewhere").unwrap();
        d.complete(
            &pending.ticket,
            Err(RequestError::Server {
                status: 500,
                message: Some("geocoding failed".to_string()),
            }),
        );
        assert_eq!(render(&d), "API: Error\nerror: geocoding failed\n");
    }

    #[test]
    fn legend_lists_every_level() {
        let text = legend();
        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("1. Good\n2. Moderate"));
        assert!(text.ends_with("7. Unavailable"));
    }
}
