use crate::UNAVAILABLE;
use crate::model::Observation;

/// Renders when an observation was taken, e.g. `"2024-01-01 05:00 EST"`.
///
/// Missing observation, date or hour gives [`UNAVAILABLE`]. The time zone is
/// optional; without it the result carries no trailing space.
pub fn format_observed(observation: Option<&Observation>) -> String {
    let Some(observation) = observation else {
        return UNAVAILABLE.to_string();
    };
    let (Some(day), Some(hour)) = (
        observation.date_observed.as_deref(),
        observation.hour_observed.as_ref(),
    ) else {
        return UNAVAILABLE.to_string();
    };

    let tz = observation.local_time_zone.as_deref().unwrap_or("");
    format!("{day} {}:00 {tz}", pad_hour(&hour.to_text()))
        .trim()
        .to_string()
}

fn pad_hour(hour: &str) -> String {
    format!("{hour:0>2}")
}
