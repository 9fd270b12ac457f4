//! Response payload types.
//!
//! Field names follow the upstream JSON (`AQI`, `Category`, ...). Every field
//! is optional and deserialization never rejects a field for having the wrong
//! type; such fields read as absent.

use foundation::LatLng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::scalar::{self, Scalar};
use crate::select::select_best;

/// Category metadata attached to an observation by the reporting agency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    #[serde(
        rename = "Number",
        default,
        deserialize_with = "scalar::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<Scalar>,
    #[serde(
        rename = "Name",
        default,
        deserialize_with = "scalar::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

/// One reported pollutant reading for a location and hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(
        rename = "AQI",
        default,
        deserialize_with = "scalar::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub aqi: Option<Scalar>,
    #[serde(
        rename = "Category",
        default,
        deserialize_with = "lenient_descriptor",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<CategoryDescriptor>,
    #[serde(
        rename = "ParameterName",
        default,
        deserialize_with = "scalar::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub parameter_name: Option<String>,
    #[serde(
        rename = "ReportingArea",
        default,
        deserialize_with = "scalar::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reporting_area: Option<String>,
    #[serde(
        rename = "StateCode",
        default,
        deserialize_with = "scalar::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub state_code: Option<String>,
    #[serde(
        rename = "DateObserved",
        default,
        deserialize_with = "scalar::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_observed: Option<String>,
    #[serde(
        rename = "HourObserved",
        default,
        deserialize_with = "scalar::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub hour_observed: Option<Scalar>,
    #[serde(
        rename = "LocalTimeZone",
        default,
        deserialize_with = "scalar::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub local_time_zone: Option<String>,
}

impl Observation {
    /// The parsed index value, if the reported one is a finite number.
    pub fn index(&self) -> Option<f64> {
        self.aqi.as_ref().and_then(Scalar::as_number)
    }

    pub fn category_code(&self) -> Option<&Scalar> {
        self.category.as_ref().and_then(|c| c.number.as_ref())
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(|c| c.name.as_deref())
    }

    /// `"<area>, <state>"`, or just the area when no state code is given.
    pub fn area(&self) -> Option<String> {
        let area = self.reporting_area.as_deref()?;
        Some(match self.state_code.as_deref() {
            Some(state) => format!("{area}, {state}"),
            None => area.to_string(),
        })
    }
}

/// Full response envelope for one lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(
        default,
        deserialize_with = "scalar::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<Scalar>,
    #[serde(
        default,
        deserialize_with = "scalar::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<Scalar>,
    #[serde(
        default,
        deserialize_with = "scalar::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub formatted_address: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub input_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_observations")]
    pub airnow_observations: Vec<Observation>,
}

/// Shown in place of an address for coordinate lookups.
pub const COORDINATES_LOOKUP: &str = "Coordinates lookup";

impl Payload {
    /// Decodes a response body.
    ///
    /// A body that is not a JSON object decodes as the empty payload.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_else(|err| {
                tracing::debug!("payload fields unreadable, using empty payload: {err}");
                Payload::default()
            }),
            Ok(_) => {
                tracing::debug!("payload is not a JSON object, using empty payload");
                Payload::default()
            }
            Err(err) => {
                tracing::debug!("payload is not JSON ({err}), using empty payload");
                Payload::default()
            }
        }
    }

    /// Reported position, with (0, 0) standing in for unusable components.
    pub fn position(&self) -> LatLng {
        LatLng::or_origin(
            self.latitude.as_ref().and_then(Scalar::as_number),
            self.longitude.as_ref().and_then(Scalar::as_number),
        )
    }

    pub fn best_observation(&self) -> Option<&Observation> {
        select_best(&self.airnow_observations)
    }

    /// Resolved address, else the echoed input, else a coordinates label.
    pub fn display_address(&self) -> &str {
        self.formatted_address
            .as_deref()
            .or(self.input_address.as_deref())
            .unwrap_or(COORDINATES_LOOKUP)
    }
}

fn lenient_descriptor<'de, D>(deserializer: D) -> Result<Option<CategoryDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Non-array values read as an empty list; non-object entries keep their
/// position as empty observations.
fn lenient_observations<'de, D>(deserializer: D) -> Result<Vec<Observation>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
            _ => Observation::default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{COORDINATES_LOOKUP, CategoryDescriptor, Observation, Payload};
    use crate::scalar::Scalar;
    use foundation::LatLng;
    use pretty_assertions::assert_eq;

    const AIRNOW_BODY: &str = r#"{
        "input_address": "1600 Pennsylvania Ave",
        "formatted_address": "1600 Pennsylvania Ave NW, Washington, DC 20500",
        "latitude": 38.897675,
        "longitude": -77.036547,
        "airnow_observations": [
            {
                "DateObserved": "2024-01-01",
                "HourObserved": 5,
                "LocalTimeZone": "EST",
                "ReportingArea": "Metropolitan Washington",
                "StateCode": "DC",
                "Latitude": 38.919,
                "Longitude": -77.013,
                "ParameterName": "O3",
                "AQI": 32,
                "Category": { "Number": 1, "Name": "Good" }
            },
            {
                "DateObserved": "2024-01-01",
                "HourObserved": 5,
                "LocalTimeZone": "EST",
                "ReportingArea": "Metropolitan Washington",
                "StateCode": "DC",
                "ParameterName": "PM2.5",
                "AQI": 61,
                "Category": { "Number": 2, "Name": "Moderate" }
            }
        ]
    }"#;

    #[test]
    fn decodes_upstream_field_names() {
        let payload = Payload::from_body(AIRNOW_BODY.as_bytes());
        assert_eq!(payload.airnow_observations.len(), 2);
        assert_eq!(
            payload.airnow_observations[1],
            Observation {
                aqi: Some(Scalar::Number(61.0)),
                category: Some(CategoryDescriptor {
                    number: Some(Scalar::Number(2.0)),
                    name: Some("Moderate".to_string()),
                }),
                parameter_name: Some("PM2.5".to_string()),
                reporting_area: Some("Metropolitan Washington".to_string()),
                state_code: Some("DC".to_string()),
                date_observed: Some("2024-01-01".to_string()),
                hour_observed: Some(Scalar::Number(5.0)),
                local_time_zone: Some("EST".to_string()),
            }
        );
        assert_eq!(payload.position(), LatLng::new(38.897675, -77.036547));
        assert_eq!(
            payload.display_address(),
            "1600 Pennsylvania Ave NW, Washington, DC 20500"
        );
    }

    #[test]
    fn best_observation_uses_highest_index() {
        let payload = Payload::from_body(AIRNOW_BODY.as_bytes());
        let best = payload.best_observation().unwrap();
        assert_eq!(best.parameter_name.as_deref(), Some("PM2.5"));
    }

    #[test]
    fn non_json_and_non_object_bodies_are_empty() {
        assert_eq!(Payload::from_body(b"<html>oops</html>"), Payload::default());
        assert_eq!(Payload::from_body(b"[1, 2]"), Payload::default());
        assert_eq!(Payload::from_body(b""), Payload::default());
        assert_eq!(Payload::default().position(), LatLng::new(0.0, 0.0));
    }

    #[test]
    fn mistyped_fields_read_as_absent() {
        let body = br#"{
            "latitude": "12.5",
            "longitude": {"deg": 3},
            "formatted_address": "",
            "airnow_observations": [null, {"AQI": [1], "Category": "Good", "ParameterName": 7}]
        }"#;
        let payload = Payload::from_body(body);
        assert_eq!(payload.position(), LatLng::new(12.5, 0.0));
        assert_eq!(payload.formatted_address, None);
        assert_eq!(payload.display_address(), COORDINATES_LOOKUP);
        assert_eq!(payload.airnow_observations.len(), 2);
        assert_eq!(payload.airnow_observations[0], Observation::default());
        assert_eq!(payload.airnow_observations[1].aqi, None);
        assert_eq!(payload.airnow_observations[1].category, None);
        assert_eq!(
            payload.airnow_observations[1].parameter_name.as_deref(),
            Some("7")
        );
    }

    #[test]
    fn observations_that_are_not_a_list_are_dropped() {
        let payload = Payload::from_body(br#"{"airnow_observations": {"AQI": 10}}"#);
        assert!(payload.airnow_observations.is_empty());
        assert!(payload.best_observation().is_none());
    }

    #[test]
    fn address_falls_back_to_input_then_label() {
        let mut payload = Payload {
            input_address: Some("Philadelphia".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.display_address(), "Philadelphia");
        payload.input_address = None;
        assert_eq!(payload.display_address(), COORDINATES_LOOKUP);
    }

    #[test]
    fn area_joins_state_code_when_present() {
        let mut obs = Observation {
            reporting_area: Some("Philadelphia".to_string()),
            state_code: Some("PA".to_string()),
            ..Default::default()
        };
        assert_eq!(obs.area().as_deref(), Some("Philadelphia, PA"));
        obs.state_code = None;
        assert_eq!(obs.area().as_deref(), Some("Philadelphia"));
        obs.reporting_area = None;
        assert_eq!(obs.area(), None);
    }
}
