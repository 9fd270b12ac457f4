//! The two lookup endpoints and their error bodies.

use std::fmt;

use foundation::{LatLng, fixed};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde_json::Value;

use crate::scalar::{self, number_text};

pub const ADDRESS_ENDPOINT: &str = "/api/air-quality";
pub const COORDINATES_ENDPOINT: &str = "/api/air-quality/coordinates-only";

/// Banner text when a failed response carries no usable message.
pub const GENERIC_FAILURE: &str = "Request failed.";

/// Characters left unescaped in a query component: ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Decimal places used when a map click becomes a query.
pub const CLICK_PRECISION: usize = 6;

/// One lookup request. Coordinates travel as the text the user supplied;
/// range checking is the server's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Address(String),
    Coordinates { lat: String, lng: String },
}

impl Query {
    pub fn address(text: impl Into<String>) -> Self {
        Query::Address(text.into())
    }

    pub fn coordinates(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Query::Coordinates {
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// Query for a clicked map point, rounded to [`CLICK_PRECISION`] places.
    pub fn clicked(at: LatLng) -> Self {
        Self::coordinates(fixed(at.lat, CLICK_PRECISION), fixed(at.lng, CLICK_PRECISION))
    }

    /// Query for a position reported by a location service, unrounded.
    pub fn located(at: LatLng) -> Self {
        Self::coordinates(number_text(at.lat), number_text(at.lng))
    }

    /// Path and query string, relative to the API origin.
    pub fn path(&self) -> String {
        match self {
            Query::Address(address) => {
                format!("{ADDRESS_ENDPOINT}?address={}", encode_component(address))
            }
            Query::Coordinates { lat, lng } => format!(
                "{COORDINATES_ENDPOINT}?lat={}&lng={}",
                encode_component(lat),
                encode_component(lng)
            ),
        }
    }

    /// Absolute URL under `base`; an empty base yields the relative path.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Address(address) => write!(f, "address {address:?}"),
            Query::Coordinates { lat, lng } => write!(f, "coordinates ({lat}, {lng})"),
        }
    }
}

/// Percent-encodes one query component the way browsers'
/// `encodeURIComponent` does.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "scalar::lenient_text")]
    error: Option<String>,
}

/// The `error` message of a failed response, when the body carries one.
pub fn server_error_message(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body).ok()? {
        value @ Value::Object(_) => serde_json::from_value::<ErrorBody>(value).ok()?.error,
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{Query, encode_component, server_error_message};
    use foundation::LatLng;

    #[test]
    fn address_path_encodes_like_a_browser() {
        let q = Query::address("1600 Pennsylvania Ave");
        assert_eq!(q.path(), "/api/air-quality?address=1600%20Pennsylvania%20Ave");
        assert_eq!(encode_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_component("it's (ok)!*~_.-"), "it's%20(ok)!*~_.-");
        assert_eq!(encode_component("Zürich"), "Z%C3%BCrich");
    }

    #[test]
    fn coordinates_path_carries_both_values() {
        let q = Query::coordinates("39.9526", "-75.1652");
        assert_eq!(
            q.path(),
            "/api/air-quality/coordinates-only?lat=39.9526&lng=-75.1652"
        );
    }

    #[test]
    fn url_joins_base_without_double_slash() {
        let q = Query::coordinates("1", "2");
        assert_eq!(
            q.url("http://127.0.0.1:5000/"),
            "http://127.0.0.1:5000/api/air-quality/coordinates-only?lat=1&lng=2"
        );
        assert_eq!(q.url(""), q.path());
    }

    #[test]
    fn clicked_points_round_to_six_places() {
        let q = Query::clicked(LatLng::new(39.95261234, -75.1652));
        assert_eq!(q, Query::coordinates("39.952612", "-75.165200"));
    }

    #[test]
    fn located_points_keep_full_precision() {
        let q = Query::located(LatLng::new(39.9526, -75.0));
        assert_eq!(q, Query::coordinates("39.9526", "-75"));
    }

    #[test]
    fn error_message_is_read_from_body() {
        assert_eq!(
            server_error_message(br#"{"error":"geocoding failed"}"#).as_deref(),
            Some("geocoding failed")
        );
        assert_eq!(server_error_message(br#"{"error":""}"#), None);
        assert_eq!(server_error_message(br#"{"detail":"x"}"#), None);
        assert_eq!(server_error_message(b"Internal Server Error"), None);
        assert_eq!(server_error_message(br#"["error"]"#), None);
    }
}
