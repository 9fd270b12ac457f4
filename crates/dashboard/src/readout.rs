use airquality::{Category, Observation, Payload, Scalar, UNAVAILABLE, format_observed, normalize};
use foundation::{LatLng, clamp, fixed};

/// Index value at which the gauge needle reaches the right edge.
pub const NEEDLE_FULL_SCALE: f64 = 300.0;

/// Decimal places for displayed coordinates.
pub const COORDINATE_PLACES: usize = 5;

/// Every text field the dashboard shows for one lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub aqi: String,
    pub category: Category,
    /// `"<n>. <name>"`.
    pub category_text: String,
    pub pollutant: String,
    pub area: String,
    pub observed: String,
    pub address: String,
    pub position: LatLng,
    pub latitude: String,
    pub longitude: String,
    /// Gauge needle offset, 0..=100 percent.
    pub needle_pct: f64,
}

impl Readout {
    pub fn from_payload(payload: &Payload) -> Self {
        let best = payload.best_observation();
        let aqi = best.and_then(|obs| obs.aqi.as_ref());
        let category = normalize(aqi, best.and_then(Observation::category_code));
        let name = best
            .and_then(Observation::category_name)
            .unwrap_or(category.label());
        let position = payload.position();

        Self {
            aqi: aqi.map_or_else(|| UNAVAILABLE.to_string(), Scalar::to_text),
            category,
            category_text: format!("{}. {name}", category.number()),
            pollutant: best
                .and_then(|obs| obs.parameter_name.clone())
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
            area: best
                .and_then(Observation::area)
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
            observed: format_observed(best),
            address: payload.display_address().to_string(),
            position,
            latitude: fixed(position.lat, COORDINATE_PLACES),
            longitude: fixed(position.lng, COORDINATE_PLACES),
            needle_pct: needle_pct(aqi),
        }
    }
}

fn needle_pct(aqi: Option<&Scalar>) -> f64 {
    aqi.and_then(Scalar::as_number)
        .map_or(0.0, |v| clamp(v / NEEDLE_FULL_SCALE * 100.0, 0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::Readout;
    use airquality::{Category, CategoryDescriptor, Observation, Payload, Scalar};
    use foundation::LatLng;
    use pretty_assertions::assert_eq;

    fn observation(aqi: Option<Scalar>, code: Option<Scalar>, name: Option<&str>) -> Observation {
        Observation {
            aqi,
            category: Some(CategoryDescriptor {
                number: code,
                name: name.map(str::to_string),
            }),
            parameter_name: Some("PM2.5".to_string()),
            reporting_area: Some("Philadelphia".to_string()),
            state_code: Some("PA".to_string()),
            date_observed: Some("2024-01-01".to_string()),
            hour_observed: Some(5.into()),
            local_time_zone: Some("EST".to_string()),
        }
    }

    #[test]
    fn renders_best_observation() {
        let payload = Payload {
            latitude: Some(39.9526.into()),
            longitude: Some((-75.1652).into()),
            airnow_observations: vec![
                observation(Some(20.into()), Some(1.into()), Some("Good")),
                observation(Some(75.into()), Some(2.into()), Some("Moderate")),
            ],
            ..Default::default()
        };

        assert_eq!(
            Readout::from_payload(&payload),
            Readout {
                aqi: "75".to_string(),
                category: Category::Moderate,
                category_text: "2. Moderate".to_string(),
                pollutant: "PM2.5".to_string(),
                area: "Philadelphia, PA".to_string(),
                observed: "2024-01-01 05:00 EST".to_string(),
                address: "Coordinates lookup".to_string(),
                position: LatLng::new(39.9526, -75.1652),
                latitude: "39.95260".to_string(),
                longitude: "-75.16520".to_string(),
                needle_pct: 25.0,
            }
        );
    }

    #[test]
    fn missing_category_name_uses_label() {
        let payload = Payload {
            airnow_observations: vec![observation(Some(160.into()), None, None)],
            ..Default::default()
        };
        let r = Readout::from_payload(&payload);
        assert_eq!(r.category, Category::Unhealthy);
        assert_eq!(r.category_text, "4. Unhealthy");
    }

    #[test]
    fn upstream_name_is_kept_verbatim() {
        let payload = Payload {
            airnow_observations: vec![observation(
                Some(120.into()),
                Some(3.into()),
                Some("USG"),
            )],
            ..Default::default()
        };
        assert_eq!(Readout::from_payload(&payload).category_text, "3. USG");
    }

    #[test]
    fn empty_payload_renders_unavailable_at_origin() {
        let r = Readout::from_payload(&Payload::default());
        assert_eq!(r.aqi, "Unavailable");
        assert_eq!(r.category, Category::Unavailable);
        assert_eq!(r.category_text, "7. Unavailable");
        assert_eq!(r.pollutant, "Unavailable");
        assert_eq!(r.area, "Unavailable");
        assert_eq!(r.observed, "Unavailable");
        assert_eq!(r.latitude, "0.00000");
        assert_eq!(r.longitude, "0.00000");
        assert_eq!(r.needle_pct, 0.0);
    }

    #[test]
    fn needle_is_clamped() {
        let high = Payload {
            airnow_observations: vec![observation(Some(450.into()), None, None)],
            ..Default::default()
        };
        assert_eq!(Readout::from_payload(&high).needle_pct, 100.0);

        let text = Payload {
            airnow_observations: vec![observation(Some("n/a".into()), None, None)],
            ..Default::default()
        };
        let r = Readout::from_payload(&text);
        assert_eq!(r.needle_pct, 0.0);
        assert_eq!(r.aqi, "n/a");
        assert_eq!(r.category, Category::Unavailable);
    }
}
