use crate::model::Observation;

/// Picks the observation to display from one lookup's batch.
///
/// Returns the observation with the highest parsed index; on ties the
/// earliest one wins. When no index parses, the first observation is returned
/// as-is so the batch is never silently dropped.
pub fn select_best(observations: &[Observation]) -> Option<&Observation> {
    let first = observations.first()?;

    let mut best: Option<(&Observation, f64)> = None;
    for obs in observations {
        let Some(index) = obs.index() else {
            continue;
        };
        match best {
            Some((_, top)) if index <= top => {}
            _ => best = Some((obs, index)),
        }
    }

    Some(best.map_or(first, |(obs, _)| obs))
}

#[cfg(test)]
mod tests {
    use super::select_best;
    use crate::model::Observation;
    use crate::scalar::Scalar;

    fn obs(aqi: Option<Scalar>, pollutant: &str) -> Observation {
        Observation {
            aqi,
            parameter_name: Some(pollutant.to_string()),
            ..Default::default()
        }
    }

    fn picked(list: &[Observation]) -> Option<&str> {
        select_best(list).and_then(|o| o.parameter_name.as_deref())
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn highest_index_wins() {
        let list = [
            obs(Some(32.into()), "O3"),
            obs(Some(61.into()), "PM2.5"),
            obs(Some(12.into()), "PM10"),
        ];
        assert_eq!(picked(&list), Some("PM2.5"));
    }

    #[test]
    fn earliest_wins_ties() {
        let list = [
            obs(Some(10.into()), "O3"),
            obs(Some(61.into()), "PM2.5"),
            obs(Some("61".into()), "PM10"),
        ];
        assert_eq!(picked(&list), Some("PM2.5"));
    }

    #[test]
    fn unparseable_entries_are_skipped() {
        let list = [
            obs(None, "CO"),
            obs(Some("n/a".into()), "NO2"),
            obs(Some(5.into()), "O3"),
        ];
        assert_eq!(picked(&list), Some("O3"));
    }

    #[test]
    fn falls_back_to_first_when_nothing_parses() {
        let list = [obs(None, "CO"), obs(Some("n/a".into()), "NO2")];
        assert_eq!(picked(&list), Some("CO"));
    }

    #[test]
    fn negative_indices_still_compare() {
        let list = [obs(Some((-1).into()), "O3"), obs(Some((-5).into()), "PM2.5")];
        assert_eq!(picked(&list), Some("O3"));
    }
}
