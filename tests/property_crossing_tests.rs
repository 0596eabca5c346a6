use ejection_lens::core::{Crossing, CrossingDirection, LeadTime, first_crossing, lead_time};
use proptest::prelude::*;

fn brute_force(
    values: &[f64],
    threshold: f64,
    direction: CrossingDirection,
) -> Option<usize> {
    let inside = |value: f64| match direction {
        CrossingDirection::Rising => value >= threshold,
        CrossingDirection::Falling => value <= threshold,
    };
    (0..values.len()).find(|&i| inside(values[i]) && (i == 0 || !inside(values[i - 1])))
}

fn direction_strategy() -> impl Strategy<Value = CrossingDirection> {
    prop_oneof![
        Just(CrossingDirection::Rising),
        Just(CrossingDirection::Falling)
    ]
}

proptest! {
    #[test]
    fn first_crossing_matches_brute_force_scan(
        values in prop::collection::vec(-100.0f64..100.0, 1..128),
        threshold in -100.0f64..100.0,
        direction in direction_strategy(),
    ) {
        let time: Vec<f64> = (0..values.len()).map(|i| i as f64 * 0.25).collect();

        let crossing = first_crossing(&time, &values, threshold, direction);
        match brute_force(&values, threshold, direction) {
            Some(index) => {
                prop_assert_eq!(crossing, Crossing::At { index, time: time[index] });
            }
            None => {
                prop_assert_eq!(crossing, Crossing::NotCrossed);
            }
        }
    }

    #[test]
    fn samples_before_crossing_stay_outside_warning_region(
        values in prop::collection::vec(-10.0f64..10.0, 1..64),
        threshold in -10.0f64..10.0,
        direction in direction_strategy(),
    ) {
        let time: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

        let limit = first_crossing(&time, &values, threshold, direction)
            .index()
            .unwrap_or(values.len());
        for value in &values[..limit] {
            prop_assert!(!direction.is_past(*value, threshold));
        }
    }

    #[test]
    fn lead_time_stays_within_percent_range_for_crossings_before_ejection(
        ejection in 0.001f64..1.0e6,
        fraction in 0.0f64..=1.0,
    ) {
        let crossing_time = ejection * fraction;
        let lead = lead_time(crossing_time, ejection).expect("lead time");

        prop_assert!(lead >= -1e-9 && lead <= 100.0 + 1e-9);
        let expected = LeadTime::from_crossing(Crossing::At { index: 0, time: crossing_time }, ejection)
            .expect("lead");
        prop_assert_eq!(expected, LeadTime::Percent(lead));
    }
}
