//! Property tests for upsert and smoothing invariants.

use chrono::{Days, NaiveDate};
use dayseries_core::{compute_averages, DuplicatePolicy, Observation, TimeSeries, WindowSize};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base().checked_add_days(Days::new(offset)).unwrap()
}

fn series_strategy() -> impl Strategy<Value = TimeSeries> {
    prop::collection::vec((0u64..90, -1_000.0f64..1_000.0), 0..40).prop_map(|points| {
        TimeSeries::from_observations(
            points.into_iter().map(|(d, v)| Observation::new(day(d), v)),
            DuplicatePolicy::LastWins,
        )
        .unwrap()
    })
}

fn window_strategy() -> impl Strategy<Value = i64> {
    (0i64..8).prop_map(|k| 2 * k + 1)
}

fn strictly_ascending(series: &TimeSeries) -> bool {
    series
        .observations()
        .windows(2)
        .all(|pair| pair[0].date < pair[1].date)
}

proptest! {
    #[test]
    fn upsert_is_idempotent(s in series_strategy(), d in 0u64..120, v in -1_000.0f64..1_000.0) {
        let (once, _) = s.with_upsert(day(d), v).unwrap();
        let (twice, _) = once.with_upsert(day(d), v).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn upsert_leaves_exactly_one_observation_for_the_date(
        s in series_strategy(),
        d in 0u64..120,
        v in -1_000.0f64..1_000.0,
    ) {
        let (next, _) = s.with_upsert(day(d), v).unwrap();
        let matching: Vec<_> = next.iter().filter(|o| o.date == day(d)).collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(matching[0].value, v);
        prop_assert_eq!(next.find_by_date(day(d)).map(|o| o.value), Some(v));
    }

    #[test]
    fn upsert_keeps_dates_strictly_ascending(
        s in series_strategy(),
        edits in prop::collection::vec((0u64..120, -1_000.0f64..1_000.0), 1..10),
    ) {
        let mut series = s;
        for (d, v) in edits {
            series.upsert(day(d), v).unwrap();
            prop_assert!(strictly_ascending(&series));
        }
    }

    #[test]
    fn averages_stay_within_value_range(s in series_strategy(), w in window_strategy()) {
        let smoothed = compute_averages(&s, w).unwrap();
        prop_assert_eq!(smoothed.len(), s.len());
        if let Some((lo, hi)) = s.value_range() {
            for obs in &smoothed {
                let avg = obs.average.unwrap();
                prop_assert!(avg >= lo - 1e-9 && avg <= hi + 1e-9, "{} outside [{}, {}]", avg, lo, hi);
            }
        }
    }

    #[test]
    fn smoothing_never_changes_values(s in series_strategy(), w in window_strategy()) {
        let smoothed = compute_averages(&s, w).unwrap();
        for (orig, out) in s.iter().zip(&smoothed) {
            prop_assert_eq!(orig.date, out.date);
            prop_assert_eq!(orig.value, out.value);
        }
    }

    #[test]
    fn even_and_non_positive_windows_are_rejected(s in series_strategy(), k in -20i64..20) {
        let w = 2 * k;
        prop_assert!(compute_averages(&s, w).is_err());
        prop_assert!(WindowSize::new(w).is_err());
    }
}
