//! Centered moving average over a sparse daily series.
//!
//! Neighbours are found by calendar offset, not by position: for a point on
//! day `d` the engine looks up `d - k` and `d + k` for `k in 1..=half` and
//! averages whatever is present. Missing days shrink the divisor; they are
//! never treated as zero.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::DateKey;
use crate::error::SeriesError;
use crate::series::{Observation, TimeSeries};

/// Validated smoothing window: an odd positive number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct WindowSize(u32);

impl WindowSize {
    /// Sizes offered by the chart's window slider.
    pub const PRESETS: [u32; 5] = [3, 5, 7, 9, 11];

    /// # Errors
    /// Returns `InvalidWindowSize` for zero, negative or even sizes.
    pub fn new(size: i64) -> Result<Self, SeriesError> {
        if size <= 0 || size % 2 == 0 || size > i64::from(u32::MAX) {
            return Err(SeriesError::InvalidWindowSize(size));
        }
        Ok(Self(size as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Days inspected on each side of a point.
    pub fn half(self) -> u32 {
        self.0 / 2
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for WindowSize {
    type Error = SeriesError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<WindowSize> for i64 {
    fn from(window: WindowSize) -> Self {
        i64::from(window.0)
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate `window_size` and smooth the series.
///
/// # Errors
/// Returns `InvalidWindowSize` for even or non-positive sizes. Nothing is
/// computed in that case.
pub fn compute_averages(
    series: &TimeSeries,
    window_size: i64,
) -> Result<Vec<Observation>, SeriesError> {
    let window = WindowSize::new(window_size)?;
    Ok(smooth(series, window))
}

/// Smooth the series with an already-validated window.
///
/// Returns a copy of every observation with `average` filled in; the series
/// itself is only read.
pub fn smooth(series: &TimeSeries, window: WindowSize) -> Vec<Observation> {
    // No neighbour lies further away than the series span.
    let span = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (last.date - first.date).num_days().unsigned_abs(),
        _ => 0,
    };
    let half = u64::from(window.half()).min(span);

    series
        .iter()
        .map(|obs| {
            let mut sum = obs.value;
            let mut count = 1u32;

            for offset in 1..=half {
                let days = Days::new(offset);
                for neighbour in [
                    obs.date.checked_sub_days(days),
                    obs.date.checked_add_days(days),
                ] {
                    if let Some(value) = neighbour.and_then(|d| value_on(series, d)) {
                        sum += value;
                        count += 1;
                    }
                }
            }

            Observation {
                average: Some(sum / f64::from(count)),
                ..obs.clone()
            }
        })
        .collect()
}

fn value_on(series: &TimeSeries, date: NaiveDate) -> Option<f64> {
    series.find_by_key(DateKey::from(date)).map(|o| o.value)
}
