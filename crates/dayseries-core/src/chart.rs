//! Rows handed to the chart renderer.
//!
//! The renderer only draws; it expects one row per recorded day carrying the
//! axis label, the raw value and the smoothed value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::display_short;
use crate::series::{Observation, TimeSeries};
use crate::smoothing::{smooth, WindowSize};

/// A single data point for line-chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// X-axis label, `MM.DD`
    pub date_display: String,
    pub value: f64,
    pub avg: f64,
}

impl ChartPoint {
    /// Build from a smoothed observation. A missing average falls back to the
    /// raw value, which is what a one-day window produces anyway.
    pub fn from_observation(obs: &Observation) -> Self {
        Self {
            date: obs.date,
            date_display: display_short(obs.date),
            value: obs.value,
            avg: obs.average.unwrap_or(obs.value),
        }
    }
}

/// Everything the renderer needs for one draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesView {
    pub window: WindowSize,
    pub points: Vec<ChartPoint>,
    /// Y-axis domain; `None` for an empty series
    pub min: Option<f64>,
    pub max: Option<f64>,
}

pub fn chart_points(series: &TimeSeries, window: WindowSize) -> Vec<ChartPoint> {
    smooth(series, window)
        .iter()
        .map(ChartPoint::from_observation)
        .collect()
}

impl SeriesView {
    pub fn build(series: &TimeSeries, window: WindowSize) -> Self {
        let range = series.value_range();
        Self {
            window,
            points: chart_points(series, window),
            min: range.map(|(lo, _)| lo),
            max: range.map(|(_, hi)| hi),
        }
    }
}
