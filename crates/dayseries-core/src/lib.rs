//! # dayseries Core Library
//!
//! One numeric observation per calendar day, with a centered moving average
//! over the days that are actually recorded. The CLI is a thin layer over
//! this crate; a chart front end would consume the same [`SeriesView`].
//!
//! ## Architecture
//!
//! - **Series**: sorted, duplicate-free daily observations with O(1) date
//!   lookup and insert-or-update by date
//! - **Smoothing**: centered moving average that skips missing days rather
//!   than zero-filling them
//! - **Storage**: JSON series file rewritten on every upsert, TOML
//!   configuration
//! - **Store**: the mutex-guarded owner tying the above together
//!
//! ## Key Components
//!
//! - [`TimeSeries`]: the in-memory series
//! - [`smooth`] / [`compute_averages`]: the smoothing engine
//! - [`SeriesStore`]: query surface (`series_with_averages`,
//!   `value_for_date`, `upsert_value_for_date`)
//! - [`Config`]: application configuration

pub mod calendar;
pub mod chart;
pub mod error;
pub mod series;
pub mod smoothing;
pub mod storage;
pub mod store;

pub use calendar::{check_record_date, display_short, parse_calendar_date, DateKey};
pub use chart::{ChartPoint, SeriesView};
pub use error::{ConfigError, CoreError, SeriesError};
pub use series::{DuplicatePolicy, Observation, RawRecord, TimeSeries, UpsertOutcome};
pub use smoothing::{compute_averages, smooth, WindowSize};
pub use storage::{Config, JsonFileStore, SeriesPersistence};
pub use store::{SeriesStore, StoreOptions, UpsertAck, WriteFailurePolicy};
