//! The owned, process-wide series store.
//!
//! [`SeriesStore`] is the query surface the renderer and the CLI talk to.
//! It loads once on [`open`](SeriesStore::open), serves reads from memory,
//! and rewrites the whole series through its [`SeriesPersistence`] after
//! every upsert. The in-memory upsert and the write run under one mutex, so
//! concurrent submissions are serialized and the last one committed wins.

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chart::SeriesView;
use crate::error::{CoreError, Result};
use crate::series::{DuplicatePolicy, Observation, TimeSeries, UpsertOutcome};
use crate::smoothing::{smooth, WindowSize};
use crate::storage::SeriesPersistence;

/// What an upsert does when the persistence write fails.
///
/// Neither policy rolls back: the in-memory series stays authoritative for
/// the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteFailurePolicy {
    /// Log a warning and acknowledge the upsert with `persisted: false`.
    #[default]
    LogAndContinue,
    /// Return `PersistenceFailed` to the caller.
    Propagate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub duplicate_policy: DuplicatePolicy,
    pub write_failure_policy: WriteFailurePolicy,
}

/// Acknowledgement returned by a successful upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertAck {
    pub date: NaiveDate,
    pub value: f64,
    pub outcome: UpsertOutcome,
    /// False when the write failed under [`WriteFailurePolicy::LogAndContinue`]
    pub persisted: bool,
}

/// Single owner of the in-memory series.
pub struct SeriesStore {
    series: Mutex<TimeSeries>,
    persistence: Box<dyn SeriesPersistence>,
    options: StoreOptions,
}

impl SeriesStore {
    /// Load the series from `persistence`.
    ///
    /// # Errors
    /// Returns an error if storage cannot be read or any record is malformed.
    /// A partial series is never opened.
    pub fn open<P>(persistence: P, options: StoreOptions) -> Result<Self>
    where
        P: SeriesPersistence + 'static,
    {
        let records = persistence.load_records()?;
        let series = TimeSeries::load(records, options.duplicate_policy)?;
        tracing::info!(
            location = %persistence.location(),
            observations = series.len(),
            "loaded series"
        );

        Ok(Self {
            series: Mutex::new(series),
            persistence: Box::new(persistence),
            options,
        })
    }

    fn lock(&self) -> MutexGuard<'_, TimeSeries> {
        // Poison is ignored; upsert never leaves the series half-sorted.
        self.series.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current series without averages.
    pub fn snapshot(&self) -> TimeSeries {
        self.lock().clone()
    }

    /// Every observation with its centered moving average.
    ///
    /// # Errors
    /// Returns `InvalidWindowSize` for even or non-positive sizes.
    pub fn series_with_averages(&self, window_size: i64) -> Result<Vec<Observation>> {
        let window = WindowSize::new(window_size)?;
        Ok(smooth(&self.lock(), window))
    }

    /// Chart rows plus axis domain for one draw.
    pub fn view(&self, window: WindowSize) -> SeriesView {
        SeriesView::build(&self.lock(), window)
    }

    /// Value recorded for `date`, if any.
    pub fn value_for_date(&self, date: NaiveDate) -> Option<f64> {
        self.lock().find_by_date(date).map(|o| o.value)
    }

    /// Insert or overwrite the value for `date`, then rewrite storage.
    ///
    /// # Errors
    /// Returns `InvalidValue` for non-finite input (nothing changes), or
    /// `PersistenceFailed` under [`WriteFailurePolicy::Propagate`] (the
    /// in-memory change is kept).
    pub fn upsert_value_for_date(&self, date: NaiveDate, value: f64) -> Result<UpsertAck> {
        let mut series = self.lock();
        let outcome = series.upsert(date, value)?;
        tracing::debug!(%date, value, ?outcome, "upserted observation");

        let persisted = match self.persistence.write_records(&series.to_records()) {
            Ok(()) => true,
            Err(e) => match self.options.write_failure_policy {
                WriteFailurePolicy::LogAndContinue => {
                    tracing::warn!(
                        location = %self.persistence.location(),
                        error = %e,
                        "failed to persist series; keeping in-memory state"
                    );
                    false
                }
                WriteFailurePolicy::Propagate => {
                    return Err(into_persistence_error(e, &*self.persistence));
                }
            },
        };

        Ok(UpsertAck {
            date,
            value,
            outcome,
            persisted,
        })
    }
}

fn into_persistence_error(err: CoreError, persistence: &dyn SeriesPersistence) -> CoreError {
    match err {
        CoreError::PersistenceFailed { .. } => err,
        other => CoreError::PersistenceFailed {
            path: persistence.location().into(),
            message: other.to_string(),
        },
    }
}
