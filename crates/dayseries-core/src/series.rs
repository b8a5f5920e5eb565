//! Date-indexed series of daily observations.
//!
//! A [`TimeSeries`] holds at most one [`Observation`] per calendar date and
//! keeps them sorted ascending. A `DateKey -> position` map is maintained
//! alongside the vector so date lookups never scan.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{check_record_date, format_record_date, parse_calendar_date, DateKey};
use crate::error::SeriesError;

/// One recorded value for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    /// Centered moving average. Only set on smoothing output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value,
            average: None,
        }
    }
}

/// An unparsed record as it arrives from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub value: f64,
}

/// What to do when two input records land on the same calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the load with `MalformedRecord`.
    #[default]
    Reject,
    /// Keep the later record's value.
    LastWins,
    /// Keep the earlier record's value.
    FirstWins,
}

/// Whether an upsert created a new date or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Sorted, duplicate-free sequence of observations.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    observations: Vec<Observation>,
    index: HashMap<DateKey, usize>,
}

impl PartialEq for TimeSeries {
    fn eq(&self, other: &Self) -> bool {
        self.observations == other.observations
    }
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from raw storage records.
    ///
    /// # Errors
    /// Returns `MalformedRecord` for an unparseable date, a non-finite value,
    /// or (under [`DuplicatePolicy::Reject`]) a repeated date. Nothing is
    /// returned on failure; a partial series is never produced.
    pub fn load<I>(records: I, policy: DuplicatePolicy) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut observations: Vec<Observation> = Vec::new();
        let mut seen: HashMap<DateKey, (usize, usize)> = HashMap::new();

        for (index, record) in records.into_iter().enumerate() {
            let date = parse_calendar_date(&record.date).map_err(|e| {
                SeriesError::MalformedRecord {
                    index,
                    message: e.to_string(),
                }
            })?;
            if !record.value.is_finite() {
                return Err(SeriesError::MalformedRecord {
                    index,
                    message: format!("value {} is not a finite number", record.value),
                });
            }

            let key = DateKey::from(date);
            match seen.get(&key).copied() {
                None => {
                    seen.insert(key, (observations.len(), index));
                    observations.push(Observation::new(date, record.value));
                }
                Some((position, first_index)) => match policy {
                    DuplicatePolicy::Reject => {
                        return Err(SeriesError::MalformedRecord {
                            index,
                            message: format!(
                                "duplicate date {date} (first seen at record {first_index})"
                            ),
                        });
                    }
                    DuplicatePolicy::LastWins => observations[position].value = record.value,
                    DuplicatePolicy::FirstWins => {}
                },
            }
        }

        let mut series = Self {
            observations,
            index: HashMap::new(),
        };
        series.sort_and_reindex();
        Ok(series)
    }

    /// Build a series from already-parsed observations, same rules as [`load`](Self::load).
    pub fn from_observations<I>(observations: I, policy: DuplicatePolicy) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = Observation>,
    {
        Self::load(
            observations.into_iter().map(|o| RawRecord {
                date: o.date.format("%Y-%m-%d").to_string(),
                value: o.value,
            }),
            policy,
        )
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Exact calendar-date lookup.
    pub fn find_by_date(&self, date: NaiveDate) -> Option<&Observation> {
        self.find_by_key(DateKey::from(date))
    }

    pub(crate) fn find_by_key(&self, key: DateKey) -> Option<&Observation> {
        self.index.get(&key).map(|&i| &self.observations[i])
    }

    /// Smallest and largest stored value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.observations.iter().map(|o| o.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Insert or overwrite the value for `date`, in place.
    ///
    /// An existing observation keeps its position and loses any derived
    /// average. A new date is appended and the sequence re-sorted.
    ///
    /// # Errors
    /// Returns `InvalidValue` for NaN or infinite input and `DateOutOfRange`
    /// for years outside 0..=9999; the series is left unchanged.
    pub fn upsert(&mut self, date: NaiveDate, value: f64) -> Result<UpsertOutcome, SeriesError> {
        if !value.is_finite() {
            return Err(SeriesError::InvalidValue { value });
        }
        check_record_date(date)?;

        if let Some(&i) = self.index.get(&DateKey::from(date)) {
            let existing = &mut self.observations[i];
            existing.value = value;
            existing.average = None;
            return Ok(UpsertOutcome::Updated);
        }

        self.observations.push(Observation::new(date, value));
        self.sort_and_reindex();
        Ok(UpsertOutcome::Inserted)
    }

    /// Functional form of [`upsert`](Self::upsert): `self` is untouched.
    pub fn with_upsert(
        &self,
        date: NaiveDate,
        value: f64,
    ) -> Result<(Self, UpsertOutcome), SeriesError> {
        let mut next = self.clone();
        let outcome = next.upsert(date, value)?;
        Ok((next, outcome))
    }

    /// Records in storage shape, ascending by date.
    pub fn to_records(&self) -> Vec<RawRecord> {
        self.observations
            .iter()
            .map(|o| RawRecord {
                date: format_record_date(o.date),
                value: o.value,
            })
            .collect()
    }

    fn sort_and_reindex(&mut self) {
        self.observations.sort_by_key(|o| o.date);
        self.index = self
            .observations
            .iter()
            .enumerate()
            .map(|(i, o)| (DateKey::from(o.date), i))
            .collect();
    }
}
