pub mod config;
pub mod entry;
pub mod series;

use std::path::PathBuf;

use chrono::NaiveDate;
use dayseries_core::{parse_calendar_date, Config, JsonFileStore, SeriesStore};

/// Flags shared by every subcommand.
pub struct Context {
    pub data: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    /// Load config and open the series it points at (or `--data`).
    pub fn open_store(&self) -> Result<(Config, SeriesStore), Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let path = match &self.data {
            Some(path) => path.clone(),
            None => config.data_file()?,
        };
        tracing::debug!(path = %path.display(), "opening series");
        let store = SeriesStore::open(JsonFileStore::new(path), config.store_options())?;
        Ok((config, store))
    }
}

/// Parse a date argument; `today` means the local calendar date.
pub fn parse_date_arg(input: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    if input.eq_ignore_ascii_case("today") {
        return Ok(chrono::Local::now().date_naive());
    }
    Ok(parse_calendar_date(input)?)
}
