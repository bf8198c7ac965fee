//! CSV readers for the analysed datasets.
//!
//! Every reader deserialises rows by header name, so extra columns are
//! ignored and column order does not matter.
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::demographic::Person;
use crate::medical::MedicalRecord;
use crate::page_views::PageView;
use crate::sea_level::SeaLevelObservation;

/// Configuration for reading delimited text files.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Strip surrounding whitespace from headers and fields.
    pub trim: bool,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvReaderConfig {
    fn builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.delimiter(self.delimiter).has_headers(true);
        if self.trim {
            builder.trim(csv::Trim::All);
        }
        builder
    }
}

/// Read every row of a headed CSV file into `T`.
pub fn read_csv_records<T, P>(path: P, config: &CsvReaderConfig) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))?;
    let records = read_csv_records_from_reader(file, config)
        .with_context(|| format!("Failed to load {}", path.as_ref().display()))?;
    log::info!(
        "Loaded {} rows from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Read every row of headed CSV data from any reader into `T`.
pub fn read_csv_records_from_reader<T, R>(reader: R, config: &CsvReaderConfig) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = config.builder().from_reader(reader);
    reader.headers().context("Failed to read header row")?;

    let mut records = Vec::new();
    for (row_idx, result) in reader.deserialize().enumerate() {
        // header is line 1
        let record: T = result.with_context(|| format!("Invalid row {}", row_idx + 2))?;
        records.push(record);
    }
    Ok(records)
}

/// Read the census extract (`adult.data.csv`).
pub fn read_census<P: AsRef<Path>>(path: P) -> Result<Vec<Person>> {
    read_csv_records(path, &CsvReaderConfig::default())
}

/// Read the medical examination table (`medical_examination.csv`).
pub fn read_medical_examinations<P: AsRef<Path>>(path: P) -> Result<Vec<MedicalRecord>> {
    read_csv_records(path, &CsvReaderConfig::default())
}

/// Read the daily forum page views (`fcc-forum-pageviews.csv`).
pub fn read_page_views<P: AsRef<Path>>(path: P) -> Result<Vec<PageView>> {
    read_csv_records(path, &CsvReaderConfig::default())
}

/// Read the EPA sea level series (`epa-sea-level.csv`).
pub fn read_sea_levels<P: AsRef<Path>>(path: P) -> Result<Vec<SeaLevelObservation>> {
    read_csv_records(path, &CsvReaderConfig::default())
}
