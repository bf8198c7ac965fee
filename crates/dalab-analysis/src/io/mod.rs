//! IO utilities for loading the CSV datasets.

pub mod datasets;

pub use datasets::{
    read_census, read_csv_records, read_csv_records_from_reader, read_medical_examinations,
    read_page_views, read_sea_levels, CsvReaderConfig,
};
