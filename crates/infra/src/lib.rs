//! Infrastructure layer: file storage, CSV interchange, configuration.

pub mod config;
pub mod csv_io;
pub mod file_storage;

pub use config::{ConfigError, StoreConfig};
pub use csv_io::{CsvError, export_csv, export_csv_string, export_file_name, parse_csv};
pub use file_storage::FileStorage;
