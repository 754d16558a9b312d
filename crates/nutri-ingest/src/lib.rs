pub mod csv_table;
pub mod error;
pub mod hash;
pub mod info;
pub mod provider;
pub mod sanitize;

pub use csv_table::{CsvTable, read_csv_bytes};
pub use error::{IngestError, Result};
pub use hash::sha256_hex;
pub use info::{DatasetInfo, dataset_info, group_counts};
pub use provider::{DataProvider, DataUnavailable, LoadedTable, load_table, parse_table};
pub use sanitize::{IngestOptions, SanitizeStats, build_table, parse_nutrient, title_case};
