//! CSV import: spreadsheet rows in, validated catalog candidates out.

pub mod normalizer;
pub mod reader;

pub use normalizer::{canonical_header, normalize_row, parse_level, RawRow};
pub use reader::{import_csv, import_csv_file, parse_csv, ImportSummary};
