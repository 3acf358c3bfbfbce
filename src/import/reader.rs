//! CSV reading and all-or-nothing catalog import.

use super::normalizer::{has_column, normalize_row, RawRow, NAME_ALIASES};
use crate::catalog::CatalogStore;
use crate::error::ImportError;
use crate::types::CandidateSpell;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// CSV data rows read, excluding the header.
    pub rows: usize,
    /// Catalog entries stored after class fan-out.
    pub imported: usize,
}

impl ImportSummary {
    pub fn message(&self) -> String {
        format!("Successfully imported {} spells", self.imported)
    }
}

/// Parse CSV text into catalog candidates.
///
/// Nameless rows are skipped. Any other bad row fails the whole batch, with
/// every offending row listed.
pub fn parse_csv(text: &str) -> Result<(usize, Vec<CandidateSpell>), ImportError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    debug!("CSV headers detected: {:?}", headers);
    if !has_column(&headers, NAME_ALIASES) {
        return Err(ImportError::MissingColumn("name"));
    }

    let mut rows = 0usize;
    let mut candidates = Vec::new();
    let mut errors = Vec::new();

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let raw = RawRow::from_pairs(headers.iter().map(String::as_str).zip(record.iter()));
        if raw.is_blank() {
            continue;
        }
        rows += 1;

        match normalize_row(idx + 1, &raw) {
            Ok(spells) => candidates.extend(spells),
            Err(e) => {
                warn!("{}", e);
                errors.push(e);
            }
        }
    }

    if !errors.is_empty() {
        return Err(ImportError::Rows(errors));
    }
    if candidates.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok((rows, candidates))
}

/// Replace the catalog with the spells in `text`. On any error the existing
/// catalog is left as it was.
pub fn import_csv(store: &mut CatalogStore, text: &str) -> Result<ImportSummary, ImportError> {
    let (rows, candidates) = parse_csv(text)?;
    let stored = store.replace_all(candidates);

    let summary = ImportSummary {
        rows,
        imported: stored.len(),
    };
    info!("{} from {} rows", summary.message(), rows);
    Ok(summary)
}

pub fn import_csv_file(store: &mut CatalogStore, path: &Path) -> Result<ImportSummary, ImportError> {
    info!("Importing spells from {:?}", path);
    let text = fs::read_to_string(path)?;
    import_csv(store, &text)
}
