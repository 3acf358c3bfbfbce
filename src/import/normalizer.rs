//! Row normalization for CSV imports.
//!
//! Spell spreadsheets come with all sorts of header spellings. Headers are
//! canonicalised (lower-case, alphanumerics only) and then looked up in a
//! fixed alias table per field; there is no open-ended guessing beyond it.

use crate::error::RowError;
use crate::types::CandidateSpell;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

pub const NAME_ALIASES: &[&str] = &["name", "spellname"];
pub const CLASS_ALIASES: &[&str] = &[
    "class",
    "classes",
    "spellclass",
    "school",
    "caster",
    "casterclass",
    "dndclass",
    "characterclass",
];
pub const LEVEL_ALIASES: &[&str] = &["level", "spelllevel"];
pub const DESCRIPTION_ALIASES: &[&str] = &["description", "desc"];
pub const DETAIL_ALIASES: &[&str] = &["spell", "text"];
pub const KIND_ALIASES: &[&str] = &["type"];
pub const CONCENTRATION_ALIASES: &[&str] = &["concentration"];
pub const UPCAST_ALIASES: &[&str] = &["upcast", "higherlevels"];
pub const RANGE_ALIASES: &[&str] = &["range"];

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("valid regex"));

// "3", "3rd", "3rd level", "Level 3"
static LEVEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:level\s*)?(\d+)(?:st|nd|rd|th)?(?:[\s-]*level)?$").expect("valid regex")
});

/// Canonical form of a header: "Spell Level" and "spell_level" both become "spelllevel".
pub fn canonical_header(header: &str) -> String {
    NON_ALNUM
        .replace_all(&header.trim().to_lowercase(), "")
        .into_owned()
}

/// One CSV record keyed by canonical header.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut fields = HashMap::new();
        for (header, value) in pairs {
            // First column wins when two headers canonicalise the same way
            fields
                .entry(canonical_header(header))
                .or_insert_with(|| value.trim().to_string());
        }
        Self { fields }
    }

    /// First non-empty value among `aliases`, in alias order.
    pub fn get(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.fields.get(*alias))
            .map(|value| value.as_str())
            .find(|value| !value.is_empty())
    }

    fn get_or(&self, aliases: &[&str], default: &str) -> String {
        self.get(aliases).unwrap_or(default).to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|value| value.is_empty())
    }
}

/// True if any of `headers` canonicalises to one of `aliases`.
pub fn has_column<S: AsRef<str>>(headers: &[S], aliases: &[&str]) -> bool {
    headers
        .iter()
        .any(|h| aliases.contains(&canonical_header(h.as_ref()).as_str()))
}

/// Parse a level cell. Blank and "cantrip" are level 0.
pub fn parse_level(value: &str) -> Option<u8> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("cantrip") {
        return Some(0);
    }
    LEVEL_PATTERN
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Split a class cell on commas. No class yields a single empty class.
fn split_classes(value: Option<&str>) -> Vec<String> {
    let classes: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(|class| class.trim().to_string())
        .filter(|class| !class.is_empty())
        .collect();

    if classes.is_empty() {
        vec![String::new()]
    } else {
        classes
    }
}

/// Turn one CSV row into catalog candidates, one per listed class.
///
/// Rows without a name produce nothing. `row` is only used for error
/// reporting.
pub fn normalize_row(row: usize, raw: &RawRow) -> Result<Vec<CandidateSpell>, RowError> {
    let Some(name) = raw.get(NAME_ALIASES) else {
        debug!("Row {}: no name, skipping", row);
        return Ok(Vec::new());
    };

    let level_cell = raw.get(LEVEL_ALIASES).unwrap_or_default();
    let level = parse_level(level_cell).ok_or_else(|| RowError::InvalidLevel {
        row,
        value: level_cell.to_string(),
    })?;

    let description = raw.get_or(DESCRIPTION_ALIASES, "");
    let detail = raw
        .get(DETAIL_ALIASES)
        .map(str::to_string)
        .unwrap_or_else(|| description.clone());

    let classes = split_classes(raw.get(CLASS_ALIASES));
    debug!("Row {}: {} for classes [{}]", row, name, classes.join(", "));

    Ok(classes
        .into_iter()
        .map(|class| CandidateSpell {
            name: name.to_string(),
            class,
            level,
            description: description.clone(),
            detail: detail.clone(),
            kind: raw.get_or(KIND_ALIASES, "Spell"),
            concentration: raw.get_or(CONCENTRATION_ALIASES, "No"),
            upcast: raw.get_or(UPCAST_ALIASES, "No"),
            range: raw.get_or(RANGE_ALIASES, "Unknown"),
        })
        .collect())
}
