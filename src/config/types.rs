use crate::catalog::{Selector, SpellFilter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// CSV the catalog is imported from at startup
    #[serde(default)]
    pub catalog_csv: Option<PathBuf>,

    /// Where the ring is saved between runs; defaults under the user data dir
    #[serde(default)]
    pub ring_state_path: Option<PathBuf>,

    #[serde(default = "default_class")]
    pub default_class: String,

    #[serde(default = "default_level")]
    pub default_level: String,

    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    #[serde(default = "default_description_width")]
    pub description_width: usize,
}

fn default_class() -> String {
    "Wizard".to_string()
}

fn default_level() -> String {
    "1".to_string()
}

fn default_description_width() -> usize {
    80
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_csv: None,
            ring_state_path: None,
            default_class: default_class(),
            default_level: default_level(),
            log_dir: None,
            description_width: default_description_width(),
        }
    }
}

impl Config {
    /// Initial library filter. Unparseable values fall back to "all".
    pub fn initial_filter(&self) -> SpellFilter {
        SpellFilter {
            class: self.default_class.parse().unwrap_or_default(),
            level: self.default_level.parse().unwrap_or(Selector::All),
            search: String::new(),
        }
    }

    pub fn ring_state_path(&self) -> Option<PathBuf> {
        self.ring_state_path
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("spell-ring").join("ring.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = toml::from_str("catalog_csv = \"data/spells.csv\"").unwrap();
        assert_eq!(config.catalog_csv, Some(PathBuf::from("data/spells.csv")));
        assert_eq!(config.default_class, "Wizard");
        assert_eq!(config.description_width, 80);
    }

    #[test]
    fn test_initial_filter() {
        let config = Config::default();
        let filter = config.initial_filter();
        assert_eq!(filter.class, Selector::Only("Wizard".to_string()));
        assert_eq!(filter.level, Selector::Only(1));

        let config = Config {
            default_class: "all".to_string(),
            default_level: "cantrips".to_string(),
            ..Config::default()
        };
        assert_eq!(config.initial_filter(), SpellFilter::all());
    }

    #[test]
    fn test_capacity_is_not_configurable() {
        let config: Config = toml::from_str("capacity = 7\ndescription_width = 60").unwrap();
        let serialized = toml::to_string(&config).unwrap();
        assert!(!serialized.contains("capacity"), "{}", serialized);
        assert_eq!(config.description_width, 60);
    }

    #[test]
    fn test_explicit_ring_state_path_wins() {
        let config = Config {
            ring_state_path: Some(PathBuf::from("/tmp/ring.json")),
            ..Config::default()
        };
        assert_eq!(config.ring_state_path(), Some(PathBuf::from("/tmp/ring.json")));
    }
}
