use anyhow::{anyhow, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_DB_PATH: &str = "transactions.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database file used when no `--db` is given
    pub database: PathBuf,
    pub view: ViewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DB_PATH),
            view: ViewConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Number of table rows shown at once
    pub table_height: u16,
    pub column_widths: ColumnWidths,
    pub colors: Colors,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            table_height: 20,
            column_widths: ColumnWidths::default(),
            colors: Colors::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnWidths {
    pub period: u16,
    pub group: u16,
    pub category: u16,
    pub detail: u16,
    pub sum: u16,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            period: 10,
            group: 12,
            category: 40,
            detail: 40,
            sum: 12,
        }
    }
}

impl ColumnWidths {
    pub fn as_array(&self) -> [u16; 5] {
        [self.period, self.group, self.category, self.detail, self.sum]
    }
}

/// Colors as 256-color terminal palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    pub border: u8,
    pub selected_foreground: u8,
    pub selected_background: u8,
    pub negative: u8,
    pub positive: u8,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            border: 240,
            selected_foreground: 229,
            selected_background: 57,
            negative: 167,
            positive: 107,
        }
    }
}

impl Config {
    /// Loads the config file at `path`, or the defaults if there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| anyhow!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| anyhow!("Error in config file {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.database.as_os_str().is_empty(),
            "database must not be empty"
        );
        ensure!(self.view.table_height > 0, "view.table_height must be positive");
        ensure!(
            self.view.column_widths.as_array().iter().all(|width| *width > 0),
            "view.column_widths must all be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_gives_defaults() {
        assert_eq!(Config::default(), Config::load(None).unwrap());
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(Config::default(), Config::parse("{}").unwrap());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = Config::parse(
            r#"
database: /var/lib/banking/statements.db
view:
  table_height: 40
  colors:
    border: 12
"#,
        )
        .unwrap();
        assert_eq!(PathBuf::from("/var/lib/banking/statements.db"), config.database);
        assert_eq!(40, config.view.table_height);
        assert_eq!(12, config.view.colors.border);
        assert_eq!(229, config.view.colors.selected_foreground);
        assert_eq!(ColumnWidths::default(), config.view.column_widths);
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(Config::parse("databse: foo.db").is_err());
    }

    #[test]
    fn zero_width_is_rejected() {
        let err = Config::parse("view:\n  column_widths:\n    sum: 0\n").unwrap_err();
        assert_eq!("view.column_widths must all be positive", err.to_string());
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(Config::parse("view:\n  table_height: 0\n").is_err());
    }

    #[test]
    fn load_reads_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("config.yaml");
        std::fs::write(&path, "database: other.db\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(PathBuf::from("other.db"), config.database);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let tempdir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&tempdir.path().join("missing.yaml"))).is_err());
    }
}
