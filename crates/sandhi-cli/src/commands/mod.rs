use std::fs;
use std::io;
use std::path::Path;

use sandhi_core::rules::{RuleConfigError, RuleIoError};
use sandhi_core::RuleTable;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod combine_ops;
pub mod config_ops;
pub mod rules_ops;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error(transparent)]
    Config(#[from] RuleConfigError),
    #[error(transparent)]
    Compiled(#[from] RuleIoError),
    #[error("--rules and --compiled are mutually exclusive")]
    Conflict,
}

/// Where the rule table for a command comes from.
pub enum TableSource {
    Global,
    Owned(RuleTable),
}

impl TableSource {
    /// `rules` installs a custom TOML as the global table; `compiled` opens a
    /// compiled rule file.
    pub fn load(rules: Option<&str>, compiled: Option<&str>) -> Result<Self, LoadError> {
        match (rules, compiled) {
            (Some(_), Some(_)) => Err(LoadError::Conflict),
            (None, Some(file)) => Ok(Self::Owned(RuleTable::open(Path::new(file))?)),
            (Some(file), None) => {
                RuleTable::init_custom(read_file(file)?)?;
                Ok(Self::Global)
            }
            (None, None) => Ok(Self::Global),
        }
    }

    pub fn table(&self) -> &RuleTable {
        match self {
            Self::Global => RuleTable::global(),
            Self::Owned(table) => table,
        }
    }
}

pub(crate) fn read_file(path: &str) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default() {
        let source = TableSource::load(None, None).unwrap();
        assert_eq!(source.table().version(), RuleTable::global().version());
    }

    #[test]
    fn test_load_compiled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.sndr");
        RuleTable::global().save(&path).unwrap();

        let source = TableSource::load(None, path.to_str()).unwrap();
        assert!(matches!(source, TableSource::Owned(_)));
        assert_eq!(source.table().version(), RuleTable::global().version());
    }

    #[test]
    fn test_load_conflict() {
        let err = TableSource::load(Some("a.toml"), Some("b.sndr")).err().unwrap();
        assert!(matches!(err, LoadError::Conflict));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TableSource::load(None, Some("/nonexistent/rules.sndr"))
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Compiled(RuleIoError::Io(_))));
    }
}
