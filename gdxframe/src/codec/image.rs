//! On-disk layout of JSON containers

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use gdxframe_core::constants::{sentinel, MAX_VERSION};
use gdxframe_core::NativeRecord;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Whole container as stored in one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerImage {
    pub version: i32,
    pub producer: String,
    /// Sentinel codes the stored values were written with
    pub special_values: [f64; 5],
    /// Universal set, in registration order
    pub labels: Vec<String>,
    pub symbols: Vec<StoredSymbol>,
}

/// One symbol with its header and records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSymbol {
    pub name: String,
    pub kind: i32,
    #[serde(default)]
    pub user_info: i32,
    #[serde(default)]
    pub description: String,
    pub dimension: usize,
    /// Domain names per dimension; absent in legacy containers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<String>>,
    #[serde(default)]
    pub records: Vec<NativeRecord>,
}

impl ContainerImage {
    /// Empty image at the newest version
    pub fn new(producer: impl Into<String>) -> Self {
        Self {
            version: MAX_VERSION,
            producer: producer.into(),
            special_values: sentinel::DEFAULT_TABLE,
            labels: Vec::new(),
            symbols: Vec::new(),
        }
    }

    /// Read an image from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write an image to disk, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Position of a symbol by name, ignoring case
    pub fn position(&self, name: &str) -> Option<usize> {
        self.symbols
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_symbol_has_no_domain() {
        let json = r#"{"name":"p","kind":1,"dimension":2,"records":[]}"#;
        let symbol: StoredSymbol = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.domain, None);
        assert_eq!(symbol.user_info, 0);
        assert!(symbol.description.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.json");

        let mut image = ContainerImage::new("test");
        image.labels.push("a".to_string());
        image.symbols.push(StoredSymbol {
            name: "s".to_string(),
            kind: 0,
            user_info: 0,
            description: "a set".to_string(),
            dimension: 1,
            domain: Some(vec!["*".to_string()]),
            records: vec![NativeRecord {
                labels: vec!["a".to_string()],
                values: [0.0; 5],
            }],
        });
        image.save(&path).unwrap();

        let loaded = ContainerImage::load(&path).unwrap();
        assert_eq!(loaded, image);
        assert_eq!(loaded.position("S"), Some(0));
    }

    #[test]
    fn test_load_errors_surface() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ContainerImage::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, crate::Error::Io(_)));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "not json").unwrap();
        let err = ContainerImage::load(&garbage).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }
}
