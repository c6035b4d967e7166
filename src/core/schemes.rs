use crate::utils::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Government scheme names grouped by category (agriculture, business, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeCatalog {
    categories: BTreeMap<String, Vec<String>>,
}

impl SchemeCatalog {
    pub fn builtin() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            "agriculture".to_string(),
            vec![
                "PM-KISAN".to_string(),
                "Kisan Credit Card".to_string(),
                "Soil Health Card Scheme".to_string(),
            ],
        );
        categories.insert(
            "business".to_string(),
            vec![
                "PMEGP".to_string(),
                "MUDRA Loans".to_string(),
                "Stand-Up India".to_string(),
            ],
        );
        categories.insert(
            "social_security".to_string(),
            vec![
                "PM Jeevan Jyoti Bima Yojana".to_string(),
                "PM Suraksha Bima Yojana".to_string(),
            ],
        );
        categories.insert(
            "women_specific".to_string(),
            vec![
                "Mahila Samman Savings Certificate".to_string(),
                "STEP Scheme".to_string(),
            ],
        );
        Self { categories }
    }

    /// 從 JSON 檔載入；未設定路徑或檔案不存在時使用內建清單
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };

        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "Scheme database {} not found, using built-in catalogue",
                    path.display()
                );
                Ok(Self::builtin())
            }
            Err(e) => Err(AdvisorError::IoError(e)),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AdvisorError::ConfigValidationError {
            field: "schemes_file".to_string(),
            message: format!("invalid scheme database: {}", e),
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, schemes)| (name.as_str(), schemes.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalogue() {
        let catalog = SchemeCatalog::builtin();
        assert_eq!(catalog.categories().count(), 4);
        assert!(catalog.categories["agriculture"].contains(&"PM-KISAN".to_string()));
        assert!(!catalog.categories.contains_key("housing"));
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let catalog = SchemeCatalog::load(Some(Path::new("/nonexistent/scheme_database.json")))
            .unwrap();
        assert_eq!(catalog, SchemeCatalog::builtin());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"housing": ["PMAY-G"], "health": ["Ayushman Bharat"]}"#)
            .unwrap();

        let catalog = SchemeCatalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.categories["housing"], vec!["PMAY-G".to_string()]);
        assert!(!catalog.categories.contains_key("agriculture"));
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[\"not\", \"a\", \"map\"]").unwrap();

        let err = SchemeCatalog::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AdvisorError::ConfigValidationError { .. }));
    }
}
