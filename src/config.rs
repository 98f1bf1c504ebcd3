use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::classify::ClinicalCategory;
use crate::pipeline::extraction::tables::{default_lab_analytes, default_vital_signs};

/// Application-level constants
pub const APP_NAME: &str = "medscan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_CRATE_NAME"))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid extraction tables: {0}")]
    Json(#[from] serde_json::Error),
}

/// One measurable field: the output key, its synonyms in priority order,
/// the accepted unit spellings in priority order, and the reference
/// category used to classify it (none for weight/height).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyteSpec {
    pub key: String,
    pub terms: Vec<String>,
    pub units: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ClinicalCategory>,
}

impl AnalyteSpec {
    pub fn new(
        key: &str,
        terms: &[&str],
        units: &[&str],
        category: Option<ClinicalCategory>,
    ) -> Self {
        Self {
            key: key.to_string(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
            units: units.iter().map(|u| u.to_string()).collect(),
            category,
        }
    }
}

/// Synonym/unit tables driving the lab and vitals extractors.
///
/// `Default` yields the built-in tables. Hosts that need extra analytes
/// (or a different synonym priority) load their own from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionTables {
    pub lab: Vec<AnalyteSpec>,
    pub vitals: Vec<AnalyteSpec>,
}

impl Default for ExtractionTables {
    fn default() -> Self {
        Self {
            lab: default_lab_analytes(),
            vitals: default_vital_signs(),
        }
    }
}

impl ExtractionTables {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
