//! Category dispatch: decides which extractors run for a document and
//! assembles their output into one [`ParsedMedicalData`].
//!
//! Lab hints run the lab extractor only, prescription hints the prescription
//! extractor only. Any other hint, an unknown hint or no hint runs all three
//! and attaches every result, empty or not, so mixed or untyped documents
//! still yield whatever can be recognized.

use std::str::FromStr;
use std::sync::LazyLock;

use tracing::{debug, info};

use super::lab::extract_blood_test;
use super::normalize::NormalizedText;
use super::prescription::parse_prescription;
use super::tables::{compiled_lab_analytes, compiled_vital_signs};
use super::values::CompiledAnalyte;
use super::vitals::extract_vitals;
use super::ExtractionError;
use crate::config::ExtractionTables;
use crate::models::{ParsedMedicalData, ReportType};

static DEFAULT_PARSER: LazyLock<MedicalTextParser> = LazyLock::new(|| MedicalTextParser {
    lab: compiled_lab_analytes().to_vec(),
    vitals: compiled_vital_signs().to_vec(),
});

/// Parser over the built-in tables, compiled once per process.
pub fn default_parser() -> &'static MedicalTextParser {
    &DEFAULT_PARSER
}

/// Which extractors a document goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorSet {
    pub lab: bool,
    pub prescription: bool,
    pub vitals: bool,
}

impl ExtractorSet {
    pub const ALL: ExtractorSet = ExtractorSet {
        lab: true,
        prescription: true,
        vitals: true,
    };

    pub fn for_report_type(report_type: Option<ReportType>) -> Self {
        match report_type {
            Some(ReportType::BloodTest | ReportType::Laboratory) => ExtractorSet {
                lab: true,
                prescription: false,
                vitals: false,
            },
            Some(ReportType::Prescription) => ExtractorSet {
                lab: false,
                prescription: true,
                vitals: false,
            },
            _ => Self::ALL,
        }
    }
}

/// Extraction engine over a fixed set of synonym/unit tables.
///
/// Stateless between calls; one instance can serve any number of threads.
pub struct MedicalTextParser {
    lab: Vec<CompiledAnalyte>,
    vitals: Vec<CompiledAnalyte>,
}

impl MedicalTextParser {
    pub fn from_tables(tables: &ExtractionTables) -> Result<Self, ExtractionError> {
        Ok(Self {
            lab: CompiledAnalyte::compile_all(&tables.lab)?,
            vitals: CompiledAnalyte::compile_all(&tables.vitals)?,
        })
    }

    pub fn lab_analytes(&self) -> &[CompiledAnalyte] {
        &self.lab
    }

    pub fn vital_signs(&self) -> &[CompiledAnalyte] {
        &self.vitals
    }

    /// Parse with a free-form category hint. Unrecognized hints are not an
    /// error: they fall back to running every extractor.
    pub fn parse(&self, text: &str, hint: Option<&str>) -> ParsedMedicalData {
        let report_type = hint.and_then(|h| match ReportType::from_str(h.trim()) {
            Ok(t) => Some(t),
            Err(e) => {
                debug!(error = %e, "Unrecognized category hint, running all extractors");
                None
            }
        });
        self.parse_report(text, report_type)
    }

    pub fn parse_report(&self, text: &str, report_type: Option<ReportType>) -> ParsedMedicalData {
        self.run(text, ExtractorSet::for_report_type(report_type))
    }

    pub fn run(&self, text: &str, set: ExtractorSet) -> ParsedMedicalData {
        let normalized = NormalizedText::new(text);
        let parsed = ParsedMedicalData {
            blood_test: set.lab.then(|| extract_blood_test(&normalized, &self.lab)),
            prescription: set.prescription.then(|| parse_prescription(text)),
            vitals: set.vitals.then(|| extract_vitals(&normalized, &self.vitals)),
            extra: Default::default(),
        };
        info!(
            chars = normalized.original.len(),
            lab = set.lab,
            prescription = set.prescription,
            vitals = set.vitals,
            flagged = parsed.flagged_values().len(),
            empty = parsed.is_empty(),
            "Medical text parsed"
        );
        parsed
    }
}

/// Parse OCR text using the built-in tables and an optional category hint
/// (`blood_test`, `laboratory`, `prescription`, ...).
pub fn parse_medical_text(text: &str, hint: Option<&str>) -> ParsedMedicalData {
    default_parser().parse(text, hint)
}

/// Typed-hint form of [`parse_medical_text`].
pub fn parse_medical_report(text: &str, report_type: Option<ReportType>) -> ParsedMedicalData {
    default_parser().parse_report(text, report_type)
}
