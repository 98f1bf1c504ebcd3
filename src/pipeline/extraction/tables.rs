//! Built-in synonym and unit tables.
//!
//! Order is significant in both lists: earlier synonyms win over later ones,
//! and for a given synonym earlier units win over later ones. Entries must be
//! lowercase because matching runs over lowercased text.

use std::sync::LazyLock;

use super::values::CompiledAnalyte;
use crate::config::AnalyteSpec;
use crate::pipeline::classify::ClinicalCategory;

static COMPILED_LAB: LazyLock<Vec<CompiledAnalyte>> = LazyLock::new(|| {
    CompiledAnalyte::compile_all(&default_lab_analytes()).expect("Built-in lab table must compile")
});

static COMPILED_VITALS: LazyLock<Vec<CompiledAnalyte>> = LazyLock::new(|| {
    CompiledAnalyte::compile_all(&default_vital_signs()).expect("Built-in vitals table must compile")
});

/// Built-in lab table, compiled once per process.
pub fn compiled_lab_analytes() -> &'static [CompiledAnalyte] {
    &COMPILED_LAB
}

/// Built-in vitals table, compiled once per process.
pub fn compiled_vital_signs() -> &'static [CompiledAnalyte] {
    &COMPILED_VITALS
}

pub fn default_lab_analytes() -> Vec<AnalyteSpec> {
    vec![
        AnalyteSpec::new(
            "glucose",
            &["glucose", "blood glucose", "fasting glucose"],
            &["mg/dl", "mg/l", "mmol/l"],
            Some(ClinicalCategory::Glucose),
        ),
        AnalyteSpec::new(
            "hemoglobin",
            &["hemoglobin", "hgb", "hb"],
            &["g/dl", "g/l"],
            Some(ClinicalCategory::Hemoglobin),
        ),
        AnalyteSpec::new(
            "cholesterol",
            &["cholesterol", "total cholesterol"],
            &["mg/dl", "mg/l", "mmol/l"],
            Some(ClinicalCategory::Cholesterol),
        ),
        AnalyteSpec::new(
            "whiteBloodCells",
            &["white blood cells", "wbc", "leukocytes"],
            &["/μl", "/ul", "k/ul", "x10³/μl"],
            Some(ClinicalCategory::WhiteBloodCells),
        ),
        AnalyteSpec::new(
            "redBloodCells",
            &["red blood cells", "rbc", "erythrocytes"],
            &["million/μl", "m/ul", "x10⁶/μl"],
            Some(ClinicalCategory::RedBloodCells),
        ),
        AnalyteSpec::new(
            "platelets",
            &["platelets", "plt"],
            &["/μl", "/ul", "k/ul", "x10³/μl"],
            Some(ClinicalCategory::Platelets),
        ),
    ]
}

pub fn default_vital_signs() -> Vec<AnalyteSpec> {
    vec![
        AnalyteSpec::new(
            "heartRate",
            &["heart rate", "pulse", "hr"],
            &["bpm", "beats/min"],
            Some(ClinicalCategory::HeartRate),
        ),
        AnalyteSpec::new(
            "temperature",
            &["temperature", "temp"],
            &["°f", "°c", "f", "c"],
            Some(ClinicalCategory::Temperature),
        ),
        AnalyteSpec::new("weight", &["weight", "wt"], &["kg", "lbs", "lb", "pounds"], None),
        AnalyteSpec::new(
            "height",
            &["height", "ht"],
            &["cm", "in", "inches", "ft", "feet"],
            None,
        ),
    ]
}
