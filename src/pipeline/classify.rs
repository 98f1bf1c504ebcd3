//! Reference-range classification of extracted values.
//!
//! Each clinical category owns a fixed two-sided band. Values strictly
//! outside the normal band are `low`/`high`; values strictly beyond the
//! critical bound on that side escalate to `critical`. Cholesterol is the
//! exception: a one-sided scale whose bounds are inclusive.

use serde::{Deserialize, Serialize};

use crate::models::ValueStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalCategory {
    /// mg/dL
    Glucose,
    /// g/dL
    Hemoglobin,
    /// mg/dL, total
    Cholesterol,
    /// cells/μL
    WhiteBloodCells,
    /// million cells/μL
    RedBloodCells,
    /// /μL
    Platelets,
    /// bpm
    HeartRate,
    /// °F after conversion
    Temperature,
}

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceBand {
    pub normal_low: Option<f64>,
    pub normal_high: Option<f64>,
    pub critical_low: Option<f64>,
    pub critical_high: Option<f64>,
    /// When set, a value equal to `normal_high` is already high and a value
    /// equal to `critical_high` is already critical.
    pub upper_inclusive: bool,
}

impl ReferenceBand {
    const fn two_sided(low: f64, high: f64, critical_low: f64, critical_high: f64) -> Self {
        Self {
            normal_low: Some(low),
            normal_high: Some(high),
            critical_low: Some(critical_low),
            critical_high: Some(critical_high),
            upper_inclusive: false,
        }
    }

    pub fn classify(&self, value: f64) -> ValueStatus {
        if let Some(low) = self.normal_low {
            if value < low {
                return match self.critical_low {
                    Some(critical) if value < critical => ValueStatus::Critical,
                    _ => ValueStatus::Low,
                };
            }
        }

        if let Some(high) = self.normal_high {
            let above = |bound: f64| {
                if self.upper_inclusive {
                    value >= bound
                } else {
                    value > bound
                }
            };
            if above(high) {
                return match self.critical_high {
                    Some(critical) if above(critical) => ValueStatus::Critical,
                    _ => ValueStatus::High,
                };
            }
        }

        ValueStatus::Normal
    }
}

impl ClinicalCategory {
    pub const ALL: [ClinicalCategory; 8] = [
        ClinicalCategory::Glucose,
        ClinicalCategory::Hemoglobin,
        ClinicalCategory::Cholesterol,
        ClinicalCategory::WhiteBloodCells,
        ClinicalCategory::RedBloodCells,
        ClinicalCategory::Platelets,
        ClinicalCategory::HeartRate,
        ClinicalCategory::Temperature,
    ];

    pub fn reference_band(self) -> ReferenceBand {
        match self {
            ClinicalCategory::Glucose => ReferenceBand::two_sided(70.0, 100.0, 54.0, 180.0),
            ClinicalCategory::Hemoglobin => ReferenceBand::two_sided(12.0, 16.0, 8.0, 20.0),
            ClinicalCategory::Cholesterol => ReferenceBand {
                normal_low: None,
                normal_high: Some(200.0),
                critical_low: None,
                critical_high: Some(240.0),
                upper_inclusive: true,
            },
            ClinicalCategory::WhiteBloodCells => {
                ReferenceBand::two_sided(4_000.0, 11_000.0, 2_000.0, 20_000.0)
            }
            ClinicalCategory::RedBloodCells => ReferenceBand::two_sided(4.2, 5.4, 3.0, 6.5),
            ClinicalCategory::Platelets => {
                ReferenceBand::two_sided(150_000.0, 450_000.0, 50_000.0, 1_000_000.0)
            }
            ClinicalCategory::HeartRate => ReferenceBand::two_sided(60.0, 100.0, 40.0, 150.0),
            ClinicalCategory::Temperature => ReferenceBand::two_sided(97.0, 100.4, 95.0, 104.0),
        }
    }

    /// Display label stored alongside the value.
    pub fn normal_range_label(self) -> &'static str {
        match self {
            ClinicalCategory::Glucose => "70-100 mg/dL",
            ClinicalCategory::Hemoglobin => "12-16 g/dL",
            ClinicalCategory::Cholesterol => "<200 mg/dL",
            ClinicalCategory::WhiteBloodCells => "4,000-11,000/μL",
            ClinicalCategory::RedBloodCells => "4.2-5.4 million/μL",
            ClinicalCategory::Platelets => "150,000-450,000/μL",
            ClinicalCategory::HeartRate => "60-100 bpm",
            ClinicalCategory::Temperature => "98.6°F (37°C)",
        }
    }
}

/// Classify a value already expressed in the category's reference unit.
pub fn classify(category: ClinicalCategory, value: f64) -> ValueStatus {
    category.reference_band().classify(value)
}

/// Classify a value using the unit token it was extracted with.
/// Temperatures whose unit contains "c" are treated as Celsius. No other
/// category is converted: `5.6 mmol/l` glucose or `7.5 k/ul` white cells are
/// compared against the mg/dL and per-μL bands as-is.
pub fn classify_with_unit(category: ClinicalCategory, value: f64, unit: &str) -> ValueStatus {
    match category {
        ClinicalCategory::Temperature => classify(category, to_fahrenheit(value, unit)),
        _ => classify(category, value),
    }
}

fn to_fahrenheit(value: f64, unit: &str) -> f64 {
    if unit.to_lowercase().contains('c') {
        value * 9.0 / 5.0 + 32.0
    } else {
        value
    }
}
