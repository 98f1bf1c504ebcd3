use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::ExtractionError;
use crate::config::AnalyteSpec;
use crate::models::MedicalValue;
use crate::pipeline::classify::{classify_with_unit, ClinicalCategory};

/// Plain or thousands-grouped number with optional decimals.
const NUMBER: &str = r"((?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?)";

static BLOOD_PRESSURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bblood\s+pressure:?\s*(\d+)\s*/\s*(\d+)").expect("Invalid blood pressure regex")
});

#[derive(Clone)]
struct UnitPattern {
    unit: String,
    regex: Regex,
}

/// Precompiled `term :? number unit` search over a synonym × unit product.
///
/// Pairs are kept in priority order (terms outer, units inner) and tried in
/// that order, so the first declared synonym wins even when a later one
/// occurs earlier in the text.
#[derive(Clone)]
pub struct ValuePattern {
    pairs: Vec<UnitPattern>,
}

impl ValuePattern {
    pub fn compile<T, U>(terms: &[T], units: &[U]) -> Result<Self, ExtractionError>
    where
        T: AsRef<str>,
        U: AsRef<str>,
    {
        let mut pairs = Vec::with_capacity(terms.len() * units.len());
        for term in terms {
            let term = term.as_ref();
            for unit in units {
                let unit = unit.as_ref();
                let regex = Regex::new(&pair_pattern(term, unit)).map_err(|source| {
                    ExtractionError::InvalidPattern {
                        term: term.to_string(),
                        unit: unit.to_string(),
                        source,
                    }
                })?;
                pairs.push(UnitPattern {
                    unit: unit.to_string(),
                    regex,
                });
            }
        }
        Ok(Self { pairs })
    }

    /// First pair that matches with a parseable number. The stored unit is
    /// the table spelling, not the document's.
    pub fn find(&self, text: &str) -> Option<MedicalValue> {
        for pair in &self.pairs {
            let Some(caps) = pair.regex.captures(text) else {
                continue;
            };
            match parse_number(&caps[1]) {
                Some(value) => return Some(MedicalValue::new(value, pair.unit.as_str())),
                None => debug!(raw = &caps[1], unit = %pair.unit, "Unparseable numeric capture skipped"),
            }
        }
        None
    }
}

fn pair_pattern(term: &str, unit: &str) -> String {
    let term_pattern = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let lead = if term.starts_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    // "in" must not match the head of "inches", nor "f" the head of "for".
    let trail = if unit.ends_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    format!(
        r"(?i){lead}{term_pattern}:?\s*{NUMBER}\s*{}{trail}",
        regex::escape(unit)
    )
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Find the first `term value unit` triple in `text`.
///
/// Convenience form that compiles the patterns per call; repeated callers
/// should hold a [`ValuePattern`] instead.
pub fn extract_value_with_unit<T, U>(text: &str, terms: &[T], units: &[U]) -> Option<MedicalValue>
where
    T: AsRef<str>,
    U: AsRef<str>,
{
    match ValuePattern::compile(terms, units) {
        Ok(pattern) => pattern.find(text),
        Err(e) => {
            warn!(error = %e, "Skipping value extraction");
            None
        }
    }
}

/// Systolic/diastolic reading, kept as the literal ratio.
pub fn extract_blood_pressure(text: &str) -> Option<String> {
    let caps = BLOOD_PRESSURE.captures(text)?;
    Some(format!("{}/{}", &caps[1], &caps[2]))
}

/// An analyte table entry with its patterns compiled.
#[derive(Clone)]
pub struct CompiledAnalyte {
    pub key: String,
    pub category: Option<ClinicalCategory>,
    pattern: ValuePattern,
}

impl CompiledAnalyte {
    pub fn compile(spec: &AnalyteSpec) -> Result<Self, ExtractionError> {
        if spec.terms.is_empty() || spec.units.is_empty() {
            return Err(ExtractionError::EmptyTable(spec.key.clone()));
        }
        Ok(Self {
            key: spec.key.clone(),
            category: spec.category,
            pattern: ValuePattern::compile(spec.terms.as_slice(), spec.units.as_slice())?,
        })
    }

    pub fn compile_all(specs: &[AnalyteSpec]) -> Result<Vec<Self>, ExtractionError> {
        specs.iter().map(Self::compile).collect()
    }

    /// Extract and, for classified analytes, attach range label and status.
    /// Only temperature is converted; any other reading is compared against
    /// the category's reference band as stored, whatever its unit.
    pub fn extract(&self, lowered: &str) -> Option<MedicalValue> {
        let found = self.pattern.find(lowered)?;
        let Some(category) = self.category else {
            return Some(found);
        };
        let Some(value) = found.value.as_f64() else {
            return Some(found);
        };
        let status = classify_with_unit(category, value, &found.unit);
        Some(
            found
                .with_normal_range(category.normal_range_label())
                .with_status(status),
        )
    }
}
