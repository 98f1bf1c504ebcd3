use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::ValueStatus;

/// A measured value as read from the document. Numeric when the extractor
/// parsed it; text when only a raw token was kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasuredValue {
    Number(f64),
    Text(String),
}

impl MeasuredValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MeasuredValue::Number(n) => Some(*n),
            MeasuredValue::Text(_) => None,
        }
    }
}

impl From<f64> for MeasuredValue {
    fn from(value: f64) -> Self {
        MeasuredValue::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalValue {
    pub value: MeasuredValue,
    /// Unit spelling from the extraction table, not the document's casing.
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ValueStatus>,
}

impl MedicalValue {
    pub fn new(value: impl Into<MeasuredValue>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
            normal_range: None,
            status: None,
        }
    }

    pub fn with_normal_range(mut self, range: impl Into<String>) -> Self {
        self.normal_range = Some(range.into());
        self
    }

    pub fn with_status(mut self, status: ValueStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when classified as anything other than normal.
    pub fn is_flagged(&self) -> bool {
        matches!(self.status, Some(s) if s != ValueStatus::Normal)
    }
}

/// Lab results keyed by analyte (`glucose`, `whiteBloodCells`, ...).
/// Open map: tables may introduce analytes beyond the built-in six.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BloodTestResults(BTreeMap<String, MedicalValue>);

impl BloodTestResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, analyte: impl Into<String>, value: MedicalValue) {
        self.0.insert(analyte.into(), value);
    }

    pub fn get(&self, analyte: &str) -> Option<&MedicalValue> {
        self.0.get(analyte)
    }

    pub fn glucose(&self) -> Option<&MedicalValue> {
        self.get("glucose")
    }

    pub fn hemoglobin(&self) -> Option<&MedicalValue> {
        self.get("hemoglobin")
    }

    pub fn cholesterol(&self) -> Option<&MedicalValue> {
        self.get("cholesterol")
    }

    pub fn white_blood_cells(&self) -> Option<&MedicalValue> {
        self.get("whiteBloodCells")
    }

    pub fn red_blood_cells(&self) -> Option<&MedicalValue> {
        self.get("redBloodCells")
    }

    pub fn platelets(&self) -> Option<&MedicalValue> {
        self.get("platelets")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MedicalValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub instructions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionData {
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub doctor: String,
    #[serde(default)]
    pub clinic: String,
    #[serde(default)]
    pub instructions: String,
}

impl PrescriptionData {
    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
            && self.doctor.is_empty()
            && self.clinic.is_empty()
            && self.instructions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsData {
    /// Literal "systolic/diastolic" as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<MedicalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<MedicalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<MedicalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<MedicalValue>,
}

impl VitalsData {
    /// Route a unit-bearing vital to its field. Returns false for keys that
    /// have no slot here.
    pub fn set(&mut self, key: &str, value: MedicalValue) -> bool {
        let slot = match key {
            "heartRate" => &mut self.heart_rate,
            "temperature" => &mut self.temperature,
            "weight" => &mut self.weight,
            "height" => &mut self.height,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn measurements(&self) -> impl Iterator<Item = (&'static str, &MedicalValue)> {
        [
            ("heartRate", self.heart_rate.as_ref()),
            ("temperature", self.temperature.as_ref()),
            ("weight", self.weight.as_ref()),
            ("height", self.height.as_ref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.blood_pressure.is_none() && self.measurements().next().is_none()
    }
}

/// Top-level extraction result. Only the extractors that ran are attached;
/// `extra` carries any further category a host chooses to add.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMedicalData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_test: Option<BloodTestResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<PrescriptionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<VitalsData>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ParsedMedicalData {
    /// True when nothing medical was recognized in any attached category.
    pub fn is_empty(&self) -> bool {
        self.blood_test.as_ref().map_or(true, BloodTestResults::is_empty)
            && self.prescription.as_ref().map_or(true, PrescriptionData::is_empty)
            && self.vitals.as_ref().map_or(true, VitalsData::is_empty)
            && self.extra.is_empty()
    }

    /// Every classified value outside its normal band, as
    /// `(category, field, value)`. Lab results first, then vitals.
    pub fn flagged_values(&self) -> Vec<(&'static str, &str, &MedicalValue)> {
        let mut flagged = Vec::new();
        if let Some(labs) = &self.blood_test {
            flagged.extend(
                labs.iter()
                    .filter(|(_, v)| v.is_flagged())
                    .map(|(k, v)| ("bloodTest", k, v)),
            );
        }
        if let Some(vitals) = &self.vitals {
            flagged.extend(
                vitals
                    .measurements()
                    .filter(|(_, v)| v.is_flagged())
                    .map(|(k, v)| ("vitals", k, v)),
            );
        }
        flagged
    }
}
