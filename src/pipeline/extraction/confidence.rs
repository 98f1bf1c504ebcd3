use serde::{Deserialize, Serialize};

/// Confidence thresholds used by the validity check and OCR estimate
pub mod thresholds {
    /// At or below this keyword density the text is not treated as medical.
    pub const VALID: f32 = 0.10;

    /// Below this: likely not a medical document. Ask the user to verify.
    pub const LOW: f32 = 0.30;

    /// Floor for an OCR response with almost no detected text.
    pub const OCR_MIN: f32 = 0.10;

    /// Ceiling for an OCR response with plenty of detected text.
    pub const OCR_MAX: f32 = 0.95;
}

/// Vocabulary whose presence suggests a medical document. Lowercase.
const MEDICAL_KEYWORDS: &[&str] = &[
    "patient",
    "doctor",
    "test",
    "result",
    "blood",
    "glucose",
    "hemoglobin",
    "cholesterol",
    "pressure",
    "medication",
    "prescription",
    "diagnosis",
    "laboratory",
    "clinic",
    "hospital",
    "mg/dl",
    "mmol/l",
    "normal",
    "abnormal",
];

pub const SUGGEST_NOT_MEDICAL: &str =
    "This may not be a medical document. Please verify the image quality.";
pub const SUGGEST_PATIENT_NAME: &str = "Patient name may be missing or unclear.";
pub const SUGGEST_DATE: &str = "Date information may be missing.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextValidation {
    pub is_valid: bool,
    /// Share of the medical vocabulary found in the text, 0.0..=1.0.
    pub confidence: f32,
    pub suggestions: Vec<String>,
}

/// Score how much the whole text looks like a medical document.
/// Independent of the field extractors; works on raw OCR output.
pub fn validate_medical_text(text: &str) -> TextValidation {
    let lower = text.to_lowercase();
    let found = MEDICAL_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();
    let confidence = found as f32 / MEDICAL_KEYWORDS.len() as f32;

    let mut suggestions = Vec::new();
    if confidence < thresholds::LOW {
        suggestions.push(SUGGEST_NOT_MEDICAL.to_string());
    }
    if !lower.contains("patient") && !lower.contains("name") {
        suggestions.push(SUGGEST_PATIENT_NAME.to_string());
    }
    if !lower.contains("date") {
        suggestions.push(SUGGEST_DATE.to_string());
    }

    TextValidation {
        is_valid: confidence > thresholds::VALID,
        confidence,
        suggestions,
    }
}

/// Estimate OCR confidence from the number of text annotations a vision
/// provider returned (the first annotation is the full text and is not
/// counted). Linear between 5 and 50 detected elements.
pub fn confidence_from_annotation_count(annotations: usize) -> f32 {
    if annotations == 0 {
        return 0.0;
    }
    let detected = annotations - 1;
    if detected > 50 {
        return thresholds::OCR_MAX;
    }
    if detected < 5 {
        return thresholds::OCR_MIN;
    }
    thresholds::OCR_MIN
        + ((detected - 5) as f32 / 45.0) * (thresholds::OCR_MAX - thresholds::OCR_MIN)
}
