use tracing::{debug, warn};

use super::normalize::NormalizedText;
use super::tables::compiled_vital_signs;
use super::values::{extract_blood_pressure, CompiledAnalyte};
use crate::models::VitalsData;

/// Extract vital signs from normalized text. Blood pressure uses its own
/// ratio pattern; every other vital comes from the table.
pub fn extract_vitals(text: &NormalizedText, vitals: &[CompiledAnalyte]) -> VitalsData {
    let mut data = VitalsData {
        blood_pressure: extract_blood_pressure(&text.lowered),
        ..Default::default()
    };
    for vital in vitals {
        if let Some(value) = vital.extract(&text.lowered) {
            if !data.set(&vital.key, value) {
                warn!(key = %vital.key, "Vital sign table entry has no field; ignored");
            }
        }
    }
    debug!(
        blood_pressure = data.blood_pressure.is_some(),
        measurements = data.measurements().count(),
        "Vitals extracted"
    );
    data
}

/// Extract vital signs from raw text with the built-in tables.
pub fn parse_vitals(text: &str) -> VitalsData {
    extract_vitals(&NormalizedText::new(text), compiled_vital_signs())
}
