use tracing::debug;

use super::normalize::NormalizedText;
use super::tables::compiled_lab_analytes;
use super::values::CompiledAnalyte;
use crate::models::BloodTestResults;

/// Extract lab values from already-normalized text using the given tables.
pub fn extract_blood_test(text: &NormalizedText, analytes: &[CompiledAnalyte]) -> BloodTestResults {
    let mut results = BloodTestResults::new();
    for analyte in analytes {
        if let Some(value) = analyte.extract(&text.lowered) {
            results.insert(analyte.key.clone(), value);
        }
    }
    debug!(found = results.len(), "Lab values extracted");
    results
}

/// Extract lab values from raw text with the built-in analyte tables.
pub fn parse_blood_test(text: &str) -> BloodTestResults {
    extract_blood_test(&NormalizedText::new(text), compiled_lab_analytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyteSpec;
    use crate::models::{MeasuredValue, ValueStatus};

    const LAB_REPORT: &str = "LABORATORY REPORT
Patient Name: John Doe
Test Results:
- Glucose: 95 mg/dL (Normal: 70-100)
- Hemoglobin: 14.2 g/dL (Normal: 12-16)
- Cholesterol: 180 mg/dL (Normal: <200)
- White Blood Cells: 7,500/\u{00B5}L (Normal: 4,000-11,000)
- Red Blood Cells: 4.8 million/μL (Normal: 4.2-5.4)
Doctor: Dr. Smith";

    #[test]
    fn full_report_extracts_every_analyte() {
        let labs = parse_blood_test(LAB_REPORT);
        assert_eq!(labs.len(), 5);

        let glucose = labs.glucose().unwrap();
        assert_eq!(glucose.value, MeasuredValue::Number(95.0));
        assert_eq!(glucose.unit, "mg/dl");
        assert_eq!(glucose.status, Some(ValueStatus::Normal));

        assert_eq!(labs.hemoglobin().unwrap().value.as_f64(), Some(14.2));
        assert_eq!(labs.cholesterol().unwrap().status, Some(ValueStatus::Normal));

        let wbc = labs.white_blood_cells().unwrap();
        assert_eq!(wbc.value.as_f64(), Some(7_500.0));
        assert_eq!(wbc.unit, "/μl");
        assert_eq!(wbc.status, Some(ValueStatus::Normal));

        let rbc = labs.red_blood_cells().unwrap();
        assert_eq!(rbc.unit, "million/μl");
        assert_eq!(rbc.normal_range.as_deref(), Some("4.2-5.4 million/μL"));
        assert!(labs.platelets().is_none());
    }

    #[test]
    fn critical_white_cells() {
        let labs = parse_blood_test("White Blood Cells: 1500/μL");
        assert_eq!(
            labs.white_blood_cells().unwrap().status,
            Some(ValueStatus::Critical)
        );
    }

    #[test]
    fn abbreviations_are_recognized() {
        let labs = parse_blood_test("HGB 7.5 g/dL; PLT 40,000/uL; WBC 12,500/uL");
        assert_eq!(labs.hemoglobin().unwrap().status, Some(ValueStatus::Critical));
        assert_eq!(labs.platelets().unwrap().status, Some(ValueStatus::Critical));
        assert_eq!(labs.platelets().unwrap().unit, "/ul");
        assert_eq!(labs.white_blood_cells().unwrap().status, Some(ValueStatus::High));
    }

    #[test]
    fn no_labs_yields_empty_results() {
        assert!(parse_blood_test("Chest X-ray: lungs are clear").is_empty());
        assert!(parse_blood_test("").is_empty());
    }

    #[test]
    fn custom_table_adds_analyte() {
        let specs = vec![AnalyteSpec::new("ferritin", &["ferritin"], &["ng/ml"], None)];
        let analytes = CompiledAnalyte::compile_all(&specs).unwrap();
        let labs = extract_blood_test(&NormalizedText::new("Ferritin: 40 ng/mL"), &analytes);
        let ferritin = labs.get("ferritin").unwrap();
        assert_eq!(ferritin.value.as_f64(), Some(40.0));
        assert_eq!(ferritin.status, None);
    }
}
