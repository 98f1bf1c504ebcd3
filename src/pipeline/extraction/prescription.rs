//! Prescription parsing: prescriber, clinic, general instructions and one
//! medication per line.
//!
//! Runs over line-preserved text. Each line is tried against three
//! medication shapes, most specific first:
//!
//! 1. `[n.] Name 500mg - instructions`
//! 2. `[n.] Name: 500mg, instructions`
//! 3. `[n.] Name 500mg instructions`
//!
//! The dosage must be followed by a separator, which keeps lab lines such as
//! `Glucose: 95 mg/dL` out of the medication list. The name is every word
//! before the dosage, so narrative lines (`Patient on Metformin 500 mg bid`)
//! come back with the leading words in the name.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::normalize::normalize_lines;
use crate::models::{Medication, PrescriptionData};

const INDEX: &str = r"(?:\d+\.?\s*)?";
const NAME: &str = r"([a-z][a-z ]*?)";
const DOSAGE: &str = r"(\d+(?:\.\d+)?\s*(?:mg|g|ml|mcg|μg|units?))";

/// Frequency used when no known phrase is present.
pub const DEFAULT_FREQUENCY: &str = "As directed";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid prescription regex pattern")
}

static DOCTOR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?i)\bdr\.?[ \t]+([a-z][a-z \t]*)"),
        compile(r"(?i)\bdoctor:?[ \t]*([a-z][a-z \t]*)"),
        compile(r"(?i)\bphysician:?[ \t]*([a-z][a-z \t]*)"),
    ]
});

static CLINIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?i)\bclinic\b:?[ \t]*([a-z][a-z \t]*)"),
        compile(r"(?i)\bhospital\b:?[ \t]*([a-z][a-z \t]*)"),
        compile(r"(?i)\bmedical[ \t]+center\b:?[ \t]*([a-z][a-z \t]*)"),
    ]
});

static INSTRUCTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?i)\binstructions?\b:?[ \t]*([^\n]+)"),
        compile(r"(?i)\bdirections?\b:?[ \t]*([^\n]+)"),
        compile(r"(?i)\bnotes?\b:?[ \t]*([^\n]+)"),
    ]
});

static MEDICATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(&format!(r"(?i)^{INDEX}{NAME}\s+{DOSAGE}\s*-\s*(.+)$")),
        compile(&format!(r"(?i)^{INDEX}{NAME}:\s*{DOSAGE}(?:\s*,\s*|\s+)(.+)$")),
        compile(&format!(r"(?i)^{INDEX}{NAME}\s+{DOSAGE}\s+(.+)$")),
    ]
});

/// Canonical frequency phrases in priority order. `$1` is replaced by the
/// first capture group. Bare "daily" is last so it cannot shadow
/// "twice daily" and friends.
static FREQUENCY_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            compile(r"(?i)\bonce\s+(?:daily|a\s+day)\b|\b1x\s*daily\b|\bqd\b"),
            "Once daily",
        ),
        (
            compile(r"(?i)\btwice\s+(?:daily|a\s+day)\b|\b2x\s*daily\b|\bbid\b"),
            "Twice daily",
        ),
        (
            compile(r"(?i)\bthree\s+times?\s+(?:daily|a\s+day)\b|\b3x\s*daily\b|\btid\b"),
            "Three times daily",
        ),
        (
            compile(r"(?i)\bfour\s+times?\s+(?:daily|a\s+day)\b|\b4x\s*daily\b|\bqid\b"),
            "Four times daily",
        ),
        (compile(r"(?i)\bevery\s+(\d+)\s+hours?\b"), "Every $1 hours"),
        (compile(r"(?i)\bas\s+needed\b|\bprn\b"), "As needed"),
        (compile(r"(?i)\bdaily\b"), "Once daily"),
    ]
});

static DURATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?i)\bfor\s+\d+\s+days?\b"),
        compile(r"(?i)\bfor\s+\d+\s+weeks?\b"),
        compile(r"(?i)\bfor\s+\d+\s+months?\b"),
        compile(r"(?i)\b\d+\s+days?\b"),
        compile(r"(?i)\b\d+\s+weeks?\b"),
        compile(r"(?i)\b\d+\s+months?\b"),
    ]
});

/// Frequency and duration derived from a medication's instruction text.
/// The text itself is kept verbatim in `instructions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDetails {
    pub frequency: String,
    pub duration: Option<String>,
    pub instructions: String,
}

/// Parse a prescription document. Unmatched header fields stay empty.
pub fn parse_prescription(text: &str) -> PrescriptionData {
    let lines = normalize_lines(text);

    let medications: Vec<Medication> = lines.lines().filter_map(parse_medication_line).collect();

    let data = PrescriptionData {
        doctor: first_capture(&DOCTOR_PATTERNS, &lines),
        clinic: first_capture(&CLINIC_PATTERNS, &lines),
        instructions: first_capture(&INSTRUCTION_PATTERNS, &lines),
        medications,
    };
    debug!(
        medications = data.medications.len(),
        has_doctor = !data.doctor.is_empty(),
        "Prescription parsed"
    );
    data
}

/// First pattern (in list order) that matches anywhere, trimmed; else empty.
fn first_capture(patterns: &[Regex], text: &str) -> String {
    patterns
        .iter()
        .find_map(|p| p.captures(text))
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

/// Parse one line as a medication entry. Returns `None` when no shape
/// matches or the captured name looks like a stray list marker.
pub fn parse_medication_line(line: &str) -> Option<Medication> {
    let line = line.trim();
    for pattern in MEDICATION_PATTERNS.iter() {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };
        let name = caps[1].trim();
        if !is_plausible_name(name) {
            trace!(line, name, "Medication candidate rejected");
            continue;
        }
        let details = parse_instructions(&caps[3]);
        return Some(Medication {
            name: name.to_string(),
            dosage: caps[2].trim().to_string(),
            frequency: details.frequency,
            duration: details.duration,
            instructions: details.instructions,
        });
    }
    None
}

fn is_plausible_name(name: &str) -> bool {
    name.chars().count() >= 3 && !name.chars().all(|c| c.is_ascii_digit())
}

/// Derive frequency and duration from free instruction text.
pub fn parse_instructions(text: &str) -> InstructionDetails {
    let text = text.trim();

    let frequency = FREQUENCY_PATTERNS
        .iter()
        .find_map(|(pattern, template)| {
            pattern.captures(text).map(|caps| {
                let mut out = String::new();
                caps.expand(template, &mut out);
                out
            })
        })
        .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string());

    let duration = DURATION_PATTERNS
        .iter()
        .find_map(|p| p.find(text))
        .map(|m| m.as_str().to_string());

    InstructionDetails {
        frequency,
        duration,
        instructions: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_line_keeps_leading_words_in_name() {
        let med = parse_medication_line("Patient on Metformin 500 mg bid").unwrap();
        assert_eq!(med.name, "Patient on Metformin");
        assert_eq!(med.dosage, "500 mg");
        assert_eq!(med.frequency, "Twice daily");
    }

    const PRESCRIPTION: &str = "PRESCRIPTION
Patient: Jane Smith
Medications:
1. Metformin 500mg - Take twice daily with meals
2. Lisinopril 10mg - Take once daily in morning
3. Atorvastatin 20mg - Take once daily at bedtime
Follow-up: 3 months
Dr. Johnson
Clinic: Riverside Family Practice
Instructions: Avoid alcohol while on this regimen";

    #[test]
    fn metformin_line_scenario() {
        let data = parse_prescription("1. Metformin 500mg - Take twice daily with meals");
        assert_eq!(
            data.medications,
            vec![Medication {
                name: "Metformin".into(),
                dosage: "500mg".into(),
                frequency: "Twice daily".into(),
                duration: None,
                instructions: "Take twice daily with meals".into(),
            }]
        );
    }

    #[test]
    fn full_prescription() {
        let data = parse_prescription(PRESCRIPTION);
        let names: Vec<&str> = data.medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Metformin", "Lisinopril", "Atorvastatin"]);
        assert_eq!(data.medications[1].frequency, "Once daily");
        assert_eq!(data.doctor, "Johnson");
        assert_eq!(data.clinic, "Riverside Family Practice");
        assert_eq!(data.instructions, "Avoid alcohol while on this regimen");
    }

    #[test]
    fn colon_shape() {
        let med = parse_medication_line("Amoxicillin: 500 mg, three times daily for 7 days").unwrap();
        assert_eq!(med.name, "Amoxicillin");
        assert_eq!(med.dosage, "500 mg");
        assert_eq!(med.frequency, "Three times daily");
        assert_eq!(med.duration.as_deref(), Some("for 7 days"));
        assert_eq!(med.instructions, "three times daily for 7 days");
    }

    #[test]
    fn no_separator_shape() {
        let med = parse_medication_line("Ibuprofen 400mg every 6 hours as needed").unwrap();
        assert_eq!(med.name, "Ibuprofen");
        assert_eq!(med.dosage, "400mg");
        assert_eq!(med.frequency, "Every 6 hours");
    }

    #[test]
    fn multiword_names_and_other_units() {
        let med = parse_medication_line("2. Vitamin D 1000 units daily").unwrap();
        assert_eq!(med.name, "Vitamin D");
        assert_eq!(med.dosage, "1000 units");
        assert_eq!(med.frequency, "Once daily");

        let med = parse_medication_line("Levothyroxine 50mcg - once a day before breakfast").unwrap();
        assert_eq!(med.dosage, "50mcg");
        assert_eq!(med.frequency, "Once daily");
    }

    #[test]
    fn short_names_are_rejected() {
        assert!(parse_medication_line("1. Ab 5mg - daily").is_none());
    }

    #[test]
    fn lab_lines_are_not_medications() {
        assert!(parse_medication_line("Glucose: 95 mg/dL").is_none());
        assert!(parse_medication_line("Hemoglobin: 14.2 g/dL (Normal: 12-16)").is_none());
        assert!(parse_medication_line("Follow-up: 3 months").is_none());
    }

    #[test]
    fn frequency_priority_and_default() {
        assert_eq!(parse_instructions("take BID").frequency, "Twice daily");
        assert_eq!(parse_instructions("qid with water").frequency, "Four times daily");
        assert_eq!(parse_instructions("use PRN for pain").frequency, "As needed");
        assert_eq!(parse_instructions("apply to skin").frequency, DEFAULT_FREQUENCY);
        // "morbid" must not read as "bid".
        assert_eq!(parse_instructions("morbid note").frequency, DEFAULT_FREQUENCY);
    }

    #[test]
    fn duration_prefers_for_phrases() {
        let d = parse_instructions("2 tablets for 3 weeks then review in 10 days");
        assert_eq!(d.duration.as_deref(), Some("for 3 weeks"));
        let d = parse_instructions("continue 2 months");
        assert_eq!(d.duration.as_deref(), Some("2 months"));
        assert_eq!(parse_instructions("once daily").duration, None);
    }

    #[test]
    fn instruction_parsing_is_idempotent() {
        for text in [
            "Take twice daily with meals for 10 days",
            "every 8 hours as needed",
            "apply thinly",
            "  qd x 2 weeks  ",
        ] {
            let first = parse_instructions(text);
            let second = parse_instructions(&first.instructions);
            assert_eq!(first, second, "{text}");
        }
    }

    #[test]
    fn header_fields_use_priority_order() {
        let data = parse_prescription("Physician: Alice Moreau\nDoctor: Bob Lane\nHospital: Saint Luke");
        assert_eq!(data.doctor, "Bob Lane");
        assert_eq!(data.clinic, "Saint Luke");
    }

    #[test]
    fn header_capture_stays_on_its_line() {
        let data = parse_prescription("Dr. Smith\nClinic: City Medical Center");
        assert_eq!(data.doctor, "Smith");
        assert_eq!(data.clinic, "City Medical Center");
    }

    #[test]
    fn unrelated_text_gives_empty_prescription() {
        let data = parse_prescription("Chest X-ray shows clear lungs");
        assert!(data.is_empty());
    }
}
