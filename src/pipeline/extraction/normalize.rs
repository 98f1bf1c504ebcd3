/// Fold typographic variants to the single spelling the patterns expect.
fn canonical_char(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2018}' | '\u{2019}'
        | '\u{201A}' | '\u{201B}' => '"',
        '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' | '\u{2212}' => '-',
        // Micro sign -> Greek mu, so unit tables need one spelling of μL.
        '\u{00B5}' => '\u{03BC}',
        other => other,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize text for unit-based matching: canonical quotes and dashes,
/// every whitespace run (newlines included) collapsed to one space.
pub fn normalize(text: &str) -> String {
    let canonical: String = text.chars().map(canonical_char).collect();
    collapse_whitespace(&canonical)
}

/// Line-preserving variant for record-per-line parsing (prescriptions).
/// Each line is normalized on its own; blank lines are dropped.
pub fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(normalize)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalized text in both casings: `original` for display captures,
/// `lowered` for case-insensitive unit matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub original: String,
    pub lowered: String,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        let original = normalize(raw);
        let lowered = original.to_lowercase();
        Self { original, lowered }
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

/// Clean OCR output for display: collapse whitespace and keep only ASCII
/// word characters plus `- . , : ( ) /`.
pub fn clean_extracted_text(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let kept: String = collapsed
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || *c == '_'
                || c.is_whitespace()
                || matches!(c, '-' | '.' | ',' | ':' | '(' | ')' | '/')
        })
        .collect();
    collapse_whitespace(&kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_all_whitespace() {
        assert_eq!(
            normalize("  Glucose:\t95\n\n mg/dL  "),
            "Glucose: 95 mg/dL"
        );
    }

    #[test]
    fn canonicalizes_quotes_and_dashes() {
        assert_eq!(
            normalize("Take \u{201C}as needed\u{201D} \u{2013} don\u{2019}t skip \u{2014} ok"),
            "Take \"as needed\" - don\"t skip - ok"
        );
    }

    #[test]
    fn folds_micro_sign() {
        assert_eq!(normalize("7500/\u{00B5}L"), "7500/\u{03BC}L");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
        assert_eq!(normalize_lines("\n\n"), "");
    }

    #[test]
    fn line_variant_keeps_records_apart() {
        let raw = "1. Metformin  500mg \u{2013} Take twice daily\n\n   2. Lisinopril 10mg - once daily  \n";
        assert_eq!(
            normalize_lines(raw),
            "1. Metformin 500mg - Take twice daily\n2. Lisinopril 10mg - once daily"
        );
    }

    #[test]
    fn normalized_text_keeps_both_casings() {
        let text = NormalizedText::new("Dr. SMITH\nGlucose: 95 mg/dL");
        assert_eq!(text.original, "Dr. SMITH Glucose: 95 mg/dL");
        assert_eq!(text.lowered, "dr. smith glucose: 95 mg/dl");
        assert!(!text.is_empty());
    }

    #[test]
    fn clean_extracted_text_strips_symbols() {
        assert_eq!(
            clean_extracted_text("  Temp: 37.5°C  *urgent*\n\nBP: 120/80 (ok)!"),
            "Temp: 37.5C urgent BP: 120/80 (ok)"
        );
    }
}
