use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(ValueStatus {
    Normal => "normal",
    High => "high",
    Low => "low",
    Critical => "critical",
});

// Category hint supplied by the upload workflow.
str_enum!(ReportType {
    BloodTest => "blood_test",
    Prescription => "prescription",
    Diagnostic => "diagnostic",
    Xray => "xray",
    Mri => "mri",
    CtScan => "ct_scan",
    Laboratory => "laboratory",
    Vaccination => "vaccination",
    Consultation => "consultation",
    Other => "other",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn value_status_round_trip() {
        for (variant, s) in [
            (ValueStatus::Normal, "normal"),
            (ValueStatus::High, "high"),
            (ValueStatus::Low, "low"),
            (ValueStatus::Critical, "critical"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ValueStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn report_type_round_trip() {
        for (variant, s) in [
            (ReportType::BloodTest, "blood_test"),
            (ReportType::Prescription, "prescription"),
            (ReportType::Laboratory, "laboratory"),
            (ReportType::CtScan, "ct_scan"),
            (ReportType::Other, "other"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ReportType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn unknown_value_is_invalid_enum() {
        let err = ReportType::from_str("ultrasound").unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidEnum {
                field: "ReportType".into(),
                value: "ultrasound".into(),
            }
        );
    }

    #[test]
    fn serde_uses_wire_strings() {
        assert_eq!(
            serde_json::to_string(&ValueStatus::Critical).unwrap(),
            "\"critical\""
        );
        let parsed: ReportType = serde_json::from_str("\"blood_test\"").unwrap();
        assert_eq!(parsed, ReportType::BloodTest);
    }
}
