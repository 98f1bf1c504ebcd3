pub mod config;
pub mod models;
pub mod pipeline;

pub use models::{
    BloodTestResults, MeasuredValue, MedicalValue, Medication, ParsedMedicalData,
    PrescriptionData, ReportType, ValueStatus, VitalsData,
};
pub use pipeline::classify::{classify, classify_with_unit, ClinicalCategory, ReferenceBand};
pub use pipeline::extraction::{
    extract_value_with_unit, normalize, parse_medical_report, parse_medical_text,
    parse_prescription, validate_medical_text, MedicalTextParser, TextValidation,
};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`config::default_log_filter`]. Returns false if the host already
/// installed a global subscriber.
pub fn init_tracing() -> bool {
    let initialized = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!("{} v{} logging initialized", config::APP_NAME, config::APP_VERSION);
    }
    initialized
}
