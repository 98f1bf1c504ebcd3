pub mod normalize;
pub mod tables;
pub mod values;
pub mod lab;
pub mod vitals;
pub mod prescription;
pub mod confidence;
pub mod orchestrator;

pub use normalize::*;
pub use values::*;
pub use lab::*;
pub use vitals::*;
pub use prescription::*;
pub use confidence::*;
pub use orchestrator::*;

use thiserror::Error;

/// Raised only when building patterns from caller-supplied tables.
/// Extraction itself never fails: unmatched fields are simply absent.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Cannot build pattern for term {term:?} with unit {unit:?}: {source}")]
    InvalidPattern {
        term: String,
        unit: String,
        #[source]
        source: regex::Error,
    },

    #[error("Extraction table for {0} has no terms or no units")]
    EmptyTable(String),
}
