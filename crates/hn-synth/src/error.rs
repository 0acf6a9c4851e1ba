//! Unified error type for the synthesis pipeline.

/// Wraps the backend crate errors, in pipeline order: reading the
/// building, sizing it, planning equipment, wiring topology, persisting
/// the outcome.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("Building error: {0}")]
    Building(String),

    #[error("Sizing error: {0}")]
    Sizing(String),

    #[error("Equipment error: {0}")]
    Equipment(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Report error: {0}")]
    Report(String),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

impl From<hn_project::ProjectError> for SynthError {
    fn from(err: hn_project::ProjectError) -> Self {
        SynthError::Building(err.to_string())
    }
}

impl From<hn_sizing::SizingError> for SynthError {
    fn from(err: hn_sizing::SizingError) -> Self {
        SynthError::Sizing(err.to_string())
    }
}

impl From<hn_equipment::EquipmentError> for SynthError {
    fn from(err: hn_equipment::EquipmentError) -> Self {
        SynthError::Equipment(err.to_string())
    }
}

impl From<hn_core::HnError> for SynthError {
    fn from(err: hn_core::HnError) -> Self {
        SynthError::Topology(err.to_string())
    }
}

impl From<hn_report::ReportError> for SynthError {
    fn from(err: hn_report::ReportError) -> Self {
        SynthError::Report(err.to_string())
    }
}
