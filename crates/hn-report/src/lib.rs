//! hn-report: synthesis audit report, network export and on-disk store.

pub mod export;
pub mod hash;
pub mod report;
pub mod store;

pub use export::NetworkDocument;
pub use hash::compute_synthesis_id;
pub use report::{ReportEntry, ReportValue, SynthesisReport};
pub use store::{SynthesisManifest, SynthesisStore};

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Synthesis not found: {synthesis_id}")]
    SynthesisNotFound { synthesis_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
