//! hn-synth: the synthesis orchestrator.
//!
//! Takes a validated building description, sizes the shared plant, wires
//! the full loop/tank/heat-exchanger network, reattaches the building's
//! terminal equipment, and purges the previous-generation plant by name.

pub mod constants;
pub mod error;
pub mod purge;
pub mod synthesize;

pub use error::{SynthError, SynthResult};
pub use purge::{purge_legacy_network, PurgeReport};
pub use synthesize::{synthesize, SynthOptions, Synthesis, SynthesisOutcome};

/// Version stamp carried into synthesis manifests.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
