//! Content-based hashing for synthesis IDs.

use hn_project::Building;
use sha2::{Digest, Sha256};

/// Deterministic id over the building description, the synthesis
/// options (pre-serialized as JSON) and the tool version. Same inputs,
/// same id.
pub fn compute_synthesis_id(building: &Building, options_json: &str, tool_version: &str) -> String {
    let mut hasher = Sha256::new();

    let building_json = serde_json::to_string(building).unwrap_or_default();
    hasher.update(building_json.as_bytes());

    hasher.update(options_json.as_bytes());
    hasher.update(tool_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
