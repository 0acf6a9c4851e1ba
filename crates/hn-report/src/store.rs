//! Synthesis storage API.

use crate::export::NetworkDocument;
use crate::report::SynthesisReport;
use crate::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub type SynthesisId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisManifest {
    pub synthesis_id: SynthesisId,
    pub building_name: String,
    pub timestamp: String,
    pub tool_version: String,
}

impl SynthesisManifest {
    pub fn new(
        synthesis_id: impl Into<SynthesisId>,
        building_name: impl Into<String>,
        tool_version: impl Into<String>,
    ) -> Self {
        SynthesisManifest {
            synthesis_id: synthesis_id.into(),
            building_name: building_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: tool_version.into(),
        }
    }
}

#[derive(Clone)]
pub struct SynthesisStore {
    root_dir: PathBuf,
}

impl SynthesisStore {
    pub fn new(root_dir: PathBuf) -> ReportResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store rooted next to the building description file.
    pub fn for_building(building_path: &Path) -> ReportResult<Self> {
        let building_dir = building_path
            .parent()
            .ok_or_else(|| ReportError::InvalidPath {
                message: "building path has no parent directory".to_string(),
            })?;
        let syntheses_dir = building_dir.join(".hydronet").join("syntheses");
        Self::new(syntheses_dir)
    }

    fn synthesis_dir(&self, synthesis_id: &str) -> PathBuf {
        self.root_dir.join(synthesis_id)
    }

    pub fn has_synthesis(&self, synthesis_id: &str) -> bool {
        self.synthesis_dir(synthesis_id).join("manifest.json").exists()
    }

    pub fn save_synthesis(
        &self,
        manifest: &SynthesisManifest,
        network: &NetworkDocument,
        report: &SynthesisReport,
    ) -> ReportResult<()> {
        let dir = self.synthesis_dir(&manifest.synthesis_id);
        fs::create_dir_all(&dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(dir.join("manifest.json"), manifest_json)?;

        let network_json = serde_json::to_string_pretty(network)?;
        fs::write(dir.join("network.json"), network_json)?;

        let report_json = serde_json::to_string_pretty(report)?;
        fs::write(dir.join("report.json"), report_json)?;

        Ok(())
    }

    pub fn load_manifest(&self, synthesis_id: &str) -> ReportResult<SynthesisManifest> {
        let path = self.synthesis_dir(synthesis_id).join("manifest.json");
        if !path.exists() {
            return Err(ReportError::SynthesisNotFound {
                synthesis_id: synthesis_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_report(&self, synthesis_id: &str) -> ReportResult<SynthesisReport> {
        let path = self.synthesis_dir(synthesis_id).join("report.json");
        if !path.exists() {
            return Err(ReportError::SynthesisNotFound {
                synthesis_id: synthesis_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        let report = serde_json::from_str(&content)?;
        Ok(report)
    }

    pub fn load_network(&self, synthesis_id: &str) -> ReportResult<NetworkDocument> {
        let path = self.synthesis_dir(synthesis_id).join("network.json");
        if !path.exists() {
            return Err(ReportError::SynthesisNotFound {
                synthesis_id: synthesis_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        let network = serde_json::from_str(&content)?;
        Ok(network)
    }

    pub fn list_syntheses(&self, building_name: &str) -> ReportResult<Vec<SynthesisManifest>> {
        let mut manifests = Vec::new();

        if !self.root_dir.exists() {
            return Ok(manifests);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let synthesis_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&synthesis_id) {
                    if manifest.building_name == building_name {
                        manifests.push(manifest);
                    }
                }
            }
        }

        Ok(manifests)
    }

    pub fn delete_synthesis(&self, synthesis_id: &str) -> ReportResult<()> {
        let dir = self.synthesis_dir(synthesis_id);
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }
}
