//! hn-project: canonical building-description file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{validate_building, ValidationError};

pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("No upgrade path from schema version {found}")]
    Version { found: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bump older schema versions forward. Version 0 files predate the
/// version field and deserialize with `version = 0`.
fn upgrade_to_latest(mut building: Building) -> ProjectResult<Building> {
    while building.version < LATEST_VERSION {
        building.version = match building.version {
            0 => 1,
            v => return Err(ProjectError::Version { found: v }),
        };
    }
    Ok(building)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Building> {
    let content = std::fs::read_to_string(path)?;
    let mut building: Building = serde_yaml::from_str(&content)?;
    building = upgrade_to_latest(building)?;
    validate_building(&building)?;
    Ok(building)
}

pub fn save_yaml(path: &std::path::Path, building: &Building) -> ProjectResult<()> {
    validate_building(building)?;
    let content = serde_yaml::to_string(building)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Building> {
    let content = std::fs::read_to_string(path)?;
    let mut building: Building = serde_json::from_str(&content)?;
    building = upgrade_to_latest(building)?;
    validate_building(&building)?;
    Ok(building)
}

pub fn save_json(path: &std::path::Path, building: &Building) -> ProjectResult<()> {
    validate_building(building)?;
    let content = serde_json::to_string_pretty(building)?;
    std::fs::write(path, content)?;
    Ok(())
}
