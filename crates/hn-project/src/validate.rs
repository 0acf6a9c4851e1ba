//! Building-description validation logic.

use crate::schema::Building;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_building(building: &Building) -> Result<(), ValidationError> {
    if building.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: building.version,
        });
    }

    let geometry = &building.geometry;
    if geometry.num_units == 0 {
        return Err(ValidationError::InvalidValue {
            field: "geometry.num_units".to_string(),
            value: "0".to_string(),
            reason: "a shared plant needs at least one unit".to_string(),
        });
    }
    if geometry.num_stories == 0 {
        return Err(ValidationError::InvalidValue {
            field: "geometry.num_stories".to_string(),
            value: "0".to_string(),
            reason: "must be at least one story".to_string(),
        });
    }
    if !geometry.conditioned_floor_area_ft2.is_finite()
        || geometry.conditioned_floor_area_ft2 <= 0.0
    {
        return Err(ValidationError::InvalidValue {
            field: "geometry.conditioned_floor_area_ft2".to_string(),
            value: geometry.conditioned_floor_area_ft2.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    if !geometry.average_ceiling_height_ft.is_finite()
        || geometry.average_ceiling_height_ft <= 0.0
    {
        return Err(ValidationError::InvalidValue {
            field: "geometry.average_ceiling_height_ft".to_string(),
            value: geometry.average_ceiling_height_ft.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    let mut zone_names = HashSet::new();
    for zone in &building.zones {
        if !zone_names.insert(&zone.name) {
            return Err(ValidationError::DuplicateName {
                name: zone.name.clone(),
                context: "zones".to_string(),
            });
        }
        if zone.multiplier == 0 {
            return Err(ValidationError::InvalidValue {
                field: format!("zone '{}' multiplier", zone.name),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
    }

    let mut water_use_names = HashSet::new();
    for connection in &building.water_use_connections {
        if !water_use_names.insert(&connection.name) {
            return Err(ValidationError::DuplicateName {
                name: connection.name.clone(),
                context: "water_use_connections".to_string(),
            });
        }
        if !zone_names.contains(&connection.zone) {
            return Err(ValidationError::MissingReference {
                name: connection.zone.clone(),
                context: format!("water use connection '{}' zone", connection.name),
            });
        }
        if !connection.peak_flow_gpm.is_finite() || connection.peak_flow_gpm < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("water use connection '{}' peak_flow_gpm", connection.name),
                value: connection.peak_flow_gpm.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }

    let mut baseboard_names = HashSet::new();
    for baseboard in &building.baseboards {
        if !baseboard_names.insert(&baseboard.name) {
            return Err(ValidationError::DuplicateName {
                name: baseboard.name.clone(),
                context: "baseboards".to_string(),
            });
        }
        if !zone_names.contains(&baseboard.zone) {
            return Err(ValidationError::MissingReference {
                name: baseboard.zone.clone(),
                context: format!("baseboard '{}' zone", baseboard.name),
            });
        }
        if !baseboard.rated_capacity_btu_per_hr.is_finite()
            || baseboard.rated_capacity_btu_per_hr < 0.0
        {
            return Err(ValidationError::InvalidValue {
                field: format!("baseboard '{}' rated_capacity_btu_per_hr", baseboard.name),
                value: baseboard.rated_capacity_btu_per_hr.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }

    Ok(())
}
