//! Building-description schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Building {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub geometry: GeometryDef,
    pub shared_system: SharedSystemDef,
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
    #[serde(default)]
    pub water_use_connections: Vec<WaterUseDef>,
    #[serde(default)]
    pub baseboards: Vec<BaseboardDef>,
    #[serde(default)]
    pub legacy: LegacyPlantDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryDef {
    pub num_units: u32,
    pub num_bedrooms: u32,
    pub num_stories: u32,
    pub facility_type: String,
    /// Building total, square feet.
    pub conditioned_floor_area_ft2: f64,
    pub average_ceiling_height_ft: f64,
    #[serde(default)]
    pub double_loaded_corridor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SharedSystemDef {
    /// Raw descriptor, e.g. "boiler" or "heat pump water heater with
    /// space-heating". "none" means the building keeps its in-unit
    /// equipment.
    pub system_type: String,
    #[serde(default = "default_fuel")]
    pub fuel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneDef {
    pub name: String,
    /// Zone multiplier; multiplied zones stand in for identical
    /// repeats, so per-zone pipe lengths are divided by this.
    #[serde(default = "default_zone_multiplier")]
    pub multiplier: u32,
    #[serde(default = "default_true")]
    pub conditioned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterUseDef {
    pub name: String,
    pub zone: String,
    pub peak_flow_gpm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseboardDef {
    pub name: String,
    pub zone: String,
    pub rated_capacity_btu_per_hr: f64,
}

/// Previous-generation plant inventory, listed by assigned name. The
/// purge pass matches against these names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LegacyPlantDef {
    #[serde(default)]
    pub loops: Vec<String>,
    #[serde(default)]
    pub ems: LegacyEmsDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LegacyEmsDef {
    #[serde(default)]
    pub program_calling_managers: Vec<LegacyManagerDef>,
    #[serde(default)]
    pub sensors: Vec<String>,
    #[serde(default)]
    pub actuators: Vec<String>,
    #[serde(default)]
    pub output_variables: Vec<String>,
    #[serde(default)]
    pub internal_variables: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyManagerDef {
    pub name: String,
    /// Programs owned by this calling manager; they go when it goes.
    #[serde(default)]
    pub programs: Vec<String>,
}

fn default_fuel() -> String {
    "electricity".to_string()
}

fn default_zone_multiplier() -> u32 {
    1
}

fn default_true() -> bool {
    true
}
