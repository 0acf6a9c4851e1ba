//! hn-equipment: heat-source selection for shared plants.
//!
//! Parses the shared-system and fuel descriptors and resolves the pair
//! into a concrete equipment plan. Every combination either maps to a
//! plan or fails loudly; there is no silent fall-through.

pub mod plan;
pub mod types;

pub use plan::{plan_heat_source, HeatSourcePlan};
pub use types::{parse_fuel_type, SharedSystemType};

use thiserror::Error;

pub type EquipmentResult<T> = Result<T, EquipmentError>;

#[derive(Error, Debug)]
pub enum EquipmentError {
    #[error("Unknown shared system descriptor: {got:?}")]
    UnknownSystemType { got: String },

    #[error("Unknown fuel type: {got:?}")]
    UnknownFuelType { got: String },

    #[error("Unsupported system/fuel combination: {system} fired by {fuel}")]
    UnsupportedConfiguration { system: String, fuel: String },
}
