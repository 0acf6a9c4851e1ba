//! Descriptor parsing for the shared system and its fuel.

use hn_model::FuelType;

use crate::{EquipmentError, EquipmentResult};

/// Parsed shared-water-heater descriptor. The raw string dispatches on
/// substring containment, so "boiler, with space-heating" and plain
/// "boiler" both land on [`SharedSystemType::Boiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedSystemType {
    None,
    Boiler { with_space_heating: bool },
    HeatPumpWaterHeater { with_space_heating: bool },
}

impl SharedSystemType {
    /// Case-sensitive substring dispatch over the raw descriptor.
    pub fn parse(descriptor: &str) -> EquipmentResult<Self> {
        let trimmed = descriptor.trim();
        if trimmed == "none" {
            return Ok(SharedSystemType::None);
        }
        let with_space_heating = trimmed.contains("space-heating");
        if trimmed.contains("boiler") {
            Ok(SharedSystemType::Boiler { with_space_heating })
        } else if trimmed.contains("heat pump water heater") {
            Ok(SharedSystemType::HeatPumpWaterHeater { with_space_heating })
        } else {
            Err(EquipmentError::UnknownSystemType {
                got: descriptor.to_string(),
            })
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, SharedSystemType::None)
    }

    pub fn is_boiler_based(self) -> bool {
        matches!(self, SharedSystemType::Boiler { .. })
    }

    pub fn includes_space_heating(self) -> bool {
        match self {
            SharedSystemType::None => false,
            SharedSystemType::Boiler { with_space_heating }
            | SharedSystemType::HeatPumpWaterHeater { with_space_heating } => with_space_heating,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SharedSystemType::None => "none",
            SharedSystemType::Boiler { .. } => "boiler",
            SharedSystemType::HeatPumpWaterHeater { .. } => "heat pump water heater",
        }
    }
}

pub fn parse_fuel_type(descriptor: &str) -> EquipmentResult<FuelType> {
    match descriptor.trim().to_ascii_lowercase().as_str() {
        "electricity" => Ok(FuelType::Electricity),
        "natural gas" => Ok(FuelType::NaturalGas),
        "propane" => Ok(FuelType::Propane),
        "fuel oil" => Ok(FuelType::FuelOil),
        "wood" => Ok(FuelType::Wood),
        "coal" => Ok(FuelType::Coal),
        _ => Err(EquipmentError::UnknownFuelType {
            got: descriptor.to_string(),
        }),
    }
}
