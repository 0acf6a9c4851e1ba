//! hn-sizing: building parameters in, plant sizing scalars out.
//!
//! Every operation is a pure function; [`compute`] evaluates the whole
//! bundle once and hands the frozen [`SizingResult`] to the topology
//! layer.

pub mod capacity;
pub mod insulation;
pub mod recirculation;
pub mod tanks;

pub use capacity::{heat_source_unit_count, storage_tank_volume_gal};
pub use insulation::{insulation_thickness_in, pipe_insulation_thicknesses, InsulationPair};
pub use recirculation::{
    recirculation_flow_rate, recirculation_lengths, RecircFlow, RecircLengths,
};
pub use tanks::swing_tank_volume_gal;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type SizingResultT<T> = Result<T, SizingError>;

#[derive(Error, Debug)]
pub enum SizingError {
    #[error("Invalid sizing input: {what} = {value}")]
    InvalidInput { what: &'static str, value: f64 },

    #[error("Unknown residential facility type: {got:?}")]
    UnknownFacilityType { got: String },

    #[error(transparent)]
    Numeric(#[from] hn_core::HnError),
}

/// Nominal pipe diameters for the recirculation mains (inches).
pub const SUPPLY_PIPE_DIAMETER_IN: f64 = 2.0;
pub const RETURN_PIPE_DIAMETER_IN: f64 = 0.75;

/// Nominal insulation ratings for the recirculation mains.
pub const SUPPLY_PIPE_R_VALUE: f64 = 6.0;
pub const RETURN_PIPE_R_VALUE: f64 = 4.0;

/// Insulation conductivity, Btu/(hr ft degF).
pub const INSULATION_CONDUCTIVITY: f64 = 0.02;

/// Building shape class driving the footprint aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilityType {
    SingleFamilyDetached,
    SingleFamilyAttached,
    ManufacturedHome,
    ApartmentUnit,
}

impl FacilityType {
    pub fn parse(descriptor: &str) -> SizingResultT<Self> {
        match descriptor.trim().to_ascii_lowercase().as_str() {
            "single-family detached" | "single family detached" => {
                Ok(FacilityType::SingleFamilyDetached)
            }
            "single-family attached" | "single family attached" => {
                Ok(FacilityType::SingleFamilyAttached)
            }
            "manufactured home" => Ok(FacilityType::ManufacturedHome),
            "apartment unit" => Ok(FacilityType::ApartmentUnit),
            _ => Err(SizingError::UnknownFacilityType {
                got: descriptor.to_string(),
            }),
        }
    }

    /// Long-side-to-short-side ratio of the modeled rectangle.
    pub fn aspect_ratio(self) -> f64 {
        match self {
            FacilityType::SingleFamilyDetached | FacilityType::ManufacturedHome => 1.8,
            FacilityType::SingleFamilyAttached | FacilityType::ApartmentUnit => 0.5556,
        }
    }
}

/// Everything the sizing pass needs from the building description.
#[derive(Debug, Clone)]
pub struct SizingInputs {
    pub num_units: u32,
    pub num_bedrooms: u32,
    pub num_stories: u32,
    pub facility_type: FacilityType,
    /// Building total, square feet.
    pub conditioned_floor_area_ft2: f64,
    pub average_ceiling_height_ft: f64,
    pub double_loaded_corridor: bool,
    pub includes_space_heating: bool,
    pub is_boiler_based: bool,
}

/// Immutable bundle of every sizing output the topology layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub heat_source_unit_count: u32,
    pub storage_tank_volume_gal: f64,
    pub swing_tank_volume_gal: f64,
    pub supply_length_ft: f64,
    pub return_length_ft: f64,
    pub supply_diameter_in: f64,
    pub return_diameter_in: f64,
    pub supply_insulation_in: f64,
    pub return_insulation_in: f64,
    pub recirc_flow_gpm: f64,
    pub recirc_heat_loss_btu_per_hr: f64,
}

/// Evaluate the full sizing bundle for one building.
pub fn compute(inputs: &SizingInputs) -> SizingResultT<SizingResult> {
    if inputs.num_units == 0 {
        return Err(SizingError::InvalidInput {
            what: "num_units",
            value: 0.0,
        });
    }
    if inputs.num_stories == 0 {
        return Err(SizingError::InvalidInput {
            what: "num_stories",
            value: 0.0,
        });
    }
    if !inputs.conditioned_floor_area_ft2.is_finite() || inputs.conditioned_floor_area_ft2 <= 0.0 {
        return Err(SizingError::InvalidInput {
            what: "conditioned_floor_area_ft2",
            value: inputs.conditioned_floor_area_ft2,
        });
    }

    let footprint_ft2 = inputs.conditioned_floor_area_ft2 / inputs.num_stories as f64;
    let lengths = recirculation_lengths(
        footprint_ft2,
        inputs.facility_type.aspect_ratio(),
        inputs.average_ceiling_height_ft,
        inputs.num_units,
        inputs.num_stories,
        inputs.double_loaded_corridor,
    )?;
    let flow = recirculation_flow_rate(lengths.supply_ft, SUPPLY_PIPE_R_VALUE);
    let thicknesses = pipe_insulation_thicknesses(
        SUPPLY_PIPE_R_VALUE,
        RETURN_PIPE_R_VALUE,
        SUPPLY_PIPE_DIAMETER_IN,
        RETURN_PIPE_DIAMETER_IN,
        INSULATION_CONDUCTIVITY,
    )?;

    Ok(SizingResult {
        heat_source_unit_count: heat_source_unit_count(
            inputs.num_bedrooms,
            inputs.num_units,
            inputs.includes_space_heating,
        ),
        storage_tank_volume_gal: storage_tank_volume_gal(),
        swing_tank_volume_gal: swing_tank_volume_gal(inputs.num_units, inputs.is_boiler_based),
        supply_length_ft: lengths.supply_ft,
        return_length_ft: lengths.return_ft,
        supply_diameter_in: SUPPLY_PIPE_DIAMETER_IN,
        return_diameter_in: RETURN_PIPE_DIAMETER_IN,
        supply_insulation_in: thicknesses.supply_in,
        return_insulation_in: thicknesses.return_in,
        recirc_flow_gpm: flow.flow_gpm,
        recirc_heat_loss_btu_per_hr: flow.heat_loss_btu_per_hr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> SizingInputs {
        SizingInputs {
            num_units: 10,
            num_bedrooms: 20,
            num_stories: 2,
            facility_type: FacilityType::ApartmentUnit,
            conditioned_floor_area_ft2: 12_000.0,
            average_ceiling_height_ft: 8.5,
            double_loaded_corridor: false,
            includes_space_heating: false,
            is_boiler_based: true,
        }
    }

    #[test]
    fn facility_type_parse_and_ratio() {
        let ft = FacilityType::parse("Apartment Unit").unwrap();
        assert_eq!(ft, FacilityType::ApartmentUnit);
        assert_eq!(ft.aspect_ratio(), 0.5556);
        assert_eq!(
            FacilityType::parse("single-family detached")
                .unwrap()
                .aspect_ratio(),
            1.8
        );
        assert!(FacilityType::parse("houseboat").is_err());
    }

    #[test]
    fn compute_bundles_everything() {
        let result = compute(&inputs()).unwrap();
        assert_eq!(result.heat_source_unit_count, 3);
        assert_eq!(result.storage_tank_volume_gal, 80.0);
        // Boiler-based: no swing tank.
        assert_eq!(result.swing_tank_volume_gal, 0.0);
        assert!(result.supply_length_ft > 0.0);
        assert_eq!(result.return_length_ft, result.supply_length_ft);
        assert!(result.supply_insulation_in > result.return_insulation_in);
        assert!(result.recirc_flow_gpm > 0.0);
    }

    #[test]
    fn compute_rejects_zero_stories() {
        let mut bad = inputs();
        bad.num_stories = 0;
        assert!(matches!(
            compute(&bad),
            Err(SizingError::InvalidInput { what: "num_stories", .. })
        ));
    }
}
