//! Equipment selection keyed by the (system, fuel) pair.

use hn_core::ScheduleId;
use hn_model::{BoilerFlowMode, BoilerSpec, FuelType, GahpSpec, TankSpec};

use crate::{EquipmentError, EquipmentResult, SharedSystemType};

/// Placeholder nominal ratings. The downstream engine auto-sizes from
/// these; they only need to be plausible.
pub const BOILER_NOMINAL_CAPACITY_BTU_PER_HR: f64 = 100_000.0;
pub const GAHP_NOMINAL_CAPACITY_BTU_PER_HR: f64 = 80_000.0;

pub const HPWH_RATED_COP: f64 = 2.8;
pub const HPWH_TANK_VOLUME_GAL: f64 = 80.0;

/// What the topology layer instantiates on one supply loop.
#[derive(Debug, Clone)]
pub enum HeatSourcePlan {
    Boiler(BoilerSpec),
    FuelFiredHeatPump(GahpSpec),
    /// The wrapped tank is what lands on the loop; the wrapper only
    /// carries the compressor rating.
    ElectricHeatPumpWithTank { rated_cop: f64, tank: TankSpec },
}

pub fn plan_heat_source(
    system: SharedSystemType,
    fuel: FuelType,
    element_setpoint: ScheduleId,
) -> EquipmentResult<HeatSourcePlan> {
    match system {
        SharedSystemType::Boiler { .. } => Ok(HeatSourcePlan::Boiler(BoilerSpec {
            fuel,
            nominal_capacity_btu_per_hr: BOILER_NOMINAL_CAPACITY_BTU_PER_HR,
            min_part_load_ratio: 0.0,
            max_part_load_ratio: 1.0,
            flow_mode: BoilerFlowMode::LeavingSetpointModulated,
            on_cycle_parasitic_w: 0.0,
            reporting_tag: "combi boiler",
        })),
        SharedSystemType::HeatPumpWaterHeater { .. } if fuel == FuelType::Electricity => {
            Ok(HeatSourcePlan::ElectricHeatPumpWithTank {
                rated_cop: HPWH_RATED_COP,
                tank: TankSpec::storage(HPWH_TANK_VOLUME_GAL, element_setpoint),
            })
        }
        SharedSystemType::HeatPumpWaterHeater { .. } => {
            Ok(HeatSourcePlan::FuelFiredHeatPump(GahpSpec {
                fuel,
                nominal_heating_capacity_btu_per_hr: GAHP_NOMINAL_CAPACITY_BTU_PER_HR,
                aux_electric_power_w: 0.0,
                standby_electric_power_w: 0.0,
            }))
        }
        SharedSystemType::None => Err(EquipmentError::UnsupportedConfiguration {
            system: system.label().to_string(),
            fuel: fuel.as_str().to_string(),
        }),
    }
}
