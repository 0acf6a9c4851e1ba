//! Component payload types stored in the network arena.

use hn_core::{CompId, HxId, NodeId, ScheduleId, TankId, UnitId};

/// Fuel burned (or consumed) by a heat source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Electricity,
    NaturalGas,
    Propane,
    FuelOil,
    Wood,
    Coal,
}

impl FuelType {
    pub fn as_str(self) -> &'static str {
        match self {
            FuelType::Electricity => "electricity",
            FuelType::NaturalGas => "natural gas",
            FuelType::Propane => "propane",
            FuelType::FuelOil => "fuel oil",
            FuelType::Wood => "wood",
            FuelType::Coal => "coal",
        }
    }
}

/// Pipe payload.
///
/// `Adiabatic` pipes are loop-boundary placeholders with no thermal
/// interaction. `Indoor` pipes sit in a thermal zone and carry the
/// recirculation geometry computed by the sizing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PipeSpec {
    Adiabatic,
    Indoor {
        zone: String,
        length_ft: f64,
        diameter_in: f64,
        insulation_thickness_in: f64,
    },
}

/// Constant-speed circulation pump.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpSpec {
    /// None means the downstream engine autosizes the pump.
    pub rated_flow_gpm: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankDuty {
    Storage,
    Swing,
}

/// One electric element inside a tank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaterElement {
    pub capacity_btu_per_hr: f64,
    pub setpoint: ScheduleId,
    pub deadband_f: Option<f64>,
}

pub const TANK_HEIGHT_FT: f64 = 4.0;
pub const TANK_SOURCE_INLET_HEIGHT_FT: f64 = 3.5;
pub const TANK_SOURCE_OUTLET_HEIGHT_FT: f64 = 0.5;
pub const TANK_SKIN_LOSS_UA_BTU_PER_HR_F: f64 = 2.0;
pub const SWING_HEATER_DEADBAND_F: f64 = 10.0;

/// Physical description of a tank. The hydraulic attachments live on the
/// [`crate::Tank`] arena entry, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct TankSpec {
    pub duty: TankDuty,
    pub volume_gal: f64,
    pub height_ft: f64,
    pub heater_upper: HeaterElement,
    pub heater_lower: HeaterElement,
    pub skin_loss_ua_btu_per_hr_f: f64,
    pub source_inlet_height_ft: f64,
    pub source_outlet_height_ft: f64,
    pub use_side_design_flow_gpm: Option<f64>,
}

impl TankSpec {
    /// Storage tank: schedule-led, zero-capacity elements. Heat arrives
    /// through the source side.
    pub fn storage(volume_gal: f64, element_setpoint: ScheduleId) -> Self {
        let element = HeaterElement {
            capacity_btu_per_hr: 0.0,
            setpoint: element_setpoint,
            deadband_f: None,
        };
        Self {
            duty: TankDuty::Storage,
            volume_gal,
            height_ft: TANK_HEIGHT_FT,
            heater_upper: element,
            heater_lower: element,
            skin_loss_ua_btu_per_hr_f: TANK_SKIN_LOSS_UA_BTU_PER_HR_F,
            source_inlet_height_ft: TANK_SOURCE_INLET_HEIGHT_FT,
            source_outlet_height_ft: TANK_SOURCE_OUTLET_HEIGHT_FT,
            use_side_design_flow_gpm: None,
        }
    }

    /// Swing tank: its upper element covers the recirculation loop losses.
    pub fn swing(
        volume_gal: f64,
        heater_capacity_btu_per_hr: f64,
        element_setpoint: ScheduleId,
    ) -> Self {
        let mut spec = Self::storage(volume_gal, element_setpoint);
        spec.duty = TankDuty::Swing;
        spec.heater_upper = HeaterElement {
            capacity_btu_per_hr: heater_capacity_btu_per_hr,
            setpoint: element_setpoint,
            deadband_f: Some(SWING_HEATER_DEADBAND_F),
        };
        spec
    }
}

/// Which hydraulic circuit of a tank a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankSide {
    Use,
    Source,
}

/// Which side of a heat exchanger a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HxSide {
    Distribution,
    Source,
}

/// Fixture-draw terminal reattached onto the DHW loop.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterUseSpec {
    pub zone: String,
    pub peak_flow_gpm: f64,
}

/// Hydronic baseboard coil reattached onto the space-heating loop.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseboardSpec {
    pub zone: String,
    pub rated_capacity_btu_per_hr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoilerFlowMode {
    LeavingSetpointModulated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoilerSpec {
    pub fuel: FuelType,
    pub nominal_capacity_btu_per_hr: f64,
    pub min_part_load_ratio: f64,
    pub max_part_load_ratio: f64,
    pub flow_mode: BoilerFlowMode,
    pub on_cycle_parasitic_w: f64,
    /// Downstream reporting bucket for end-use attribution.
    pub reporting_tag: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GahpSpec {
    pub fuel: FuelType,
    pub nominal_heating_capacity_btu_per_hr: f64,
    pub aux_electric_power_w: f64,
    pub standby_electric_power_w: f64,
}

/// Heat source variants. The electric variant owns a wrapped tank; that
/// tank's use port is what sits on the supply loop.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatSourceKind {
    Boiler(BoilerSpec),
    FuelFiredHeatPump(GahpSpec),
    ElectricHeatPumpWithTank { rated_cop: f64, tank: TankId },
}

/// Payload carried by every hydraulic component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Pipe(PipeSpec),
    Pump(PumpSpec),
    TankPort { tank: TankId, side: TankSide },
    HxPort { hx: HxId, side: HxSide },
    HeatSourcePort { unit: UnitId },
    WaterUse(WaterUseSpec),
    Baseboard(BaseboardSpec),
}

/// A hydraulic component placed between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: CompId,
    pub name: String,
    pub inlet: NodeId,
    pub outlet: NodeId,
    pub kind: ComponentKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::Id;

    #[test]
    fn storage_spec_defaults() {
        let sched = Id::from_index(0);
        let spec = TankSpec::storage(80.0, sched);
        assert_eq!(spec.duty, TankDuty::Storage);
        assert_eq!(spec.volume_gal, 80.0);
        assert_eq!(spec.heater_upper.capacity_btu_per_hr, 0.0);
        assert_eq!(spec.heater_upper.deadband_f, None);
        assert!(spec.source_inlet_height_ft > spec.source_outlet_height_ft);
    }

    #[test]
    fn swing_spec_carries_heater_capacity() {
        let sched = Id::from_index(0);
        let spec = TankSpec::swing(96.0, 1_830.0, sched);
        assert_eq!(spec.duty, TankDuty::Swing);
        assert_eq!(spec.heater_upper.capacity_btu_per_hr, 1_830.0);
        assert_eq!(spec.heater_upper.deadband_f, Some(SWING_HEATER_DEADBAND_F));
        assert_eq!(spec.heater_lower.capacity_btu_per_hr, 0.0);
    }

    #[test]
    fn fuel_labels() {
        assert_eq!(FuelType::NaturalGas.as_str(), "natural gas");
        assert_eq!(FuelType::Electricity.as_str(), "electricity");
    }
}
