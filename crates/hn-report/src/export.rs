//! Serializable flattening of a frozen plant network.
//!
//! The downstream engine consumes names, not arena ids, so every id is
//! resolved here. Unresolvable ids (impossible after validation) fall
//! back to their numeric form rather than failing the export.

use hn_core::{CompId, LoopId, NodeId, ScheduleId, TankId};
use hn_model::{
    Branch, Component, ComponentKind, HalfLoop, HeatSourceKind, PipeSpec, PlantLoop,
    PlantNetwork, TankSide,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub loops: Vec<LoopRecord>,
    pub tanks: Vec<TankRecord>,
    pub heat_exchangers: Vec<HeatExchangerRecord>,
    pub heat_sources: Vec<HeatSourceRecord>,
    pub schedules: Vec<ScheduleRecord>,
    pub setpoint_managers: Vec<SetpointManagerRecord>,
    pub availability_managers: Vec<AvailabilityManagerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopRecord {
    pub name: String,
    pub role: String,
    pub setpoint_schedule: String,
    pub design_delta_t_f: f64,
    pub design_flow_gpm: Option<f64>,
    pub supply: HalfLoopRecord,
    pub demand: HalfLoopRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HalfLoopRecord {
    pub inlet_node: String,
    pub outlet_node: String,
    pub inlet_segment: Vec<ComponentRecord>,
    pub branches: Vec<BranchRecord>,
    pub outlet_segment: Vec<ComponentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRecord {
    pub components: Vec<ComponentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub kind: String,
    pub inlet_node: String,
    pub outlet_node: String,
    pub zone: Option<String>,
    pub length_ft: Option<f64>,
    pub diameter_in: Option<f64>,
    pub insulation_thickness_in: Option<f64>,
    pub rated_flow_gpm: Option<f64>,
    pub tank: Option<String>,
    pub heat_exchanger: Option<String>,
    pub heat_source: Option<String>,
    pub peak_flow_gpm: Option<f64>,
    pub rated_capacity_btu_per_hr: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankRecord {
    pub name: String,
    pub duty: String,
    pub volume_gal: f64,
    pub height_ft: f64,
    pub upper_element_capacity_btu_per_hr: f64,
    pub lower_element_capacity_btu_per_hr: f64,
    pub use_port: Option<String>,
    pub source_port: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatExchangerRecord {
    pub name: String,
    pub distribution_loop: String,
    pub source_loop: String,
    pub distribution_port: Option<String>,
    pub source_port: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatSourceRecord {
    pub name: String,
    pub kind: String,
    pub fuel: Option<String>,
    pub rated_cop: Option<f64>,
    pub wrapped_tank: Option<String>,
    pub attached_component: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub name: String,
    pub value_f: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetpointManagerRecord {
    pub name: String,
    pub node: String,
    pub schedule: String,
    pub control_variable: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityManagerRecord {
    pub name: String,
    pub plant_loop: String,
    pub hot_node: String,
    pub cold_node: String,
    pub delta_t_on_f: f64,
    pub delta_t_off_f: f64,
}

impl NetworkDocument {
    pub fn from_network(net: &PlantNetwork) -> Self {
        NetworkDocument {
            loops: net.loops().iter().map(|lp| loop_record(net, lp)).collect(),
            tanks: net
                .tanks()
                .iter()
                .map(|tank| TankRecord {
                    name: tank.name.clone(),
                    duty: format!("{:?}", tank.spec.duty).to_ascii_lowercase(),
                    volume_gal: tank.spec.volume_gal,
                    height_ft: tank.spec.height_ft,
                    upper_element_capacity_btu_per_hr: tank.spec.heater_upper.capacity_btu_per_hr,
                    lower_element_capacity_btu_per_hr: tank.spec.heater_lower.capacity_btu_per_hr,
                    use_port: tank.use_port.map(|comp| component_name(net, comp)),
                    source_port: tank.source_port.map(|comp| component_name(net, comp)),
                })
                .collect(),
            heat_exchangers: net
                .heat_exchangers()
                .iter()
                .map(|hx| HeatExchangerRecord {
                    name: hx.name.clone(),
                    distribution_loop: loop_name(net, hx.distribution_loop),
                    source_loop: loop_name(net, hx.source_loop),
                    distribution_port: hx.distribution_port.map(|comp| component_name(net, comp)),
                    source_port: hx.source_port.map(|comp| component_name(net, comp)),
                })
                .collect(),
            heat_sources: net
                .heat_sources()
                .iter()
                .map(|unit| {
                    let (kind, fuel, rated_cop, wrapped_tank) = match &unit.kind {
                        HeatSourceKind::Boiler(spec) => (
                            spec.reporting_tag.to_string(),
                            Some(spec.fuel.as_str().to_string()),
                            None,
                            None,
                        ),
                        HeatSourceKind::FuelFiredHeatPump(spec) => (
                            "fuel-fired heat pump".to_string(),
                            Some(spec.fuel.as_str().to_string()),
                            None,
                            None,
                        ),
                        HeatSourceKind::ElectricHeatPumpWithTank { rated_cop, tank } => (
                            "electric heat pump with tank".to_string(),
                            None,
                            Some(*rated_cop),
                            Some(tank_name(net, *tank)),
                        ),
                    };
                    HeatSourceRecord {
                        name: unit.name.clone(),
                        kind,
                        fuel,
                        rated_cop,
                        wrapped_tank,
                        attached_component: unit.attached.map(|comp| component_name(net, comp)),
                    }
                })
                .collect(),
            schedules: net
                .schedules()
                .iter()
                .map(|schedule| ScheduleRecord {
                    name: schedule.name.clone(),
                    value_f: schedule.value_f,
                })
                .collect(),
            setpoint_managers: net
                .setpoint_managers()
                .iter()
                .map(|manager| SetpointManagerRecord {
                    name: manager.name.clone(),
                    node: node_name(net, manager.node),
                    schedule: schedule_name(net, manager.schedule),
                    control_variable: manager
                        .control_variable
                        .map(|variable| format!("{variable:?}")),
                })
                .collect(),
            availability_managers: net
                .availability_managers()
                .iter()
                .map(|manager| AvailabilityManagerRecord {
                    name: manager.name.clone(),
                    plant_loop: loop_name(net, manager.plant_loop),
                    hot_node: node_name(net, manager.hot_node),
                    cold_node: node_name(net, manager.cold_node),
                    delta_t_on_f: manager.delta_t_on_f,
                    delta_t_off_f: manager.delta_t_off_f,
                })
                .collect(),
        }
    }
}

fn loop_record(net: &PlantNetwork, lp: &PlantLoop) -> LoopRecord {
    LoopRecord {
        name: lp.name.clone(),
        role: lp.role.as_str().to_string(),
        setpoint_schedule: schedule_name(net, lp.setpoint),
        design_delta_t_f: lp.design_delta_t_f,
        design_flow_gpm: lp.design_flow_gpm,
        supply: half_loop_record(net, &lp.supply),
        demand: half_loop_record(net, &lp.demand),
    }
}

fn half_loop_record(net: &PlantNetwork, half: &HalfLoop) -> HalfLoopRecord {
    HalfLoopRecord {
        inlet_node: node_name(net, half.inlet),
        outlet_node: node_name(net, half.outlet),
        inlet_segment: component_records(net, &half.inlet_segment),
        branches: half
            .branches
            .iter()
            .map(|branch| branch_record(net, branch))
            .collect(),
        outlet_segment: component_records(net, &half.outlet_segment),
    }
}

fn branch_record(net: &PlantNetwork, branch: &Branch) -> BranchRecord {
    BranchRecord {
        components: component_records(net, &branch.components),
    }
}

fn component_records(net: &PlantNetwork, comps: &[CompId]) -> Vec<ComponentRecord> {
    comps
        .iter()
        .filter_map(|id| net.component(*id))
        .map(|comp| component_record(net, comp))
        .collect()
}

fn component_record(net: &PlantNetwork, comp: &Component) -> ComponentRecord {
    let mut record = ComponentRecord {
        name: comp.name.clone(),
        kind: String::new(),
        inlet_node: node_name(net, comp.inlet),
        outlet_node: node_name(net, comp.outlet),
        zone: None,
        length_ft: None,
        diameter_in: None,
        insulation_thickness_in: None,
        rated_flow_gpm: None,
        tank: None,
        heat_exchanger: None,
        heat_source: None,
        peak_flow_gpm: None,
        rated_capacity_btu_per_hr: None,
    };

    match &comp.kind {
        ComponentKind::Pipe(PipeSpec::Adiabatic) => {
            record.kind = "adiabatic pipe".to_string();
        }
        ComponentKind::Pipe(PipeSpec::Indoor {
            zone,
            length_ft,
            diameter_in,
            insulation_thickness_in,
        }) => {
            record.kind = "indoor pipe".to_string();
            record.zone = Some(zone.clone());
            record.length_ft = Some(*length_ft);
            record.diameter_in = Some(*diameter_in);
            record.insulation_thickness_in = Some(*insulation_thickness_in);
        }
        ComponentKind::Pump(spec) => {
            record.kind = "pump".to_string();
            record.rated_flow_gpm = spec.rated_flow_gpm;
        }
        ComponentKind::TankPort { tank, side } => {
            record.kind = match side {
                TankSide::Use => "tank use port".to_string(),
                TankSide::Source => "tank source port".to_string(),
            };
            record.tank = Some(tank_name(net, *tank));
        }
        ComponentKind::HxPort { hx, side } => {
            record.kind = format!("heat exchanger {:?} port", side).to_ascii_lowercase();
            record.heat_exchanger = net.heat_exchanger(*hx).map(|entry| entry.name.clone());
        }
        ComponentKind::HeatSourcePort { unit } => {
            record.kind = "heat source".to_string();
            record.heat_source = net.heat_source(*unit).map(|entry| entry.name.clone());
        }
        ComponentKind::WaterUse(spec) => {
            record.kind = "water use connection".to_string();
            record.zone = Some(spec.zone.clone());
            record.peak_flow_gpm = Some(spec.peak_flow_gpm);
        }
        ComponentKind::Baseboard(spec) => {
            record.kind = "baseboard".to_string();
            record.zone = Some(spec.zone.clone());
            record.rated_capacity_btu_per_hr = Some(spec.rated_capacity_btu_per_hr);
        }
    }

    record
}

fn node_name(net: &PlantNetwork, id: NodeId) -> String {
    net.node(id)
        .map(|node| node.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn component_name(net: &PlantNetwork, id: CompId) -> String {
    net.component(id)
        .map(|comp| comp.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn loop_name(net: &PlantNetwork, id: LoopId) -> String {
    net.plant_loop(id)
        .map(|lp| lp.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn tank_name(net: &PlantNetwork, id: TankId) -> String {
    net.tank(id)
        .map(|tank| tank.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn schedule_name(net: &PlantNetwork, id: ScheduleId) -> String {
    net.schedule(id)
        .map(|schedule| schedule.name.clone())
        .unwrap_or_else(|| id.to_string())
}
