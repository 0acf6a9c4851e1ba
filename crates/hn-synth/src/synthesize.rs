//! The synthesis pass: sizing, topology, terminal rewiring, legacy purge.

use hn_core::{CompId, HnResult, LoopId, NodeId};
use hn_equipment::{parse_fuel_type, plan_heat_source, HeatSourcePlan, SharedSystemType};
use hn_model::{
    BaseboardSpec, ComponentKind, ControlVariable, FuelType, HeatSourceKind, HxSide, LoopRole,
    LoopSide, NetworkBuilder, NetworkError, PipeSpec, PlantNetwork, PumpSpec, SeriesEnd, TankSide,
    TankSpec, WaterUseSpec,
};
use hn_project::{Building, LegacyPlantDef};
use hn_report::SynthesisReport;
use hn_sizing::{FacilityType, SizingInputs, SizingResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants;
use crate::error::SynthResult;
use crate::purge::{purge_legacy_network, PurgeReport};

/// Knobs for one synthesis pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthOptions {
    /// Drive the DHW loop flow from the computed recirculation rate
    /// instead of the fixed volumetric constant.
    #[serde(default)]
    pub dhw_flow_from_sizing: bool,
}

/// Everything one synthesis pass produced.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub network: PlantNetwork,
    pub sizing: SizingResult,
    pub report: SynthesisReport,
    pub purge: PurgeReport,
    /// The legacy inventory the purge left in place.
    pub retained_legacy: LegacyPlantDef,
}

/// Result of a synthesis request.
#[derive(Debug, Clone)]
pub enum SynthesisOutcome {
    /// No shared system: nothing built, legacy plant untouched.
    NotApplicable { report: SynthesisReport },
    Synthesized(Box<Synthesis>),
}

/// Run the full synthesis pass for one building.
///
/// Sizes the plant, wires the new network, reattaches the building's
/// terminals, and purges the legacy plant inventory. A building whose
/// shared system is `"none"` returns
/// [`SynthesisOutcome::NotApplicable`] with nothing built and the legacy
/// inventory untouched.
pub fn synthesize(building: &Building, options: &SynthOptions) -> SynthResult<SynthesisOutcome> {
    let system = SharedSystemType::parse(&building.shared_system.system_type)?;
    if system.is_none() {
        info!("{}: no shared system, keeping in-unit equipment", building.name);
        let mut report = SynthesisReport::new();
        report.push_text("applicability", "not applicable");
        report.push_text("shared_system_type", system.label());
        return Ok(SynthesisOutcome::NotApplicable { report });
    }

    let fuel = parse_fuel_type(&building.shared_system.fuel)?;
    let facility_type = FacilityType::parse(&building.geometry.facility_type)?;

    let sizing = hn_sizing::compute(&SizingInputs {
        num_units: building.geometry.num_units,
        num_bedrooms: building.geometry.num_bedrooms,
        num_stories: building.geometry.num_stories,
        facility_type,
        conditioned_floor_area_ft2: building.geometry.conditioned_floor_area_ft2,
        average_ceiling_height_ft: building.geometry.average_ceiling_height_ft,
        double_loaded_corridor: building.geometry.double_loaded_corridor,
        includes_space_heating: system.includes_space_heating(),
        is_boiler_based: system.is_boiler_based(),
    })?;
    info!(
        "{}: {} heat source units, {} gal storage, {} gal swing",
        building.name,
        sizing.heat_source_unit_count,
        sizing.storage_tank_volume_gal,
        sizing.swing_tank_volume_gal
    );

    let dhw_flow_gpm = if options.dhw_flow_from_sizing {
        sizing.recirc_flow_gpm
    } else {
        constants::dhw_loop_flow_gpm()
    };

    let network = build_network(building, system, fuel, &sizing, dhw_flow_gpm)?;
    let (retained_legacy, purge) =
        purge_legacy_network(&building.legacy, system.includes_space_heating());
    info!(
        "{}: wired {} loops and {} tanks, purged {} legacy objects",
        building.name,
        network.loops().len(),
        network.tanks().len(),
        purge.total_removed()
    );

    let report = build_report(building, system, &sizing, dhw_flow_gpm, options, &purge);
    Ok(SynthesisOutcome::Synthesized(Box::new(Synthesis {
        network,
        sizing,
        report,
        purge,
        retained_legacy,
    })))
}

/// Wire the complete plant network for one building.
fn build_network(
    building: &Building,
    system: SharedSystemType,
    fuel: FuelType,
    sizing: &SizingResult,
    dhw_flow_gpm: f64,
) -> SynthResult<PlantNetwork> {
    let mut b = NetworkBuilder::new();
    let with_space_heating = system.includes_space_heating();

    // Distribution, supply, and source loops, each with its own constant
    // setpoint schedule.
    let dhw_sched = b.add_schedule_constant(
        "Central Hot Water Loop Setpoint Schedule",
        constants::DHW_LOOP_SETPOINT_F,
    );
    let dhw_loop = b.add_loop(
        "Central Hot Water Loop",
        LoopRole::Dhw,
        dhw_sched,
        constants::DHW_LOOP_DELTA_T_F,
        Some(dhw_flow_gpm),
    );

    let space_heating_loop = if with_space_heating {
        let sched = b.add_schedule_constant(
            "Space Heating Loop Setpoint Schedule",
            constants::PLANT_LOOP_SETPOINT_F,
        );
        Some(b.add_loop(
            "Space Heating Loop",
            LoopRole::SpaceHeating,
            sched,
            constants::PLANT_LOOP_DELTA_T_F,
            None,
        ))
    } else {
        None
    };

    let mut supply_loops = Vec::with_capacity(sizing.heat_source_unit_count as usize);
    for i in 1..=sizing.heat_source_unit_count {
        let name = format!("Heat Source Loop {}", i);
        let sched = b.add_schedule_constant(
            format!("{} Setpoint Schedule", name),
            constants::PLANT_LOOP_SETPOINT_F,
        );
        supply_loops.push(b.add_loop(
            name,
            LoopRole::Supply,
            sched,
            constants::PLANT_LOOP_DELTA_T_F,
            None,
        ));
    }

    let source_sched = b.add_schedule_constant(
        "Storage Source Loop Setpoint Schedule",
        constants::PLANT_LOOP_SETPOINT_F,
    );
    let source_loop = b.add_loop(
        "Storage Source Loop",
        LoopRole::Source,
        source_sched,
        constants::PLANT_LOOP_DELTA_T_F,
        None,
    );

    // Boundary plumbing on every loop. Only the DHW pump carries a rated
    // flow; everything else is left for the downstream engine to size.
    plumb_loop(&mut b, dhw_loop, Some(dhw_flow_gpm))?;
    if let Some(lp) = space_heating_loop {
        plumb_loop(&mut b, lp, None)?;
    }
    for &lp in &supply_loops {
        plumb_loop(&mut b, lp, None)?;
    }
    plumb_loop(&mut b, source_loop, None)?;

    // Indoor recirculation mains, one supply/return pair per conditioned
    // zone on the DHW demand inlet. Multiplied zones stand in for repeats,
    // so their share of the run is divided by the multiplier.
    for zone in building.zones.iter().filter(|z| z.conditioned) {
        let per_zone = zone.multiplier.max(1) as f64;
        b.push_series(
            dhw_loop,
            LoopSide::Demand,
            SeriesEnd::Inlet,
            format!("{} Supply Recirculation Pipe", zone.name),
            ComponentKind::Pipe(PipeSpec::Indoor {
                zone: zone.name.clone(),
                length_ft: sizing.supply_length_ft / per_zone,
                diameter_in: sizing.supply_diameter_in,
                insulation_thickness_in: sizing.supply_insulation_in,
            }),
        )?;
        b.push_series(
            dhw_loop,
            LoopSide::Demand,
            SeriesEnd::Inlet,
            format!("{} Return Recirculation Pipe", zone.name),
            ComponentKind::Pipe(PipeSpec::Indoor {
                zone: zone.name.clone(),
                length_ft: sizing.return_length_ft / per_zone,
                diameter_in: sizing.return_diameter_in,
                insulation_thickness_in: sizing.return_insulation_in,
            }),
        )?;
    }

    // Scheduled setpoint managers on every supply outlet. The DHW manager
    // uses the temperature-only construction path.
    add_supply_setpoint(&mut b, dhw_loop, None)?;
    if let Some(lp) = space_heating_loop {
        add_supply_setpoint(&mut b, lp, Some(ControlVariable::Temperature))?;
    }
    for &lp in &supply_loops {
        add_supply_setpoint(&mut b, lp, Some(ControlVariable::Temperature))?;
    }
    add_supply_setpoint(&mut b, source_loop, Some(ControlVariable::Temperature))?;

    // Storage tanks: one per supply loop, chained in series on the source
    // loop's supply side. Tank i+1's use port shares tank i's outlet node.
    let storage_sched = b.add_schedule_constant(
        "Storage Tank Setpoint Schedule",
        constants::STORAGE_TANK_SETPOINT_F,
    );
    let mut chain_tail: Option<CompId> = None;
    let mut tank_source_ports = Vec::with_capacity(supply_loops.len());
    for (i, &supply_lp) in supply_loops.iter().enumerate() {
        let tank_name = format!("Storage Tank {}", i + 1);
        let tank = b.add_tank(
            tank_name.clone(),
            TankSpec::storage(sizing.storage_tank_volume_gal, storage_sched),
        );
        let use_kind = ComponentKind::TankPort {
            tank,
            side: TankSide::Use,
        };
        let use_port = match chain_tail {
            None => b.add_parallel(
                source_loop,
                LoopSide::Supply,
                format!("{} Use Port", tank_name),
                use_kind,
            )?,
            Some(prev) => b.chain_after(prev, format!("{} Use Port", tank_name), use_kind)?,
        };
        chain_tail = Some(use_port);

        let source_port = b.add_parallel(
            supply_lp,
            LoopSide::Demand,
            format!("{} Source Port", tank_name),
            ComponentKind::TankPort {
                tank,
                side: TankSide::Source,
            },
        )?;
        tank_source_ports.push(source_port);
    }

    // Swing tank at the end of the chain, never on a supply loop. Its
    // upper element covers the recirculation losses.
    if sizing.swing_tank_volume_gal > 0.0 {
        if let Some(prev) = chain_tail {
            let swing_sched = b.add_schedule_constant(
                "Swing Tank Setpoint Schedule",
                constants::SWING_TANK_SETPOINT_F,
            );
            let tank = b.add_tank(
                "Swing Tank",
                TankSpec::swing(
                    sizing.swing_tank_volume_gal,
                    sizing.recirc_heat_loss_btu_per_hr,
                    swing_sched,
                ),
            );
            b.chain_after(
                prev,
                "Swing Tank Use Port",
                ComponentKind::TankPort {
                    tank,
                    side: TankSide::Use,
                },
            )?;
        }
    }

    // Heat exchanger bridges between each distribution loop and the
    // source loop.
    add_heat_exchanger_bridge(
        &mut b,
        "Domestic Hot Water Heat Exchanger",
        dhw_loop,
        source_loop,
    )?;
    if let Some(lp) = space_heating_loop {
        add_heat_exchanger_bridge(&mut b, "Space Heating Heat Exchanger", lp, source_loop)?;
    }

    // One heat source per supply loop, plus the differential interlock
    // comparing its outlet against the loop's storage tank outlet.
    for (i, &supply_lp) in supply_loops.iter().enumerate() {
        let unit_name = format!("Heat Source {}", i + 1);
        let attached = match plan_heat_source(system, fuel, storage_sched)? {
            HeatSourcePlan::Boiler(spec) => {
                let unit = b.add_heat_source(unit_name.clone(), HeatSourceKind::Boiler(spec))?;
                b.add_parallel(
                    supply_lp,
                    LoopSide::Supply,
                    unit_name.clone(),
                    ComponentKind::HeatSourcePort { unit },
                )?
            }
            HeatSourcePlan::FuelFiredHeatPump(spec) => {
                let unit =
                    b.add_heat_source(unit_name.clone(), HeatSourceKind::FuelFiredHeatPump(spec))?;
                b.add_parallel(
                    supply_lp,
                    LoopSide::Supply,
                    unit_name.clone(),
                    ComponentKind::HeatSourcePort { unit },
                )?
            }
            HeatSourcePlan::ElectricHeatPumpWithTank {
                rated_cop,
                tank: tank_spec,
            } => {
                // The wrapped tank is what sits on the loop; the wrapper
                // only carries the compressor rating.
                let tank_name = format!("{} Wrapped Tank", unit_name);
                let tank = b.add_tank(tank_name.clone(), tank_spec);
                let unit = b.add_heat_source(
                    unit_name.clone(),
                    HeatSourceKind::ElectricHeatPumpWithTank { rated_cop, tank },
                )?;
                let use_port = b.add_parallel(
                    supply_lp,
                    LoopSide::Supply,
                    format!("{} Use Port", tank_name),
                    ComponentKind::TankPort {
                        tank,
                        side: TankSide::Use,
                    },
                )?;
                b.attach_heat_source(unit, use_port)?;
                use_port
            }
        };

        let hot_node = component_outlet(&b, attached)?;
        let cold_node = component_outlet(&b, tank_source_ports[i])?;
        b.add_availability_manager(
            format!("Heat Source Loop {} Availability Manager", i + 1),
            supply_lp,
            hot_node,
            cold_node,
            constants::AVAILABILITY_DELTA_T_ON_F,
            constants::AVAILABILITY_DELTA_T_OFF_F,
        )?;
    }

    // Terminal equipment moves onto the new distribution loops.
    for connection in &building.water_use_connections {
        b.add_parallel(
            dhw_loop,
            LoopSide::Demand,
            format!("{} Reconnected", connection.name),
            ComponentKind::WaterUse(WaterUseSpec {
                zone: connection.zone.clone(),
                peak_flow_gpm: connection.peak_flow_gpm,
            }),
        )?;
    }
    if let Some(lp) = space_heating_loop {
        for baseboard in &building.baseboards {
            b.add_parallel(
                lp,
                LoopSide::Demand,
                format!("{} Reconnected", baseboard.name),
                ComponentKind::Baseboard(BaseboardSpec {
                    zone: baseboard.zone.clone(),
                    rated_capacity_btu_per_hr: baseboard.rated_capacity_btu_per_hr,
                }),
            )?;
        }
    } else if !building.baseboards.is_empty() {
        warn!(
            "{}: {} baseboards stay on their existing loops (no space-heating service)",
            building.name,
            building.baseboards.len()
        );
    }

    Ok(b.build()?)
}

/// Pump on the supply inlet, adiabatic bypass and outlet pipes on both
/// halves.
fn plumb_loop(b: &mut NetworkBuilder, lp: LoopId, pump_flow_gpm: Option<f64>) -> HnResult<()> {
    let name = match b.plant_loop(lp) {
        Some(l) => l.name.clone(),
        None => return Err(NetworkError::UnknownLoop { lp }.into()),
    };
    b.push_series(
        lp,
        LoopSide::Supply,
        SeriesEnd::Inlet,
        format!("{} Pump", name),
        ComponentKind::Pump(PumpSpec {
            rated_flow_gpm: pump_flow_gpm,
        }),
    )?;
    b.add_parallel(
        lp,
        LoopSide::Supply,
        format!("{} Supply Bypass Pipe", name),
        adiabatic(),
    )?;
    b.push_series(
        lp,
        LoopSide::Supply,
        SeriesEnd::Outlet,
        format!("{} Supply Outlet Pipe", name),
        adiabatic(),
    )?;
    b.push_series(
        lp,
        LoopSide::Demand,
        SeriesEnd::Inlet,
        format!("{} Demand Inlet Pipe", name),
        adiabatic(),
    )?;
    b.add_parallel(
        lp,
        LoopSide::Demand,
        format!("{} Demand Bypass Pipe", name),
        adiabatic(),
    )?;
    b.push_series(
        lp,
        LoopSide::Demand,
        SeriesEnd::Outlet,
        format!("{} Demand Outlet Pipe", name),
        adiabatic(),
    )?;
    Ok(())
}

fn adiabatic() -> ComponentKind {
    ComponentKind::Pipe(PipeSpec::Adiabatic)
}

fn add_supply_setpoint(
    b: &mut NetworkBuilder,
    lp: LoopId,
    control_variable: Option<ControlVariable>,
) -> HnResult<()> {
    let (name, node, schedule) = match b.plant_loop(lp) {
        Some(l) => (
            format!("{} Setpoint Manager", l.name),
            l.supply.outlet,
            l.setpoint,
        ),
        None => return Err(NetworkError::UnknownLoop { lp }.into()),
    };
    b.add_setpoint_manager(name, node, schedule, control_variable)
}

fn add_heat_exchanger_bridge(
    b: &mut NetworkBuilder,
    name: &str,
    distribution: LoopId,
    source: LoopId,
) -> HnResult<()> {
    let hx = b.add_heat_exchanger(name, distribution, source)?;
    b.add_parallel(
        distribution,
        LoopSide::Supply,
        format!("{} Distribution Port", name),
        ComponentKind::HxPort {
            hx,
            side: HxSide::Distribution,
        },
    )?;
    b.add_parallel(
        source,
        LoopSide::Demand,
        format!("{} Source Port", name),
        ComponentKind::HxPort {
            hx,
            side: HxSide::Source,
        },
    )?;
    Ok(())
}

fn component_outlet(b: &NetworkBuilder, comp: CompId) -> HnResult<NodeId> {
    match b.component(comp) {
        Some(c) => Ok(c.outlet),
        None => Err(NetworkError::UnknownComponent { comp }.into()),
    }
}

fn build_report(
    building: &Building,
    system: SharedSystemType,
    sizing: &SizingResult,
    dhw_flow_gpm: f64,
    options: &SynthOptions,
    purge: &PurgeReport,
) -> SynthesisReport {
    let mut report = SynthesisReport::new();
    report.push_text("applicability", "synthesized");
    report.push_text("shared_system_type", system.label());
    report.push_num("num_units", f64::from(building.geometry.num_units));
    report.push_num("num_bedrooms", f64::from(building.geometry.num_bedrooms));
    report.push_num(
        "heat_source_unit_count",
        f64::from(sizing.heat_source_unit_count),
    );
    report.push_num("storage_tank_volume_gal", sizing.storage_tank_volume_gal);
    report.push_num("swing_tank_volume_gal", sizing.swing_tank_volume_gal);
    report.push_num("recirc_supply_length_ft", sizing.supply_length_ft);
    report.push_num("recirc_return_length_ft", sizing.return_length_ft);
    report.push_num("supply_insulation_in", sizing.supply_insulation_in);
    report.push_num("return_insulation_in", sizing.return_insulation_in);
    report.push_num("recirc_flow_gpm", sizing.recirc_flow_gpm);
    report.push_num(
        "recirc_heat_loss_btu_per_hr",
        sizing.recirc_heat_loss_btu_per_hr,
    );
    report.push_num("dhw_loop_flow_gpm", dhw_flow_gpm);
    report.push_text(
        "dhw_flow_source",
        if options.dhw_flow_from_sizing {
            "computed"
        } else {
            "fixed"
        },
    );
    report.push_num("legacy_objects_removed", purge.total_removed() as f64);
    report
}
