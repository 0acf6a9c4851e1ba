//! End-to-end synthesis scenarios over complete building descriptions.

use hn_model::{
    Component, ComponentKind, ControlVariable, HeatSourceKind, LoopRole, PipeSpec, PlantNetwork,
    TankDuty, TankSide,
};
use hn_project::{
    BaseboardDef, Building, GeometryDef, LegacyEmsDef, LegacyManagerDef, LegacyPlantDef,
    SharedSystemDef, WaterUseDef, ZoneDef,
};
use hn_report::ReportValue;
use hn_synth::{synthesize, SynthError, SynthOptions, Synthesis, SynthesisOutcome};

fn building(system_type: &str, fuel: &str) -> Building {
    Building {
        version: 1,
        name: "Maple Court".to_string(),
        geometry: GeometryDef {
            num_units: 10,
            num_bedrooms: 20,
            num_stories: 2,
            facility_type: "apartment unit".to_string(),
            conditioned_floor_area_ft2: 12_000.0,
            average_ceiling_height_ft: 8.5,
            double_loaded_corridor: false,
        },
        shared_system: SharedSystemDef {
            system_type: system_type.to_string(),
            fuel: fuel.to_string(),
        },
        zones: vec![
            ZoneDef {
                name: "Floor 1".to_string(),
                multiplier: 1,
                conditioned: true,
            },
            ZoneDef {
                name: "Floor 2".to_string(),
                multiplier: 2,
                conditioned: true,
            },
            ZoneDef {
                name: "Attic".to_string(),
                multiplier: 1,
                conditioned: false,
            },
        ],
        water_use_connections: vec![WaterUseDef {
            name: "Unit 1 Fixtures".to_string(),
            zone: "Floor 1".to_string(),
            peak_flow_gpm: 2.2,
        }],
        baseboards: vec![BaseboardDef {
            name: "Unit 1 Baseboard".to_string(),
            zone: "Floor 1".to_string(),
            rated_capacity_btu_per_hr: 5_000.0,
        }],
        legacy: LegacyPlantDef {
            loops: vec!["unit 1 dhw loop".to_string(), "garage loop".to_string()],
            ems: LegacyEmsDef {
                program_calling_managers: vec![LegacyManagerDef {
                    name: "water heater ec manager".to_string(),
                    programs: vec!["water heater schedule program".to_string()],
                }],
                sensors: vec!["hpwh tank temp".to_string()],
                actuators: vec!["recirc pump flow".to_string()],
                output_variables: vec![],
                internal_variables: vec![],
            },
        },
    }
}

fn synthesized(outcome: SynthesisOutcome) -> Synthesis {
    match outcome {
        SynthesisOutcome::Synthesized(synthesis) => *synthesis,
        SynthesisOutcome::NotApplicable { .. } => panic!("expected a synthesized network"),
    }
}

fn run(system_type: &str, fuel: &str) -> Synthesis {
    let bldg = building(system_type, fuel);
    synthesized(synthesize(&bldg, &SynthOptions::default()).unwrap())
}

fn component<'a>(net: &'a PlantNetwork, id: hn_core::CompId) -> &'a Component {
    net.component(id).expect("component resolves")
}

/// The series of tank ports on the source loop's supply side, in chain
/// order.
fn tank_chain<'a>(net: &'a PlantNetwork) -> Vec<&'a Component> {
    let source = net.loop_with_role(LoopRole::Source).expect("source loop");
    let branch = source
        .supply
        .branches
        .iter()
        .find(|br| {
            br.components.iter().any(|&c| {
                matches!(component(net, c).kind, ComponentKind::TankPort { .. })
            })
        })
        .expect("tank chain branch");
    branch
        .components
        .iter()
        .map(|&c| component(net, c))
        .collect()
}

#[test]
fn boiler_scenario_builds_the_expected_plant() {
    let s = run("boiler", "natural gas");
    let net = &s.network;

    // ceil((0.037*20 + 0.106*10) * 154/123.5) = 3
    assert_eq!(s.sizing.heat_source_unit_count, 3);
    assert_eq!(s.sizing.swing_tank_volume_gal, 0.0);

    assert_eq!(net.loops().len(), 5);
    assert_eq!(net.loops_with_role(LoopRole::Supply).len(), 3);
    assert!(net.loop_with_role(LoopRole::Dhw).is_some());
    assert!(net.loop_with_role(LoopRole::Source).is_some());
    assert!(net.loop_with_role(LoopRole::SpaceHeating).is_none());

    assert_eq!(net.heat_exchangers().len(), 1);
    assert_eq!(net.heat_sources().len(), 3);
    assert_eq!(net.availability_managers().len(), 3);
    assert_eq!(net.setpoint_managers().len(), 5);

    // Three storage tanks, no swing, no wrapped tanks.
    assert_eq!(net.tanks().len(), 3);
    assert!(net.tanks().iter().all(|t| t.spec.duty == TankDuty::Storage));
    assert!(net.tanks().iter().all(|t| t.spec.volume_gal == 80.0));

    for unit in net.heat_sources() {
        assert!(matches!(unit.kind, HeatSourceKind::Boiler(_)));
        let attached = component(net, unit.attached.expect("attached"));
        assert!(matches!(attached.kind, ComponentKind::HeatSourcePort { .. }));
    }

    // Every supply loop carries one heat source branch and one tank source
    // port branch besides its bypass.
    for lp in net.loops_with_role(LoopRole::Supply) {
        let supply_kinds: Vec<_> = lp
            .supply
            .branches
            .iter()
            .flat_map(|br| &br.components)
            .map(|&c| &component(net, c).kind)
            .collect();
        assert!(supply_kinds
            .iter()
            .any(|k| matches!(k, ComponentKind::HeatSourcePort { .. })));

        let demand_kinds: Vec<_> = lp
            .demand
            .branches
            .iter()
            .flat_map(|br| &br.components)
            .map(|&c| &component(net, c).kind)
            .collect();
        assert!(demand_kinds.iter().any(|k| matches!(
            k,
            ComponentKind::TankPort {
                side: TankSide::Source,
                ..
            }
        )));
    }

    // The fixture's fixture-draw terminal lands on the DHW demand side.
    let dhw = net.loop_with_role(LoopRole::Dhw).expect("dhw loop");
    let reconnected = dhw
        .demand
        .branches
        .iter()
        .flat_map(|br| &br.components)
        .map(|&c| component(net, c))
        .find(|c| matches!(c.kind, ComponentKind::WaterUse(_)))
        .expect("water use terminal");
    assert_eq!(reconnected.name, "Unit 1 Fixtures Reconnected");
}

#[test]
fn boiler_scenario_purges_the_legacy_plant() {
    let s = run("boiler", "natural gas");

    assert_eq!(s.purge.removed_loops, vec!["unit 1 dhw loop".to_string()]);
    assert_eq!(
        s.purge.removed_managers,
        vec!["water heater ec manager".to_string()]
    );
    assert_eq!(
        s.purge.removed_programs,
        vec!["water heater schedule program".to_string()]
    );
    assert_eq!(s.purge.removed_sensors, vec!["hpwh tank temp".to_string()]);
    assert_eq!(s.purge.removed_actuators, vec!["recirc pump flow".to_string()]);
    assert_eq!(s.retained_legacy.loops, vec!["garage loop".to_string()]);

    match s.report.get("legacy_objects_removed") {
        Some(ReportValue::Num { value }) => assert_eq!(*value, 5.0),
        other => panic!("unexpected report entry: {other:?}"),
    }
}

#[test]
fn setpoint_managers_sit_on_supply_outlets() {
    let s = run("boiler", "natural gas");
    let net = &s.network;

    for lp in net.loops() {
        let manager = net
            .setpoint_managers()
            .iter()
            .find(|m| m.name == format!("{} Setpoint Manager", lp.name))
            .expect("manager per loop");
        assert_eq!(manager.node, lp.supply.outlet);
        assert_eq!(manager.schedule, lp.setpoint);
        if lp.role == LoopRole::Dhw {
            assert_eq!(manager.control_variable, None);
        } else {
            assert_eq!(
                manager.control_variable,
                Some(ControlVariable::Temperature)
            );
        }
    }

    // DHW delivers at 140 F, the plant loops run at 180 F.
    let dhw = net.loop_with_role(LoopRole::Dhw).expect("dhw loop");
    assert_eq!(net.schedule(dhw.setpoint).expect("schedule").value_f, 140.0);
    let source = net.loop_with_role(LoopRole::Source).expect("source loop");
    assert_eq!(net.schedule(source.setpoint).expect("schedule").value_f, 180.0);
}

#[test]
fn tank_chain_shares_nodes_and_ends_with_the_swing_tank() {
    let s = run("heat pump water heater", "electricity");
    let net = &s.network;

    // 10 units, not boiler based: 80 gal swing appended after the three
    // storage tanks.
    assert_eq!(s.sizing.swing_tank_volume_gal, 80.0);
    let chain = tank_chain(net);
    assert_eq!(chain.len(), 4);

    for pair in chain.windows(2) {
        assert_eq!(pair[0].outlet, pair[1].inlet);
    }

    for (i, port) in chain.iter().enumerate() {
        let tank = match port.kind {
            ComponentKind::TankPort {
                tank,
                side: TankSide::Use,
            } => net.tank(tank).expect("tank resolves"),
            ref other => panic!("unexpected chain component: {other:?}"),
        };
        if i < 3 {
            assert_eq!(tank.spec.duty, TankDuty::Storage);
        } else {
            assert_eq!(tank.spec.duty, TankDuty::Swing);
            // The swing heater covers the recirculation losses.
            assert_eq!(
                tank.spec.heater_upper.capacity_btu_per_hr,
                s.sizing.recirc_heat_loss_btu_per_hr
            );
            assert!(tank.source_port.is_none());
        }
    }
}

#[test]
fn electric_heat_pumps_wrap_their_own_tanks() {
    let s = run("heat pump water heater", "electricity");
    let net = &s.network;

    // Three chained storage tanks, three wrapped tanks, one swing tank.
    assert_eq!(net.tanks().len(), 7);
    assert_eq!(net.heat_sources().len(), 3);

    for (i, unit) in net.heat_sources().iter().enumerate() {
        let wrapped = match unit.kind {
            HeatSourceKind::ElectricHeatPumpWithTank { tank, .. } => {
                net.tank(tank).expect("wrapped tank")
            }
            ref other => panic!("unexpected heat source: {other:?}"),
        };
        // The wrapped tank's use port is the loop presence of the unit.
        assert_eq!(unit.attached, wrapped.use_port);
        assert!(wrapped.source_port.is_none());

        // Interlock: hot side reads the wrapped tank's outlet, cold side
        // the storage tank's source outlet on the same loop.
        let manager = &net.availability_managers()[i];
        let attached = component(net, unit.attached.expect("attached"));
        assert_eq!(manager.hot_node, attached.outlet);

        let lp = net.plant_loop(manager.plant_loop).expect("loop");
        let source_port = lp
            .demand
            .branches
            .iter()
            .flat_map(|br| &br.components)
            .map(|&c| component(net, c))
            .find(|c| {
                matches!(
                    c.kind,
                    ComponentKind::TankPort {
                        side: TankSide::Source,
                        ..
                    }
                )
            })
            .expect("storage source port");
        assert_eq!(manager.cold_node, source_port.outlet);
        assert_eq!(manager.delta_t_on_f, 0.0);
        assert_eq!(manager.delta_t_off_f, 0.0);
    }
}

#[test]
fn space_heating_adds_the_second_distribution_loop() {
    let mut bldg = building("boiler with space-heating", "natural gas");
    bldg.geometry.num_units = 8;
    bldg.geometry.num_bedrooms = 10;
    bldg.legacy.loops.push("hydronic heat loop".to_string());
    bldg.legacy.ems.actuators.push("boiler relay".to_string());

    let s = synthesized(synthesize(&bldg, &SynthOptions::default()).unwrap());
    let net = &s.network;

    // ceil((0.037*10 + 0.106*8) * 154/123.5) = 2, then x4 for the
    // space-heating service.
    assert_eq!(s.sizing.heat_source_unit_count, 8);
    assert_eq!(net.loops_with_role(LoopRole::Supply).len(), 8);
    assert_eq!(net.loops().len(), 11);
    assert_eq!(net.heat_exchangers().len(), 2);

    let sh = net
        .loop_with_role(LoopRole::SpaceHeating)
        .expect("space heating loop");
    assert!(net
        .heat_exchangers()
        .iter()
        .any(|hx| hx.distribution_loop == sh.id));

    let baseboard = sh
        .demand
        .branches
        .iter()
        .flat_map(|br| &br.components)
        .map(|&c| component(net, c))
        .find(|c| matches!(c.kind, ComponentKind::Baseboard(_)))
        .expect("baseboard terminal");
    assert_eq!(baseboard.name, "Unit 1 Baseboard Reconnected");

    // The space-heating blacklist extensions kick in.
    assert!(s
        .purge
        .removed_loops
        .contains(&"hydronic heat loop".to_string()));
    assert!(s.purge.removed_actuators.contains(&"boiler relay".to_string()));
}

#[test]
fn recirculation_pipes_divide_by_zone_multiplier() {
    let s = run("boiler", "natural gas");
    let net = &s.network;
    let dhw = net.loop_with_role(LoopRole::Dhw).expect("dhw loop");

    let indoor: Vec<_> = dhw
        .demand
        .inlet_segment
        .iter()
        .map(|&c| component(net, c))
        .filter_map(|c| match &c.kind {
            ComponentKind::Pipe(PipeSpec::Indoor {
                zone, length_ft, ..
            }) => Some((c.name.as_str(), zone.as_str(), *length_ft)),
            _ => None,
        })
        .collect();

    // Two conditioned zones, one supply/return pair each; the attic is
    // unconditioned and gets nothing.
    assert_eq!(indoor.len(), 4);
    assert!(indoor.iter().all(|(_, zone, _)| *zone != "Attic"));

    let floor1_supply = indoor
        .iter()
        .find(|(name, _, _)| *name == "Floor 1 Supply Recirculation Pipe")
        .expect("floor 1 supply pipe");
    assert_eq!(floor1_supply.2, s.sizing.supply_length_ft);

    let floor2_supply = indoor
        .iter()
        .find(|(name, _, _)| *name == "Floor 2 Supply Recirculation Pipe")
        .expect("floor 2 supply pipe");
    assert_eq!(floor2_supply.2, s.sizing.supply_length_ft / 2.0);

    let floor2_return = indoor
        .iter()
        .find(|(name, _, _)| *name == "Floor 2 Return Recirculation Pipe")
        .expect("floor 2 return pipe");
    assert_eq!(floor2_return.2, s.sizing.return_length_ft / 2.0);
}

#[test]
fn dhw_flow_defaults_to_the_fixed_constant() {
    let bldg = building("boiler", "natural gas");

    let fixed = synthesized(synthesize(&bldg, &SynthOptions::default()).unwrap());
    let dhw = fixed
        .network
        .loop_with_role(LoopRole::Dhw)
        .expect("dhw loop");
    let flow = dhw.design_flow_gpm.expect("dhw flow");
    assert!((flow - hn_synth::constants::dhw_loop_flow_gpm()).abs() < 1e-9);
    assert_ne!(flow, fixed.sizing.recirc_flow_gpm);

    let options = SynthOptions {
        dhw_flow_from_sizing: true,
    };
    let computed = synthesized(synthesize(&bldg, &options).unwrap());
    let dhw = computed
        .network
        .loop_with_role(LoopRole::Dhw)
        .expect("dhw loop");
    assert_eq!(
        dhw.design_flow_gpm.expect("dhw flow"),
        computed.sizing.recirc_flow_gpm
    );

    match computed.report.get("dhw_flow_source") {
        Some(ReportValue::Text { value }) => assert_eq!(value, "computed"),
        other => panic!("unexpected report entry: {other:?}"),
    }
}

#[test]
fn no_shared_system_is_not_applicable() {
    let bldg = building("none", "electricity");
    let outcome = synthesize(&bldg, &SynthOptions::default()).unwrap();

    match outcome {
        SynthesisOutcome::NotApplicable { report } => match report.get("applicability") {
            Some(ReportValue::Text { value }) => assert_eq!(value, "not applicable"),
            other => panic!("unexpected report entry: {other:?}"),
        },
        SynthesisOutcome::Synthesized(_) => panic!("expected an early exit"),
    }
}

#[test]
fn bad_descriptors_fail_loudly() {
    let unknown_system = building("district steam", "natural gas");
    assert!(matches!(
        synthesize(&unknown_system, &SynthOptions::default()),
        Err(SynthError::Equipment(_))
    ));

    let unknown_fuel = building("boiler", "antimatter");
    assert!(matches!(
        synthesize(&unknown_fuel, &SynthOptions::default()),
        Err(SynthError::Equipment(_))
    ));

    let mut unknown_facility = building("boiler", "natural gas");
    unknown_facility.geometry.facility_type = "houseboat".to_string();
    assert!(matches!(
        synthesize(&unknown_facility, &SynthOptions::default()),
        Err(SynthError::Sizing(_))
    ));
}
