use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hn_model::{ComponentKind, LoopRole, LoopSide, NetworkBuilder, PipeSpec, PumpSpec, SeriesEnd};
use hn_report::{NetworkDocument, ReportError, SynthesisManifest, SynthesisReport, SynthesisStore};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn small_network() -> hn_model::PlantNetwork {
    let mut builder = NetworkBuilder::new();
    let setpoint = builder.add_schedule_constant("Central Hot Water Loop Setpoint Schedule", 140.0);
    let lp = builder.add_loop("Central Hot Water Loop", LoopRole::Dhw, setpoint, 10.0, Some(6.0));
    builder
        .push_series(
            lp,
            LoopSide::Supply,
            SeriesEnd::Inlet,
            "Central Hot Water Loop Pump",
            ComponentKind::Pump(PumpSpec {
                rated_flow_gpm: Some(6.0),
            }),
        )
        .unwrap();
    builder
        .push_series(
            lp,
            LoopSide::Supply,
            SeriesEnd::Outlet,
            "Central Hot Water Loop Supply Outlet Pipe",
            ComponentKind::Pipe(PipeSpec::Adiabatic),
        )
        .unwrap();
    builder.build().unwrap()
}

#[test]
fn save_list_load_roundtrip() {
    let building_dir = unique_temp_dir("hn_report_building");
    fs::create_dir_all(&building_dir).expect("failed to create temp building dir");
    let building_path = building_dir.join("building.yaml");
    fs::write(&building_path, "version: 1\nname: test\n").expect("failed to write building file");

    let store = SynthesisStore::for_building(&building_path).expect("failed to create store");

    let manifest = SynthesisManifest::new("synth-123", "Garden Court", "0.1.0");
    let network = NetworkDocument::from_network(&small_network());
    let mut report = SynthesisReport::new();
    report.push_num("heat_source_unit_count", 3.0);
    report.push_text("applicability", "applicable");

    store
        .save_synthesis(&manifest, &network, &report)
        .expect("failed to save synthesis");
    assert!(store.has_synthesis("synth-123"));

    let listed = store
        .list_syntheses("Garden Court")
        .expect("failed to list syntheses");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].synthesis_id, "synth-123");

    let loaded_manifest = store
        .load_manifest("synth-123")
        .expect("failed to load manifest");
    assert_eq!(loaded_manifest, manifest);

    let loaded_report = store
        .load_report("synth-123")
        .expect("failed to load report");
    assert_eq!(loaded_report, report);

    let loaded_network = store
        .load_network("synth-123")
        .expect("failed to load network");
    assert_eq!(loaded_network.loops.len(), 1);
    assert_eq!(loaded_network.loops[0].name, "Central Hot Water Loop");
}

#[test]
fn missing_synthesis_is_not_found() {
    let store = SynthesisStore::new(unique_temp_dir("hn_report_empty")).unwrap();
    assert!(matches!(
        store.load_manifest("absent"),
        Err(ReportError::SynthesisNotFound { .. })
    ));
}

#[test]
fn export_resolves_ids_to_names() {
    let document = NetworkDocument::from_network(&small_network());

    let lp = &document.loops[0];
    assert_eq!(lp.role, "dhw");
    assert_eq!(
        lp.setpoint_schedule,
        "Central Hot Water Loop Setpoint Schedule"
    );
    assert_eq!(lp.design_flow_gpm, Some(6.0));

    assert_eq!(lp.supply.inlet_segment.len(), 1);
    let pump = &lp.supply.inlet_segment[0];
    assert_eq!(pump.kind, "pump");
    assert_eq!(pump.rated_flow_gpm, Some(6.0));
    assert_eq!(
        pump.inlet_node,
        "Central Hot Water Loop Supply Inlet Node"
    );

    let outlet_pipe = &lp.supply.outlet_segment[0];
    assert_eq!(outlet_pipe.kind, "adiabatic pipe");
    assert_eq!(
        outlet_pipe.outlet_node,
        "Central Hot Water Loop Supply Outlet Node"
    );
}
