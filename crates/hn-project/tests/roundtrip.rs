use hn_project::schema::*;
use hn_project::{load_yaml, save_yaml, validate_building, LATEST_VERSION};

fn sample_building() -> Building {
    Building {
        version: LATEST_VERSION,
        name: "Garden Court".to_string(),
        geometry: GeometryDef {
            num_units: 10,
            num_bedrooms: 20,
            num_stories: 2,
            facility_type: "apartment unit".to_string(),
            conditioned_floor_area_ft2: 12_000.0,
            average_ceiling_height_ft: 8.5,
            double_loaded_corridor: true,
        },
        shared_system: SharedSystemDef {
            system_type: "boiler".to_string(),
            fuel: "natural gas".to_string(),
        },
        zones: vec![
            ZoneDef {
                name: "Unit 1".to_string(),
                multiplier: 5,
                conditioned: true,
            },
            ZoneDef {
                name: "Corridor".to_string(),
                multiplier: 1,
                conditioned: false,
            },
        ],
        water_use_connections: vec![WaterUseDef {
            name: "Unit 1 Fixtures".to_string(),
            zone: "Unit 1".to_string(),
            peak_flow_gpm: 2.2,
        }],
        baseboards: vec![],
        legacy: LegacyPlantDef {
            loops: vec!["dhw loop".to_string()],
            ems: LegacyEmsDef {
                program_calling_managers: vec![LegacyManagerDef {
                    name: "water heater EC manager".to_string(),
                    programs: vec!["water heater EC program".to_string()],
                }],
                sensors: vec!["water heater energy sensor".to_string()],
                actuators: vec![],
                output_variables: vec![],
                internal_variables: vec![],
            },
        },
    }
}

#[test]
fn roundtrip_yaml_building() {
    let building = sample_building();
    validate_building(&building).unwrap();

    let path = std::env::temp_dir().join("hn_building_roundtrip.yaml");
    save_yaml(&path, &building).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(building, loaded);
}

#[test]
fn roundtrip_json_building() {
    let building = sample_building();

    let path = std::env::temp_dir().join("hn_building_roundtrip.json");
    hn_project::save_json(&path, &building).unwrap();
    let loaded = hn_project::load_json(&path).unwrap();

    assert_eq!(building, loaded);
}

#[test]
fn defaults_fill_in_omitted_fields() {
    let yaml = r#"
name: Minimal
geometry:
  num_units: 4
  num_bedrooms: 8
  num_stories: 1
  facility_type: apartment unit
  conditioned_floor_area_ft2: 3600.0
  average_ceiling_height_ft: 8.0
shared_system:
  system_type: none
"#;
    let path = std::env::temp_dir().join("hn_building_minimal.yaml");
    std::fs::write(&path, yaml).unwrap();

    let building = load_yaml(&path).unwrap();
    // Version 0 files upgrade in place.
    assert_eq!(building.version, LATEST_VERSION);
    assert_eq!(building.shared_system.fuel, "electricity");
    assert!(building.zones.is_empty());
    assert!(building.legacy.loops.is_empty());
    assert!(!building.geometry.double_loaded_corridor);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("hn_building_does_not_exist.yaml");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(
        load_yaml(&path),
        Err(hn_project::ProjectError::Io(_))
    ));
}

#[test]
fn invalid_building_does_not_save() {
    let mut building = sample_building();
    building.geometry.num_units = 0;

    let path = std::env::temp_dir().join("hn_building_invalid.yaml");
    assert!(save_yaml(&path, &building).is_err());
}
