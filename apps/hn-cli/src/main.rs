use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hn_equipment::SharedSystemType;
use hn_project::Building;
use hn_report::{
    compute_synthesis_id, NetworkDocument, ReportValue, SynthesisManifest, SynthesisStore,
};
use hn_sizing::{FacilityType, SizingInputs};
use hn_synth::{synthesize, SynthError, SynthOptions, SynthResult, SynthesisOutcome};
use tracing::warn;

#[derive(Parser)]
#[command(name = "hn-cli")]
#[command(about = "Hydronet CLI - Hydronic plant network synthesis tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a building description file
    Validate {
        /// Path to the building YAML file
        building_path: PathBuf,
    },
    /// Print the plant sizing for a building
    Sizing {
        /// Path to the building YAML file
        building_path: PathBuf,
    },
    /// Synthesize the plant network and store the result
    Synthesize {
        /// Path to the building YAML file
        building_path: PathBuf,
        /// Drive the DHW loop flow from the computed recirculation rate
        #[arg(long)]
        flow_from_sizing: bool,
        /// Skip persisting the synthesis next to the building file
        #[arg(long)]
        no_store: bool,
    },
}

fn main() -> SynthResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { building_path } => cmd_validate(&building_path),
        Commands::Sizing { building_path } => cmd_sizing(&building_path),
        Commands::Synthesize {
            building_path,
            flow_from_sizing,
            no_store,
        } => cmd_synthesize(&building_path, flow_from_sizing, !no_store),
    }
}

/// Load the building description. A missing file is a warned no-op, not a
/// failure.
fn load_building(building_path: &Path) -> SynthResult<Option<Building>> {
    if !building_path.exists() {
        warn!(
            "{}: building description not found, nothing to do",
            building_path.display()
        );
        return Ok(None);
    }
    Ok(Some(hn_project::load_yaml(building_path)?))
}

fn cmd_validate(building_path: &Path) -> SynthResult<()> {
    println!("Validating building description: {}", building_path.display());
    let building = match load_building(building_path)? {
        Some(building) => building,
        None => return Ok(()),
    };

    println!("✓ Building description is valid");
    println!("  Name: {}", building.name);
    println!(
        "  Units: {}, bedrooms: {}, stories: {}",
        building.geometry.num_units, building.geometry.num_bedrooms, building.geometry.num_stories
    );
    println!(
        "  Shared system: {} ({})",
        building.shared_system.system_type, building.shared_system.fuel
    );
    println!(
        "  Zones: {}, water use connections: {}, baseboards: {}",
        building.zones.len(),
        building.water_use_connections.len(),
        building.baseboards.len()
    );
    Ok(())
}

fn cmd_sizing(building_path: &Path) -> SynthResult<()> {
    let building = match load_building(building_path)? {
        Some(building) => building,
        None => return Ok(()),
    };

    let system = SharedSystemType::parse(&building.shared_system.system_type)?;
    if system.is_none() {
        println!(
            "No shared system in {}; nothing to size",
            building.name
        );
        return Ok(());
    }
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

    println!("Sizing for {} ({}):", building.name, system.label());
    println!("  Heat source units: {}", sizing.heat_source_unit_count);
    println!(
        "  Storage tanks: {} x {:.0} gal",
        sizing.heat_source_unit_count, sizing.storage_tank_volume_gal
    );
    if sizing.swing_tank_volume_gal > 0.0 {
        println!("  Swing tank: {:.0} gal", sizing.swing_tank_volume_gal);
    } else {
        println!("  Swing tank: none");
    }
    println!(
        "  Recirculation supply: {:.1} ft, {:.2} in pipe, {:.2} in insulation",
        sizing.supply_length_ft, sizing.supply_diameter_in, sizing.supply_insulation_in
    );
    println!(
        "  Recirculation return: {:.1} ft, {:.2} in pipe, {:.2} in insulation",
        sizing.return_length_ft, sizing.return_diameter_in, sizing.return_insulation_in
    );
    println!("  Recirculation flow: {:.2} gpm", sizing.recirc_flow_gpm);
    println!(
        "  Recirculation heat loss: {:.0} Btu/hr",
        sizing.recirc_heat_loss_btu_per_hr
    );
    Ok(())
}

fn cmd_synthesize(building_path: &Path, flow_from_sizing: bool, persist: bool) -> SynthResult<()> {
    let building = match load_building(building_path)? {
        Some(building) => building,
        None => return Ok(()),
    };

    let options = SynthOptions {
        dhw_flow_from_sizing: flow_from_sizing,
    };
    let synthesis = match synthesize(&building, &options)? {
        SynthesisOutcome::NotApplicable { .. } => {
            println!(
                "No shared system in {}; nothing to synthesize",
                building.name
            );
            return Ok(());
        }
        SynthesisOutcome::Synthesized(synthesis) => synthesis,
    };

    println!("✓ Synthesis completed for {}", building.name);
    println!("  Loops: {}", synthesis.network.loops().len());
    println!("  Tanks: {}", synthesis.network.tanks().len());
    println!("  Heat sources: {}", synthesis.network.heat_sources().len());

    println!("\nSynthesis report:");
    for entry in &synthesis.report.entries {
        match &entry.value {
            ReportValue::Num { value } => println!("  {}: {}", entry.key, value),
            ReportValue::Text { value } => println!("  {}: {}", entry.key, value),
        }
    }

    println!(
        "\nLegacy purge: {} objects removed",
        synthesis.purge.total_removed()
    );
    print_removed("loops", &synthesis.purge.removed_loops);
    print_removed("managers", &synthesis.purge.removed_managers);
    print_removed("programs", &synthesis.purge.removed_programs);
    print_removed("sensors", &synthesis.purge.removed_sensors);
    print_removed("actuators", &synthesis.purge.removed_actuators);
    print_removed("output variables", &synthesis.purge.removed_output_variables);
    print_removed(
        "internal variables",
        &synthesis.purge.removed_internal_variables,
    );

    if persist {
        let options_json = serde_json::to_string(&options)
            .map_err(|err| SynthError::Report(err.to_string()))?;
        let synthesis_id = compute_synthesis_id(&building, &options_json, hn_synth::TOOL_VERSION);
        let manifest = SynthesisManifest::new(
            synthesis_id.clone(),
            building.name.clone(),
            hn_synth::TOOL_VERSION,
        );
        let document = NetworkDocument::from_network(&synthesis.network);
        let store = SynthesisStore::for_building(building_path)?;
        store.save_synthesis(&manifest, &document, &synthesis.report)?;
        println!("\n✓ Synthesis stored: {}", synthesis_id);
    }

    Ok(())
}

fn print_removed(label: &str, names: &[String]) {
    if !names.is_empty() {
        println!("  {}: {}", label, names.join(", "));
    }
}
