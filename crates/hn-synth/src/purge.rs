//! Removal of the previous-generation plant by name.
//!
//! The legacy inventory arrives as lists of assigned names. Matching is
//! case-sensitive substring containment against fixed blacklists; nothing
//! is removed unless its name contains a blacklisted substring. Removal
//! runs in dependency order: program-calling managers (taking their owned
//! programs with them), then sensors, actuators, output variables,
//! internal variables, and finally the loops themselves.

use hn_project::LegacyPlantDef;

/// Loop-name substrings removed for every shared system.
pub const LOOP_BLACKLIST: &[&str] = &["dhw loop", "solar hot water loop"];

/// Additional loop-name substrings removed when the shared system also
/// serves space heating.
pub const LOOP_BLACKLIST_SPACE_HEATING: &[&str] = &["hydronic heat loop"];

/// EMS-object-name substrings removed for every shared system.
pub const EMS_BLACKLIST: &[&str] = &["water heater", "hpwh", "recirc pump"];

/// Additional EMS-object-name substrings removed when the shared system
/// also serves space heating.
pub const EMS_BLACKLIST_SPACE_HEATING: &[&str] = &["boiler", "hydronic pump"];

/// Names removed from the legacy inventory, per category, in removal
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub removed_managers: Vec<String>,
    pub removed_programs: Vec<String>,
    pub removed_sensors: Vec<String>,
    pub removed_actuators: Vec<String>,
    pub removed_output_variables: Vec<String>,
    pub removed_internal_variables: Vec<String>,
    pub removed_loops: Vec<String>,
}

impl PurgeReport {
    pub fn total_removed(&self) -> usize {
        self.removed_managers.len()
            + self.removed_programs.len()
            + self.removed_sensors.len()
            + self.removed_actuators.len()
            + self.removed_output_variables.len()
            + self.removed_internal_variables.len()
            + self.removed_loops.len()
    }
}

/// Split the legacy inventory into what the blacklists match (reported)
/// and what survives (returned).
///
/// Programs are not matched on their own names; they go only when their
/// owning calling manager goes.
pub fn purge_legacy_network(
    legacy: &LegacyPlantDef,
    includes_space_heating: bool,
) -> (LegacyPlantDef, PurgeReport) {
    let mut loop_blacklist: Vec<&str> = LOOP_BLACKLIST.to_vec();
    let mut ems_blacklist: Vec<&str> = EMS_BLACKLIST.to_vec();
    if includes_space_heating {
        loop_blacklist.extend_from_slice(LOOP_BLACKLIST_SPACE_HEATING);
        ems_blacklist.extend_from_slice(EMS_BLACKLIST_SPACE_HEATING);
    }

    let mut retained = LegacyPlantDef::default();
    let mut report = PurgeReport::default();

    for manager in &legacy.ems.program_calling_managers {
        if matches_any(&manager.name, &ems_blacklist) {
            report.removed_managers.push(manager.name.clone());
            report
                .removed_programs
                .extend(manager.programs.iter().cloned());
        } else {
            retained.ems.program_calling_managers.push(manager.clone());
        }
    }

    split_names(
        &legacy.ems.sensors,
        &ems_blacklist,
        &mut report.removed_sensors,
        &mut retained.ems.sensors,
    );
    split_names(
        &legacy.ems.actuators,
        &ems_blacklist,
        &mut report.removed_actuators,
        &mut retained.ems.actuators,
    );
    split_names(
        &legacy.ems.output_variables,
        &ems_blacklist,
        &mut report.removed_output_variables,
        &mut retained.ems.output_variables,
    );
    split_names(
        &legacy.ems.internal_variables,
        &ems_blacklist,
        &mut report.removed_internal_variables,
        &mut retained.ems.internal_variables,
    );

    split_names(
        &legacy.loops,
        &loop_blacklist,
        &mut report.removed_loops,
        &mut retained.loops,
    );

    (retained, report)
}

fn matches_any(name: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| name.contains(pattern))
}

fn split_names(
    names: &[String],
    blacklist: &[&str],
    removed: &mut Vec<String>,
    kept: &mut Vec<String>,
) {
    for name in names {
        if matches_any(name, blacklist) {
            removed.push(name.clone());
        } else {
            kept.push(name.clone());
        }
    }
}
