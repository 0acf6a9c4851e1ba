//! Heat-source unit count and storage volume.

/// Regression coefficients: heat-source units demanded per bedroom and
/// per dwelling unit.
pub const UNIT_COUNT_PER_BEDROOM: f64 = 0.037;
pub const UNIT_COUNT_PER_DWELLING: f64 = 0.106;

/// The regression assumes this rated output (kBtu/hr); field capacity
/// is derated, so the count scales up by the ratio.
pub const REGRESSION_RATED_KBTU_PER_HR: f64 = 154.0;
pub const DERATED_KBTU_PER_HR: f64 = 123.5;

/// Coarse allowance when the plant also serves space heating. Applied
/// after rounding.
pub const SPACE_HEATING_COUNT_MULTIPLIER: u32 = 4;

/// Storage tank volume per supply loop, gallons.
pub const STORAGE_TANK_VOLUME_GAL: f64 = 80.0;

/// Number of heat-source units (and therefore supply loops) the plant
/// needs.
pub fn heat_source_unit_count(
    num_bedrooms: u32,
    num_units: u32,
    includes_space_heating: bool,
) -> u32 {
    let demanded = UNIT_COUNT_PER_BEDROOM * num_bedrooms as f64
        + UNIT_COUNT_PER_DWELLING * num_units as f64;
    let derated = demanded * (REGRESSION_RATED_KBTU_PER_HR / DERATED_KBTU_PER_HR);
    let count = derated.ceil() as u32;
    if includes_space_heating {
        count * SPACE_HEATING_COUNT_MULTIPLIER
    } else {
        count
    }
}

pub fn storage_tank_volume_gal() -> f64 {
    STORAGE_TANK_VOLUME_GAL
}
