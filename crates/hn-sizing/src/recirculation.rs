//! Recirculation-loop geometry and flow.
//!
//! The building is modeled as a rectangle of the given footprint and
//! aspect ratio; the supply main runs out of the mechanical room, up a
//! riser to the middle story, then along the long side of the
//! rectangle scaled by units per floor.

use crate::{SizingError, SizingResultT};

/// Horizontal run inside the mechanical room, feet.
pub const MECH_ROOM_RUN_FT: f64 = 8.0;

/// Per-length loss of the recirculation main, Btu/(hr ft).
pub const LOSS_RATE_INSULATED: f64 = 30.0;
pub const LOSS_RATE_BARE: f64 = 60.0;

/// Water density folded with the per-minute unit change.
pub const WATER_LB_PER_GAL: f64 = 8.25;
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Temperature drop tolerated across the loop, degF.
pub const ACCEPTABLE_DROP_F: f64 = 5.0;

/// Supply and return main lengths, feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecircLengths {
    pub supply_ft: f64,
    pub return_ft: f64,
}

pub fn recirculation_lengths(
    footprint_ft2: f64,
    aspect_ratio: f64,
    ceiling_height_ft: f64,
    num_units: u32,
    num_stories: u32,
    has_double_loaded_corridor: bool,
) -> SizingResultT<RecircLengths> {
    if !footprint_ft2.is_finite() || footprint_ft2 <= 0.0 {
        return Err(SizingError::InvalidInput {
            what: "footprint_ft2",
            value: footprint_ft2,
        });
    }
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(SizingError::InvalidInput {
            what: "aspect_ratio",
            value: aspect_ratio,
        });
    }
    if !ceiling_height_ft.is_finite() || ceiling_height_ft <= 0.0 {
        return Err(SizingError::InvalidInput {
            what: "ceiling_height_ft",
            value: ceiling_height_ft,
        });
    }
    if num_units == 0 {
        return Err(SizingError::InvalidInput {
            what: "num_units",
            value: 0.0,
        });
    }
    if num_stories == 0 {
        return Err(SizingError::InvalidInput {
            what: "num_stories",
            value: 0.0,
        });
    }

    let front = (footprint_ft2 * aspect_ratio).sqrt();
    let side = footprint_ft2 / front;
    let units_per_floor = num_units as f64 / num_stories as f64;
    let building_run_ft = front.max(side) * units_per_floor;

    // Riser climbs to the middle story.
    let riser_ft = ceiling_height_ft * (num_stories as f64 / 2.0).ceil();
    let supply_ft = MECH_ROOM_RUN_FT + riser_ft + building_run_ft;

    // A double-loaded corridor returns straight down the riser.
    let return_ft = if has_double_loaded_corridor {
        MECH_ROOM_RUN_FT + riser_ft
    } else {
        supply_ft
    };

    Ok(RecircLengths {
        supply_ft,
        return_ft,
    })
}

/// Loop flow and the heat loss it must make up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecircFlow {
    pub flow_gpm: f64,
    pub heat_loss_btu_per_hr: f64,
}

/// Flow needed to hold the loop inside [`ACCEPTABLE_DROP_F`] given the
/// standing loss of the supply main.
pub fn recirculation_flow_rate(supply_length_ft: f64, insulation_r_value: f64) -> RecircFlow {
    let rate = if insulation_r_value > 0.0 {
        LOSS_RATE_INSULATED
    } else {
        LOSS_RATE_BARE
    };
    let heat_loss_btu_per_hr = rate * supply_length_ft;
    let flow_gpm =
        heat_loss_btu_per_hr / (MINUTES_PER_HOUR * WATER_LB_PER_GAL * ACCEPTABLE_DROP_F);
    RecircFlow {
        flow_gpm,
        heat_loss_btu_per_hr,
    }
}
