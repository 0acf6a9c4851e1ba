//! Swing-tank volume brackets.

/// Unit-count brackets, exclusive upper bound. 8 units lands in the
/// second bracket, not the first.
const SWING_BRACKETS: [(u32, f64); 5] = [
    (8, 40.0),
    (12, 80.0),
    (24, 96.0),
    (48, 168.0),
    (96, 288.0),
];

const SWING_VOLUME_ABOVE_BRACKETS_GAL: f64 = 480.0;

/// Swing-tank volume, gallons. Boiler plants recover fast enough that
/// no swing tank is fitted.
pub fn swing_tank_volume_gal(num_units: u32, is_boiler_based: bool) -> f64 {
    if is_boiler_based {
        return 0.0;
    }
    for (threshold, volume) in SWING_BRACKETS {
        if num_units < threshold {
            return volume;
        }
    }
    SWING_VOLUME_ABOVE_BRACKETS_GAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries_are_exclusive_upper() {
        for (units, expected) in [
            (7, 40.0),
            (8, 80.0),
            (11, 80.0),
            (12, 96.0),
            (23, 96.0),
            (24, 168.0),
            (47, 168.0),
            (48, 288.0),
            (95, 288.0),
            (96, 480.0),
        ] {
            assert_eq!(
                swing_tank_volume_gal(units, false),
                expected,
                "units = {units}"
            );
        }
    }

    #[test]
    fn boiler_plants_skip_the_swing_tank() {
        for units in [1, 8, 50, 400] {
            assert_eq!(swing_tank_volume_gal(units, true), 0.0);
        }
    }

    #[test]
    fn huge_buildings_cap_out() {
        assert_eq!(swing_tank_volume_gal(1000, false), 480.0);
    }
}
