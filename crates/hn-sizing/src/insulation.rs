//! Insulation thickness for cylindrical pipe, solved in closed form.
//!
//! For a pipe of radius `r` wrapped to an outer radius `r_out`, the
//! radial resistance satisfies `r_out * ln(r_out / r) = R * k * 12`
//! (radii in inches, R in hr ft2 F/Btu, k in Btu/(hr ft F)). Inverting
//! for the wrap thickness lands on the Lambert W function:
//!
//! `t = r * (exp(W(L / r)) - 1)` with `L = R * k * 12`.

use hn_core::lambert_w0;
use hn_core::units::constants::INCHES_PER_FOOT;

use crate::{SizingError, SizingResultT};

/// Wall thickness (inches) of insulation achieving `nominal_r_value`
/// on a pipe of `pipe_diameter_in`.
pub fn insulation_thickness_in(
    nominal_r_value: f64,
    pipe_diameter_in: f64,
    conductivity: f64,
) -> SizingResultT<f64> {
    if !pipe_diameter_in.is_finite() || pipe_diameter_in <= 0.0 {
        return Err(SizingError::InvalidInput {
            what: "pipe_diameter_in",
            value: pipe_diameter_in,
        });
    }
    if !nominal_r_value.is_finite() || nominal_r_value < 0.0 {
        return Err(SizingError::InvalidInput {
            what: "nominal_r_value",
            value: nominal_r_value,
        });
    }
    if !conductivity.is_finite() || conductivity <= 0.0 {
        return Err(SizingError::InvalidInput {
            what: "conductivity",
            value: conductivity,
        });
    }

    let radius_in = pipe_diameter_in / 2.0;
    let characteristic_in = nominal_r_value * conductivity * INCHES_PER_FOOT;
    let w = lambert_w0(characteristic_in / radius_in)?;
    Ok(radius_in * (w.exp() - 1.0))
}

/// Supply and return wrap thicknesses, inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsulationPair {
    pub supply_in: f64,
    pub return_in: f64,
}

pub fn pipe_insulation_thicknesses(
    supply_r_value: f64,
    return_r_value: f64,
    supply_diameter_in: f64,
    return_diameter_in: f64,
    conductivity: f64,
) -> SizingResultT<InsulationPair> {
    Ok(InsulationPair {
        supply_in: insulation_thickness_in(supply_r_value, supply_diameter_in, conductivity)?,
        return_in: insulation_thickness_in(return_r_value, return_diameter_in, conductivity)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::{nearly_equal, Tolerances};
    use proptest::prelude::*;

    /// Resistance actually delivered by a wrap of `thickness_in`.
    fn delivered_r_value(thickness_in: f64, pipe_diameter_in: f64, conductivity: f64) -> f64 {
        let r = pipe_diameter_in / 2.0;
        let r_out = r + thickness_in;
        r_out * (r_out / r).ln() / (conductivity * INCHES_PER_FOOT)
    }

    #[test]
    fn zero_r_value_needs_no_insulation() {
        let t = insulation_thickness_in(0.0, 2.0, 0.02).unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn thickness_round_trips_through_resistance() {
        let t = insulation_thickness_in(6.0, 2.0, 0.02).unwrap();
        assert!(t > 0.0);
        let r_back = delivered_r_value(t, 2.0, 0.02);
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-6,
        };
        assert!(nearly_equal(r_back, 6.0, tol));
    }

    #[test]
    fn smaller_pipe_needs_thicker_wrap_for_same_r() {
        let fat = insulation_thickness_in(4.0, 2.0, 0.02).unwrap();
        let thin = insulation_thickness_in(4.0, 0.75, 0.02).unwrap();
        assert!(thin > fat);
    }

    #[test]
    fn rejects_degenerate_pipe() {
        assert!(insulation_thickness_in(6.0, 0.0, 0.02).is_err());
        assert!(insulation_thickness_in(6.0, -1.0, 0.02).is_err());
        assert!(insulation_thickness_in(-1.0, 2.0, 0.02).is_err());
        assert!(insulation_thickness_in(6.0, 2.0, 0.0).is_err());
        assert!(insulation_thickness_in(f64::NAN, 2.0, 0.02).is_err());
    }

    #[test]
    fn pair_covers_both_mains() {
        let pair = pipe_insulation_thicknesses(6.0, 4.0, 2.0, 0.75, 0.02).unwrap();
        assert!(pair.supply_in > 0.0);
        assert!(pair.return_in > 0.0);
    }

    proptest! {
        #[test]
        fn delivered_resistance_matches_request(
            r_value in 0.5f64..20.0,
            diameter in 0.25f64..6.0,
            conductivity in 0.01f64..0.1,
        ) {
            let t = insulation_thickness_in(r_value, diameter, conductivity).unwrap();
            let back = delivered_r_value(t, diameter, conductivity);
            prop_assert!((back - r_value).abs() / r_value < 1e-6);
        }
    }
}
