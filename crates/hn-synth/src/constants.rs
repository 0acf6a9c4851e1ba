//! Fixed policy values for the synthesized plant.

use uom::si::volume_rate::gallon_per_minute;

/// Loop setpoints, degrees Fahrenheit. The DHW distribution loop holds
/// delivery temperature; every other loop runs at the plant setpoint.
pub const DHW_LOOP_SETPOINT_F: f64 = 140.0;
pub const PLANT_LOOP_SETPOINT_F: f64 = 180.0;

/// Loop design temperature drops, degrees Fahrenheit.
pub const DHW_LOOP_DELTA_T_F: f64 = 10.0;
pub const PLANT_LOOP_DELTA_T_F: f64 = 20.0;

/// Tank element setpoints, degrees Fahrenheit. Storage tanks are held at
/// the plant setpoint; the swing tank only has to cover loop losses at
/// delivery temperature.
pub const STORAGE_TANK_SETPOINT_F: f64 = 180.0;
pub const SWING_TANK_SETPOINT_F: f64 = 140.0;

/// Differential-temperature interlock thresholds, degrees Fahrenheit.
pub const AVAILABILITY_DELTA_T_ON_F: f64 = 0.0;
pub const AVAILABILITY_DELTA_T_OFF_F: f64 = 0.0;

/// The DHW loop's nominal flow is pinned to this fixed volumetric rate,
/// not the computed recirculation flow; `SynthOptions::dhw_flow_from_sizing`
/// switches to the computed value.
pub const DHW_LOOP_FLOW_M3_PER_S: f64 = 0.000_4;

/// [`DHW_LOOP_FLOW_M3_PER_S`] expressed in gallons per minute.
pub fn dhw_loop_flow_gpm() -> f64 {
    hn_core::m3_per_s(DHW_LOOP_FLOW_M3_PER_S).get::<gallon_per_minute>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dhw_flow_constant_in_gpm() {
        // 0.0004 m3/s is about 6.34 gpm.
        let gpm = dhw_loop_flow_gpm();
        assert!((gpm - 6.34).abs() < 0.01, "got {gpm}");
    }
}
