// hn-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, Power as UomPower, Ratio as UomRatio,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature, Volume as UomVolume,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Power = UomPower;
pub type Ratio = UomRatio;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn inches(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn ft2(v: f64) -> Area {
    use uom::si::area::square_foot;
    Area::new::<square_foot>(v)
}

#[inline]
pub fn gal(v: f64) -> Volume {
    use uom::si::volume::gallon;
    Volume::new::<gallon>(v)
}

#[inline]
pub fn gpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::gallon_per_minute;
    VolumeRate::new::<gallon_per_minute>(v)
}

#[inline]
pub fn m3_per_s(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn degf(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn dt_f(v: f64) -> TempInterval {
    use uom::si::temperature_interval::degree_fahrenheit;
    TempInterval::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn watt(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

pub mod constants {
    pub const INCHES_PER_FOOT: f64 = 12.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = ft(8.0);
        let _d = inches(2.0);
        let _a = ft2(1_200.0);
        let _v = gal(80.0);
        let _q = gpm(3.5);
        let _t = degf(140.0);
        let _dt = dt_f(10.0);
        let _p = watt(500.0);
        let _r = unitless(0.5);
    }

    #[test]
    fn foot_is_twelve_inches() {
        use uom::si::length::inch;
        let one_foot = ft(1.0);
        assert!((one_foot.get::<inch>() - constants::INCHES_PER_FOOT).abs() < 1e-9);
    }

    #[test]
    fn volume_rate_units_agree() {
        use uom::si::volume_rate::gallon_per_minute;
        // 1 m3/s is about 15850.3 gpm.
        let q = m3_per_s(1.0);
        assert!((q.get::<gallon_per_minute>() - 15_850.323_141).abs() < 1e-3);
    }
}
