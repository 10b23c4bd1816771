use uom::si::f64::{Angle as UomAngle, Area as UomArea, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Area = UomArea;
pub type Length = UomLength;

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

/// Angle value in radians.
#[inline]
pub fn radians(a: Angle) -> f64 {
    use uom::si::angle::radian;
    a.get::<radian>()
}

/// Angle value in degrees.
#[inline]
pub fn degrees(a: Angle) -> f64 {
    use uom::si::angle::degree;
    a.get::<degree>()
}

/// Length value in meters.
#[inline]
pub fn meters(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

/// Area value in square meters.
#[inline]
pub fn square_meters(a: Area) -> f64 {
    use uom::si::area::square_meter;
    a.get::<square_meter>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _a = deg(5.0);
        let _r = rad(0.1);
        let _l = m(2.0);
        let _s = m2(10.0);
    }

    #[test]
    fn angle_conversions() {
        let a = deg(180.0);
        assert!((radians(a) - std::f64::consts::PI).abs() < 1e-12);
        assert!((degrees(rad(std::f64::consts::FRAC_PI_2)) - 90.0).abs() < 1e-12);
        assert!((meters(m(3.5)) - 3.5).abs() < 1e-12);
        assert!((square_meters(m2(12.0)) - 12.0).abs() < 1e-12);
    }
}
