use std::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// A trait for types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only `f32` and `f64` are
/// supported, since the distance metrics need trigonometry and a meaningful machine epsilon.
pub trait CoordNum:
    private::Sealed + Float + FloatConst + Debug + Display + Send + Sync + 'static
{
    /// Earth's mean radius in kilometres.
    const EARTH_RADIUS_KM: Self;

    /// Factor applied to pruning lower bounds so that rounding in the bound can never make it
    /// exceed the exact distance it stands in for.
    const BOUND_SLACK: Self;
}

impl CoordNum for f32 {
    const EARTH_RADIUS_KM: Self = 6371.0;
    const BOUND_SLACK: Self = 1.0 - 1e-5;
}

impl CoordNum for f64 {
    const EARTH_RADIUS_KM: Self = 6371.0;
    const BOUND_SLACK: Self = 1.0 - 1e-12;
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
