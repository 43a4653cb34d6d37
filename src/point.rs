//! Labelled geographic points.

use geo_traits::CoordTrait;

use crate::r#type::CoordNum;

/// The coordinate a tree level splits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Latitude at even depths, longitude at odd depths.
    #[inline]
    pub fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Axis::Latitude
        } else {
            Axis::Longitude
        }
    }

    /// The axis used one level further down.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Axis::Latitude => Axis::Longitude,
            Axis::Longitude => Axis::Latitude,
        }
    }
}

/// A labelled location: a state, a county (which may contain spaces) and a latitude/longitude
/// pair in degrees.
///
/// Points are never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<N: CoordNum = f64> {
    state: String,
    county: String,
    latitude: N,
    longitude: N,
}

impl<N: CoordNum> Point<N> {
    /// Create a labelled point.
    pub fn new(
        state: impl Into<String>,
        county: impl Into<String>,
        latitude: N,
        longitude: N,
    ) -> Self {
        Self {
            state: state.into(),
            county: county.into(),
            latitude,
            longitude,
        }
    }

    /// Create an unlabelled point, typically a query location.
    pub fn at(latitude: N, longitude: N) -> Self {
        Self::new(String::new(), String::new(), latitude, longitude)
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn county(&self) -> &str {
        &self.county
    }

    pub fn latitude(&self) -> N {
        self.latitude
    }

    pub fn longitude(&self) -> N {
        self.longitude
    }

    /// The value of this point along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis) -> N {
        match axis {
            Axis::Latitude => self.latitude,
            Axis::Longitude => self.longitude,
        }
    }
}

/// `x` is longitude and `y` is latitude, matching the usual GIS convention.
impl<N: CoordNum> CoordTrait for Point<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.longitude
    }

    fn y(&self) -> Self::T {
        self.latitude
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.longitude,
            1 => self.latitude,
            _ => panic!("Invalid index of coord"),
        }
    }
}
