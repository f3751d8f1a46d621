//! Planar coordinate type and spatial utilities.
//!
//! Every position in the system is an east/north offset in metres from the
//! vehicle's home location, so plain Euclidean geometry is exact — no
//! geodesic math is needed at field scale (a few hundred metres).

/// A planar east/north offset from the home location, in metres.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub east:  f64,
    pub north: f64,
}

impl Point2 {
    /// The home location.
    pub const ORIGIN: Point2 = Point2 { east: 0.0, north: 0.0 };

    #[inline]
    pub fn new(east: f64, north: f64) -> Self {
        Self { east, north }
    }

    /// Straight-line distance to `other`, in metres.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        let de = other.east - self.east;
        let dn = other.north - self.north;
        (de * de + dn * dn).sqrt()
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.east, self.north)
    }
}
