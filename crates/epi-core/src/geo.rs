//! Planar coordinate type and distance helpers.
//!
//! The city is a flat synthetic plane, so coordinates are plain `(x, y, z)`
//! in arbitrary distance units (the demo uses metres).  `z` is carried for
//! multi-storey layouts; it participates in the distance like any other axis.

/// A point in the simulated city.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A ground-level point.
    #[inline]
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Coordinate) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance; cheaper than [`distance`](Self::distance) when only
    /// comparing against a bound.
    #[inline]
    pub fn distance_squared(self, other: Coordinate) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    /// `true` if `other` lies within `radius` of `self` (inclusive).
    #[inline]
    pub fn within(self, other: Coordinate, radius: f64) -> bool {
        self.distance_squared(other) <= radius * radius
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}
