use crate::LayoutError;

pub const DEFAULT_MIN_RADIUS: f64 = 48.0;
pub const DEFAULT_MAX_RADIUS: f64 = 144.0;
const FULL_TURN: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: CartesianOffset) -> Self {
        Self::new(self.x + by.dx, self.y + by.dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// An item's location relative to the ring center. Angles are in degrees,
/// measured clockwise from due east in screen space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPosition {
    pub radius: f64,
    pub angle_degrees: f64,
}

impl PolarPosition {
    pub fn to_cartesian(&self) -> CartesianOffset {
        let theta = self.angle_degrees.to_radians();
        CartesianOffset {
            dx: self.radius * theta.cos(),
            dy: self.radius * theta.sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartesianOffset {
    pub dx: f64,
    pub dy: f64,
}

impl CartesianOffset {
    pub fn to_polar(&self) -> PolarPosition {
        PolarPosition {
            radius: self.dx.hypot(self.dy),
            angle_degrees: self.dy.atan2(self.dx).to_degrees().rem_euclid(FULL_TURN),
        }
    }

    /// Rotates the offset around the origin, as a parent transform would.
    pub fn rotated(&self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            dx: self.dx * cos - self.dy * sin,
            dy: self.dx * sin + self.dy * cos,
        }
    }
}

/// Radius bounds shared by every ring of an orbit. Radii are linearly
/// interpolated between the bounds, innermost ring first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    min_radius: f64,
    max_radius: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
        }
    }
}

impl RingGeometry {
    pub fn new(min_radius: f64, max_radius: f64) -> Result<Self, LayoutError> {
        let valid = min_radius.is_finite()
            && max_radius.is_finite()
            && min_radius >= 0.0
            && max_radius > min_radius;

        if !valid {
            return Err(LayoutError::InvalidRadii {
                min: min_radius,
                max: max_radius,
            });
        }

        Ok(Self {
            min_radius,
            max_radius,
        })
    }

    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn radius_of(&self, ring_index: usize, total_rings: usize) -> f64 {
        // a single ring sits on the inner bound
        if total_rings <= 1 {
            return self.min_radius;
        }
        let spacing = (self.max_radius - self.min_radius) / (total_rings - 1) as f64;
        self.min_radius + ring_index as f64 * spacing
    }

    /// Distance between two neighbouring rings. Markers narrower than this
    /// never overlap across rings.
    pub fn spacing(&self, total_rings: usize) -> f64 {
        if total_rings <= 1 {
            return 0.0;
        }
        (self.max_radius - self.min_radius) / (total_rings - 1) as f64
    }
}

/// Evenly distributes `item_count` items around a ring, starting due east.
/// An empty ring is treated like a ring of one.
pub fn position_of(item_index: usize, item_count: usize, radius: f64) -> PolarPosition {
    let count = item_count.max(1);
    PolarPosition {
        radius,
        angle_degrees: FULL_TURN * (item_index % count) as f64 / count as f64,
    }
}
