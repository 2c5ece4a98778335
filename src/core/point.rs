//! 2D point type for object centroids and waypoints.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// World coordinates (meters, f32).
///
/// Follows the ROS REP-103 convention: X-forward, Y-left.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
}

impl Point2D {
    /// Create a new point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Origin
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Angle from this point to another (radians, CCW from +X)
    #[inline]
    pub fn angle_to(&self, other: &Point2D) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dy.atan2(dx)
    }

    /// Create a point at a given angle and distance from this point
    #[inline]
    pub fn point_at(&self, angle: f32, distance: f32) -> Point2D {
        Point2D::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}
