//! 2D pose type for standoff and dropoff targets.
//!
//! Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use super::math::normalize_angle;
use super::point::Point2D;

/// A 2D pose representing position and orientation.
///
/// - Position: (x, y) in meters
/// - Theta: heading angle in radians, counter-clockwise from X-axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading angle in radians [-π, π), CCW positive from X-axis.
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose.
    ///
    /// `theta` will be normalized to [-π, π).
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create an identity pose (origin, facing forward).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Create a pose from position and angle.
    #[inline]
    pub fn from_position_angle(position: Point2D, theta: f32) -> Self {
        Self::new(position.x, position.y, theta)
    }

    /// Get the position as a Point2D.
    #[inline]
    pub fn position(self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Get the forward direction (unit vector).
    #[inline]
    pub fn forward(self) -> Point2D {
        Point2D::new(self.theta.cos(), self.theta.sin())
    }
}
