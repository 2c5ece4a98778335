//! Angle utilities.
//!
//! All angles are in radians. Coordinate frame follows ROS REP-103:
//! X-forward, Y-left, counter-clockwise positive rotation.

use std::f32::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f32 = 2.0 * PI;

/// Normalize angle to [-π, π).
///
/// # Example
/// ```
/// use anvesha::core::math::normalize_angle;
/// use std::f32::consts::PI;
///
/// assert!((normalize_angle(PI / 2.0) - PI / 2.0).abs() < 1e-6);
/// // Values near ±π may normalize to either +π or -π due to floating-point
/// assert!(normalize_angle(3.0 * PI).abs() - PI < 1e-5);
/// ```
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TWO_PI;
    if a >= PI {
        a -= TWO_PI;
    } else if a < -PI {
        a += TWO_PI;
    }
    a
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * PI / 180.0
}
