//! Standoff pose sampling around object centroids.

use crate::core::math::TWO_PI;
use crate::core::{Point2D, Pose2D};

/// Candidate standoff poses evenly spaced on a circle around `centroid`.
///
/// Sample `i` of `count` sits at angle `2π·i/count` on the circle of
/// `radius`, with its forward axis pointing back at the centroid. Pure
/// function of its inputs: the returned iterator is lazy, finite, and
/// yields the identical sequence on every call with the same arguments.
pub fn standoff_poses(
    centroid: Point2D,
    radius: f32,
    count: usize,
) -> impl Iterator<Item = Pose2D> + Clone {
    (0..count).map(move |i| {
        let angle = TWO_PI * i as f32 / count as f32;
        let position = centroid.point_at(angle, radius);
        Pose2D::from_position_angle(position, position.angle_to(&centroid))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_poses_lie_on_circle() {
        let centroid = Point2D::new(2.0, -3.0);
        for pose in standoff_poses(centroid, 0.66, 10) {
            assert_relative_eq!(pose.position().distance(&centroid), 0.66, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_forward_axis_points_at_centroid() {
        let centroid = Point2D::new(1.0, 1.0);
        for pose in standoff_poses(centroid, 0.5, 8) {
            let expected = pose.position().angle_to(&centroid);
            assert_relative_eq!(pose.theta, expected, epsilon = 1e-6);
            // Walking forward by the radius lands on the centroid
            let fwd = pose.forward();
            let landed = Point2D::new(pose.x + fwd.x * 0.5, pose.y + fwd.y * 0.5);
            assert_relative_eq!(landed.distance(&centroid), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_even_spacing_and_count() {
        let poses: Vec<Pose2D> = standoff_poses(Point2D::ZERO, 1.0, 4).collect();
        assert_eq!(poses.len(), 4);
        // Samples at 0°, 90°, 180°, 270°
        assert_relative_eq!(poses[0].x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(poses[1].y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(poses[2].x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(poses[3].y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_restartable_identical_sequences() {
        let first: Vec<Pose2D> = standoff_poses(Point2D::new(0.3, 0.7), 0.66, 10).collect();
        let second: Vec<Pose2D> = standoff_poses(Point2D::new(0.3, 0.7), 0.66, 10).collect();
        assert_eq!(first, second);
    }
}
