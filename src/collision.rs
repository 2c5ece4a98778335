//! Geometric collision tests for candidate standoff poses.
//!
//! A candidate is modeled as a disk of the inflated robot radius
//! centered at the pose. It is tested against the occupied cells of the
//! static obstacle grid and against the centroids of other pending
//! objects that are not in the grid.

use crate::core::{Point2D, Pose2D};
use crate::io::ObstacleGrid;

/// Disk vs axis-aligned cell intersection.
///
/// `cx`/`cy` are the absolute offsets of the disk center from the cell
/// center. Clamped-distance test: reject when either offset exceeds the
/// half-extent plus radius, accept when within either half-extent,
/// otherwise compare the squared corner distance. Boundary contact
/// counts as intersecting.
pub fn cell_intersects(radius: f32, cx: f32, cy: f32, cell_width: f32, cell_height: f32) -> bool {
    let half_w = cell_width / 2.0;
    let half_h = cell_height / 2.0;

    if cx > half_w + radius {
        return false;
    }
    if cy > half_h + radius {
        return false;
    }

    if cx <= half_w {
        return true;
    }
    if cy <= half_h {
        return true;
    }

    let corner_dist_squared = (cx - half_w).powi(2) + (cy - half_h).powi(2);
    corner_dist_squared <= radius * radius
}

/// Disk vs point intersection, offsets relative to the disk center.
pub fn point_intersects(radius: f32, ox: f32, oy: f32) -> bool {
    ox * ox + oy * oy <= radius * radius
}

/// Whether a disk of `radius` at `pose` touches any occupied grid cell
/// or any of the given object centroids.
pub fn is_colliding(
    pose: Pose2D,
    radius: f32,
    grid: &ObstacleGrid,
    other_objects: &[Point2D],
) -> bool {
    for cell in &grid.cells {
        if cell_intersects(
            radius,
            (pose.x - cell.x).abs(),
            (pose.y - cell.y).abs(),
            grid.cell_width,
            grid.cell_height,
        ) {
            return true;
        }
    }

    other_objects
        .iter()
        .any(|object| point_intersects(radius, (object.x - pose.x).abs(), (object.y - pose.y).abs()))
}
