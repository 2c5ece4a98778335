//! Pickup sequence optimization and approach-pose annotation.
//!
//! Orders the pending objects to minimize total travel through the
//! pick/drop legs, then attaches collision-free standoff poses to each
//! object in its new position.

use crate::approach::standoff_poses;
use crate::collision::is_colliding;
use crate::config::{ApproachConfig, NavGoalIndex, WaypointConfig};
use crate::core::{Point2D, Pose2D};
use crate::io::{ApproachPoseSink, ObstacleGrid, ObstacleSource};
use crate::object::DetectedObject;
use crate::scanner::Outcome;

/// Sequence optimizer for the pending-pickup list.
pub struct SequenceOptimizer {
    config: ApproachConfig,
}

impl SequenceOptimizer {
    /// Create an optimizer with configuration.
    pub fn new(config: ApproachConfig) -> Self {
        Self { config }
    }

    /// Run one optimization pass: resolve the start point, reorder the
    /// pending list, and annotate each object with valid approach
    /// poses.
    ///
    /// An absent obstacle grid is treated as empty. This step has no
    /// failure outcome; it always signals [`Outcome::Succeeded`].
    pub fn run<O, S>(
        &self,
        pending: &mut Vec<DetectedObject>,
        nav_goal: NavGoalIndex,
        waypoints: &WaypointConfig,
        obstacles: &mut O,
        sink: &mut S,
    ) -> Outcome
    where
        O: ObstacleSource,
        S: ApproachPoseSink,
    {
        let start = waypoints.start_point(nav_goal);
        tracing::info!(
            "Optimizing pickup order for {} objects from ({:.2}, {:.2})",
            pending.len(),
            start.x,
            start.y
        );

        self.optimize(pending, start);

        let grid = match obstacles.obstacle_grid(self.config.grid_timeout()) {
            Some(grid) => grid,
            None => {
                tracing::warn!(
                    "Timeout reached. No obstacle grid within {:.1}s, assuming empty",
                    self.config.grid_timeout_secs
                );
                ObstacleGrid::empty()
            }
        };

        self.annotate_approach_poses(pending, &grid, sink);
        Outcome::Succeeded
    }

    /// Reorder `pending` in place into the minimum-cost pickup order.
    ///
    /// Orderings are enumerated exhaustively in lexicographic order over
    /// the input indices, so cost ties resolve to the first-encountered
    /// (lexicographically smallest) ordering. Costs use raw object
    /// centroids rather than the approach poses the robot will actually
    /// drive to; the error is small at the standoff radii involved.
    pub fn optimize(&self, pending: &mut Vec<DetectedObject>, start: Point2D) {
        if pending.len() < 2 {
            return;
        }

        let mut best_order: Option<Vec<usize>> = None;
        let mut best_cost = f32::INFINITY;
        for order in lexicographic_permutations(pending.len()) {
            let cost = route_cost(&order, pending, start);
            tracing::debug!("Order {:?} travels {:.2}m", order, cost);
            // Strict comparison keeps the first-encountered order on ties
            if cost < best_cost {
                best_cost = cost;
                best_order = Some(order);
            }
        }

        let order = best_order.expect("at least one permutation exists");
        tracing::info!(
            "Selected pickup order {:?}, total travel {:.2}m",
            order,
            best_cost
        );
        let reordered: Vec<DetectedObject> = order.iter().map(|&i| pending[i].clone()).collect();
        *pending = reordered;
    }

    /// Attach every collision-free standoff pose to each object in its
    /// sequence position. Objects later in the sequence are still on
    /// the floor when an earlier one is approached, so their centroids
    /// count as obstacles; already-visited ones do not.
    pub fn annotate_approach_poses<S: ApproachPoseSink>(
        &self,
        pending: &mut [DetectedObject],
        grid: &ObstacleGrid,
        sink: &mut S,
    ) {
        let radius = self.config.inflated_radius();
        let mut all_valid: Vec<Pose2D> = Vec::new();

        for index in 0..pending.len() {
            let remaining: Vec<Point2D> = pending[index + 1..]
                .iter()
                .map(|object| object.position())
                .collect();
            let centroid = pending[index].position();

            let mut kept = 0usize;
            let candidates =
                standoff_poses(centroid, self.config.standoff_radius, self.config.sample_count);
            for pose in candidates {
                if !is_colliding(pose, radius, grid, &remaining) {
                    pending[index].add_approach_pose(pose);
                    all_valid.push(pose);
                    kept += 1;
                }
            }

            if kept == 0 {
                tracing::warn!(
                    "No collision-free approach pose for '{}' at ({:.2}, {:.2})",
                    pending[index].class_label(),
                    centroid.x,
                    centroid.y
                );
            } else {
                tracing::debug!(
                    "{} of {} approach poses valid for '{}'",
                    kept,
                    self.config.sample_count,
                    pending[index].class_label()
                );
            }
        }

        sink.publish_approach_poses(&all_valid);
    }
}

/// Total travel for one ordering: from the start point, each leg drives
/// to the object's centroid and on to its dropoff, and the next leg
/// begins at that dropoff.
fn route_cost(order: &[usize], objects: &[DetectedObject], start: Point2D) -> f32 {
    let mut total = 0.0;
    let mut from = start;
    for &index in order {
        let position = objects[index].position();
        let dropoff = objects[index].dropoff_pose().position();
        total += from.distance(&position) + position.distance(&dropoff);
        from = dropoff;
    }
    total
}

/// All permutations of `0..n` in lexicographic order.
///
/// n stays at the required object count (3), so the factorial blowup is
/// a non-issue; a heuristic search only becomes worthwhile if the count
/// is ever made configurable upward.
fn lexicographic_permutations(n: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(n);
    let mut used = vec![false; n];
    extend_permutation(n, &mut current, &mut used, &mut result);
    result
}

fn extend_permutation(
    n: usize,
    current: &mut Vec<usize>,
    used: &mut [bool],
    result: &mut Vec<Vec<usize>>,
) {
    if current.len() == n {
        result.push(current.clone());
        return;
    }
    for i in 0..n {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(i);
        extend_permutation(n, current, used, result);
        current.pop();
        used[i] = false;
    }
}
