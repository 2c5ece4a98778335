//! External interface traits consumed by the planning core.
//!
//! The perception pipeline, obstacle map service, and base/head
//! actuation are collaborators outside this crate; the core talks to
//! them through these traits so that every component can be exercised
//! against scripted mocks.

use std::time::Duration;

use crate::core::{Point2D, Pose2D};
use crate::error::Result;
use crate::object::Detection;

/// Static obstacle map: occupied cell centers with a shared cell size.
///
/// Read-only to this crate; supplied by the map service.
#[derive(Clone, Debug, Default)]
pub struct ObstacleGrid {
    /// Centers of occupied cells
    pub cells: Vec<Point2D>,
    /// Cell width in meters
    pub cell_width: f32,
    /// Cell height in meters
    pub cell_height: f32,
}

impl ObstacleGrid {
    /// Grid with no occupied cells.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Source of labeled object detections.
pub trait Perception {
    /// Poll for a batch of detections with a bounded wait.
    ///
    /// `None` means nothing arrived within `timeout`; this is not an
    /// error and callers continue with an empty batch.
    fn poll_detections(&mut self, timeout: Duration) -> Option<Vec<Detection>>;
}

/// Source of the static obstacle grid.
pub trait ObstacleSource {
    /// Poll for the inflated obstacle grid with a bounded wait.
    ///
    /// Same timeout-tolerant contract as [`Perception::poll_detections`].
    fn obstacle_grid(&mut self, timeout: Duration) -> Option<ObstacleGrid>;
}

/// Base and head motion commands.
///
/// All commands are synchronous: they block until the motion completes
/// or fail with an error that the caller treats as unrecoverable.
pub trait Actuation {
    /// Take exclusive control of the robot for one scanning pass.
    fn acquire(&mut self) -> Result<()>;

    /// Return control. Must be callable exactly once per `acquire`.
    fn release(&mut self);

    /// Rotate the base by a yaw angle relative to its current heading
    /// (radians, CCW positive).
    fn rotate_base_relative(&mut self, yaw: f32) -> Result<()>;

    /// Move the head pan and tilt joints to absolute angles (radians).
    fn set_head_joint_angles(&mut self, pan: f32, tilt: f32) -> Result<()>;
}

/// Best-effort sink for generated approach poses.
///
/// Consumers are visualization tools; publishing must never affect
/// planning correctness and failures are silently ignored.
pub trait ApproachPoseSink {
    fn publish_approach_poses(&mut self, poses: &[Pose2D]);
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ApproachPoseSink for NullSink {
    fn publish_approach_poses(&mut self, _poses: &[Pose2D]) {}
}
