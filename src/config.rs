//! Configuration loading for the planning core.

use crate::core::{Point2D, Pose2D};
use crate::error::{Result, TaskError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize, Default)]
pub struct PlannerConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub approach: ApproachConfig,
    #[serde(default)]
    pub waypoints: WaypointConfig,
}

/// Sector scanning parameters
#[derive(Clone, Debug, Deserialize)]
pub struct ScanConfig {
    /// Number of unique objects required before scanning succeeds
    #[serde(default = "default_required_count")]
    pub required_count: usize,

    /// Number of sector advances before scanning gives up
    #[serde(default = "default_sector_limit")]
    pub sector_limit: usize,

    /// Relative base rotation between sectors (degrees)
    #[serde(default = "default_sector_yaw_deg")]
    pub sector_yaw_deg: f32,

    /// Head pan joint angle while scanning a sector (degrees)
    #[serde(default = "default_head_pan_deg")]
    pub head_pan_deg: f32,

    /// Head tilt joint angle while scanning a sector (degrees)
    #[serde(default = "default_head_tilt_deg")]
    pub head_tilt_deg: f32,

    /// Bounded wait for one perception poll (seconds)
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: f32,

    /// Centroid distance below which two same-class sightings are one
    /// object (meters). Provisional value; tune against the deployed
    /// perception pipeline.
    #[serde(default = "default_dedup_tolerance")]
    pub dedup_tolerance: f32,
}

impl ScanConfig {
    /// Perception poll timeout as a Duration
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs_f32(self.poll_timeout_secs)
    }
}

/// Approach-pose generation and collision parameters
#[derive(Clone, Debug, Deserialize)]
pub struct ApproachConfig {
    /// Physical robot footprint radius (meters)
    #[serde(default = "default_robot_radius")]
    pub robot_radius: f32,

    /// Extra clearance beyond the robot radius (meters)
    #[serde(default = "default_radius_buffer")]
    pub radius_buffer: f32,

    /// Distance from an object centroid at which standoff poses are
    /// sampled (meters)
    #[serde(default = "default_standoff_radius")]
    pub standoff_radius: f32,

    /// Number of candidate poses sampled on the standoff circle
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Bounded wait for one obstacle map poll (seconds)
    #[serde(default = "default_grid_timeout_secs")]
    pub grid_timeout_secs: f32,
}

impl ApproachConfig {
    /// Collision disk radius: robot radius plus clearance buffer
    pub fn inflated_radius(&self) -> f32 {
        self.robot_radius + self.radius_buffer
    }

    /// Obstacle map poll timeout as a Duration
    pub fn grid_timeout(&self) -> Duration {
        Duration::from_secs_f32(self.grid_timeout_secs)
    }
}

/// A named pose in the map frame, as written in the waypoint file
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PoseEntry {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub theta: f32,
}

impl PoseEntry {
    /// The entry as a pose
    pub fn pose(&self) -> Pose2D {
        Pose2D::new(self.x, self.y, self.theta)
    }
}

/// Named start locations and per-class dropoff poses
#[derive(Clone, Debug, Deserialize, Default)]
pub struct WaypointConfig {
    /// First search location
    #[serde(default)]
    pub search_one: Point2D,

    /// Second search location
    #[serde(default)]
    pub search_two: Point2D,

    /// Dropoff pose per object class label
    #[serde(default)]
    pub dropoffs: HashMap<String, PoseEntry>,
}

impl WaypointConfig {
    /// Resolve the start location for an optimization pass.
    ///
    /// The goal index names the search point the robot is heading to
    /// next; the scan that filled the pending list ran from the opposite
    /// one, so that is where the pickup route begins.
    pub fn start_point(&self, goal: NavGoalIndex) -> Point2D {
        match goal {
            NavGoalIndex::One => self.search_two,
            NavGoalIndex::Two => self.search_one,
        }
    }

    /// Look up the dropoff pose for an object class
    pub fn dropoff(&self, class_label: &str) -> Option<Pose2D> {
        self.dropoffs.get(class_label).map(|entry| entry.pose())
    }
}

/// Navigation-goal index selecting one of the two search waypoints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavGoalIndex {
    One,
    Two,
}

impl NavGoalIndex {
    /// Parse the numeric index used by the task orchestrator
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            1 => Ok(NavGoalIndex::One),
            2 => Ok(NavGoalIndex::Two),
            other => Err(TaskError::Config(format!(
                "Unknown navigation goal index: {}",
                other
            ))),
        }
    }
}

// Default value functions

fn default_required_count() -> usize {
    3
}
fn default_sector_limit() -> usize {
    3
}
fn default_sector_yaw_deg() -> f32 {
    90.0
}
fn default_head_pan_deg() -> f32 {
    0.0
}
fn default_head_tilt_deg() -> f32 {
    -45.0
}
fn default_poll_timeout_secs() -> f32 {
    2.0
}
fn default_dedup_tolerance() -> f32 {
    0.1
}

fn default_robot_radius() -> f32 {
    0.22
}
fn default_radius_buffer() -> f32 {
    0.22
}
fn default_standoff_radius() -> f32 {
    // Three robot radii gives the arm room to reach past the footprint
    0.66
}
fn default_sample_count() -> usize {
    10
}
fn default_grid_timeout_secs() -> f32 {
    2.0
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            required_count: default_required_count(),
            sector_limit: default_sector_limit(),
            sector_yaw_deg: default_sector_yaw_deg(),
            head_pan_deg: default_head_pan_deg(),
            head_tilt_deg: default_head_tilt_deg(),
            poll_timeout_secs: default_poll_timeout_secs(),
            dedup_tolerance: default_dedup_tolerance(),
        }
    }
}

impl Default for ApproachConfig {
    fn default() -> Self {
        Self {
            robot_radius: default_robot_radius(),
            radius_buffer: default_radius_buffer(),
            standoff_radius: default_standoff_radius(),
            sample_count: default_sample_count(),
            grid_timeout_secs: default_grid_timeout_secs(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TaskError::Config(format!("Failed to read config file: {}", e)))?;
        let config: PlannerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
