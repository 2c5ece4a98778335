//! # Anvesha: Search-and-Fetch Task Planning Core
//!
//! Planning core for a mobile manipulator that searches a room for a
//! small fixed set of objects and fetches them one by one. The crate
//! decides *where to look* and *which poses to drive to*; it never
//! plans trajectories, classifies objects, or plans grasps — those live
//! in external services reached through the traits in [`io`].
//!
//! ## Pipeline
//!
//! 1. [`scanner::SectorScanner`] sweeps the base and head through fixed
//!    angular sectors, polling perception and deduplicating sightings
//!    into the pending-pickup list until enough unique objects are
//!    found.
//! 2. [`optimizer::SequenceOptimizer`] reorders the pending list to
//!    minimize total travel through the pick/drop legs, then attaches
//!    collision-free standoff poses to each object using
//!    [`approach::standoff_poses`] and [`collision::is_colliding`].
//!
//! The pending list is owned by the calling task session and mutated in
//! place; no component retains references across invocations.
//!
//! ## Quick Start
//!
//! ```rust
//! use anvesha::approach::standoff_poses;
//! use anvesha::core::Point2D;
//!
//! // Ten candidate grasp standoffs around an object at (1.5, 0.2)
//! let centroid = Point2D::new(1.5, 0.2);
//! for pose in standoff_poses(centroid, 0.66, 10) {
//!     println!("candidate ({:.2}, {:.2}) heading {:.2}", pose.x, pose.y, pose.theta);
//! }
//! ```
//!
//! ## Coordinate Frame
//!
//! All coordinates follow the ROS REP-103 convention: X-forward,
//! Y-left, counter-clockwise positive rotation, meters and radians.
//!
//! ## Modules
//!
//! - [`core`]: geometry primitives (Point2D, Pose2D, angle helpers)
//! - [`config`]: TOML configuration with per-field defaults
//! - [`error`]: crate error type
//! - [`object`]: detection records and the deduplication relation
//! - [`io`]: traits for perception, obstacle map, actuation, and the
//!   debug pose sink
//! - [`scanner`]: sector-based search state machine
//! - [`approach`]: standoff pose sampling
//! - [`collision`]: disk-vs-cell and disk-vs-point tests
//! - [`optimizer`]: pickup sequencing and approach-pose annotation

pub mod approach;
pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod object;
pub mod optimizer;
pub mod scanner;

pub use config::{ApproachConfig, NavGoalIndex, PlannerConfig, ScanConfig, WaypointConfig};
pub use crate::core::{Point2D, Pose2D};
pub use error::{Result, TaskError};
pub use io::{Actuation, ApproachPoseSink, NullSink, ObstacleGrid, ObstacleSource, Perception};
pub use object::{DetectedObject, Detection};
pub use optimizer::SequenceOptimizer;
pub use scanner::{Outcome, SectorScanner};
