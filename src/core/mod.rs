//! Fundamental geometry types shared by all planning components.

pub mod math;
pub mod point;
pub mod pose;

pub use math::normalize_angle;
pub use point::Point2D;
pub use pose::Pose2D;
