//! Detected-object records and the identity relation used to
//! deduplicate sightings.

use crate::core::{Point2D, Pose2D};

/// One labeled sighting published by the perception pipeline.
#[derive(Clone, Debug)]
pub struct Detection {
    /// Category identifier from the classifier
    pub class_label: String,
    /// Object centroid in the given frame
    pub centroid: Point2D,
    /// Reference frame id, e.g. "map"
    pub frame: String,
}

impl Detection {
    /// Create a detection in the map frame.
    pub fn in_map_frame(class_label: impl Into<String>, centroid: Point2D) -> Self {
        Self {
            class_label: class_label.into(),
            centroid,
            frame: "map".to_string(),
        }
    }
}

/// A confirmed-unique object awaiting pickup sequencing.
///
/// Created when a sighting passes the uniqueness test against all
/// currently pending objects. The approach-pose list starts empty and
/// is append-only; entries are never removed or reordered.
#[derive(Clone, Debug)]
pub struct DetectedObject {
    class_label: String,
    position: Point2D,
    frame: String,
    dropoff_pose: Pose2D,
    approach_poses: Vec<Pose2D>,
}

impl DetectedObject {
    /// Promote a detection with its resolved per-class dropoff pose.
    pub fn new(detection: Detection, dropoff_pose: Pose2D) -> Self {
        Self {
            class_label: detection.class_label,
            position: detection.centroid,
            frame: detection.frame,
            dropoff_pose,
            approach_poses: Vec::new(),
        }
    }

    /// Category identifier from the classifier
    pub fn class_label(&self) -> &str {
        &self.class_label
    }

    /// Object centroid
    pub fn position(&self) -> Point2D {
        self.position
    }

    /// Reference frame of the centroid
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Fixed target pose where the object must be placed
    pub fn dropoff_pose(&self) -> Pose2D {
        self.dropoff_pose
    }

    /// Valid standoff poses found so far, in generation order
    pub fn approach_poses(&self) -> &[Pose2D] {
        &self.approach_poses
    }

    /// Append one valid standoff pose.
    pub fn add_approach_pose(&mut self, pose: Pose2D) {
        self.approach_poses.push(pose);
    }

    /// Whether `other` refers to the same physical object: class labels
    /// equal and centroids within `tolerance` meters. Class mismatch is
    /// always distinct, regardless of distance.
    pub fn same_object(&self, other: &DetectedObject, tolerance: f32) -> bool {
        self.class_label == other.class_label
            && self.position.distance(&other.position) < tolerance
    }

    /// The same identity relation against a raw sighting, used before
    /// promotion to avoid constructing a duplicate record.
    pub fn matches_detection(&self, detection: &Detection, tolerance: f32) -> bool {
        self.class_label == detection.class_label
            && self.position.distance(&detection.centroid) < tolerance
    }
}
