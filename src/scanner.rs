//! Sector-based search loop.
//!
//! Sweeps the base and head through a fixed sequence of angular
//! sectors, polls perception in each one, and deduplicates sightings
//! into the pending-pickup list until enough unique objects are found
//! or the sectors are exhausted.

use crate::config::{ScanConfig, WaypointConfig};
use crate::core::math::deg_to_rad;
use crate::error::Result;
use crate::io::{Actuation, Perception};
use crate::object::{Detection, DetectedObject};

/// Terminal signal of one task step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The step finished with its goal met
    Succeeded,
    /// The step ran out of options without meeting its goal
    Failed,
    /// An unrecoverable control-path problem interrupted the step
    Aborted,
}

/// Exclusive hold on the robot control interface for one scanning pass.
///
/// Releases on drop, so every exit path (success, failure, abort,
/// unwind) returns control.
struct ControlSession<'a, A: Actuation> {
    actuation: &'a mut A,
}

impl<'a, A: Actuation> ControlSession<'a, A> {
    fn acquire(actuation: &'a mut A) -> Result<Self> {
        actuation.acquire()?;
        tracing::debug!("Robot control session acquired");
        Ok(Self { actuation })
    }

    fn rotate_base_relative(&mut self, yaw: f32) -> Result<()> {
        self.actuation.rotate_base_relative(yaw)
    }

    fn set_head_joint_angles(&mut self, pan: f32, tilt: f32) -> Result<()> {
        self.actuation.set_head_joint_angles(pan, tilt)
    }
}

impl<A: Actuation> Drop for ControlSession<'_, A> {
    fn drop(&mut self) {
        self.actuation.release();
        tracing::debug!("Robot control session released");
    }
}

/// Sector scanner: drives the search sweep and fills the pending list.
pub struct SectorScanner {
    config: ScanConfig,
}

impl SectorScanner {
    /// Create a scanner with configuration.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Run one scanning pass.
    ///
    /// Mutates `pending` in place. On [`Outcome::Succeeded`] it holds
    /// exactly `required_count` mutually-distinct objects; on
    /// [`Outcome::Failed`] fewer, after every sector was examined; on
    /// [`Outcome::Aborted`] whatever partial state it had when the
    /// actuation interface failed.
    pub fn run<P, A>(
        &self,
        perception: &mut P,
        actuation: &mut A,
        waypoints: &WaypointConfig,
        pending: &mut Vec<DetectedObject>,
    ) -> Outcome
    where
        P: Perception,
        A: Actuation,
    {
        let mut session = match ControlSession::acquire(actuation) {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Could not acquire robot control: {}", e);
                return Outcome::Aborted;
            }
        };

        // First sector uses the robot's current heading: tilt the head
        // down without rotating the base.
        if let Err(e) = self.look_new_sector(&mut session, false) {
            tracing::error!("Head motion rejected: {}", e);
            return Outcome::Aborted;
        }

        let mut sector_index = 0usize;
        loop {
            match perception.poll_detections(self.config.poll_timeout()) {
                Some(batch) => {
                    tracing::info!("Found {} objects in vision", batch.len());
                    self.absorb_batch(batch, waypoints, pending);
                }
                None => {
                    tracing::warn!(
                        "Timeout reached. No detections within {:.1}s",
                        self.config.poll_timeout_secs
                    );
                }
            }

            if pending.len() == self.config.required_count {
                tracing::info!(
                    "Scan succeeded with {} unique objects after {} sector advances",
                    pending.len(),
                    sector_index
                );
                return Outcome::Succeeded;
            }
            if sector_index == self.config.sector_limit {
                tracing::warn!(
                    "All sectors examined, only {} of {} objects found",
                    pending.len(),
                    self.config.required_count
                );
                return Outcome::Failed;
            }

            if let Err(e) = self.look_new_sector(&mut session, true) {
                tracing::error!("Motion command rejected advancing sector: {}", e);
                return Outcome::Aborted;
            }
            sector_index += 1;
            tracing::debug!("Advanced to sector {}", sector_index);
        }
    }

    /// Fold one detection batch into the pending list, skipping
    /// duplicates and stopping once the required count is reached.
    fn absorb_batch(
        &self,
        batch: Vec<Detection>,
        waypoints: &WaypointConfig,
        pending: &mut Vec<DetectedObject>,
    ) {
        for detection in batch {
            if pending.len() >= self.config.required_count {
                break;
            }
            if pending
                .iter()
                .any(|object| object.matches_detection(&detection, self.config.dedup_tolerance))
            {
                tracing::debug!(
                    "Duplicate sighting of '{}' at ({:.2}, {:.2}), discarded",
                    detection.class_label,
                    detection.centroid.x,
                    detection.centroid.y
                );
                continue;
            }
            let Some(dropoff) = waypoints.dropoff(&detection.class_label) else {
                tracing::warn!(
                    "No dropoff pose configured for class '{}', skipping",
                    detection.class_label
                );
                continue;
            };
            tracing::info!(
                "New object '{}' at ({:.2}, {:.2})",
                detection.class_label,
                detection.centroid.x,
                detection.centroid.y
            );
            pending.push(DetectedObject::new(detection, dropoff));
        }
    }

    /// Point the robot at the next sector: optionally rotate the base
    /// by the configured yaw increment, then re-tilt the head.
    fn look_new_sector<A: Actuation>(
        &self,
        session: &mut ControlSession<'_, A>,
        move_base: bool,
    ) -> Result<()> {
        if move_base {
            session.rotate_base_relative(deg_to_rad(self.config.sector_yaw_deg))?;
        }
        session.set_head_joint_angles(
            deg_to_rad(self.config.head_pan_deg),
            deg_to_rad(self.config.head_tilt_deg),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point2D;
    use crate::error::TaskError;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Perception that replays a fixed script of poll results.
    struct ScriptedPerception {
        batches: VecDeque<Option<Vec<Detection>>>,
        polls: usize,
    }

    impl ScriptedPerception {
        fn new(batches: Vec<Option<Vec<Detection>>>) -> Self {
            Self {
                batches: batches.into(),
                polls: 0,
            }
        }
    }

    impl Perception for ScriptedPerception {
        fn poll_detections(&mut self, _timeout: Duration) -> Option<Vec<Detection>> {
            self.polls += 1;
            self.batches.pop_front().unwrap_or(None)
        }
    }

    /// Actuation that records the session lifecycle and motion calls.
    #[derive(Default)]
    struct RecordingActuation {
        acquired: usize,
        released: usize,
        rotations: Vec<f32>,
        head_moves: usize,
        fail_rotation_at: Option<usize>,
    }

    impl Actuation for RecordingActuation {
        fn acquire(&mut self) -> Result<()> {
            self.acquired += 1;
            Ok(())
        }

        fn release(&mut self) {
            self.released += 1;
        }

        fn rotate_base_relative(&mut self, yaw: f32) -> Result<()> {
            if self.fail_rotation_at == Some(self.rotations.len()) {
                return Err(TaskError::Actuation("rotation rejected".into()));
            }
            self.rotations.push(yaw);
            Ok(())
        }

        fn set_head_joint_angles(&mut self, _pan: f32, _tilt: f32) -> Result<()> {
            self.head_moves += 1;
            Ok(())
        }
    }

    fn waypoints_with_dropoffs(classes: &[&str]) -> WaypointConfig {
        let toml_dropoffs: String = classes
            .iter()
            .map(|c| format!("{} = {{ x = 5.0, y = 5.0 }}\n", c))
            .collect();
        let doc = format!("[dropoffs]\n{}", toml_dropoffs);
        toml::from_str(&doc).unwrap()
    }

    fn detection(label: &str, x: f32, y: f32) -> Detection {
        Detection::in_map_frame(label, Point2D::new(x, y))
    }

    #[test]
    fn test_one_object_per_sector_succeeds() {
        let scanner = SectorScanner::new(ScanConfig::default());
        let mut perception = ScriptedPerception::new(vec![
            Some(vec![detection("cup", 1.0, 0.0)]),
            Some(vec![detection("book", 0.0, 1.0)]),
            Some(vec![detection("ball", -1.0, 0.0)]),
        ]);
        let mut actuation = RecordingActuation::default();
        let waypoints = waypoints_with_dropoffs(&["cup", "book", "ball"]);
        let mut pending = Vec::new();

        let outcome = scanner.run(&mut perception, &mut actuation, &waypoints, &mut pending);

        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(pending.len(), 3);
        // All mutually distinct
        for i in 0..pending.len() {
            for j in (i + 1)..pending.len() {
                assert!(!pending[i].same_object(&pending[j], 0.1));
            }
        }
        // Two base rotations: sectors 1 and 2 (sector 0 keeps the heading)
        assert_eq!(actuation.rotations.len(), 2);
        assert_eq!(actuation.acquired, 1);
        assert_eq!(actuation.released, 1);
    }

    #[test]
    fn test_same_object_every_sector_fails() {
        let scanner = SectorScanner::new(ScanConfig::default());
        // The same cup shows up in every sector, slightly jittered
        let mut perception = ScriptedPerception::new(vec![
            Some(vec![detection("cup", 1.0, 0.0)]),
            Some(vec![detection("cup", 1.02, 0.0)]),
            Some(vec![detection("cup", 0.98, 0.01)]),
            Some(vec![detection("cup", 1.0, 0.03)]),
        ]);
        let mut actuation = RecordingActuation::default();
        let waypoints = waypoints_with_dropoffs(&["cup"]);
        let mut pending = Vec::new();

        let outcome = scanner.run(&mut perception, &mut actuation, &waypoints, &mut pending);

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(pending.len(), 1);
        assert_eq!(actuation.released, 1);
    }

    #[test]
    fn test_empty_polls_terminate_within_sector_limit() {
        let scanner = SectorScanner::new(ScanConfig::default());
        let mut perception = ScriptedPerception::new(vec![]);
        let mut actuation = RecordingActuation::default();
        let waypoints = WaypointConfig::default();
        let mut pending = Vec::new();

        let outcome = scanner.run(&mut perception, &mut actuation, &waypoints, &mut pending);

        assert_eq!(outcome, Outcome::Failed);
        assert!(pending.is_empty());
        // One poll per sector: initial heading plus sector_limit advances
        assert_eq!(perception.polls, 4);
        assert_eq!(actuation.rotations.len(), 3);
    }

    #[test]
    fn test_rotation_failure_aborts_and_releases() {
        let scanner = SectorScanner::new(ScanConfig::default());
        let mut perception = ScriptedPerception::new(vec![
            Some(vec![detection("cup", 1.0, 0.0)]),
            Some(vec![detection("book", 0.0, 1.0)]),
        ]);
        let mut actuation = RecordingActuation {
            fail_rotation_at: Some(0),
            ..Default::default()
        };
        let waypoints = waypoints_with_dropoffs(&["cup", "book"]);
        let mut pending = Vec::new();

        let outcome = scanner.run(&mut perception, &mut actuation, &waypoints, &mut pending);

        assert_eq!(outcome, Outcome::Aborted);
        // Partial state is left as-is
        assert_eq!(pending.len(), 1);
        assert_eq!(actuation.acquired, 1);
        assert_eq!(actuation.released, 1);
    }

    #[test]
    fn test_batch_consumption_stops_at_required_count() {
        let scanner = SectorScanner::new(ScanConfig::default());
        // Four unique objects in a single batch; only three may be taken
        let mut perception = ScriptedPerception::new(vec![Some(vec![
            detection("cup", 1.0, 0.0),
            detection("book", 0.0, 1.0),
            detection("ball", -1.0, 0.0),
            detection("plant", 0.0, -1.0),
        ])]);
        let mut actuation = RecordingActuation::default();
        let waypoints = waypoints_with_dropoffs(&["cup", "book", "ball", "plant"]);
        let mut pending = Vec::new();

        let outcome = scanner.run(&mut perception, &mut actuation, &waypoints, &mut pending);

        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(pending.len(), 3);
        assert!(pending.iter().all(|o| o.class_label() != "plant"));
    }

    #[test]
    fn test_unknown_class_is_skipped() {
        let scanner = SectorScanner::new(ScanConfig::default());
        let mut perception = ScriptedPerception::new(vec![Some(vec![
            detection("mystery", 1.0, 0.0),
            detection("cup", 0.0, 1.0),
        ])]);
        let mut actuation = RecordingActuation::default();
        // No dropoff configured for "mystery"
        let waypoints = waypoints_with_dropoffs(&["cup"]);
        let mut pending = Vec::new();

        scanner.run(&mut perception, &mut actuation, &waypoints, &mut pending);

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].class_label(), "cup");
    }
}
