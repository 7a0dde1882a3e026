//! Body landmark definitions.
//!
//! Joints use the 33-point full-body landmark layout emitted by BlazePose
//! style detectors:
//!
//! - 0-10: Face (nose, eyes, ears, mouth)
//! - 11-22: Upper body (shoulders, elbows, wrists, hands)
//! - 23-32: Lower body (hips, knees, ankles, heels, feet)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Identifier of a single tracked body landmark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum JointId {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl JointId {
    /// Number of landmarks in the layout.
    pub const COUNT: usize = 33;

    /// All landmarks in index order.
    pub const ALL: [JointId; Self::COUNT] = [
        JointId::Nose,
        JointId::LeftEyeInner,
        JointId::LeftEye,
        JointId::LeftEyeOuter,
        JointId::RightEyeInner,
        JointId::RightEye,
        JointId::RightEyeOuter,
        JointId::LeftEar,
        JointId::RightEar,
        JointId::MouthLeft,
        JointId::MouthRight,
        JointId::LeftShoulder,
        JointId::RightShoulder,
        JointId::LeftElbow,
        JointId::RightElbow,
        JointId::LeftWrist,
        JointId::RightWrist,
        JointId::LeftPinky,
        JointId::RightPinky,
        JointId::LeftIndex,
        JointId::RightIndex,
        JointId::LeftThumb,
        JointId::RightThumb,
        JointId::LeftHip,
        JointId::RightHip,
        JointId::LeftKnee,
        JointId::RightKnee,
        JointId::LeftAnkle,
        JointId::RightAnkle,
        JointId::LeftHeel,
        JointId::RightHeel,
        JointId::LeftFootIndex,
        JointId::RightFootIndex,
    ];

    /// Numeric landmark index as reported by the detector.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a landmark by detector index.
    pub fn from_index(index: usize) -> Result<Self, JointIndexError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(JointIndexError(index))
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<usize> for JointId {
    type Error = JointIndexError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Landmark index out of range: {0}")]
pub struct JointIndexError(pub usize);

/// A detected joint in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Joint {
    pub id: JointId,
    /// Horizontal pixel coordinate
    pub x: i32,
    /// Vertical pixel coordinate
    pub y: i32,
    /// Visibility confidence (0.0-1.0)
    pub visibility: f32,
}

impl Joint {
    pub fn new(id: JointId, x: i32, y: i32, visibility: f32) -> Self {
        Self {
            id,
            x,
            y,
            visibility,
        }
    }

    /// Position as floating point (x, y).
    #[inline]
    pub fn point(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

/// Detector output for one landmark, normalized to the frame (0.0-1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

fn default_visibility() -> f32 {
    1.0
}

impl NormalizedLandmark {
    /// Convert to pixel space for a frame of the given size.
    ///
    /// Coordinates are truncated toward zero, matching how the detector's
    /// overlay code places landmarks.
    pub fn to_joint(&self, id: JointId, frame_width: u32, frame_height: u32) -> Joint {
        let x = (self.x * frame_width as f32) as i32;
        let y = (self.y * frame_height as f32) as i32;
        Joint::new(id, x, y, self.visibility)
    }
}

/// The joints detected in a single frame.
///
/// May be partial: a missing joint only reduces which angles can be measured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JointSet {
    joints: BTreeMap<JointId, Joint>,
}

impl JointSet {
    /// Create an empty joint set (no body detected).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a joint set from normalized landmarks listed in detector order.
    ///
    /// Landmarks past the end of the layout are ignored.
    pub fn from_normalized(
        landmarks: &[NormalizedLandmark],
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        landmarks
            .iter()
            .zip(JointId::ALL)
            .map(|(lm, id)| lm.to_joint(id, frame_width, frame_height))
            .collect()
    }

    /// Insert or replace a joint.
    pub fn insert(&mut self, joint: Joint) {
        self.joints.insert(joint.id, joint);
    }

    pub fn get(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(&id)
    }

    pub fn contains(&self, id: JointId) -> bool {
        self.joints.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Joint> {
        self.joints.values()
    }
}

impl FromIterator<Joint> for JointSet {
    fn from_iter<I: IntoIterator<Item = Joint>>(iter: I) -> Self {
        let mut set = JointSet::new();
        for joint in iter {
            set.insert(joint);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_index_roundtrip() {
        for (i, id) in JointId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(JointId::from_index(i).unwrap(), *id);
        }
        assert!(JointId::from_index(33).is_err());
        assert_eq!(JointId::try_from(11).unwrap(), JointId::LeftShoulder);
    }

    #[test]
    fn test_normalized_to_pixels() {
        let lm = NormalizedLandmark {
            x: 0.5,
            y: 0.25,
            visibility: 0.9,
        };
        let joint = lm.to_joint(JointId::Nose, 640, 480);
        assert_eq!((joint.x, joint.y), (320, 120));
        assert!((joint.visibility - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_normalized_assigns_ids_in_order() {
        let landmarks = vec![
            NormalizedLandmark { x: 0.1, y: 0.1, visibility: 0.9 },
            NormalizedLandmark { x: 0.2, y: 0.2, visibility: 0.1 },
            NormalizedLandmark { x: 0.3, y: 0.3, visibility: 0.6 },
        ];

        let set = JointSet::from_normalized(&landmarks, 100, 100);
        assert_eq!(set.len(), 3);
        assert!(set.contains(JointId::Nose));
        assert!(set.contains(JointId::LeftEyeInner));
        assert_eq!(set.get(JointId::LeftEye).map(|j| j.x), Some(30));
        assert!(!set.contains(JointId::LeftShoulder));
    }

    #[test]
    fn test_from_normalized_ignores_extra_landmarks() {
        let landmarks = vec![NormalizedLandmark { x: 0.5, y: 0.5, visibility: 1.0 }; 40];
        let set = JointSet::from_normalized(&landmarks, 10, 10);
        assert_eq!(set.len(), JointId::COUNT);
    }

    #[test]
    fn test_joint_set_serializes_as_map() {
        let set: JointSet = [Joint::new(JointId::LeftShoulder, 10, 20, 1.0)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["left_shoulder"]["x"], 10);
    }
}
