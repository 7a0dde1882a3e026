//! Static pose catalog.
//!
//! Each supported pose maps to a `PoseDefinition`: the joint angles that are
//! checked, their ideal ranges, canned feedback and step-by-step
//! instructions. Definitions are `'static` and shared read-only.
//!
//! Joint triples are `[A, vertex B, C]`. Some names describe intent rather
//! than anatomy (e.g. `spine` is measured shoulder-hip-knee); the triples
//! and ranges are kept as calibrated.

use yoga_models::{JointId as J, PoseId};

/// Body region an angle belongs to, selecting correction wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRegion {
    Arm,
    Leg,
    Spine,
    Torso,
}

impl BodyRegion {
    /// Correction for an angle measured below its ideal minimum.
    pub fn extend_correction(self, label: &str) -> String {
        match self {
            BodyRegion::Arm | BodyRegion::Leg => format!("Straighten your {} more", label),
            BodyRegion::Spine => "Keep your spine straighter".to_string(),
            BodyRegion::Torso => format!("Open up your {} more", label),
        }
    }

    /// Correction for an angle measured above its ideal maximum.
    pub fn relax_correction(self, label: &str) -> String {
        match self {
            BodyRegion::Arm => format!("Relax your {} slightly", label),
            BodyRegion::Leg => format!("Bend your {} more", label),
            BodyRegion::Spine => format!("Let your {} round slightly", label),
            BodyRegion::Torso => format!("Fold your {} a little more", label),
        }
    }
}

/// A named ideal-range check over three joints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSpec {
    /// Angle name (e.g. "left_arm")
    pub name: &'static str,
    /// Joint triple `[A, vertex, C]`
    pub joints: [J; 3],
    /// Ideal inclusive range in degrees `(min, max)`
    pub ideal: (f64, f64),
    pub region: BodyRegion,
}

impl AngleSpec {
    const fn new(name: &'static str, joints: [J; 3], ideal: (f64, f64), region: BodyRegion) -> Self {
        Self {
            name,
            joints,
            ideal,
            region,
        }
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.ideal.0
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.ideal.1
    }

    /// Whether a measured angle lies inside the ideal range.
    #[inline]
    pub fn contains(&self, degrees: f64) -> bool {
        self.min() <= degrees && degrees <= self.max()
    }

    /// Human-readable name ("left_arm" -> "left arm").
    pub fn label(&self) -> String {
        self.name.replace('_', " ")
    }

    /// Direction-specific correction, or `None` when in range.
    pub fn correction(&self, degrees: f64) -> Option<String> {
        if self.contains(degrees) {
            None
        } else if degrees < self.min() {
            Some(self.region.extend_correction(&self.label()))
        } else {
            Some(self.region.relax_correction(&self.label()))
        }
    }
}

/// Catalog entry for a pose.
#[derive(Debug, PartialEq)]
pub struct PoseDefinition {
    pub id: PoseId,
    /// Display name
    pub name: &'static str,
    /// Angle checks, in evaluation order
    pub angles: &'static [AngleSpec],
    /// Feedback when the composite score is good
    pub good: &'static str,
    /// Feedback when the composite score needs work
    pub improve: &'static str,
    /// Ordered instruction steps
    pub instructions: &'static [&'static str],
}

impl PoseDefinition {
    /// Definition for a known pose.
    pub fn get(id: PoseId) -> &'static PoseDefinition {
        match id {
            PoseId::Mountain => &MOUNTAIN,
            PoseId::Tree => &TREE,
            PoseId::Sukasana => &SUKASANA,
            PoseId::ChildsPose => &CHILDS_POSE,
            PoseId::Warrior1 => &WARRIOR_1,
            PoseId::Warrior2 => &WARRIOR_2,
            PoseId::DownwardDog => &DOWNWARD_DOG,
        }
    }

    /// Definition for a pose name, `None` when the name is not in the catalog.
    pub fn lookup(name: &str) -> Option<&'static PoseDefinition> {
        name.parse::<PoseId>().ok().map(Self::get)
    }

    /// Angle spec by name.
    pub fn angle(&self, name: &str) -> Option<&'static AngleSpec> {
        self.angles.iter().find(|spec| spec.name == name)
    }
}

use BodyRegion::{Arm, Leg, Spine, Torso};

static MOUNTAIN: PoseDefinition = PoseDefinition {
    id: PoseId::Mountain,
    name: "Mountain Pose (Tadasana)",
    angles: &[
        AngleSpec::new("left_arm", [J::LeftShoulder, J::LeftElbow, J::LeftWrist], (150.0, 180.0), Arm),
        AngleSpec::new("right_arm", [J::RightShoulder, J::RightElbow, J::RightWrist], (150.0, 180.0), Arm),
        AngleSpec::new("left_leg", [J::LeftHip, J::LeftKnee, J::LeftAnkle], (170.0, 180.0), Leg),
        AngleSpec::new("right_leg", [J::RightHip, J::RightKnee, J::RightAnkle], (170.0, 180.0), Leg),
        AngleSpec::new("spine", [J::RightShoulder, J::RightHip, J::RightKnee], (170.0, 180.0), Spine),
    ],
    good: "Great posture! Keep your spine straight and shoulders relaxed.",
    improve: "Try to straighten your spine and distribute weight evenly on both feet.",
    instructions: &[
        "Stand with feet hip-width apart",
        "Keep your spine straight and tall",
        "Relax your shoulders away from your ears",
        "Let your arms hang naturally at your sides",
        "Distribute weight evenly on both feet",
    ],
};

static WARRIOR_1: PoseDefinition = PoseDefinition {
    id: PoseId::Warrior1,
    name: "Warrior I (Virabhadrasana I)",
    angles: &[
        AngleSpec::new("front_knee", [J::LeftHip, J::LeftKnee, J::LeftAnkle], (80.0, 100.0), Leg),
        AngleSpec::new("back_leg", [J::RightHip, J::RightKnee, J::RightAnkle], (160.0, 180.0), Leg),
        AngleSpec::new("arms_up", [J::LeftShoulder, J::LeftElbow, J::LeftWrist], (160.0, 180.0), Arm),
        AngleSpec::new("spine", [J::RightShoulder, J::RightHip, J::RightKnee], (170.0, 180.0), Spine),
    ],
    good: "Excellent Warrior I! Your front knee is properly bent and back leg is strong.",
    improve: "Bend your front knee more and keep your back leg straight. Lift your arms higher.",
    instructions: &[
        "Step your left foot back about 3-4 feet",
        "Turn your left foot out 45 degrees",
        "Bend your right knee over your ankle",
        "Raise your arms overhead",
        "Keep your torso facing forward",
    ],
};

static DOWNWARD_DOG: PoseDefinition = PoseDefinition {
    id: PoseId::DownwardDog,
    name: "Downward Facing Dog (Adho Mukha Svanasana)",
    angles: &[
        AngleSpec::new("body_angle", [J::RightShoulder, J::RightHip, J::RightKnee], (130.0, 150.0), Torso),
        AngleSpec::new("arm_body", [J::RightWrist, J::RightElbow, J::RightShoulder], (150.0, 180.0), Arm),
        AngleSpec::new("leg_body", [J::RightShoulder, J::RightHip, J::RightAnkle], (120.0, 140.0), Leg),
    ],
    good: "Perfect downward dog! Your body forms a beautiful inverted V.",
    improve: "Press your hands firmly down and lift your hips higher to create a better V-shape.",
    instructions: &[
        "Start on hands and knees",
        "Tuck your toes under",
        "Lift your hips up and back",
        "Straighten your legs as much as possible",
        "Press your hands firmly into the ground",
    ],
};

static TREE: PoseDefinition = PoseDefinition {
    id: PoseId::Tree,
    name: "Tree Pose (Vrikshasana)",
    angles: &[
        AngleSpec::new("standing_leg", [J::RightHip, J::RightKnee, J::RightAnkle], (170.0, 180.0), Leg),
        AngleSpec::new("bent_knee", [J::LeftHip, J::LeftKnee, J::LeftAnkle], (80.0, 120.0), Leg),
        AngleSpec::new("arms", [J::LeftShoulder, J::LeftElbow, J::LeftWrist], (160.0, 180.0), Arm),
    ],
    good: "Beautiful tree pose! Great balance and alignment.",
    improve: "Focus on your balance and keep your standing leg straight.",
    instructions: &[
        "Stand on your right leg",
        "Place your left foot on your inner right thigh",
        "Press your foot into your leg and leg into your foot",
        "Bring your hands to prayer position at your chest",
        "Focus on a point ahead for balance",
    ],
};

static SUKASANA: PoseDefinition = PoseDefinition {
    id: PoseId::Sukasana,
    name: "Easy Pose (Sukasana)",
    angles: &[
        AngleSpec::new("spine", [J::RightShoulder, J::RightHip, J::RightKnee], (170.0, 180.0), Spine),
        AngleSpec::new("left_knee", [J::LeftHip, J::LeftKnee, J::LeftAnkle], (80.0, 120.0), Leg),
        AngleSpec::new("right_knee", [J::RightHip, J::RightKnee, J::RightAnkle], (80.0, 120.0), Leg),
        AngleSpec::new("shoulders", [J::LeftElbow, J::LeftShoulder, J::RightShoulder], (160.0, 180.0), Torso),
    ],
    good: "Perfect sukasana! Your spine is straight and you look comfortable.",
    improve: "Sit up straighter and relax your shoulders. Keep your spine tall.",
    instructions: &[
        "Sit cross-legged on the floor",
        "Keep your spine straight and tall",
        "Rest your hands on your knees",
        "Relax your shoulders",
        "Breathe deeply and calmly",
    ],
};

static CHILDS_POSE: PoseDefinition = PoseDefinition {
    id: PoseId::ChildsPose,
    name: "Child's Pose (Balasana)",
    angles: &[
        AngleSpec::new("hip_fold", [J::RightShoulder, J::RightHip, J::RightKnee], (40.0, 70.0), Torso),
        AngleSpec::new("knee_bend", [J::RightHip, J::RightKnee, J::RightAnkle], (30.0, 60.0), Leg),
        AngleSpec::new("spine_curve", [J::Nose, J::RightShoulder, J::RightHip], (120.0, 150.0), Spine),
        AngleSpec::new("arms", [J::RightShoulder, J::RightElbow, J::RightWrist], (160.0, 180.0), Arm),
    ],
    good: "Wonderful child's pose! Very relaxing and restorative.",
    improve: "Sink your hips back more and extend your arms forward.",
    instructions: &[
        "Start on your hands and knees",
        "Sit back on your heels",
        "Fold forward, bringing forehead to the mat",
        "Extend your arms forward or by your sides",
        "Breathe deeply and relax",
    ],
};

static WARRIOR_2: PoseDefinition = PoseDefinition {
    id: PoseId::Warrior2,
    name: "Warrior II (Virabhadrasana II)",
    angles: &[
        AngleSpec::new("front_knee", [J::LeftHip, J::LeftKnee, J::LeftAnkle], (80.0, 100.0), Leg),
        AngleSpec::new("back_leg", [J::RightHip, J::RightKnee, J::RightAnkle], (160.0, 180.0), Leg),
        AngleSpec::new("torso", [J::RightShoulder, J::RightHip, J::RightKnee], (170.0, 180.0), Torso),
        AngleSpec::new("arms", [J::LeftShoulder, J::LeftElbow, J::LeftWrist], (160.0, 180.0), Arm),
    ],
    good: "Excellent Warrior II! Strong and stable with good alignment.",
    improve: "Bend your front knee more and keep your torso upright. Extend arms parallel to the ground.",
    instructions: &[
        "Step your feet wide apart",
        "Turn your right foot out 90 degrees",
        "Turn your left foot in 15 degrees",
        "Bend your right knee over your ankle",
        "Extend your arms parallel to the ground",
    ],
};
