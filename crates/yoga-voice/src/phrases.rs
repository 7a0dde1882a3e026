//! Spoken phrasing for coaching feedback.

use yoga_models::ScoreBand;

pub const SESSION_WELCOME: &str = "Welcome to your AI yoga instructor! \
    I'll guide you through poses and help improve your form. \
    Remember to breathe deeply and listen to your body. \
    Let's begin!";

pub const SESSION_CLOSING: &str = "Great session! \
    Remember, yoga is about progress, not perfection. \
    Take a moment to appreciate your practice today. Namaste!";

/// Score announcement prefixed by an encouragement for the score's band.
pub fn feedback(feedback: &str, score: u8) -> String {
    let opener = match ScoreBand::from_score(score) {
        ScoreBand::Good => "Great!",
        ScoreBand::Fair => "Good effort!",
        ScoreBand::Poor => "Keep practicing!",
    };
    format!("{} Your score is {}. {}", opener, score, feedback)
}

/// A single utterance covering every correction, or `None` when there are none.
pub fn corrections(corrections: &[String]) -> Option<String> {
    match corrections {
        [] => None,
        [only] => Some(format!("Try this: {}", only)),
        many => Some(format!("Here are some adjustments: {}", many.join(". "))),
    }
}

/// Pose introduction followed by numbered steps.
pub fn pose_intro(pose_name: &str, instructions: &[&str]) -> String {
    let mut text = format!("Let's practice {}. Here are the steps:", pose_name);
    for (i, step) in instructions.iter().enumerate() {
        text.push_str(&format!(" Step {}: {}", i + 1, step));
        if !step.ends_with(['.', '!', '?']) {
            text.push('.');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_bands() {
        assert_eq!(feedback("Nice.", 85), "Great! Your score is 85. Nice.");
        assert_eq!(feedback("Ok.", 60), "Good effort! Your score is 60. Ok.");
        assert!(feedback("Hm.", 59).starts_with("Keep practicing!"));
    }

    #[test]
    fn test_corrections_phrasing() {
        assert_eq!(corrections(&[]), None);
        assert_eq!(
            corrections(&["Bend your front knee more".to_string()]).as_deref(),
            Some("Try this: Bend your front knee more")
        );
        let many = vec!["Straighten your back leg more".to_string(), "Raise arms".to_string()];
        assert_eq!(
            corrections(&many).as_deref(),
            Some("Here are some adjustments: Straighten your back leg more. Raise arms")
        );
    }

    #[test]
    fn test_pose_intro_numbers_steps() {
        let text = pose_intro("Tree Pose", &["Stand tall", "Lift one foot."]);
        assert_eq!(
            text,
            "Let's practice Tree Pose. Here are the steps: Step 1: Stand tall. Step 2: Lift one foot."
        );
    }
}
