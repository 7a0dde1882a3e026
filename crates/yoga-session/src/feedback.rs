//! When to speak feedback.
//!
//! The decision is a pure function of the previous [`SessionState`], the
//! frame's analysis and the clock, so it can be tested without a loop.

use std::time::Instant;

use yoga_models::AnalysisResult;

use crate::config::FeedbackPolicy;

/// Per-session state carried between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Index into the practice sequence
    pub pose_index: usize,
    /// When feedback last fired; `None` until it first does
    pub last_feedback_at: Option<Instant>,
    /// Score announced by the last feedback
    pub last_score: u8,
}

impl SessionState {
    pub fn new(pose_index: usize) -> Self {
        Self {
            pose_index,
            ..Self::default()
        }
    }

    /// State after switching to another pose. Feedback may fire immediately.
    pub fn switch_pose(self, pose_index: usize) -> Self {
        Self {
            pose_index,
            last_feedback_at: None,
            ..self
        }
    }
}

/// Feedback selected for speaking.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackDecision {
    pub score: u8,
    pub feedback: String,
    pub corrections: Vec<String>,
}

/// Decide whether `result` should be spoken.
///
/// Returns the updated state together with the decision. The state only
/// changes when feedback fires.
pub fn decide_feedback(
    state: SessionState,
    result: &AnalysisResult,
    now: Instant,
    policy: &FeedbackPolicy,
) -> (SessionState, Option<FeedbackDecision>) {
    if !result.pose_detected {
        return (state, None);
    }

    let interval_elapsed = match state.last_feedback_at {
        Some(last) => now.saturating_duration_since(last) > policy.interval,
        None => true,
    };
    if !interval_elapsed {
        return (state, None);
    }

    let changed = result.score.abs_diff(state.last_score) > policy.score_change_threshold;
    let praiseworthy = result.score > policy.praise_threshold;
    if !changed && !praiseworthy {
        return (state, None);
    }

    let next = SessionState {
        last_feedback_at: Some(now),
        last_score: result.score,
        ..state
    };
    let decision = FeedbackDecision {
        score: result.score,
        feedback: result.feedback.clone(),
        corrections: result.corrections.clone(),
    };
    (next, Some(decision))
}
