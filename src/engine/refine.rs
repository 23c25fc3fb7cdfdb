use std::collections::HashSet;

use crate::models::{Costume, Direction, QuizResponse, VibeGoal};

/// Niche target bounds on the 1-7 scale
const NICHE_MIN: u8 = 1;
const NICHE_MAX: u8 = 7;
/// How far a niche-shifting direction moves the target
const NICHE_SHIFT: u8 = 2;

/// Additive score bonus per tag shared with the source costume
pub const SIMILARITY_TAG_BONUS: f64 = 0.35;

/// Derives the adjusted request for a "find more like this" call. The
/// input is cloned, never mutated; no direction means pass-through.
pub fn apply_direction(quiz: &QuizResponse, direction: Option<Direction>) -> QuizResponse {
    let mut adjusted = quiz.clone();
    match direction {
        Some(Direction::MoreRecognizable) => {
            adjusted.niche_target = adjusted.niche_target.saturating_sub(NICHE_SHIFT).max(NICHE_MIN);
        }
        Some(Direction::Weirder) => {
            adjusted.niche_target = (adjusted.niche_target + NICHE_SHIFT).min(NICHE_MAX);
        }
        Some(Direction::Easier) => {
            if let Some(down) = adjusted.effort.step_down() {
                adjusted.effort = down;
            }
        }
        Some(Direction::Hotter) => ensure_goal(&mut adjusted.goals, VibeGoal::Sexy),
        Some(Direction::Stylisher) => ensure_goal(&mut adjusted.goals, VibeGoal::Stylish),
        None => {}
    }
    adjusted
}

/// Makes sure `goal` occupies one of the two goal slots, replacing the
/// least-recent slot when both are taken
fn ensure_goal(goals: &mut Vec<VibeGoal>, goal: VibeGoal) {
    if goals.contains(&goal) {
        return;
    }
    if goals.len() < 2 {
        goals.push(goal);
    } else {
        goals[0] = goal;
    }
}

/// Lowercased tag set of a costume, the similarity vocabulary
pub fn tag_set(costume: &Costume) -> HashSet<String> {
    costume.similarity_tags().into_iter().collect()
}

/// Additive bonus for tags shared with the previously selected costume
pub fn similarity_bonus(candidate: &Costume, source_tags: &HashSet<String>) -> f64 {
    let shared = candidate
        .similarity_tags()
        .iter()
        .filter(|tag| source_tags.contains(*tag))
        .count();
    shared as f64 * SIMILARITY_TAG_BONUS
}
