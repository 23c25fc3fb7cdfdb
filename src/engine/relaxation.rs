use serde::{Deserialize, Serialize};

use crate::engine::filter::filter;
use crate::models::{Costume, Era, QuizResponse, UniverseSelection};

/// Minimum candidate pool size before scoring
pub const POOL_FLOOR: usize = 5;

/// The fixed relaxation ladder, applied cumulatively in this order.
/// Boundaries and safety predicates are never on it.
pub const LADDER: [RelaxationStep; 4] = [
    RelaxationStep::Era,
    RelaxationStep::Universe,
    RelaxationStep::Budget,
    RelaxationStep::Effort,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelaxationStep {
    Era,
    Universe,
    Budget,
    Effort,
}

/// Outcome of the widening loop: the surviving pool and which ladder
/// steps were needed to reach it
#[derive(Debug)]
pub struct WidenedPool<'a> {
    pub pool: Vec<&'a Costume>,
    pub steps_applied: Vec<RelaxationStep>,
}

/// Filters the catalog, loosening one ladder step at a time until the
/// pool clears the floor or the ladder is exhausted. Each step derives a
/// fresh request copy and re-filters the full catalog, so relaxation
/// redefines the boundary instead of compounding earlier filtering.
/// Never fails: an exhausted ladder returns whatever remains.
pub fn widen<'a>(catalog: &'a [Costume], quiz: &QuizResponse) -> WidenedPool<'a> {
    let mut pool = filter(catalog, quiz);
    let mut steps_applied = Vec::new();
    let mut relaxed = quiz.clone();

    for step in LADDER {
        if pool.len() >= POOL_FLOOR {
            break;
        }
        relaxed = loosen(&relaxed, step);
        pool = filter(catalog, &relaxed);
        steps_applied.push(step);

        tracing::debug!(
            step = ?step,
            pool_size = pool.len(),
            "Applied relaxation step"
        );
    }

    if pool.len() < POOL_FLOOR {
        tracing::warn!(
            pool_size = pool.len(),
            floor = POOL_FLOOR,
            "Pool still below floor after full ladder; returning best effort"
        );
    }

    WidenedPool {
        pool,
        steps_applied,
    }
}

/// Returns a copy of the request with one field loosened. The input is
/// never mutated; callers may hold the original and every intermediate
/// copy at once.
fn loosen(quiz: &QuizResponse, step: RelaxationStep) -> QuizResponse {
    let mut relaxed = quiz.clone();
    match step {
        RelaxationStep::Era => relaxed.era = Era::Any,
        RelaxationStep::Universe => relaxed.universes = UniverseSelection::Any,
        RelaxationStep::Budget => {
            if let Some(next) = relaxed.budget.next_up() {
                relaxed.budget = next;
            }
        }
        RelaxationStep::Effort => {
            if let Some(next) = relaxed.effort.next_up() {
                relaxed.effort = next;
            }
        }
    }
    relaxed
}
