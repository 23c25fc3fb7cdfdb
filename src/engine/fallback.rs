use rand::Rng;

use crate::engine::scoring::ScoredCostume;
use crate::models::{
    BudgetTier, QuizResponse, Recommendation, ResolvedImage, VibeGoal,
};

/// Shopping lists are truncated to this many entries in the output
const MAX_SHOPPING_ITEMS: usize = 7;
/// Why-it-matches line bounds
const MAX_WHY_LINES: usize = 3;
const MIN_WHY_LINES: usize = 2;

/// Niche thresholds for the second why-line template family
const NICHE_CROWD_PLEASER_MAX: u8 = 2;
const NICHE_DEEP_CUT_MIN: u8 = 6;

const FUNNY_WHYS: [&str; 3] = [
    "Built for laughs: {name} lands the joke the second you walk in.",
    "{name} is the kind of funny that works without explaining itself.",
    "People will be quoting {name} at you all night, in a good way.",
];

const SCARY_WHYS: [&str; 3] = [
    "{name} brings genuine creep factor without trying too hard.",
    "If unsettling is the goal, {name} delivers from across the room.",
    "{name} reads spooky at a glance and scarier up close.",
];

const SEXY_WHYS: [&str; 3] = [
    "{name} has the confident, turn-heads energy you asked for.",
    "Flattering silhouette and a bold look: {name} owns the room.",
    "{name} is the right mix of daring and wearable.",
];

const STYLISH_WHYS: [&str; 3] = [
    "{name} looks put-together enough to survive the photos.",
    "Sharp lines and a clear concept: {name} is a style pick first.",
    "{name} reads as fashion that happens to be a costume.",
];

const EXTREME_WHYS: [&str; 3] = [
    "{name} is a commitment, and that is exactly the point.",
    "Nobody else at the party is showing up as {name}.",
    "{name} is the maximalist swing your answers called for.",
];

const CROWD_PLEASER_WHY: &str =
    "Everyone recognizes it instantly; no explanations needed at the door.";
const DEEP_CUT_WHY: &str =
    "A proper deep cut; the right people will love that you went there.";

const BUDGET_FILLER_WHY: &str = "Cheap to pull together from pieces you can actually find.";
const BAR_FILLER_WHY: &str = "Sturdy enough to survive a crowded bar and still look right.";
const GENERIC_WHY: &str = "Matches the overall profile of your quiz answers.";

/// Shared with the generated-copy path so the two never drift
pub const BODY_PAINT_WARNING: &str =
    "Involves body or full-face paint; allow extra prep and cleanup time.";
const THRIFT_SUBSTITUTION: &str =
    "Most pieces can be swapped for thrift-store or closet equivalents.";

/// Deterministic, template-based recommendation copy. Used as the sole
/// path when no generator is configured and as the safety net when the
/// generator's output fails validation. Template choice draws on the
/// injected rng so tests can pin it; nothing else is random.
pub fn compose(
    scored: &ScoredCostume<'_>,
    quiz: &QuizResponse,
    image: ResolvedImage,
    rng: &mut impl Rng,
) -> Recommendation {
    let costume = scored.costume;
    let mut why: Vec<String> = Vec::with_capacity(MAX_WHY_LINES);

    why.push(goal_why(quiz.primary_goal(), &costume.name, rng));

    if costume.niche <= NICHE_CROWD_PLEASER_MAX {
        why.push(CROWD_PLEASER_WHY.to_string());
    } else if costume.niche >= NICHE_DEEP_CUT_MIN {
        why.push(DEEP_CUT_WHY.to_string());
    }

    if why.len() < MAX_WHY_LINES {
        if matches!(costume.budget, BudgetTier::Lt30 | BudgetTier::Any) {
            why.push(BUDGET_FILLER_WHY.to_string());
        } else if costume.bar_friendly {
            why.push(BAR_FILLER_WHY.to_string());
        }
    }

    while why.len() < MIN_WHY_LINES {
        why.push(GENERIC_WHY.to_string());
    }
    why.truncate(MAX_WHY_LINES);

    let shopping_list: Vec<String> = costume
        .requirements
        .items
        .iter()
        .take(MAX_SHOPPING_ITEMS)
        .cloned()
        .collect();

    let substitutions = if quiz.budget.rank().is_some() {
        vec![THRIFT_SUBSTITUTION.to_string()]
    } else {
        Vec::new()
    };

    let warnings = if costume.body_or_full_face_paint {
        vec![BODY_PAINT_WARNING.to_string()]
    } else {
        Vec::new()
    };

    Recommendation {
        id: costume.id.clone(),
        title: costume.name.clone(),
        image,
        why,
        difficulty: costume.effort.into(),
        anchor: costume.requirements.anchor.clone(),
        shopping_list,
        substitutions,
        warnings,
        similarity_tags: costume.similarity_tags(),
    }
}

fn goal_why(goal: Option<VibeGoal>, name: &str, rng: &mut impl Rng) -> String {
    let templates: &[&str] = match goal {
        Some(VibeGoal::Funny) => &FUNNY_WHYS,
        Some(VibeGoal::Scary) => &SCARY_WHYS,
        Some(VibeGoal::Sexy) => &SEXY_WHYS,
        Some(VibeGoal::Stylish) => &STYLISH_WHYS,
        Some(VibeGoal::Extreme) => &EXTREME_WHYS,
        None => return GENERIC_WHY.to_string(),
    };
    let template = templates[rng.gen_range(0..templates.len())];
    template.replace("{name}", name)
}
