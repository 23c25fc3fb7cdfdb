use std::cmp::Ordering;

use crate::models::{Costume, GenderPresentation, HairLength, MakeupTier, QuizResponse};

// Fixed, hand-tuned weights. Only relative magnitudes matter; the final
// sum is never normalized because consumers only compare candidates
// against each other.
const W_VIBE: f64 = 3.0;
const W_NICHE: f64 = 1.25;
const W_EFFORT: f64 = 1.25;
const W_BUDGET: f64 = 1.25;
const W_GENDER: f64 = 0.6;
const W_PRACTICAL: f64 = 0.6;
const W_RESEMBLANCE: f64 = 0.6;
const W_ERA: f64 = 0.6;
const W_CLOSET: f64 = 0.4;
const W_CUES: f64 = 0.4;
// Deliberate override: a lookalike hit should beat any combination of
// the other terms
const W_LOOKALIKE: f64 = 25.0;

/// Resemblance branch thresholds on the 1-7 accuracy scale
const ACCURACY_LOW_MAX: u8 = 3;
const ACCURACY_HIGH_MIN: u8 = 5;

/// Fixed partial credit for an off-era costume; less ideal, never irrelevant
const ERA_MISMATCH_CREDIT: f64 = 0.4;

/// A costume annotated with its score for one quiz; lives only for the
/// duration of a ranking pass
#[derive(Debug, Clone)]
pub struct ScoredCostume<'a> {
    pub costume: &'a Costume,
    pub score: f64,
}

/// Scores the whole pool and sorts descending. The sort is stable, so
/// equal scores keep catalog order and output is reproducible.
pub fn rank<'a>(pool: &[&'a Costume], quiz: &QuizResponse) -> Vec<ScoredCostume<'a>> {
    rank_with(pool, quiz, |_| 0.0)
}

/// `rank` with an additive per-costume bonus, used by the refinement path
/// for its similarity boost
pub fn rank_with<'a>(
    pool: &[&'a Costume],
    quiz: &QuizResponse,
    bonus: impl Fn(&Costume) -> f64,
) -> Vec<ScoredCostume<'a>> {
    let mut scored: Vec<ScoredCostume<'a>> = pool
        .iter()
        .map(|&costume| ScoredCostume {
            costume,
            score: score(costume, quiz) + bonus(costume),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}

/// Total preference score: a sum of independently weighted sub-scores.
/// Every sub-score is total over its domain; missing optional quiz data
/// contributes zero, never an error.
pub fn score(costume: &Costume, quiz: &QuizResponse) -> f64 {
    W_VIBE * vibe_alignment(costume, quiz)
        + W_NICHE * niche_affinity(costume, quiz)
        + W_EFFORT * effort_credit(costume, quiz)
        + W_BUDGET * budget_credit(costume, quiz)
        + W_GENDER * gender_fit(costume, quiz)
        + W_PRACTICAL * practical_bonus(costume, quiz)
        + W_RESEMBLANCE * resemblance_fit(costume, quiz)
        + W_ERA * era_affinity(costume, quiz)
        + W_CLOSET * closet_boost(costume, quiz)
        + W_CUES * cue_overlap(costume, quiz)
        + W_LOOKALIKE * lookalike_hit(costume, quiz)
}

/// Average normalized intensity over the selected goals; 1 or 2 goals
/// both land in 0-1
fn vibe_alignment(costume: &Costume, quiz: &QuizResponse) -> f64 {
    if quiz.goals.is_empty() {
        return 0.0;
    }
    let total: f64 = quiz
        .goals
        .iter()
        .map(|&goal| f64::from(costume.vibes.intensity(goal)) / 3.0)
        .sum();
    total / quiz.goals.len() as f64
}

/// Linear decay; zero only at the maximum possible distance on the 1-7 scale
fn niche_affinity(costume: &Costume, quiz: &QuizResponse) -> f64 {
    let distance = f64::from(costume.niche.abs_diff(quiz.niche_target));
    1.0 - distance / 6.0
}

/// Ordered-tier credit: within tolerance 1.0, one tier over 0.5,
/// further 0.1
fn tier_credit(item_rank: u8, requested_rank: u8) -> f64 {
    if item_rank <= requested_rank {
        1.0
    } else if item_rank - requested_rank == 1 {
        0.5
    } else {
        0.1
    }
}

fn effort_credit(costume: &Costume, quiz: &QuizResponse) -> f64 {
    tier_credit(costume.effort.rank(), quiz.effort.rank())
}

fn budget_credit(costume: &Costume, quiz: &QuizResponse) -> f64 {
    match (costume.budget.rank(), quiz.budget.rank()) {
        // Wildcard on either side short-circuits to full credit
        (None, _) | (_, None) => 1.0,
        (Some(item), Some(requested)) => tier_credit(item, requested),
    }
}

/// Average per-flag credit over only the flags the user turned on;
/// no flags on means zero contribution, not undefined
fn practical_bonus(costume: &Costume, quiz: &QuizResponse) -> f64 {
    let p = &quiz.practical;
    let mut credits: Vec<f64> = Vec::with_capacity(4);

    if p.bar_hopping {
        credits.push(if costume.bar_friendly { 1.0 } else { 0.0 });
    }
    if p.needs_pockets {
        credits.push(if costume.pockets_likely { 1.0 } else { 0.0 });
    }
    if p.comfort_first {
        credits.push(match costume.comfort {
            crate::models::ComfortTier::High => 1.0,
            crate::models::ComfortTier::Medium => 0.5,
            crate::models::ComfortTier::Low => 0.0,
        });
    }
    if p.low_maintenance {
        credits.push(match costume.requirements.makeup {
            MakeupTier::None => 1.0,
            MakeupTier::Light => 0.5,
            MakeupTier::Heavy => 0.0,
        });
    }

    if credits.is_empty() {
        return 0.0;
    }
    credits.iter().sum::<f64>() / credits.len() as f64
}

/// Three-way branch on requested accuracy: low (<= 3) prefers costumes
/// that need no wig or heavy makeup, high (>= 5) rewards achievable
/// looks, middle is flat neutral credit
fn resemblance_fit(costume: &Costume, quiz: &QuizResponse) -> f64 {
    if quiz.accuracy_target <= ACCURACY_LOW_MAX {
        let mut credit: f64 = 1.0;
        if costume.requirements.wig_required {
            credit -= 0.5;
        }
        if costume.requirements.makeup == MakeupTier::Heavy {
            credit -= 0.5;
        }
        credit.max(0.0)
    } else if quiz.accuracy_target >= ACCURACY_HIGH_MIN {
        let mut credit = 0.0;
        if !costume.requirements.wig_required {
            credit += 0.6;
        }
        if let Some(cues) = &quiz.cues {
            credit += 0.4 * cue_keyword_fraction(costume, cues);
        }
        credit
    } else {
        0.5
    }
}

/// Fraction of declared closet staples with a keyword hit anywhere in the
/// costume's anchor, shopping list or archetype text
fn closet_boost(costume: &Costume, quiz: &QuizResponse) -> f64 {
    if quiz.closet.is_empty() {
        return 0.0;
    }
    let haystack = costume.keyword_haystack();
    let hits = quiz
        .closet
        .iter()
        .filter(|staple| staple.keywords().iter().any(|kw| haystack.contains(kw)))
        .count();
    hits as f64 / quiz.closet.len() as f64
}

/// Wildcard or exact era match is full credit; anything else is the fixed
/// partial credit
fn era_affinity(costume: &Costume, quiz: &QuizResponse) -> f64 {
    use crate::models::Era;
    if costume.era == Era::Any || quiz.era == Era::Any || costume.era == quiz.era {
        1.0
    } else {
        ERA_MISMATCH_CREDIT
    }
}

fn gender_fit(costume: &Costume, quiz: &QuizResponse) -> f64 {
    let Some(cues) = &quiz.cues else { return 0.0 };
    let Some(presentation) = cues.presentation else {
        return 0.0;
    };
    if costume.gender == GenderPresentation::Flexible || costume.gender == presentation {
        1.0
    } else {
        0.0
    }
}

fn cue_overlap(costume: &Costume, quiz: &QuizResponse) -> f64 {
    match &quiz.cues {
        Some(cues) => cue_keyword_fraction(costume, cues),
        None => 0.0,
    }
}

/// Fraction of supplied cue keywords found in the costume's tag text
fn cue_keyword_fraction(costume: &Costume, cues: &crate::models::VisualCues) -> f64 {
    let mut wanted: Vec<String> = Vec::new();
    if cues.glasses == Some(true) {
        wanted.push("glasses".to_string());
    }
    if cues.facial_hair == Some(true) {
        wanted.push("beard".to_string());
    }
    match cues.hair_length {
        Some(HairLength::Short) => wanted.push("short hair".to_string()),
        Some(HairLength::Long) => wanted.push("long hair".to_string()),
        _ => {}
    }
    for kw in &cues.keywords {
        wanted.push(kw.to_lowercase());
    }
    if wanted.is_empty() {
        return 0.0;
    }

    let tag_text = costume.similarity_tags().join(" ");
    let hits = wanted.iter().filter(|kw| tag_text.contains(kw.as_str())).count();
    hits as f64 / wanted.len() as f64
}

fn lookalike_hit(costume: &Costume, quiz: &QuizResponse) -> f64 {
    let Some(cues) = &quiz.cues else { return 0.0 };
    let Some(name) = &cues.lookalike else {
        return 0.0;
    };
    let needle = name.to_lowercase();
    if needle.is_empty() {
        return 0.0;
    }
    let hit = costume.name.to_lowercase().contains(&needle)
        || costume.similarity_tags().iter().any(|t| t.contains(&needle));
    if hit {
        1.0
    } else {
        0.0
    }
}
