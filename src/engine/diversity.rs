use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::scoring::ScoredCostume;
use crate::models::QuizResponse;

/// Size of the pool handed to the generation/fallback stage
pub const SHORTLIST_LEN: usize = 10;

/// Rank-band width for the bucketed shuffle
const SHUFFLE_BAND: usize = 5;

/// Window inspected by the archetype spread pass
const ARCHETYPE_WINDOW: usize = 10;
/// Minimum distinct archetype tags wanted inside the window
const MIN_DISTINCT_ARCHETYPES: usize = 2;

/// Final recommendation count; the novelty and universe passes guard
/// this prefix
const TOP_SLOTS: usize = 3;

/// Extreme intensity at or above which a costume counts as a novelty pick
const NOVELTY_MIN_EXTREME: u8 = 2;
/// Bounded prefix of qualifying outsiders the novelty pass picks from
const NOVELTY_POOL_CAP: usize = 10;

/// Runs all diversity passes in order. Each pass is a no-op when its
/// precondition already holds. This is the only stage that consumes
/// randomness; callers inject the rng so tests can pin it.
pub fn diversify(ranked: &mut Vec<ScoredCostume<'_>>, quiz: &QuizResponse, rng: &mut impl Rng) {
    shuffle_within_bands(ranked, rng);
    ensure_archetype_spread(ranked);
    ensure_universe_spread(ranked, quiz);
    promote_novelty(ranked, rng);
}

/// Randomizes order within fixed-size score bands so repeated identical
/// requests do not always surface the literal same top three
pub fn shuffle_within_bands(ranked: &mut [ScoredCostume<'_>], rng: &mut impl Rng) {
    for band in ranked.chunks_mut(SHUFFLE_BAND) {
        band.shuffle(rng);
    }
}

/// Guarantees at least two distinct archetype tags inside the top window
/// by swapping in the first contributing item from the remainder. The swap
/// victim is the deepest window slot carrying no tag unique within the
/// window, so every iteration strictly grows the distinct count and the
/// loop cannot cycle.
pub fn ensure_archetype_spread(ranked: &mut [ScoredCostume<'_>]) {
    loop {
        let window = ranked.len().min(ARCHETYPE_WINDOW);
        let (victim, candidate) = {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for entry in &ranked[..window] {
                for tag in &entry.costume.archetype_tags {
                    *counts.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
            if counts.len() >= MIN_DISTINCT_ARCHETYPES || window == ranked.len() {
                return;
            }

            let fresh = ranked[window..].iter().position(|entry| {
                entry
                    .costume
                    .archetype_tags
                    .iter()
                    .any(|tag| !counts.contains_key(tag.as_str()))
            });
            let Some(offset) = fresh else { return };

            let victim = (0..window).rev().find(|&i| {
                ranked[i]
                    .costume
                    .archetype_tags
                    .iter()
                    .all(|tag| counts[tag.as_str()] > 1)
            });
            let Some(victim) = victim else { return };

            (victim, window + offset)
        };
        ranked.swap(victim, candidate);
    }
}

/// For "surprise me" requests only: if the top three all share one
/// universe, swap the first differing item from the remainder into the
/// third slot
pub fn ensure_universe_spread(ranked: &mut [ScoredCostume<'_>], quiz: &QuizResponse) {
    if !quiz.universes.is_any() || ranked.len() <= TOP_SLOTS {
        return;
    }

    let first = ranked[0].costume.universe;
    if ranked[..TOP_SLOTS].iter().any(|e| e.costume.universe != first) {
        return;
    }

    if let Some(offset) = ranked[TOP_SLOTS..]
        .iter()
        .position(|e| e.costume.universe != first)
    {
        ranked.swap(TOP_SLOTS - 1, TOP_SLOTS + offset);
    }
}

/// Guarantees one extreme/novelty pick in the top three. The random pick
/// over the best qualifying outsiders is intentional: identical requests
/// should vary across calls.
pub fn promote_novelty(ranked: &mut Vec<ScoredCostume<'_>>, rng: &mut impl Rng) {
    if ranked.len() <= TOP_SLOTS {
        return;
    }
    if ranked[..TOP_SLOTS]
        .iter()
        .any(|e| qualifies_as_novelty(e))
    {
        return;
    }

    let candidates: Vec<usize> = ranked
        .iter()
        .enumerate()
        .skip(TOP_SLOTS)
        .filter(|(_, e)| qualifies_as_novelty(e))
        .map(|(i, _)| i)
        .take(NOVELTY_POOL_CAP)
        .collect();
    if candidates.is_empty() {
        return;
    }

    let pick = candidates[rng.gen_range(0..candidates.len())];
    let entry = ranked.remove(pick);
    ranked.insert(TOP_SLOTS - 1, entry);
}

fn qualifies_as_novelty(entry: &ScoredCostume<'_>) -> bool {
    entry.costume.vibes.extreme >= NOVELTY_MIN_EXTREME
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scoring::ScoredCostume;
    use crate::models::{
        Boundaries, BudgetTier, ComfortTier, Costume, EffortTier, Era, GenderPresentation,
        ImageRef, MakeupTier, PracticalPrefs, Requirements, SafetyFlags, Universe,
        UniverseSelection, VibeGoal, VibeProfile,
    };
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn costume(id: &str, universe: Universe, archetype: &str, extreme: u8) -> Costume {
        Costume {
            id: id.to_string(),
            name: id.to_string(),
            universe,
            era: Era::Any,
            vibes: VibeProfile {
                extreme,
                ..Default::default()
            },
            niche: 4,
            gender: GenderPresentation::Flexible,
            effort: EffortTier::OneItem,
            budget: BudgetTier::Lt30,
            comfort: ComfortTier::High,
            bar_friendly: true,
            pockets_likely: true,
            requirements: Requirements {
                anchor: "Anchor".to_string(),
                items: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                makeup: MakeupTier::None,
                wig_required: false,
                face_paint_required: false,
            },
            body_or_full_face_paint: false,
            safety: SafetyFlags::default(),
            archetype_tags: vec![archetype.to_string()],
            vibe_tags: vec![],
            image: ImageRef::Stock {
                query: id.to_string(),
            },
            image_alternates: vec![],
        }
    }

    fn untagged(id: &str) -> Costume {
        let mut c = costume(id, Universe::Movie, "x", 0);
        c.archetype_tags.clear();
        c
    }

    fn scored<'a>(costumes: &'a [Costume]) -> Vec<ScoredCostume<'a>> {
        costumes
            .iter()
            .enumerate()
            .map(|(i, costume)| ScoredCostume {
                costume,
                score: 100.0 - i as f64,
            })
            .collect()
    }

    fn wildcard_quiz() -> QuizResponse {
        QuizResponse {
            goals: vec![VibeGoal::Funny],
            niche_target: 4,
            accuracy_target: 4,
            effort: EffortTier::Elaborate,
            budget: BudgetTier::Any,
            era: Era::Any,
            universes: UniverseSelection::Any,
            boundaries: Boundaries::default(),
            practical: PracticalPrefs::default(),
            closet: vec![],
            cues: None,
            notes: None,
        }
    }

    #[test]
    fn test_archetype_spread_no_op_when_varied() {
        let costumes = vec![
            costume("a", Universe::Movie, "hero", 0),
            costume("b", Universe::Movie, "villain", 0),
        ];
        let mut ranked = scored(&costumes);
        ensure_archetype_spread(&mut ranked);
        let ids: Vec<&str> = ranked.iter().map(|e| e.costume.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_archetype_spread_swaps_fresh_tag_into_window() {
        // Eleven same-tag items, then one fresh tag at the tail
        let mut costumes: Vec<Costume> = (0..11)
            .map(|i| costume(&format!("same{}", i), Universe::Movie, "hero", 0))
            .collect();
        costumes.push(costume("fresh", Universe::Movie, "villain", 0));
        let mut ranked = scored(&costumes);

        ensure_archetype_spread(&mut ranked);

        let window_ids: Vec<&str> = ranked[..10].iter().map(|e| e.costume.id.as_str()).collect();
        assert!(window_ids.contains(&"fresh"));
        // Everything ahead of the swap slot keeps relative order, and the
        // displaced item lands where the fresh one was
        assert_eq!(ranked[0].costume.id, "same0");
        assert_eq!(ranked[8].costume.id, "same8");
        assert_eq!(ranked[11].costume.id, "same9");
    }

    #[test]
    fn test_archetype_spread_terminates_with_untagged_leaders() {
        // Nine untagged items ahead of the only two tag carriers; the pass
        // must bring both tags into the window without cycling the
        // carriers through the window edge
        let mut costumes: Vec<Costume> = (0..9).map(|i| untagged(&format!("u{}", i))).collect();
        costumes.push(costume("first", Universe::Movie, "hero", 0));
        costumes.push(costume("second", Universe::Movie, "villain", 0));
        let mut ranked = scored(&costumes);

        ensure_archetype_spread(&mut ranked);

        let window_tags: HashSet<&str> = ranked[..10]
            .iter()
            .flat_map(|e| e.costume.archetype_tags.iter().map(String::as_str))
            .collect();
        assert!(window_tags.contains("hero"));
        assert!(window_tags.contains("villain"));
        assert_eq!(ranked.len(), 11);
    }

    #[test]
    fn test_archetype_spread_exhausts_remainder_gracefully() {
        let costumes: Vec<Costume> = (0..12)
            .map(|i| costume(&format!("c{}", i), Universe::Movie, "hero", 0))
            .collect();
        let mut ranked = scored(&costumes);
        ensure_archetype_spread(&mut ranked);
        assert_eq!(ranked.len(), 12);
    }

    #[test]
    fn test_universe_spread_swaps_into_third_slot() {
        let costumes = vec![
            costume("m1", Universe::Movie, "a", 0),
            costume("m2", Universe::Movie, "b", 0),
            costume("m3", Universe::Movie, "c", 0),
            costume("m4", Universe::Movie, "d", 0),
            costume("tv", Universe::Tv, "e", 0),
        ];
        let mut ranked = scored(&costumes);
        ensure_universe_spread(&mut ranked, &wildcard_quiz());

        assert_eq!(ranked[2].costume.id, "tv");
        // Swap, not insert: the displaced item lands where tv was
        assert_eq!(ranked[4].costume.id, "m3");
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_universe_spread_skipped_for_restricted_request() {
        let costumes = vec![
            costume("m1", Universe::Movie, "a", 0),
            costume("m2", Universe::Movie, "b", 0),
            costume("m3", Universe::Movie, "c", 0),
            costume("tv", Universe::Tv, "d", 0),
        ];
        let mut ranked = scored(&costumes);
        let mut quiz = wildcard_quiz();
        quiz.universes = UniverseSelection::from(vec![Universe::Movie]);

        ensure_universe_spread(&mut ranked, &quiz);
        assert_eq!(ranked[2].costume.id, "m3");
    }

    #[test]
    fn test_universe_spread_no_op_when_varied() {
        let costumes = vec![
            costume("m1", Universe::Movie, "a", 0),
            costume("tv", Universe::Tv, "b", 0),
            costume("m2", Universe::Movie, "c", 0),
            costume("m3", Universe::Movie, "d", 0),
        ];
        let mut ranked = scored(&costumes);
        ensure_universe_spread(&mut ranked, &wildcard_quiz());
        let ids: Vec<&str> = ranked.iter().map(|e| e.costume.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "tv", "m2", "m3"]);
    }

    #[test]
    fn test_novelty_promoted_into_top_three() {
        let costumes = vec![
            costume("a", Universe::Movie, "t1", 0),
            costume("b", Universe::Movie, "t2", 0),
            costume("c", Universe::Movie, "t3", 0),
            costume("d", Universe::Movie, "t4", 0),
            costume("wild", Universe::Movie, "t5", 3),
        ];
        let mut ranked = scored(&costumes);
        promote_novelty(&mut ranked, &mut rng());

        assert_eq!(ranked[2].costume.id, "wild");
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_novelty_no_op_when_already_present() {
        let costumes = vec![
            costume("a", Universe::Movie, "t1", 3),
            costume("b", Universe::Movie, "t2", 0),
            costume("c", Universe::Movie, "t3", 0),
            costume("d", Universe::Movie, "t4", 3),
        ];
        let mut ranked = scored(&costumes);
        promote_novelty(&mut ranked, &mut rng());
        let ids: Vec<&str> = ranked.iter().map(|e| e.costume.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_novelty_no_candidates_is_a_no_op() {
        let costumes = vec![
            costume("a", Universe::Movie, "t1", 0),
            costume("b", Universe::Movie, "t2", 0),
            costume("c", Universe::Movie, "t3", 0),
            costume("d", Universe::Movie, "t4", 1),
        ];
        let mut ranked = scored(&costumes);
        promote_novelty(&mut ranked, &mut rng());
        assert_eq!(ranked[2].costume.id, "c");
    }

    #[test]
    fn test_bucketed_shuffle_stays_within_bands() {
        let costumes: Vec<Costume> = (0..10)
            .map(|i| costume(&format!("c{}", i), Universe::Movie, "t", 0))
            .collect();
        let mut ranked = scored(&costumes);
        shuffle_within_bands(&mut ranked, &mut rng());

        // Members never cross a band boundary
        let first_band: HashSet<&str> =
            ranked[..5].iter().map(|e| e.costume.id.as_str()).collect();
        for i in 0..5 {
            assert!(first_band.contains(format!("c{}", i).as_str()));
        }
    }

    #[test]
    fn test_diversify_deterministic_under_fixed_seed() {
        let costumes: Vec<Costume> = (0..12)
            .map(|i| costume(&format!("c{}", i), Universe::Movie, "t", 0))
            .collect();

        let mut first = scored(&costumes);
        diversify(&mut first, &wildcard_quiz(), &mut rng());
        let mut second = scored(&costumes);
        diversify(&mut second, &wildcard_quiz(), &mut rng());

        let first_ids: Vec<&str> = first.iter().map(|e| e.costume.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|e| e.costume.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
