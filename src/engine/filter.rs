use crate::models::{ComfortTier, Costume, QuizResponse};

/// Applies every hard constraint to the pool, preserving catalog order.
/// An empty result is valid output; the relaxation controller decides
/// what to do with it.
pub fn filter<'a>(costumes: &'a [Costume], quiz: &QuizResponse) -> Vec<&'a Costume> {
    costumes.iter().filter(|c| passes(c, quiz)).collect()
}

/// The full hard-exclusion predicate. Era, effort and budget are soft
/// signals for the scorer and never checked here.
pub fn passes(costume: &Costume, quiz: &QuizResponse) -> bool {
    passes_boundaries(costume, quiz)
        && passes_universe(costume, quiz)
        && passes_practical(costume, quiz)
}

fn passes_boundaries(costume: &Costume, quiz: &QuizResponse) -> bool {
    let b = &quiz.boundaries;
    let safety = &costume.safety;

    if b.avoid_culture_specific && safety.culture_specific {
        return false;
    }
    if b.avoid_religious && safety.religious {
        return false;
    }
    if b.avoid_political && safety.political_figure {
        return false;
    }
    if b.avoid_controversial && safety.controversial {
        return false;
    }
    // Failsafe: near-empty in practice given the authoring invariant
    if b.no_skin_tone_change && safety.skin_tone_change_implied {
        return false;
    }
    if b.avoid_wigs && costume.requirements.wig_required {
        return false;
    }
    // One toggle covers both face paint and body/full-face paint
    if b.avoid_face_paint
        && (costume.requirements.face_paint_required || costume.body_or_full_face_paint)
    {
        return false;
    }
    true
}

fn passes_universe(costume: &Costume, quiz: &QuizResponse) -> bool {
    quiz.universes.allows(costume.universe)
}

fn passes_practical(costume: &Costume, quiz: &QuizResponse) -> bool {
    let p = &quiz.practical;

    if p.bar_hopping && !costume.bar_friendly {
        return false;
    }
    if p.needs_pockets && !costume.pockets_likely {
        return false;
    }
    if p.comfort_first && costume.comfort == ComfortTier::Low {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Boundaries, BudgetTier, ComfortTier, Costume, EffortTier, Era, GenderPresentation,
        ImageRef, MakeupTier, PracticalPrefs, Requirements, SafetyFlags, Universe,
        UniverseSelection, VibeGoal, VibeProfile,
    };

    fn base_costume(id: &str, universe: Universe) -> Costume {
        Costume {
            id: id.to_string(),
            name: id.to_string(),
            universe,
            era: Era::Any,
            vibes: VibeProfile::default(),
            niche: 3,
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
            archetype_tags: vec![],
            vibe_tags: vec![],
            image: ImageRef::Stock {
                query: id.to_string(),
            },
            image_alternates: vec![],
        }
    }

    fn base_quiz() -> QuizResponse {
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
    fn test_safety_boundaries_exclude() {
        let mut political = base_costume("political", Universe::History);
        political.safety.political_figure = true;
        let clean = base_costume("clean", Universe::History);

        let mut quiz = base_quiz();
        quiz.boundaries.avoid_political = true;

        let costumes = [political, clean];
        let pool = filter(&costumes, &quiz);
        let ids: Vec<&str> = pool.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["clean"]);
    }

    #[test]
    fn test_skin_tone_boundary_on_by_default() {
        let mut flagged = base_costume("flagged", Universe::Movie);
        flagged.safety.skin_tone_change_implied = true;

        let costumes = [flagged];
        let pool = filter(&costumes, &base_quiz());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_face_paint_toggle_covers_body_paint() {
        let mut face = base_costume("face", Universe::Movie);
        face.requirements.face_paint_required = true;
        let mut body = base_costume("body", Universe::Movie);
        body.body_or_full_face_paint = true;
        let clean = base_costume("clean", Universe::Movie);

        let mut quiz = base_quiz();
        quiz.boundaries.avoid_face_paint = true;

        let costumes = [face, body, clean];
        let pool = filter(&costumes, &quiz);
        let ids: Vec<&str> = pool.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["clean"]);
    }

    #[test]
    fn test_wig_boundary() {
        let mut wigged = base_costume("wigged", Universe::Music);
        wigged.requirements.wig_required = true;

        let mut quiz = base_quiz();
        quiz.boundaries.avoid_wigs = true;
        assert!(filter(&[wigged.clone()], &quiz).is_empty());

        quiz.boundaries.avoid_wigs = false;
        assert_eq!(filter(&[wigged], &quiz).len(), 1);
    }

    #[test]
    fn test_universe_restriction() {
        let movie = base_costume("movie", Universe::Movie);
        let sports = base_costume("sports", Universe::Sports);

        let mut quiz = base_quiz();
        quiz.universes = UniverseSelection::from(vec![Universe::Sports]);

        let costumes = [movie, sports];
        let pool = filter(&costumes, &quiz);
        let ids: Vec<&str> = pool.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["sports"]);
    }

    #[test]
    fn test_practical_constraints() {
        let mut fragile = base_costume("fragile", Universe::Movie);
        fragile.bar_friendly = false;
        let mut pocketless = base_costume("pocketless", Universe::Movie);
        pocketless.pockets_likely = false;
        let mut stiff = base_costume("stiff", Universe::Movie);
        stiff.comfort = ComfortTier::Low;
        let easy = base_costume("easy", Universe::Movie);

        let mut quiz = base_quiz();
        quiz.practical = PracticalPrefs {
            bar_hopping: true,
            needs_pockets: true,
            comfort_first: true,
            low_maintenance: false,
        };

        let costumes = [fragile, pocketless, stiff, easy];
        let pool = filter(&costumes, &quiz);
        let ids: Vec<&str> = pool.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["easy"]);
    }

    #[test]
    fn test_era_effort_budget_never_filtered() {
        let mut costume = base_costume("pricey", Universe::Movie);
        costume.era = Era::Futuristic;
        costume.effort = EffortTier::Elaborate;
        costume.budget = BudgetTier::Lt150;

        let mut quiz = base_quiz();
        quiz.era = Era::Retro;
        quiz.effort = EffortTier::OneItem;
        quiz.budget = BudgetTier::Lt30;

        assert_eq!(filter(&[costume], &quiz).len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let costumes = vec![
            base_costume("a", Universe::Movie),
            base_costume("b", Universe::Tv),
            base_costume("c", Universe::Movie),
        ];
        let quiz = base_quiz();

        let once: Vec<&str> = filter(&costumes, &quiz).iter().map(|c| c.id.as_str()).collect();
        let twice: Vec<&str> = filter(&costumes, &quiz).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(once, twice);
        assert_eq!(once, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_more_permissive_effort_passes_identical_set() {
        // Effort is not hard-filtered, so loosening it can never shrink
        // the surviving set
        let costumes = vec![
            base_costume("a", Universe::Movie),
            base_costume("b", Universe::Tv),
        ];
        let mut strict = base_quiz();
        strict.effort = EffortTier::OneItem;
        let mut loose = base_quiz();
        loose.effort = EffortTier::Elaborate;

        let strict_ids: Vec<&str> = filter(&costumes, &strict).iter().map(|c| c.id.as_str()).collect();
        let loose_ids: Vec<&str> = filter(&costumes, &loose).iter().map(|c| c.id.as_str()).collect();
        assert!(strict_ids.iter().all(|id| loose_ids.contains(id)));
    }
}
