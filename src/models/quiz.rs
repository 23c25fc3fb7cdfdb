use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    BudgetTier, ClosetStaple, EffortTier, Era, GenderPresentation, HairLength, Universe, VibeGoal,
};

/// One quiz submission; immutable input to one recommendation call.
/// Relaxation and refinement always derive patched copies, never mutate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizResponse {
    /// 1-2 selected vibe goals; the first is the primary goal
    pub goals: Vec<VibeGoal>,
    /// Desired recognizability, 1-7
    #[serde(default = "default_midpoint")]
    pub niche_target: u8,
    /// Desired resemblance/accuracy, 1-7
    #[serde(default = "default_midpoint")]
    pub accuracy_target: u8,
    pub effort: EffortTier,
    #[serde(default = "default_budget")]
    pub budget: BudgetTier,
    #[serde(default = "default_era")]
    pub era: Era,
    #[serde(default)]
    pub universes: UniverseSelection,
    #[serde(default)]
    pub boundaries: Boundaries,
    #[serde(default)]
    pub practical: PracticalPrefs,
    #[serde(default)]
    pub closet: Vec<ClosetStaple>,
    #[serde(default)]
    pub cues: Option<VisualCues>,
    /// Free text; passed through, never read by the engine
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_midpoint() -> u8 {
    4
}

fn default_budget() -> BudgetTier {
    BudgetTier::Any
}

fn default_era() -> Era {
    Era::Any
}

impl QuizResponse {
    pub fn primary_goal(&self) -> Option<VibeGoal> {
        self.goals.first().copied()
    }
}

/// Universe restriction as an explicit tri-state rather than an inferred
/// empty-or-full-set convention. The JSON boundary still accepts a plain
/// list: an empty pick list, or one covering every universe, means `Any`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<Universe>", into = "Vec<Universe>")]
pub enum UniverseSelection {
    #[default]
    Any,
    Only(BTreeSet<Universe>),
}

impl UniverseSelection {
    pub fn is_any(&self) -> bool {
        matches!(self, UniverseSelection::Any)
    }

    pub fn allows(&self, universe: Universe) -> bool {
        match self {
            UniverseSelection::Any => true,
            UniverseSelection::Only(set) => set.contains(&universe),
        }
    }
}

impl From<Vec<Universe>> for UniverseSelection {
    fn from(picks: Vec<Universe>) -> Self {
        let set: BTreeSet<Universe> = picks.into_iter().collect();
        if set.is_empty() || set.len() >= Universe::COUNT {
            UniverseSelection::Any
        } else {
            UniverseSelection::Only(set)
        }
    }
}

impl From<UniverseSelection> for Vec<Universe> {
    fn from(selection: UniverseSelection) -> Self {
        match selection {
            UniverseSelection::Any => Vec::new(),
            UniverseSelection::Only(set) => set.into_iter().collect(),
        }
    }
}

/// Hard constraints; each one the filter must never violate, and the
/// relaxation ladder never touches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Boundaries {
    #[serde(default)]
    pub avoid_culture_specific: bool,
    #[serde(default)]
    pub avoid_religious: bool,
    #[serde(default)]
    pub avoid_political: bool,
    #[serde(default)]
    pub avoid_controversial: bool,
    /// Defaults to true; excluding skin-tone-altering costumes is opt-out
    #[serde(default = "default_true")]
    pub no_skin_tone_change: bool,
    #[serde(default)]
    pub avoid_wigs: bool,
    /// Also excludes body-paint and full-face-paint costumes
    #[serde(default)]
    pub avoid_face_paint: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Boundaries {
    fn default() -> Self {
        Self {
            avoid_culture_specific: false,
            avoid_religious: false,
            avoid_political: false,
            avoid_controversial: false,
            no_skin_tone_change: true,
            avoid_wigs: false,
            avoid_face_paint: false,
        }
    }
}

/// Practical preferences; the first three are hard-filtered, all four feed
/// the scorer's practical bonus
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PracticalPrefs {
    #[serde(default)]
    pub bar_hopping: bool,
    #[serde(default)]
    pub needs_pockets: bool,
    #[serde(default)]
    pub comfort_first: bool,
    #[serde(default)]
    pub low_maintenance: bool,
}

/// Optional appearance signals; scoring only, never filtering. Absent
/// fields contribute nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisualCues {
    #[serde(default)]
    pub presentation: Option<GenderPresentation>,
    #[serde(default)]
    pub glasses: Option<bool>,
    #[serde(default)]
    pub facial_hair: Option<bool>,
    #[serde(default)]
    pub hair_length: Option<HairLength>,
    /// Public figure the user resembles; when present this dominates
    /// every other scoring term by design
    #[serde(default)]
    pub lookalike: Option<String>,
    /// Extra appearance keywords matched against costume tags
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Named refinement adjustment for "find more like this"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    MoreRecognizable,
    Weirder,
    Easier,
    Hotter,
    Stylisher,
}
