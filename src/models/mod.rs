use serde::{Deserialize, Serialize};

mod costume;
mod quiz;
mod recommendation;

pub use costume::{Costume, ImageRef, Requirements, SafetyFlags, VibeProfile};
pub use quiz::{
    Boundaries, Direction, PracticalPrefs, QuizResponse, UniverseSelection, VisualCues,
};
pub use recommendation::{Difficulty, Mode, Recommendation, ResolvedImage};

/// Fictional universe a costume belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Universe {
    Movie,
    Tv,
    Music,
    Sports,
    Gaming,
    Anime,
    Internet,
    History,
}

impl Universe {
    /// Cardinality of the enum; a quiz picking this many universes is
    /// treated as "no restriction"
    pub const COUNT: usize = 8;
}

/// Era a costume evokes; `Any` is the wildcard on both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Any,
    Retro,
    Nineties,
    Y2k,
    Modern,
    Futuristic,
}

/// The five vibe axes; quiz goals are a 1-2 element subset of these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibeGoal {
    Funny,
    Scary,
    Sexy,
    Stylish,
    Extreme,
}

/// Gender presentation tag; `Flexible` matches anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderPresentation {
    Feminine,
    Masculine,
    Flexible,
}

/// Assembly effort, ordered from trivial to project-level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortTier {
    OneItem,
    LightAssembly,
    FullOutfit,
    Elaborate,
}

impl EffortTier {
    pub fn rank(self) -> u8 {
        match self {
            EffortTier::OneItem => 0,
            EffortTier::LightAssembly => 1,
            EffortTier::FullOutfit => 2,
            EffortTier::Elaborate => 3,
        }
    }

    /// Next more permissive tier, if any (relaxation lever)
    pub fn next_up(self) -> Option<EffortTier> {
        match self {
            EffortTier::OneItem => Some(EffortTier::LightAssembly),
            EffortTier::LightAssembly => Some(EffortTier::FullOutfit),
            EffortTier::FullOutfit => Some(EffortTier::Elaborate),
            EffortTier::Elaborate => None,
        }
    }

    /// Next less demanding tier, if any ("easier" direction)
    pub fn step_down(self) -> Option<EffortTier> {
        match self {
            EffortTier::OneItem => None,
            EffortTier::LightAssembly => Some(EffortTier::OneItem),
            EffortTier::FullOutfit => Some(EffortTier::LightAssembly),
            EffortTier::Elaborate => Some(EffortTier::FullOutfit),
        }
    }
}

/// Budget bracket; `Any` is the wildcard on both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    #[serde(rename = "lt_30")]
    Lt30,
    #[serde(rename = "lt_75")]
    Lt75,
    #[serde(rename = "lt_150")]
    Lt150,
    Any,
}

impl BudgetTier {
    /// Ordinal rank; `None` for the wildcard
    pub fn rank(self) -> Option<u8> {
        match self {
            BudgetTier::Lt30 => Some(0),
            BudgetTier::Lt75 => Some(1),
            BudgetTier::Lt150 => Some(2),
            BudgetTier::Any => None,
        }
    }

    pub fn next_up(self) -> Option<BudgetTier> {
        match self {
            BudgetTier::Lt30 => Some(BudgetTier::Lt75),
            BudgetTier::Lt75 => Some(BudgetTier::Lt150),
            BudgetTier::Lt150 => Some(BudgetTier::Any),
            BudgetTier::Any => None,
        }
    }
}

/// How comfortable the costume is to wear for a full evening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortTier {
    Low,
    Medium,
    High,
}

/// Makeup involvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MakeupTier {
    None,
    Light,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HairLength {
    Short,
    Medium,
    Long,
}

/// Wardrobe staples a user may already own; each carries the keyword set
/// matched against a costume's anchor, shopping list and archetype tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosetStaple {
    LeatherJacket,
    Blazer,
    Denim,
    Flannel,
    WhiteDress,
    Suit,
    CowboyBoots,
    AthleticWear,
}

impl ClosetStaple {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ClosetStaple::LeatherJacket => &["leather jacket", "moto jacket"],
            ClosetStaple::Blazer => &["blazer", "sport coat"],
            ClosetStaple::Denim => &["denim", "jeans", "jean jacket"],
            ClosetStaple::Flannel => &["flannel", "plaid shirt"],
            ClosetStaple::WhiteDress => &["white dress", "slip dress"],
            ClosetStaple::Suit => &["suit", "tie", "dress shirt"],
            ClosetStaple::CowboyBoots => &["cowboy boots", "western boots"],
            ClosetStaple::AthleticWear => &["jersey", "tracksuit", "sweatband", "shorts"],
        }
    }
}
