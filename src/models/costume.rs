use serde::{Deserialize, Serialize};

use super::{
    BudgetTier, ComfortTier, EffortTier, Era, GenderPresentation, MakeupTier, Universe, VibeGoal,
};

/// One catalog entry; immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Costume {
    /// Stable unique slug, never reused across catalog versions
    pub id: String,
    pub name: String,
    pub universe: Universe,
    pub era: Era,
    pub vibes: VibeProfile,
    /// Recognizability, 1 (everyone knows it) to 7 (deep cut)
    pub niche: u8,
    pub gender: GenderPresentation,
    pub effort: EffortTier,
    pub budget: BudgetTier,
    pub comfort: ComfortTier,
    /// Survives a crowded bar without falling apart
    #[serde(default)]
    pub bar_friendly: bool,
    #[serde(default)]
    pub pockets_likely: bool,
    pub requirements: Requirements,
    /// Body paint or full-face paint; distinct from the face-paint
    /// requirement but coupled to the same user boundary
    #[serde(default)]
    pub body_or_full_face_paint: bool,
    #[serde(default)]
    pub safety: SafetyFlags,
    /// Similarity metadata only; never used for hard filtering
    #[serde(default)]
    pub archetype_tags: Vec<String>,
    #[serde(default)]
    pub vibe_tags: Vec<String>,
    pub image: ImageRef,
    #[serde(default)]
    pub image_alternates: Vec<ImageRef>,
}

impl Costume {
    /// Lowercased searchable text for keyword matching: anchor, shopping
    /// list, and archetype tags
    pub fn keyword_haystack(&self) -> String {
        let mut text = String::new();
        text.push_str(&self.requirements.anchor);
        for item in &self.requirements.items {
            text.push(' ');
            text.push_str(item);
        }
        for tag in &self.archetype_tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }

    /// Union of archetype and vibe tags, lowercased, for similarity scoring
    pub fn similarity_tags(&self) -> Vec<String> {
        self.archetype_tags
            .iter()
            .chain(self.vibe_tags.iter())
            .map(|t| t.to_lowercase())
            .collect()
    }
}

/// Five independent vibe intensities, 0-3 each
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct VibeProfile {
    #[serde(default)]
    pub funny: u8,
    #[serde(default)]
    pub scary: u8,
    #[serde(default)]
    pub sexy: u8,
    #[serde(default)]
    pub stylish: u8,
    #[serde(default)]
    pub extreme: u8,
}

impl VibeProfile {
    pub fn intensity(&self, goal: VibeGoal) -> u8 {
        match goal {
            VibeGoal::Funny => self.funny,
            VibeGoal::Scary => self.scary,
            VibeGoal::Sexy => self.sexy,
            VibeGoal::Stylish => self.stylish,
            VibeGoal::Extreme => self.extreme,
        }
    }

    pub fn max_intensity(&self) -> u8 {
        [self.funny, self.scary, self.sexy, self.stylish, self.extreme]
            .into_iter()
            .max()
            .unwrap_or(0)
    }
}

/// What the wearer needs to pull the costume off
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requirements {
    /// The one purchasable piece the costume hangs on
    pub anchor: String,
    /// Full shopping list, 3-10 entries, anchor included
    pub items: Vec<String>,
    #[serde(default = "default_makeup")]
    pub makeup: MakeupTier,
    #[serde(default)]
    pub wig_required: bool,
    #[serde(default)]
    pub face_paint_required: bool,
}

fn default_makeup() -> MakeupTier {
    MakeupTier::None
}

/// Content flags a user may wish to exclude; checked by the filter, never
/// touched by relaxation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SafetyFlags {
    #[serde(default)]
    pub culture_specific: bool,
    #[serde(default)]
    pub religious: bool,
    #[serde(default)]
    pub political_figure: bool,
    #[serde(default)]
    pub controversial: bool,
    /// Authoring invariant: false for all but manual-override entries;
    /// the filter still checks it as a failsafe
    #[serde(default)]
    pub skin_tone_change_implied: bool,
}

/// Where the display image comes from; resolution happens in an external
/// collaborator that always produces a URL or a placeholder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImageRef {
    Url { url: String },
    Stock { query: String },
    Generated { prompt: String },
}
