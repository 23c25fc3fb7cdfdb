use serde::{Deserialize, Serialize};

use super::EffortTier;

/// User-facing difficulty, derived deterministically from effort tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl From<EffortTier> for Difficulty {
    fn from(effort: EffortTier) -> Self {
        match effort {
            EffortTier::OneItem | EffortTier::LightAssembly => Difficulty::Easy,
            EffortTier::FullOutfit => Difficulty::Medium,
            EffortTier::Elaborate => Difficulty::Hard,
        }
    }
}

/// Displayable image with optional attribution; the resolver never fails,
/// a placeholder counts as success
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedImage {
    pub url: String,
    #[serde(default)]
    pub attribution: Option<String>,
}

/// One recommendation record; produced fresh per response, never stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub image: ResolvedImage,
    /// 2-3 "why it matches" lines
    pub why: Vec<String>,
    pub difficulty: Difficulty,
    pub anchor: String,
    /// 3-7 purchasable items
    pub shopping_list: Vec<String>,
    #[serde(default)]
    pub substitutions: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Carried forward so "find more like this" can boost shared tags
    #[serde(default)]
    pub similarity_tags: Vec<String>,
}

/// Which path produced the recommendation copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Generated,
    Fallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_mapping() {
        assert_eq!(Difficulty::from(EffortTier::OneItem), Difficulty::Easy);
        assert_eq!(Difficulty::from(EffortTier::LightAssembly), Difficulty::Easy);
        assert_eq!(Difficulty::from(EffortTier::FullOutfit), Difficulty::Medium);
        assert_eq!(Difficulty::from(EffortTier::Elaborate), Difficulty::Hard);
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(
            serde_json::to_string(&Mode::Fallback).unwrap(),
            r#""fallback""#
        );
        assert_eq!(
            serde_json::to_string(&Mode::Generated).unwrap(),
            r#""generated""#
        );
    }
}
