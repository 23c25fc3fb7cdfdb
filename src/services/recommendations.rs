use rand::Rng;
use serde::Serialize;

use crate::{
    catalog::Catalog,
    engine::{diversity, fallback, relaxation, scoring, ScoredCostume},
    error::AppResult,
    models::{Costume, Mode, QuizResponse, Recommendation},
    services::{
        generator::{GeneratedPick, GeneratorClient, GeneratorError},
        images::ImageResolver,
    },
};

/// The initial call always returns exactly this many recommendations
/// when any candidates exist
pub const FINAL_COUNT: usize = 3;

/// Result of one recommendation call. An empty `recommendations` list is
/// the distinguished "truly empty" signal for an exhausted catalog; it is
/// not an error.
#[derive(Debug, Serialize)]
pub struct RecommendResult {
    pub recommendations: Vec<Recommendation>,
    pub relaxation_applied: Vec<relaxation::RelaxationStep>,
    pub mode: Mode,
}

/// Runs the full pipeline: widen (filter + relaxation ladder), score with
/// the original request, diversify, then hand the shortlist to the
/// external generator when one is configured, falling back to the
/// deterministic composer on any generator failure.
pub async fn recommend(
    catalog: &Catalog,
    generator: Option<&GeneratorClient>,
    images: &ImageResolver,
    quiz: &QuizResponse,
    rng: &mut impl Rng,
) -> AppResult<RecommendResult> {
    let widened = relaxation::widen(catalog.all(), quiz);

    if widened.pool.is_empty() {
        tracing::warn!("No candidates even after full relaxation ladder");
        return Ok(RecommendResult {
            recommendations: Vec::new(),
            relaxation_applied: widened.steps_applied,
            mode: Mode::Fallback,
        });
    }

    // Relaxed copies only redefine the filter boundary; preference
    // scoring still honors the original answers
    let mut ranked = scoring::rank(&widened.pool, quiz);
    diversity::diversify(&mut ranked, quiz, rng);
    ranked.truncate(diversity::SHORTLIST_LEN);

    tracing::info!(
        pool = widened.pool.len(),
        shortlist = ranked.len(),
        relaxation_steps = widened.steps_applied.len(),
        "Shortlist ready"
    );

    let generated = match generator {
        Some(client) => Some(client.generate(quiz, &ranked).await),
        None => None,
    };

    Ok(assemble(
        &ranked,
        widened.steps_applied,
        generated,
        images,
        quiz,
        rng,
    ))
}

/// Turns the shortlist plus the generator outcome into the final payload.
/// A missing or failed generator call always lands on the fallback
/// composer; a generator failure is never a request failure.
fn assemble(
    shortlist: &[ScoredCostume<'_>],
    relaxation_applied: Vec<relaxation::RelaxationStep>,
    generated: Option<Result<Vec<GeneratedPick>, GeneratorError>>,
    images: &ImageResolver,
    quiz: &QuizResponse,
    rng: &mut impl Rng,
) -> RecommendResult {
    if let Some(outcome) = generated {
        match outcome {
            Ok(picks) => {
                let recommendations = picks
                    .into_iter()
                    .filter_map(|pick| {
                        let entry = shortlist.iter().find(|s| s.costume.id == pick.id)?;
                        Some(from_pick(entry.costume, pick, images))
                    })
                    .collect();
                return RecommendResult {
                    recommendations,
                    relaxation_applied,
                    mode: Mode::Generated,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generator failed; composing fallback copy");
            }
        }
    }

    let recommendations = shortlist
        .iter()
        .take(FINAL_COUNT)
        .map(|entry| {
            let image = images.resolve(&entry.costume.image);
            fallback::compose(entry, quiz, image, rng)
        })
        .collect();

    RecommendResult {
        recommendations,
        relaxation_applied,
        mode: Mode::Fallback,
    }
}

/// Wraps one accepted generator selection in the recommendation shape
fn from_pick(costume: &Costume, pick: GeneratedPick, images: &ImageResolver) -> Recommendation {
    Recommendation {
        id: costume.id.clone(),
        title: costume.name.clone(),
        image: images.resolve(&costume.image),
        why: pick.why,
        difficulty: costume.effort.into(),
        anchor: costume.requirements.anchor.clone(),
        shopping_list: pick.shopping_list,
        substitutions: Vec::new(),
        warnings: if costume.body_or_full_face_paint {
            vec![fallback::BODY_PAINT_WARNING.to_string()]
        } else {
            Vec::new()
        },
        similarity_tags: costume.similarity_tags(),
    }
}
