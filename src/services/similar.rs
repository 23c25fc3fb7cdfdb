use std::collections::HashSet;

use rand::Rng;

use crate::{
    catalog::Catalog,
    engine::{diversity, fallback, refine, relaxation, scoring},
    error::{AppError, AppResult},
    models::{Direction, QuizResponse, Recommendation},
    services::images::ImageResolver,
};

/// Refinement calls aim for five results and accept fewer
pub const TARGET_COUNT: usize = 5;

/// "Find more like this": derive a direction-adjusted request, drop the
/// source costume and anything already shown, re-run the pipeline with a
/// similarity boost toward the source's tags, and compose up to five
/// recommendations. Zero results is the one genuine failure; 1-4 is a
/// success with a smaller set.
pub fn find_similar(
    catalog: &Catalog,
    images: &ImageResolver,
    item_id: &str,
    quiz: &QuizResponse,
    direction: Option<Direction>,
    exclude_ids: &[String],
    rng: &mut impl Rng,
) -> AppResult<Vec<Recommendation>> {
    let source = catalog
        .get(item_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown costume id '{}'", item_id)))?;
    let source_tags = refine::tag_set(source);

    let adjusted = refine::apply_direction(quiz, direction);

    let excluded: HashSet<&str> = exclude_ids
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(item_id))
        .collect();

    let widened = relaxation::widen(catalog.all(), &adjusted);
    let pool: Vec<_> = widened
        .pool
        .into_iter()
        .filter(|c| !excluded.contains(c.id.as_str()))
        .collect();

    if pool.is_empty() {
        return Err(AppError::NoSimilarMatches(format!(
            "Nothing similar to '{}' survives the current constraints",
            item_id
        )));
    }

    let mut ranked = scoring::rank_with(&pool, &adjusted, |candidate| {
        refine::similarity_bonus(candidate, &source_tags)
    });
    diversity::diversify(&mut ranked, &adjusted, rng);
    ranked.truncate(TARGET_COUNT);

    tracing::info!(
        source = %item_id,
        direction = ?direction,
        results = ranked.len(),
        "Similar costumes ranked"
    );

    Ok(ranked
        .iter()
        .map(|entry| {
            let image = images.resolve(&entry.costume.image);
            fallback::compose(entry, &adjusted, image, rng)
        })
        .collect())
}
