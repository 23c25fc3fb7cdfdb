use axum::{extract::State, http::StatusCode, Json};
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Direction, QuizResponse, Recommendation},
    services::{recommendations, recommendations::RecommendResult, similar},
};

use super::AppState;

const MAX_GOALS: usize = 2;
const SCALE_MIN: u8 = 1;
const SCALE_MAX: u8 = 7;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SimilarRequest {
    pub item_id: String,
    pub quiz: QuizResponse,
    pub direction: Option<Direction>,
    #[serde(default)]
    pub exclude_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub recommendations: Vec<Recommendation>,
}

// Handlers

/// Health check endpoint; reports which catalog build is serving
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "catalog_size": state.catalog.len(),
            "catalog_loaded_at": state.catalog.loaded_at,
        })),
    )
}

/// Runs the full recommendation pipeline for one quiz submission
pub async fn recommend(
    State(state): State<AppState>,
    Json(quiz): Json<QuizResponse>,
) -> AppResult<Json<RecommendResult>> {
    validate_quiz(&quiz)?;

    let mut rng = SmallRng::from_entropy();
    let result = recommendations::recommend(
        &state.catalog,
        state.generator.as_deref(),
        &state.images,
        &quiz,
        &mut rng,
    )
    .await?;

    Ok(Json(result))
}

/// "More like this" refinement against a previously shown costume
pub async fn find_similar(
    State(state): State<AppState>,
    Json(request): Json<SimilarRequest>,
) -> AppResult<Json<SimilarResponse>> {
    validate_quiz(&request.quiz)?;

    let mut rng = SmallRng::from_entropy();
    let recommendations = similar::find_similar(
        &state.catalog,
        &state.images,
        &request.item_id,
        &request.quiz,
        request.direction,
        &request.exclude_ids,
        &mut rng,
    )?;

    Ok(Json(SimilarResponse { recommendations }))
}

fn validate_quiz(quiz: &QuizResponse) -> AppResult<()> {
    if quiz.goals.is_empty() || quiz.goals.len() > MAX_GOALS {
        return Err(AppError::InvalidInput(format!(
            "expected 1-{} vibe goals, got {}",
            MAX_GOALS,
            quiz.goals.len()
        )));
    }
    for (field, value) in [
        ("niche_target", quiz.niche_target),
        ("accuracy_target", quiz.accuracy_target),
    ] {
        if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
            return Err(AppError::InvalidInput(format!(
                "{} must be between {} and {}, got {}",
                field, SCALE_MIN, SCALE_MAX, value
            )));
        }
    }
    Ok(())
}
