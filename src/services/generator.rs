use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{config::Config, engine::ScoredCostume, models::QuizResponse};

/// Phrases that disqualify generated copy outright
const BANNED_PHRASES: [&str; 5] = [
    "as an ai",
    "language model",
    "i cannot",
    "i'm sorry",
    "cannot assist",
];

/// Selections the generator must return for one recommendation call
const EXPECTED_PICKS: usize = 3;
const MIN_WHY: usize = 2;
const MAX_WHY: usize = 3;
const MIN_SHOPPING: usize = 3;
const MAX_SHOPPING: usize = 7;

/// One costume selection written by the external generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedPick {
    pub id: String,
    pub why: Vec<String>,
    pub shopping_list: Vec<String>,
}

/// Any failure of the external generator for one call; the caller always
/// recovers with the fallback composer, never retries
#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    #[error("generator call timed out")]
    Timeout,
    #[error("generator transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generator payload invalid: {0}")]
    InvalidPayload(String),
    #[error("generator output rejected: {0}")]
    Rejected(String),
}

/// Client for the optional external copy generator. Invoked at most once
/// per recommendation with a hard deadline.
pub struct GeneratorClient {
    http: HttpClient,
    api_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

/// Minimal chat-completions response shape
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl GeneratorClient {
    /// Returns a client only when an API key is configured; otherwise the
    /// pipeline runs fallback-only
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.generator_api_key.clone()?;
        Some(Self {
            http: HttpClient::new(),
            api_url: config.generator_api_url.clone(),
            api_key,
            model: config.generator_model.clone(),
            timeout: Duration::from_millis(config.generator_timeout_ms),
        })
    }

    /// Asks the generator for exactly three validated selections from the
    /// shortlist. Every failure mode collapses into a `GeneratorError`.
    pub async fn generate(
        &self,
        quiz: &QuizResponse,
        shortlist: &[ScoredCostume<'_>],
    ) -> Result<Vec<GeneratedPick>, GeneratorError> {
        let prompt = build_prompt(quiz, shortlist);

        let request = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": prompt }
                ],
                "response_format": { "type": "json_object" }
            }))
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| GeneratorError::Timeout)??;

        let body: ChatResponse = response.error_for_status()?.json().await?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| GeneratorError::InvalidPayload("no choices".to_string()))?;

        let picks: Vec<GeneratedPick> = serde_json::from_str(content)
            .map_err(|e| GeneratorError::InvalidPayload(e.to_string()))?;

        let shortlist_ids: HashSet<&str> =
            shortlist.iter().map(|s| s.costume.id.as_str()).collect();
        validate_picks(&picks, &shortlist_ids)?;

        Ok(picks)
    }
}

const SYSTEM_PROMPT: &str = "You are a costume copywriter. Respond with a JSON \
array of exactly 3 selections drawn only from the provided shortlist ids, each \
with 2-3 short 'why' lines and a 3-7 item shopping_list.";

fn build_prompt(quiz: &QuizResponse, shortlist: &[ScoredCostume<'_>]) -> String {
    let entries: Vec<String> = shortlist
        .iter()
        .map(|s| {
            format!(
                "- id={} name={} anchor={} items={}",
                s.costume.id,
                s.costume.name,
                s.costume.requirements.anchor,
                s.costume.requirements.items.join(", ")
            )
        })
        .collect();

    format!(
        "Goals: {:?}. Niche target: {}. Shortlist:\n{}",
        quiz.goals,
        quiz.niche_target,
        entries.join("\n")
    )
}

/// Strict acceptance check: wrong arity, foreign or duplicate ids, why or
/// shopping-list counts out of range, or a banned phrase anywhere all
/// reject the batch as a whole. No partial acceptance.
pub fn validate_picks(
    picks: &[GeneratedPick],
    shortlist_ids: &HashSet<&str>,
) -> Result<(), GeneratorError> {
    if picks.len() != EXPECTED_PICKS {
        return Err(GeneratorError::Rejected(format!(
            "expected {} selections, got {}",
            EXPECTED_PICKS,
            picks.len()
        )));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for pick in picks {
        if !shortlist_ids.contains(pick.id.as_str()) {
            return Err(GeneratorError::Rejected(format!(
                "id '{}' is not in the shortlist",
                pick.id
            )));
        }
        if !seen.insert(pick.id.as_str()) {
            return Err(GeneratorError::Rejected(format!(
                "duplicate id '{}'",
                pick.id
            )));
        }
        if !(MIN_WHY..=MAX_WHY).contains(&pick.why.len()) {
            return Err(GeneratorError::Rejected(format!(
                "id '{}' has {} why lines",
                pick.id,
                pick.why.len()
            )));
        }
        if !(MIN_SHOPPING..=MAX_SHOPPING).contains(&pick.shopping_list.len()) {
            return Err(GeneratorError::Rejected(format!(
                "id '{}' has {} shopping items",
                pick.id,
                pick.shopping_list.len()
            )));
        }
        for line in pick.why.iter().chain(pick.shopping_list.iter()) {
            let lowered = line.to_lowercase();
            if let Some(phrase) = BANNED_PHRASES.iter().find(|p| lowered.contains(**p)) {
                return Err(GeneratorError::Rejected(format!(
                    "banned phrase '{}'",
                    phrase
                )));
            }
        }
    }

    Ok(())
}
