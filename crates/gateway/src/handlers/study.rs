//! Study-assistant handlers
//!
//! Thin wrappers over [`Assistant`]; prompt construction and reply parsing
//! live in the common crate. Every call records a generation metric with the
//! operation name and outcome.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::AppState;
use adelante_catalog::Locale;
use adelante_common::{
    auth::SessionUser,
    errors::{AppError, Result},
    genai::{Flashcard, GrammarCheck},
    metrics,
};

const MAX_FLASHCARDS: usize = 20;

/// Tutoring question request
#[derive(Debug, Deserialize, Validate)]
pub struct AnswerRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question: String,

    /// Override the session locale for this request
    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub locale: Locale,
}

/// Translation request
#[derive(Debug, Deserialize, Validate)]
pub struct TranslateRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,

    /// Language to translate into
    pub target: Locale,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translated: String,
    pub target: Locale,
}

/// Grammar check request
#[derive(Debug, Deserialize, Validate)]
pub struct GrammarRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,

    /// Language the text is written in
    #[serde(default)]
    pub locale: Option<Locale>,
}

/// Flashcard generation request
#[derive(Debug, Deserialize, Validate)]
pub struct FlashcardRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    /// Cards to generate; defaults from configuration
    #[serde(default)]
    pub count: Option<usize>,

    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct FlashcardResponse {
    pub topic: String,
    pub cards: Vec<Flashcard>,
}

/// Clamp the requested card count to a sane range
pub(crate) fn clamp_count(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).clamp(1, MAX_FLASHCARDS)
}

async fn record<T>(operation: &str, start: Instant, result: Result<T>) -> Result<T> {
    metrics::record_generation(start.elapsed().as_secs_f64(), operation, result.is_ok());
    result
}

/// Answer a study question
pub async fn answer(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    request.validate().map_err(AppError::from)?;

    let locale = request.locale.unwrap_or(user.locale);
    let start = Instant::now();

    let answer = record(
        "answer",
        start,
        state.assistant.answer(&request.question, locale).await,
    )
    .await?;

    Ok(Json(AnswerResponse { answer, locale }))
}

/// Translate text between the supported languages
pub async fn translate(
    State(state): State<AppState>,
    _user: SessionUser,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    request.validate().map_err(AppError::from)?;

    let start = Instant::now();
    let translated = record(
        "translate",
        start,
        state.assistant.translate(&request.text, request.target).await,
    )
    .await?;

    Ok(Json(TranslateResponse {
        translated,
        target: request.target,
    }))
}

/// Check grammar and spelling
pub async fn check_grammar(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<GrammarRequest>,
) -> Result<Json<GrammarCheck>> {
    request.validate().map_err(AppError::from)?;

    let locale = request.locale.unwrap_or(user.locale);
    let start = Instant::now();

    let check = record(
        "grammar",
        start,
        state.assistant.check_grammar(&request.text, locale).await,
    )
    .await?;

    Ok(Json(check))
}

/// Generate study flashcards for a topic
pub async fn flashcards(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<FlashcardRequest>,
) -> Result<Json<FlashcardResponse>> {
    request.validate().map_err(AppError::from)?;

    let locale = request.locale.unwrap_or(user.locale);
    let count = clamp_count(request.count, state.config.genai.flashcard_count);
    let start = Instant::now();

    let cards = record(
        "flashcards",
        start,
        state.assistant.flashcards(&request.topic, locale, count).await,
    )
    .await?;

    Ok(Json(FlashcardResponse {
        topic: request.topic,
        cards,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(None, 5), 5);
        assert_eq!(clamp_count(Some(3), 5), 3);
        assert_eq!(clamp_count(Some(0), 5), 1);
        assert_eq!(clamp_count(Some(500), 5), MAX_FLASHCARDS);
    }

    #[test]
    fn test_answer_request_validation() {
        let request = AnswerRequest {
            question: String::new(),
            locale: None,
        };
        assert!(request.validate().is_err());

        let request = AnswerRequest {
            question: "What is the quadratic formula?".into(),
            locale: Some(Locale::Es),
        };
        assert!(request.validate().is_ok());
    }
}
