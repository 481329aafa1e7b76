//! Generative-text provider facade
//!
//! Provides a unified interface over generative language APIs:
//! - Gemini (Generative Language REST API)
//! - Mock (scripted replies for development and tests)
//!
//! The [`Assistant`] layers the study operations on top of the raw
//! generator: tutoring answers, translation, grammar checking, and flashcard
//! synthesis. Prompt construction and reply parsing live here so the
//! handlers stay thin.

use crate::config::GenAiConfig;
use crate::errors::{AppError, Result};
use adelante_catalog::Locale;
use async_trait::async_trait;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Trait for text generation
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for a single prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Gemini generation client
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &GenAiConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("Failed to build generation HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config
                .api_base
                .clone()
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.max_retries,
        })
    }

    /// Make request with retry
    async fn request_with_retry(&self, prompt: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                // Exponential backoff
                let delay = Duration::from_millis(100 * (2_u64.pow(attempt)));
                tokio::time::sleep(delay).await;
            }

            match self.make_request(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        error = %e,
                        "Generation request failed, retrying"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::Generation {
            message: "Unknown error after retries".to_string(),
        }))
    }

    async fn make_request(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::GenerationTimeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    AppError::Generation {
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation {
                message: format!("API error {}: {}", status, body),
            });
        }

        let result: GenerateResponse = response.json().await.map_err(|e| AppError::Generation {
            message: format!("Failed to parse response: {}", e),
        })?;

        let text: String = result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::Generation {
                message: "Empty response".to_string(),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.request_with_retry(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Mock generator for development and tests
pub struct MockGenerator {
    reply: String,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            reply: "This is a scripted development reply; configure a real \
                    generation provider for live answers."
                .to_string(),
        }
    }

    /// Mock returning a fixed scripted reply
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "mock-generator"
    }
}

/// Create a generator based on configuration
pub fn create_generator(config: &GenAiConfig) -> Result<Arc<dyn TextGenerator>> {
    match config.provider.as_str() {
        "gemini" => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| AppError::Configuration {
                    message: "genai.api_key is required for the gemini provider".to_string(),
                })?;
            Ok(Arc::new(GeminiClient::new(config, api_key)?))
        }
        "mock" => Ok(Arc::new(MockGenerator::new())),
        other => {
            tracing::warn!(provider = other, "Unknown generation provider, using mock");
            Ok(Arc::new(MockGenerator::new()))
        }
    }
}

/// Result of a grammar check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrammarCheck {
    pub corrected: String,
    pub has_errors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A question/answer study card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Study operations layered on a text generator.
pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// The model behind this assistant.
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Answer a study question in the requested language.
    pub async fn answer(&self, question: &str, locale: Locale) -> Result<String> {
        self.generator.generate(&answer_prompt(question, locale)).await
    }

    /// Translate text into the target language, preserving meaning and tone.
    pub async fn translate(&self, text: &str, target: Locale) -> Result<String> {
        let reply = self
            .generator
            .generate(&translate_prompt(text, target))
            .await?;
        Ok(reply.trim().to_string())
    }

    /// Check grammar and spelling; returns the correction and an optional
    /// explanation. An unparseable reply degrades to "no errors found".
    pub async fn check_grammar(&self, text: &str, locale: Locale) -> Result<GrammarCheck> {
        let reply = self
            .generator
            .generate(&grammar_prompt(text, locale))
            .await?;
        Ok(parse_grammar_reply(&reply, text))
    }

    /// Generate study flashcards for a topic.
    pub async fn flashcards(
        &self,
        topic: &str,
        locale: Locale,
        count: usize,
    ) -> Result<Vec<Flashcard>> {
        let reply = self
            .generator
            .generate(&flashcard_prompt(topic, locale, count))
            .await?;
        parse_flashcard_reply(&reply)
    }
}

fn answer_prompt(question: &str, locale: Locale) -> String {
    format!(
        "You are a patient study tutor for college students. Answer the \
         following question clearly, step by step where that helps, in {}.\n\n\
         Question: {}",
        locale.language_name(),
        question
    )
}

fn translate_prompt(text: &str, target: Locale) -> String {
    format!(
        "Translate the following {} text to {}. Maintain the original meaning \
         and tone. Only return the translated text without any additional \
         comments:\n\n\"{}\"",
        target.other().language_name(),
        target.language_name(),
        text
    )
}

fn grammar_prompt(text: &str, locale: Locale) -> String {
    format!(
        "Check the grammar and spelling of the following {} text. If there \
         are errors, provide the corrected version and a brief explanation of \
         the errors. If there are no errors, just return \"CORRECT\".\n\n\
         Text: \"{}\"\n\n\
         Format your response as:\n\
         Corrected: [corrected text]\n\
         Explanation: [brief explanation of errors, if any]",
        locale.language_name(),
        text
    )
}

fn flashcard_prompt(topic: &str, locale: Locale, count: usize) -> String {
    format!(
        "Create {} educational flashcards about \"{}\" in {}. Each flashcard \
         should have a question on one side and the answer on the other. Make \
         the content educational, accurate, and suitable for students.\n\n\
         Format your response as a JSON array with this structure:\n\
         [{{\"question\": \"Question 1\", \"answer\": \"Answer 1\"}}]\n\n\
         Only return the JSON array without any additional text.",
        count,
        topic,
        locale.language_name()
    )
}

/// Parse a grammar-check reply into its corrected text and explanation.
fn parse_grammar_reply(reply: &str, original: &str) -> GrammarCheck {
    if reply.contains("CORRECT") {
        return GrammarCheck {
            corrected: original.to_string(),
            has_errors: false,
            explanation: None,
        };
    }

    let corrected_re =
        Regex::new(r"(?s)Corrected:\s*(.*?)(?:\nExplanation:|$)").expect("valid regex");
    let explanation_re = Regex::new(r"(?s)Explanation:\s*(.*)$").expect("valid regex");

    let corrected = corrected_re
        .captures(reply)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| original.to_string());

    let explanation = explanation_re
        .captures(reply)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());

    GrammarCheck {
        has_errors: corrected != original,
        corrected,
        explanation,
    }
}

/// Extract the JSON flashcard array from a model reply.
fn parse_flashcard_reply(reply: &str) -> Result<Vec<Flashcard>> {
    let start = reply.find('[');
    let end = reply.rfind(']');

    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => {
            return Err(AppError::Generation {
                message: "Reply contained no flashcard array".to_string(),
            })
        }
    };

    let cards: Vec<Flashcard> = serde_json::from_str(json).map_err(|e| AppError::Generation {
        message: format!("Failed to parse flashcards: {}", e),
    })?;

    if cards.is_empty() {
        return Err(AppError::Generation {
            message: "Reply contained an empty flashcard array".to_string(),
        });
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_generator_replies() {
        let generator = MockGenerator::with_reply("hola");
        assert_eq!(generator.generate("anything").await.unwrap(), "hola");
        assert_eq!(generator.model_name(), "mock-generator");
    }

    #[tokio::test]
    async fn test_translate_trims_reply() {
        let assistant = Assistant::new(Arc::new(MockGenerator::with_reply("  Hola mundo \n")));
        let translated = assistant.translate("Hello world", Locale::Es).await.unwrap();
        assert_eq!(translated, "Hola mundo");
    }

    #[tokio::test]
    async fn test_grammar_correct_reply() {
        let assistant = Assistant::new(Arc::new(MockGenerator::with_reply("CORRECT")));
        let check = assistant
            .check_grammar("All good here.", Locale::En)
            .await
            .unwrap();
        assert!(!check.has_errors);
        assert_eq!(check.corrected, "All good here.");
        assert!(check.explanation.is_none());
    }

    #[tokio::test]
    async fn test_grammar_parses_correction_and_explanation() {
        let reply = "Corrected: I went to the store.\nExplanation: \"goed\" is not a word.";
        let assistant = Assistant::new(Arc::new(MockGenerator::with_reply(reply)));

        let check = assistant
            .check_grammar("I goed to the store.", Locale::En)
            .await
            .unwrap();

        assert!(check.has_errors);
        assert_eq!(check.corrected, "I went to the store.");
        assert_eq!(
            check.explanation.as_deref(),
            Some("\"goed\" is not a word.")
        );
    }

    #[tokio::test]
    async fn test_grammar_unparseable_reply_degrades_to_original() {
        let assistant = Assistant::new(Arc::new(MockGenerator::with_reply("no idea")));
        let check = assistant.check_grammar("Texto.", Locale::Es).await.unwrap();
        assert!(!check.has_errors);
        assert_eq!(check.corrected, "Texto.");
    }

    #[tokio::test]
    async fn test_flashcards_extracted_from_noisy_reply() {
        let reply = "Here you go:\n[{\"question\": \"Q1\", \"answer\": \"A1\"}, \
                     {\"question\": \"Q2\", \"answer\": \"A2\"}]\nEnjoy!";
        let assistant = Assistant::new(Arc::new(MockGenerator::with_reply(reply)));

        let cards = assistant
            .flashcards("photosynthesis", Locale::En, 2)
            .await
            .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "Q1");
        assert_eq!(cards[1].answer, "A2");
    }

    #[tokio::test]
    async fn test_flashcards_reject_reply_without_array() {
        let assistant = Assistant::new(Arc::new(MockGenerator::with_reply("sorry, no cards")));
        let err = assistant
            .flashcards("algebra", Locale::En, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation { .. }));
    }

    #[test]
    fn test_prompts_name_the_target_language() {
        assert!(answer_prompt("why?", Locale::Es).contains("Spanish"));

        let prompt = translate_prompt("Hello", Locale::Es);
        assert!(prompt.contains("English text to Spanish"));

        assert!(grammar_prompt("text", Locale::En).contains("English text"));
        assert!(flashcard_prompt("algebra", Locale::Es, 3).starts_with("Create 3"));
    }
}
