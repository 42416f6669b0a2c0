//! Free-text insight generation through an LLM collaborator.
//!
//! The generator is an opaque natural-language service: it receives derived
//! astrological facts and returns text that is consumed as-is. No part of
//! the chart arithmetic depends on its output.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::HoroscopeError;
use crate::models::{BirthDetails, Transit};
use crate::services::chat::{ChatRole, ChatTurn};

/// Opaque text completion over a system prompt and a bounded history.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
    ) -> Result<String, HoroscopeError>;
}

/// Groq chat-completions configuration.
///
/// # Environment Variables
/// - `GROQ_API_KEY` (required)
/// - `GROQ_MODEL` (optional, default: `llama-3.1-8b-instant`)
/// - `GROQ_BASE_URL` (optional, default: `https://api.groq.com/openai/v1`)
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GroqConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| "GROQ_API_KEY environment variable not set".to_string())?;
        let model = std::env::var("GROQ_MODEL")
            .unwrap_or_else(|_| "llama-3.1-8b-instant".to_string());
        let base_url = std::env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string());
        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}

/// Groq chat-completions client.
pub struct GroqClient {
    client: reqwest::Client,
    config: GroqConfig,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl InsightGenerator for GroqClient {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
    ) -> Result<String, HoroscopeError> {
        let mut messages = vec![json!({"role": "system", "content": system_prompt})];
        for turn in history {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            };
            messages.push(json!({"role": role, "content": turn.content}));
        }

        let body = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": 0.7,
            "max_tokens": 1000,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| HoroscopeError::Insight(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HoroscopeError::Insight(format!(
                "completion endpoint returned HTTP {}",
                response.status()
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| HoroscopeError::Insight(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| HoroscopeError::Insight("completion returned no choices".to_string()))
    }
}

/// Canned generator for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticInsightGenerator {
    pub reply: String,
}

#[async_trait]
impl InsightGenerator for StaticInsightGenerator {
    async fn complete(
        &self,
        _system_prompt: &str,
        _history: &[ChatTurn],
    ) -> Result<String, HoroscopeError> {
        Ok(self.reply.clone())
    }
}

/// System prompt for the conversational chart advisor.
pub const ADVISOR_SYSTEM_PROMPT: &str = "You are an expert spiritual advisor and astrologer. \
Answer conversationally, grounding every statement in the chart facts you were given.";

/// Per-house insight request from the ascendant and cusp positions.
pub fn house_insights_prompt(ascendant: f64, house_cusps: &[f64; 12]) -> String {
    let mut prompt = format!(
        "As a Vedic astrology expert, analyze the following house cusps and \
ascendant positions:\n\nAscendant: {ascendant:.2} deg\n\nHouse Positions:\n"
    );
    for (i, cusp) in house_cusps.iter().enumerate() {
        prompt.push_str(&format!("House {}: {:.2} deg\n", i + 1, cusp));
    }
    prompt.push_str(
        "\nBased on these positions, provide 5 key insights about:\n\
1. The person's life path and personality (based on Ascendant)\n\
2. Career and public standing (10th house)\n\
3. Relationships and partnerships (7th house)\n\
4. Wealth and possessions (2nd house)\n\
5. Home and emotional well-being (4th house)\n\n\
Format each insight on a new line starting with the number followed by your insight.",
    );
    prompt
}

/// Personalized recommendation request from birth details and transits.
pub fn recommendations_prompt(details: &BirthDetails, transits: &[Transit]) -> String {
    let transit_lines: Vec<String> = transits
        .iter()
        .map(|t| format!("{} in {} ({}th house)", t.body, t.sign, t.house))
        .collect();
    format!(
        "As a spiritual advisor with expertise in astrology, generate personalized \
recommendations for someone with the following birth and transit details:\n\n\
Birth Details:\nDate: {}/{}/{}\nTime: {}:{:02}\nLocation: {}, {}\n\n\
Current Planetary Transits:\n{}\n\n\
Generate 6 recommendations (2 crystals, 1 book, 2 spiritual practices, 1 ritual) \
as a JSON array where each entry has the fields: id, title, description, category \
(one of \"crystals\", \"books\", \"practices\", \"rituals\"), affinity (0-100) and \
rating (1-5, one decimal place). Ensure the response is valid JSON.",
        details.day,
        details.month,
        details.year,
        details.hour,
        details.minute,
        details.city,
        details.country,
        transit_lines.join("\n"),
    )
}

/// One parsed recommendation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub affinity: f64,
    pub rating: f64,
}

/// Parse the generator's recommendation reply, assigning ids where missing.
pub fn parse_recommendations(reply: &str) -> Result<Vec<Recommendation>, HoroscopeError> {
    let mut recommendations: Vec<Recommendation> = serde_json::from_str(reply)
        .map_err(|e| HoroscopeError::Insight(format!("invalid recommendation JSON: {e}")))?;
    for rec in &mut recommendations {
        if rec.id.is_empty() {
            rec.id = uuid::Uuid::new_v4().to_string();
        }
    }
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CelestialBody;

    #[test]
    fn test_house_insights_prompt_lists_all_cusps() {
        let cusps = [10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 190.0, 220.0, 250.0, 280.0, 310.0, 340.0];
        let prompt = house_insights_prompt(10.0, &cusps);
        for i in 1..=12 {
            assert!(prompt.contains(&format!("House {i}:")));
        }
        assert!(prompt.contains("Ascendant: 10.00 deg"));
    }

    #[test]
    fn test_recommendations_prompt_includes_transits() {
        let details = BirthDetails {
            year: 1990,
            month: 1,
            day: 1,
            hour: 12,
            minute: 30,
            city: "Mumbai".to_string(),
            country: "India".to_string(),
            latitude: None,
            longitude: None,
        };
        let transits = [Transit {
            body: CelestialBody::Jupiter,
            longitude: 95.0,
            degree_in_sign: 5.0,
            sign: crate::models::ZodiacSign::Cancer,
            house: 4,
            is_retrograde: false,
        }];
        let prompt = recommendations_prompt(&details, &transits);
        assert!(prompt.contains("Jupiter in Cancer (4th house)"));
        assert!(prompt.contains("Time: 12:30"));
    }

    #[test]
    fn test_parse_recommendations_fills_missing_ids() {
        let reply = r#"[
            {"title": "Amethyst", "description": "Calming.", "category": "crystals", "affinity": 85, "rating": 4.8},
            {"id": "7", "title": "The Power of Now", "description": "Reading.", "category": "books", "affinity": 90, "rating": 4.9}
        ]"#;
        let recs = parse_recommendations(reply).unwrap();
        assert_eq!(recs.len(), 2);
        assert!(!recs[0].id.is_empty());
        assert_eq!(recs[1].id, "7");
    }

    #[test]
    fn test_parse_recommendations_rejects_non_array() {
        let err = parse_recommendations("{\"oops\": true}").unwrap_err();
        assert!(matches!(err, HoroscopeError::Insight(_)));
    }

    #[tokio::test]
    async fn test_static_generator_echoes_reply() {
        let generator = StaticInsightGenerator {
            reply: "all good".to_string(),
        };
        let text = generator.complete(ADVISOR_SYSTEM_PROMPT, &[]).await.unwrap();
        assert_eq!(text, "all good");
    }
}
