// engine/mod.rs — the mood-to-itinerary engine behind the REST layer.
//
// `EchoEngine` is the seam routes and tests talk to; `GeminiEngine` is the
// production implementation on top of the generateContent client.

pub mod gemini;
pub mod prompts;
pub mod schema;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::EngineSettings;
use crate::types::{ItineraryOption, MoodProfile, TravelPlan};
use gemini::{GeminiClient, GeminiError};

/// Mood analysis and itinerary generation.
#[async_trait]
pub trait EchoEngine: Send + Sync {
    /// Derive a mood profile from a free-text description.
    async fn analyze_mood(&self, text: &str) -> Result<MoodProfile>;

    /// Generate the three itinerary options for a profile and budget.
    async fn generate_itineraries(
        &self,
        profile: &MoodProfile,
        budget: &str,
    ) -> Result<TravelPlan>;
}

/// What the model returns for the itineraries operation; ids and image
/// URLs are attached afterwards.
#[derive(Debug, Deserialize)]
struct GeneratedOptions {
    options: Vec<ItineraryOption>,
}

/// Production engine: one model call per operation, no retries.
pub struct GeminiEngine {
    client: GeminiClient,
}

impl GeminiEngine {
    pub fn new(settings: &EngineSettings) -> Result<Self> {
        let client = GeminiClient::new(
            settings.api_key.clone(),
            settings.model.clone(),
            std::time::Duration::from_secs(settings.request_timeout_secs),
        )?;
        Ok(Self { client })
    }
}

#[async_trait]
impl EchoEngine for GeminiEngine {
    async fn analyze_mood(&self, text: &str) -> Result<MoodProfile> {
        let raw = self
            .client
            .generate(
                &prompts::mood_analysis_prompt(text),
                &prompts::mood_analysis_schema(),
            )
            .await?;
        let profile: MoodProfile =
            serde_json::from_str(&raw).map_err(GeminiError::InvalidJson)?;
        Ok(profile)
    }

    async fn generate_itineraries(
        &self,
        profile: &MoodProfile,
        budget: &str,
    ) -> Result<TravelPlan> {
        let raw = self
            .client
            .generate(
                &prompts::itinerary_prompt(profile, budget),
                &prompts::itinerary_schema(),
            )
            .await?;
        let generated: GeneratedOptions =
            serde_json::from_str(&raw).map_err(GeminiError::InvalidJson)?;
        Ok(finalize_plan(profile.clone(), generated.options))
    }
}

/// Attach sequential ids and seeded placeholder image URLs; the caller's
/// profile is echoed back untouched.
fn finalize_plan(profile: MoodProfile, mut options: Vec<ItineraryOption>) -> TravelPlan {
    for (index, option) in options.iter_mut().enumerate() {
        option.id = format!("opt-{index}");
        option.image = format!(
            "https://picsum.photos/seed/{}/800/600",
            percent_encode(&option.destination)
        );
    }
    TravelPlan {
        mood_profile: profile,
        options,
    }
}

/// Percent-encode a placeholder-image seed. RFC 3986 unreserved characters
/// pass through; everything else is %XX-escaped bytewise.
fn percent_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push('%');
                result.push_str(&format!("{byte:02X}"));
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItineraryKind, Mood};

    fn profile() -> MoodProfile {
        MoodProfile {
            primary_mood: Mood::Joy,
            intensity: 0.9,
            description: "Bright and open".to_string(),
            suggested_colors: vec!["#FFD700".to_string(), "#FF8C00".to_string()],
        }
    }

    fn option(destination: &str) -> ItineraryOption {
        ItineraryOption {
            id: String::new(),
            title: "Test".to_string(),
            kind: ItineraryKind::Relax,
            destination: destination.to_string(),
            description: "x".to_string(),
            highlights: vec![],
            estimated_cost: "1000€".to_string(),
            flight_details: None,
            accommodation_details: None,
            food_details: None,
            image: "A quiet cove at dawn".to_string(),
        }
    }

    #[test]
    fn finalize_assigns_sequential_ids() {
        let plan = finalize_plan(
            profile(),
            vec![option("Bali"), option("Oslo"), option("Kyoto")],
        );
        let ids: Vec<&str> = plan.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["opt-0", "opt-1", "opt-2"]);
    }

    #[test]
    fn finalize_seeds_placeholder_images() {
        let plan = finalize_plan(profile(), vec![option("Tokyo, Japan")]);
        assert_eq!(
            plan.options[0].image,
            "https://picsum.photos/seed/Tokyo%2C%20Japan/800/600"
        );
    }

    #[test]
    fn finalize_echoes_the_profile_untouched() {
        let plan = finalize_plan(profile(), vec![]);
        assert_eq!(plan.mood_profile.primary_mood, Mood::Joy);
        assert_eq!(plan.mood_profile.intensity, 0.9);
        assert_eq!(plan.mood_profile.description, "Bright and open");
        assert_eq!(plan.mood_profile.suggested_colors.len(), 2);
    }

    #[test]
    fn percent_encoding_keeps_unreserved_bytes() {
        assert_eq!(percent_encode("Oslo-Norway_1.0~x"), "Oslo-Norway_1.0~x");
        assert_eq!(percent_encode("São Paulo"), "S%C3%A3o%20Paulo");
        assert_eq!(percent_encode("a/b"), "a%2Fb");
    }

    #[test]
    fn generated_options_parse_without_ids() {
        let generated: GeneratedOptions = serde_json::from_str(
            r#"{"options": [{
                "title": "Fuga",
                "type": "Energy",
                "destination": "Lisbon, Portugal",
                "description": "x",
                "highlights": ["surf"],
                "estimatedCost": "800€",
                "flightDetails": "Volo A/R da Roma, 3h",
                "accommodationDetails": "Ostello sul mare",
                "foodDetails": "Pastéis e pesce alla griglia",
                "image": "Waves at Cascais"
            }]}"#,
        )
        .unwrap();
        assert_eq!(generated.options.len(), 1);
        assert_eq!(generated.options[0].id, "");
        assert_eq!(generated.options[0].kind, ItineraryKind::Energy);
    }
}
