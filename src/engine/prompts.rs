// engine/prompts.rs — the two operation prompts and their declared schemas.
//
// The wording and field lists are what the frontend was built against;
// the schemas additionally pin the closed mood and category sets so the
// model cannot answer outside them.

use super::schema::Schema;
use crate::types::{ItineraryKind, Mood, MoodProfile};

pub fn mood_analysis_prompt(text: &str) -> String {
    format!(
        "Analyze the following user input and determine their current emotional state for travel planning.\n\
         User Text: {text}\n\
         \n\
         Return a JSON object with:\n\
         - primaryMood: One of {moods}\n\
         - intensity: A number between 0 and 1\n\
         - description: A brief explanation of why this mood was chosen.\n\
         - suggestedColors: An array of 2-3 hex colors that represent this mood.",
        moods = quoted_list(Mood::ALL.iter().map(|mood| mood.as_str())),
    )
}

pub fn mood_analysis_schema() -> Schema {
    Schema::object(
        [
            (
                "primaryMood",
                Schema::enumeration(Mood::ALL.iter().map(|mood| mood.as_str())),
            ),
            ("intensity", Schema::number()),
            ("description", Schema::string()),
            ("suggestedColors", Schema::array(Schema::string())),
        ],
        &["primaryMood", "intensity", "description", "suggestedColors"],
    )
}

pub fn itinerary_prompt(profile: &MoodProfile, budget: &str) -> String {
    format!(
        "Based on the following mood profile and budget, generate 3 distinct travel itinerary options.\n\
         Mood: {mood} ({description})\n\
         Intensity: {intensity}\n\
         Budget Range: {budget}\n\
         \n\
         The 3 options should be categorized as:\n\
         1. \"Relax\": Focus on recovery and peace.\n\
         2. \"Energy\": Focus on activity and excitement.\n\
         3. \"Inspiration\": Focus on culture, art, and new perspectives.\n\
         \n\
         For each option, provide:\n\
         - title: A catchy name.\n\
         - destination: City and Country.\n\
         - description: Why it fits the mood.\n\
         - highlights: 3 key activities.\n\
         - estimatedCost: A string representing the cost.\n\
         - flightDetails: Realistic flight information (e.g., \"Volo A/R da Roma, 2h 30m\").\n\
         - accommodationDetails: Realistic accommodation info (e.g., \"Boutique Hotel 4* in centro\").\n\
         - foodDetails: Realistic food/dining info based on the destination (e.g., \"Colazione inclusa, cena tipica in taverna\").\n\
         - image: A descriptive prompt for an image (e.g., \"A serene beach in Bali at sunset\").",
        mood = profile.primary_mood,
        description = profile.description,
        intensity = profile.intensity,
    )
}

pub fn itinerary_schema() -> Schema {
    let option = Schema::object(
        [
            ("id", Schema::string()),
            ("title", Schema::string()),
            (
                "type",
                Schema::enumeration(ItineraryKind::ALL.iter().map(|kind| kind.as_str())),
            ),
            ("destination", Schema::string()),
            ("description", Schema::string()),
            ("highlights", Schema::array(Schema::string())),
            ("estimatedCost", Schema::string()),
            ("flightDetails", Schema::string()),
            ("accommodationDetails", Schema::string()),
            ("foodDetails", Schema::string()),
            ("image", Schema::string()),
        ],
        &[
            "title",
            "type",
            "destination",
            "description",
            "highlights",
            "estimatedCost",
            "flightDetails",
            "accommodationDetails",
            "foodDetails",
            "image",
        ],
    );

    Schema::object([("options", Schema::array(option))], &["options"])
}

/// `'Relax', 'Energy', …` — the single-quoted list style the prompts use.
fn quoted_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> MoodProfile {
        MoodProfile {
            primary_mood: Mood::Adventure,
            intensity: 0.85,
            description: "Restless and curious".to_string(),
            suggested_colors: vec!["#FF6600".to_string()],
        }
    }

    #[test]
    fn mood_prompt_embeds_the_user_text() {
        let prompt = mood_analysis_prompt("oggi mi sento leggero e voglio partire");
        assert!(prompt.contains("User Text: oggi mi sento leggero e voglio partire"));
    }

    #[test]
    fn mood_prompt_lists_every_mood() {
        let prompt = mood_analysis_prompt("x");
        assert!(prompt.contains(
            "'Relax', 'Energy', 'Inspiration', 'Calm', 'Adventure', 'Melancholy', 'Joy'"
        ));
    }

    #[test]
    fn mood_schema_constrains_the_primary_mood() {
        let value = serde_json::to_value(mood_analysis_schema()).unwrap();
        assert_eq!(value["type"], "OBJECT");
        let allowed = value["properties"]["primaryMood"]["enum"].as_array().unwrap();
        assert_eq!(allowed.len(), Mood::ALL.len());
        assert_eq!(allowed[4], "Adventure");
        assert_eq!(value["required"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn itinerary_prompt_embeds_profile_and_budget() {
        let prompt = itinerary_prompt(&profile(), "500 - 1500€");
        assert!(prompt.contains("Mood: Adventure (Restless and curious)"));
        assert!(prompt.contains("Intensity: 0.85"));
        assert!(prompt.contains("Budget Range: 500 - 1500€"));
        assert!(prompt.contains("1. \"Relax\": Focus on recovery and peace."));
        assert!(prompt.contains("3. \"Inspiration\": Focus on culture, art, and new perspectives."));
    }

    #[test]
    fn itinerary_schema_requires_every_field_except_id() {
        let value = serde_json::to_value(itinerary_schema()).unwrap();
        assert_eq!(value["required"], serde_json::json!(["options"]));

        let item = &value["properties"]["options"]["items"];
        assert_eq!(item["type"], "OBJECT");
        let required: Vec<&str> = item["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(!required.contains(&"id"), "ids are assigned after generation");
        assert!(required.contains(&"flightDetails"));
        assert!(required.contains(&"image"));

        let kinds = item["properties"]["type"]["enum"].as_array().unwrap();
        assert_eq!(kinds.len(), 3);
    }
}
