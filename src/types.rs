// types.rs — wire-format domain model.
//
// Everything here crosses the REST boundary as camelCase JSON; the SPA
// consumes these payloads unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of moods the analyzer may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Relax,
    Energy,
    Inspiration,
    Calm,
    Adventure,
    Melancholy,
    Joy,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Relax,
        Mood::Energy,
        Mood::Inspiration,
        Mood::Calm,
        Mood::Adventure,
        Mood::Melancholy,
        Mood::Joy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Relax => "Relax",
            Mood::Energy => "Energy",
            Mood::Inspiration => "Inspiration",
            Mood::Calm => "Calm",
            Mood::Adventure => "Adventure",
            Mood::Melancholy => "Melancholy",
            Mood::Joy => "Joy",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a mood scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodProfile {
    pub primary_mood: Mood,
    /// 0..=1 as returned by the model; not clamped server-side.
    pub intensity: f64,
    pub description: String,
    /// 2-3 hex colors the frontend feeds into its background gradients.
    pub suggested_colors: Vec<String>,
}

/// The three categories every travel plan contains, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItineraryKind {
    Relax,
    Energy,
    Inspiration,
}

impl ItineraryKind {
    pub const ALL: [ItineraryKind; 3] = [
        ItineraryKind::Relax,
        ItineraryKind::Energy,
        ItineraryKind::Inspiration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItineraryKind::Relax => "Relax",
            ItineraryKind::Energy => "Energy",
            ItineraryKind::Inspiration => "Inspiration",
        }
    }
}

/// One generated itinerary.
///
/// The flight/accommodation/food details are demanded on the generation
/// path but tolerated as absent everywhere else; the quote mail
/// substitutes fallback copy for missing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryOption {
    /// Sequential `opt-{index}` id, assigned after generation.
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ItineraryKind,
    /// City and country, e.g. "Lisbon, Portugal".
    pub destination: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub estimated_cost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_details: Option<String>,
    /// Image prompt as generated; replaced with a seeded placeholder URL
    /// during post-processing.
    #[serde(default)]
    pub image: String,
}

/// Full response of the itineraries operation: the caller's profile echoed
/// back plus the three options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    pub mood_profile: MoodProfile,
    pub options: Vec<ItineraryOption>,
}
