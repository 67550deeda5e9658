// mail/template.rs — HTML quote mail.
//
// Every model- or client-supplied value is escaped before interpolation;
// the three detail fields fall back to static copy when absent or empty.

use crate::types::{ItineraryOption, MoodProfile};

const FLIGHT_FALLBACK: &str = "Incluso nel pacchetto standard";
const ACCOMMODATION_FALLBACK: &str = "Soggiorno in struttura selezionata";
const FOOD_FALLBACK: &str = "Trattamento in base alla destinazione";

pub fn quote_subject(itinerary: &ItineraryOption) -> String {
    format!("Il tuo preventivo EchoVibe: {}", itinerary.destination)
}

pub fn quote_html(itinerary: &ItineraryOption, profile: &MoodProfile) -> String {
    let highlights: String = itinerary
        .highlights
        .iter()
        .map(|highlight| format!("<li>{}</li>", escape_html(highlight)))
        .collect();

    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: auto; border: 1px solid #eee; padding: 20px; border-radius: 10px;">
  <h1 style="color: #000; text-transform: uppercase;">EchoVibe Studio</h1>
  <p>Ciao,</p>
  <p>Ecco il preventivo dettagliato basato sul tuo profilo emotivo: <strong>{mood}</strong>.</p>
  <hr style="border: 0; border-top: 1px solid #eee; margin: 20px 0;">
  <h2 style="color: #333;">{title} - {destination}</h2>
  <p>{description}</p>
  <h3>Dettagli del Viaggio:</h3>
  <ul>
    <li><strong>Volo:</strong> {flight}</li>
    <li><strong>Alloggio:</strong> {accommodation}</li>
    <li><strong>Vitto:</strong> {food}</li>
  </ul>
  <h3>Highlights:</h3>
  <ul>
    {highlights}
  </ul>
  <p style="font-size: 20px; font-weight: bold; color: #000;">Investimento Totale Stimato: {cost}</p>
  <hr style="border: 0; border-top: 1px solid #eee; margin: 20px 0;">
  <p style="font-size: 12px; color: #999;">Questo è un preventivo generato automaticamente da EchoVibe AI. I prezzi e la disponibilità possono variare.</p>
</div>"#,
        mood = profile.primary_mood,
        title = escape_html(&itinerary.title),
        destination = escape_html(&itinerary.destination),
        description = escape_html(&itinerary.description),
        flight = detail_or(itinerary.flight_details.as_deref(), FLIGHT_FALLBACK),
        accommodation = detail_or(
            itinerary.accommodation_details.as_deref(),
            ACCOMMODATION_FALLBACK
        ),
        food = detail_or(itinerary.food_details.as_deref(), FOOD_FALLBACK),
        highlights = highlights,
        cost = escape_html(&itinerary.estimated_cost),
    )
}

/// Empty strings take the fallback too, not just missing values.
fn detail_or(value: Option<&str>, fallback: &'static str) -> String {
    match value {
        Some(detail) if !detail.is_empty() => escape_html(detail),
        _ => fallback.to_string(),
    }
}

/// Escape the five characters that can break out of HTML text or
/// attribute context.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
