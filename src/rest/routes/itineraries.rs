// rest/routes/itineraries.rs — POST /api/itineraries.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::error::ApiError;
use crate::types::{MoodProfile, TravelPlan};
use crate::AppContext;

/// Label the frontend substitutes when the custom budget field is left
/// empty; blank budgets here fall back to the same one.
const DEFAULT_BUDGET: &str = "Standard";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerariesRequest {
    pub mood_profile: MoodProfile,
    #[serde(default)]
    pub budget: Option<String>,
}

pub async fn itineraries(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ItinerariesRequest>,
) -> Result<Json<TravelPlan>, ApiError> {
    let budget = body
        .budget
        .as_deref()
        .map(str::trim)
        .filter(|budget| !budget.is_empty())
        .unwrap_or(DEFAULT_BUDGET);

    match ctx.engine.generate_itineraries(&body.mood_profile, budget).await {
        Ok(plan) => Ok(Json(plan)),
        Err(e) => {
            error!("itinerary generation failed: {e:#}");
            Err(ApiError::Engine("Failed to generate itineraries"))
        }
    }
}
