// rest/routes/mood.rs — POST /api/mood-scan.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::error::ApiError;
use crate::types::MoodProfile;
use crate::AppContext;

#[derive(Deserialize)]
pub struct MoodScanRequest {
    #[serde(default)]
    pub text: Option<String>,
}

pub async fn mood_scan(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<MoodScanRequest>,
) -> Result<Json<MoodProfile>, ApiError> {
    let text = body.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Missing mood text"));
    }

    match ctx.engine.analyze_mood(text).await {
        Ok(profile) => Ok(Json(profile)),
        Err(e) => {
            error!("mood analysis failed: {e:#}");
            Err(ApiError::Engine("Failed to analyze mood"))
        }
    }
}
