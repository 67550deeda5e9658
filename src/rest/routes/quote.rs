// rest/routes/quote.rs — POST /api/send-quote.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::ApiError;
use crate::mail::template;
use crate::types::{ItineraryOption, MoodProfile};
use crate::AppContext;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendQuoteRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub itinerary: Option<ItineraryOption>,
    #[serde(default)]
    pub mood_profile: Option<MoodProfile>,
}

pub async fn send_quote(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<SendQuoteRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = body.email.as_deref().map(str::trim).unwrap_or_default();
    let Some(itinerary) = body.itinerary else {
        return Err(ApiError::BadRequest("Missing email or itinerary data"));
    };
    if email.is_empty() {
        return Err(ApiError::BadRequest("Missing email or itinerary data"));
    }

    let Some(mailer) = &ctx.mailer else {
        info!(to = %email, "SMTP not configured, mocking email send");
        return Ok(Json(json!({
            "success": true,
            "message": "Mock email sent (SMTP not configured)"
        })));
    };

    // The quote template needs the profile; without it the send can only
    // produce a broken mail.
    let Some(profile) = body.mood_profile.as_ref() else {
        error!(to = %email, "send-quote request without moodProfile");
        return Err(ApiError::MailSend);
    };

    let subject = template::quote_subject(&itinerary);
    let html = template::quote_html(&itinerary, profile);
    match mailer.send(email, &subject, &html).await {
        Ok(()) => Ok(Json(json!({ "success": true }))),
        Err(e) => {
            error!("email send failed: {e:#}");
            Err(ApiError::MailSend)
        }
    }
}
