pub mod check;
pub mod config;
pub mod engine;
pub mod error;
pub mod mail;
pub mod rest;
pub mod types;

use std::sync::Arc;

use config::AppConfig;
use engine::EchoEngine;
use mail::Mailer;

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    /// Mood analysis + itinerary generation backend.
    pub engine: Arc<dyn EchoEngine>,
    /// `None` when SMTP is not configured; send-quote then mocks deliveries.
    pub mailer: Option<Arc<dyn Mailer>>,
    pub started_at: std::time::Instant,
}
