pub mod health;
pub mod itineraries;
pub mod mood;
pub mod quote;
