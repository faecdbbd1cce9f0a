mod fallback;
mod prediction;

pub mod app;
pub mod client;
pub mod config;

pub use app::start_app;
pub use client::{DataSource, PredictionClient, Sourced};
pub use fallback::FallbackCatalog;
pub use prediction::Prediction;
