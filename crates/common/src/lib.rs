//! Adelante Common Library
//!
//! Shared code for the Adelante services:
//! - Error types and HTTP error responses
//! - Configuration management
//! - Session token handling
//! - Identity provider facade
//! - Generative-text provider facade
//! - Metrics helpers

pub mod auth;
pub mod config;
pub mod errors;
pub mod genai;
pub mod identity;
pub mod metrics;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use genai::{Assistant, TextGenerator};
pub use identity::IdentityProvider;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
