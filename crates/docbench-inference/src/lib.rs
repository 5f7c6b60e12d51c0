//! # docbench-inference
//!
//! Hosted model gateway for docbench.
//!
//! This crate provides:
//! - [`GeminiGateway`], a [`ModelGateway`] over the Gemini `generateContent`
//!   REST endpoint
//! - [`GeminiConfig`], loaded from code or `GEMINI_*` environment variables
//! - Mapping of API error statuses to docbench errors
//! - A scripted [`mock::MockGateway`] for tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Export the scripted mock gateway to dependent crates
//! - `integration`: Enable tests that call the live API
//!
//! # Example
//!
//! ```rust,no_run
//! use docbench_inference::{GeminiConfig, GeminiGateway, GenerationSettings, ModelGateway};
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = GeminiGateway::new(GeminiConfig::default().with_api_key("key")).unwrap();
//!     let text = gateway
//!         .perform_ocr("iVBORw0KGgo=", "image/png", &GenerationSettings::default())
//!         .await
//!         .unwrap();
//!     println!("{}", text);
//! }
//! ```

pub mod config;
pub mod gemini;

// Mock gateway for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use docbench_core::*;

pub use config::{ConfigError, ConfigResult, GeminiConfig};
pub use gemini::GeminiGateway;
