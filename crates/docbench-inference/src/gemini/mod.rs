//! Gemini `generateContent` gateway.
//!
//! # Example
//!
//! ```rust,no_run
//! use docbench_core::{GenerationSettings, ModelGateway};
//! use docbench_inference::gemini::GeminiGateway;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Key is read from API_KEY / GEMINI_API_KEY at call time
//!     let gateway = GeminiGateway::from_env().unwrap();
//!
//!     let answer = gateway
//!         .ask_question("Aspirin was approved in 1899.", "When?", &GenerationSettings::qna())
//!         .await
//!         .unwrap();
//!     println!("{}", answer);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{GeminiGateway, API_KEY_HEADER};
#[cfg(any(test, feature = "mock"))]
pub(crate) use backend::{or_fallback, parse_note_reply};
pub use error::{to_docbench_error, GeminiErrorCode};
pub use types::*;
