//! # docbench-workbench
//!
//! Session orchestration for the docbench document intelligence workbench.
//!
//! A [`Workbench`] binds the document store to the model gateway, one panel
//! per tab:
//! - Docs: upload, paste, remove
//! - OCR: transcribe images and PDFs, run an analysis prompt over the result
//! - Q&A: ask questions over every document's text
//! - Word graph: most frequent words across documents
//! - Smart note: structured notes with an editable raw JSON form
//!
//! Appearance (theme, dark mode, language) and transient notices live here
//! too; rendering does not.
//!
//! # Example
//!
//! ```rust,no_run
//! use docbench_workbench::{init_tracing, Workbench};
//!
//! #[tokio::main]
//! async fn main() -> docbench_core::Result<()> {
//!     init_tracing();
//!     let mut workbench = Workbench::from_env()?;
//!     workbench.paste("The FDA cleared the device in March 2024.");
//!     let answer = workbench.ask("When was it cleared?").await?;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod panels;
pub mod workbench;

pub use logging::init_tracing;
pub use panels::{NotePanel, OcrPanel, QnaPanel};
pub use workbench::{ActiveTab, Notice, NoticeKind, Workbench};
