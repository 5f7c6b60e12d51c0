//! # docbench-core
//!
//! Core types, traits, and local computation for the docbench document
//! intelligence workbench.
//!
//! This crate provides the document store and ingestion, structured-note
//! parsing, word-frequency analysis, mind-graph layout, the theme and
//! locale catalogs, and the [`ModelGateway`] trait that inference backends
//! implement.

pub mod defaults;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod locale;
pub mod logging;
pub mod models;
pub mod note;
pub mod store;
pub mod theme;
pub mod traits;
pub mod wordfreq;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use layout::{circular_layout, GraphLayout, PlacedLink, PlacedNode};
pub use locale::{strings, Language, Strings};
pub use models::*;
pub use note::{MindGraph, MindGraphLink, MindGraphNode, NoteFields, StructuredNote};
pub use store::DocumentStore;
pub use theme::{
    random_theme_index, theme_at, wheel_slices, Appearance, ResolvedStyle, Theme, WheelSlice,
    FLOWER_THEMES,
};
pub use traits::*;
pub use wordfreq::{top_words, word_frequencies};
