//! Structured logging schema for docbench.
//!
//! Every crate logs with the same field names so one filter works across
//! subsystems:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `subsystem` | One of the `SUBSYSTEM_*` constants below |
//! | `component` | Component within the subsystem ("store", "gemini", ...) |
//! | `op` | Logical operation ("perform_ocr", "add_file", ...) |
//! | `doc_id` | Document id being operated on |
//! | `model` | Model identifier sent to the gateway |
//! | `max_tokens` | Output token budget sent to the gateway |
//! | `prompt_len` / `response_len` | Byte lengths of request and reply text |
//! | `duration_ms` | Wall-clock duration of a gateway call |
//! | `status` | HTTP status of a failed request |
//! | `error` | Display of the error being reported |
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | A gateway call failed; the operation is terminal |
//! | WARN  | Recoverable issue, e.g. a note key was missing and defaulted |
//! | INFO  | Operation completions, document added/removed |
//! | DEBUG | Request shaping, settings, intermediate sizes |
//! | TRACE | Per-token or per-node iteration |

/// Document store, ingestion, and local analysis.
pub const SUBSYSTEM_CORE: &str = "core";

/// Remote model gateway.
pub const SUBSYSTEM_INFERENCE: &str = "inference";

/// Session orchestration.
pub const SUBSYSTEM_WORKBENCH: &str = "workbench";
