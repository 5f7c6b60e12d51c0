//! Structured notes produced by the note-generation call.
//!
//! The remote model is asked for a fixed JSON shape but nothing guarantees
//! it. Parsing here is lenient: a missing or mistyped key becomes its empty
//! value so the rest of the note still renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::defaults;
use crate::error::{Error, Result};
use crate::logging::SUBSYSTEM_CORE;

/// A concept in the mind graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindGraphNode {
    pub id: String,
    pub label: String,
    /// Importance, nominally 5-20.
    pub val: f64,
}

/// A relation between two concepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindGraphLink {
    pub source: String,
    pub target: String,
    /// Strength, nominally 1-10.
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindGraph {
    pub nodes: Vec<MindGraphNode>,
    pub links: Vec<MindGraphLink>,
}

impl MindGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&MindGraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.and_then(Value::as_object) else {
            if value.is_some_and(|v| !v.is_null()) {
                warn!(subsystem = SUBSYSTEM_CORE, component = "note", "mindGraph is not an object");
            }
            return Self::default();
        };

        let nodes = array_items(obj.get("nodes"))
            .filter_map(|n| {
                let id = scalar_string(n.get("id"))?;
                let label = scalar_string(n.get("label")).unwrap_or_else(|| id.clone());
                Some(MindGraphNode {
                    id,
                    label,
                    val: number(n.get("val")),
                })
            })
            .collect();

        let links = array_items(obj.get("links"))
            .filter_map(|l| {
                Some(MindGraphLink {
                    source: scalar_string(l.get("source"))?,
                    target: scalar_string(l.get("target"))?,
                    value: number(l.get("value")),
                })
            })
            .collect();

        Self { nodes, links }
    }
}

/// The five model-supplied fields of a note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteFields {
    pub formatted_text: String,
    pub entities: String,
    pub mind_graph: MindGraph,
    pub keywords: Vec<String>,
    pub questions: String,
}

impl NoteFields {
    /// Extract fields from a parsed JSON document. Never fails.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            warn!(
                subsystem = SUBSYSTEM_CORE,
                component = "note",
                "Structured note is not a JSON object; using empty note"
            );
        }
        Self {
            formatted_text: text_field(value, "formattedText"),
            entities: text_field(value, "entities"),
            mind_graph: MindGraph::from_value(value.get("mindGraph")),
            keywords: keywords_field(value),
            questions: text_field(value, "questions"),
        }
    }

    /// Parse text typed into the raw JSON editor.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|_| Error::InvalidFormat(defaults::MSG_INVALID_JSON.to_string()))?;
        Ok(Self::from_value(&value))
    }
}

/// Derived result of a note-generation call; lives only in session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredNote {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub original_text: String,
    pub formatted_text: String,
    pub entities: String,
    pub mind_graph: MindGraph,
    pub keywords: Vec<String>,
    pub questions: String,
}

impl StructuredNote {
    /// Build a fresh note from a model response.
    pub fn from_value(value: &Value, original_text: impl Into<String>) -> Self {
        let fields = NoteFields::from_value(value);
        Self {
            id: Uuid::now_v7().to_string(),
            timestamp: Utc::now(),
            original_text: original_text.into(),
            formatted_text: fields.formatted_text,
            entities: fields.entities,
            mind_graph: fields.mind_graph,
            keywords: fields.keywords,
            questions: fields.questions,
        }
    }

    /// Replace the model-supplied fields, keeping identity and source text.
    pub fn apply_fields(&mut self, fields: NoteFields) {
        self.formatted_text = fields.formatted_text;
        self.entities = fields.entities;
        self.mind_graph = fields.mind_graph;
        self.keywords = fields.keywords;
        self.questions = fields.questions;
    }

    /// The model-facing JSON shape of this note.
    pub fn to_value(&self) -> Value {
        json!({
            "formattedText": self.formatted_text,
            "entities": self.entities,
            "mindGraph": self.mind_graph,
            "keywords": self.keywords,
            "questions": self.questions,
        })
    }

    /// Pretty-printed JSON for the raw editor.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }
}

fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| scalar_string(Some(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        None | Some(Value::Null) => {
            warn!(subsystem = SUBSYSTEM_CORE, component = "note", key, "Note key missing");
            String::new()
        }
        Some(other) => other.to_string(),
    }
}

fn keywords_field(value: &Value) -> Vec<String> {
    match value.get("keywords") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| scalar_string(Some(v)))
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        _ => {
            warn!(
                subsystem = SUBSYSTEM_CORE,
                component = "note",
                key = "keywords",
                "Note key missing or not a list"
            );
            Vec::new()
        }
    }
}

fn array_items(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .map(|a| a.iter())
        .into_iter()
        .flatten()
}

fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_response() -> Value {
        json!({
            "formattedText": "# Summary",
            "entities": "| # | Entity |",
            "mindGraph": {
                "nodes": [
                    {"id": "FDA", "label": "Food and Drug Administration", "val": 15},
                    {"id": "510k", "label": "510(k)", "val": 8}
                ],
                "links": [{"source": "FDA", "target": "510k", "value": 5}]
            },
            "keywords": ["FDA", "clearance"],
            "questions": "1. Why?"
        })
    }

    #[test]
    fn test_full_response() {
        let note = StructuredNote::from_value(&full_response(), "source");
        assert_eq!(note.formatted_text, "# Summary");
        assert_eq!(note.entities, "| # | Entity |");
        assert_eq!(note.mind_graph.nodes.len(), 2);
        assert_eq!(note.mind_graph.links.len(), 1);
        assert_eq!(note.mind_graph.nodes[0].val, 15.0);
        assert_eq!(note.keywords, vec!["FDA", "clearance"]);
        assert_eq!(note.questions, "1. Why?");
        assert_eq!(note.original_text, "source");
    }

    #[test]
    fn test_missing_keywords_populates_rest() {
        let mut value = full_response();
        value.as_object_mut().unwrap().remove("keywords");

        let note = StructuredNote::from_value(&value, "");
        assert!(note.keywords.is_empty());
        assert_eq!(note.formatted_text, "# Summary");
        assert_eq!(note.mind_graph.nodes.len(), 2);
        assert_eq!(note.questions, "1. Why?");
    }

    #[test]
    fn test_empty_object_yields_empty_note() {
        let note = StructuredNote::from_value(&json!({}), "");
        assert!(note.formatted_text.is_empty());
        assert!(note.entities.is_empty());
        assert!(note.mind_graph.is_empty());
        assert!(note.keywords.is_empty());
        assert!(note.questions.is_empty());
    }

    #[test]
    fn test_non_object_yields_empty_note() {
        let note = StructuredNote::from_value(&json!([1, 2, 3]), "");
        assert!(note.formatted_text.is_empty());
        assert!(note.mind_graph.is_empty());
    }

    #[test]
    fn test_questions_as_array_are_joined() {
        let note = StructuredNote::from_value(&json!({"questions": ["One?", "Two?"]}), "");
        assert_eq!(note.questions, "One?\nTwo?");
    }

    #[test]
    fn test_keywords_as_string_are_split() {
        let note = StructuredNote::from_value(&json!({"keywords": "a, b,,c "}), "");
        assert_eq!(note.keywords, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_graph_defensive_parsing() {
        let value = json!({
            "mindGraph": {
                "nodes": [
                    {"id": "a"},
                    {"label": "no id"},
                    {"id": 7, "label": "numeric", "val": "12"}
                ],
                "links": [
                    {"source": "a", "target": "7"},
                    {"source": "a"}
                ]
            }
        });
        let note = StructuredNote::from_value(&value, "");
        let graph = &note.mind_graph;
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].label, "a");
        assert_eq!(graph.nodes[0].val, 0.0);
        assert_eq!(graph.nodes[1].id, "7");
        assert_eq!(graph.nodes[1].val, 12.0);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].value, 0.0);
        assert!(graph.node("7").is_some());
    }

    #[test]
    fn test_mind_graph_wrong_type() {
        let note = StructuredNote::from_value(&json!({"mindGraph": "oops"}), "");
        assert!(note.mind_graph.is_empty());
    }

    #[test]
    fn test_raw_edit_invalid_json() {
        let err = NoteFields::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(ref m) if m == defaults::MSG_INVALID_JSON));
    }

    #[test]
    fn test_apply_fields_keeps_identity() {
        let mut note = StructuredNote::from_value(&full_response(), "source");
        let id = note.id.clone();
        let fields = NoteFields::from_json_str(r#"{"formattedText": "edited"}"#).unwrap();
        note.apply_fields(fields);

        assert_eq!(note.id, id);
        assert_eq!(note.original_text, "source");
        assert_eq!(note.formatted_text, "edited");
        assert!(note.keywords.is_empty());
    }

    #[test]
    fn test_pretty_json_reparses_to_same_fields() {
        let note = StructuredNote::from_value(&full_response(), "source");
        let fields = NoteFields::from_json_str(&note.to_pretty_json()).unwrap();
        assert_eq!(fields.formatted_text, note.formatted_text);
        assert_eq!(fields.mind_graph, note.mind_graph);
        assert_eq!(fields.keywords, note.keywords);
    }
}
