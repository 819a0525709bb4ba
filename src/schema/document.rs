//! Raw schema document as it arrives from a file or the graph service.
//!
//! JSON shape:
//! {
//!   "edges": {
//!     "RoadUse": {
//!       "description": "...",          // optional
//!       "source": "junction",
//!       "destination": "junction",
//!       "directed": "true",            // "true" | "false" | true | false
//!       "properties": { "startDate": "date.earliest" },   // optional
//!       "groupBy": ["startDate"]       // optional
//!     }
//!   },
//!   "entities": {
//!     "Cardinality": { "vertex": "anyVertex", "properties": {...}, "groupBy": [...] }
//!   }
//! }
//!
//! Nothing here is trusted: [`SchemaDocument::build`] replays every group
//! through [`SchemaAccumulator`] and collects what it refuses.

use crate::notify::NotificationLog;
use crate::sanitize::is_valid_json;
use crate::schema::accumulator::SchemaAccumulator;
use crate::schema::definition::{EdgeDefinition, EntityDefinition, Properties};
use crate::schema::error::ValidationError;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub edges: BTreeMap<String, RawEdge>,

    #[serde(default)]
    pub entities: BTreeMap<String, RawEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub destination: String,

    #[serde(default)]
    pub directed: DirectedSpec,

    #[serde(default)]
    pub properties: Properties,

    #[serde(default, rename = "groupBy")]
    pub group_by: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub vertex: String,

    #[serde(default)]
    pub properties: Properties,

    #[serde(default, rename = "groupBy")]
    pub group_by: Vec<String>,
}

/// The service writes `"true"`/`"false"`; hand-written files often use booleans.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DirectedSpec {
    Flag(bool),
    Text(String),
}

impl Default for DirectedSpec {
    fn default() -> Self {
        DirectedSpec::Flag(false)
    }
}

/// Result of replaying a document: whatever was accepted, plus one message
/// per refused group.
#[derive(Debug, Clone)]
pub struct BuiltSchema {
    pub accumulator: SchemaAccumulator,
    pub notifications: NotificationLog,
}

impl SchemaDocument {
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        if !is_valid_json(text) {
            return Err(ValidationError::MalformedJson(
                "input is not valid JSON".to_string(),
            ));
        }
        serde_json::from_str(text).map_err(|e| ValidationError::MalformedJson(e.to_string()))
    }

    /// Replay edges, then entities, each in group-name order. Refused groups
    /// are reported and skipped; replay always runs to the end.
    pub fn build(&self) -> BuiltSchema {
        let mut accumulator = SchemaAccumulator::new();
        let mut notifications = NotificationLog::new();

        for (name, raw) in &self.edges {
            let outcome = raw
                .to_definition(name)
                .and_then(|def| accumulator.add_edge(name, def));
            if let Err(e) = outcome {
                notifications.add_error(e.to_string());
            }
        }

        for (name, raw) in &self.entities {
            if let Err(e) = accumulator.add_entity(name, raw.to_definition()) {
                notifications.add_error(e.to_string());
            }
        }

        log::info!(
            "replayed {} edge and {} entity groups, {} refused",
            self.edges.len(),
            self.entities.len(),
            notifications.len()
        );

        BuiltSchema {
            accumulator,
            notifications,
        }
    }
}

impl RawEdge {
    fn to_definition(&self, group_name: &str) -> Result<EdgeDefinition, ValidationError> {
        let directed = match &self.directed {
            DirectedSpec::Flag(b) => *b,
            DirectedSpec::Text(s) => match s.as_str() {
                "true" => true,
                "false" => false,
                other => {
                    return Err(ValidationError::MalformedJson(format!(
                        "edge group '{}' has directed value '{}', expected \"true\" or \"false\"",
                        group_name, other
                    )));
                }
            },
        };
        Ok(EdgeDefinition {
            description: self.description.clone(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            directed,
            properties: self.properties.clone(),
            group_by: self.group_by.clone(),
        })
    }
}

impl RawEntity {
    fn to_definition(&self) -> EntityDefinition {
        EntityDefinition {
            description: self.description.clone(),
            vertex: self.vertex.clone(),
            properties: self.properties.clone(),
            group_by: self.group_by.clone(),
        }
    }
}
