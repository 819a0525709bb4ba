//! Element definitions and the schema they accumulate into.
//!
//! Document shape produced by [`GraphSchema::to_document`]:
//! {
//!   "edges": {
//!     "RoadUse": {
//!       "description": "...",             // omitted when unset
//!       "source": "junction",
//!       "destination": "junction",
//!       "directed": "true",               // string, not bool
//!       "properties": { "startDate": "date.earliest" },   // omitted when empty
//!       "groupBy": ["startDate"]          // omitted when empty
//!     }
//!   },
//!   "entities": {
//!     "Cardinality": { "vertex": "anyVertex", ... }
//!   }
//! }

use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, BTreeSet};

/// Property name -> property type name.
pub type Properties = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeDefinition {
    pub description: Option<String>,
    pub source: String,
    pub destination: String,
    pub directed: bool,
    pub properties: Properties,
    /// Ordered set of property names.
    pub group_by: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDefinition {
    pub description: Option<String>,
    pub vertex: String,
    pub properties: Properties,
    /// Ordered set of property names.
    pub group_by: Vec<String>,
}

impl EdgeDefinition {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, directed: bool) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            directed,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), type_name.into());
        self
    }

    pub fn with_group_by(mut self, key: impl Into<String>) -> Self {
        self.push_group_by(key);
        self
    }

    /// Append `key` unless it is already present.
    pub fn push_group_by(&mut self, key: impl Into<String>) {
        push_unique(&mut self.group_by, key.into());
    }

    pub fn property_names(&self) -> BTreeSet<String> {
        self.properties.keys().cloned().collect()
    }

    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(d) = &self.description {
            obj.insert("description".into(), json!(d));
        }
        obj.insert("source".into(), json!(self.source));
        obj.insert("destination".into(), json!(self.destination));
        obj.insert("directed".into(), json!(self.directed.to_string()));
        insert_property_fields(&mut obj, &self.properties, &self.group_by);
        Value::Object(obj)
    }
}

impl EntityDefinition {
    pub fn new(vertex: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), type_name.into());
        self
    }

    pub fn with_group_by(mut self, key: impl Into<String>) -> Self {
        self.push_group_by(key);
        self
    }

    /// Append `key` unless it is already present.
    pub fn push_group_by(&mut self, key: impl Into<String>) {
        push_unique(&mut self.group_by, key.into());
    }

    pub fn property_names(&self) -> BTreeSet<String> {
        self.properties.keys().cloned().collect()
    }

    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(d) = &self.description {
            obj.insert("description".into(), json!(d));
        }
        obj.insert("vertex".into(), json!(self.vertex));
        insert_property_fields(&mut obj, &self.properties, &self.group_by);
        Value::Object(obj)
    }
}

/// Accumulated schema. Group names are unique across both maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSchema {
    pub edges: BTreeMap<String, EdgeDefinition>,
    pub entities: BTreeMap<String, EntityDefinition>,
}

impl GraphSchema {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.entities.is_empty()
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.edges.contains_key(name) || self.entities.contains_key(name)
    }

    /// External representation sent to the graph service.
    pub fn to_document(&self) -> Value {
        let edges: Map<String, Value> = self
            .edges
            .iter()
            .map(|(name, def)| (name.clone(), def.to_value()))
            .collect();
        let entities: Map<String, Value> = self
            .entities
            .iter()
            .map(|(name, def)| (name.clone(), def.to_value()))
            .collect();
        json!({ "edges": edges, "entities": entities })
    }
}

fn insert_property_fields(obj: &mut Map<String, Value>, properties: &Properties, group_by: &[String]) {
    if !properties.is_empty() {
        obj.insert("properties".into(), json!(properties));
    }
    if !group_by.is_empty() {
        obj.insert("groupBy".into(), json!(group_by));
    }
}

fn push_unique(keys: &mut Vec<String>, key: String) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

/// First groupBy entry with no matching property, if any.
pub(crate) fn first_undefined_key<'a>(properties: &Properties, group_by: &'a [String]) -> Option<&'a str> {
    group_by
        .iter()
        .find(|k| !properties.contains_key(k.as_str()))
        .map(String::as_str)
}

/// Collapse repeated keys to their first occurrence.
pub(crate) fn dedup_keys(group_by: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(group_by.len());
    for key in group_by {
        push_unique(&mut out, key);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn edge_document_omits_empty_optionals() {
        let mut schema = GraphSchema::default();
        schema
            .edges
            .insert("Link".to_string(), EdgeDefinition::new("a", "b", false));
        assert_eq!(
            schema.to_document(),
            json!({
                "edges": { "Link": { "source": "a", "destination": "b", "directed": "false" } },
                "entities": {}
            })
        );
    }

    #[test]
    fn entity_document_carries_properties_and_group_by() {
        let mut schema = GraphSchema::default();
        schema.entities.insert(
            "Cardinality".to_string(),
            EntityDefinition::new("anyVertex")
                .with_description("How many edges touch a vertex")
                .with_property("count", "count.long")
                .with_property("startDate", "date.earliest")
                .with_group_by("startDate"),
        );
        assert_eq!(
            schema.to_document(),
            json!({
                "edges": {},
                "entities": {
                    "Cardinality": {
                        "description": "How many edges touch a vertex",
                        "vertex": "anyVertex",
                        "properties": { "count": "count.long", "startDate": "date.earliest" },
                        "groupBy": ["startDate"]
                    }
                }
            })
        );
    }

    #[test]
    fn push_group_by_keeps_set_semantics() {
        let mut edge = EdgeDefinition::new("a", "b", true);
        edge.push_group_by("x");
        edge.push_group_by("y");
        edge.push_group_by("x");
        assert_eq!(edge.group_by, vec!["x", "y"]);
    }

    #[test]
    fn undefined_key_lookup() {
        let props: Properties = [("a".to_string(), "t".to_string())].into_iter().collect();
        let keys = vec!["a".to_string(), "b".to_string()];
        assert_eq!(first_undefined_key(&props, &keys), Some("b"));
        assert_eq!(first_undefined_key(&props, &keys[..1]), None);
    }

    #[test]
    fn dedup_preserves_first_occurrence() {
        let keys = ["b", "a", "b", "c", "a"].map(String::from).to_vec();
        assert_eq!(dedup_keys(keys), vec!["b", "a", "c"]);
    }
}
