//! Incremental schema construction.
//!
//! Every add operation is all-or-nothing: the fragment is checked completely
//! before the schema is touched, and a refused fragment leaves both the schema
//! and the groupBy draft as they were.

use crate::diagnostics;
use crate::schema::definition::{
    EdgeDefinition, EntityDefinition, GraphSchema, Properties, dedup_keys, first_undefined_key,
};
use crate::schema::error::{GroupKind, ValidationError};
use serde_json::Value;
use std::collections::BTreeSet;

/// Property name typed into a groupBy field but not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupbyDraft {
    pub value: String,
}

impl GroupbyDraft {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Accept `candidate` as a groupBy key iff it names one of `current_properties`.
///
/// An empty candidate is never a property name, so it fails the same way.
pub fn check_groupby_key(
    current_properties: &BTreeSet<String>,
    candidate: &str,
) -> Result<String, ValidationError> {
    if candidate.is_empty() || !current_properties.contains(candidate) {
        return Err(ValidationError::UnknownProperty {
            candidate: candidate.to_string(),
        });
    }
    Ok(candidate.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct SchemaAccumulator {
    schema: GraphSchema,
    groupby_draft: GroupbyDraft,
}

impl SchemaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> &GraphSchema {
        &self.schema
    }

    pub fn groupby_draft(&self) -> &GroupbyDraft {
        &self.groupby_draft
    }

    pub fn set_groupby_draft(&mut self, value: impl Into<String>) {
        self.groupby_draft = GroupbyDraft::new(value);
    }

    /// Validate a groupBy key. The caller appends the returned key to the
    /// groupBy set it is editing; the draft is cleared only on success.
    pub fn add_groupby_key(
        &mut self,
        current_properties: &BTreeSet<String>,
        candidate: &str,
    ) -> Result<String, ValidationError> {
        let key = check_groupby_key(current_properties, candidate).inspect_err(|e| {
            diagnostics::warn(format!("groupBy key rejected: {}", e));
        })?;
        self.groupby_draft.clear();
        Ok(key)
    }

    /// Submit whatever is currently in the groupBy draft.
    pub fn submit_groupby_draft(
        &mut self,
        current_properties: &BTreeSet<String>,
    ) -> Result<String, ValidationError> {
        let candidate = self.groupby_draft.value.clone();
        self.add_groupby_key(current_properties, &candidate)
    }

    pub fn add_edge(
        &mut self,
        group_name: &str,
        definition: EdgeDefinition,
    ) -> Result<(), ValidationError> {
        let checked = self.check_edge(group_name, definition);
        let definition = log_outcome(group_name, GroupKind::Edge, checked)?;
        self.schema.edges.insert(group_name.to_string(), definition);
        Ok(())
    }

    pub fn add_entity(
        &mut self,
        group_name: &str,
        definition: EntityDefinition,
    ) -> Result<(), ValidationError> {
        let checked = self.check_entity(group_name, definition);
        let definition = log_outcome(group_name, GroupKind::Entity, checked)?;
        self.schema.entities.insert(group_name.to_string(), definition);
        Ok(())
    }

    /// `{ "edges": {...}, "entities": {...} }` for the current schema.
    pub fn serialize(&self) -> Value {
        self.schema.to_document()
    }

    pub fn into_schema(self) -> GraphSchema {
        self.schema
    }

    fn check_edge(
        &self,
        group_name: &str,
        mut definition: EdgeDefinition,
    ) -> Result<EdgeDefinition, ValidationError> {
        self.check_group_name(group_name)?;
        require(group_name, "source", &definition.source)?;
        require(group_name, "destination", &definition.destination)?;
        definition.group_by = dedup_keys(definition.group_by);
        check_group_by(group_name, &definition.properties, &definition.group_by)?;
        Ok(definition)
    }

    fn check_entity(
        &self,
        group_name: &str,
        mut definition: EntityDefinition,
    ) -> Result<EntityDefinition, ValidationError> {
        self.check_group_name(group_name)?;
        require(group_name, "vertex", &definition.vertex)?;
        definition.group_by = dedup_keys(definition.group_by);
        check_group_by(group_name, &definition.properties, &definition.group_by)?;
        Ok(definition)
    }

    fn check_group_name(&self, group_name: &str) -> Result<(), ValidationError> {
        require(group_name, "group name", group_name)?;
        let existing = if self.schema.edges.contains_key(group_name) {
            Some(GroupKind::Edge)
        } else if self.schema.entities.contains_key(group_name) {
            Some(GroupKind::Entity)
        } else {
            None
        };
        match existing {
            Some(existing) => Err(ValidationError::DuplicateGroup {
                group: group_name.to_string(),
                existing,
            }),
            None => Ok(()),
        }
    }
}

fn log_outcome<T>(
    group_name: &str,
    kind: GroupKind,
    checked: Result<T, ValidationError>,
) -> Result<T, ValidationError> {
    match &checked {
        Ok(_) => log::debug!("accepted {} group '{}'", kind, group_name),
        Err(e) => diagnostics::warn(format!("{} group '{}' rejected: {}", kind, group_name, e)),
    }
    checked
}

fn require(group_name: &str, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField {
            group: group_name.to_string(),
            field,
        });
    }
    Ok(())
}

fn check_group_by(
    group_name: &str,
    properties: &Properties,
    group_by: &[String],
) -> Result<(), ValidationError> {
    match first_undefined_key(properties, group_by) {
        Some(key) => Err(ValidationError::InvalidGroupby {
            group: group_name.to_string(),
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}
