//! Form state for one edge or entity while it is being edited.
//!
//! [`reduce`] is a pure transition: it reads the old state, returns a new one
//! and never mutates its input, so the caller can keep or discard either.

use crate::schema::accumulator::{GroupbyDraft, check_groupby_key};
use crate::schema::definition::{EdgeDefinition, EntityDefinition, Properties};
use crate::schema::error::ValidationError;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDraft {
    pub group_name: String,
    pub description: String,
    pub source: String,
    pub destination: String,
    pub directed: bool,
    pub vertex: String,
    pub properties: Properties,
    pub group_by: Vec<String>,
    pub groupby_draft: GroupbyDraft,
    /// Failure from the most recent transition, if it was refused.
    pub error: Option<ValidationError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
    SetGroupName(String),
    SetDescription(String),
    SetSource(String),
    SetDestination(String),
    SetDirected(bool),
    SetVertex(String),
    AddProperty { name: String, type_name: String },
    RemoveProperty(String),
    EditGroupby(String),
    SubmitGroupby,
    ClearError,
}

pub fn reduce(state: &ElementDraft, action: DraftAction) -> ElementDraft {
    let mut next = state.clone();
    match action {
        DraftAction::SetGroupName(v) => next.group_name = v,
        DraftAction::SetDescription(v) => next.description = v,
        DraftAction::SetSource(v) => next.source = v,
        DraftAction::SetDestination(v) => next.destination = v,
        DraftAction::SetDirected(v) => next.directed = v,
        DraftAction::SetVertex(v) => next.vertex = v,
        DraftAction::AddProperty { name, type_name } => {
            next.properties.insert(name, type_name);
        }
        DraftAction::RemoveProperty(name) => {
            next.properties.remove(&name);
            next.group_by.retain(|k| k != &name);
        }
        DraftAction::EditGroupby(v) => next.groupby_draft = GroupbyDraft::new(v),
        DraftAction::SubmitGroupby => {
            let candidate = &state.groupby_draft.value;
            match check_groupby_key(&state.property_names(), candidate) {
                Ok(key) => {
                    if !next.group_by.contains(&key) {
                        next.group_by.push(key);
                    }
                    next.groupby_draft.clear();
                }
                Err(e) => {
                    next.error = Some(e);
                    return next;
                }
            }
        }
        DraftAction::ClearError => {}
    }
    next.error = None;
    next
}

impl ElementDraft {
    pub fn property_names(&self) -> BTreeSet<String> {
        self.properties.keys().cloned().collect()
    }

    pub fn to_edge(&self) -> EdgeDefinition {
        EdgeDefinition {
            description: self.description_opt(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            directed: self.directed,
            properties: self.properties.clone(),
            group_by: self.group_by.clone(),
        }
    }

    pub fn to_entity(&self) -> EntityDefinition {
        EntityDefinition {
            description: self.description_opt(),
            vertex: self.vertex.clone(),
            properties: self.properties.clone(),
            group_by: self.group_by.clone(),
        }
    }

    fn description_opt(&self) -> Option<String> {
        Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaAccumulator;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn apply(state: ElementDraft, actions: Vec<DraftAction>) -> ElementDraft {
        actions.into_iter().fold(state, |s, a| reduce(&s, a))
    }

    fn with_start_date() -> ElementDraft {
        apply(
            ElementDraft::default(),
            vec![DraftAction::AddProperty {
                name: "startDate".into(),
                type_name: "date.earliest".into(),
            }],
        )
    }

    #[test]
    fn transitions_do_not_touch_the_input() {
        let before = ElementDraft::default();
        let after = reduce(&before, DraftAction::SetSource("junction".into()));
        assert_eq!(before, ElementDraft::default());
        assert_eq!(after.source, "junction");
    }

    #[test]
    fn submitting_a_known_property_appends_and_clears_draft() {
        let state = apply(
            with_start_date(),
            vec![
                DraftAction::EditGroupby("startDate".into()),
                DraftAction::SubmitGroupby,
            ],
        );
        assert_eq!(state.group_by, vec!["startDate"]);
        assert!(state.groupby_draft.is_empty());
        assert_eq!(state.error, None);
    }

    #[test]
    fn submitting_twice_keeps_one_entry() {
        let state = apply(
            with_start_date(),
            vec![
                DraftAction::EditGroupby("startDate".into()),
                DraftAction::SubmitGroupby,
                DraftAction::EditGroupby("startDate".into()),
                DraftAction::SubmitGroupby,
            ],
        );
        assert_eq!(state.group_by, vec!["startDate"]);
    }

    #[test]
    fn submitting_an_unknown_property_keeps_draft_and_group_by() {
        let state = apply(
            with_start_date(),
            vec![
                DraftAction::EditGroupby("endDate".into()),
                DraftAction::SubmitGroupby,
            ],
        );
        assert!(state.group_by.is_empty());
        assert_eq!(state.groupby_draft.value, "endDate");
        assert_eq!(
            state.error.as_ref().map(ToString::to_string).as_deref(),
            Some("endDate is not a defined property")
        );

        let cleared = reduce(&state, DraftAction::ClearError);
        assert_eq!(cleared.error, None);
        assert_eq!(cleared.groupby_draft.value, "endDate");
    }

    #[test]
    fn removing_a_property_drops_it_from_group_by() {
        let state = apply(
            with_start_date(),
            vec![
                DraftAction::EditGroupby("startDate".into()),
                DraftAction::SubmitGroupby,
                DraftAction::RemoveProperty("startDate".into()),
            ],
        );
        assert!(state.properties.is_empty());
        assert!(state.group_by.is_empty());
    }

    #[test]
    fn edge_draft_feeds_the_accumulator() {
        let state = apply(
            with_start_date(),
            vec![
                DraftAction::SetGroupName("RoadUse".into()),
                DraftAction::SetSource("junction".into()),
                DraftAction::SetDestination("junction".into()),
                DraftAction::SetDirected(true),
                DraftAction::SetDescription("  ".into()),
                DraftAction::EditGroupby("startDate".into()),
                DraftAction::SubmitGroupby,
            ],
        );
        let mut acc = SchemaAccumulator::new();
        acc.add_edge(&state.group_name, state.to_edge()).unwrap();
        assert_eq!(
            acc.serialize()["edges"]["RoadUse"],
            json!({
                "source": "junction",
                "destination": "junction",
                "directed": "true",
                "properties": { "startDate": "date.earliest" },
                "groupBy": ["startDate"]
            })
        );
    }

    #[test]
    fn entity_draft_carries_description() {
        let state = apply(
            ElementDraft::default(),
            vec![
                DraftAction::SetVertex("anyVertex".into()),
                DraftAction::SetDescription("Vertex counts".into()),
            ],
        );
        let entity = state.to_entity();
        assert_eq!(entity.vertex, "anyVertex");
        assert_eq!(entity.description.as_deref(), Some("Vertex counts"));
    }
}
