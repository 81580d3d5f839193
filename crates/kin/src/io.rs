//! JSON dataset import and export.
//!
//! The file format carries the whole session state: people, relationships,
//! the designated root, and the id counter. Import is an atomic
//! replace-the-whole-dataset operation: the text is parsed and validated
//! into a fresh [`Dataset`] before anything is handed back, so a failed
//! import can never disturb a caller's current data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use kin_core::{
    identifier::PersonId,
    person::{Person, Relationship},
};

use crate::{error::KinError, store::Dataset};

/// On-disk shape of a dataset.
#[derive(Debug, Serialize, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    people: Vec<Person>,

    #[serde(default)]
    relationships: Vec<Relationship>,

    #[serde(default)]
    root: Option<PersonId>,

    /// Next id to issue. Missing or stale values are normalized to one
    /// past the highest person id on import.
    #[serde(default)]
    id_counter: u32,
}

/// Parses and validates a JSON dataset.
///
/// # Errors
///
/// Returns [`KinError::Import`] if the text is not valid JSON for the
/// dataset shape, or if it violates a store invariant: blank person name,
/// duplicate person id, relationship endpoint that does not exist, a
/// self-loop, a duplicate relationship pair, or an unknown root.
pub fn from_json(text: &str) -> Result<Dataset, KinError> {
    let file: DatasetFile =
        serde_json::from_str(text).map_err(|err| KinError::Import(err.to_string()))?;

    let mut ids = HashSet::new();
    for person in &file.people {
        if person.name.trim().is_empty() {
            return Err(KinError::Import(format!(
                "person {} has an empty name",
                person.id
            )));
        }
        if !ids.insert(person.id) {
            return Err(KinError::Import(format!("duplicate person id {}", person.id)));
        }
    }

    let mut pairs = HashSet::new();
    for rel in &file.relationships {
        if !ids.contains(&rel.parent) {
            return Err(KinError::Import(format!(
                "relationship references unknown person {}",
                rel.parent
            )));
        }
        if !ids.contains(&rel.child) {
            return Err(KinError::Import(format!(
                "relationship references unknown person {}",
                rel.child
            )));
        }
        if rel.parent == rel.child {
            return Err(KinError::Import(format!(
                "person {} cannot be their own parent",
                rel.parent
            )));
        }
        if !pairs.insert((rel.parent, rel.child)) {
            return Err(KinError::Import(format!(
                "duplicate relationship {} -> {}",
                rel.parent, rel.child
            )));
        }
    }

    if let Some(root) = file.root {
        if !ids.contains(&root) {
            return Err(KinError::Import(format!("root references unknown person {root}")));
        }
    }

    Ok(Dataset::from_raw_parts(
        file.people,
        file.relationships,
        file.root,
        file.id_counter,
    ))
}

/// Serializes the dataset to pretty-printed JSON.
pub fn to_json(dataset: &Dataset) -> Result<String, KinError> {
    let file = DatasetFile {
        people: dataset.people().cloned().collect(),
        relationships: dataset.relationships().to_vec(),
        root: dataset.root(),
        id_counter: dataset.id_counter(),
    };

    serde_json::to_string_pretty(&file).map_err(|err| KinError::Export(Box::new(err)))
}
