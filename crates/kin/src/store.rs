//! The entity store: an owned, in-memory dataset of people and
//! parent-child relationships.
//!
//! [`Dataset`] is the single owner of all [`Person`] and [`Relationship`]
//! records. Every mutation validates its inputs up front and either
//! applies completely or fails with a [`KinError`] leaving prior state
//! untouched. Derived views (adjacency, layout) are rebuilt from the
//! dataset on demand and never stored here.

use indexmap::IndexMap;
use log::debug;

use kin_core::{
    identifier::PersonId,
    person::{Person, PersonDraft, PersonPatch, Relationship},
};

use crate::error::KinError;

/// Trims a required text field, rejecting blank values.
fn clean_name(name: &str) -> Result<String, KinError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(KinError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field, collapsing blank values to `None`.
fn clean_optional(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// An in-memory dataset of people and parent-child relationships.
///
/// People are kept in insertion order (the order drives root selection and
/// layout determinism), relationships in insertion order as a vector.
/// Identifiers come from a monotonic counter that never decreases, so a
/// deleted person's id is never reissued within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    people: IndexMap<PersonId, Person>,
    relationships: Vec<Relationship>,
    root: Option<PersonId>,
    id_counter: u32,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    /// Creates an empty dataset. The first allocated id is `P0001`.
    pub fn new() -> Self {
        Self {
            people: IndexMap::new(),
            relationships: Vec::new(),
            root: None,
            id_counter: 1,
        }
    }

    /// Assembles a dataset from already-validated parts.
    ///
    /// Callers (the JSON importer) must have checked the store invariants:
    /// unique person ids, valid relationship endpoints, no self-loops, no
    /// duplicate pairs, a known root. The id counter is normalized so it
    /// can never reissue a live id.
    pub(crate) fn from_raw_parts(
        people: Vec<Person>,
        relationships: Vec<Relationship>,
        root: Option<PersonId>,
        id_counter: u32,
    ) -> Self {
        let max_seq = people.iter().map(|p| p.id.seq()).max().unwrap_or(0);
        Self {
            people: people.into_iter().map(|p| (p.id, p)).collect(),
            relationships,
            root,
            id_counter: id_counter.max(max_seq + 1),
        }
    }

    /// Allocates the next sequential person id.
    fn next_id(&mut self) -> PersonId {
        let id = PersonId::new(self.id_counter);
        self.id_counter += 1;
        id
    }

    /// Adds a new person and returns their id.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::EmptyName`] if the draft name is empty or
    /// whitespace-only. Never fails on valid input.
    pub fn add_person(&mut self, draft: PersonDraft) -> Result<PersonId, KinError> {
        let name = clean_name(&draft.name)?;

        let id = self.next_id();
        let person = Person {
            id,
            name,
            side: clean_optional(draft.side),
            notes: clean_optional(draft.notes),
            invited: draft.invited,
            plus_one: draft.plus_one,
            email: clean_optional(draft.email),
            phone: clean_optional(draft.phone),
        };

        debug!(id = id.to_string(), name = person.name; "Person added");
        self.people.insert(id, person);
        Ok(id)
    }

    /// Applies a partial update to an existing person.
    ///
    /// Only fields present in the patch change; a nested `Some(None)`
    /// clears an optional field.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::PersonNotFound`] if the id is absent, or
    /// [`KinError::EmptyName`] if the patch would blank the name. Either
    /// way the person is left unchanged.
    pub fn update_person(&mut self, id: PersonId, patch: PersonPatch) -> Result<(), KinError> {
        if !self.people.contains_key(&id) {
            return Err(KinError::PersonNotFound(id));
        }

        // Validate before touching the record so a failed update is a no-op
        let name = patch.name.as_deref().map(clean_name).transpose()?;

        let person = self
            .people
            .get_mut(&id)
            .expect("presence checked above");

        if let Some(name) = name {
            person.name = name;
        }
        if let Some(side) = patch.side {
            person.side = clean_optional(side);
        }
        if let Some(notes) = patch.notes {
            person.notes = clean_optional(notes);
        }
        if let Some(invited) = patch.invited {
            person.invited = invited;
        }
        if let Some(plus_one) = patch.plus_one {
            person.plus_one = plus_one;
        }
        if let Some(email) = patch.email {
            person.email = clean_optional(email);
        }
        if let Some(phone) = patch.phone {
            person.phone = clean_optional(phone);
        }

        Ok(())
    }

    /// Deletes a person, cascading to every relationship that references
    /// them and clearing the root if it pointed at them.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::PersonNotFound`] if the id is absent.
    pub fn delete_person(&mut self, id: PersonId) -> Result<Person, KinError> {
        // shift_remove keeps the remaining people in insertion order
        let person = self
            .people
            .shift_remove(&id)
            .ok_or(KinError::PersonNotFound(id))?;

        let before = self.relationships.len();
        self.relationships
            .retain(|rel| rel.parent != id && rel.child != id);
        let removed_edges = before - self.relationships.len();

        if self.root == Some(id) {
            self.root = None;
        }

        debug!(id = id.to_string(), removed_edges; "Person deleted");
        Ok(person)
    }

    /// Adds a parent-child relationship.
    ///
    /// Cycles are allowed; the layout engine tolerates them.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::PersonNotFound`] if either endpoint is absent,
    /// [`KinError::SelfLoop`] if parent and child are the same person, or
    /// [`KinError::DuplicateRelationship`] if the pair already exists.
    pub fn add_relationship(
        &mut self,
        parent: PersonId,
        child: PersonId,
    ) -> Result<(), KinError> {
        if !self.people.contains_key(&parent) {
            return Err(KinError::PersonNotFound(parent));
        }
        if !self.people.contains_key(&child) {
            return Err(KinError::PersonNotFound(child));
        }
        if parent == child {
            return Err(KinError::SelfLoop(parent));
        }
        if self
            .relationships
            .iter()
            .any(|rel| rel.parent == parent && rel.child == child)
        {
            return Err(KinError::DuplicateRelationship { parent, child });
        }

        self.relationships.push(Relationship::new(parent, child));
        Ok(())
    }

    /// Removes the relationship for the given (parent, child) pair.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::RelationshipNotFound`] if the pair is absent.
    pub fn delete_relationship(
        &mut self,
        parent: PersonId,
        child: PersonId,
    ) -> Result<(), KinError> {
        let position = self
            .relationships
            .iter()
            .position(|rel| rel.parent == parent && rel.child == child)
            .ok_or(KinError::RelationshipNotFound { parent, child })?;

        self.relationships.remove(position);
        Ok(())
    }

    /// Sets or clears the designated layout root.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::PersonNotFound`] if `Some(id)` references an
    /// absent person.
    pub fn set_root(&mut self, root: Option<PersonId>) -> Result<(), KinError> {
        if let Some(id) = root {
            if !self.people.contains_key(&id) {
                return Err(KinError::PersonNotFound(id));
            }
        }
        self.root = root;
        Ok(())
    }

    /// Returns the person with the given id, if present.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    /// Returns an iterator over all people in insertion order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// Returns all relationships in insertion order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Returns the designated layout root, if set.
    pub fn root(&self) -> Option<PersonId> {
        self.root
    }

    /// Returns the next id value the counter will issue.
    pub fn id_counter(&self) -> u32 {
        self.id_counter
    }

    /// Returns the number of people in the dataset.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Checks whether the dataset contains no people.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Counts expected guests: each invited person, plus one more for each
    /// invited person bringing a plus-one.
    pub fn guest_count(&self) -> usize {
        let invited = self.people.values().filter(|p| p.invited).count();
        let plus_ones = self
            .people
            .values()
            .filter(|p| p.invited && p.plus_one)
            .count();
        invited + plus_ones
    }
}

#[cfg(test)]
mod tests {
    use kin_core::person::PersonDraft;

    use super::*;

    fn dataset_with(names: &[&str]) -> (Dataset, Vec<PersonId>) {
        let mut dataset = Dataset::new();
        let ids = names
            .iter()
            .map(|name| dataset.add_person(PersonDraft::new(*name)).unwrap())
            .collect();
        (dataset, ids)
    }

    #[test]
    fn test_add_person_sequential_ids() {
        let (dataset, ids) = dataset_with(&["Ada", "Bea", "Cal"]);

        assert_eq!(ids[0].to_string(), "P0001");
        assert_eq!(ids[1].to_string(), "P0002");
        assert_eq!(ids[2].to_string(), "P0003");
        assert_eq!(dataset.id_counter(), 4);
    }

    #[test]
    fn test_add_person_trims_fields() {
        let mut dataset = Dataset::new();
        let id = dataset
            .add_person(PersonDraft::new("  Ada  ").side("  Bride ").email("   "))
            .unwrap();

        let person = dataset.person(id).unwrap();
        assert_eq!(person.name, "Ada");
        assert_eq!(person.side.as_deref(), Some("Bride"));
        // Whitespace-only optional fields collapse to None
        assert_eq!(person.email, None);
    }

    #[test]
    fn test_add_person_empty_name_rejected() {
        let mut dataset = Dataset::new();
        assert!(matches!(
            dataset.add_person(PersonDraft::new("   ")),
            Err(KinError::EmptyName)
        ));
        assert!(dataset.is_empty());
        // A rejected insert must not consume an id
        assert_eq!(dataset.id_counter(), 1);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let (mut dataset, ids) = dataset_with(&["Ada", "Bea"]);

        dataset.delete_person(ids[1]).unwrap();
        let next = dataset.add_person(PersonDraft::new("Cal")).unwrap();

        assert_eq!(next.to_string(), "P0003");
    }

    #[test]
    fn test_update_person_partial() {
        let (mut dataset, ids) = dataset_with(&["Ada"]);

        dataset
            .update_person(
                ids[0],
                kin_core::person::PersonPatch::new()
                    .invited(false)
                    .notes(Some("vegetarian".to_string())),
            )
            .unwrap();

        let person = dataset.person(ids[0]).unwrap();
        assert_eq!(person.name, "Ada"); // untouched
        assert!(!person.invited);
        assert_eq!(person.notes.as_deref(), Some("vegetarian"));
    }

    #[test]
    fn test_update_person_rejects_blank_name_without_mutation() {
        let (mut dataset, ids) = dataset_with(&["Ada"]);

        let result = dataset.update_person(
            ids[0],
            kin_core::person::PersonPatch::new().name(" ").invited(false),
        );

        assert!(matches!(result, Err(KinError::EmptyName)));
        let person = dataset.person(ids[0]).unwrap();
        assert_eq!(person.name, "Ada");
        assert!(person.invited); // the invited part of the patch did not apply
    }

    #[test]
    fn test_update_person_not_found() {
        let mut dataset = Dataset::new();
        assert!(matches!(
            dataset.update_person(PersonId::new(9), kin_core::person::PersonPatch::new()),
            Err(KinError::PersonNotFound(_))
        ));
    }

    #[test]
    fn test_delete_person_cascades() {
        let (mut dataset, ids) = dataset_with(&["Ada", "Bea", "Cal"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[0], ids[2]).unwrap();
        dataset.add_relationship(ids[1], ids[2]).unwrap();
        dataset.set_root(Some(ids[0])).unwrap();

        dataset.delete_person(ids[0]).unwrap();

        assert_eq!(dataset.len(), 2);
        // Only the Bea -> Cal edge survives
        assert_eq!(dataset.relationships().len(), 1);
        assert_eq!(dataset.relationships()[0].parent, ids[1]);
        assert_eq!(dataset.root(), None);
    }

    #[test]
    fn test_delete_person_preserves_insertion_order() {
        let (mut dataset, ids) = dataset_with(&["Ada", "Bea", "Cal", "Dee"]);

        dataset.delete_person(ids[1]).unwrap();

        let names: Vec<&str> = dataset.people().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Cal", "Dee"]);
    }

    #[test]
    fn test_add_relationship_missing_endpoint() {
        let (mut dataset, ids) = dataset_with(&["Ada"]);
        let ghost = PersonId::new(99);

        assert!(matches!(
            dataset.add_relationship(ids[0], ghost),
            Err(KinError::PersonNotFound(id)) if id == ghost
        ));
        assert!(matches!(
            dataset.add_relationship(ghost, ids[0]),
            Err(KinError::PersonNotFound(id)) if id == ghost
        ));
        assert!(dataset.relationships().is_empty());
    }

    #[test]
    fn test_add_relationship_self_loop() {
        let (mut dataset, ids) = dataset_with(&["Ada"]);

        assert!(matches!(
            dataset.add_relationship(ids[0], ids[0]),
            Err(KinError::SelfLoop(_))
        ));
        assert!(dataset.relationships().is_empty());
    }

    #[test]
    fn test_add_relationship_duplicate() {
        let (mut dataset, ids) = dataset_with(&["Ada", "Bea"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();

        assert!(matches!(
            dataset.add_relationship(ids[0], ids[1]),
            Err(KinError::DuplicateRelationship { .. })
        ));
        // The reverse pair is a different relationship and is fine
        dataset.add_relationship(ids[1], ids[0]).unwrap();
        assert_eq!(dataset.relationships().len(), 2);
    }

    #[test]
    fn test_cycles_are_accepted() {
        let (mut dataset, ids) = dataset_with(&["Ada", "Bea", "Cal"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[1], ids[2]).unwrap();
        dataset.add_relationship(ids[2], ids[0]).unwrap();

        assert_eq!(dataset.relationships().len(), 3);
    }

    #[test]
    fn test_delete_relationship() {
        let (mut dataset, ids) = dataset_with(&["Ada", "Bea"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();

        dataset.delete_relationship(ids[0], ids[1]).unwrap();
        assert!(dataset.relationships().is_empty());

        assert!(matches!(
            dataset.delete_relationship(ids[0], ids[1]),
            Err(KinError::RelationshipNotFound { .. })
        ));
    }

    #[test]
    fn test_set_root() {
        let (mut dataset, ids) = dataset_with(&["Ada"]);

        dataset.set_root(Some(ids[0])).unwrap();
        assert_eq!(dataset.root(), Some(ids[0]));

        dataset.set_root(None).unwrap();
        assert_eq!(dataset.root(), None);

        assert!(matches!(
            dataset.set_root(Some(PersonId::new(42))),
            Err(KinError::PersonNotFound(_))
        ));
    }

    #[test]
    fn test_guest_count() {
        let mut dataset = Dataset::new();
        dataset.add_person(PersonDraft::new("Ada")).unwrap(); // invited
        dataset
            .add_person(PersonDraft::new("Bea").plus_one(true))
            .unwrap(); // invited + guest
        dataset
            .add_person(PersonDraft::new("Cal").invited(false).plus_one(true))
            .unwrap(); // not invited, plus-one ignored

        assert_eq!(dataset.guest_count(), 3);
    }

    #[test]
    fn test_from_raw_parts_normalizes_counter() {
        let person = Person {
            id: PersonId::new(8),
            name: "Ada".to_string(),
            side: None,
            notes: None,
            invited: true,
            plus_one: false,
            email: None,
            phone: None,
        };

        let dataset = Dataset::from_raw_parts(vec![person], Vec::new(), None, 1);
        // Counter may never point at or below a live id
        assert_eq!(dataset.id_counter(), 9);
    }
}
