//! Derived adjacency view over a dataset.
//!
//! [`Adjacency`] is built fresh from the relationship set on demand and
//! discarded after use. It tracks children and parents per person, each
//! list ordered by relationship insertion order, which keeps every
//! traversal downstream deterministic. No validation happens here; the
//! store's invariants are assumed to hold.

use std::collections::HashMap;

use kin_core::identifier::PersonId;

use crate::store::Dataset;

/// Children and parents per person, in relationship insertion order.
#[derive(Debug)]
pub struct Adjacency {
    children: HashMap<PersonId, Vec<PersonId>>,
    parents: HashMap<PersonId, Vec<PersonId>>,
}

impl Adjacency {
    /// Builds the adjacency view for a dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut children: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
        let mut parents: HashMap<PersonId, Vec<PersonId>> = HashMap::new();

        for rel in dataset.relationships() {
            children.entry(rel.parent).or_default().push(rel.child);
            parents.entry(rel.child).or_default().push(rel.parent);
        }

        Self { children, parents }
    }

    /// Returns the children of a person, in relationship insertion order.
    ///
    /// Unknown ids and leaf nodes both yield an empty slice.
    pub fn children_of(&self, id: PersonId) -> &[PersonId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Returns the parents of a person, in relationship insertion order.
    pub fn parents_of(&self, id: PersonId) -> &[PersonId] {
        self.parents.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Checks whether a person has no parents.
    pub fn is_root(&self, id: PersonId) -> bool {
        self.parents_of(id).is_empty()
    }

    /// Returns people with no incoming parent edge, in person insertion
    /// order.
    pub fn roots<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = PersonId> + 'a {
        dataset
            .people()
            .map(|person| person.id)
            .filter(|id| self.is_root(*id))
    }
}
