//! Level-based tree layout.
//!
//! This module assigns every person a `(level, order)` cell: the level is
//! the breadth-first distance from the layout root along parent-child
//! edges, the order is the horizontal position within the level. The
//! traversal tolerates any graph the store can hold, cycles and
//! disconnected components included, and always terminates with every
//! person placed exactly once.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use indexmap::IndexMap;
use log::debug;

use kin_core::identifier::PersonId;

use crate::{graph::Adjacency, store::Dataset};

/// A person's cell in the layered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Breadth-first distance from the component root.
    pub level: u32,

    /// Horizontal position within the level.
    pub order: u32,
}

/// The computed layout: one placement per person, plus the edge list for
/// drawing.
///
/// Placements iterate in discovery order; edges in relationship insertion
/// order. Both are fully determined by the dataset, so recomputing on an
/// unchanged dataset yields an identical layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    placements: IndexMap<PersonId, Placement>,
    edges: Vec<(PersonId, PersonId)>,
}

impl TreeLayout {
    /// Returns the placement for a person, if they are in the layout.
    pub fn placement(&self, id: PersonId) -> Option<Placement> {
        self.placements.get(&id).copied()
    }

    /// Returns an iterator over all placements in discovery order.
    pub fn placements(&self) -> impl Iterator<Item = (PersonId, Placement)> + '_ {
        self.placements.iter().map(|(id, p)| (*id, *p))
    }

    /// Returns every relationship edge, for drawing. Edges render
    /// regardless of reachability.
    pub fn edges(&self) -> &[(PersonId, PersonId)] {
        &self.edges
    }

    /// Groups people by level, ascending; within a level, discovery order.
    pub fn by_level(&self) -> BTreeMap<u32, Vec<PersonId>> {
        let mut levels: BTreeMap<u32, Vec<PersonId>> = BTreeMap::new();
        for (id, placement) in &self.placements {
            levels.entry(placement.level).or_default().push(*id);
        }
        levels
    }

    /// Returns the highest level in the layout, if any nodes exist.
    pub fn max_level(&self) -> Option<u32> {
        self.placements.values().map(|p| p.level).max()
    }

    /// Returns the highest order in the layout, if any nodes exist.
    pub fn max_order(&self) -> Option<u32> {
        self.placements.values().map(|p| p.order).max()
    }

    /// Returns the number of placed people.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Checks whether the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Breadth-first layout engine.
///
/// The engine holds no state between calls; it rebuilds its adjacency view
/// from the dataset on every calculation and discards it afterwards.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    /// Creates a new layout engine.
    pub fn new() -> Self {
        Self
    }

    /// Computes the layout for a dataset.
    ///
    /// The designated root (or a deterministic fallback) anchors the first
    /// component at level 0. People unreachable from it each seed a
    /// further component, taken in person insertion order; a component's
    /// level numbering restarts at 0 and its order columns continue past
    /// the columns already occupied at each level, so components sit side
    /// by side rather than stacked.
    ///
    /// Never fails: any graph the store accepts, cyclic or disconnected,
    /// produces a complete layout covering every person exactly once.
    pub fn calculate(&self, dataset: &Dataset) -> TreeLayout {
        let adjacency = Adjacency::from_dataset(dataset);
        let mut placements = IndexMap::with_capacity(dataset.len());
        let mut visited = HashSet::with_capacity(dataset.len());

        // Order counters are shared across components, one per level: a
        // later component continues past the columns already used at each
        // level, so components sit side by side and no two people ever
        // share a cell. At level 0 this is exactly the running span of
        // earlier component roots.
        let mut level_counters: HashMap<u32, u32> = HashMap::new();

        if let Some(start) = Self::choose_root(dataset, &adjacency) {
            Self::place_component(
                start,
                &adjacency,
                &mut level_counters,
                &mut visited,
                &mut placements,
            );
        }

        // People unreachable from the root each seed their own component
        for person in dataset.people() {
            if !visited.contains(&person.id) {
                Self::place_component(
                    person.id,
                    &adjacency,
                    &mut level_counters,
                    &mut visited,
                    &mut placements,
                );
            }
        }

        debug!(
            people = placements.len(),
            edges = dataset.relationships().len(),
            components = level_counters.get(&0).copied().unwrap_or(0);
            "Layout calculated"
        );

        TreeLayout {
            placements,
            edges: dataset
                .relationships()
                .iter()
                .map(|rel| (rel.parent, rel.child))
                .collect(),
        }
    }

    /// Picks the node the first component grows from.
    ///
    /// The explicit dataset root wins when it still exists; otherwise the
    /// first inserted person with no parents; otherwise the first inserted
    /// person. Returns `None` only for an empty dataset.
    fn choose_root(dataset: &Dataset, adjacency: &Adjacency) -> Option<PersonId> {
        if let Some(root) = dataset.root() {
            if dataset.person(root).is_some() {
                return Some(root);
            }
        }

        adjacency
            .roots(dataset)
            .next()
            .or_else(|| dataset.people().next().map(|person| person.id))
    }

    /// Runs one BFS from `start`, placing every newly reached node.
    ///
    /// Nodes are marked visited when enqueued, not when dequeued, so a
    /// node reached again through a back edge or a second parent is never
    /// enqueued twice; this bounds the traversal at one visit per person
    /// and makes cycles safe.
    fn place_component(
        start: PersonId,
        adjacency: &Adjacency,
        level_counters: &mut HashMap<u32, u32>,
        visited: &mut HashSet<PersonId>,
        placements: &mut IndexMap<PersonId, Placement>,
    ) {
        let mut queue = VecDeque::new();

        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((id, level)) = queue.pop_front() {
            let counter = level_counters.entry(level).or_insert(0);
            placements.insert(id, Placement {
                level,
                order: *counter,
            });
            *counter += 1;

            for &child in adjacency.children_of(id) {
                if visited.insert(child) {
                    queue.push_back((child, level + 1));
                }
            }
        }
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

    fn placement(layout: &TreeLayout, id: PersonId) -> (u32, u32) {
        let p = layout.placement(id).expect("person should be placed");
        (p.level, p.order)
    }

    #[test]
    fn test_empty_dataset() {
        let layout = Engine::new().calculate(&Dataset::new());
        assert!(layout.is_empty());
        assert!(layout.edges().is_empty());
    }

    #[test]
    fn test_root_with_two_children() {
        let (mut dataset, ids) = dataset_with(&["P1", "P2", "P3"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[0], ids[2]).unwrap();
        dataset.set_root(Some(ids[0])).unwrap();

        let layout = Engine::new().calculate(&dataset);

        assert_eq!(placement(&layout, ids[0]), (0, 0));
        assert_eq!(placement(&layout, ids[1]), (1, 0));
        // Order follows relationship insertion order
        assert_eq!(placement(&layout, ids[2]), (1, 1));
    }

    #[test]
    fn test_orphan_placed_after_root_component() {
        let (mut dataset, ids) = dataset_with(&["P1", "P2", "P3", "P4"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[0], ids[2]).unwrap();
        dataset.set_root(Some(ids[0])).unwrap();

        let layout = Engine::new().calculate(&dataset);

        // The orphan is its own component at level 0, past the root's span
        assert_eq!(placement(&layout, ids[3]), (0, 1));
    }

    #[test]
    fn test_cycle_terminates_with_distinct_placements() {
        let (mut dataset, ids) = dataset_with(&["A", "B", "C"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[1], ids[2]).unwrap();
        dataset.add_relationship(ids[2], ids[0]).unwrap();

        let layout = Engine::new().calculate(&dataset);

        assert_eq!(layout.len(), 3);
        // No parentless candidate exists, so the first person anchors
        assert_eq!(placement(&layout, ids[0]), (0, 0));
        assert_eq!(placement(&layout, ids[1]), (1, 0));
        assert_eq!(placement(&layout, ids[2]), (2, 0));
    }

    #[test]
    fn test_diamond_uses_shortest_distance() {
        let (mut dataset, ids) = dataset_with(&["Top", "Left", "Right", "Bottom"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[0], ids[2]).unwrap();
        dataset.add_relationship(ids[1], ids[3]).unwrap();
        dataset.add_relationship(ids[2], ids[3]).unwrap();
        dataset.set_root(Some(ids[0])).unwrap();

        let layout = Engine::new().calculate(&dataset);

        assert_eq!(placement(&layout, ids[1]), (1, 0));
        assert_eq!(placement(&layout, ids[2]), (1, 1));
        // Bottom is discovered once, at its BFS distance, despite two parents
        assert_eq!(placement(&layout, ids[3]), (2, 0));
    }

    #[test]
    fn test_unset_root_prefers_first_parentless_person() {
        let (mut dataset, ids) = dataset_with(&["Child", "Parent"]);
        dataset.add_relationship(ids[1], ids[0]).unwrap();

        let layout = Engine::new().calculate(&dataset);

        // "Parent" is the only parentless person, so it anchors level 0
        assert_eq!(placement(&layout, ids[1]), (0, 0));
        assert_eq!(placement(&layout, ids[0]), (1, 0));
    }

    #[test]
    fn test_stale_root_ignored() {
        let (mut dataset, ids) = dataset_with(&["A", "B"]);
        dataset.set_root(Some(ids[0])).unwrap();
        dataset.delete_person(ids[0]).unwrap();

        let layout = Engine::new().calculate(&dataset);
        assert_eq!(placement(&layout, ids[1]), (0, 0));
    }

    #[test]
    fn test_multiple_components_side_by_side() {
        let (mut dataset, ids) = dataset_with(&["A", "B", "C", "D", "E"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[2], ids[3]).unwrap();
        dataset.add_relationship(ids[2], ids[4]).unwrap();
        dataset.set_root(Some(ids[0])).unwrap();

        let layout = Engine::new().calculate(&dataset);

        assert_eq!(placement(&layout, ids[0]), (0, 0));
        assert_eq!(placement(&layout, ids[1]), (1, 0));
        // Second component starts one column over at every level
        assert_eq!(placement(&layout, ids[2]), (0, 1));
        assert_eq!(placement(&layout, ids[3]), (1, 1));
        assert_eq!(placement(&layout, ids[4]), (1, 2));
    }

    #[test]
    fn test_total_coverage() {
        let (mut dataset, ids) = dataset_with(&["A", "B", "C", "D", "E", "F"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[1], ids[0]).unwrap(); // cycle
        dataset.add_relationship(ids[2], ids[3]).unwrap();

        let layout = Engine::new().calculate(&dataset);

        assert_eq!(layout.len(), dataset.len());
        for person in dataset.people() {
            assert!(layout.placement(person.id).is_some());
        }
    }

    #[test]
    fn test_layout_is_idempotent() {
        let (mut dataset, ids) = dataset_with(&["A", "B", "C", "D"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[3], ids[2]).unwrap();
        dataset.add_relationship(ids[1], ids[3]).unwrap();

        let first = Engine::new().calculate(&dataset);
        let second = Engine::new().calculate(&dataset);

        assert_eq!(first, second);
    }

    #[test]
    fn test_edges_cover_all_relationships() {
        let (mut dataset, ids) = dataset_with(&["A", "B", "C"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[2], ids[1]).unwrap();

        let layout = Engine::new().calculate(&dataset);

        assert_eq!(layout.edges(), &[(ids[0], ids[1]), (ids[2], ids[1])]);
    }

    #[test]
    fn test_by_level_grouping() {
        let (mut dataset, ids) = dataset_with(&["A", "B", "C"]);
        dataset.add_relationship(ids[0], ids[1]).unwrap();
        dataset.add_relationship(ids[0], ids[2]).unwrap();
        dataset.set_root(Some(ids[0])).unwrap();

        let layout = Engine::new().calculate(&dataset);
        let levels = layout.by_level();

        assert_eq!(levels[&0], vec![ids[0]]);
        assert_eq!(levels[&1], vec![ids[1], ids[2]]);
    }
}
