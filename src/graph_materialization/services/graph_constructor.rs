use super::ReferenceMatcher;
use crate::graph_materialization::domain::{Edge, Occurrence, OccurrenceId};
use petgraph::algo::kosaraju_scc;
use petgraph::graphmap::DiGraphMap;
use std::collections::{btree_set, BTreeMap, BTreeSet, HashSet};

/// Requirement graph of one project: for every descendant, the set of edges
/// to its direct requirers.
#[derive(Debug, Clone, Default)]
pub struct RequirementGraph {
    requirers: BTreeMap<OccurrenceId, BTreeSet<Edge>>,
    leaves: Vec<OccurrenceId>,
    cyclic: HashSet<OccurrenceId>,
    edge_count: usize,
    unresolved_references: usize,
}

impl RequirementGraph {
    /// Edges pointing at the occurrences that require `id`
    pub fn requirers_of(&self, id: OccurrenceId) -> btree_set::Iter<'_, Edge> {
        static NO_REQUIRERS: BTreeSet<Edge> = BTreeSet::new();
        self.requirers.get(&id).unwrap_or(&NO_REQUIRERS).iter()
    }

    /// Descendants with at least one resolved requirer, in id order
    pub fn descendants(&self) -> impl Iterator<Item = OccurrenceId> + '_ {
        self.requirers.keys().copied()
    }

    /// Traversal start points: descendants that never require anything themselves
    pub fn leaves(&self) -> &[OccurrenceId] {
        &self.leaves
    }

    /// Whether `id` sits on a requirement cycle
    pub fn is_in_cycle(&self, id: OccurrenceId) -> bool {
        self.cyclic.contains(&id)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn unresolved_references(&self) -> usize {
        self.unresolved_references
    }

    pub fn is_empty(&self) -> bool {
        self.requirers.is_empty()
    }
}

/// GraphConstructor service building a [`RequirementGraph`] from occurrences
///
/// Pure transformation with no I/O. Unresolvable ancestor references and
/// self-references are dropped without error.
pub struct GraphConstructor;

impl GraphConstructor {
    pub fn build(occurrences: &[Occurrence]) -> RequirementGraph {
        let matcher = ReferenceMatcher::new(occurrences);
        let mut requirers: BTreeMap<OccurrenceId, BTreeSet<Edge>> = BTreeMap::new();
        let mut all_ancestors = HashSet::new();
        let mut unresolved_references = 0;

        for occurrence in occurrences {
            for reference in occurrence.ancestors() {
                let Some(ancestor) = matcher.resolve(reference, occurrence) else {
                    if !reference.is_empty() {
                        unresolved_references += 1;
                    }
                    continue;
                };
                if ancestor.id() == occurrence.id() {
                    continue;
                }

                requirers.entry(occurrence.id()).or_default().insert(Edge::new(
                    ancestor.id(),
                    occurrence.id(),
                    ancestor.is_top_level(),
                ));
                all_ancestors.insert(ancestor.id());
            }
        }

        let leaves = requirers
            .keys()
            .copied()
            .filter(|id| !all_ancestors.contains(id))
            .collect();
        let edge_count = requirers.values().map(BTreeSet::len).sum();
        let cyclic = Self::find_cyclic_nodes(&requirers);

        tracing::debug!(
            descendants = requirers.len(),
            edges = edge_count,
            unresolved_references,
            cyclic_nodes = cyclic.len(),
            "built requirement graph"
        );

        RequirementGraph {
            requirers,
            leaves,
            cyclic,
            edge_count,
            unresolved_references,
        }
    }

    /// Members of every strongly connected component with more than one node
    fn find_cyclic_nodes(
        requirers: &BTreeMap<OccurrenceId, BTreeSet<Edge>>,
    ) -> HashSet<OccurrenceId> {
        let mut graph = DiGraphMap::<OccurrenceId, ()>::new();
        for edge in requirers.values().flatten() {
            graph.add_edge(edge.descendant(), edge.ancestor(), ());
        }

        kosaraju_scc(&graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .flatten()
            .collect()
    }
}
