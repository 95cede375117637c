use crate::graph_materialization::domain::OccurrenceId;
use std::collections::{HashMap, HashSet};

/// A top-level ancestor known to be reachable, and how many hops away it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reach {
    pub top_level_ancestor: OccurrenceId,
    pub hops: u32,
}

impl Reach {
    pub fn new(top_level_ancestor: OccurrenceId, hops: u32) -> Self {
        Self {
            top_level_ancestor,
            hops,
        }
    }

    /// The same ancestor seen from one hop further down
    pub fn one_hop_further(self) -> Self {
        Self::new(self.top_level_ancestor, self.hops.saturating_add(1))
    }
}

/// ReachabilityCache memoizes, per occurrence, every top-level ancestor
/// reachable from it.
///
/// Scoped to one materialization run and shared by all of its traversals.
/// Entries only grow. An entry exists once the occurrence's upward walk has
/// completed, even when nothing top-level was found above it.
#[derive(Debug, Default)]
pub struct ReachabilityCache {
    entries: HashMap<OccurrenceId, HashSet<Reach>>,
    empty: HashSet<Reach>,
    disabled: bool,
    hits: u64,
    misses: u64,
    redundant_records: u64,
}

impl ReachabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that misses on every probe and stores nothing
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Current reachability of `id`; empty when unknown. Never counts as a hit or miss.
    pub fn lookup(&self, id: OccurrenceId) -> &HashSet<Reach> {
        self.entries.get(&id).unwrap_or(&self.empty)
    }

    /// Looks `id` up on behalf of a traversal, counting the hit or miss
    pub fn probe(&mut self, id: OccurrenceId) -> Option<&HashSet<Reach>> {
        match self.entries.get(&id) {
            Some(reaches) if !self.disabled => {
                self.hits += 1;
                tracing::trace!(occurrence = %id, reaches = reaches.len(), "reachability cache hit");
                Some(reaches)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Counts a walk that could not consult the cache at all
    pub fn bypass(&mut self) {
        self.misses += 1;
    }

    /// Adds one pair for `id`. Recording an existing pair is a no-op.
    pub fn record(&mut self, id: OccurrenceId, top_level_ancestor: OccurrenceId, hops: u32) {
        if self.disabled {
            return;
        }
        if !self
            .entries
            .entry(id)
            .or_default()
            .insert(Reach::new(top_level_ancestor, hops))
        {
            self.redundant_records += 1;
        }
    }

    /// Stores the complete reachability of `id`, marking it resolved even if empty
    pub fn record_all<I>(&mut self, id: OccurrenceId, reaches: I)
    where
        I: IntoIterator<Item = Reach>,
    {
        if self.disabled {
            return;
        }
        self.entries.entry(id).or_default();
        for reach in reaches {
            self.record(id, reach.top_level_ancestor, reach.hops);
        }
    }

    pub fn is_resolved(&self, id: OccurrenceId) -> bool {
        !self.disabled && self.entries.contains_key(&id)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn redundant_records(&self) -> u64 {
        self.redundant_records
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
