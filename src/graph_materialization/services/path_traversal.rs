use super::{PathCollector, Reach, ReachabilityCache, RequirementGraph};
use crate::graph_materialization::domain::{Edge, OccurrenceId};
use crate::shared::error::GraphError;
use crate::shared::Result;
use std::collections::btree_set;
use std::collections::{HashMap, HashSet};

/// PathTraversal walks the requirement graph upward, from descendants towards
/// the packages that pulled them in, and collects a path for every top-level
/// ancestor it meets.
///
/// # Algorithm
///
/// Walking `node` yields every `(top-level ancestor, hops)` pair reachable
/// from `node` along simple paths that avoid the in-flight path:
///
/// 1. For each requirer edge of `node`, skip it if its ancestor is already on
///    the in-flight path (requirement cycle).
/// 2. A top-level ancestor is itself one hop away. The walk still continues
///    past it, since a top-level package may be pulled in by another one.
/// 3. If the ancestor's reachability is cached, shift it by one hop (hit);
///    otherwise walk the ancestor (miss).
/// 4. Once all edges are done, emit one path per pair for `node`, store the
///    pairs in the cache and hand them, one hop further, to the node below.
///
/// The in-flight path is an explicit stack of frames, so chain length is
/// bounded by `max_depth` and not by the thread's stack.
///
/// Caching is only sound for occurrences outside requirement cycles: their
/// reachable set cannot depend on which nodes are in flight below them, since
/// a node above them that is also below them would put them on a cycle.
/// Occurrences on a cycle are therefore never cached and are re-walked
/// under each in-flight path, which keeps cached and uncached runs equal.
/// Inside a dense cycle that is exponential in the cycle's size, so every
/// entered frame counts against `max_walks` and the run aborts once the
/// budget is spent.
pub struct PathTraversal<'a> {
    graph: &'a RequirementGraph,
    cache: &'a mut ReachabilityCache,
    collector: &'a mut PathCollector,
    /// In-flight occurrences and their position on the stack
    on_path: HashMap<OccurrenceId, usize>,
    visited: HashSet<OccurrenceId>,
    max_depth: usize,
    max_walks: usize,
    walks: usize,
}

/// One in-flight occurrence with the requirer edges it has yet to follow
struct Frame<'g> {
    node: OccurrenceId,
    requirers: btree_set::Iter<'g, Edge>,
    reaches: HashSet<Reach>,
}

impl<'a> PathTraversal<'a> {
    pub fn new(
        graph: &'a RequirementGraph,
        cache: &'a mut ReachabilityCache,
        collector: &'a mut PathCollector,
        max_depth: usize,
    ) -> Self {
        Self {
            graph,
            cache,
            collector,
            on_path: HashMap::new(),
            visited: HashSet::new(),
            max_depth,
            max_walks: usize::MAX,
            walks: 0,
        }
    }

    /// Caps the number of frames entered over all walks of this traversal
    pub fn with_max_walks(mut self, max_walks: usize) -> Self {
        self.max_walks = max_walks;
        self
    }

    /// Walks every path leading up from `start`
    ///
    /// # Errors
    /// Returns [`GraphError::TraversalDepthExceeded`] when a requirement chain
    /// is longer than the configured maximum depth, and
    /// [`GraphError::TraversalBudgetExceeded`] once the walk budget is spent.
    /// The run must then be discarded: the collected paths are incomplete.
    pub fn walk_from(&mut self, start: OccurrenceId) -> Result<()> {
        self.on_path.clear();
        let mut stack = Vec::new();
        self.enter(&mut stack, start)?;

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let Some(edge) = frame.requirers.next().copied() else {
                self.leave(&mut stack);
                continue;
            };

            let ancestor = edge.ancestor();
            if let Some(position) = self.on_path.get(&ancestor) {
                tracing::trace!(
                    occurrence = %frame.node,
                    ancestor = %ancestor,
                    cycle_length = depth - position,
                    "skipping requirement cycle"
                );
                continue;
            }

            if edge.ancestor_is_top_level() {
                frame
                    .reaches
                    .insert(Reach::new(ancestor, Edge::PATH_LENGTH));
            }

            if self.graph.is_in_cycle(ancestor) {
                self.cache.bypass();
            } else if let Some(cached) = self.cache.probe(ancestor) {
                frame
                    .reaches
                    .extend(cached.iter().map(|reach| reach.one_hop_further()));
                continue;
            }

            self.enter(&mut stack, ancestor)?;
        }

        Ok(())
    }

    /// Whether any walk so far has passed through `id`
    pub fn has_visited(&self, id: OccurrenceId) -> bool {
        self.visited.contains(&id)
    }

    /// Frames entered so far, over all walks
    pub fn walks(&self) -> usize {
        self.walks
    }

    fn enter(&mut self, stack: &mut Vec<Frame<'a>>, node: OccurrenceId) -> Result<()> {
        if stack.len() >= self.max_depth {
            return Err(GraphError::TraversalDepthExceeded {
                id: node.get(),
                max_depth: self.max_depth,
            }
            .into());
        }
        if self.walks >= self.max_walks {
            return Err(GraphError::TraversalBudgetExceeded {
                id: node.get(),
                max_walks: self.max_walks,
            }
            .into());
        }

        self.walks += 1;
        self.visited.insert(node);
        self.on_path.insert(node, stack.len());

        let graph: &'a RequirementGraph = self.graph;
        stack.push(Frame {
            node,
            requirers: graph.requirers_of(node),
            reaches: HashSet::new(),
        });
        Ok(())
    }

    fn leave(&mut self, stack: &mut Vec<Frame<'a>>) {
        let Some(frame) = stack.pop() else {
            return;
        };
        self.on_path.remove(&frame.node);

        for reach in &frame.reaches {
            self.collector
                .collect(reach.top_level_ancestor, frame.node, reach.hops);
        }
        if let Some(below) = stack.last_mut() {
            below
                .reaches
                .extend(frame.reaches.iter().map(|reach| reach.one_hop_further()));
        }
        if !self.graph.is_in_cycle(frame.node) {
            self.cache.record_all(frame.node, frame.reaches);
        }
    }
}
