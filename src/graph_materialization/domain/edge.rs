use super::OccurrenceId;

/// Direct requirement: `ancestor` pulled `descendant` into the project.
///
/// An edge always spans exactly one hop. It remembers whether its ancestor is
/// a top-level occurrence so the traversal never has to look occurrences up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    ancestor: OccurrenceId,
    descendant: OccurrenceId,
    ancestor_top_level: bool,
}

impl Edge {
    pub const PATH_LENGTH: u32 = 1;

    pub fn new(ancestor: OccurrenceId, descendant: OccurrenceId, ancestor_top_level: bool) -> Self {
        Self {
            ancestor,
            descendant,
            ancestor_top_level,
        }
    }

    pub fn ancestor(&self) -> OccurrenceId {
        self.ancestor
    }

    pub fn descendant(&self) -> OccurrenceId {
        self.descendant
    }

    pub fn ancestor_is_top_level(&self) -> bool {
        self.ancestor_top_level
    }
}
