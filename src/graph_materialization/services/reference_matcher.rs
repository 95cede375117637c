use crate::graph_materialization::domain::{AncestorRef, Occurrence};
use std::collections::HashMap;

/// (declaring file, component name, version)
type MatchKey<'a> = (&'a str, &'a str, &'a str);

/// ReferenceMatcher resolves raw ancestor references to occurrences
///
/// Matching is exact on name and version and scoped to the declaring file of
/// the citing occurrence, so two manifests in a monorepo that both declare
/// `X@1.0` never get linked to each other. When several occurrences share a
/// key the first one in inventory order wins.
pub struct ReferenceMatcher<'a> {
    index: HashMap<MatchKey<'a>, &'a Occurrence>,
}

impl<'a> ReferenceMatcher<'a> {
    pub fn new(occurrences: &'a [Occurrence]) -> Self {
        let mut index = HashMap::with_capacity(occurrences.len());
        for occurrence in occurrences {
            index
                .entry((
                    occurrence.input_file_path(),
                    occurrence.name(),
                    occurrence.version(),
                ))
                .or_insert(occurrence);
        }
        Self { index }
    }

    /// Returns the occurrence `reference` points at, if it was captured.
    ///
    /// A missing match is not an error: scanners routinely name ancestors
    /// that never became occurrences themselves.
    pub fn resolve(&self, reference: &AncestorRef, citing: &Occurrence) -> Option<&'a Occurrence> {
        if reference.is_empty() {
            return None;
        }
        self.index
            .get(&(
                citing.input_file_path(),
                reference.name(),
                reference.version(),
            ))
            .copied()
    }
}
