use std::collections::HashSet;
use serde::{Serialize, Deserialize};


/// Right frontier constraint applied by the A* decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rfc {
    /// Coordinating and subordinating relations update the
    /// frontier differently.
    #[default]
    Full,
    /// Every relation is subordinating.
    Simple,
    /// No constraint: any processed EDU is a legal site.
    None,
}


impl Rfc {
    /// Returns the name of the constraint.
    pub fn name(&self) -> &str {
        match self {
            Rfc::Full => "full",
            Rfc::Simple => "simple",
            Rfc::None => "none",
        }
    }


    /// The frontier after attaching `node` to the frontier node at
    /// `site_pos` with a relation of the given kind.
    ///
    /// A coordinating attachment replaces the site by `node`;
    /// a subordinating one pushes `node` above the site.
    pub(crate) fn advance(
        &self,
        frontier: &[usize],
        site_pos: usize,
        node: usize,
        coordinating: bool,
    ) -> Vec<usize>
    {
        let keep = match self {
            Rfc::Full if coordinating => site_pos,
            _ => site_pos + 1,
        };
        let mut next = Vec::with_capacity(keep + 1);
        next.extend_from_slice(&frontier[..keep]);
        next.push(node);
        next
    }
}


/// The set of coordinating relation labels.
/// Any other label is subordinating.
/// Labels are compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationKinds {
    coordinating: HashSet<String>,
}


impl RelationKinds {
    /// Construct the set from the given coordinating labels.
    pub fn new<I, S>(coordinating: I) -> Self
        where I: IntoIterator<Item = S>,
              S: AsRef<str>,
    {
        let coordinating = coordinating.into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();
        Self { coordinating }
    }


    /// Returns `true` if `label` is coordinating.
    pub fn is_coordinating(&self, label: &str) -> bool {
        self.coordinating.contains(&label.to_lowercase())
    }
}


impl Default for RelationKinds {
    fn default() -> Self {
        Self::new([
            "alternation",
            "continuation",
            "contrast",
            "narration",
            "parallel",
            "result",
        ])
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordination_replaces_the_site() {
        let frontier = vec![0, 1, 2];
        assert_eq!(Rfc::Full.advance(&frontier, 1, 3, true), vec![0, 3]);
        assert_eq!(Rfc::Full.advance(&frontier, 1, 3, false), vec![0, 1, 3]);
        assert_eq!(Rfc::Simple.advance(&frontier, 1, 3, true), vec![0, 1, 3]);
    }

    #[test]
    fn test_relation_kinds() {
        let kinds = RelationKinds::default();
        assert!(kinds.is_coordinating("Narration"));
        assert!(!kinds.is_coordinating("Elaboration"));
    }
}
