use serde::{Serialize, Deserialize};
use std::fmt;

use crate::common::constants::FAKE_ROOT_ID;


/// An elementary discourse unit.
///
/// EDUs are immutable; the builder-style methods return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edu {
    id: String,
    start: usize,
    end: usize,
    grouping: Option<String>,
    subgrouping: Option<String>,
}


impl Edu {
    /// Construct a new EDU spanning `start..end`.
    pub fn new<S: ToString>(id: S, start: usize, end: usize) -> Self {
        Self {
            id: id.to_string(),
            start,
            end,
            grouping: None,
            subgrouping: None,
        }
    }


    /// The distinguished root EDU.
    /// It belongs to no grouping and comes before every other EDU.
    pub fn fake_root() -> Self {
        Self::new(FAKE_ROOT_ID, 0, 0)
    }


    /// Set the document (grouping) this EDU belongs to.
    pub fn grouping<S: ToString>(mut self, grouping: S) -> Self {
        self.grouping = Some(grouping.to_string());
        self
    }


    /// Set the sub-document unit (e.g. the sentence) of this EDU.
    pub fn subgrouping<S: ToString>(mut self, subgrouping: S) -> Self {
        self.subgrouping = Some(subgrouping.to_string());
        self
    }


    /// Identifier, unique within a document.
    pub fn id(&self) -> &str {
        &self.id
    }


    /// The pair `(start, end)` of text offsets.
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }


    /// Grouping of this EDU, if any.
    pub fn grouping_name(&self) -> Option<&str> {
        self.grouping.as_deref()
    }


    /// Subgrouping of this EDU, if any.
    pub fn subgrouping_name(&self) -> Option<&str> {
        self.subgrouping.as_deref()
    }


    /// Returns `true` for the distinguished root EDU.
    pub fn is_fake_root(&self) -> bool {
        self.id == FAKE_ROOT_ID
    }
}


impl fmt::Display for Edu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.id, self.start, self.end)
    }
}


/// A directed candidate edge between two EDUs of the same document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    source: Edu,
    target: Edu,
}


impl Pairing {
    /// Construct a pairing `source -> target`.
    pub fn new(source: Edu, target: Edu) -> Self {
        Self { source, target }
    }


    /// The head of the candidate edge.
    pub fn source(&self) -> &Edu {
        &self.source
    }


    /// The dependent of the candidate edge.
    pub fn target(&self) -> &Edu {
        &self.target
    }
}


impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source.id, self.target.id)
    }
}


/// An accepted, labelled edge of a decoded structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier of the head EDU.
    pub source: String,
    /// Identifier of the dependent EDU.
    pub target: String,
    /// Relation label.
    pub label: String,
}


impl Edge {
    /// Construct a new edge.
    pub fn new<S, T, U>(source: S, target: T, label: U) -> Self
        where S: ToString,
              T: ToString,
              U: ToString,
    {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
        }
    }


    /// The same edge without its relation label.
    pub fn unlabelled(&self) -> (&str, &str) {
        (&self.source, &self.target)
    }
}


impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ( {} / {} )", self.label, self.source, self.target)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_root() {
        let root = Edu::fake_root();
        assert!(root.is_fake_root());
        assert_eq!(root.span(), (0, 0));
        assert_eq!(root.grouping_name(), None);
    }

    #[test]
    fn test_builder_keeps_values() {
        let edu = Edu::new("e1", 3, 10).grouping("d1").subgrouping("s0");
        assert_eq!(edu.id(), "e1");
        assert_eq!(edu.grouping_name(), Some("d1"));
        assert_eq!(edu.subgrouping_name(), Some("s0"));
        assert!(!edu.is_fake_root());
    }

    #[test]
    fn test_edge_display() {
        let edge = Edge::new("e1", "e2", "Elaboration");
        assert_eq!(edge.to_string(), "Elaboration ( e1 / e2 )");
    }
}
