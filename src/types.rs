use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Identifier of a node in the graph.
///
/// Parents are stored as `NodeId` references rather than owned nodes, so the
/// graph can represent (and detect) cycles without shared-ownership tricks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

/// Kind tag of a node.
///
/// - `Average`: combines two or more inputs; only becomes a hazard once the
///   upward scan reaches it along a second path.
/// - `Ordinary`: every other kind. The original tag is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum NodeKind {
    Average,
    Ordinary(String),
}

impl NodeKind {
    pub fn is_average(&self) -> bool {
        matches!(self, NodeKind::Average)
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Average => "average",
            NodeKind::Ordinary(tag) => tag,
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Ordinary("ordinary".to_string())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Err("invalid node kind: empty string".to_string()),
            "average" => Ok(NodeKind::Average),
            other => Ok(NodeKind::Ordinary(other.to_string())),
        }
    }
}

impl TryFrom<String> for NodeKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_tag_is_case_insensitive() {
        assert_eq!("Average".parse::<NodeKind>(), Ok(NodeKind::Average));
        assert_eq!(" average ".parse::<NodeKind>(), Ok(NodeKind::Average));
    }

    #[test]
    fn other_tags_are_ordinary() {
        let kind: NodeKind = "sum".parse().unwrap();
        assert_eq!(kind, NodeKind::Ordinary("sum".to_string()));
        assert!(!kind.is_average());
        assert_eq!(kind.to_string(), "sum");
    }

    #[test]
    fn empty_tag_is_rejected() {
        assert!("  ".parse::<NodeKind>().is_err());
    }
}
