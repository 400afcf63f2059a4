// Flat snapshot format for the automaton: versioned node table

use std::collections::VecDeque;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::AutomatonError;
use crate::node::Node;
use crate::trie::Automaton;

/// Current flat format version. Bumped whenever the layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// One trie node in the flat table.
///
/// `edges` point at indices of the same table. Nodes are laid out in
/// breadth-first order, so every edge points to a strictly larger index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatNode {
    pub terminal: bool,
    pub edges: Vec<(char, u32)>,
}

/// The automaton as a breadth-first node table, index 0 being the root.
///
/// An owned recursive tree nests one level per character, which runs into
/// recursion limits in most serializers for long words. The flat table has
/// constant nesting depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatAutomaton {
    pub version: u32,
    pub nodes: Vec<FlatNode>,
}

impl From<&Automaton> for FlatAutomaton {
    fn from(automaton: &Automaton) -> Self {
        let mut nodes = Vec::new();
        let mut queue: VecDeque<&Node> = VecDeque::from([automaton.root()]);
        let mut next_index: u32 = 1;
        while let Some(node) = queue.pop_front() {
            let mut children: Vec<(char, &Node)> = node.children().collect();
            children.sort_unstable_by_key(|&(c, _)| c);
            let mut edges = Vec::with_capacity(children.len());
            for (c, child) in children {
                edges.push((c, next_index));
                next_index += 1;
                queue.push_back(child);
            }
            nodes.push(FlatNode {
                terminal: node.is_terminal(),
                edges,
            });
        }
        Self {
            version: FORMAT_VERSION,
            nodes,
        }
    }
}

impl TryFrom<FlatAutomaton> for Automaton {
    type Error = AutomatonError;

    /// Rebuild the owned tree. Nodes are assembled from the back of the table
    /// so every child is complete before its parent takes ownership of it.
    fn try_from(flat: FlatAutomaton) -> Result<Self, Self::Error> {
        if flat.version != FORMAT_VERSION {
            return Err(AutomatonError::SnapshotFormat {
                expected: FORMAT_VERSION,
                actual: flat.version,
            });
        }
        if flat.nodes.is_empty() {
            return Err(AutomatonError::SnapshotCorrupt("missing root node".into()));
        }

        let count = flat.nodes.len();
        let mut built: Vec<Option<Node>> = vec![None; count];
        let mut word_count = 0;

        for (index, flat_node) in flat.nodes.into_iter().enumerate().rev() {
            let mut node = Node::new();
            node.set_terminal(flat_node.terminal);
            if flat_node.terminal {
                word_count += 1;
            }
            for (c, child_index) in flat_node.edges {
                let child_index = child_index as usize;
                if child_index <= index || child_index >= count {
                    return Err(AutomatonError::SnapshotCorrupt(format!(
                        "node {index} has edge to invalid node {child_index}"
                    )));
                }
                let child = built[child_index].take().ok_or_else(|| {
                    AutomatonError::SnapshotCorrupt(format!(
                        "node {child_index} is referenced more than once"
                    ))
                })?;
                node.attach(c, child);
            }
            built[index] = Some(node);
        }

        if built[1..].iter().any(Option::is_some) {
            return Err(AutomatonError::SnapshotCorrupt(
                "snapshot contains unreachable nodes".into(),
            ));
        }
        let root = built[0]
            .take()
            .ok_or_else(|| AutomatonError::SnapshotCorrupt("missing root node".into()))?;
        // The root is never terminal: empty words are not insertable.
        if root.is_terminal() {
            return Err(AutomatonError::SnapshotCorrupt("terminal root node".into()));
        }
        Ok(Automaton::from_parts(root, word_count))
    }
}

impl Serialize for Automaton {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlatAutomaton::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Automaton {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flat = FlatAutomaton::deserialize(deserializer)?;
        Automaton::try_from(flat).map_err(serde::de::Error::custom)
    }
}
