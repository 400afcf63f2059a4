// Trie node: character edges plus a terminal flag

use hashbrown::HashMap;

/// A node in the dictionary trie.
///
/// Each node exclusively owns its children. A word is recognized iff
/// following its characters from the root lands on a node whose `terminal`
/// flag is set; words with a shared prefix share the nodes of that prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    children: HashMap<char, Node>,
    terminal: bool,
}

impl Node {
    /// Create an empty, non-terminal node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the edge labelled `c`, if present.
    pub fn child(&self, c: char) -> Option<&Node> {
        self.children.get(&c)
    }

    /// Follow the edge labelled `c`, creating an empty child if absent.
    pub fn child_or_insert(&mut self, c: char) -> &mut Node {
        self.children.entry(c).or_default()
    }

    /// Attach an already-built child under `c`, replacing any existing edge.
    pub(crate) fn attach(&mut self, c: char, child: Node) {
        self.children.insert(c, child);
    }

    /// Iterate over `(edge, child)` pairs in unspecified order.
    pub fn children(&self) -> impl Iterator<Item = (char, &Node)> {
        self.children.iter().map(|(&c, n)| (c, n))
    }

    /// Number of outgoing edges.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether a dictionary word ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub(crate) fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal;
    }

    /// Whether this node has no outgoing edges.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
