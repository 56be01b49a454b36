use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::TreeError;

pub mod aggregate;
pub mod projection;
pub mod session;

/// Position of a node, given as the child positions walked from the root.
///
/// The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(vec![])
    }

    pub fn child(&self, position: usize) -> Self {
        let mut path = self.0.clone();
        path.push(position);
        Self(path)
    }

    /// Number of steps from the root. Children of the root have depth 1.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(positions: Vec<usize>) -> Self {
        Self(positions)
    }
}

/// A named bucket of the aggregation tree.
///
/// A node without children is a leaf and carries its own value. A node with children is a branch
/// and its total is the sum over all children, visible or not.
#[derive(Debug, Clone)]
pub struct Node {
    key: String,
    leaf_value: Decimal,
    visible: bool,
    children: Vec<Node>,
    child_index: HashMap<String, usize>,
}

impl Node {
    pub fn new_branch(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            leaf_value: Decimal::ZERO,
            visible: true,
            children: vec![],
            child_index: HashMap::new(),
        }
    }

    /// Leaves start out hidden, the user has to drill into their parent to see them.
    pub fn new_leaf(key: impl Into<String>, value: Decimal) -> Self {
        Self {
            key: key.into(),
            leaf_value: value,
            visible: false,
            children: vec![],
            child_index: HashMap::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in the order they were first added.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn has_child(&self, key: &str) -> bool {
        self.child_index.contains_key(key)
    }

    pub fn get_child(&self, key: &str) -> Result<&Node, TreeError> {
        let position = self.child_position(key)?;
        Ok(&self.children[position])
    }

    pub fn get_child_mut(&mut self, key: &str) -> Result<&mut Node, TreeError> {
        let position = self.child_position(key)?;
        Ok(&mut self.children[position])
    }

    fn child_position(&self, key: &str) -> Result<usize, TreeError> {
        self.child_index
            .get(key)
            .copied()
            .ok_or_else(|| TreeError::NotFound {
                parent: self.key.clone(),
                key: key.to_string(),
            })
    }

    /// Appends `child` and registers its key. Fails if a child with the same key exists.
    pub fn add_child(&mut self, child: Node) -> Result<&mut Node, TreeError> {
        if self.has_child(&child.key) {
            return Err(TreeError::DuplicateKey {
                parent: self.key.clone(),
                key: child.key,
            });
        }
        Ok(self.push_child(child))
    }

    /// Appends `child` even if a sibling with the same key exists.
    ///
    /// Lookups by key keep resolving to the first child added under that key.
    pub fn push_child(&mut self, child: Node) -> &mut Node {
        let position = self.children.len();
        self.child_index
            .entry(child.key.clone())
            .or_insert(position);
        self.children.push(child);
        &mut self.children[position]
    }

    /// Returns the child with `key`, creating a visible branch for it if it doesn't exist yet.
    pub fn get_or_add_branch(&mut self, key: &str) -> &mut Node {
        let position = match self.child_index.get(key).copied() {
            Some(position) => position,
            None => {
                log::trace!("New group '{}' under '{}'", key, self.key);
                self.push_child(Node::new_branch(key));
                self.children.len() - 1
            }
        };
        &mut self.children[position]
    }

    /// Own value for leaves, sum over all children otherwise.
    pub fn total(&self) -> Decimal {
        if self.children.is_empty() {
            self.leaf_value
        } else {
            self.children.iter().map(Node::total).sum()
        }
    }

    /// Flips the visibility of every descendant of this node.
    ///
    /// The flip cascades: direct children and all of their descendants each invert their own
    /// flag. Totals are not affected. Toggling a leaf does nothing.
    pub fn toggle(&mut self) {
        for child in &mut self.children {
            child.visible = !child.visible;
            child.toggle();
        }
    }

    pub fn descendant(&self, path: &NodePath) -> Option<&Node> {
        path.positions()
            .iter()
            .try_fold(self, |node, &position| node.children.get(position))
    }

    pub fn descendant_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let mut node = self;
        for &position in path.positions() {
            node = node.children.get_mut(position)?;
        }
        Some(node)
    }
}
