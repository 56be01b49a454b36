use super::aggregate;
use super::projection::{project, DisplayRow, Projection};
use super::{Node, NodePath};
use crate::error::TreeError;
use crate::record::TransactionRecord;

/// Owns one aggregation tree and the rows currently shown for it.
///
/// Every successful [`Session::on_select`] re-projects the tree, so any row index obtained
/// before the call must not be used afterwards.
#[derive(Debug)]
pub struct Session {
    root: Node,
    projection: Projection,
}

impl Session {
    pub fn new(root: Node) -> Self {
        let projection = project(&root);
        Self { root, projection }
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Self {
        Self::new(aggregate::build(records))
    }

    /// Throws away the current tree, including its expansion state, and builds a new one.
    pub fn reload<'a>(&mut self, records: impl IntoIterator<Item = &'a TransactionRecord>) {
        self.root = aggregate::build(records);
        self.projection = project(&self.root);
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn rows(&self) -> &[DisplayRow] {
        self.projection.rows()
    }

    pub fn len(&self) -> usize {
        self.projection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projection.is_empty()
    }

    pub fn resolve(&self, row: usize) -> Result<&NodePath, TreeError> {
        self.projection
            .resolve(row)
            .ok_or_else(|| self.out_of_range(row))
    }

    /// The node that produced `row` in the current projection.
    pub fn node(&self, row: usize) -> Result<&Node, TreeError> {
        let path = self.resolve(row)?;
        self.root
            .descendant(path)
            .ok_or_else(|| self.out_of_range(row))
    }

    /// Toggles the node behind `row` and returns the rows of the new projection.
    pub fn on_select(&mut self, row: usize) -> Result<&[DisplayRow], TreeError> {
        let path = self.resolve(row)?.clone();
        let out_of_range = self.out_of_range(row);
        let node = self.root.descendant_mut(&path).ok_or(out_of_range)?;
        log::debug!("Toggling '{}' at row {}", node.key(), row);
        node.toggle();
        self.projection = project(&self.root);
        Ok(self.projection.rows())
    }

    fn out_of_range(&self, row: usize) -> TreeError {
        TreeError::IndexOutOfRange {
            index: row,
            len: self.projection.len(),
        }
    }
}
