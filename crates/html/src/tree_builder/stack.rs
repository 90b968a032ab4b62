//! Stack of open elements.

use crate::types::NodeId;

/// Elements whose close tag has not been seen yet, innermost last.
#[derive(Clone, Debug, Default)]
pub(crate) struct OpenElementsStack {
    items: Vec<NodeId>,
    max_depth: u32,
}

impl OpenElementsStack {
    pub(crate) fn push(&mut self, id: NodeId) {
        self.items.push(id);
        self.max_depth = self.max_depth.max(self.items.len() as u32);
    }

    pub(crate) fn current(&self) -> Option<NodeId> {
        self.items.last().copied()
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.items.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
