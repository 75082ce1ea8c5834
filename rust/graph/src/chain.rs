// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linked chains of nodes.
//!
//! The ifcOWL list encoding turns every sequence (corner points of a face,
//! the x/y/z coordinates of a point) into list nodes joined by `hasNext`.
//! The arena holds the nodes, [`GraphSink::link_chain`](crate::GraphSink::link_chain)
//! links them, and this module walks them. Walking is iterative, so long
//! chains never recurse.

use rustc_hash::FxHashSet;

use crate::arena::OutputGraph;
use crate::keys::NodeKey;
use crate::vocab::Property;

impl OutputGraph {
    /// Walks the chain starting at `start`, yielding each node once.
    ///
    /// The walk stops at a node without a successor, or right before a node
    /// that was already visited (the closing link of a loop).
    pub fn chain(&self, start: NodeKey) -> Chain<'_> {
        Chain {
            graph: self,
            next: self.contains(start).then_some(start),
            seen: FxHashSet::default(),
        }
    }

    /// Returns the number of `hasNext` steps needed to come back to `start`,
    /// or `None` if the chain starting there does not loop back to it.
    pub fn cycle_len(&self, start: NodeKey) -> Option<usize> {
        let mut steps = 0;
        let mut seen = FxHashSet::default();
        let mut current = start;
        loop {
            let next = self.node_value(current, Property::HasNext)?;
            steps += 1;
            if next == start {
                return Some(steps);
            }
            if !seen.insert(next) {
                // Loops, but not through `start`.
                return None;
            }
            current = next;
        }
    }
}

/// Iterator over a `hasNext` chain.
pub struct Chain<'a> {
    graph: &'a OutputGraph,
    next: Option<NodeKey>,
    seen: FxHashSet<NodeKey>,
}

impl Iterator for Chain<'_> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next.take()?;
        self.seen.insert(current);
        self.next = self
            .graph
            .node_value(current, Property::HasNext)
            .filter(|n| !self.seen.contains(n));
        Some(current)
    }
}
