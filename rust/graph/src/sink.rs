// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The write interface the converter emits through.
//!
//! Builders only ever create nodes and attach values, so the interface is
//! three calls: `create`, `set` (replace) and `add` (append to a
//! multi-valued property). Nothing is ever removed during a run.

use crate::arena::{OutputGraph, Value};
use crate::error::{Error, Result};
use crate::keys::NodeKey;
use crate::vocab::{Class, Property};

/// Append-only sink for output graph nodes.
pub trait GraphSink {
    /// Creates a node with the given identity and class.
    ///
    /// Fails if the identity is already taken.
    fn create(&mut self, identity: &str, class: Class) -> Result<NodeKey>;

    /// Sets a property, replacing any previous values.
    fn set(&mut self, node: NodeKey, property: Property, value: Value) -> Result<()>;

    /// Adds a value to a multi-valued property. Adding a value that is
    /// already present is a no-op.
    fn add(&mut self, node: NodeKey, property: Property, value: Value) -> Result<()>;

    /// Links `nodes` in order through `hasNext`. When `closed` is set the
    /// last node links back to the first.
    fn link_chain(&mut self, nodes: &[NodeKey], closed: bool) -> Result<()> {
        let (&first, rest) = nodes.split_first().ok_or(Error::EmptyChain)?;

        let mut prev = first;
        for &node in rest {
            self.set(prev, Property::HasNext, node.into())?;
            prev = node;
        }
        if closed {
            self.set(prev, Property::HasNext, first.into())?;
        }
        Ok(())
    }
}

impl GraphSink for OutputGraph {
    fn create(&mut self, identity: &str, class: Class) -> Result<NodeKey> {
        self.insert_node(identity, class)
    }

    fn set(&mut self, node: NodeKey, property: Property, value: Value) -> Result<()> {
        self.check_value(&value)?;
        let data = self.nodes.get_mut(node).ok_or(Error::NodeNotFound(node))?;
        let values = data.values_mut(property);
        values.clear();
        values.push(value);
        Ok(())
    }

    fn add(&mut self, node: NodeKey, property: Property, value: Value) -> Result<()> {
        self.check_value(&value)?;
        let data = self.nodes.get_mut(node).ok_or(Error::NodeNotFound(node))?;
        let values = data.values_mut(property);
        if !values.contains(&value) {
            values.push(value);
        }
        Ok(())
    }
}
