// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merging a fragment graph into a shared graph.
//!
//! Each room is built into its own fragment. A fragment either lands in the
//! shared graph completely or not at all: every identity is checked before
//! the first node is moved.

use rustc_hash::FxHashMap;

use crate::arena::{OutputGraph, Value};
use crate::error::{Error, Result};
use crate::keys::NodeKey;

impl OutputGraph {
    /// Moves every node of `fragment` into this graph, preserving the
    /// fragment's insertion order and rewriting node references.
    ///
    /// Returns the mapping from fragment keys to keys in this graph. Fails
    /// without modifying this graph if any fragment identity already exists
    /// here.
    pub fn merge(&mut self, fragment: OutputGraph) -> Result<FxHashMap<NodeKey, NodeKey>> {
        if let Some(dup) = fragment
            .nodes
            .values()
            .find(|n| self.by_identity.contains_key(&n.identity))
        {
            return Err(Error::DuplicateIdentity(dup.identity.clone()));
        }

        let mut remap = FxHashMap::default();
        remap.reserve(fragment.len());
        let mut pending = Vec::with_capacity(fragment.len());

        for (old_key, node) in fragment.nodes {
            let new_key = self.insert_node(&node.identity, node.class)?;
            remap.insert(old_key, new_key);
            pending.push((new_key, node.attributes));
        }

        for (key, mut attributes) in pending {
            for (_, values) in attributes.iter_mut() {
                for value in values.iter_mut() {
                    if let Value::Node(target) = value {
                        *target = *remap.get(target).ok_or(Error::NodeNotFound(*target))?;
                    }
                }
            }
            if let Some(node) = self.nodes.get_mut(key) {
                node.attributes = attributes;
            }
        }

        Ok(remap)
    }
}
