// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based node storage.
//!
//! Every node of the output graph gets a type-safe key for O(1) lookup in the
//! arena. Keys are created by `slotmap::SlotMap` and stay valid for the life
//! of the graph (generational indices). Keys are local to one graph: merging a
//! fragment into another graph re-keys its nodes.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a node (one resource of the output graph).
    pub struct NodeKey;
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn keys_are_distinct_per_insert() {
        let mut map: SlotMap<NodeKey, u8> = SlotMap::with_key();
        let a = map.insert(1);
        let b = map.insert(2);
        assert_ne!(a, b);
        assert_eq!(map[a], 1);
        assert_eq!(map[b], 2);
    }
}
