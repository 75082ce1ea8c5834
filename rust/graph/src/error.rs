// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for output graph operations.

use crate::keys::NodeKey;

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or merging an output graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced node was not found in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeKey),

    /// A node with this identity already exists.
    #[error("duplicate identity: {0}")]
    DuplicateIdentity(String),

    /// Identities must be non-empty and free of whitespace.
    #[error("invalid identity: {0:?}")]
    InvalidIdentity(String),

    /// A chain needs at least one node.
    #[error("chain must have at least one node")]
    EmptyChain,

    /// Writing the serialized graph failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
