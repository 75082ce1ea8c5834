// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Kno-IFC Graph
//!
//! Arena-backed output graph for ifcOWL conversion.
//!
//! Every emitted resource is a node in a slot map with a stable key, a local
//! name (its identity), a class, and ordered attribute values. Builders write
//! through the append-only [`GraphSink`] interface. Linked list encodings
//! (`hasNext` chains) are plain nodes that can be linked and walked without
//! recursion, and per-room fragments merge into a shared graph
//! all-or-nothing. A finished graph is written out as N-Triples.

pub mod arena;
pub mod chain;
pub mod error;
pub mod keys;
pub mod merge;
pub mod ntriples;
pub mod sink;
pub mod vocab;

pub use arena::{Literal, NodeData, OutputGraph, Value, Values, DEFAULT_BASE};
pub use chain::Chain;
pub use error::{Error, Result};
pub use keys::NodeKey;
pub use sink::GraphSink;
pub use vocab::{Class, Datatype, Property, CART_NS, IFC_NS, RDFS_NS, RDF_TYPE, XSD_NS};
