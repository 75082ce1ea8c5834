// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for output graph nodes.
//!
//! The [`OutputGraph`] is the central owner of every emitted resource. Nodes
//! live inside a slot map with stable, generational keys, and an identity
//! index maps each node's local name back to its key. Attribute values keep
//! their insertion order, so multi-valued properties such as
//! `InnerBoundaries` preserve perimeter order.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::keys::NodeKey;
use crate::vocab::{Class, Datatype, Property};

/// Base namespace used when no other is configured.
pub const DEFAULT_BASE: &str = "http://something/example/";

/// A literal value with its lexical form and datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Datatype,
}

impl Literal {
    /// Creates an untyped literal.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Datatype::Plain,
        }
    }

    /// Creates a typed literal.
    pub fn typed(lexical: impl Into<String>, datatype: Datatype) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
        }
    }
}

/// The object of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Reference to another node of the same graph.
    Node(NodeKey),
    /// Reference to an external resource by full IRI.
    Iri(String),
    /// A literal.
    Literal(Literal),
}

impl Value {
    /// Returns the referenced node, if this value is a node reference.
    pub fn as_node(&self) -> Option<NodeKey> {
        match self {
            Value::Node(k) => Some(*k),
            _ => None,
        }
    }

    /// Returns the literal, if this value is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the external IRI, if this value is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Value::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<NodeKey> for Value {
    fn from(k: NodeKey) -> Self {
        Value::Node(k)
    }
}

impl From<Literal> for Value {
    fn from(l: Literal) -> Self {
        Value::Literal(l)
    }
}

/// Values of one property. Nearly every property is single-valued.
pub type Values = SmallVec<[Value; 1]>;

/// Data stored for a node: identity, class and ordered attributes.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub identity: String,
    pub class: Class,
    pub attributes: Vec<(Property, Values)>,
}

impl NodeData {
    /// Returns all values of a property, in insertion order.
    pub fn values(&self, property: Property) -> &[Value] {
        self.attributes
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn values_mut(&mut self, property: Property) -> &mut Values {
        let pos = match self.attributes.iter().position(|(p, _)| *p == property) {
            Some(pos) => pos,
            None => {
                self.attributes.push((property, Values::new()));
                self.attributes.len() - 1
            }
        };
        &mut self.attributes[pos].1
    }
}

/// The arena that owns all nodes of one output graph.
///
/// # Example
///
/// ```
/// use kno_ifc_graph::{Class, GraphSink, OutputGraph, Property};
///
/// let mut graph = OutputGraph::default();
/// let room = graph.create("Room1", Class::IfcSpace).unwrap();
/// let wall = graph.create("Room1_wall_0", Class::IfcWallStandardCase).unwrap();
/// graph.add(room, Property::RelatedElements, wall.into()).unwrap();
///
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.node_value(room, Property::RelatedElements), Some(wall));
/// ```
#[derive(Debug)]
pub struct OutputGraph {
    base: String,
    pub(crate) nodes: SlotMap<NodeKey, NodeData>,
    pub(crate) by_identity: FxHashMap<String, NodeKey>,
}

impl OutputGraph {
    /// Creates an empty graph whose node IRIs are rendered under `base`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            nodes: SlotMap::with_key(),
            by_identity: FxHashMap::default(),
        }
    }

    /// Base namespace of node IRIs.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if the key references a node of this graph.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Returns the node data, or `None` if not found.
    pub fn node(&self, key: NodeKey) -> Option<&NodeData> {
        self.nodes.get(key)
    }

    /// Looks up a node by identity.
    pub fn find(&self, identity: &str) -> Option<NodeKey> {
        self.by_identity.get(identity).copied()
    }

    /// Returns the identity (local name) of a node.
    pub fn identity(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(key).map(|n| n.identity.as_str())
    }

    /// Returns the class of a node.
    pub fn class_of(&self, key: NodeKey) -> Option<Class> {
        self.nodes.get(key).map(|n| n.class)
    }

    /// Returns the full IRI of a node.
    pub fn iri(&self, key: NodeKey) -> Option<String> {
        self.identity(key).map(|id| format!("{}{}", self.base, id))
    }

    /// Returns all values of a property on a node, in insertion order.
    pub fn values(&self, key: NodeKey, property: Property) -> &[Value] {
        self.nodes
            .get(key)
            .map(|n| n.values(property))
            .unwrap_or(&[])
    }

    /// Returns the first value of a property.
    pub fn value(&self, key: NodeKey, property: Property) -> Option<&Value> {
        self.values(key, property).first()
    }

    /// Returns the first value of a property if it is a node reference.
    pub fn node_value(&self, key: NodeKey, property: Property) -> Option<NodeKey> {
        self.value(key, property).and_then(Value::as_node)
    }

    /// Returns every node referenced through a property, in insertion order.
    pub fn node_values(&self, key: NodeKey, property: Property) -> Vec<NodeKey> {
        self.values(key, property)
            .iter()
            .filter_map(Value::as_node)
            .collect()
    }

    /// Returns the first value of a property if it is a literal.
    pub fn literal(&self, key: NodeKey, property: Property) -> Option<&Literal> {
        self.value(key, property).and_then(Value::as_literal)
    }

    /// Iterates all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &NodeData)> {
        self.nodes.iter()
    }

    /// Iterates the keys of all nodes of a class, in insertion order.
    pub fn nodes_of_class(&self, class: Class) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes
            .iter()
            .filter(move |(_, n)| n.class == class)
            .map(|(k, _)| k)
    }

    /// Returns the number of nodes of a class.
    pub fn count_of_class(&self, class: Class) -> usize {
        self.nodes.values().filter(|n| n.class == class).count()
    }

    /// Returns node counts per class, skipping classes with no nodes.
    pub fn class_counts(&self) -> Vec<(Class, usize)> {
        Class::ALL
            .iter()
            .map(|&c| (c, self.count_of_class(c)))
            .filter(|&(_, n)| n > 0)
            .collect()
    }

    // --- Mutation helpers (used by the sink implementation and merge) ---

    pub(crate) fn insert_node(&mut self, identity: &str, class: Class) -> Result<NodeKey> {
        if identity.is_empty() || identity.chars().any(char::is_whitespace) {
            return Err(Error::InvalidIdentity(identity.to_string()));
        }
        if self.by_identity.contains_key(identity) {
            return Err(Error::DuplicateIdentity(identity.to_string()));
        }

        let key = self.nodes.insert(NodeData {
            identity: identity.to_string(),
            class,
            attributes: Vec::new(),
        });
        self.by_identity.insert(identity.to_string(), key);
        Ok(key)
    }

    pub(crate) fn check_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::Node(k) if !self.nodes.contains_key(*k) => Err(Error::NodeNotFound(*k)),
            _ => Ok(()),
        }
    }
}

impl Default for OutputGraph {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::GraphSink;

    #[test]
    fn new_graph_is_empty() {
        let graph = OutputGraph::default();
        assert!(graph.is_empty());
        assert_eq!(graph.base(), DEFAULT_BASE);
    }

    #[test]
    fn create_and_find() {
        let mut graph = OutputGraph::new("http://example.org/b/");
        let key = graph.create("Kitchen", Class::IfcSpace).unwrap();

        assert_eq!(graph.find("Kitchen"), Some(key));
        assert_eq!(graph.class_of(key), Some(Class::IfcSpace));
        assert_eq!(graph.iri(key).as_deref(), Some("http://example.org/b/Kitchen"));
    }

    #[test]
    fn rejects_bad_identities() {
        let mut graph = OutputGraph::default();
        assert!(matches!(
            graph.create("", Class::IfcSpace),
            Err(Error::InvalidIdentity(_))
        ));
        assert!(matches!(
            graph.create("two words", Class::IfcSpace),
            Err(Error::InvalidIdentity(_))
        ));
    }

    #[test]
    fn nodes_of_class_in_insertion_order() {
        let mut graph = OutputGraph::default();
        let w0 = graph.create("r_wall_0", Class::IfcWallStandardCase).unwrap();
        graph.create("r", Class::IfcSpace).unwrap();
        let w1 = graph.create("r_wall_1", Class::IfcWallStandardCase).unwrap();

        let walls: Vec<_> = graph.nodes_of_class(Class::IfcWallStandardCase).collect();
        assert_eq!(walls, vec![w0, w1]);
        assert_eq!(graph.count_of_class(Class::IfcWallStandardCase), 2);
        assert_eq!(
            graph.class_counts(),
            vec![(Class::IfcSpace, 1), (Class::IfcWallStandardCase, 2)]
        );
    }

    #[test]
    fn missing_node_has_no_values() {
        let mut graph = OutputGraph::default();
        let key = graph.create("a", Class::CartPoint).unwrap();
        assert!(graph.values(key, Property::XCoord).is_empty());
        assert!(graph.value(key, Property::XCoord).is_none());
    }
}
