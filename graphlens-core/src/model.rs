use indexmap::IndexMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single attribute value attached to a node or an edge.
///
/// Serializes untagged, so strings stay JSON strings and numbers stay JSON
/// numbers when passed through to the visualization elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Opaque(serde_json::Value),
}

impl AttrValue {
    /// Numeric view of the value, if it has one.
    ///
    /// Strings are trimmed and parsed. Non-finite results are rejected.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            AttrValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            AttrValue::Integer(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            AttrValue::String(s) => s.trim().parse::<f64>().ok(),
            AttrValue::Opaque(serde_json::Value::Number(n)) => n.as_f64(),
            AttrValue::Opaque(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
            AttrValue::Opaque(_) => None,
        };
        value.filter(|v| v.is_finite())
    }

    /// Explicit JSON null, treated as "absent" by attribute lookups.
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Opaque(serde_json::Value::Null))
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Boolean(b) => write!(f, "{}", b),
            AttrValue::Integer(i) => write!(f, "{}", i),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::String(s) => f.write_str(s),
            AttrValue::Opaque(serde_json::Value::String(s)) => f.write_str(s),
            AttrValue::Opaque(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Integer(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Boolean(value)
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        AttrValue::Opaque(value)
    }
}

/// Ordered key/value bag carried by every node and edge.
pub type Attributes = IndexMap<String, AttrValue>;

/// Look up an attribute, treating explicit nulls as absent.
pub fn lookup<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a AttrValue> {
    attributes.get(key).filter(|v| !v.is_null())
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub id: String,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    /// Disambiguating key for parallel edges
    pub key: Option<String>,
    pub attributes: Attributes,
}

/// Borrowed view of one edge with its endpoints resolved to node ids.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub key: Option<&'a str>,
    pub attributes: &'a Attributes,
}

/// Attributed (multi)graph with insertion-ordered nodes and edges.
#[derive(Debug, Clone)]
pub struct AttributedGraph {
    graph: DiGraph<NodeData, EdgeData>,
    index: HashMap<String, NodeIndex>,
    directed: bool,
    multigraph: bool,
}

impl Default for AttributedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributedGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            directed: true,
            multigraph: false,
        }
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// True once any two edges share the same endpoints.
    pub fn is_multigraph(&self) -> bool {
        self.multigraph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Insert a node, or merge `attributes` into an existing one.
    ///
    /// A re-added node keeps its original position in iteration order.
    pub fn add_node(&mut self, id: impl Into<String>, attributes: Attributes) -> NodeIndex {
        let id = id.into();
        if let Some(&idx) = self.index.get(&id) {
            self.graph[idx].attributes.extend(attributes);
            return idx;
        }

        let idx = self.graph.add_node(NodeData {
            id: id.clone(),
            attributes,
        });
        self.index.insert(id, idx);
        idx
    }

    /// Insert an edge, creating missing endpoints with empty attributes.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        key: Option<String>,
        attributes: Attributes,
    ) -> EdgeIndex {
        let source = self.ensure_node(source.into());
        let target = self.ensure_node(target.into());

        if self.has_edge_between(source, target) {
            self.multigraph = true;
        }

        self.graph
            .add_edge(source, target, EdgeData { key, attributes })
    }

    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_weights()
    }

    /// Edges in insertion order, parallel edges included.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(move |edge| EdgeView {
            source: &self.graph[edge.source()].id,
            target: &self.graph[edge.target()].id,
            key: edge.weight().key.as_deref(),
            attributes: &edge.weight().attributes,
        })
    }

    fn ensure_node(&mut self, id: String) -> NodeIndex {
        match self.index.get(&id) {
            Some(&idx) => idx,
            None => self.add_node(id, Attributes::new()),
        }
    }

    fn has_edge_between(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.graph.contains_edge(source, target)
            || (!self.directed && self.graph.contains_edge(target, source))
    }
}
