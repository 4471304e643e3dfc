//! Graph → Cytoscape.js element translation.
//!
//! Every derived field is resolved from an ordered list of attribute sources,
//! first present wins, ending in a literal default. Original attributes are
//! passed through under their own keys unless the key is reserved.

use crate::model::{AttrValue, AttributedGraph, Attributes, EdgeView, NodeData, lookup};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

/// Field names a node element derives itself.
pub const RESERVED_NODE_KEYS: [&str; 5] = [
    "id",
    "label_for_display",
    "node_group_for_color",
    "pagerank_for_size",
    "description_for_hover",
];

/// Field names an edge element derives itself.
pub const RESERVED_EDGE_KEYS: [&str; 3] = ["id", "source", "target"];

pub const DEFAULT_LABEL_ATTRIBUTE: &str = "name";
pub const DEFAULT_PAGERANK: f64 = 0.0001;
/// Sizes are scaled from pagerank, so it must stay strictly positive.
pub const MIN_PAGERANK: f64 = 0.00001;
pub const UNKNOWN_GROUP: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available.";

const LABEL_KEY: &str = "label";
const GROUP_KEY: &str = "labels";
const PAGERANK_KEY: &str = "pagerank";
const DESCRIPTION_KEY: &str = "description";

#[derive(Debug, Clone, PartialEq)]
pub struct NodeElement {
    pub id: String,
    pub label_for_display: String,
    pub node_group_for_color: String,
    pub pagerank_for_size: f64,
    pub description_for_hover: String,
    passthrough: Attributes,
}

impl NodeElement {
    /// Original attributes carried through, reserved keys excluded.
    pub fn passthrough(&self) -> &Attributes {
        &self.passthrough
    }

    /// String view of any field in the element's data mapping.
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.clone()),
            "label_for_display" => Some(self.label_for_display.clone()),
            "node_group_for_color" => Some(self.node_group_for_color.clone()),
            "pagerank_for_size" => Some(self.pagerank_for_size.to_string()),
            "description_for_hover" => Some(self.description_for_hover.clone()),
            other => lookup(&self.passthrough, other).map(ToString::to_string),
        }
    }
}

impl Serialize for NodeElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5 + self.passthrough.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("label_for_display", &self.label_for_display)?;
        map.serialize_entry("node_group_for_color", &self.node_group_for_color)?;
        map.serialize_entry("pagerank_for_size", &self.pagerank_for_size)?;
        map.serialize_entry("description_for_hover", &self.description_for_hover)?;
        for (key, value) in &self.passthrough {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeElement {
    pub id: String,
    pub source: String,
    pub target: String,
    passthrough: Attributes,
}

impl EdgeElement {
    pub fn passthrough(&self) -> &Attributes {
        &self.passthrough
    }
}

impl Serialize for EdgeElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.passthrough.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("source", &self.source)?;
        map.serialize_entry("target", &self.target)?;
        for (key, value) in &self.passthrough {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One Cytoscape.js element: `{ "data": {...}, "group": "nodes" | "edges" }`.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Node(NodeElement),
    Edge(EdgeElement),
}

impl Element {
    pub fn group(&self) -> &'static str {
        match self {
            Element::Node(_) => "nodes",
            Element::Edge(_) => "edges",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Element::Node(node) => &node.id,
            Element::Edge(edge) => &edge.id,
        }
    }

    pub fn as_node(&self) -> Option<&NodeElement> {
        match self {
            Element::Node(node) => Some(node),
            Element::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeElement> {
        match self {
            Element::Edge(edge) => Some(edge),
            Element::Node(_) => None,
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Element", 2)?;
        match self {
            Element::Node(node) => state.serialize_field("data", node)?,
            Element::Edge(edge) => state.serialize_field("data", edge)?,
        }
        state.serialize_field("group", self.group())?;
        state.end()
    }
}

/// Translate a graph into Cytoscape.js elements: all nodes, then all edges,
/// each in the graph's iteration order.
pub fn translate(graph: &AttributedGraph, display_label_attribute: &str) -> Vec<Element> {
    let mut elements = Vec::with_capacity(graph.node_count() + graph.edge_count());

    for node in graph.nodes() {
        elements.push(Element::Node(translate_node(node, display_label_attribute)));
    }

    for (index, edge) in graph.edges().enumerate() {
        elements.push(Element::Edge(translate_edge(edge, index)));
    }

    debug!(
        "Translated {} nodes and {} edges (multigraph: {})",
        graph.node_count(),
        graph.edge_count(),
        graph.is_multigraph()
    );

    elements
}

/// Serialize elements as a JSON array, pretty-printed with a 2-space indent.
pub fn elements_to_json(elements: &[Element], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(elements)
    } else {
        serde_json::to_string(elements)
    }
}

fn translate_node(node: &NodeData, display_label_attribute: &str) -> NodeElement {
    let attributes = &node.attributes;
    let id = node.id.clone();

    let label_for_display = first_present(attributes, &[display_label_attribute, LABEL_KEY])
        .unwrap_or_else(|| id.clone());
    let node_group_for_color =
        first_present(attributes, &[GROUP_KEY]).unwrap_or_else(|| UNKNOWN_GROUP.to_string());
    let description_for_hover = first_present(attributes, &[DESCRIPTION_KEY])
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    let pagerank_for_size = pagerank_for_size(&id, attributes);

    NodeElement {
        id,
        label_for_display,
        node_group_for_color,
        pagerank_for_size,
        description_for_hover,
        passthrough: passthrough(attributes, &RESERVED_NODE_KEYS),
    }
}

fn translate_edge(edge: EdgeView<'_>, index: usize) -> EdgeElement {
    let source = edge.source.to_string();
    let target = edge.target.to_string();
    let id = first_present(edge.attributes, &["id"])
        .unwrap_or_else(|| format!("e_{}_{}_{}", source, target, index));

    EdgeElement {
        id,
        source,
        target,
        passthrough: passthrough(edge.attributes, &RESERVED_EDGE_KEYS),
    }
}

/// Stringified value of the first source attribute that is present.
fn first_present(attributes: &Attributes, sources: &[&str]) -> Option<String> {
    sources
        .iter()
        .find_map(|key| lookup(attributes, key))
        .map(AttrValue::to_string)
}

fn pagerank_for_size(node_id: &str, attributes: &Attributes) -> f64 {
    let value = match lookup(attributes, PAGERANK_KEY) {
        None => DEFAULT_PAGERANK,
        Some(raw) => raw.as_f64().unwrap_or_else(|| {
            warn!(
                "Could not convert pagerank {:?} for node {}. Using default.",
                raw.to_string(),
                node_id
            );
            DEFAULT_PAGERANK
        }),
    };
    value.max(MIN_PAGERANK)
}

fn passthrough(attributes: &Attributes, reserved: &[&str]) -> Attributes {
    attributes
        .iter()
        .filter(|(key, _)| !reserved.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
