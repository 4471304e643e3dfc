use crate::error::{GexfError, Result};
use graphlens_core::model::{AttrValue, AttributedGraph, Attributes};
use roxmltree::{Document, Node};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Declared type of a GEXF attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrKind {
    Integer,
    Float,
    Boolean,
    String,
}

impl AttrKind {
    fn from_gexf(kind: Option<&str>) -> Self {
        match kind.map(str::to_ascii_lowercase).as_deref() {
            Some("integer") | Some("long") => AttrKind::Integer,
            Some("float") | Some("double") => AttrKind::Float,
            Some("boolean") => AttrKind::Boolean,
            _ => AttrKind::String,
        }
    }

    /// Convert a raw XML value; anything that fails to convert stays a string.
    fn convert(self, raw: &str) -> AttrValue {
        let trimmed = raw.trim();
        let converted = match self {
            AttrKind::Integer => trimmed.parse::<i64>().ok().map(AttrValue::Integer),
            AttrKind::Float => trimmed.parse::<f64>().ok().map(AttrValue::Float),
            AttrKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" => Some(AttrValue::Boolean(true)),
                "false" | "0" => Some(AttrValue::Boolean(false)),
                _ => None,
            },
            AttrKind::String => None,
        };
        converted.unwrap_or_else(|| AttrValue::String(raw.to_string()))
    }
}

#[derive(Debug, Clone)]
struct AttrDecl {
    id: String,
    title: String,
    kind: AttrKind,
    default: Option<AttrValue>,
}

/// Attribute columns declared for one element class (node or edge).
#[derive(Debug, Default)]
struct AttrTable {
    decls: Vec<AttrDecl>,
}

impl AttrTable {
    fn declare(&mut self, element: Node<'_, '_>) -> Result<()> {
        let id = element
            .attribute("id")
            .ok_or_else(|| invalid(element, "<attribute> without id"))?
            .to_string();
        let title = element.attribute("title").unwrap_or(&id).to_string();
        let kind = AttrKind::from_gexf(element.attribute("type"));
        let default = child(element, "default")
            .and_then(|d| d.text())
            .map(|text| kind.convert(text));

        self.decls.push(AttrDecl {
            id,
            title,
            kind,
            default,
        });
        Ok(())
    }

    /// Read `<attvalues>` of an element, then fill declared defaults.
    fn decode(&self, element: Node<'_, '_>) -> Attributes {
        let mut attributes = Attributes::new();

        if let Some(attvalues) = child(element, "attvalues") {
            for attvalue in children(attvalues, "attvalue") {
                // GEXF 1.0 used `id` where later versions use `for`
                let Some(key) = attvalue.attribute("for").or_else(|| attvalue.attribute("id"))
                else {
                    continue;
                };
                let raw = attvalue.attribute("value").unwrap_or_default();

                match self.decls.iter().find(|d| d.id == key) {
                    Some(decl) => {
                        attributes.insert(decl.title.clone(), decl.kind.convert(raw));
                    }
                    None => {
                        attributes.insert(key.to_string(), AttrValue::String(raw.to_string()));
                    }
                }
            }
        }

        for decl in &self.decls {
            if let Some(default) = &decl.default {
                if !attributes.contains_key(&decl.title) {
                    attributes.insert(decl.title.clone(), default.clone());
                }
            }
        }

        attributes
    }
}

/// Read and parse a GEXF file.
pub fn read_gexf(path: &Path) -> Result<AttributedGraph> {
    if !path.exists() {
        return Err(GexfError::NotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    let graph = parse_gexf(&text)?;

    info!(
        "Loaded {} ({} nodes, {} edges)",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Parse a GEXF document. Nodes and edges keep document order.
pub fn parse_gexf(text: &str) -> Result<AttributedGraph> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "gexf" {
        return Err(GexfError::InvalidDocument(format!(
            "expected <gexf> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let graph_element = child(root, "graph")
        .ok_or_else(|| GexfError::InvalidDocument("missing <graph> element".to_string()))?;
    // GEXF defaults to undirected when the attribute is absent
    let directed = graph_element.attribute("defaultedgetype") == Some("directed");

    let mut node_table = AttrTable::default();
    let mut edge_table = AttrTable::default();
    for attributes in children(graph_element, "attributes") {
        let table = match attributes.attribute("class") {
            Some("node") => &mut node_table,
            Some("edge") => &mut edge_table,
            other => {
                debug!("Skipping attribute declarations for class {:?}", other);
                continue;
            }
        };
        for decl in children(attributes, "attribute") {
            table.declare(decl)?;
        }
    }

    let mut graph = AttributedGraph::new().with_directed(directed);

    if let Some(nodes) = child(graph_element, "nodes") {
        for node in children(nodes, "node") {
            let id = node
                .attribute("id")
                .ok_or_else(|| invalid(node, "<node> without id"))?;
            let mut attributes = node_table.decode(node);
            if let Some(label) = node.attribute("label") {
                attributes.insert("label".to_string(), AttrValue::from(label));
            }
            if let Some(viz) = decode_viz(node) {
                attributes.insert("viz".to_string(), AttrValue::Opaque(viz));
            }
            graph.add_node(id, attributes);
        }
    }

    if let Some(edges) = child(graph_element, "edges") {
        for edge in children(edges, "edge") {
            let source = edge
                .attribute("source")
                .ok_or_else(|| invalid(edge, "<edge> without source"))?;
            let target = edge
                .attribute("target")
                .ok_or_else(|| invalid(edge, "<edge> without target"))?;

            let mutual = match (edge.attribute("type"), directed) {
                (Some("undirected"), true) => {
                    return Err(invalid(edge, "undirected edge in a directed graph"));
                }
                (Some("directed"), false) => {
                    return Err(invalid(edge, "directed edge in an undirected graph"));
                }
                (edge_type, _) => edge_type == Some("mutual"),
            };

            let mut attributes = edge_table.decode(edge);
            let key = edge.attribute("id").map(str::to_string);
            if let Some(id) = &key {
                attributes.insert("id".to_string(), AttrValue::from(id.as_str()));
            }
            if let Some(weight) = edge.attribute("weight") {
                attributes.insert("weight".to_string(), AttrKind::Float.convert(weight));
            }
            if let Some(label) = edge.attribute("label") {
                attributes.insert("label".to_string(), AttrValue::from(label));
            }
            if let Some(viz) = decode_viz(edge) {
                attributes.insert("viz".to_string(), AttrValue::Opaque(viz));
            }

            // A mutual edge also runs target -> source with the same key and
            // data. Undirected, a keyed reverse is the same edge.
            let reverse = (mutual && (directed || key.is_none()))
                .then(|| (key.clone(), attributes.clone()));
            graph.add_edge(source, target, key, attributes);
            if let Some((key, attributes)) = reverse {
                graph.add_edge(target, source, key, attributes);
            }
        }
    }

    debug!(
        "Parsed GEXF graph: directed={}, multigraph={}",
        graph.is_directed(),
        graph.is_multigraph()
    );
    Ok(graph)
}

/// Collect `viz:` visual hints (color, size, thickness, shape, position) into
/// one JSON object, or `None` when the element has none.
fn decode_viz(element: Node<'_, '_>) -> Option<Value> {
    let mut viz = Map::new();

    for hint in element.children().filter(|c| is_viz(*c)) {
        match hint.tag_name().name() {
            "color" => {
                let mut color = Map::new();
                for channel in ["r", "g", "b"] {
                    color.insert(channel.to_string(), json!(parse_attr::<i64>(hint, channel)));
                }
                if let Some(alpha) = parse_attr::<f64>(hint, "a") {
                    color.insert("a".to_string(), json!(alpha));
                }
                viz.insert("color".to_string(), Value::Object(color));
            }
            name @ ("size" | "thickness") => {
                if let Some(value) = parse_attr::<f64>(hint, "value") {
                    viz.insert(name.to_string(), json!(value));
                }
            }
            "shape" => {
                if let Some(value) = hint.attribute("value") {
                    viz.insert("shape".to_string(), json!(value));
                }
            }
            "position" => {
                let mut position = Map::new();
                for axis in ["x", "y", "z"] {
                    let value = parse_attr::<f64>(hint, axis).unwrap_or(0.0);
                    position.insert(axis.to_string(), json!(value));
                }
                viz.insert("position".to_string(), Value::Object(position));
            }
            other => debug!("Skipping unsupported viz element <{}>", other),
        }
    }

    (!viz.is_empty()).then_some(Value::Object(viz))
}

fn parse_attr<T: FromStr>(node: Node<'_, '_>, name: &str) -> Option<T> {
    node.attribute(name).and_then(|v| v.trim().parse().ok())
}

fn is_viz(node: Node<'_, '_>) -> bool {
    node.is_element()
        && node
            .tag_name()
            .namespace()
            .is_some_and(|ns| ns.trim_end_matches('/').ends_with("viz"))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |c| c.is_element() && c.tag_name().name() == name)
}

fn invalid(node: Node<'_, '_>, message: &str) -> GexfError {
    let position = node.document().text_pos_at(node.range().start);
    GexfError::InvalidDocument(format!("{} at {}", message, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_kind_from_gexf() {
        assert_eq!(AttrKind::from_gexf(Some("integer")), AttrKind::Integer);
        assert_eq!(AttrKind::from_gexf(Some("LONG")), AttrKind::Integer);
        assert_eq!(AttrKind::from_gexf(Some("double")), AttrKind::Float);
        assert_eq!(AttrKind::from_gexf(Some("boolean")), AttrKind::Boolean);
        assert_eq!(AttrKind::from_gexf(Some("liststring")), AttrKind::String);
        assert_eq!(AttrKind::from_gexf(None), AttrKind::String);
    }

    #[test]
    fn test_attr_kind_convert() {
        assert_eq!(AttrKind::Integer.convert(" 7 "), AttrValue::Integer(7));
        assert_eq!(AttrKind::Float.convert("0.5"), AttrValue::Float(0.5));
        assert_eq!(AttrKind::Boolean.convert("True"), AttrValue::Boolean(true));
        assert_eq!(AttrKind::Boolean.convert("0"), AttrValue::Boolean(false));
        assert_eq!(AttrKind::String.convert("42"), AttrValue::from("42"));
    }

    #[test]
    fn test_failed_conversion_keeps_string() {
        assert_eq!(AttrKind::Float.convert("abc"), AttrValue::from("abc"));
        assert_eq!(AttrKind::Integer.convert("1.5"), AttrValue::from("1.5"));
    }
}
