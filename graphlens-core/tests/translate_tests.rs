// Tests for graph → Cytoscape element translation

use graphlens_core::model::{AttrValue, AttributedGraph, Attributes};
use graphlens_core::translate::{
    DEFAULT_PAGERANK, Element, MIN_PAGERANK, NO_DESCRIPTION, RESERVED_EDGE_KEYS,
    RESERVED_NODE_KEYS, UNKNOWN_GROUP, elements_to_json, translate,
};
use serde_json::json;

fn attrs(pairs: &[(&str, AttrValue)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn single_node(attributes: Attributes) -> AttributedGraph {
    let mut graph = AttributedGraph::new();
    graph.add_node("n1", attributes);
    graph
}

fn data_of(element: &Element) -> serde_json::Value {
    serde_json::to_value(element).unwrap()["data"].clone()
}

// ============================================================================
// Element Count and Ordering Tests
// ============================================================================

#[test]
fn test_output_length_is_nodes_plus_edges() {
    let mut graph = AttributedGraph::new();
    graph.add_node("A", Attributes::new());
    graph.add_node("B", Attributes::new());
    graph.add_node("C", Attributes::new());
    graph.add_edge("A", "B", None, Attributes::new());
    graph.add_edge("A", "B", None, Attributes::new());
    graph.add_edge("B", "C", None, Attributes::new());

    let elements = translate(&graph, "name");

    assert_eq!(elements.len(), graph.node_count() + graph.edge_count());
    assert_eq!(elements.len(), 6);
}

#[test]
fn test_empty_graph_yields_no_elements() {
    let elements = translate(&AttributedGraph::new(), "name");
    assert!(elements.is_empty());
    assert_eq!(elements_to_json(&elements, false).unwrap(), "[]");
}

#[test]
fn test_nodes_precede_edges_in_input_order() {
    let mut graph = AttributedGraph::new();
    graph.add_node("z", Attributes::new());
    graph.add_edge("z", "y", None, Attributes::new());
    graph.add_node("x", Attributes::new());

    let elements = translate(&graph, "name");
    let summary: Vec<(&str, &str)> = elements.iter().map(|e| (e.group(), e.id())).collect();

    assert_eq!(
        summary,
        vec![
            ("nodes", "z"),
            ("nodes", "y"),
            ("nodes", "x"),
            ("edges", "e_z_y_0"),
        ]
    );
}

// ============================================================================
// Node Translation Tests
// ============================================================================

#[test]
fn test_node_full_example() {
    let graph = single_node(attrs(&[
        ("name", "Foo".into()),
        ("pagerank", "0.5".into()),
        ("labels", "Person".into()),
        ("extra", "bar".into()),
    ]));

    let elements = translate(&graph, "name");

    assert_eq!(
        serde_json::to_value(&elements[0]).unwrap(),
        json!({
            "data": {
                "id": "n1",
                "label_for_display": "Foo",
                "node_group_for_color": "Person",
                "pagerank_for_size": 0.5,
                "description_for_hover": "No description available.",
                "name": "Foo",
                "pagerank": "0.5",
                "labels": "Person",
                "extra": "bar"
            },
            "group": "nodes"
        })
    );
}

#[test]
fn test_label_falls_back_to_label_attribute() {
    let graph = single_node(attrs(&[("label", "From label".into())]));
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.label_for_display, "From label");
}

#[test]
fn test_label_prefers_display_attribute_over_label() {
    let graph = single_node(attrs(&[
        ("label", "From label".into()),
        ("title", "From title".into()),
    ]));
    let node = translate(&graph, "title")[0].as_node().cloned().unwrap();
    assert_eq!(node.label_for_display, "From title");
}

#[test]
fn test_label_falls_back_to_node_id() {
    let graph = single_node(Attributes::new());
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.label_for_display, "n1");
}

#[test]
fn test_label_is_stringified() {
    let graph = single_node(attrs(&[("name", 42i64.into())]));
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.label_for_display, "42");
}

#[test]
fn test_missing_labels_is_unknown_group() {
    let graph = single_node(Attributes::new());
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.node_group_for_color, UNKNOWN_GROUP);
    assert_eq!(node.node_group_for_color, "Unknown");
}

#[test]
fn test_null_labels_is_unknown_group() {
    let graph = single_node(attrs(&[("labels", serde_json::Value::Null.into())]));
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.node_group_for_color, UNKNOWN_GROUP);
}

#[test]
fn test_missing_description_default() {
    let graph = single_node(Attributes::new());
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.description_for_hover, NO_DESCRIPTION);
}

#[test]
fn test_description_passthrough() {
    let graph = single_node(attrs(&[("description", "A node".into())]));
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.description_for_hover, "A node");
}

// ============================================================================
// Pagerank Tests
// ============================================================================

#[test]
fn test_missing_pagerank_uses_default() {
    let graph = single_node(Attributes::new());
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.pagerank_for_size, 0.0001);
    assert_eq!(node.pagerank_for_size, DEFAULT_PAGERANK);
}

#[test]
fn test_zero_pagerank_is_floored() {
    let graph = single_node(attrs(&[("pagerank", 0.0f64.into())]));
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.pagerank_for_size, 0.00001);
    assert_eq!(node.pagerank_for_size, MIN_PAGERANK);
}

#[test]
fn test_non_numeric_pagerank_falls_back() {
    let graph = single_node(attrs(&[("pagerank", "abc".into())]));
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.pagerank_for_size, DEFAULT_PAGERANK);
}

#[test]
fn test_numeric_pagerank_types() {
    let graph = single_node(attrs(&[("pagerank", 2i64.into())]));
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.pagerank_for_size, 2.0);

    let graph = single_node(attrs(&[("pagerank", " 0.125 ".into())]));
    let node = translate(&graph, "name")[0].as_node().cloned().unwrap();
    assert_eq!(node.pagerank_for_size, 0.125);
}

// ============================================================================
// Reserved Key Tests
// ============================================================================

#[test]
fn test_node_id_attribute_does_not_clobber_derived_id() {
    let graph = single_node(attrs(&[
        ("id", "impostor".into()),
        ("label_for_display", "impostor".into()),
        ("pagerank_for_size", 99i64.into()),
    ]));

    let elements = translate(&graph, "name");
    let data = data_of(&elements[0]);

    assert_eq!(data["id"], "n1");
    assert_eq!(data["label_for_display"], "n1");
    assert_eq!(data["pagerank_for_size"], 0.0001);
    let node = elements[0].as_node().unwrap();
    for key in RESERVED_NODE_KEYS {
        assert!(!node.passthrough().contains_key(key));
    }
}

#[test]
fn test_edge_reserved_keys_not_clobbered() {
    let mut graph = AttributedGraph::new();
    graph.add_edge(
        "A",
        "B",
        None,
        attrs(&[("source", "X".into()), ("target", "Y".into()), ("weight", 2.5f64.into())]),
    );

    let elements = translate(&graph, "name");
    let edge = elements[2].as_edge().unwrap();

    assert_eq!(edge.source, "A");
    assert_eq!(edge.target, "B");
    for key in RESERVED_EDGE_KEYS {
        assert!(!edge.passthrough().contains_key(key));
    }
    assert_eq!(data_of(&elements[2])["weight"], 2.5);
}

// ============================================================================
// Edge Translation Tests
// ============================================================================

#[test]
fn test_synthesized_edge_id_uses_ordinal_index() {
    let mut graph = AttributedGraph::new();
    graph.add_node("A", Attributes::new());
    graph.add_node("B", Attributes::new());
    graph.add_edge("A", "B", Some("0".to_string()), Attributes::new());
    graph.add_edge("A", "B", Some("1".to_string()), Attributes::new());
    graph.add_edge("A", "B", Some("2".to_string()), Attributes::new());

    let elements = translate(&graph, "name");
    let edge_ids: Vec<&str> = elements
        .iter()
        .filter_map(Element::as_edge)
        .map(|e| e.id.as_str())
        .collect();

    assert!(graph.is_multigraph());
    assert_eq!(edge_ids, vec!["e_A_B_0", "e_A_B_1", "e_A_B_2"]);
}

#[test]
fn test_explicit_edge_id_is_used() {
    let mut graph = AttributedGraph::new();
    graph.add_edge("A", "B", None, attrs(&[("id", "edge-7".into())]));
    graph.add_edge("B", "C", None, Attributes::new());

    let elements = translate(&graph, "name");
    let edges: Vec<&str> = elements
        .iter()
        .filter_map(Element::as_edge)
        .map(|e| e.id.as_str())
        .collect();

    // Index counts every edge, not only the synthesized ones
    assert_eq!(edges, vec!["edge-7", "e_B_C_1"]);
}

#[test]
fn test_edge_serialization_shape() {
    let mut graph = AttributedGraph::new();
    graph.add_edge("A", "B", None, attrs(&[("edge_color", "blue".into())]));

    let elements = translate(&graph, "name");

    assert_eq!(
        serde_json::to_value(&elements[2]).unwrap(),
        json!({
            "data": {"id": "e_A_B_0", "source": "A", "target": "B", "edge_color": "blue"},
            "group": "edges"
        })
    );
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_translation_is_deterministic() {
    let mut graph = AttributedGraph::new();
    for i in 0..20 {
        graph.add_node(
            format!("n{}", i),
            attrs(&[
                ("name", format!("Node {}", i).into()),
                ("pagerank", (i as f64 / 20.0).into()),
                ("labels", if i % 2 == 0 { "Even" } else { "Odd" }.into()),
            ]),
        );
    }
    for i in 0..19 {
        graph.add_edge(format!("n{}", i), format!("n{}", i + 1), None, Attributes::new());
    }

    let first = elements_to_json(&translate(&graph, "name"), true).unwrap();
    let second = elements_to_json(&translate(&graph, "name"), true).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_pretty_json_uses_two_space_indent() {
    let graph = single_node(Attributes::new());
    let json = elements_to_json(&translate(&graph, "name"), true).unwrap();

    assert!(json.starts_with("[\n  {\n    \"data\": {\n      \"id\": \"n1\""));
    assert!(json.contains("\"group\": \"nodes\""));
}
