//! Visual encoding derived from translated elements: categorical colors for
//! node groups, a linear size scale over pagerank, and the fields shown in the
//! hover/click info panel.

use crate::translate::Element;
use indexmap::IndexMap;
use serde::Serialize;

/// Categorical palette, cycled when there are more groups than colors.
pub const PALETTE: [&str; 15] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999", "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f",
];

/// Color for any group missing from the color map.
pub const FALLBACK_COLOR: &str = "#808080";

pub const MIN_NODE_SIZE: f64 = 15.0;
pub const MAX_NODE_SIZE: f64 = 70.0;

/// Map each distinct `node_group_for_color` to a palette color, in the order
/// groups are first seen among the node elements.
pub fn assign_group_colors(elements: &[Element]) -> IndexMap<String, &'static str> {
    let mut colors = IndexMap::new();
    for node in elements.iter().filter_map(Element::as_node) {
        if !colors.contains_key(&node.node_group_for_color) {
            let color = PALETTE[colors.len() % PALETTE.len()];
            colors.insert(node.node_group_for_color.clone(), color);
        }
    }
    colors
}

/// Linear mapping from pagerank to a node diameter in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeScale {
    pub min_value: f64,
    pub max_value: f64,
    pub min_size: f64,
    pub max_size: f64,
}

impl SizeScale {
    /// Domain spans the observed pagerank range. With no nodes, or when every
    /// node has the same value, the domain falls back to 0..1.
    pub fn from_elements(elements: &[Element]) -> Self {
        let (min_value, max_value) = elements
            .iter()
            .filter_map(Element::as_node)
            .map(|node| node.pagerank_for_size)
            .fold(None, |range: Option<(f64, f64)>, value| match range {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
            .filter(|(lo, hi)| lo != hi)
            .unwrap_or((0.0, 1.0));

        Self {
            min_value,
            max_value,
            min_size: MIN_NODE_SIZE,
            max_size: MAX_NODE_SIZE,
        }
    }
}

/// One row of the node info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipField {
    pub property: String,
    pub title: String,
}

/// Ordered set of node properties shown on hover/click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipSpec {
    pub fields: Vec<TooltipField>,
}

impl Default for TooltipSpec {
    fn default() -> Self {
        Self::new(&[
            ("name", "Name"),
            ("description", "Description"),
            ("labels", "Labels"),
        ])
    }
}

impl TooltipSpec {
    pub fn new(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(property, title)| TooltipField {
                    property: property.to_string(),
                    title: title.to_string(),
                })
                .collect(),
        }
    }

    /// `(title, value)` rows for the properties present on `element`.
    /// Edges have no info panel.
    pub fn rows(&self, element: &Element) -> Vec<(String, String)> {
        let Some(node) = element.as_node() else {
            return Vec::new();
        };

        self.fields
            .iter()
            .filter_map(|field| {
                node.field(&field.property)
                    .map(|value| (field.title.clone(), value))
            })
            .collect()
    }
}
