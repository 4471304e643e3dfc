// Self-contained HTML visualization page

use crate::encoding::{FALLBACK_COLOR, SizeScale, TooltipSpec, assign_group_colors};
use crate::translate::{Element, elements_to_json};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HTML_TEMPLATE: &str = include_str!("../templates/visualization.html");

pub const DEFAULT_TITLE: &str = "Cytoscape.js Graph (COSE Layout - Enhanced)";
pub const DEFAULT_OUTPUT_FILE: &str = "output_visualization.html";

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub title: String,
    pub tooltip: TooltipSpec,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tooltip: TooltipSpec::default(),
        }
    }
}

/// Render the page: elements, group colors, size scale and per-node tooltip
/// rows are embedded as JS literals; layout and styling are left to Cytoscape.js.
pub fn render_html(elements: &[Element], options: &HtmlOptions) -> serde_json::Result<String> {
    let elements_json = script_safe(&elements_to_json(elements, true)?);
    let group_colors = to_script_json(&assign_group_colors(elements))?;
    let size_scale = to_script_json(&SizeScale::from_elements(elements))?;
    let tooltips = to_script_json(&tooltip_rows(elements, &options.tooltip))?;
    let title = escape_html(&options.title);

    Ok(fill_template(
        HTML_TEMPLATE,
        &[
            ("title", title.as_str()),
            ("elements", elements_json.as_str()),
            ("group_colors", group_colors.as_str()),
            ("size_scale", size_scale.as_str()),
            ("tooltips", tooltips.as_str()),
            ("fallback_color", FALLBACK_COLOR),
        ],
    ))
}

pub fn save_html(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Tooltip rows keyed by node id, `[title, value]` pairs in field order.
fn tooltip_rows(
    elements: &[Element],
    spec: &TooltipSpec,
) -> IndexMap<String, Vec<(String, String)>> {
    elements
        .iter()
        .filter(|element| element.as_node().is_some())
        .map(|element| (element.id().to_string(), spec.rows(element)))
        .collect()
}

fn to_script_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value).map(|json| script_safe(&json))
}

/// Keep embedded JSON from closing the surrounding `<script>` block.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Single-pass `{{name}}` substitution, so substituted values are never
/// rescanned for placeholders. Unknown placeholders are left as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let replacement = after.find("}}").and_then(|end| {
            values
                .iter()
                .find(|(name, _)| *name == &after[..end])
                .map(|(_, value)| (end, *value))
        });

        match replacement {
            Some((end, value)) => {
                output.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
