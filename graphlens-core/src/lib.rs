pub mod encoding;
pub mod html;
pub mod model;
pub mod translate;

pub use encoding::{SizeScale, TooltipSpec, assign_group_colors};
pub use html::{HtmlOptions, render_html, save_html};
pub use model::{AttrValue, AttributedGraph, Attributes};
pub use translate::{EdgeElement, Element, NodeElement, elements_to_json, translate};
