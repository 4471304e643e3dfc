pub mod error;
pub mod reader;

pub use error::{GexfError, Result};
pub use reader::{parse_gexf, read_gexf};
