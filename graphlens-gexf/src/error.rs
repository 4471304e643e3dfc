use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GexfError {
    #[error("GEXF file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] roxmltree::Error),

    #[error("Invalid GEXF document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, GexfError>;
