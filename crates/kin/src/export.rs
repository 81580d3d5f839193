//! Renderer adapters consuming the layout engine's output.
//!
//! The core's contract with a renderer is exactly the pair the layout
//! engine produces: the dataset (for labels and styling) and the computed
//! [`TreeLayout`] (for positions and edges). Everything downstream of
//! that pair is a sink.

pub mod dot;
pub mod guests;
pub mod svg;

use crate::{layout::TreeLayout, store::Dataset};

/// A sink that turns a dataset and its layout into a renderable document.
pub trait Exporter {
    fn export_tree(&self, dataset: &Dataset, layout: &TreeLayout) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
