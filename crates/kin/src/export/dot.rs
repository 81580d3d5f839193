//! Graphviz DOT output for family-tree layouts.
//!
//! Emits a `digraph` with top-to-bottom rank direction, one filled node
//! per person, one edge per relationship, and a `rank=same` subgraph per
//! layout level so generations stay aligned.

use kin_core::style::Palette;

use crate::{
    export::{Error, Exporter},
    layout::TreeLayout,
    store::Dataset,
};

/// Escapes a string for use inside a double-quoted DOT value.
/// Newlines become the `\n` line-break escape Graphviz expects in labels.
fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// DOT exporter for Graphviz consumers.
#[derive(Default)]
pub struct Dot {
    palette: Palette,
}

impl Dot {
    /// Creates a DOT exporter with the default palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the invitation palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

impl Exporter for Dot {
    fn export_tree(&self, dataset: &Dataset, layout: &TreeLayout) -> Result<String, Error> {
        let mut out = String::new();
        out.push_str("digraph FamilyTree {\n");
        out.push_str("  rankdir=TB;\n");
        out.push_str("  fontsize=10;\n");

        for (id, _) in layout.placements() {
            let Some(person) = dataset.person(id) else {
                return Err(Error::Render(format!("person missing from dataset: {id}")));
            };

            let fill = self.palette.fill_for(person);
            out.push_str(&format!(
                "  {} [label=\"{}\", style=filled, fillcolor=\"{}\", fontsize=9];\n",
                id,
                escape(&person.display_label()),
                fill
            ));
        }

        for (parent, child) in layout.edges() {
            out.push_str(&format!("  {parent} -> {child};\n"));
        }

        // Rank by levels to keep generations aligned
        for (_, ids) in layout.by_level() {
            out.push_str("  { rank=same;");
            for id in ids {
                out.push_str(&format!(" {id};"));
            }
            out.push_str(" }\n");
        }

        out.push_str("}\n");
        Ok(out)
    }
}
