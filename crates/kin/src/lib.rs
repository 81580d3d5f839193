//! Kin - guest lists and layered family-tree diagrams.
//!
//! Kin manages a small relational dataset of people and parent-child
//! relationships, keeps it referentially intact under CRUD mutation, and
//! renders it as a guest list or a layered tree diagram. The pipeline is
//! dataset -> adjacency -> layout -> render, recomputed in full after
//! every mutation; no incremental state is kept anywhere.

pub mod config;
pub mod export;
pub mod graph;
pub mod io;
pub mod layout;
pub mod store;

mod error;

pub use kin_core::{color, identifier, person, style};

pub use error::KinError;
pub use store::Dataset;

use log::info;

use config::AppConfig;
use export::Exporter;

/// Facade for loading, laying out, and rendering family-tree datasets.
///
/// # Examples
///
/// ```
/// use kin::{Dataset, TreeBuilder, person::PersonDraft};
///
/// let mut dataset = Dataset::new();
/// let ada = dataset.add_person(PersonDraft::new("Ada")).unwrap();
/// let bea = dataset.add_person(PersonDraft::new("Bea")).unwrap();
/// dataset.add_relationship(ada, bea).unwrap();
///
/// let builder = TreeBuilder::default();
/// let svg = builder.render_svg(&dataset).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct TreeBuilder {
    config: AppConfig,
}

impl TreeBuilder {
    /// Creates a new tree builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parses a JSON dataset.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::Import`] for malformed text or invariant
    /// violations; the caller's current dataset (if any) is untouched.
    pub fn load_json(&self, text: &str) -> Result<Dataset, KinError> {
        info!("Importing dataset");
        let dataset = io::from_json(text)?;
        info!(
            people = dataset.len(),
            relationships = dataset.relationships().len();
            "Dataset imported"
        );
        Ok(dataset)
    }

    /// Serializes a dataset to pretty-printed JSON.
    pub fn save_json(&self, dataset: &Dataset) -> Result<String, KinError> {
        io::to_json(dataset)
    }

    /// Computes the layered layout for a dataset.
    pub fn layout(&self, dataset: &Dataset) -> layout::TreeLayout {
        layout::Engine::new().calculate(dataset)
    }

    /// Renders a dataset to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::Export`] if a configured style color is
    /// invalid or rendering fails.
    pub fn render_svg(&self, dataset: &Dataset) -> Result<String, KinError> {
        info!("Calculating layout");
        let tree_layout = self.layout(dataset);

        info!("Exporting tree to SVG");
        let exporter = export::svg::Svg::new()
            .with_palette(self.palette()?)
            .with_spacing(
                self.config.layout().horizontal_spacing(),
                self.config.layout().vertical_spacing(),
            );

        Ok(exporter.export_tree(dataset, &tree_layout)?)
    }

    /// Renders a dataset to Graphviz DOT text.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::Export`] if a configured style color is
    /// invalid or rendering fails.
    pub fn render_dot(&self, dataset: &Dataset) -> Result<String, KinError> {
        info!("Calculating layout");
        let tree_layout = self.layout(dataset);

        info!("Exporting tree to DOT");
        let exporter = export::dot::Dot::new().with_palette(self.palette()?);

        Ok(exporter.export_tree(dataset, &tree_layout)?)
    }

    /// Renders the guest list as CSV text, optionally invited-only.
    pub fn guest_list_csv(
        &self,
        dataset: &Dataset,
        invited_only: bool,
    ) -> Result<String, KinError> {
        Ok(export::guests::guest_list_csv(dataset, invited_only)?)
    }

    fn palette(&self) -> Result<kin_core::style::Palette, KinError> {
        self.config
            .style()
            .palette()
            .map_err(|msg| export::Error::Render(msg).into())
    }
}
