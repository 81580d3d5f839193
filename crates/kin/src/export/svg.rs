//! SVG rendering for family-tree layouts.

use log::debug;
use svg::{
    Document,
    node::element::{Definitions, Group, Marker, Path, Rectangle, Text},
};

use kin_core::{identifier::PersonId, style::Palette};

use crate::{
    export::{Error, Exporter},
    layout::TreeLayout,
    store::Dataset,
};

/// SVG exporter drawing the tree as filled boxes on a level grid.
pub struct Svg {
    palette: Palette,
    node_width: f32,
    node_height: f32,
    h_spacing: f32,
    v_spacing: f32,
    margin: f32,
}

impl Default for Svg {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            node_width: 150.0,
            node_height: 48.0,
            h_spacing: 180.0,
            v_spacing: 110.0,
            margin: 40.0,
        }
    }
}

impl Svg {
    /// Creates an SVG exporter with default sizing and palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the invitation palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the center-to-center spacing between order columns and levels.
    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.h_spacing = horizontal;
        self.v_spacing = vertical;
        self
    }

    /// Center point of the box for a given layout cell.
    fn cell_center(&self, level: u32, order: u32) -> (f32, f32) {
        let x = order as f32 * self.h_spacing + self.node_width / 2.0;
        let y = level as f32 * self.v_spacing + self.node_height / 2.0;
        (x, y)
    }

    /// Create an orthogonal path data string from two points.
    /// Goes vertical first so edges leave a parent's bottom edge and enter
    /// the child's top edge.
    fn orthogonal_path_data(start: (f32, f32), end: (f32, f32)) -> String {
        let (sx, sy) = start;
        let (ex, ey) = end;

        if (sx - ex).abs() < f32::EPSILON {
            return format!("M {sx} {sy} L {ex} {ey}");
        }

        let mid_y = sy + (ey - sy) * 0.5;
        format!("M {sx} {sy} L {sx} {mid_y} L {ex} {mid_y} L {ex} {ey}")
    }

    /// Arrowhead marker definition shared by every edge.
    fn marker_definitions() -> Definitions {
        let arrowhead = Marker::new()
            .set("id", "arrowhead")
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", "#444444"),
            );

        Definitions::new().add(arrowhead)
    }

    fn render_person_box(
        &self,
        dataset: &Dataset,
        id: PersonId,
        level: u32,
        order: u32,
    ) -> Option<Group> {
        let person = dataset.person(id)?;
        let (cx, cy) = self.cell_center(level, order);

        let fill = self.palette.fill_for(person);
        let rect = Rectangle::new()
            .set("x", cx - self.node_width / 2.0)
            .set("y", cy - self.node_height / 2.0)
            .set("width", self.node_width)
            .set("height", self.node_height)
            .set("rx", 6.0)
            .set("fill", &fill)
            .set("stroke", "#444444");

        let mut group = Group::new().add(rect);

        let name_y = if person.side.is_some() { cy - 4.0 } else { cy };
        let name = Text::new(person.name.clone())
            .set("x", cx)
            .set("y", name_y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", "Arial")
            .set("font-size", 13);
        group = group.add(name);

        if let Some(side) = &person.side {
            let tag = Text::new(format!("({side})"))
                .set("x", cx)
                .set("y", cy + 13.0)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-family", "Arial")
                .set("font-size", 10)
                .set("fill", "#555555");
            group = group.add(tag);
        }

        Some(group)
    }
}

impl Exporter for Svg {
    fn export_tree(&self, dataset: &Dataset, layout: &TreeLayout) -> Result<String, Error> {
        // Content extent from the occupied grid cells
        let columns = layout.max_order().map_or(0, |order| order + 1);
        let rows = layout.max_level().map_or(0, |level| level + 1);

        let content_width = if columns == 0 {
            0.0
        } else {
            (columns - 1) as f32 * self.h_spacing + self.node_width
        };
        let content_height = if rows == 0 {
            0.0
        } else {
            (rows - 1) as f32 * self.v_spacing + self.node_height
        };

        let width = content_width + self.margin * 2.0;
        let height = content_height + self.margin * 2.0;
        debug!("Final SVG dimensions: {width}x{height}");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .add(Self::marker_definitions());

        let mut main_group = Group::new();

        // Edges first so boxes draw over them
        for (parent, child) in layout.edges() {
            let (Some(from), Some(to)) = (layout.placement(*parent), layout.placement(*child))
            else {
                return Err(Error::Render(format!(
                    "edge endpoint missing from layout: {parent} -> {child}"
                )));
            };

            let (fx, fy) = self.cell_center(from.level, from.order);
            let (tx, ty) = self.cell_center(to.level, to.order);
            let start = (fx, fy + self.node_height / 2.0);
            let end = (tx, ty - self.node_height / 2.0);

            let path = Path::new()
                .set("d", Self::orthogonal_path_data(start, end))
                .set("fill", "none")
                .set("stroke", "#444444")
                .set("stroke-width", 1.5)
                .set("marker-end", "url(#arrowhead)");
            main_group = main_group.add(path);
        }

        for (id, placement) in layout.placements() {
            let Some(group) = self.render_person_box(dataset, id, placement.level, placement.order)
            else {
                return Err(Error::Render(format!("person missing from dataset: {id}")));
            };
            main_group = main_group.add(group);
        }

        // Apply a translation to account for the margins
        let transform_group = Group::new()
            .set("transform", format!("translate({}, {})", self.margin, self.margin))
            .add(main_group);

        Ok(doc.add(transform_group).to_string())
    }
}
