use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::{Group, Line, Rectangle, Title};

use gangnest::entities::SheetSession;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    /// Device pixels per inch of the rendering
    #[serde(default = "default_ppi")]
    pub ppi: f32,
    /// Draws a one-inch grid over the sheet
    #[serde(default)]
    pub show_grid: bool,
    /// Shades the edge reservations of roll media
    #[serde(default = "default_true")]
    pub show_edge_spacing: bool,
}

fn default_ppi() -> f32 {
    20.0
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            ppi: default_ppi(),
            show_grid: false,
            show_edge_spacing: true,
        }
    }
}

/// Renders the session's layout to an SVG document. This is the only place
/// where inches are converted to device pixels.
pub fn session_to_svg(session: &SheetSession, options: SvgDrawOptions) -> Document {
    let ppi = options.ppi;
    let sheet = &session.config;
    let (width, height) = (sheet.width * ppi, session.length * ppi);

    let mut document = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0.0, 0.0, width, height));

    // sheet canvas
    document = document.add(
        Rectangle::new()
            .set("x", 0.0)
            .set("y", 0.0)
            .set("width", width)
            .set("height", height)
            .set("fill", "white")
            .set("stroke", "black")
            .set("stroke-width", 2.0),
    );

    if sheet.is_roll_media && options.show_edge_spacing {
        let edge_h = sheet.edge_spacing.horizontal * ppi;
        let edge_v = sheet.edge_spacing.vertical * ppi;
        let bands = [
            (0.0, 0.0, edge_h, height),
            (width - edge_h, 0.0, edge_h, height),
            (0.0, 0.0, width, edge_v),
            (0.0, height - edge_v, width, edge_v),
        ];
        let mut edge_group = Group::new().set("id", "edge_spacing");
        for (x, y, w, h) in bands {
            edge_group = edge_group.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", w)
                    .set("height", h)
                    .set("fill", "#FF8C00")
                    .set("fill-opacity", 0.2),
            );
        }
        document = document.add(edge_group);
    }

    if options.show_grid {
        let mut grid_group = Group::new().set("id", "grid");
        let mut x = ppi;
        while x < width {
            grid_group = grid_group.add(grid_line(x, 0.0, x, height));
            x += ppi;
        }
        let mut y = ppi;
        while y < height {
            grid_group = grid_group.add(grid_line(0.0, y, width, y));
            y += ppi;
        }
        document = document.add(grid_group);
    }

    let mut items_group = Group::new().set("id", "items");
    for pi in session.placed_items.values() {
        let (x, y) = (pi.x * ppi, pi.y * ppi);
        let (w, h) = (pi.width * ppi, pi.height * ppi);

        let mut item = Group::new()
            .add(Title::new(format!(
                "artwork {}, {:.2}\" x {:.2}\"{}",
                pi.unit.artwork.id,
                pi.unit.width,
                pi.unit.height,
                if pi.rotated { ", rotated" } else { "" }
            )))
            .add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", w)
                    .set("height", h)
                    .set("fill", "#8FBC8F")
                    .set("fill-opacity", 0.8)
                    .set("stroke", "black")
                    .set("stroke-width", 1.0),
            );

        if pi.rotated {
            // diagonal marks the rotated orientation
            item = item.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", y)
                    .set("x2", x + w)
                    .set("y2", y + h)
                    .set("stroke", "black")
                    .set("stroke-width", 0.5),
            );
        }
        items_group = items_group.add(item);
    }

    document.add(items_group)
}

fn grid_line(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "gray")
        .set("stroke-width", 0.5)
        .set("stroke-opacity", 0.5)
}
