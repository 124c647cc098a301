use serde::{Deserialize, Serialize};

use crate::entities::SheetSession;
use crate::error::NestError;
use crate::geometry::Rect;
use crate::util::round2;

/// Page description handed to downstream rendering (PDF generation,
/// previews). All coordinates in inches, relative to the exported page's
/// top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescription {
    pub width: f32,
    pub length: f32,
    pub items: Vec<PageItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageItem {
    /// Artwork id; payload resolution is the renderer's concern
    pub image_ref: u64,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotated: bool,
}

/// Builds the page description for the current layout.
///
/// Roll media is cropped vertically to the bounding box of the placed
/// content plus the vertical edge reservation on both sides, so trailing
/// dead space of an auto-computed canvas is never exported. Fixed sheets
/// export the full configured canvas.
pub fn export_layout(session: &SheetSession) -> Result<PageDescription, NestError> {
    if session.queue.is_empty() || session.placed_items.is_empty() {
        return Err(NestError::EmptyExport);
    }

    let sheet = &session.config;

    let y_offset = match sheet.is_roll_media {
        true => {
            let bbox = session
                .placed_items
                .values()
                .map(|pi| pi.rect())
                .reduce(Rect::bounding_rect)
                .expect("placed items are non-empty");
            f32::max(0.0, bbox.y_min - sheet.edge_spacing.vertical)
        }
        false => 0.0,
    };

    let length = match sheet.is_roll_media {
        true => {
            let max_bottom = session
                .placed_items
                .values()
                .map(|pi| pi.bottom())
                .fold(0.0, f32::max);
            round2(max_bottom + sheet.edge_spacing.vertical - y_offset)
        }
        false => session.length,
    };

    let items = session
        .placed_items
        .values()
        .map(|pi| PageItem {
            image_ref: pi.unit.artwork.id,
            x: pi.x,
            y: pi.y - y_offset,
            width: pi.width,
            height: pi.height,
            rotated: pi.rotated,
        })
        .collect();

    Ok(PageDescription {
        width: sheet.width,
        length,
        items,
    })
}
