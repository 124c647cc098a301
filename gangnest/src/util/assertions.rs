//! Assertions on session state, used in `debug_assert!` checks and tests.

use slotmap::SlotMap;

use crate::entities::{PlacedItem, PlacedItemKey, SheetSession};
use crate::geometry::Rect;

/// Slack granted on boundary checks: sheet lengths are rounded to two
/// decimals, so a placed item may poke past a computed limit by less than
/// half a hundredth.
const BOUNDS_TOL: f32 = 0.01;

/// True if no two placed items intersect (shared edges permitted).
pub fn no_overlaps(items: &SlotMap<PlacedItemKey, PlacedItem>) -> bool {
    items.iter().all(|(key, pi)| {
        items
            .iter()
            .filter(|(other_key, _)| *other_key != key)
            .all(|(_, other)| !pi.rect().overlaps(&other.rect()))
    })
}

/// True if every placed item lies within the sheet bounds: inside the edge
/// reservations for roll media, inside the full canvas otherwise.
pub fn all_within_bounds(session: &SheetSession) -> bool {
    let sheet = &session.config;
    let (x_min, y_min) = sheet.placeable_origin();
    let x_max = sheet.width
        - match sheet.is_roll_media {
            true => sheet.edge_spacing.horizontal,
            false => 0.0,
        };
    let y_max = session.length
        - match sheet.is_roll_media {
            true => sheet.edge_spacing.vertical,
            false => 0.0,
        };

    session.placed_items.values().all(|pi| {
        let r = pi.rect();
        r.x_min >= x_min - BOUNDS_TOL
            && r.y_min >= y_min - BOUNDS_TOL
            && r.x_max <= x_max + BOUNDS_TOL
            && r.y_max <= y_max + BOUNDS_TOL
    })
}

/// True if no free rectangle is fully contained in another.
pub fn free_rects_pruned(rects: &[Rect]) -> bool {
    rects.iter().enumerate().all(|(i, rect)| {
        rects
            .iter()
            .enumerate()
            .all(|(j, other)| i == j || !other.contains(rect))
    })
}
