//! Overlap detection and repair for manually repositioned items.
//!
//! Operates on the live placed-item set, independent of the nesting engine:
//! overlaps can only arise from manual drags and rotation toggles, and are
//! resolved here by relocating the offending item.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::entities::{PlacedItem, PlacedItemKey};
use crate::geometry::Rect;
use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;

/// Tunables of the displacement search, in inches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Radial step of the spiral search
    pub step: f32,
    /// Spiral positions tried before falling back
    pub max_attempts: usize,
    /// Gap left above an item placed below all others by the fallback
    pub fallback_gap: f32,
    /// Gap left when the bulk fixer pushes an item downward
    pub push_gap: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            step: 0.5,
            max_attempts: 100,
            fallback_gap: 0.5,
            push_gap: 0.25,
        }
    }
}

/// True if the item's rectangle strictly intersects any other placed item.
pub fn is_overlapping(items: &SlotMap<PlacedItemKey, PlacedItem>, key: PlacedItemKey) -> bool {
    let rect = items[key].rect();
    rect_overlaps_any(items, key, rect)
}

fn rect_overlaps_any(
    items: &SlotMap<PlacedItemKey, PlacedItem>,
    key: PlacedItemKey,
    rect: Rect,
) -> bool {
    items
        .iter()
        .filter(|(other_key, _)| *other_key != key)
        .any(|(_, other)| rect.overlaps(&other.rect()))
}

/// Relocates an overlapping item to the first clear position found on an
/// expanding spiral around its current position; when the attempt budget
/// runs out, deterministically parks it at the left edge below every other
/// item. Returns true if the item was moved.
///
/// Spiral candidates are rejected when they leave the sheet on the left,
/// top or right.
pub fn resolve_item(
    items: &mut SlotMap<PlacedItemKey, PlacedItem>,
    key: PlacedItemKey,
    sheet_width: f32,
    cfg: &ResolverConfig,
) -> bool {
    if !is_overlapping(items, key) {
        return false;
    }

    let (x, y, width, height) = {
        let pi = &items[key];
        (pi.x, pi.y, pi.width, pi.height)
    };

    for attempt in 0..cfg.max_attempts {
        let radius = (attempt as f32).sqrt().floor();
        let angle = attempt as f32 * 0.5;
        let nx = x + angle.cos() * radius * cfg.step;
        let ny = y + angle.sin() * radius * cfg.step;

        if nx < 0.0 || ny < 0.0 || nx + width > sheet_width {
            continue;
        }

        let candidate = Rect {
            x_min: nx,
            y_min: ny,
            x_max: nx + width,
            y_max: ny + height,
        };
        if !rect_overlaps_any(items, key, candidate) {
            debug!(
                "[OVERLAP] relocated item to ({nx:.2}, {ny:.2}) after {} attempts",
                attempt + 1
            );
            let pi = &mut items[key];
            (pi.x, pi.y) = (nx, ny);
            return true;
        }
    }

    // no clear spot nearby: park below everything else
    let max_bottom = items
        .iter()
        .filter(|(other_key, _)| *other_key != key)
        .map(|(_, other)| OrderedFloat(other.bottom()))
        .max()
        .map_or(0.0, |b| b.0);

    debug!("[OVERLAP] spiral budget exhausted, parking below y = {max_bottom:.2}");
    let pi = &mut items[key];
    (pi.x, pi.y) = (0.0, max_bottom + cfg.fallback_gap);
    true
}

/// Bulk repair pass: visits items top to bottom and pushes the lower item
/// of every overlapping pair down past the other. Returns the number of
/// displacements performed.
pub fn detect_and_fix(
    items: &mut SlotMap<PlacedItemKey, PlacedItem>,
    cfg: &ResolverConfig,
) -> usize {
    let keys = items
        .iter()
        .sorted_by_key(|(_, pi)| OrderedFloat(pi.y))
        .map(|(key, _)| key)
        .collect_vec();

    let mut fixed = 0;
    for &key in &keys {
        for &other_key in &keys {
            if other_key == key {
                continue;
            }
            let rect = items[key].rect();
            let other_rect = items[other_key].rect();
            if rect.overlaps(&other_rect) && rect.y_min >= other_rect.y_min {
                items[key].y = other_rect.y_max + cfg.push_gap;
                fixed += 1;
            }
        }
    }

    if fixed > 0 {
        debug!("[OVERLAP] bulk fix displaced {fixed} items");
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Artwork, PlacementUnit};
    use crate::util::assertions;

    fn place(
        items: &mut SlotMap<PlacedItemKey, PlacedItem>,
        id: u64,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> PlacedItemKey {
        items.insert(PlacedItem::new(
            PlacementUnit {
                artwork: Artwork::by_ref(id),
                width: w,
                height: h,
            },
            x,
            y,
            false,
        ))
    }

    #[test]
    fn detects_strict_overlap_only() {
        let mut items = SlotMap::with_key();
        let a = place(&mut items, 1, 0.0, 0.0, 2.0, 2.0);
        let b = place(&mut items, 2, 2.0, 0.0, 2.0, 2.0);
        assert!(!is_overlapping(&items, a));
        assert!(!is_overlapping(&items, b));

        items[b].x = 1.9;
        assert!(is_overlapping(&items, a));
        assert!(is_overlapping(&items, b));
    }

    #[test]
    fn dragged_item_is_relocated_clear_of_others() {
        // Scenario D: drop one item straight onto another
        let mut items = SlotMap::with_key();
        place(&mut items, 1, 5.0, 5.0, 3.0, 3.0);
        let dragged = place(&mut items, 2, 5.5, 5.5, 3.0, 3.0);

        let moved = resolve_item(&mut items, dragged, 22.0, &ResolverConfig::default());

        assert!(moved);
        assert!(!is_overlapping(&items, dragged));
        assert!(assertions::no_overlaps(&items));
    }

    #[test]
    fn resolve_is_a_noop_without_overlap() {
        let mut items = SlotMap::with_key();
        place(&mut items, 1, 0.0, 0.0, 2.0, 2.0);
        let lone = place(&mut items, 2, 10.0, 0.0, 2.0, 2.0);

        assert!(!resolve_item(
            &mut items,
            lone,
            22.0,
            &ResolverConfig::default()
        ));
        let pi = &items[lone];
        assert_eq!((pi.x, pi.y), (10.0, 0.0));
    }

    #[test]
    fn exhausted_spiral_parks_item_below_everything() {
        // a sheet exactly as wide as the item leaves no valid spiral
        // candidate: every non-zero dx is out of bounds
        let mut items = SlotMap::with_key();
        place(&mut items, 1, 0.0, 0.0, 1.0, 1.0);
        let dragged = place(&mut items, 2, 0.0, 0.0, 1.0, 1.0);

        let cfg = ResolverConfig::default();
        let moved = resolve_item(&mut items, dragged, 1.0, &cfg);

        assert!(moved);
        let pi = &items[dragged];
        assert_eq!((pi.x, pi.y), (0.0, 1.0 + cfg.fallback_gap));
        assert!(!is_overlapping(&items, dragged));
    }

    #[test]
    fn bulk_fix_pushes_lower_items_down() {
        let mut items = SlotMap::with_key();
        let top = place(&mut items, 1, 0.0, 0.0, 4.0, 4.0);
        let lower = place(&mut items, 2, 1.0, 2.0, 4.0, 4.0);

        let cfg = ResolverConfig::default();
        let fixed = detect_and_fix(&mut items, &cfg);

        assert_eq!(fixed, 1);
        assert_eq!(items[top].y, 0.0);
        assert_eq!(items[lower].y, 4.0 + cfg.push_gap);
        assert!(assertions::no_overlaps(&items));
    }

    #[test]
    fn bulk_fix_reports_zero_on_clean_layouts() {
        let mut items = SlotMap::with_key();
        place(&mut items, 1, 0.0, 0.0, 2.0, 2.0);
        place(&mut items, 2, 3.0, 0.0, 2.0, 2.0);
        place(&mut items, 3, 0.0, 3.0, 2.0, 2.0);

        assert_eq!(detect_and_fix(&mut items, &ResolverConfig::default()), 0);
    }

    #[test]
    fn bulk_fix_cascades_against_moved_positions() {
        // C must clear the position B was pushed to, not B's original one
        let mut items = SlotMap::with_key();
        place(&mut items, 1, 0.0, 0.0, 4.0, 4.0);
        place(&mut items, 2, 0.0, 3.0, 4.0, 2.0);
        place(&mut items, 3, 0.0, 4.5, 4.0, 2.0);

        let fixed = detect_and_fix(&mut items, &ResolverConfig::default());

        assert_eq!(fixed, 2);
        assert!(assertions::no_overlaps(&items));
    }
}
