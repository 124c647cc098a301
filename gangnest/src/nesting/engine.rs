use std::cmp::Reverse;

use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use crate::entities::{PlacedItem, SheetLength, SheetSession};
use crate::geometry::Rect;
use crate::nesting::free_space::FreeSpace;
use crate::nesting::placement::{self, PlacementConfig};
use crate::util::{assertions, round2};

/// Tracker height used when the sheet length is auto-computed: effectively
/// unbounded, but finite so that waste-based scoring stays comparable.
pub const OPEN_LENGTH: f32 = 50_000.0;

/// An item that fit nowhere on the sheet in any orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnplacedItem {
    pub artwork_id: u64,
    pub width: f32,
    pub height: f32,
}

/// Outcome of an auto-nest run.
#[derive(Debug, Clone)]
pub struct NestReport {
    /// Number of units placed on the sheet
    pub placed: usize,
    /// Units that fit nowhere; empty on a fully successful run
    pub unplaced: Vec<UnplacedItem>,
    /// Packing efficiency as an integer percentage in [0, 100]
    pub efficiency_pct: u32,
    /// 100 minus efficiency
    pub wasted_pct: u32,
    /// Sheet length after the run, in inches
    pub sheet_length: f32,
    /// Production cost of the sheet at the configured rate, in dollars
    pub sheet_cost: f32,
}

/// Runs the auto-nesting pass: expands the queue by quantity, sorts units
/// by descending area (squarer shapes first among equals), places each unit
/// at its best-scoring position and consumes the region from the free-space
/// tracker. Items that fit nowhere are collected in the report; the batch
/// never aborts.
///
/// Placement is all-or-nothing per unit: a unit is either committed (item
/// recorded, free space consumed) or left out entirely.
pub fn nest(session: &mut SheetSession, cfg: &PlacementConfig) -> NestReport {
    let sheet = session.config;

    // fresh map: placement order and key/iteration order stay identical
    // across re-runs
    session.placed_items = slotmap::SlotMap::with_key();

    let units = session
        .queue
        .iter()
        .flat_map(|item| item.expand())
        .sorted_by_key(|unit| {
            (
                Reverse(OrderedFloat(unit.area())),
                Reverse(OrderedFloat(unit.squareness())),
            )
        })
        .collect_vec();

    let mut free = init_free_space(session);
    let padding = match sheet.tight_packing {
        true => 0.0,
        false => cfg.item_padding,
    };

    let (_, origin_y) = sheet.placeable_origin();
    let mut max_y = origin_y;
    let total_item_area: f32 = units.iter().map(|unit| unit.area()).sum();
    let mut unplaced = vec![];

    for unit in units {
        match placement::find_best_placement(&free, &unit, &sheet, cfg) {
            Some(choice) => {
                let pi = PlacedItem::new(unit, choice.x, choice.y, choice.rotated);
                max_y = f32::max(max_y, pi.bottom());

                let used = Rect::from_xywh(pi.x, pi.y, pi.width + padding, pi.height + padding)
                    .expect("placed region has positive dimensions");
                free.consume(used);

                debug!(
                    "[NEST] placed artwork {} at ({:.2}, {:.2}){}",
                    pi.unit.artwork.id,
                    pi.x,
                    pi.y,
                    if pi.rotated { " rotated" } else { "" }
                );
                session.placed_items.insert(pi);
            }
            None => {
                warn!(
                    "[NEST] could not place artwork {} ({:.2}\" x {:.2}\")",
                    unit.artwork.id, unit.width, unit.height
                );
                unplaced.push(UnplacedItem {
                    artwork_id: unit.artwork.id,
                    width: unit.width,
                    height: unit.height,
                });
            }
        }
    }

    let total_length = max_y + sheet.bottom_margin();
    if sheet.length == SheetLength::Auto {
        session.length = round2(total_length);
    }

    // efficiency relates queued item area to the content extent of the
    // sheet, not the configured canvas
    let content_height = total_length - match sheet.is_roll_media {
        true => sheet.edge_spacing.vertical,
        false => 0.0,
    };
    let sheet_area = sheet.effective_width() * content_height;
    let efficiency_pct = match sheet_area > 0.0 {
        true => ((total_item_area / sheet_area * 100.0).round() as i64).clamp(0, 100) as u32,
        false => 0,
    };

    let report = NestReport {
        placed: session.placed_items.len(),
        unplaced,
        efficiency_pct,
        wasted_pct: 100 - efficiency_pct,
        sheet_length: session.length,
        sheet_cost: round2(session.production_cost()),
    };

    info!(
        "[NEST] placed {}/{} units, efficiency {}%, sheet length {:.2}\"",
        report.placed,
        report.placed + report.unplaced.len(),
        report.efficiency_pct,
        report.sheet_length
    );

    debug_assert!(assertions::no_overlaps(&session.placed_items));
    debug_assert!(assertions::all_within_bounds(session));

    report
}

/// Initial free rectangle: the placeable area. Fixed-length media caps the
/// height so that nothing is ever placed beyond the sheet; auto length
/// leaves it open-ended.
fn init_free_space(session: &SheetSession) -> FreeSpace {
    let sheet = &session.config;
    let (x, y) = sheet.placeable_origin();
    let height = match sheet.length {
        SheetLength::Auto => OPEN_LENGTH,
        SheetLength::Fixed(l) => match sheet.is_roll_media {
            true => l - 2.0 * sheet.edge_spacing.vertical,
            false => l,
        },
    };

    match Rect::from_xywh(x, y, sheet.effective_width(), height) {
        Ok(rect) => FreeSpace::new(rect),
        Err(_) => FreeSpace::empty(),
    }
}
