use serde::{Deserialize, Serialize};

use crate::entities::{PlacementUnit, SheetConfig};
use crate::nesting::free_space::FreeSpace;

/// Tunables of the placement scoring function, in inches.
///
/// The bonus values are empirically chosen; the defaults reproduce the
/// behavior the heuristic was calibrated with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Weight of the vertical position in the score. Dominates all other
    /// terms, making the heuristic bottom-left-first.
    pub y_weight: f32,
    /// Awarded when either item dimension matches the free rectangle
    /// exactly.
    pub perfect_fit_bonus: f32,
    /// Awarded when either dimension's slack is below
    /// `gap_fill_threshold`.
    pub gap_fill_bonus: f32,
    pub gap_fill_threshold: f32,
    /// Awarded to the rotated orientation of items with extreme aspect
    /// ratios when aggressive rotation is enabled.
    pub aggressive_rotation_bonus: f32,
    /// Items whose sides differ by less than this are considered square and
    /// get no rotated candidate.
    pub near_square_tolerance: f32,
    /// Spacing added to the right and bottom of every consumed region,
    /// unless tight packing is on.
    pub item_padding: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        PlacementConfig {
            y_weight: 1000.0,
            perfect_fit_bonus: -1.0,
            gap_fill_bonus: -0.5,
            gap_fill_threshold: 0.5,
            aggressive_rotation_bonus: -2.5,
            near_square_tolerance: 0.05,
            item_padding: 0.1,
        }
    }
}

/// Where and how to place an item: top-left position plus rotation flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementChoice {
    pub x: f32,
    pub y: f32,
    pub rotated: bool,
}

/// A candidate orientation of the item under consideration.
#[derive(Debug, Clone, Copy)]
struct Orientation {
    width: f32,
    height: f32,
    rotated: bool,
    bonus: f32,
}

/// Searches all free rectangles and candidate orientations for the
/// lowest-scoring position. Returns `None` if the item fits nowhere.
///
/// Ties are broken by enumeration order: orientations in the order they
/// were generated, free rectangles in tracker order, first minimum kept.
pub fn find_best_placement(
    free: &FreeSpace,
    unit: &PlacementUnit,
    sheet: &SheetConfig,
    cfg: &PlacementConfig,
) -> Option<PlacementChoice> {
    let mut best: Option<(PlacementChoice, f32)> = None;

    for orientation in orientations(unit, sheet, cfg) {
        for rect in free.rects() {
            if rect.width() < orientation.width || rect.height() < orientation.height {
                continue;
            }

            let wasted = (rect.width() - orientation.width) + (rect.height() - orientation.height);
            let perfect_fit = match rect.fits_exactly(orientation.width, orientation.height) {
                true => cfg.perfect_fit_bonus,
                false => 0.0,
            };
            let gap_fill = match rect.width() - orientation.width < cfg.gap_fill_threshold
                || rect.height() - orientation.height < cfg.gap_fill_threshold
            {
                true => cfg.gap_fill_bonus,
                false => 0.0,
            };

            let score =
                cfg.y_weight * rect.y_min + rect.x_min + wasted + perfect_fit + orientation.bonus + gap_fill;

            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((
                    PlacementChoice {
                        x: rect.x_min,
                        y: rect.y_min,
                        rotated: orientation.rotated,
                    },
                    score,
                ));
            }
        }
    }

    best.map(|(choice, _)| choice)
}

/// Candidate orientations for a unit: unrotated always; rotated if allowed
/// and the item is not near-square; rotated with a bonus for extreme aspect
/// ratios under aggressive rotation. The aggressive candidates are gated on
/// their own flag only.
fn orientations(
    unit: &PlacementUnit,
    sheet: &SheetConfig,
    cfg: &PlacementConfig,
) -> Vec<Orientation> {
    let mut candidates = vec![Orientation {
        width: unit.width,
        height: unit.height,
        rotated: false,
        bonus: 0.0,
    }];

    let rotated = Orientation {
        width: unit.height,
        height: unit.width,
        rotated: true,
        bonus: 0.0,
    };

    if sheet.allow_rotation && (unit.width - unit.height).abs() > cfg.near_square_tolerance {
        candidates.push(rotated);
    }
    if sheet.aggressive_rotation && unit.aspect_ratio() < 0.5 {
        candidates.push(Orientation {
            bonus: cfg.aggressive_rotation_bonus,
            ..rotated
        });
    }
    if sheet.aggressive_rotation && unit.aspect_ratio() > 2.0 {
        candidates.push(Orientation {
            bonus: cfg.aggressive_rotation_bonus,
            ..rotated
        });
    }

    candidates
}
