use crate::entities::PlacementUnit;
use crate::geometry::Rect;
use slotmap::new_key_type;

new_key_type! {
    /// Unique key of a placed item within a session
    pub struct PlacedItemKey;
}

/// A [`PlacementUnit`] bound to a position on the sheet.
/// `width`/`height` are the placed dimensions: swapped relative to the unit
/// when `rotated` is set. Position is the top-left corner, in inches.
#[derive(Clone, Debug)]
pub struct PlacedItem {
    pub unit: PlacementUnit,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotated: bool,
}

impl PlacedItem {
    pub fn new(unit: PlacementUnit, x: f32, y: f32, rotated: bool) -> Self {
        let (width, height) = match rotated {
            true => (unit.height, unit.width),
            false => (unit.width, unit.height),
        };
        PlacedItem {
            unit,
            x,
            y,
            width,
            height,
            rotated,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x_min: self.x,
            y_min: self.y,
            x_max: self.x + self.width,
            y_max: self.y + self.height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Swaps the placed dimensions, keeping the centroid fixed.
    pub fn toggle_rotation(&mut self) {
        let centroid = self.rect().centroid();
        std::mem::swap(&mut self.width, &mut self.height);
        self.rotated = !self.rotated;
        self.x = centroid.x() - self.width / 2.0;
        self.y = centroid.y() - self.height / 2.0;
    }
}
