use crate::geometry::GeoRelation;
use crate::geometry::Point;
use crate::util::FPA;
use anyhow::Result;
use anyhow::ensure;

/// Axis-aligned rectangle in inches. The y-axis grows downward, so `y_min`
/// is the top edge and `y_max` the bottom edge.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Rect {
    pub fn try_new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Builds a rectangle from its top-left corner and dimensions.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        Rect::try_new(x, y, x + width, y + height)
    }

    /// Returns the geometric relation between `self` and another [`Rect`].
    pub fn relation_to(&self, other: Rect) -> GeoRelation {
        if !self.overlaps(&other) {
            return GeoRelation::Disjoint;
        }
        if self.contains(&other) {
            return GeoRelation::Surrounding;
        }
        if other.contains(self) {
            return GeoRelation::Enclosed;
        }
        GeoRelation::Intersecting
    }

    /// Strict intersection test: rectangles that merely share an edge or a
    /// corner do not overlap.
    #[inline(always)]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x_max <= other.x_min
            || self.x_min >= other.x_max
            || self.y_max <= other.y_min
            || self.y_min >= other.y_max)
    }

    /// True if `other` lies fully within `self` (boundaries included).
    #[inline(always)]
    pub fn contains(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f32 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// True if either dimension matches `width`/`height` exactly, within
    /// floating point tolerance.
    pub fn fits_exactly(&self, width: f32, height: f32) -> bool {
        FPA(self.width()) == FPA(width) || FPA(self.height()) == FPA(height)
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x_min = f32::max(a.x_min, b.x_min);
        let y_min = f32::max(a.y_min, b.y_min);
        let x_max = f32::min(a.x_max, b.x_max);
        let y_max = f32::min(a.y_max, b.y_max);
        if x_min < x_max && y_min < y_max {
            Some(Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: f32::min(a.x_min, b.x_min),
            y_min: f32::min(a.y_min, b.y_min),
            x_max: f32::max(a.x_max, b.x_max),
            y_max: f32::max(a.y_max, b.y_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_degenerate_rects() {
        assert!(Rect::try_new(0.0, 0.0, 0.0, 1.0).is_err());
        assert!(Rect::try_new(2.0, 0.0, 1.0, 1.0).is_err());
        assert!(Rect::from_xywh(0.0, 0.0, 5.0, -1.0).is_err());
    }

    #[test]
    fn shared_edges_do_not_overlap() {
        let a = Rect::from_xywh(0.0, 0.0, 2.0, 2.0).unwrap();
        let b = Rect::from_xywh(2.0, 0.0, 2.0, 2.0).unwrap();
        let c = Rect::from_xywh(1.0, 1.0, 2.0, 2.0).unwrap();

        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert_eq!(a.relation_to(b), GeoRelation::Disjoint);
        assert_eq!(a.relation_to(c), GeoRelation::Intersecting);
    }

    #[test]
    fn containment_includes_boundaries() {
        let outer = Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap();
        let inner = Rect::from_xywh(0.0, 2.0, 5.0, 5.0).unwrap();

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert_eq!(outer.relation_to(inner), GeoRelation::Surrounding);
        assert_eq!(inner.relation_to(outer), GeoRelation::Enclosed);
    }

    #[test]
    fn intersection_and_bounding() {
        let a = Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap();
        let b = Rect::from_xywh(2.0, 2.0, 4.0, 4.0).unwrap();

        let isect = Rect::intersection(a, b).unwrap();
        assert_eq!(isect, Rect::from_xywh(2.0, 2.0, 2.0, 2.0).unwrap());

        let bbox = Rect::bounding_rect(a, b);
        assert_eq!(bbox, Rect::from_xywh(0.0, 0.0, 6.0, 6.0).unwrap());

        let c = Rect::from_xywh(10.0, 10.0, 1.0, 1.0).unwrap();
        assert!(Rect::intersection(a, c).is_none());
    }

    #[test]
    fn exact_fit_tolerates_float_noise() {
        let r = Rect::from_xywh(0.0, 0.0, 0.1 + 0.2, 1.0).unwrap();
        assert!(r.fits_exactly(0.3, 5.0));
        assert!(!r.fits_exactly(0.4, 5.0));
    }
}
