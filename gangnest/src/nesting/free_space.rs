use crate::geometry::{GeoRelation, Rect};
use crate::util::assertions;

/// Tracks the set of free rectangles on the sheet: the regions still
/// available for placement.
///
/// Consuming a used region guillotine-splits every intersecting free
/// rectangle into up to four residual bands, after which any rectangle fully
/// contained in another is pruned. Pruning bounds the growth of the working
/// set over many placements; free rectangles are allowed to overlap each
/// other.
#[derive(Debug, Clone, Default)]
pub struct FreeSpace {
    free_rects: Vec<Rect>,
}

impl FreeSpace {
    pub fn new(initial: Rect) -> Self {
        FreeSpace {
            free_rects: vec![initial],
        }
    }

    /// A tracker with no placeable area at all, e.g. a sheet shorter than
    /// its own edge reservations.
    pub fn empty() -> Self {
        FreeSpace::default()
    }

    pub fn rects(&self) -> &[Rect] {
        &self.free_rects
    }

    /// Removes `used` from the free space. Every free rectangle intersecting
    /// it is replaced by its residual left/right/bottom/top bands; bands
    /// with zero area are not emitted.
    pub fn consume(&mut self, used: Rect) {
        let mut next = Vec::with_capacity(self.free_rects.len() + 3);

        for &rect in &self.free_rects {
            if !rect.overlaps(&used) {
                next.push(rect);
                continue;
            }

            // left band
            if used.x_min > rect.x_min {
                next.push(Rect {
                    x_max: used.x_min,
                    ..rect
                });
            }
            // right band
            if used.x_max < rect.x_max {
                next.push(Rect {
                    x_min: used.x_max,
                    ..rect
                });
            }
            // band below the used region (y grows downward)
            if used.y_max < rect.y_max {
                next.push(Rect {
                    y_min: used.y_max,
                    ..rect
                });
            }
            // band above the used region
            if used.y_min > rect.y_min {
                next.push(Rect {
                    y_max: used.y_min,
                    ..rect
                });
            }
        }

        self.free_rects = prune(next);
        debug_assert!(assertions::free_rects_pruned(&self.free_rects));
    }
}

/// Drops every rectangle fully contained in another.
fn prune(rects: Vec<Rect>) -> Vec<Rect> {
    let contained = |i: usize, rect: &Rect| {
        rects
            .iter()
            .enumerate()
            .any(|(j, other)| i != j && other.relation_to(*rect) == GeoRelation::Surrounding)
    };

    rects
        .iter()
        .enumerate()
        .filter(|(i, rect)| !contained(*i, rect))
        .map(|(_, rect)| *rect)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn consuming_an_interior_region_yields_four_bands() {
        let mut fs = FreeSpace::new(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());
        fs.consume(Rect::from_xywh(4.0, 4.0, 2.0, 2.0).unwrap());

        let rects = fs.rects();
        assert_eq!(rects.len(), 4);
        assert!(rects.contains(&Rect::from_xywh(0.0, 0.0, 4.0, 10.0).unwrap()));
        assert!(rects.contains(&Rect::from_xywh(6.0, 0.0, 4.0, 10.0).unwrap()));
        assert!(rects.contains(&Rect::from_xywh(0.0, 6.0, 10.0, 4.0).unwrap()));
        assert!(rects.contains(&Rect::from_xywh(0.0, 0.0, 10.0, 4.0).unwrap()));
    }

    #[test]
    fn consuming_a_corner_region_yields_two_bands() {
        let mut fs = FreeSpace::new(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());
        fs.consume(Rect::from_xywh(0.0, 0.0, 3.0, 5.0).unwrap());

        let rects = fs.rects();
        assert_eq!(rects.len(), 2);
        assert!(rects.contains(&Rect::from_xywh(3.0, 0.0, 7.0, 10.0).unwrap()));
        assert!(rects.contains(&Rect::from_xywh(0.0, 5.0, 10.0, 5.0).unwrap()));
    }

    #[test]
    fn touching_regions_are_not_split() {
        let mut fs = FreeSpace::new(Rect::from_xywh(5.0, 0.0, 5.0, 5.0).unwrap());
        // shares the x = 5 edge with the free rect
        fs.consume(Rect::from_xywh(0.0, 0.0, 5.0, 5.0).unwrap());
        assert_eq!(fs.rects(), &[Rect::from_xywh(5.0, 0.0, 5.0, 5.0).unwrap()]);
    }

    #[test]
    fn consuming_everything_empties_the_tracker() {
        let mut fs = FreeSpace::new(Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap());
        fs.consume(Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap());
        assert!(fs.rects().is_empty());
    }

    #[test]
    fn prune_drops_contained_rects() {
        let big = Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap();
        let small = Rect::from_xywh(2.0, 2.0, 1.0, 1.0).unwrap();
        let apart = Rect::from_xywh(20.0, 0.0, 5.0, 5.0).unwrap();

        let pruned = prune(vec![big, small, apart]);
        assert_eq!(pruned, vec![big, apart]);
    }

    #[test]
    fn no_containment_after_random_consume_sequence() {
        let mut rng = SmallRng::seed_from_u64(0);

        for _ in 0..20 {
            let mut fs = FreeSpace::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0).unwrap());
            for _ in 0..50 {
                let x = rng.random_range(0.0..90.0_f32);
                let y = rng.random_range(0.0..90.0_f32);
                let w = rng.random_range(0.5..10.0_f32);
                let h = rng.random_range(0.5..10.0_f32);
                fs.consume(Rect::from_xywh(x, y, w, h).unwrap());
                assert!(assertions::free_rects_pruned(fs.rects()));
            }
        }
    }
}
