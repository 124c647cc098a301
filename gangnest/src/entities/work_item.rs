use std::sync::Arc;

/// Opaque artwork payload. The nesting core never inspects the bytes; `id`
/// doubles as the image reference in exported page descriptions. Cheap to
/// clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artwork {
    pub id: u64,
    pub bytes: Arc<[u8]>,
}

impl Artwork {
    pub fn new(id: u64, bytes: impl Into<Arc<[u8]>>) -> Self {
        Artwork {
            id,
            bytes: bytes.into(),
        }
    }

    /// An artwork known only by reference, with no payload attached.
    /// Used by jobs that resolve image data downstream.
    pub fn by_ref(id: u64) -> Self {
        Artwork {
            id,
            bytes: Arc::from([]),
        }
    }
}

/// An artwork queued for nesting: nominal dimensions in inches and a
/// requested quantity. Owned by the session queue.
#[derive(Clone, Debug)]
pub struct WorkItem {
    pub artwork: Artwork,
    pub width: f32,
    pub height: f32,
    pub qty: usize,
}

impl WorkItem {
    /// Quantity fan-out: one [`PlacementUnit`] per physical copy.
    pub fn expand(&self) -> impl Iterator<Item = PlacementUnit> + '_ {
        (0..self.qty).map(|_| PlacementUnit {
            artwork: self.artwork.clone(),
            width: self.width,
            height: self.height,
        })
    }
}

/// One physical instance of a [`WorkItem`], dimensions fixed at expansion
/// time. Regenerated whenever nesting is re-run.
#[derive(Clone, Debug)]
pub struct PlacementUnit {
    pub artwork: Artwork,
    pub width: f32,
    pub height: f32,
}

impl PlacementUnit {
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// 1.0 for a perfect square, approaching 0 for extreme aspect ratios.
    pub fn squareness(&self) -> f32 {
        let ar = self.aspect_ratio();
        f32::min(ar, 1.0 / ar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_fans_out_quantity() {
        let item = WorkItem {
            artwork: Artwork::by_ref(7),
            width: 3.0,
            height: 4.0,
            qty: 3,
        };
        let units: Vec<_> = item.expand().collect();
        assert_eq!(units.len(), 3);
        assert!(units.iter().all(|u| u.artwork.id == 7));
        assert_eq!(units[0].area(), 12.0);
    }

    #[test]
    fn squareness_is_orientation_independent() {
        let tall = PlacementUnit {
            artwork: Artwork::by_ref(0),
            width: 2.0,
            height: 8.0,
        };
        let wide = PlacementUnit {
            artwork: Artwork::by_ref(1),
            width: 8.0,
            height: 2.0,
        };
        assert_eq!(tall.squareness(), wide.squareness());
        assert_eq!(tall.squareness(), 0.25);
    }
}
