use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::entities::{Artwork, PlacedItem, PlacedItemKey, SheetConfig, SheetLength, WorkItem};
use crate::error::NestError;
use crate::io::export::{self, PageDescription};
use crate::nesting::engine::{self, NestReport};
use crate::nesting::placement::PlacementConfig;
use crate::overlap::{self, ResolverConfig};
use crate::transform::{ImageTransformService, TransformRequest};

/// Explicit state container for one layout session: the work queue, the
/// sheet configuration and the live placed-item set. Every core operation is
/// a method of this container; rendering is a projection of it, never the
/// reverse.
#[derive(Clone)]
pub struct SheetSession {
    pub queue: Vec<WorkItem>,
    pub config: SheetConfig,
    pub placed_items: SlotMap<PlacedItemKey, PlacedItem>,
    /// Current sheet length in inches. Mirrors the configured value for
    /// fixed-length media; computed by the nesting engine for `Auto`.
    pub length: f32,
}

impl Default for SheetSession {
    fn default() -> Self {
        SheetSession::new(SheetConfig::default())
    }
}

impl SheetSession {
    pub fn new(config: SheetConfig) -> Self {
        SheetSession {
            queue: vec![],
            placed_items: SlotMap::with_key(),
            length: match config.length {
                SheetLength::Fixed(l) => l,
                SheetLength::Auto => 0.0,
            },
            config,
        }
    }

    /// Adds an artwork to the work queue. Dimensions must be positive and
    /// finite; a quantity of zero is bumped to one.
    pub fn add_to_queue(&mut self, mut item: WorkItem) -> Result<(), NestError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(item.width) || !valid(item.height) {
            return Err(NestError::InvalidDimension {
                width: item.width,
                height: item.height,
            });
        }
        item.qty = item.qty.max(1);
        self.queue.push(item);
        Ok(())
    }

    /// Removes a queue entry. Panics if `index` is out of range.
    pub fn remove_from_queue(&mut self, index: usize) -> WorkItem {
        self.queue.remove(index)
    }

    /// Sets the quantity of a queue entry, clamped to at least one.
    /// Panics if `index` is out of range.
    pub fn set_quantity(&mut self, index: usize, qty: usize) {
        self.queue[index].qty = qty.max(1);
    }

    /// Total number of physical copies across the queue.
    pub fn total_queued(&self) -> usize {
        self.queue.iter().map(|item| item.qty).sum()
    }

    /// Replaces the sheet configuration, re-syncing the current length for
    /// fixed-length media. Placed items are left untouched until the next
    /// nest run.
    pub fn configure_sheet(&mut self, config: SheetConfig) {
        if let SheetLength::Fixed(l) = config.length {
            self.length = l;
        }
        self.config = config;
    }

    /// Runs the auto-nesting engine over the current queue, replacing all
    /// placed items. See [`engine::nest`].
    pub fn auto_nest(&mut self, cfg: &PlacementConfig) -> NestReport {
        engine::nest(self, cfg)
    }

    /// Produces the page description for downstream rendering.
    pub fn export_layout(&self) -> Result<PageDescription, NestError> {
        export::export_layout(self)
    }

    /// Applies an external image transform to a queued artwork. On success
    /// the artwork payload is replaced in place; on failure the queue entry
    /// is untouched. Panics if `index` is out of range.
    pub fn transform_artwork(
        &mut self,
        index: usize,
        service: &dyn ImageTransformService,
        transform: &str,
        options: &BTreeMap<String, String>,
    ) -> Result<(), NestError> {
        let artwork = &self.queue[index].artwork;
        let bytes = service.apply(TransformRequest {
            image: &artwork.bytes,
            transform,
            options,
        })?;
        self.queue[index].artwork = Artwork::new(artwork.id, bytes);
        Ok(())
    }

    /// Moves a placed item to a new position (clamped to non-negative
    /// coordinates), then resolves any overlap it causes if auto-arrange is
    /// enabled. Panics on a stale key.
    pub fn move_item(&mut self, key: PlacedItemKey, x: f32, y: f32, cfg: &ResolverConfig) {
        let pi = self
            .placed_items
            .get_mut(key)
            .expect("key is not valid anymore");
        pi.x = x.max(0.0);
        pi.y = y.max(0.0);
        if self.config.auto_arrange {
            overlap::resolve_item(&mut self.placed_items, key, self.config.width, cfg);
        }
    }

    /// Toggles 90° rotation of a placed item around its centroid, then
    /// resolves any overlap it causes if auto-arrange is enabled. No-op when
    /// rotation is disallowed by the sheet configuration.
    pub fn toggle_rotation(&mut self, key: PlacedItemKey, cfg: &ResolverConfig) {
        if !self.config.allow_rotation {
            return;
        }
        let pi = self
            .placed_items
            .get_mut(key)
            .expect("key is not valid anymore");
        pi.toggle_rotation();
        if self.config.auto_arrange {
            overlap::resolve_item(&mut self.placed_items, key, self.config.width, cfg);
        }
    }

    /// Removes a placed item. Panics on a stale key.
    pub fn remove_item(&mut self, key: PlacedItemKey) -> PlacedItem {
        self.placed_items
            .remove(key)
            .expect("key is not valid anymore")
    }

    /// True if the item's rectangle intersects any other placed item.
    pub fn is_overlapping(&self, key: PlacedItemKey) -> bool {
        overlap::is_overlapping(&self.placed_items, key)
    }

    /// Bulk overlap repair over all placed items. Returns the number of
    /// displacements performed.
    pub fn detect_and_fix_overlaps(&mut self, cfg: &ResolverConfig) -> usize {
        overlap::detect_and_fix(&mut self.placed_items, cfg)
    }

    /// The sum of the areas of all placed items, in square inches.
    pub fn placed_item_area(&self) -> f32 {
        self.placed_items
            .values()
            .map(|pi| pi.width * pi.height)
            .sum()
    }

    /// Production cost of the full sheet at the configured per-square-inch
    /// rate.
    pub fn production_cost(&self) -> f32 {
        self.config.width * self.length * self.config.cost_per_sq_inch
    }
}
