mod placed_item;
mod session;
mod sheet;
mod work_item;

#[doc(inline)]
pub use placed_item::PlacedItem;
#[doc(inline)]
pub use placed_item::PlacedItemKey;
#[doc(inline)]
pub use session::SheetSession;
#[doc(inline)]
pub use sheet::EdgeSpacing;
#[doc(inline)]
pub use sheet::SheetConfig;
#[doc(inline)]
pub use sheet::SheetLength;
#[doc(inline)]
pub use work_item::Artwork;
#[doc(inline)]
pub use work_item::PlacementUnit;
#[doc(inline)]
pub use work_item::WorkItem;
