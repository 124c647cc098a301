pub mod export;
pub mod ext_repr;

#[doc(inline)]
pub use export::{PageDescription, PageItem};
