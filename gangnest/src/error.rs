use thiserror::Error;

use crate::transform::TransformError;

/// Domain errors of the nesting core.
///
/// Placement failure is deliberately absent: an item that fits nowhere does
/// not abort the batch and is reported per item in
/// [`NestReport`](crate::nesting::engine::NestReport) instead.
#[derive(Debug, Error)]
pub enum NestError {
    /// Artwork dimensions must be positive and finite.
    #[error("invalid artwork dimensions: {width}\" x {height}\"")]
    InvalidDimension { width: f32, height: f32 },
    /// The external image-processing call failed; prior state is preserved.
    #[error(transparent)]
    TransformService(#[from] TransformError),
    /// Export requires a non-empty queue and at least one placed item.
    #[error("nothing to export: queue or layout is empty")]
    EmptyExport,
}
