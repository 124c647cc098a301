//! Boundary to the external image-processing service.
//!
//! The engine treats the service as an opaque collaborator: bytes in, bytes
//! out, one transform per call. Calls may fail independently and should be
//! idempotent enough to retry. The hosting application is responsible for
//! never running a transform concurrently with a nest pass.

use std::collections::BTreeMap;

use thiserror::Error;

/// A single call to the image-processing service.
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    /// Raw image payload
    pub image: &'a [u8],
    /// Name of the transform, e.g. `"upscale"` or `"remove-bg"`
    pub transform: &'a str,
    /// Transform-specific options
    pub options: &'a BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("transform service unavailable: {0}")]
    Unavailable(String),
    #[error("transform `{transform}` failed: {reason}")]
    Failed { transform: String, reason: String },
}

/// External image-processing collaborator.
pub trait ImageTransformService {
    fn apply(&self, req: TransformRequest<'_>) -> Result<Vec<u8>, TransformError>;
}
