pub mod assertions;
mod fpa;

#[doc(inline)]
pub use fpa::FPA;

/// Rounds to the two-decimal convention used for sheet lengths.
pub fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
