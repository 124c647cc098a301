use serde::{Deserialize, Serialize};

use gangnest::nesting::PlacementConfig;
use gangnest::overlap::ResolverConfig;

use crate::svg_export::SvgDrawOptions;

/// Configuration for the blg reference implementation
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct BlgConfig {
    /// Scoring tunables of the placement heuristic
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Displacement search tunables of the overlap resolver
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for BlgConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            resolver: ResolverConfig::default(),
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
