use serde::{Deserialize, Serialize};

/// Reserved margins at the borders of roll media, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpacing {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for EdgeSpacing {
    fn default() -> Self {
        EdgeSpacing {
            horizontal: 0.25,
            vertical: 0.5,
        }
    }
}

/// Sheet length: fixed for cut-sheet media, computed from content for rolls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetLength {
    Auto,
    Fixed(f32),
}

/// Configuration of the sheet for a layout session, fixed for the duration
/// of a nest run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Sheet width in inches
    pub width: f32,
    pub length: SheetLength,
    /// Zero padding between items instead of the configured default
    #[serde(default)]
    pub tight_packing: bool,
    /// Permit 90° rotation of items during placement
    pub allow_rotation: bool,
    /// Bias rotation for items with extreme aspect ratios
    #[serde(default)]
    pub aggressive_rotation: bool,
    /// Automatically displace overlapping items after manual moves
    pub auto_arrange: bool,
    #[serde(default)]
    pub edge_spacing: EdgeSpacing,
    /// Roll media reserves `edge_spacing` at all four sheet borders
    pub is_roll_media: bool,
    /// Production cost per square inch of sheet area, in dollars
    #[serde(default = "default_cost")]
    pub cost_per_sq_inch: f32,
}

fn default_cost() -> f32 {
    0.025
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            width: 22.0,
            length: SheetLength::Fixed(24.0),
            tight_packing: false,
            allow_rotation: true,
            aggressive_rotation: false,
            auto_arrange: true,
            edge_spacing: EdgeSpacing::default(),
            is_roll_media: true,
            cost_per_sq_inch: default_cost(),
        }
    }
}

impl SheetConfig {
    /// Width available for placement: the sheet width minus both horizontal
    /// edge reservations on roll media.
    pub fn effective_width(&self) -> f32 {
        match self.is_roll_media {
            true => self.width - 2.0 * self.edge_spacing.horizontal,
            false => self.width,
        }
    }

    /// Top-left corner of the placeable area.
    pub fn placeable_origin(&self) -> (f32, f32) {
        match self.is_roll_media {
            true => (self.edge_spacing.horizontal, self.edge_spacing.vertical),
            false => (0.0, 0.0),
        }
    }

    /// Margin appended below the lowest item when the length is
    /// auto-computed.
    pub fn bottom_margin(&self) -> f32 {
        match self.is_roll_media {
            true => self.edge_spacing.vertical,
            false => 0.5,
        }
    }
}
