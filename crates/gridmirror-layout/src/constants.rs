//! Fixed geometry of the call window's video grid
//!
//! Measured in window pixels at 100% zoom. The grid sits inside a box inset
//! from the window edges by the header (top), the control bar (bottom) and a
//! thin gutter (sides). A windowed client additionally draws its own title
//! bar above the header.

use serde::{Deserialize, Serialize};

use gridmirror_core::Size;

pub const TILE_SPACING: f64 = 8.0;
pub const TILE_ASPECT: f64 = 16.0 / 9.0;
pub const MARGIN_TOP: f64 = 64.5;
pub const MARGIN_SIDES: f64 = 8.25;
pub const MARGIN_BOTTOM: f64 = 71.25;
pub const TITLE_BAR_HEIGHT: f64 = 22.0;
/// Rounded tile corners and the speaking outline are cropped away
pub const CROP_INSET: f64 = 2.0;

/// Grid constants, overridable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConstants {
    pub spacing: f64,
    pub aspect: f64,
    pub margin_top: f64,
    pub margin_sides: f64,
    pub margin_bottom: f64,
    pub title_bar_height: f64,
    pub crop_inset: f64,
}

impl Default for GridConstants {
    fn default() -> Self {
        GridConstants {
            spacing: TILE_SPACING,
            aspect: TILE_ASPECT,
            margin_top: MARGIN_TOP,
            margin_sides: MARGIN_SIDES,
            margin_bottom: MARGIN_BOTTOM,
            title_bar_height: TITLE_BAR_HEIGHT,
            crop_inset: CROP_INSET,
        }
    }
}

impl GridConstants {
    /// Distance from the top of the capture to the top of the grid box
    pub fn top(&self, full_screen: bool) -> f64 {
        if full_screen {
            self.margin_top
        } else {
            self.margin_top + self.title_bar_height
        }
    }

    /// Width and height of the box the grid is laid out in
    pub fn grid_box(&self, container: Size, full_screen: bool) -> (f64, f64) {
        let width = container.width as f64 - 2.0 * self.margin_sides;
        let height = container.height as f64 - self.top(full_screen) - self.margin_bottom;
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_box_windowed_and_full_screen() {
        let constants = GridConstants::default();
        let container = Size::new(1280, 720);

        let (w, h) = constants.grid_box(container, true);
        assert_eq!(w, 1263.5);
        assert_eq!(h, 584.25);

        let (_, windowed) = constants.grid_box(container, false);
        assert_eq!(windowed, 584.25 - TITLE_BAR_HEIGHT);
    }

    #[test]
    fn test_partial_override() {
        let constants: GridConstants = serde_json::from_str(r#"{"spacing": 4.0}"#).unwrap();
        assert_eq!(constants.spacing, 4.0);
        assert_eq!(constants.aspect, TILE_ASPECT);
    }
}
