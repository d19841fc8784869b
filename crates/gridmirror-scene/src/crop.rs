//! Tile placement and crop computation
//!
//! Rounding is part of the contract: the left and top crop are rounded up
//! and the right and bottom crop are taken from the truncated far edge, so a
//! crop can only ever cut into the tile and never bleed into a neighbour.

use gridmirror_core::{Crop, Rect, Size};
use gridmirror_layout::{GridConstants, GridLayout};

/// Tile of the participant at `rank` in capture pixel space
pub fn tile_rect(
    rank: usize,
    layout: &GridLayout,
    constants: &GridConstants,
    full_screen: bool,
) -> Rect {
    let cols = layout.cols.max(1);
    let row = rank / cols + 1;
    let col = rank % cols + 1;

    let mut x = constants.margin_sides
        + layout.offset_x
        + (layout.tile_width + constants.spacing) * (col - 1) as f64;
    if row == layout.rows {
        x += layout.last_row_offset;
    }
    let y = constants.top(full_screen)
        + layout.offset_y
        + (layout.tile_height + constants.spacing) * (row - 1) as f64;

    Rect::new(x, y, layout.tile_width, layout.tile_height)
}

/// Clip `tile` to the element's aspect ratio, keeping the content centered
pub fn fit_to_aspect(tile: Rect, aspect: Option<f64>) -> Rect {
    let Some(aspect) = aspect else {
        return tile;
    };
    let tile_aspect = tile.width / tile.height;

    if aspect > tile_aspect {
        // Element is wider than the tile: drop rows top and bottom
        let height = tile.width / aspect;
        Rect::new(
            tile.x,
            tile.y + (tile.height - height) / 2.0,
            tile.width,
            height,
        )
    } else if aspect < tile_aspect {
        // Element is narrower: drop columns left and right
        let width = tile.height * aspect;
        Rect::new(
            tile.x + (tile.width - width) / 2.0,
            tile.y,
            width,
            tile.height,
        )
    } else {
        tile
    }
}

/// Crop that leaves only `region`, inset by `inset` on every side
pub fn crop_for(region: Rect, inset: f64, container: Size) -> Crop {
    let inner = region.inset(inset);
    let width = container.width as f64;
    let height = container.height as f64;

    let left = inner.x.ceil().clamp(0.0, width);
    let top = inner.y.ceil().clamp(0.0, height);
    let right = (width - inner.right().trunc()).clamp(0.0, width);
    let bottom = (height - inner.bottom().trunc()).clamp(0.0, height);

    Crop::new(left as i32, top as i32, right as i32, bottom as i32)
}
