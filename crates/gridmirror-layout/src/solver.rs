//! Grid geometry solver
//!
//! Reproduces the call window's tiling of `n` equally sized tiles into a box.
//! Every row/column split in which adding a row strictly reduces the column
//! count is tried; each candidate tile is clamped to the target aspect ratio
//! and the widest tile wins. The grid is then centered along whichever axis
//! has slack, and an incomplete last row is centered within the grid.

use gridmirror_core::Size;

use crate::GridConstants;

/// Solved grid geometry, in pixels relative to the grid box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub tile_width: f64,
    pub tile_height: f64,
    /// Horizontal centering of the whole grid
    pub offset_x: f64,
    /// Vertical centering of the whole grid
    pub offset_y: f64,
    /// Extra indent of an incomplete last row
    pub last_row_offset: f64,
}

impl GridLayout {
    /// Width of the tiles and gaps of one full row
    pub fn inner_width(&self, spacing: f64) -> f64 {
        self.tile_width * self.cols as f64 + spacing * (self.cols as f64 - 1.0)
    }

    /// Height of all rows and gaps
    pub fn inner_height(&self, spacing: f64) -> f64 {
        self.tile_height * self.rows as f64 + spacing * (self.rows as f64 - 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    rows: usize,
    cols: usize,
    tile_width: f64,
    tile_height: f64,
    /// Width was clamped by the aspect ratio
    wide: bool,
}

/// Solve the grid for `count` tiles in a `total_width` × `total_height` box.
///
/// Returns `None` when the box is empty, when `count` is zero, or when the
/// spacing alone exceeds the box so that no tile has positive extent.
pub fn solve(
    count: usize,
    total_width: f64,
    total_height: f64,
    spacing: f64,
    aspect: f64,
) -> Option<GridLayout> {
    if total_width <= 0.0 || total_height <= 0.0 || count == 0 {
        return None;
    }

    let mut best: Option<Candidate> = None;
    let mut min_cols = usize::MAX;

    for rows in 1..=count {
        let cols = count.div_ceil(rows);
        if cols >= min_cols {
            continue;
        }
        min_cols = cols;

        let mut tile_width = (total_width - spacing * (cols as f64 - 1.0)) / cols as f64;
        let tile_height = (total_height - spacing * (rows as f64 - 1.0)) / rows as f64;
        if tile_width <= 0.0 || tile_height <= 0.0 {
            continue;
        }

        let wide = tile_width / tile_height > aspect;
        if wide {
            tile_width = tile_height * aspect;
        }

        // Strictly greater: on an exact tie the first split enumerated (fewest rows) wins
        if best.map_or(true, |b| tile_width > b.tile_width) {
            best = Some(Candidate {
                rows,
                cols,
                tile_width,
                tile_height,
                wide,
            });
        }
    }

    let winner = best?;
    let Candidate {
        rows,
        cols,
        tile_width,
        wide,
        ..
    } = winner;
    let tile_height = if wide {
        winner.tile_height
    } else {
        tile_width / aspect
    };

    let inner_width = tile_width * cols as f64 + spacing * (cols as f64 - 1.0);
    let (offset_x, offset_y) = if wide {
        ((total_width - inner_width) / 2.0, 0.0)
    } else {
        let inner_height = tile_height * rows as f64 + spacing * (rows as f64 - 1.0);
        (0.0, (total_height - inner_height) / 2.0)
    };

    let rem = count % cols;
    let last_row_offset = if rem > 0 {
        (inner_width - (tile_width * rem as f64 + spacing * (rem as f64 - 1.0))) / 2.0
    } else {
        0.0
    };

    Some(GridLayout {
        rows,
        cols,
        tile_width,
        tile_height,
        offset_x,
        offset_y,
        last_row_offset,
    })
}

/// Solve for a capture source using the configured margins
pub fn solve_for_container(
    count: usize,
    container: Size,
    full_screen: bool,
    constants: &GridConstants,
) -> Option<GridLayout> {
    if container.is_empty() {
        return None;
    }
    let (width, height) = constants.grid_box(container, full_screen);
    solve(count, width, height, constants.spacing, constants.aspect)
}
