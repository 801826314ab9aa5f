use crate::geometry::{BlockedRegion, FreeRect};

/// State of one pixel in the occupancy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Inside at least one blocked region.
    Blocked,
    /// Available for the caption.
    Free,
}

/// Row-major `height × width` map of blocked and free pixels.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl OccupancyGrid {
    /// Mark every pixel covered by any of `regions` as [`Cell::Blocked`].
    pub fn build(width: u32, height: u32, regions: &[BlockedRegion]) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let blocked = regions.iter().any(|r| r.covers(x, y));
                cells.push(if blocked { Cell::Blocked } else { Cell::Free });
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at zero-based `(x, y)`. Panics when out of range.
    #[inline]
    pub fn cell(&self, x: u32, y: u32) -> Cell {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of range");
        self.cells[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn is_free(&self, x: u32, y: u32) -> bool {
        self.cell(x, y) == Cell::Free
    }

    /// Whether every cell of `rect` is free.
    pub fn is_region_free(&self, rect: &FreeRect) -> bool {
        (rect.miny..rect.maxy).all(|y| (rect.minx..rect.maxx).all(|x| self.is_free(x, y)))
    }
}
