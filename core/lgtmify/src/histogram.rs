use crate::grid::OccupancyGrid;

/// Per-row skylines of the occupancy grid.
///
/// `row(y)[x]` is the number of consecutive free cells in column `x` that end
/// at row `y` (inclusive); a blocked cell resets the count to zero.
#[derive(Debug, Clone)]
pub struct Histograms {
    width: usize,
    runs: Vec<u32>,
}

impl Histograms {
    pub fn build(grid: &OccupancyGrid) -> Self {
        let width = grid.width() as usize;
        let mut runs = vec![0u32; width * grid.height() as usize];
        for y in 0..grid.height() {
            let row = y as usize * width;
            for x in 0..grid.width() {
                let i = row + x as usize;
                if grid.is_free(x, y) {
                    runs[i] = if y == 0 { 1 } else { runs[i - width] + 1 };
                }
            }
        }
        Self { width, runs }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.runs.len() / self.width
        }
    }

    pub fn row(&self, y: usize) -> &[u32] {
        &self.runs[y * self.width..(y + 1) * self.width]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks_exact panics on 0
        self.runs.chunks_exact(self.width.max(1))
    }
}
