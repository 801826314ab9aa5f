//! Search for the largest free landscape rectangle.
//!
//! Every row of [`Histograms`] is a skyline; the largest rectangle sitting on
//! that row is found with the monotonic-stack "largest rectangle in a
//! histogram" scan, and the best row wins. Total cost is `O(width × height)`.

use log::debug;

use crate::geometry::{BlockedRegion, FreeRect};
use crate::grid::OccupancyGrid;
use crate::histogram::Histograms;

#[derive(Debug, Clone, Copy)]
struct Bar {
    height: u32,
    pos: u32,
}

/// Largest landscape rectangle whose bottom edge lies on row `row_no` (1-based).
///
/// `row` holds the free-run lengths of that row, one per column. A trailing
/// zero bar is implied so that everything left on the stack gets flushed.
/// A bar taller than its span is clipped to a square, so the result always
/// has `width >= height`. Ties keep the first rectangle found.
pub fn largest_in_row(row_no: u32, row: &[u32]) -> FreeRect {
    let mut stack: Vec<Bar> = Vec::with_capacity(row.len());
    let mut best = FreeRect::EMPTY;

    let bars = row.iter().copied().chain(std::iter::once(0));
    for (index, height) in bars.enumerate() {
        let index = index as u32;
        debug_assert!(height <= row_no, "run {height} exceeds row {row_no}");

        match stack.last().copied() {
            None => stack.push(Bar { height, pos: index }),
            Some(top) if top.height < height => stack.push(Bar { height, pos: index }),
            Some(_) => {
                let mut left = index;
                while let Some(&pre) = stack.last() {
                    if pre.height < height {
                        break;
                    }
                    stack.pop();

                    let span = index - pre.pos;
                    let clipped = pre.height.min(span);
                    if span as u64 * clipped as u64 > best.area {
                        best = FreeRect::from_bottom(pre.pos, index, row_no, clipped);
                    }
                    left = pre.pos;
                }
                stack.push(Bar { height, pos: left });
            }
        }
    }

    best
}

/// Largest free rectangle with `width >= height` across all rows.
///
/// Returns [`FreeRect::EMPTY`] when there are no rows or every cell is
/// blocked. When rows tie on area, the lower one wins.
pub fn largest_free_rect(histograms: &Histograms) -> FreeRect {
    if histograms.is_empty() {
        return FreeRect::EMPTY;
    }

    let mut best = FreeRect::EMPTY;
    for (y, row) in histograms.rows().enumerate() {
        let candidate = largest_in_row(y as u32 + 1, row);
        if !candidate.is_landscape() {
            continue;
        }
        if candidate.area >= best.area {
            best = candidate;
        }
    }
    best
}

/// Build the grid and histograms for a canvas and find the caption area.
pub fn find_placement(width: u32, height: u32, regions: &[BlockedRegion]) -> FreeRect {
    let grid = OccupancyGrid::build(width, height, regions);
    let histograms = Histograms::build(&grid);
    drop(grid);

    let rect = largest_free_rect(&histograms);
    debug!(
        "placement on {width}x{height} with {} blocked region(s): x {}..{}, y {}..{} (area {})",
        regions.len(),
        rect.minx,
        rect.maxx,
        rect.miny,
        rect.maxy,
        rect.area
    );
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Area of the largest all-free landscape rectangle, by exhaustive search.
    fn brute_force_best_area(grid: &OccupancyGrid) -> u64 {
        let (w, h) = (grid.width(), grid.height());
        let mut best = 0;
        for miny in 0..h {
            for maxy in miny + 1..=h {
                for minx in 0..w {
                    for maxx in minx + 1..=w {
                        let rect = FreeRect {
                            minx,
                            maxx,
                            miny,
                            maxy,
                            width: maxx - minx,
                            height: maxy - miny,
                            area: (maxx - minx) as u64 * (maxy - miny) as u64,
                        };
                        if rect.is_landscape() && rect.area > best && grid.is_region_free(&rect) {
                            best = rect.area;
                        }
                    }
                }
            }
        }
        best
    }

    #[test]
    fn row_with_single_step() {
        // Skyline 2 2 1: the 2×2 block beats the 3×1 strip.
        let rect = largest_in_row(2, &[2, 2, 1]);
        assert_eq!(rect.area, 4);
        assert_eq!((rect.minx, rect.maxx, rect.miny, rect.maxy), (0, 2, 0, 2));
    }

    #[test]
    fn row_classic_skyline() {
        // Unconstrained best is columns 2..4 at height 5, which is tall;
        // the best landscape one is columns 2..6 at height 2.
        let rect = largest_in_row(6, &[2, 1, 5, 6, 2, 3]);
        assert_eq!(rect.area, 8);
        assert_eq!((rect.minx, rect.maxx), (2, 6));
        assert_eq!((rect.width, rect.height), (4, 2));
        assert_eq!((rect.miny, rect.maxy), (4, 6));
    }

    #[test]
    fn row_tall_bar_is_clipped_to_square() {
        let rect = largest_in_row(9, &[0, 9, 0]);
        assert_eq!((rect.width, rect.height, rect.area), (1, 1, 1));
        assert_eq!((rect.minx, rect.miny, rect.maxy), (1, 8, 9));
    }

    #[test]
    fn row_all_blocked() {
        assert_eq!(largest_in_row(3, &[0, 0, 0]), FreeRect::EMPTY);
        assert_eq!(largest_in_row(1, &[]), FreeRect::EMPTY);
    }

    #[test]
    fn row_equal_heights_merge() {
        let rect = largest_in_row(3, &[3, 3, 3, 3]);
        assert_eq!((rect.minx, rect.maxx, rect.height), (0, 4, 3));
        assert_eq!(rect.area, 12);
    }

    #[test]
    fn no_regions_yields_full_canvas() {
        let rect = find_placement(100, 50, &[]);
        assert_eq!(rect, FreeRect::full_canvas(100, 50));
    }

    #[test]
    fn no_regions_square_canvas() {
        assert_eq!(find_placement(9, 9, &[]), FreeRect::full_canvas(9, 9));
    }

    #[test]
    fn tall_canvas_yields_lowest_square() {
        let rect = find_placement(5, 12, &[]);
        assert_eq!((rect.width, rect.height), (5, 5));
        assert_eq!((rect.miny, rect.maxy), (7, 12));
    }

    #[test]
    fn centered_face_picks_lower_band() {
        // Offsets 40..=60 block zero-based rows/cols 39..=59; 40 rows remain below.
        let rect = find_placement(100, 100, &[BlockedRegion::new(40, 60, 40, 60)]);
        assert_eq!(rect.area, 4000);
        assert_eq!((rect.minx, rect.maxx, rect.miny, rect.maxy), (0, 100, 60, 100));
        assert!(rect.is_landscape());
    }

    #[test]
    fn full_width_band_picks_larger_strip() {
        // Blocks zero-based rows 19..=29: 19 rows above, 50 rows below.
        let rect = find_placement(120, 80, &[BlockedRegion::new(0, 120, 20, 30)]);
        assert_eq!((rect.minx, rect.maxx, rect.miny, rect.maxy), (0, 120, 30, 80));

        // Band low in the image: the upper strip is larger.
        let rect = find_placement(120, 80, &[BlockedRegion::new(0, 120, 60, 70)]);
        assert_eq!((rect.minx, rect.maxx, rect.miny, rect.maxy), (0, 120, 0, 59));
    }

    #[test]
    fn fully_blocked_canvas_is_empty() {
        let rect = find_placement(10, 10, &[BlockedRegion::new(0, 10, 0, 10)]);
        assert!(rect.is_empty());
    }

    #[test]
    fn empty_histograms() {
        let h = Histograms::build(&OccupancyGrid::build(0, 0, &[]));
        assert_eq!(largest_free_rect(&h), FreeRect::EMPTY);
    }

    #[test]
    fn matches_brute_force_on_small_grids() {
        let layouts: &[&[BlockedRegion]] = &[
            &[BlockedRegion::new(3, 5, 3, 5)],
            &[BlockedRegion::new(1, 1, 1, 10)],
            &[BlockedRegion::new(0, 10, 5, 5)],
            &[BlockedRegion::new(2, 3, 1, 2), BlockedRegion::new(7, 9, 6, 8)],
            &[BlockedRegion::new(1, 4, 1, 4), BlockedRegion::new(6, 10, 2, 3)],
            &[BlockedRegion::new(5, 5, 1, 10), BlockedRegion::new(1, 10, 8, 8)],
        ];
        for regions in layouts {
            let grid = OccupancyGrid::build(10, 10, regions);
            let rect = largest_free_rect(&Histograms::build(&grid));
            assert!(grid.is_region_free(&rect), "{regions:?}: {rect:?} not free");
            assert!(rect.is_landscape());
            assert_eq!(rect.area, brute_force_best_area(&grid), "{regions:?}");
        }
    }
}
