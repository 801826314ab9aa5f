//! Print the occupancy grid and chosen caption area for a few face layouts.
//!
//! Usage:
//!   cargo run --example debug_placement

use lgtmify::grid::OccupancyGrid;
use lgtmify::{caption_box, find_placement, BlockedRegion, GlyphMetrics};

fn main() {
    let scenarios: [(&str, u32, u32, Vec<BlockedRegion>); 4] = [
        ("no faces", 40, 20, vec![]),
        ("centered face", 40, 40, vec![BlockedRegion::new(16, 24, 16, 24)]),
        ("face band", 40, 30, vec![BlockedRegion::new(0, 40, 8, 12)]),
        (
            "two faces",
            48,
            32,
            vec![
                BlockedRegion::new(6, 14, 4, 12),
                BlockedRegion::new(30, 40, 14, 26),
            ],
        ),
    ];

    for (name, width, height, regions) in &scenarios {
        let grid = OccupancyGrid::build(*width, *height, regions);
        let rect = find_placement(*width, *height, regions);
        let caption = caption_box(&rect, *width, *height, &GlyphMetrics::LGTM);

        println!("=== {name} ({width}x{height}) ===");
        for y in 0..*height {
            let line: String = (0..*width)
                .map(|x| {
                    let inside = (rect.minx..rect.maxx).contains(&x)
                        && (rect.miny..rect.maxy).contains(&y);
                    match (grid.is_free(x, y), inside) {
                        (false, _) => '#',
                        (true, true) => '+',
                        (true, false) => '.',
                    }
                })
                .collect();
            println!("  {line}");
        }
        println!(
            "  → free rect x {}..{}, y {}..{} ({}x{}, area {})",
            rect.minx, rect.maxx, rect.miny, rect.maxy, rect.width, rect.height, rect.area
        );
        println!(
            "  → caption at ({:.1}, {:.1}) size {:.1}x{:.1}, font {:.2}",
            caption.offset_x, caption.offset_y, caption.width, caption.height, caption.font_size
        );
        println!();
    }
}
