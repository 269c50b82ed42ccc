use std::io;

use hmstl_grid::SampleGrid;

use crate::emit::{FacetSink, emit_triangle};
use crate::facet::GridVertex;
use crate::side::Side;
use crate::zmap::ZMapping;

/// Emits one vertical wall quad between two adjacent border samples.
///
/// `p0` and `p1` carry surface Z; the quad's bottom edge is pinned to Z=0.
/// The endpoints are reordered so the right-hand side of the travel
/// direction (in output coordinates) is `side`'s outward direction. The two
/// triangles share the bottom0-top1 diagonal.
pub fn emit_wall_segment(
    sink: &mut impl FacetSink,
    height: u32,
    side: Side,
    p0: GridVertex,
    p1: GridVertex,
) -> io::Result<()> {
    let dx = p1.x as i64 - p0.x as i64;
    // Output Y runs against raster rows.
    let dy = -(p1.row as i64 - p0.row as i64);
    let (ox, orow) = side.outward();
    let (ox, oy) = (ox as i64, -(orow as i64));
    // Right-hand normal of travel direction (dx, dy) is (dy, -dx).
    let (top0, top1) = if dy * ox - dx * oy < 0 { (p1, p0) } else { (p0, p1) };
    let (bot0, bot1) = (top0.floor(), top1.floor());
    emit_triangle(sink, height, top0, bot0, top1)?;
    emit_triangle(sink, height, bot0, bot1, top1)
}

/// Emits walls along all four borders, dropping each border sample's surface
/// down to Z=0. Returns the facet count, `4 * (width - 1) + 4 * (height - 1)`.
pub fn emit_walls(
    sink: &mut impl FacetSink,
    grid: &SampleGrid,
    zmap: &ZMapping,
) -> io::Result<usize> {
    let mut emitted = 0;
    for side in Side::ALL {
        emitted += emit_side(sink, grid, zmap, side)?;
    }
    Ok(emitted)
}

fn emit_side(
    sink: &mut impl FacetSink,
    grid: &SampleGrid,
    zmap: &ZMapping,
    side: Side,
) -> io::Result<usize> {
    let h = grid.height();
    let mut emitted = 0;
    let mut prev: Option<GridVertex> = None;
    for (x, row) in side.border(grid.width(), h) {
        let cur = GridVertex::new(x, row, zmap.z(grid.sample(x, row)));
        if let Some(p0) = prev {
            emit_wall_segment(sink, h, side, p0, cur)?;
            emitted += 2;
        }
        prev = Some(cur);
    }
    Ok(emitted)
}
