use std::io;

use hmstl_grid::SampleGrid;

use crate::emit::{FacetSink, emit_triangle};
use crate::facet::GridVertex;
use crate::zmap::ZMapping;

/// Emits the top surface: two triangles per grid cell.
///
/// For the cell whose top-left sample is A:
///
/// ```text
/// A-D
/// |/|
/// B-C
/// ```
///
/// the quad is split into ABD and BCD. Both wind the same way, so the shared
/// B-D edge runs in opposite directions. Returns the number of facets emitted,
/// `2 * (width - 1) * (height - 1)`.
pub fn emit_surface(
    sink: &mut impl FacetSink,
    grid: &SampleGrid,
    zmap: &ZMapping,
) -> io::Result<usize> {
    let (w, h) = (grid.width(), grid.height());
    if grid.is_empty() {
        return Ok(0);
    }
    let vertex = |x: u32, row: u32| GridVertex::new(x, row, zmap.z(grid.sample(x, row)));
    let mut emitted = 0;
    for row in 0..h - 1 {
        for col in 0..w - 1 {
            let a = vertex(col, row);
            let b = vertex(col, row + 1);
            let c = vertex(col + 1, row + 1);
            let d = vertex(col + 1, row);
            emit_triangle(sink, h, a, b, d)?;
            emit_triangle(sink, h, b, c, d)?;
            emitted += 2;
        }
    }
    Ok(emitted)
}
