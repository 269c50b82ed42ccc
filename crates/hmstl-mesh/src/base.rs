use std::io;

use hmstl_grid::SampleGrid;

use crate::emit::{FacetSink, emit_triangle};
use crate::facet::GridVertex;

/// Closes the bottom with two Z=0 triangles over the full footprint, facing
/// down.
///
/// Wall bottoms meet these two large triangles at T-junctions, so the result
/// is not strictly manifold along the border.
pub fn emit_base(sink: &mut impl FacetSink, grid: &SampleGrid) -> io::Result<usize> {
    if grid.is_empty() {
        return Ok(0);
    }
    let h = grid.height();
    let right = grid.width() - 1;
    let bottom = h - 1;
    let nw = GridVertex::new(0, 0, 0.0);
    let ne = GridVertex::new(right, 0, 0.0);
    let sw = GridVertex::new(0, bottom, 0.0);
    let se = GridVertex::new(right, bottom, 0.0);
    emit_triangle(sink, h, nw, ne, sw)?;
    emit_triangle(sink, h, ne, se, sw)?;
    Ok(2)
}
