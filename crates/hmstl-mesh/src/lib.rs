//! Heightmap-to-solid mesher: top surface, side walls and base cap streamed
//! as a single facet sequence.
#![forbid(unsafe_code)]

use std::io;

use hmstl_grid::{GridError, SampleGrid};
use thiserror::Error;

mod base;
mod emit;
mod facet;
mod side;
mod surface;
mod walls;
mod zmap;

pub use base::emit_base;
pub use emit::{FacetSink, Tally, emit_triangle};
pub use facet::{Facet, GridVertex};
pub use side::Side;
pub use surface::emit_surface;
pub use walls::{emit_wall_segment, emit_walls};
pub use zmap::{ConfigError, DEFAULT_OFFSET, DEFAULT_SCALE, MIN_OFFSET, ZMapping};

pub const DEFAULT_SOLID_NAME: &str = "mymesh";

#[derive(Debug, Error)]
pub enum MeshError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to write facet stream: {0}")]
    Io(#[from] io::Error),
}

/// Immutable parameters of one conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct SolidOptions {
    pub zmap: ZMapping,
    name: String,
}

impl SolidOptions {
    pub fn new(zmap: ZMapping, name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidName(name));
        }
        Ok(SolidOptions { zmap, name })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for SolidOptions {
    fn default() -> Self {
        SolidOptions {
            zmap: ZMapping::default(),
            name: DEFAULT_SOLID_NAME.to_string(),
        }
    }
}

/// Facet count `assemble_solid` produces for a `width` x `height` grid.
pub fn expected_facets(width: u32, height: u32) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    let (w1, h1) = (width as usize - 1, height as usize - 1);
    2 * w1 * h1 + 4 * w1 + 4 * h1 + 2
}

/// Streams the closed solid into `sink`: header, surface, walls, base, footer.
///
/// Nothing is buffered. If a write fails midway the facets already pushed stay
/// in the sink. Returns the number of facets emitted.
pub fn assemble_solid(
    sink: &mut impl FacetSink,
    grid: &SampleGrid,
    opts: &SolidOptions,
) -> Result<usize, MeshError> {
    if grid.is_empty() {
        return Err(MeshError::Grid(GridError::Empty));
    }
    let zmap = &opts.zmap;
    sink.begin_solid(opts.name())?;
    let surface = emit_surface(sink, grid, zmap)?;
    log::debug!("surface: {} facets", surface);
    let walls = emit_walls(sink, grid, zmap)?;
    log::debug!("walls: {} facets", walls);
    let base = emit_base(sink, grid)?;
    log::debug!("base: {} facets", base);
    sink.end_solid(opts.name())?;
    Ok(surface + walls + base)
}
