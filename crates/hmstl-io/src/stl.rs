//! ASCII STL output.
//!
//! ```text
//! solid name
//! facet normal 0 0 0
//! outer loop
//! vertex v1x v1y v1z
//! vertex v2x v2y v2z
//! vertex v3x v3y v3z
//! endloop
//! endfacet
//! ...
//! endsolid name
//! ```
//!
//! Normals are always written as zero; orientation lives in the vertex
//! winding.

use std::io::{self, Write};

use hmstl_geom::Vec3;
use hmstl_grid::SampleGrid;
use hmstl_mesh::{Facet, FacetSink, MeshError, SolidOptions, assemble_solid};

/// Streams facets as ASCII STL text.
pub struct StlWriter<W: Write> {
    out: W,
}

impl<W: Write> StlWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn vertex(&mut self, p: Vec3) -> io::Result<()> {
        writeln!(self.out, "vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z)
    }
}

impl<W: Write> FacetSink for StlWriter<W> {
    fn begin_solid(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "solid {name}")
    }

    fn push_facet(&mut self, facet: Facet) -> io::Result<()> {
        self.out.write_all(b"facet normal 0 0 0\nouter loop\n")?;
        for p in facet.v {
            self.vertex(p)?;
        }
        self.out.write_all(b"endloop\nendfacet\n")
    }

    fn end_solid(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "endsolid {name}")
    }
}

/// Writes the closed solid for `grid` to `out` as ASCII STL and flushes.
///
/// Returns the number of facets written.
pub fn write_stl<W: Write>(
    out: W,
    grid: &SampleGrid,
    opts: &SolidOptions,
) -> Result<usize, MeshError> {
    let mut writer = StlWriter::new(out);
    let n = assemble_solid(&mut writer, grid, opts)?;
    writer.finish()?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_record_layout() {
        let mut w = StlWriter::new(Vec::new());
        w.begin_solid("t").unwrap();
        w.push_facet(Facet::new(
            Vec3::new(0.0, 2.0, 1.0),
            Vec3::new(0.0, 1.0, 256.0),
            Vec3::new(1.0, 2.0, 0.5),
        ))
        .unwrap();
        w.end_solid("t").unwrap();
        let text = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(
            text,
            "solid t\n\
             facet normal 0 0 0\n\
             outer loop\n\
             vertex 0.000000 2.000000 1.000000\n\
             vertex 0.000000 1.000000 256.000000\n\
             vertex 1.000000 2.000000 0.500000\n\
             endloop\n\
             endfacet\n\
             endsolid t\n"
        );
    }
}
