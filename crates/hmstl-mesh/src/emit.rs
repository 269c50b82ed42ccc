use std::io;

use hmstl_geom::Aabb;

use crate::facet::{Facet, GridVertex};

/// Destination for the facet stream.
///
/// Facets arrive strictly in emission order and are never revisited, so a
/// sink may write them straight through to a byte stream.
pub trait FacetSink {
    fn begin_solid(&mut self, _name: &str) -> io::Result<()> {
        Ok(())
    }

    fn push_facet(&mut self, facet: Facet) -> io::Result<()>;

    fn end_solid(&mut self, _name: &str) -> io::Result<()> {
        Ok(())
    }
}

impl FacetSink for Vec<Facet> {
    #[inline]
    fn push_facet(&mut self, facet: Facet) -> io::Result<()> {
        self.push(facet);
        Ok(())
    }
}

impl<S: FacetSink + ?Sized> FacetSink for &mut S {
    #[inline]
    fn begin_solid(&mut self, name: &str) -> io::Result<()> {
        (**self).begin_solid(name)
    }

    #[inline]
    fn push_facet(&mut self, facet: Facet) -> io::Result<()> {
        (**self).push_facet(facet)
    }

    #[inline]
    fn end_solid(&mut self, name: &str) -> io::Result<()> {
        (**self).end_solid(name)
    }
}

/// Pass-through sink that counts facets and tracks the bounds of every vertex.
pub struct Tally<S> {
    inner: S,
    facets: usize,
    bounds: Aabb,
}

impl<S: FacetSink> Tally<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            facets: 0,
            bounds: Aabb::EMPTY,
        }
    }

    #[inline]
    pub fn facets(&self) -> usize {
        self.facets
    }

    /// Bounds of all emitted vertices, `None` before the first facet.
    pub fn bounds(&self) -> Option<Aabb> {
        if self.bounds.is_empty() { None } else { Some(self.bounds) }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FacetSink> FacetSink for Tally<S> {
    fn begin_solid(&mut self, name: &str) -> io::Result<()> {
        self.inner.begin_solid(name)
    }

    fn push_facet(&mut self, facet: Facet) -> io::Result<()> {
        self.inner.push_facet(facet)?;
        self.facets += 1;
        for p in facet.v {
            self.bounds.include(p);
        }
        Ok(())
    }

    fn end_solid(&mut self, name: &str) -> io::Result<()> {
        self.inner.end_solid(name)
    }
}

/// Emits one triangle, flipping each raster row into output Y (`height - row`).
#[inline]
pub fn emit_triangle(
    sink: &mut impl FacetSink,
    height: u32,
    a: GridVertex,
    b: GridVertex,
    c: GridVertex,
) -> io::Result<()> {
    sink.push_facet(Facet::new(
        a.to_output(height),
        b.to_output(height),
        c.to_output(height),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmstl_geom::Vec3;

    struct FailingSink;

    impl FacetSink for FailingSink {
        fn push_facet(&mut self, _facet: Facet) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::WriteZero, "sink full"))
        }
    }

    #[test]
    fn emit_flips_y_against_height() {
        let mut out: Vec<Facet> = Vec::new();
        emit_triangle(
            &mut out,
            5,
            GridVertex::new(0, 0, 1.0),
            GridVertex::new(0, 4, 2.0),
            GridVertex::new(3, 4, 3.0),
        )
        .unwrap();
        assert_eq!(
            out,
            vec![Facet::new(
                Vec3::new(0.0, 5.0, 1.0),
                Vec3::new(0.0, 1.0, 2.0),
                Vec3::new(3.0, 1.0, 3.0),
            )]
        );
    }

    #[test]
    fn write_failure_propagates() {
        let v = GridVertex::new(0, 0, 0.0);
        let err = emit_triangle(&mut FailingSink, 1, v, v, v).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn tally_counts_and_bounds() {
        let mut tally = Tally::new(Vec::<Facet>::new());
        assert_eq!(tally.bounds(), None);
        emit_triangle(
            &mut tally,
            2,
            GridVertex::new(0, 0, 1.0),
            GridVertex::new(1, 1, 0.0),
            GridVertex::new(1, 0, 4.0),
        )
        .unwrap();
        assert_eq!(tally.facets(), 1);
        let bb = tally.bounds().unwrap();
        assert_eq!(bb.min, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(bb.max, Vec3::new(1.0, 2.0, 4.0));
        assert_eq!(tally.into_inner().len(), 1);
    }
}
