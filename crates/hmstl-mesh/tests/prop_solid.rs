use std::collections::HashMap;

use hmstl_geom::Vec3;
use hmstl_grid::SampleGrid;
use hmstl_mesh::{
    Facet, Side, SolidOptions, ZMapping, assemble_solid, emit_base, emit_surface, emit_walls,
    expected_facets,
};
use proptest::prelude::*;

fn dim() -> impl Strategy<Value = u32> {
    1u32..=9
}

fn arb_grid() -> impl Strategy<Value = SampleGrid> {
    (dim(), dim()).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<u8>(), (w * h) as usize)
            .prop_map(move |samples| SampleGrid::new(w, h, samples).unwrap())
    })
}

fn arb_zmap() -> impl Strategy<Value = ZMapping> {
    (0.01f32..16.0, 1.0f32..32.0).prop_map(|(s, o)| ZMapping::new(s, o).unwrap())
}

type Key = (u32, u32, u32);

fn key(p: Vec3) -> Key {
    (p.x.to_bits(), p.y.to_bits(), p.z.to_bits())
}

/// Directed edge multiset of a facet list.
fn directed_edges(facets: &[Facet]) -> HashMap<(Key, Key), i32> {
    let mut edges = HashMap::new();
    for f in facets {
        for i in 0..3 {
            let a = key(f.v[i]);
            let b = key(f.v[(i + 1) % 3]);
            *edges.entry((a, b)).or_insert(0) += 1;
        }
    }
    edges
}

proptest! {
    #[test]
    fn surface_count(grid in arb_grid(), zmap in arb_zmap()) {
        let mut out: Vec<Facet> = Vec::new();
        let n = emit_surface(&mut out, &grid, &zmap).unwrap();
        let (w, h) = (grid.width() as usize, grid.height() as usize);
        prop_assert_eq!(n, 2 * (w - 1) * (h - 1));
        prop_assert_eq!(out.len(), n);
    }

    #[test]
    fn wall_count(grid in arb_grid(), zmap in arb_zmap()) {
        let mut out: Vec<Facet> = Vec::new();
        let n = emit_walls(&mut out, &grid, &zmap).unwrap();
        let (w, h) = (grid.width() as usize, grid.height() as usize);
        prop_assert_eq!(n, 4 * (w - 1) + 4 * (h - 1));
        prop_assert_eq!(out.len(), n);
    }

    #[test]
    fn base_is_two_facets_on_floor(grid in arb_grid()) {
        let mut out: Vec<Facet> = Vec::new();
        prop_assert_eq!(emit_base(&mut out, &grid).unwrap(), 2);
        let (w, h) = (grid.width() as f32, grid.height() as f32);
        for f in &out {
            prop_assert!(f.is_flat_at(0.0));
            for p in f.v {
                prop_assert!(p.x == 0.0 || p.x == w - 1.0);
                prop_assert!(p.y == h || p.y == 1.0);
            }
        }
    }

    #[test]
    fn total_count(grid in arb_grid(), zmap in arb_zmap()) {
        let opts = SolidOptions::new(zmap, "prop").unwrap();
        let mut out: Vec<Facet> = Vec::new();
        let n = assemble_solid(&mut out, &grid, &opts).unwrap();
        prop_assert_eq!(n, expected_facets(grid.width(), grid.height()));
        prop_assert_eq!(out.len(), n);
    }

    #[test]
    fn z_is_monotonic_in_sample(zmap in arb_zmap()) {
        let mut prev = zmap.z(0);
        prop_assert!(prev >= 1.0);
        for s in 1..=255u8 {
            let z = zmap.z(s);
            prop_assert!(z >= prev);
            prev = z;
        }
    }

    // Every output Y is height - row for some row, i.e. in [1, height]
    #[test]
    fn y_stays_in_flipped_range(grid in arb_grid(), zmap in arb_zmap()) {
        let mut out: Vec<Facet> = Vec::new();
        assemble_solid(&mut out, &grid, &SolidOptions::new(zmap, "y").unwrap()).unwrap();
        let h = grid.height() as f32;
        for f in &out {
            for p in f.v {
                prop_assert!(p.y >= 1.0 && p.y <= h);
                prop_assert_eq!(p.y.fract(), 0.0);
            }
        }
    }

    // Surface faces up; walls face away from the footprint
    #[test]
    fn winding_faces_outward(grid in arb_grid(), zmap in arb_zmap()) {
        let mut surface: Vec<Facet> = Vec::new();
        emit_surface(&mut surface, &grid, &zmap).unwrap();
        for f in &surface {
            prop_assert!(f.winding_normal().z > 0.0);
        }

        let mut walls: Vec<Facet> = Vec::new();
        emit_walls(&mut walls, &grid, &zmap).unwrap();
        let (w, h) = (grid.width(), grid.height());
        let mut offset = 0;
        for side in Side::ALL {
            let n = 2 * side.segments(w, h) as usize;
            for f in &walls[offset..offset + n] {
                prop_assert!(f.winding_normal().dot(side.outward_normal()) > 0.0);
            }
            offset += n;
        }
        prop_assert_eq!(offset, walls.len());
    }

    // Surface and walls share every raised edge with an opposite-direction twin
    #[test]
    fn raised_edges_are_paired(grid in arb_grid(), zmap in arb_zmap()) {
        let mut out: Vec<Facet> = Vec::new();
        emit_surface(&mut out, &grid, &zmap).unwrap();
        emit_walls(&mut out, &grid, &zmap).unwrap();
        let edges = directed_edges(&out);
        let zero = 0.0f32.to_bits();
        for (&(a, b), &count) in &edges {
            if a.2 == zero || b.2 == zero {
                continue;
            }
            prop_assert_eq!(edges.get(&(b, a)).copied(), Some(count));
        }
    }
}

#[test]
fn two_by_two_scenario() {
    let grid = SampleGrid::new(2, 2, vec![0, 255, 255, 0]).unwrap();
    let opts = SolidOptions::default();
    let mut out: Vec<Facet> = Vec::new();
    let n = assemble_solid(&mut out, &grid, &opts).unwrap();
    assert_eq!(n, 12);

    let z_of = |f: &Facet| f.v.map(|p| p.z);
    assert_eq!(z_of(&out[0]), [1.0, 256.0, 256.0]);
    assert_eq!(z_of(&out[1]), [256.0, 1.0, 256.0]);

    let walls = &out[2..10];
    assert_eq!(walls.len(), 8);
    assert!(walls.iter().all(|f| f.v.iter().any(|p| p.z == 0.0)));

    let base = &out[10..];
    assert!(base.iter().all(|f| f.is_flat_at(0.0)));
    let mut corners: Vec<(f32, f32)> = base
        .iter()
        .flat_map(|f| f.v)
        .map(|p| (p.x, p.y))
        .collect();
    corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
    corners.dedup();
    // raster (0,0),(1,0),(0,1),(1,1) after the row flip
    assert_eq!(corners, vec![(0.0, 1.0), (0.0, 2.0), (1.0, 1.0), (1.0, 2.0)]);
}

#[test]
fn two_by_two_is_closed() {
    let grid = SampleGrid::new(2, 2, vec![3, 90, 17, 250]).unwrap();
    let mut out: Vec<Facet> = Vec::new();
    assemble_solid(&mut out, &grid, &SolidOptions::default()).unwrap();
    let edges = directed_edges(&out);
    for (&(a, b), &count) in &edges {
        assert_eq!(edges.get(&(b, a)).copied(), Some(count), "unpaired edge");
    }
}

#[test]
fn row_flip_extremes() {
    let grid = SampleGrid::from_fn(3, 4, |x, y| (x + y) as u8);
    let mut out: Vec<Facet> = Vec::new();
    emit_surface(&mut out, &grid, &ZMapping::default()).unwrap();
    // First cell: A is raster row 0, B is raster row 1
    assert_eq!(out[0].v[0].y, 4.0);
    assert_eq!(out[0].v[1].y, 3.0);
    // Last cell's C sits on raster row height-1
    let last = out.last().unwrap();
    assert_eq!(last.v[1].y, 1.0);
}
