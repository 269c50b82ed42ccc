use hmstl_geom::Vec3;

/// Vertex in raster coordinates: column `x`, raster `row` (top-down) and an
/// already mapped `z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridVertex {
    pub x: u32,
    pub row: u32,
    pub z: f32,
}

impl GridVertex {
    #[inline]
    pub const fn new(x: u32, row: u32, z: f32) -> Self {
        Self { x, row, z }
    }

    /// Same column and row, pinned to the base plane.
    #[inline]
    pub const fn floor(self) -> Self {
        Self {
            x: self.x,
            row: self.row,
            z: 0.0,
        }
    }

    /// Output-space position; rows are flipped so that Y grows upward.
    #[inline]
    pub fn to_output(self, height: u32) -> Vec3 {
        Vec3::new(self.x as f32, height as f32 - self.row as f32, self.z)
    }
}

/// One output triangle. The written normal is always zero; orientation is
/// carried only by the winding of `v`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Facet {
    pub v: [Vec3; 3],
}

impl Facet {
    #[inline]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { v: [a, b, c] }
    }

    /// Unnormalized right-handed normal implied by the winding.
    #[inline]
    pub fn winding_normal(&self) -> Vec3 {
        let [a, b, c] = self.v;
        (b - a).cross(c - a)
    }

    /// True when all three vertices sit at `z`.
    pub fn is_flat_at(&self, z: f32) -> bool {
        self.v.iter().all(|p| p.z == z)
    }
}
