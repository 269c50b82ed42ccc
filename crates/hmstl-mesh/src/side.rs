use hmstl_geom::Vec3;

/// One border of the grid footprint.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Row 0.
    North,
    /// Row `height - 1`.
    South,
    /// Column 0.
    West,
    /// Column `width - 1`.
    East,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

    /// Outward step `(dx, drow)` in raster coordinates.
    #[inline]
    pub fn outward(self) -> (i32, i32) {
        match self {
            Side::North => (0, -1),
            Side::South => (0, 1),
            Side::West => (-1, 0),
            Side::East => (1, 0),
        }
    }

    /// Outward unit normal in output coordinates, where rows are flipped.
    #[inline]
    pub fn outward_normal(self) -> Vec3 {
        let (dx, drow) = self.outward();
        Vec3::new(dx as f32, -drow as f32, 0.0)
    }

    /// Grid points along this border in raster order. Empty for an empty grid.
    pub fn border(self, width: u32, height: u32) -> Box<dyn Iterator<Item = (u32, u32)>> {
        if width == 0 || height == 0 {
            return Box::new(std::iter::empty());
        }
        let bottom = height - 1;
        let right = width - 1;
        match self {
            Side::North => Box::new((0..width).map(|x| (x, 0))),
            Side::South => Box::new((0..width).map(move |x| (x, bottom))),
            Side::West => Box::new((0..height).map(|y| (0, y))),
            Side::East => Box::new((0..height).map(move |y| (right, y))),
        }
    }

    /// Number of wall segments along this border.
    #[inline]
    pub fn segments(self, width: u32, height: u32) -> u32 {
        match self {
            Side::North | Side::South => width.saturating_sub(1),
            Side::West | Side::East => height.saturating_sub(1),
        }
    }
}
