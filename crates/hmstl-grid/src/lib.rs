//! Heightmap sample buffer and single-pass statistics.
#![forbid(unsafe_code)]

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No samples are loaded (zero width, zero height or no data).
    #[error("heightmap is empty")]
    Empty,

    #[error("sample count {len} does not match {width}x{height} grid")]
    DimensionMismatch { width: u32, height: u32, len: usize },
}

/// Row-major grid of 8-bit height samples.
///
/// The buffer is owned and never mutated after construction; `samples.len()`
/// always equals `width * height`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl SampleGrid {
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, GridError> {
        let expect = width as usize * height as usize;
        if samples.len() != expect {
            return Err(GridError::DimensionMismatch {
                width,
                height,
                len: samples.len(),
            });
        }
        Ok(SampleGrid {
            width,
            height,
            samples,
        })
    }

    /// Grid with nothing loaded.
    pub fn empty() -> Self {
        SampleGrid::default()
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        SampleGrid {
            width,
            height,
            samples,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples, `width * height`.
    #[inline]
    pub fn size(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Linear offset of `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|i| self.samples[i])
    }

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` lies outside the grid.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> u8 {
        match self.index(x, y) {
            Some(i) => self.samples[i],
            None => panic!("sample ({x}, {y}) outside {}x{} grid", self.width, self.height),
        }
    }
}

/// Min/max/range over every sample of a non-empty grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridStatistics {
    pub min: u8,
    pub max: u8,
    pub range: u8,
}

/// Scans the grid once and returns its sample bounds.
pub fn compute_statistics(grid: &SampleGrid) -> Result<GridStatistics, GridError> {
    if grid.is_empty() {
        return Err(GridError::Empty);
    }
    // Seeds sit outside the u8 range so the first sample always wins.
    let mut min: u16 = u16::from(u8::MAX) + 1;
    let mut max: i16 = -1;
    for &s in grid.samples() {
        min = min.min(u16::from(s));
        max = max.max(i16::from(s));
    }
    let min = min as u8;
    let max = max as u8;
    Ok(GridStatistics {
        min,
        max,
        range: max - min,
    })
}

/// Report block written in verbose mode.
pub struct GridReport<'a> {
    pub grid: &'a SampleGrid,
    pub stats: GridStatistics,
}

impl fmt::Display for GridReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Width: {}", self.grid.width())?;
        writeln!(f, "Height: {}", self.grid.height())?;
        writeln!(f, "Size: {}", self.grid.size())?;
        writeln!(f, "Min: {}", self.stats.min)?;
        writeln!(f, "Max: {}", self.stats.max)?;
        write!(f, "Range: {}", self.stats.range)
    }
}
