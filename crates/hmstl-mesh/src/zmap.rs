use thiserror::Error;

pub const DEFAULT_SCALE: f32 = 1.0;
pub const DEFAULT_OFFSET: f32 = 1.0;
pub const MIN_OFFSET: f32 = 1.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Z scale must be a number greater than 0 (got {0})")]
    InvalidScale(f32),

    #[error("Z offset must be a number greater than or equal to 1 (got {0})")]
    InvalidOffset(f32),

    #[error("solid name must be a single non-empty token without whitespace (got {0:?})")]
    InvalidName(String),
}

/// Maps raw samples to surface Z: `offset + scale * sample`.
///
/// The offset is added after scaling and is never scaled itself, so it acts
/// as the base thickness under the lowest sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZMapping {
    scale: f32,
    offset: f32,
}

impl ZMapping {
    pub fn new(scale: f32, offset: f32) -> Result<Self, ConfigError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidScale(scale));
        }
        if !(offset.is_finite() && offset >= MIN_OFFSET) {
            return Err(ConfigError::InvalidOffset(offset));
        }
        Ok(ZMapping { scale, offset })
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn z(&self, sample: u8) -> f32 {
        self.offset + self.scale * f32::from(sample)
    }
}

impl Default for ZMapping {
    fn default() -> Self {
        ZMapping {
            scale: DEFAULT_SCALE,
            offset: DEFAULT_OFFSET,
        }
    }
}
