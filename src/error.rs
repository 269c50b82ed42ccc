use std::io;
use std::path::PathBuf;

use hmstl_grid::GridError;
use hmstl_io::PgmError;
use hmstl_mesh::{ConfigError, MeshError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read config file {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot read heightmap: {0}")]
    Input(#[from] PgmError),

    #[error("heightmap is empty")]
    EmptyGrid,

    #[error("cannot open output file {path}: {source}")]
    OutputOpen { path: PathBuf, source: io::Error },

    #[error("failed writing STL output: {0}")]
    Output(#[source] io::Error),
}

impl From<MeshError> for AppError {
    fn from(e: MeshError) -> Self {
        match e {
            MeshError::Grid(GridError::Empty) => AppError::EmptyGrid,
            MeshError::Grid(g) => AppError::Input(PgmError::Grid(g)),
            MeshError::Io(io) => AppError::Output(io),
        }
    }
}

impl From<GridError> for AppError {
    fn from(e: GridError) -> Self {
        AppError::from(MeshError::Grid(e))
    }
}
