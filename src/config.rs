use std::fs;
use std::path::{Path, PathBuf};

use hmstl_mesh::{DEFAULT_OFFSET, DEFAULT_SCALE, DEFAULT_SOLID_NAME, SolidOptions, ZMapping};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::AppError;

/// On-disk config. Every key is optional.
///
/// ```toml
/// [mesh]
/// scale = 2.0
/// offset = 1.5
/// name = "terrain"
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub mesh: MeshSection,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MeshSection {
    pub scale: Option<f32>,
    pub offset: Option<f32>,
    pub name: Option<String>,
}

impl ConfigFile {
    pub fn from_toml_str(s: &str, path: &Path) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let s = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s, path)
    }
}

/// Everything one run needs, validated before any input is touched.
#[derive(Clone, Debug)]
pub struct Settings {
    pub solid: SolidOptions,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl Settings {
    /// Merges flags over the config file over built-in defaults.
    pub fn resolve(cli: &Cli, file: &ConfigFile) -> Result<Self, AppError> {
        let scale = cli.scale.or(file.mesh.scale).unwrap_or(DEFAULT_SCALE);
        let offset = cli.offset.or(file.mesh.offset).unwrap_or(DEFAULT_OFFSET);
        let name = cli
            .name
            .clone()
            .or_else(|| file.mesh.name.clone())
            .unwrap_or_else(|| DEFAULT_SOLID_NAME.to_string());
        let zmap = ZMapping::new(scale, offset)?;
        let solid = SolidOptions::new(zmap, name)?;
        Ok(Settings {
            solid,
            input: cli.input.clone(),
            output: cli.output.clone(),
            verbose: cli.verbose,
        })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let file = match &cli.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Settings::resolve(cli, &file)
    }
}
