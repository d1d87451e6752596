use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::args::Args;

const DEFAULT_TEXTURE: &str = "cubetexture.png";
const DEFAULT_TITLE: &str = "quadview";

/// Optional settings file; every field may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub texture: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub frames: Option<u64>,
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Read)?;

        toml::from_str(&text).map_err(ConfigError::Parse)
    }
}

/// Fully resolved settings: CLI over config file over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub texture: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub frames: u64,
}

impl Settings {
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => ConfigFile::read(path)?,
            None => ConfigFile::default(),
        };

        Ok(Self::merge(args, file))
    }

    fn merge(args: &Args, file: ConfigFile) -> Self {
        Self {
            texture: args
                .texture
                .clone()
                .or(file.texture)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEXTURE)),
            width: args.width.or(file.width).unwrap_or(1280),
            height: args.height.or(file.height).unwrap_or(720),
            title: args
                .title
                .clone()
                .or(file.title)
                .unwrap_or_else(|| String::from(DEFAULT_TITLE)),
            frames: args.frames.or(file.frames).unwrap_or(0),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file: {0}")]
    Read(std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::merge(&Args::default(), ConfigFile::default());

        assert_eq!(settings.texture, PathBuf::from(DEFAULT_TEXTURE));
        assert_eq!(settings.width, 1280);
        assert_eq!(settings.height, 720);
        assert_eq!(settings.frames, 0);
    }

    #[test]
    fn file_values_override_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
            texture = "side.png"
            width = 640
            "#,
        )
        .unwrap();

        let settings = Settings::merge(&Args::default(), file);

        assert_eq!(settings.texture, PathBuf::from("side.png"));
        assert_eq!(settings.width, 640);
        assert_eq!(settings.height, 720);
    }

    #[test]
    fn cli_values_override_file() {
        let file: ConfigFile = toml::from_str("width = 640\ntitle = \"from file\"").unwrap();

        let args = Args {
            width: Some(800),
            ..Args::default()
        };

        let settings = Settings::merge(&args, file);

        assert_eq!(settings.width, 800);
        assert_eq!(settings.title, "from file");
    }
}
