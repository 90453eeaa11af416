use crate::BuildError;
use std::{fs, path::Path};
use viewinject_core::config::GeneratorConfig;

/// Load and validate a generator config from a TOML file.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, BuildError> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&text).map_err(|source| BuildError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    Ok(config)
}

/// Parse a config without validating it.
pub fn parse_config(text: &str) -> Result<GeneratorConfig, toml::de::Error> {
    toml::from_str(text)
}
