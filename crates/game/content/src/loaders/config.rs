//! Encounter configuration loader.

use std::path::Path;

use tactics_core::EncounterConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`EncounterConfig::default`].
    pub fn load(path: &Path) -> LoadResult<EncounterConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<EncounterConfig> {
        let config: EncounterConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.tile_size <= 0.0 {
            anyhow::bail!("tile_size must be positive, got {}", config.tile_size);
        }

        Ok(config)
    }

    /// The configuration shipped with the crate.
    pub fn builtin() -> LoadResult<EncounterConfig> {
        Self::parse(include_str!("../../data/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ai_think_ms = 0\nmax_party_size = 2").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.ai_think_ms, 0);
        assert_eq!(config.max_party_size, 2);
        assert_eq!(config.settle_ms, EncounterConfig::DEFAULT_SETTLE_MS);
    }

    #[test]
    fn builtin_config_matches_defaults() {
        assert_eq!(ConfigLoader::builtin().unwrap(), EncounterConfig::default());
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(ConfigLoader::parse("tile_size = 0.0").is_err());
        assert!(ConfigLoader::parse("settle_ms = \"soon\"").is_err());
        assert!(ConfigLoader::load(Path::new("/nonexistent/config.toml")).is_err());
    }
}
