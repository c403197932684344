use anyhow::{Context, Result};
use distver::{get_scheme, SchemeKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "distver.toml";

/// The distver configuration file structure (distver.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DistverConfig {
    /// Version handling configuration
    pub versions: VersionsConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VersionsConfig {
    /// Registered scheme name used when `--scheme` is not given
    pub scheme: Option<String>,

    /// Skip the normalized scheme's huge-major guard
    pub unlimited_major: bool,
}

impl DistverConfig {
    /// Load configuration from distver.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        match Self::find(start_dir) {
            Some(config_path) => {
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let config: DistverConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                log::debug!("Loaded configuration from {}", config_path.display());
                Ok(Some(config))
            }
            None => Ok(None),
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }

    fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

/// Effective settings after merging the command line over the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub scheme: SchemeKind,
    pub unlimited_major: bool,
}

impl Settings {
    /// `--scheme` wins over the config file, which wins over the default.
    /// Names are resolved through the scheme registry.
    pub fn resolve(cli_scheme: Option<&str>, config: Option<&DistverConfig>) -> Result<Self> {
        let versions = config.map(|c| &c.versions);
        let name = cli_scheme
            .or_else(|| versions.and_then(|v| v.scheme.as_deref()))
            .unwrap_or("default");
        let scheme = get_scheme(name)?.kind();

        Ok(Settings {
            scheme,
            unlimited_major: versions.is_some_and(|v| v.unlimited_major),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: DistverConfig = toml::from_str("").unwrap();
        assert!(config.versions.scheme.is_none());
        assert!(!config.versions.unlimited_major);
    }

    #[test]
    fn test_parse_versions_section() {
        let toml = r#"
[versions]
scheme = "legacy"
unlimited-major = true
"#;
        let config: DistverConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.versions.scheme.as_deref(), Some("legacy"));
        assert!(config.versions.unlimited_major);
    }

    #[test]
    fn test_load_searches_upward() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[versions]\nscheme = \"semantic\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = DistverConfig::load(&nested).unwrap().unwrap();
        assert_eq!(config.versions.scheme.as_deref(), Some("semantic"));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[versions\n").unwrap();
        assert!(DistverConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_settings_precedence() {
        let config: DistverConfig =
            toml::from_str("[versions]\nscheme = \"legacy\"\nunlimited-major = true\n").unwrap();

        let settings = Settings::resolve(None, None).unwrap();
        assert_eq!(settings.scheme, SchemeKind::Adaptive);
        assert!(!settings.unlimited_major);

        let settings = Settings::resolve(None, Some(&config)).unwrap();
        assert_eq!(settings.scheme, SchemeKind::Legacy);
        assert!(settings.unlimited_major);

        let settings = Settings::resolve(Some("normalized"), Some(&config)).unwrap();
        assert_eq!(settings.scheme, SchemeKind::Normalized);

        assert!(Settings::resolve(Some("bogus"), Some(&config)).is_err());
    }
}
