//! Configuration management for RW alias builds.
//!
//! Parses `rw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [docs]
//! source_dir = "docs"
//! output_dir = ".rw/build"
//!
//! [alias]
//! verbose = false
//! use_anchor_titles = true
//! use_page_icon = false
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `docs.source_dir` and `docs.output_dir` support environment variable
//! expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use rw_alias::AliasConfig;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory for rewritten pages.
    pub output_dir: Option<PathBuf>,
    /// Override `alias.verbose`.
    pub verbose: Option<bool>,
    /// Override `alias.use_anchor_titles`.
    pub use_anchor_titles: Option<bool>,
    /// Override `alias.use_page_icon`.
    pub use_page_icon: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rw.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Alias plugin options.
    pub alias: AliasConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Directory receiving rewritten markdown files.
    pub output_dir: PathBuf,
    /// Project directory for rw data (.rw/).
    pub project_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting paths are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(verbose) = settings.verbose {
            self.alias.verbose = verbose;
        }
        if let Some(use_anchor_titles) = settings.use_anchor_titles {
            self.alias.use_anchor_titles = use_anchor_titles;
        }
        if let Some(use_page_icon) = settings.use_page_icon {
            self.alias.use_page_icon = use_page_icon;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            docs: DocsConfigRaw::default(),
            alias: AliasConfig::default(),
            docs_resolved: DocsConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate resolved paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the output directory would
    /// overwrite the sources or lie inside them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;
        if docs.output_dir == docs.source_dir {
            return Err(ConfigError::Validation(
                "docs.output_dir must differ from docs.source_dir".to_owned(),
            ));
        }
        if docs.source_dir.starts_with(&docs.output_dir) {
            return Err(ConfigError::Validation(
                "docs.output_dir cannot contain docs.source_dir".to_owned(),
            ));
        }
        if docs.output_dir.starts_with(&docs.source_dir) {
            return Err(ConfigError::Validation(
                "docs.output_dir cannot be inside docs.source_dir".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configured paths.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = self.docs.output_dir {
            self.docs.output_dir = Some(expand::expand_env(dir, "docs.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.docs.output_dir.as_deref(), ".rw/build"),
            project_dir: config_dir.join(".rw"),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.docs_resolved,
            DocsConfig {
                source_dir: PathBuf::from("/test/docs"),
                output_dir: PathBuf::from("/test/.rw/build"),
                project_dir: PathBuf::from("/test/.rw"),
            }
        );
        assert_eq!(config.alias, AliasConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.alias, AliasConfig::default());
        assert!(config.docs.source_dir.is_none());
    }

    #[test]
    fn test_parse_alias_section() {
        let toml = r"
[alias]
verbose = true
use_anchor_titles = true
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.alias.verbose);
        assert!(config.alias.use_anchor_titles);
        assert!(!config.alias.use_page_icon);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
output_dir = "site/md"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/site/md")
        );
        assert_eq!(config.docs_resolved.project_dir, PathBuf::from("/project/.rw"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            output_dir: Some(PathBuf::from("/custom/out")),
            verbose: Some(true),
            use_anchor_titles: None,
            use_page_icon: Some(true),
        };
        config.apply_cli_settings(&settings);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/custom/out"));
        assert_eq!(config.docs_resolved.project_dir, PathBuf::from("/test/.rw"));
        assert!(config.alias.verbose);
        assert!(!config.alias.use_anchor_titles);
        assert!(config.alias.use_page_icon);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.alias, AliasConfig::default());
    }

    #[test]
    fn test_validate_same_source_and_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.output_dir = PathBuf::from("/test/docs");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_validate_output_containing_source() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.output_dir = PathBuf::from("/test");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_output_inside_source() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.output_dir = PathBuf::from("/test/docs/out");
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: docs.output_dir cannot be inside docs.source_dir"
        );
    }

    #[test]
    fn test_load_rejects_output_inside_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[docs]\noutput_dir = \"docs/out\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validate_sibling_with_shared_prefix() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.output_dir = PathBuf::from("/test/docs-build");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(
            &path,
            "[docs]\nsource_dir = \"content\"\n\n[alias]\nuse_page_icon = true\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content"));
        assert_eq!(config.docs_resolved.output_dir, dir.path().join(".rw/build"));
        assert!(config.alias.use_page_icon);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_alias_meta_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[alias]\nmeta_key = \"custom-key\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.alias.meta_key.as_deref(), Some("custom-key"));
    }

    #[test]
    fn test_load_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[alias]\nverbose = false\n").unwrap();

        let settings = CliSettings {
            verbose: Some(true),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!(config.alias.verbose);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/rw.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[alias\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_unknown_alias_option_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[alias]\nverbose = \"yes\"\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("RW_ALIAS_TEST_OUT", "public");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[docs]\noutput_dir = \"${RW_ALIAS_TEST_OUT}/md\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.docs_resolved.output_dir, dir.path().join("public/md"));
        unsafe {
            std::env::remove_var("RW_ALIAS_TEST_OUT");
        }
    }

    #[test]
    fn test_load_missing_env_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("RW_ALIAS_TEST_NO_SUCH_DIR");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[docs]\nsource_dir = \"${RW_ALIAS_TEST_NO_SUCH_DIR}\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "docs.source_dir"));
    }
}
