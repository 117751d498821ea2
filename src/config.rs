//! Project configuration (iconsheet.yaml) and option resolution.
//!
//! The configuration file supplies defaults for everything the command line
//! can set. [`resolve`] merges the two into the literal [`BuildOptions`] the
//! pipeline runs with.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{IconsheetError, Result};
use crate::pipeline::BuildOptions;

/// The name of the project configuration file.
pub const CONFIG_FILENAME: &str = "iconsheet.yaml";

/// The name of the optimizer configuration file looked up at the project root.
pub const OPTIMIZE_CONFIG_FILENAME: &str = "iconsheet.optimize.yaml";

/// Project configuration loaded from iconsheet.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory holding the source SVG files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Directory for the type manifest (and the sprite, unless `sprite_dir` is set).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Separate directory for sprite.svg and its README.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite_dir: Option<PathBuf>,

    /// Run the optimizer over the assembled sprite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimize: Option<bool>,

    /// Optimizer configuration file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimize_config: Option<PathBuf>,

    /// Patterns to exclude from discovery.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

impl ProjectConfig {
    /// Load configuration from an iconsheet.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IconsheetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read configuration: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `iconsheet.yaml` from `root` if present, defaults otherwise.
    pub fn load_from_root(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| IconsheetError::Parse {
            message: format!("Invalid configuration: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Serialize to YAML for `init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| IconsheetError::Config {
            message: format!("Failed to serialize configuration: {}", e),
            help: None,
        })
    }
}

/// Compile exclude patterns into one matcher.
///
/// Patterns are globs matched against the forward-slash path relative to the
/// input directory. `*` may cross directories, so `*.draft.svg` excludes
/// drafts at any depth.
pub fn compile_excludes(excludes: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in excludes {
        let glob = Glob::new(pattern).map_err(|e| IconsheetError::Config {
            message: format!("Invalid exclude pattern '{}': {}", pattern, e),
            help: Some(format!("Fix `excludes` in {}", CONFIG_FILENAME)),
        })?;
        builder.add(glob);
    }

    builder.build().map_err(|e| IconsheetError::Config {
        message: format!("Failed to compile exclude patterns: {}", e),
        help: None,
    })
}

/// Settings given on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub sprite_dir: Option<PathBuf>,
    pub optimize: Option<bool>,
    pub optimize_config: Option<PathBuf>,
    pub force: bool,
}

/// Merge command line overrides with project configuration.
///
/// Relative paths from the config file are taken relative to `root`; paths
/// from the command line are used as given.
pub fn resolve(overrides: Overrides, config: &ProjectConfig, root: &Path) -> Result<BuildOptions> {
    let from_config = |p: &Option<PathBuf>| p.as_ref().map(|p| root.join(p));

    let input = overrides
        .input
        .or_else(|| from_config(&config.input))
        .ok_or_else(|| IconsheetError::Config {
            message: "No input directory configured".to_string(),
            help: Some(format!("Pass --input or set `input` in {}", CONFIG_FILENAME)),
        })?;

    let output = overrides
        .output
        .or_else(|| from_config(&config.output))
        .ok_or_else(|| IconsheetError::Config {
            message: "No output directory configured".to_string(),
            help: Some(format!("Pass --output or set `output` in {}", CONFIG_FILENAME)),
        })?;

    let sprite_dir = overrides.sprite_dir.or_else(|| from_config(&config.sprite_dir));
    let optimize = overrides.optimize.or(config.optimize).unwrap_or(false);

    let optimize_config = overrides
        .optimize_config
        .or_else(|| from_config(&config.optimize_config))
        .or_else(|| {
            let candidate = root.join(OPTIMIZE_CONFIG_FILENAME);
            candidate.is_file().then_some(candidate)
        });

    if let Some(path) = &optimize_config {
        if optimize && !path.is_file() {
            return Err(IconsheetError::Config {
                message: format!("Optimizer configuration not found: {}", path.display()),
                help: None,
            });
        }
    }

    Ok(BuildOptions {
        input,
        output,
        sprite_dir,
        optimize,
        optimize_config,
        excludes: config.excludes.clone(),
        force: overrides.force,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
input: assets/icons
output: src/icons
sprite_dir: public/icons
optimize: true
excludes:
  - "*.draft.svg"
  - "**/wip/*"
"#;
        let config = ProjectConfig::parse(yaml).unwrap();

        assert_eq!(config.input, Some(PathBuf::from("assets/icons")));
        assert_eq!(config.output, Some(PathBuf::from("src/icons")));
        assert_eq!(config.sprite_dir, Some(PathBuf::from("public/icons")));
        assert_eq!(config.optimize, Some(true));
        assert_eq!(config.excludes, vec!["*.draft.svg", "**/wip/*"]);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(ProjectConfig::parse("").unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = ProjectConfig::parse("input: [unclosed").unwrap_err();
        assert!(matches!(err, IconsheetError::Parse { .. }));
    }

    #[test]
    fn test_yaml_round_trip_skips_unset() {
        let config = ProjectConfig {
            input: Some(PathBuf::from("icons")),
            output: Some(PathBuf::from("dist")),
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();

        assert!(yaml.contains("input: icons"));
        assert!(!yaml.contains("sprite_dir"));
        assert_eq!(ProjectConfig::parse(&yaml).unwrap(), config);
    }

    #[test]
    fn test_exclude_patterns() {
        let excludes = compile_excludes(&[
            "*.draft.svg".to_string(),
            "**/wip/*".to_string(),
            "legacy/*".to_string(),
        ])
        .unwrap();

        assert!(excludes.is_match("home.draft.svg"));
        assert!(excludes.is_match("nav/home.draft.svg"));
        assert!(excludes.is_match("nav/wip/menu.svg"));
        assert!(excludes.is_match("wip/menu.svg"));
        assert!(excludes.is_match("legacy/old.svg"));
        assert!(!excludes.is_match("nav/menu.svg"));
        assert!(!excludes.is_match("nav/legacy/old.svg"));
    }

    #[test]
    fn test_exclude_patterns_match_whole_names() {
        let excludes = compile_excludes(&["**/home.svg".to_string(), "wip".to_string()]).unwrap();

        assert!(excludes.is_match("home.svg"));
        assert!(excludes.is_match("nav/home.svg"));
        assert!(!excludes.is_match("myhome.svg"));
        assert!(!excludes.is_match("swipe.svg"));
        assert!(!excludes.is_match("wip/menu.svg"));
    }

    #[test]
    fn test_exclude_invalid_pattern() {
        let err = compile_excludes(&["[unclosed".to_string()]).unwrap_err();
        assert!(matches!(err, IconsheetError::Config { .. }));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let root = Path::new("/project");
        let config = ProjectConfig {
            input: Some(PathBuf::from("icons")),
            output: Some(PathBuf::from("dist")),
            optimize: Some(true),
            ..Default::default()
        };
        let overrides = Overrides {
            output: Some(PathBuf::from("/elsewhere")),
            optimize: Some(false),
            ..Default::default()
        };

        let options = resolve(overrides, &config, root).unwrap();

        assert_eq!(options.input, PathBuf::from("/project/icons"));
        assert_eq!(options.output, PathBuf::from("/elsewhere"));
        assert!(!options.optimize);
        assert_eq!(options.sprite_output_dir(), Path::new("/elsewhere"));
    }

    #[test]
    fn test_resolve_missing_input() {
        let overrides = Overrides {
            output: Some(PathBuf::from("dist")),
            ..Default::default()
        };
        let err = resolve(overrides, &ProjectConfig::default(), Path::new(".")).unwrap_err();

        assert!(matches!(err, IconsheetError::Config { .. }));
    }

    #[test]
    fn test_resolve_finds_optimizer_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OPTIMIZE_CONFIG_FILENAME), "remove_comments: false\n").unwrap();

        let overrides = Overrides {
            input: Some(PathBuf::from("icons")),
            output: Some(PathBuf::from("dist")),
            optimize: Some(true),
            ..Default::default()
        };
        let options = resolve(overrides, &ProjectConfig::default(), dir.path()).unwrap();

        assert_eq!(
            options.optimize_config,
            Some(dir.path().join(OPTIMIZE_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_resolve_missing_explicit_optimizer_config() {
        let overrides = Overrides {
            input: Some(PathBuf::from("icons")),
            output: Some(PathBuf::from("dist")),
            optimize: Some(true),
            optimize_config: Some(PathBuf::from("/nonexistent/optimize.yaml")),
            ..Default::default()
        };
        let err = resolve(overrides, &ProjectConfig::default(), Path::new(".")).unwrap_err();

        assert!(matches!(err, IconsheetError::Config { .. }));
    }

    #[test]
    fn test_load_from_root_without_file() {
        let dir = tempdir().unwrap();
        assert_eq!(
            ProjectConfig::load_from_root(dir.path()).unwrap(),
            ProjectConfig::default()
        );
    }
}
