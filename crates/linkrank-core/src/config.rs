//! Layered run configuration.
//!
//! Precedence, lowest to highest:
//!
//! 1. Built-in defaults ([`LinkrankConfig::default`]).
//! 2. User config: `<config_dir>/linkrank/config.toml`.
//! 3. Project config: `./linkrank.toml`, or the file given with `--config`.
//! 4. Command-line flags (applied by the CLI as one more [`ConfigLayer`]).
//!
//! Every file is read as a [`ConfigLayer`] in which all fields are optional,
//! so a later file only overrides the keys it actually sets.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "linkrank.toml";

/// Largest accepted output precision. `f64` carries 15-17 significant digits.
pub const MAX_PRECISION: usize = 17;

/// Which solver(s) a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    PageRank,
    Hits,
    Both,
}

impl Algorithm {
    #[must_use]
    pub const fn runs_pagerank(self) -> bool {
        matches!(self, Self::PageRank | Self::Both)
    }

    #[must_use]
    pub const fn runs_hits(self) -> bool {
        matches!(self, Self::Hits | Self::Both)
    }
}

// ---------------------------------------------------------------------------
// Effective configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinkrankConfig {
    pub algorithm: Algorithm,
    pub pagerank: PageRankSettings,
    pub hits: HitsSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    pub damping: f64,
    pub iterations: usize,
    /// `None` runs exactly `iterations` passes.
    pub tolerance: Option<f64>,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: 0.85,
            iterations: 40,
            tolerance: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitsSettings {
    pub iterations: usize,
    pub tolerance: Option<f64>,
}

impl Default for HitsSettings {
    fn default() -> Self {
        Self {
            iterations: 20,
            tolerance: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Digits after the decimal point in text and pretty output.
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

// ---------------------------------------------------------------------------
// Partial layers
// ---------------------------------------------------------------------------

/// One source of configuration. Unset fields leave the value below intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
    #[serde(default)]
    pub pagerank: PageRankLayer,
    #[serde(default)]
    pub hits: HitsLayer,
    #[serde(default)]
    pub output: OutputLayer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageRankLayer {
    #[serde(default)]
    pub damping: Option<f64>,
    #[serde(default)]
    pub iterations: Option<usize>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HitsLayer {
    #[serde(default)]
    pub iterations: Option<usize>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputLayer {
    #[serde(default)]
    pub precision: Option<usize>,
}

impl ConfigLayer {
    /// Parse a layer from TOML text. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on invalid TOML or unknown keys.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a layer from a file that must exist.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read, otherwise as
    /// [`ConfigLayer::from_toml`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Read a layer if the file exists.
    ///
    /// # Errors
    ///
    /// As [`ConfigLayer::from_file`] for a file that exists.
    pub fn from_optional_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::from_file(path).map(Some)
    }
}

impl LinkrankConfig {
    /// Overlay every field `layer` sets.
    pub fn apply(&mut self, layer: &ConfigLayer) {
        if let Some(algorithm) = layer.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(damping) = layer.pagerank.damping {
            self.pagerank.damping = damping;
        }
        if let Some(iterations) = layer.pagerank.iterations {
            self.pagerank.iterations = iterations;
        }
        if layer.pagerank.tolerance.is_some() {
            self.pagerank.tolerance = layer.pagerank.tolerance;
        }
        if let Some(iterations) = layer.hits.iterations {
            self.hits.iterations = iterations;
        }
        if layer.hits.tolerance.is_some() {
            self.hits.tolerance = layer.hits.tolerance;
        }
        if let Some(precision) = layer.output.precision {
            self.output.precision = precision;
        }
    }

    /// Check ranges that the type system cannot.
    ///
    /// # Errors
    ///
    /// The first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_damping(self.pagerank.damping)?;
        if let Some(t) = self.pagerank.tolerance {
            validate_tolerance(t)?;
        }
        if let Some(t) = self.hits.tolerance {
            validate_tolerance(t)?;
        }
        if self.output.precision > MAX_PRECISION {
            return Err(ConfigError::Precision {
                got: self.output.precision,
                max: MAX_PRECISION,
            });
        }
        Ok(())
    }
}

/// # Errors
///
/// [`ConfigError::Damping`] unless `0 <= d <= 1`.
pub fn validate_damping(d: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&d) {
        Ok(())
    } else {
        Err(ConfigError::Damping(d))
    }
}

/// # Errors
///
/// [`ConfigError::Tolerance`] unless `t` is positive and finite.
pub fn validate_tolerance(t: f64) -> Result<(), ConfigError> {
    if t.is_finite() && t > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Tolerance(t))
    }
}

/// Location of the per-user config file, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("linkrank/config.toml"))
}

/// Merge defaults, the user file, and the project (or explicit) file.
///
/// `explicit` must exist when given; the implicit files are optional.
///
/// # Errors
///
/// Any read or parse error from a file that exists.
pub fn resolve_config(
    project_root: &Path,
    explicit: Option<&Path>,
) -> Result<LinkrankConfig, ConfigError> {
    let mut config = LinkrankConfig::default();

    if let Some(path) = user_config_path() {
        if let Some(layer) = ConfigLayer::from_optional_file(&path)? {
            debug!(path = %path.display(), "applying user config");
            config.apply(&layer);
        }
    }

    let project_layer = match explicit {
        Some(path) => Some((path.to_path_buf(), ConfigLayer::from_file(path)?)),
        None => {
            let path = project_root.join(PROJECT_CONFIG_FILE);
            ConfigLayer::from_optional_file(&path)?.map(|layer| (path, layer))
        }
    };
    if let Some((path, layer)) = project_layer {
        debug!(path = %path.display(), "applying project config");
        config.apply(&layer);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_solver_settings() {
        let c = LinkrankConfig::default();
        assert_eq!(c.algorithm, Algorithm::PageRank);
        assert!((c.pagerank.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(c.pagerank.iterations, 40);
        assert_eq!(c.hits.iterations, 20);
        assert_eq!(c.output.precision, 6);
        assert!(c.pagerank.tolerance.is_none());
    }

    #[test]
    fn layer_overrides_only_set_keys() {
        let layer = ConfigLayer::from_toml(
            "algorithm = \"both\"\n[hits]\niterations = 5\n",
            Path::new("inline.toml"),
        )
        .expect("parses");
        let mut c = LinkrankConfig::default();
        c.apply(&layer);
        assert_eq!(c.algorithm, Algorithm::Both);
        assert_eq!(c.hits.iterations, 5);
        assert_eq!(c.pagerank.iterations, 40);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = ConfigLayer::from_toml("[pagerank]\ndampen = 0.5\n", Path::new("x.toml"))
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut c = LinkrankConfig::default();
        c.pagerank.damping = 1.5;
        assert!(matches!(c.validate(), Err(ConfigError::Damping(_))));

        let mut c = LinkrankConfig::default();
        c.hits.tolerance = Some(0.0);
        assert!(matches!(c.validate(), Err(ConfigError::Tolerance(_))));

        let mut c = LinkrankConfig::default();
        c.output.precision = 40;
        assert!(matches!(c.validate(), Err(ConfigError::Precision { .. })));
    }

    #[test]
    fn project_file_is_picked_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[pagerank]\ndamping = 0.5\n[output]\nprecision = 3\n",
        )
        .expect("write");
        let c = resolve_config(dir.path(), None).expect("resolves");
        assert!((c.pagerank.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(c.output.precision, 3);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = resolve_config(dir.path(), Some(&dir.path().join("missing.toml")))
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
