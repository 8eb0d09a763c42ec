//! # Generator Configuration
//!
//! Optional `postalcode-gen.toml` that sits alongside the specification
//! documents. Every key has a default, so a run without a config file
//! reproduces the historical layout:
//!
//! ```toml
//! templates_dir = "."
//! validator_dir = "../src/PostalCodes/Generated"
//! test_dir = "../src/PostalCodes.UnitTests/Generated"
//! factory_path = "../src/PostalCodes/Generated/PostalCodeFactory.gen.cs"
//! indent = "    "
//! line_ending = "lf"                   # or "crlf"
//! fixture_accumulation = "all-entries" # or "last-entry-only"
//! duplicate_policy = "overwrite"       # or "reject"
//! unresolved_placeholders = "reject"   # or "warn"
//!
//! [[families]]
//! file = "5Digits.json"
//! countries = ["DE", "US"]
//! ```
//!
//! Relative paths resolve against the specification directory.

use crate::generator::{
    DuplicatePolicy, FixtureAccumulation, Indent, Layout, LineEnding, OutputLayout,
    PlaceholderPolicy,
};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up next to the specification documents
pub const CONFIG_FILE_NAME: &str = "postalcode-gen.toml";

/// A grouped document shared by a list of countries
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FamilyConfig {
    /// Document file name, relative to the specification directory
    pub file: String,
    /// Countries generated from the document, in order
    pub countries: Vec<String>,
}

impl FamilyConfig {
    fn new(file: &str, countries: &[&str]) -> Self {
        FamilyConfig {
            file: file.to_string(),
            countries: countries.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Built-in digit-count families, processed in this order
pub fn default_families() -> Vec<FamilyConfig> {
    vec![
        FamilyConfig::new(
            "4Digits.json",
            &["AT", "AU", "BG", "CH", "DK", "HU", "NL", "NO", "SI", "NZ", "BE", "CY"],
        ),
        FamilyConfig::new(
            "5Digits.json",
            &[
                "DE", "CZ", "EE", "ES", "FI", "FR", "GR", "IT", "PL", "SE", "SK", "TR", "US", "PR",
                "VI", "AS", "GU", "MP", "PW", "FM", "MH", "MY", "HR", "MX",
            ],
        ),
        FamilyConfig::new("6Digits.json", &["IN", "SG"]),
        FamilyConfig::new("7Digits.json", &["JP"]),
    ]
}

/// Configuration as written in `postalcode-gen.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub templates_dir: Option<PathBuf>,
    pub validator_dir: Option<PathBuf>,
    pub test_dir: Option<PathBuf>,
    pub factory_path: Option<PathBuf>,
    pub indent: Option<String>,
    pub line_ending: LineEnding,
    pub fixture_accumulation: FixtureAccumulation,
    pub duplicate_policy: DuplicatePolicy,
    pub unresolved_placeholders: PlaceholderPolicy,
    pub families: Option<Vec<FamilyConfig>>,
}

/// Configuration with every path anchored and every default filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub spec_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub outputs: OutputLayout,
    pub layout: Layout,
    pub families: Vec<FamilyConfig>,
    pub fixture_accumulation: FixtureAccumulation,
    pub duplicate_policy: DuplicatePolicy,
    pub placeholder_policy: PlaceholderPolicy,
}

impl GeneratorConfig {
    /// Anchor relative paths at `spec_dir` and apply defaults.
    pub fn resolve(self, spec_dir: &Path) -> ResolvedConfig {
        let anchor = |p: Option<PathBuf>, default: &str| -> PathBuf {
            let p = p.unwrap_or_else(|| PathBuf::from(default));
            if p.is_absolute() {
                p
            } else {
                spec_dir.join(p)
            }
        };

        ResolvedConfig {
            spec_dir: spec_dir.to_path_buf(),
            templates_dir: anchor(self.templates_dir, "."),
            outputs: OutputLayout {
                validator_dir: anchor(self.validator_dir, "../src/PostalCodes/Generated"),
                test_dir: anchor(self.test_dir, "../src/PostalCodes.UnitTests/Generated"),
                factory_path: anchor(
                    self.factory_path,
                    "../src/PostalCodes/Generated/PostalCodeFactory.gen.cs",
                ),
            },
            layout: Layout::new(
                self.indent.map(Indent::new).unwrap_or_default(),
                self.line_ending,
            ),
            families: self.families.unwrap_or_else(default_families),
            fixture_accumulation: self.fixture_accumulation,
            duplicate_policy: self.duplicate_policy,
            placeholder_policy: self.unresolved_placeholders,
        }
    }
}

/// Load a configuration file.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but
/// cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read generator config: {}", config_path.display()))?;

    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Look for `postalcode-gen.toml` in the specification directory
pub fn auto_detect_config_path(spec_dir: &Path) -> Option<PathBuf> {
    let config_path = spec_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Load and resolve the configuration for a run.
///
/// Priority:
/// 1. Explicitly provided path (must exist)
/// 2. Auto-detected in the specification directory
/// 3. Built-in defaults
pub fn resolve_config(explicit_path: Option<&Path>, spec_dir: &Path) -> anyhow::Result<ResolvedConfig> {
    let config = match explicit_path {
        Some(path) => load_config(path)?
            .ok_or_else(|| anyhow::anyhow!("Generator config not found: {}", path.display()))?,
        None => match auto_detect_config_path(spec_dir) {
            Some(path) => load_config(&path)?.unwrap_or_default(),
            None => GeneratorConfig::default(),
        },
    };
    Ok(config.resolve(spec_dir))
}
