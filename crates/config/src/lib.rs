//! Configuration loading: JSON schema, structural validation, and
//! construction of the runtime engine configuration.
//!
//! The engine assumes a pre-validated [`Config`]; every invariant it relies
//! on (finite positive base font size, non-empty size scale, known strategy
//! kinds) is enforced here, before the engine ever runs.

#![forbid(unsafe_code)]

use anyhow::{Context as _, Result, ensure};
use cssnap_pipeline::{
    Config, FunctionUnwrap, PropertyRule, RoundMode, RoundStrategy, SizeVariableMap, TieBreak,
    VariableResolver,
};
use cssnap_units::Unit;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in default document, equivalent to running without a config file.
const DEFAULT_CONFIG: &str = include_str!("default_config.json");

/// Top-level config document (camelCase JSON).
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub base_font_size: f64,
    #[serde(default = "default_target_path")]
    pub target_path: String,
    #[serde(default)]
    pub exclude_paths: Vec<String>,
    #[serde(default = "default_extensions")]
    pub target_extensions: Vec<String>,
    pub round_strategy: RoundStrategyEntry,
    #[serde(default)]
    pub transformers: Vec<TransformerEntry>,
    pub properties: BTreeMap<String, PropertyEntry>,
    pub sizes_in_pixel: Vec<f64>,
    /// Generic pixel-size → variable-name table, used when a property has no
    /// table of its own.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoundStrategyEntry {
    pub on_tie: TieEntry,
    pub mode: ModeEntry,
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieEntry {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeEntry {
    On,
    Off,
    Comment,
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitEntry {
    Px,
    Rem,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyEntry {
    pub unit: UnitEntry,
    #[serde(default = "default_true")]
    pub transform: bool,
    #[serde(default = "default_true")]
    pub convert: bool,
    #[serde(default = "default_true")]
    pub round: bool,
    /// Property-specific pixel-size → variable-name table.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Declarative transformer entries; unknown kinds fail at parse time.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TransformerEntry {
    /// Unwrap `name(<dimension>)` marker calls into bare dimension tokens.
    UnwrapFunction { name: String },
}

/// Filesystem scope for the batch driver, split off from the engine config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkPlan {
    pub target_path: PathBuf,
    /// Path components to skip entirely (e.g. `node_modules`).
    pub exclude_paths: Vec<String>,
    /// Lowercased extensions of files to rewrite.
    pub target_extensions: Vec<String>,
}

fn default_target_path() -> String {
    ".".to_owned()
}

fn default_extensions() -> Vec<String> {
    vec!["css".to_owned(), "scss".to_owned()]
}

const fn default_true() -> bool {
    true
}

impl ConfigFile {
    /// Parse and validate a config document from JSON text.
    ///
    /// # Errors
    /// Returns an error for malformed JSON, unknown fields/kinds, or any
    /// violated structural invariant.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: Self = serde_json::from_str(json).context("malformed config document")?;
        file.validate()?;
        Ok(file)
    }

    /// Load and validate a config document from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }

    /// The built-in default configuration.
    ///
    /// # Errors
    /// Only fails if the embedded document is broken, which a unit test
    /// guards against.
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_CONFIG).context("built-in default config")
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.base_font_size.is_finite() && self.base_font_size > 0.0,
            "baseFontSize must be a finite positive number, got {}",
            self.base_font_size
        );
        ensure!(!self.sizes_in_pixel.is_empty(), "sizesInPixel must not be empty");
        for size in &self.sizes_in_pixel {
            ensure!(
                size.is_finite() && *size >= 0.0,
                "sizesInPixel entries are non-negative magnitudes, got {size}"
            );
        }
        ensure!(!self.properties.is_empty(), "properties must name at least one property");
        ensure!(!self.target_extensions.is_empty(), "targetExtensions must not be empty");
        for TransformerEntry::UnwrapFunction { name } in &self.transformers {
            ensure!(!name.is_empty(), "unwrapFunction requires a non-empty function name");
        }
        validate_size_keys(&self.variables).context("in generic variables table")?;
        for (property, entry) in &self.properties {
            validate_size_keys(&entry.variables)
                .with_context(|| format!("in variables table of property `{property}`"))?;
        }
        Ok(())
    }

    /// Build the runtime engine config and the filesystem walk plan.
    ///
    /// # Errors
    /// Returns an error when a strategy cannot be constructed (e.g. a
    /// transformer name that produces an invalid pattern).
    pub fn build(&self) -> Result<(Config, WalkPlan)> {
        let mut properties = HashMap::new();
        for (name, entry) in &self.properties {
            properties.insert(
                name.clone(),
                PropertyRule {
                    unit: entry.unit.into(),
                    transform: entry.transform,
                    convert: entry.convert,
                    round: entry.round,
                    variables: build_resolver(&entry.variables)?,
                },
            );
        }

        let mut transformers: Vec<Box<dyn cssnap_pipeline::ValueTransform>> = Vec::new();
        for TransformerEntry::UnwrapFunction { name } in &self.transformers {
            let unwrap = FunctionUnwrap::new(name)
                .with_context(|| format!("building unwrapFunction transformer `{name}`"))?;
            transformers.push(Box::new(unwrap));
        }

        let config = Config {
            base_font_size: self.base_font_size,
            properties,
            transformers,
            round_strategy: RoundStrategy {
                on_tie: self.round_strategy.on_tie.into(),
                mode: self.round_strategy.mode.into(),
            },
            sizes_in_pixel: self.sizes_in_pixel.clone(),
            generic_variables: build_resolver(&self.variables)?,
        };
        let plan = WalkPlan {
            target_path: PathBuf::from(&self.target_path),
            exclude_paths: self.exclude_paths.clone(),
            target_extensions: self
                .target_extensions
                .iter()
                .map(|extension| extension.to_ascii_lowercase())
                .collect(),
        };
        Ok((config, plan))
    }
}

impl From<UnitEntry> for Unit {
    fn from(entry: UnitEntry) -> Self {
        match entry {
            UnitEntry::Px => Self::Pixels,
            UnitEntry::Rem => Self::RootEms,
        }
    }
}

impl From<TieEntry> for TieBreak {
    fn from(entry: TieEntry) -> Self {
        match entry {
            TieEntry::Up => Self::Up,
            TieEntry::Down => Self::Down,
        }
    }
}

impl From<ModeEntry> for RoundMode {
    fn from(entry: ModeEntry) -> Self {
        match entry {
            ModeEntry::On => Self::On,
            ModeEntry::Off => Self::Off,
            ModeEntry::Comment => Self::Comment,
        }
    }
}

fn parse_size_key(key: &str) -> Result<f64> {
    let size: f64 = key
        .parse()
        .with_context(|| format!("variable size key `{key}` is not a number"))?;
    ensure!(
        size.is_finite() && size >= 0.0,
        "variable size key `{key}` must be a non-negative magnitude"
    );
    Ok(size)
}

fn validate_size_keys(table: &BTreeMap<String, String>) -> Result<()> {
    for key in table.keys() {
        let _size = parse_size_key(key)?;
    }
    Ok(())
}

fn build_resolver(table: &BTreeMap<String, String>) -> Result<Option<Box<dyn VariableResolver>>> {
    if table.is_empty() {
        return Ok(None);
    }
    let mut entries = Vec::with_capacity(table.len());
    for (key, name) in table {
        entries.push((parse_size_key(key)?, name.clone()));
    }
    Ok(Some(Box::new(SizeVariableMap::new(entries))))
}
