//! The parameter model: base palettes, color schemes and variants.
//!
//! A [`ParameterSet`] is the root of a generation run. It is loaded once from
//! a JSON or YAML document and is read-only afterwards.
//!
//! # Document Format
//!
//! Keys are PascalCase. Every collection is optional.
//!
//! ```json
//! {
//!   "DefaultValues": { "Font": "Segoe UI" },
//!   "BaseColorSchemes": [
//!     { "Name": "Light", "Values": { "Background": "#FFFFFFFF" } },
//!     { "Name": "Dark",  "Values": { "Background": "#FF252525" } }
//!   ],
//!   "ColorSchemes": [
//!     { "Name": "Blue", "Values": { "Accent": "#FF0078D7" } },
//!     { "Name": "Amoled", "ForBaseColor": "Dark", "ForColorSchemeVariant": "None",
//!       "Values": { "Background": "#FF000000" } }
//!   ],
//!   "AdditionalColorSchemeVariants": [
//!     { "Name": "Colorful", "Values": { "Chrome": "#FF3C3C3C" } }
//!   ]
//! }
//! ```
//!
//! # Variant Affinity
//!
//! `ForColorSchemeVariant` is an optional string with three meanings, modelled
//! by [`VariantAffinity`]:
//!
//! | Value | Affinity | Standalone | In variant expansion |
//! |-------|----------|------------|----------------------|
//! | unset or `""` | [`VariantAffinity::Any`] | yes | yes |
//! | `"None"` | [`VariantAffinity::Excluded`] | yes | no |
//! | anything else | [`VariantAffinity::Variant`] | no | yes |

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;

/// Key → value mapping contributed by one value source.
pub type ValueMap = BTreeMap<String, String>;

/// Sentinel that keeps a scheme out of every variant expansion.
pub const NO_VARIANT_SENTINEL: &str = "None";

/// Root of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterSet {
    #[serde(default)]
    pub default_values: ValueMap,

    #[serde(default)]
    pub base_color_schemes: Vec<BaseColorScheme>,

    #[serde(default)]
    pub color_schemes: Vec<ColorScheme>,

    #[serde(default, alias = "ColorSchemeVariants")]
    pub additional_color_scheme_variants: Vec<ColorSchemeVariant>,
}

/// A top-level palette such as "Light" or "Dark".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseColorScheme {
    pub name: String,

    #[serde(default)]
    pub values: ValueMap,
}

/// A named accent layered on a base palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColorScheme {
    pub name: String,

    #[serde(default)]
    pub values: ValueMap,

    /// Restricts the scheme to one base palette. Empty means all of them.
    #[serde(default)]
    pub for_base_color: Option<String>,

    #[serde(default)]
    pub for_color_scheme_variant: VariantAffinity,

    #[serde(default)]
    pub is_high_contrast: bool,
}

/// A second overlay composed on top of a color scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColorSchemeVariant {
    pub name: String,

    #[serde(default)]
    pub values: ValueMap,
}

/// How a color scheme takes part in variant expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum VariantAffinity {
    /// Standalone and inside every variant expansion.
    #[default]
    Any,
    /// Standalone only.
    Excluded,
    /// Only inside variant expansion.
    Variant(String),
}

impl From<Option<String>> for VariantAffinity {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            None | Some("") => VariantAffinity::Any,
            Some(NO_VARIANT_SENTINEL) => VariantAffinity::Excluded,
            Some(name) => VariantAffinity::Variant(name.to_string()),
        }
    }
}

impl From<&str> for VariantAffinity {
    fn from(value: &str) -> Self {
        Some(value.to_string()).into()
    }
}

impl VariantAffinity {
    /// True for schemes that get a standalone `{base}.{scheme}` target.
    pub fn is_standalone(&self) -> bool {
        !matches!(self, VariantAffinity::Variant(_))
    }

    /// True for schemes that enter variant expansion.
    pub fn joins_variants(&self) -> bool {
        !matches!(self, VariantAffinity::Excluded)
    }
}

impl ColorScheme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn for_base_color(mut self, base: impl Into<String>) -> Self {
        self.for_base_color = Some(base.into());
        self
    }

    pub fn for_variant(mut self, affinity: impl Into<VariantAffinity>) -> Self {
        self.for_color_scheme_variant = affinity.into();
        self
    }

    pub fn high_contrast(mut self) -> Self {
        self.is_high_contrast = true;
        self
    }

    /// Whether this scheme applies to the base palette named `base`.
    pub fn applies_to_base(&self, base: &str) -> bool {
        match self.for_base_color.as_deref() {
            None | Some("") => true,
            Some(wanted) => wanted == base,
        }
    }
}

impl BaseColorScheme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: ValueMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ColorSchemeVariant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: ValueMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

/// Document formats accepted by [`ParameterSet::from_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterFormat {
    Json,
    Yaml,
}

impl ParameterFormat {
    /// Picks the format from a file extension. Unknown extensions are JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ParameterFormat::Yaml
            }
            _ => ParameterFormat::Json,
        }
    }
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_values.insert(key.into(), value.into());
        self
    }

    pub fn with_base(mut self, base: BaseColorScheme) -> Self {
        self.base_color_schemes.push(base);
        self
    }

    pub fn with_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_schemes.push(scheme);
        self
    }

    pub fn with_variant(mut self, variant: ColorSchemeVariant) -> Self {
        self.additional_color_scheme_variants.push(variant);
        self
    }

    /// Parses and validates a JSON parameter document.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Parses and validates a YAML parameter document.
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        let params: Self = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    /// Parses a document in the given format.
    pub fn parse(content: &str, format: ParameterFormat) -> Result<Self, LoadError> {
        match format {
            ParameterFormat::Json => Self::from_json(content),
            ParameterFormat::Yaml => Self::from_yaml(content),
        }
    }

    /// Reads and parses a parameter file, picking the format from its extension.
    ///
    /// A leading UTF-8 byte-order mark is ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        Self::parse(content, ParameterFormat::from_path(path))
    }

    /// Checks that all names are non-empty and base names are unique.
    pub fn validate(&self) -> Result<(), LoadError> {
        let mut bases = HashSet::new();
        for base in &self.base_color_schemes {
            if base.name.is_empty() {
                return Err(LoadError::Invalid(
                    "base color scheme with an empty name".to_string(),
                ));
            }
            if !bases.insert(base.name.as_str()) {
                return Err(LoadError::Invalid(format!(
                    "base color scheme `{}` is defined more than once",
                    base.name
                )));
            }
        }

        if self.color_schemes.iter().any(|s| s.name.is_empty()) {
            return Err(LoadError::Invalid(
                "color scheme with an empty name".to_string(),
            ));
        }

        if self
            .additional_color_scheme_variants
            .iter()
            .any(|v| v.name.is_empty())
        {
            return Err(LoadError::Invalid(
                "color scheme variant with an empty name".to_string(),
            ));
        }

        Ok(())
    }
}
