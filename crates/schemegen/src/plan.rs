//! Expansion of a [`ParameterSet`] into the list of files to generate.
//!
//! [`plan`] walks the base palettes in declaration order and, for each one,
//! emits targets in three tiers:
//!
//! 1. **Base-only**: `{base}`, only when the configuration defines no color
//!    schemes at all.
//! 2. **Scheme**: `{base}.{scheme}` for every scheme whose
//!    [`VariantAffinity`](crate::VariantAffinity) is standalone.
//! 3. **Variant**: `{base}.{scheme}.{variant}` for every variant crossed with
//!    every scheme that joins variant expansion (standalone schemes first,
//!    then variant-only schemes).
//!
//! Schemes restricted with `ForBaseColor` are skipped for every other base.
//! High-contrast schemes get a ` HighContrast` display-name suffix and a
//! `.HighContrast` file-name segment.
//!
//! Planning is pure: it borrows the parameter set and touches no files, so the
//! whole matrix can be inspected before anything is rendered.
//!
//! ```rust
//! use schemegen::{plan, BaseColorScheme, ColorScheme, ColorSchemeVariant, ParameterSet};
//!
//! let params = ParameterSet::new()
//!     .with_base(BaseColorScheme::new("Light"))
//!     .with_base(BaseColorScheme::new("Dark"))
//!     .with_scheme(ColorScheme::new("Blue"))
//!     .with_variant(ColorSchemeVariant::new("Colorful"));
//!
//! let names: Vec<_> = plan(&params).iter().map(|t| t.file_name("xaml")).collect();
//! assert_eq!(names, [
//!     "Light.Blue.xaml",
//!     "Light.Blue.Colorful.xaml",
//!     "Dark.Blue.xaml",
//!     "Dark.Blue.Colorful.xaml",
//! ]);
//! ```

use crate::params::{ColorScheme, ParameterSet, ValueMap};
use crate::resolve::ValueSources;

/// Display-name suffix and file-name segment of high-contrast targets.
pub const HIGH_CONTRAST: &str = "HighContrast";

/// Keys of the implicit name values every target contributes.
pub mod keys {
    pub const THEME_NAME: &str = "ThemeName";
    pub const THEME_DISPLAY_NAME: &str = "ThemeDisplayName";
    pub const BASE_COLOR_SCHEME: &str = "BaseColorScheme";
    pub const COLOR_SCHEME: &str = "ColorScheme";
    pub const ALTERNATIVE_COLOR_SCHEME: &str = "AlternativeColorScheme";
    pub const IS_HIGH_CONTRAST: &str = "IsHighContrast";
}

/// Which tier of the expansion produced a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    BaseOnly,
    Scheme,
    Variant,
}

/// One file to generate.
#[derive(Debug, Clone)]
pub struct GenerationTarget<'a> {
    pub kind: TargetKind,
    pub theme_name: String,
    /// Includes the ` HighContrast` suffix when applicable.
    pub display_name: String,
    pub base_color_scheme_name: String,
    pub color_scheme_name: String,
    pub alternative_color_scheme_name: String,
    pub is_high_contrast: bool,
    /// Highest precedence first; the defaults are always last.
    pub value_sources: ValueSources<'a>,
}

impl<'a> GenerationTarget<'a> {
    #[allow(clippy::too_many_arguments)]
    fn new(
        kind: TargetKind,
        theme_name: String,
        display_name: String,
        base: &str,
        color_scheme_name: String,
        alternative_color_scheme_name: String,
        is_high_contrast: bool,
        value_sources: ValueSources<'a>,
    ) -> Self {
        let display_name = if is_high_contrast {
            format!("{} {}", display_name, HIGH_CONTRAST)
        } else {
            display_name
        };

        Self {
            kind,
            theme_name,
            display_name,
            base_color_scheme_name: base.to_string(),
            color_scheme_name,
            alternative_color_scheme_name,
            is_high_contrast,
            value_sources,
        }
    }

    /// `{theme}[.HighContrast].{extension}`.
    pub fn file_name(&self, extension: &str) -> String {
        if self.is_high_contrast {
            format!("{}.{}.{}", self.theme_name, HIGH_CONTRAST, extension)
        } else {
            format!("{}.{}", self.theme_name, extension)
        }
    }

    /// The target's own names, substitutable like any other value.
    pub fn name_values(&self) -> ValueMap {
        ValueMap::from([
            (keys::THEME_NAME.to_string(), self.theme_name.clone()),
            (keys::THEME_DISPLAY_NAME.to_string(), self.display_name.clone()),
            (
                keys::BASE_COLOR_SCHEME.to_string(),
                self.base_color_scheme_name.clone(),
            ),
            (keys::COLOR_SCHEME.to_string(), self.color_scheme_name.clone()),
            (
                keys::ALTERNATIVE_COLOR_SCHEME.to_string(),
                self.alternative_color_scheme_name.clone(),
            ),
            (
                keys::IS_HIGH_CONTRAST.to_string(),
                if self.is_high_contrast { "True" } else { "False" }.to_string(),
            ),
        ])
    }

    /// Name values layered above the value sources, resolved into one mapping.
    pub fn effective_values(&self) -> ValueMap {
        let names = self.name_values();
        let mut sources = ValueSources::new();
        sources.push(&names);
        for source in self.value_sources.iter() {
            sources.push(source);
        }
        sources.resolve()
    }
}

/// Enumerates every target implied by `params`, in generation order.
pub fn plan(params: &ParameterSet) -> Vec<GenerationTarget<'_>> {
    let (unvaried, varied): (Vec<&ColorScheme>, Vec<&ColorScheme>) = params
        .color_schemes
        .iter()
        .partition(|scheme| scheme.for_color_scheme_variant.is_standalone());

    let defaults = &params.default_values;
    let mut targets = Vec::new();

    for base in &params.base_color_schemes {
        if unvaried.is_empty() && varied.is_empty() {
            targets.push(GenerationTarget::new(
                TargetKind::BaseOnly,
                base.name.clone(),
                base.name.clone(),
                &base.name,
                String::new(),
                String::new(),
                false,
                ValueSources::from_slice(&[&base.values, defaults]),
            ));
        }

        for scheme in unvaried.iter().filter(|s| s.applies_to_base(&base.name)) {
            targets.push(GenerationTarget::new(
                TargetKind::Scheme,
                format!("{}.{}", base.name, scheme.name),
                format!("{} ({})", scheme.name, base.name),
                &base.name,
                scheme.name.clone(),
                scheme.name.clone(),
                scheme.is_high_contrast,
                ValueSources::from_slice(&[&scheme.values, &base.values, defaults]),
            ));
        }

        for variant in &params.additional_color_scheme_variants {
            for scheme in unvaried.iter().chain(varied.iter()) {
                if !scheme.applies_to_base(&base.name)
                    || !scheme.for_color_scheme_variant.joins_variants()
                {
                    continue;
                }

                let color_scheme_name = format!("{}.{}", scheme.name, variant.name);
                targets.push(GenerationTarget::new(
                    TargetKind::Variant,
                    format!("{}.{}", base.name, color_scheme_name),
                    format!("{} ({})", color_scheme_name, base.name),
                    &base.name,
                    color_scheme_name,
                    scheme.name.clone(),
                    scheme.is_high_contrast,
                    ValueSources::from_slice(&[
                        &scheme.values,
                        &variant.values,
                        &base.values,
                        defaults,
                    ]),
                ));
            }
        }
    }

    targets
}
