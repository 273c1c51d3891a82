//! # schemegen - Theme File Generation
//!
//! `schemegen` generates a family of themed resource files (XAML resource
//! dictionaries, typically) from one template and a small parameter document.
//! The document describes base palettes, named color schemes and optional
//! variants; the generator expands them into the full theme matrix and writes
//! one file per combination.
//!
//! ## Core Concepts
//!
//! - [`ParameterSet`]: the parsed configuration (JSON or YAML)
//! - [`plan`]: expands the configuration into [`GenerationTarget`]s
//! - [`ValueSources`]: first-source-wins value resolution
//! - [`TemplateRenderer`] / [`PlaceholderRenderer`]: `{{Key}}` substitution
//! - [`OutputWriter`]: writes only when content changes
//! - [`JobLock`]: keeps two runs on the same parameter file apart
//! - [`Generator`]: drives a full run
//!
//! ## Quick Start
//!
//! ```rust
//! use schemegen::{Generator, ParameterSet};
//!
//! let params = ParameterSet::from_json(r##"{
//!     "DefaultValues": { "Font": "Segoe UI" },
//!     "BaseColorSchemes": [ { "Name": "Light", "Values": { "Background": "#FFFFFFFF" } } ],
//!     "ColorSchemes": [ { "Name": "Blue", "Values": { "Accent": "#FF0078D7" } } ]
//! }"##).unwrap();
//!
//! let template = r#"<Color x:Key="Accent">{{Accent}}</Color><!-- {{ThemeDisplayName}} -->"#;
//! let out = tempfile::tempdir().unwrap();
//!
//! let report = Generator::new().generate(&params, template, out.path()).unwrap();
//! assert_eq!(report.targets, 1);
//! assert!(out.path().join("Light.Blue.xaml").exists());
//! ```
//!
//! ## Output Names
//!
//! Files are named `{base}[.{scheme}][.{variant}][.HighContrast].{ext}`. See
//! [`plan`](mod@plan) for the expansion rules.
//!
//! ## Idempotence
//!
//! Re-running against unchanged inputs rewrites nothing, so build tools that
//! track modification times see no change. Use [`Generator::force`] to write
//! every file regardless.

pub mod error;
pub mod generator;
pub mod lock;
pub mod params;
pub mod plan;
pub mod render;
pub mod resolve;
pub mod writer;

pub use error::{GenerateError, LoadError, LockError, RenderError};
pub use generator::{
    default_output_dir, default_template_path, GenerationReport, Generator, DEFAULT_EXTENSION,
    DEFAULT_TEMPLATE_FILE_NAME,
};
pub use lock::{JobLock, DEFAULT_LOCK_TIMEOUT};
pub use params::{
    BaseColorScheme, ColorScheme, ColorSchemeVariant, ParameterFormat, ParameterSet, ValueMap,
    VariantAffinity, NO_VARIANT_SENTINEL,
};
pub use plan::{plan, GenerationTarget, TargetKind, HIGH_CONTRAST};
pub use render::{PlaceholderRenderer, TemplateRenderer};
pub use resolve::{resolve, ValueSources};
pub use writer::{OutputWriter, WriteOutcome};
