//! Generation orchestration.
//!
//! [`Generator`] ties the pieces together for one run:
//!
//! 1. load the [`ParameterSet`] and read the template,
//! 2. make sure the output directory exists,
//! 3. [`plan`] the targets,
//! 4. for each target, resolve its values (name values first), render the
//!    template and hand the result to the [`OutputWriter`].
//!
//! Targets are processed strictly in plan order on the calling thread. The
//! first render or write error stops the run; files written before it are
//! kept.
//!
//! # Default Paths
//!
//! | Input | Default |
//! |-------|---------|
//! | template | [`DEFAULT_TEMPLATE_FILE_NAME`] next to the parameter file |
//! | output directory | the template's directory |
//! | extension | [`DEFAULT_EXTENSION`] |
//!
//! # Example
//!
//! ```rust
//! use schemegen::{BaseColorScheme, ColorScheme, Generator, ParameterSet};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let params = ParameterSet::new()
//!     .with_base(BaseColorScheme::new("Light").with_value("Background", "White"))
//!     .with_scheme(ColorScheme::new("Blue").with_value("Accent", "Blue"));
//!
//! let report = Generator::new()
//!     .generate(&params, "{{ThemeDisplayName}}: {{Accent}} on {{Background}}", dir.path())
//!     .unwrap();
//!
//! assert_eq!(report.written.len(), 1);
//! let content = std::fs::read_to_string(dir.path().join("Light.Blue.xaml")).unwrap();
//! assert_eq!(content, "Blue (Light): Blue on White");
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GenerateError;
use crate::lock::{JobLock, DEFAULT_LOCK_TIMEOUT};
use crate::params::ParameterSet;
use crate::plan::plan;
use crate::render::{PlaceholderRenderer, TemplateRenderer};
use crate::writer::{OutputWriter, WriteOutcome};

/// Template looked up next to the parameter file when none is given.
pub const DEFAULT_TEMPLATE_FILE_NAME: &str = "Theme.Template.xaml";

/// Extension of generated files unless configured otherwise.
pub const DEFAULT_EXTENSION: &str = "xaml";

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of targets planned and processed.
    pub targets: usize,
    /// Files created or replaced, in generation order.
    pub written: Vec<PathBuf>,
    /// Files left alone because their content was already current.
    pub unchanged: Vec<PathBuf>,
}

impl GenerationReport {
    fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.written.push(path),
            WriteOutcome::Unchanged => self.unchanged.push(path),
        }
    }
}

/// Drives a generation run.
#[derive(Debug, Clone)]
pub struct Generator<R = PlaceholderRenderer> {
    renderer: R,
    writer: OutputWriter,
    extension: String,
    lock_timeout: Duration,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Creates a generator with the strict [`PlaceholderRenderer`].
    pub fn new() -> Self {
        Self {
            renderer: PlaceholderRenderer::new(),
            writer: OutputWriter::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}

impl<R: TemplateRenderer> Generator<R> {
    /// Replaces the template renderer.
    pub fn renderer<S: TemplateRenderer>(self, renderer: S) -> Generator<S> {
        Generator {
            renderer,
            writer: self.writer,
            extension: self.extension,
            lock_timeout: self.lock_timeout,
        }
    }

    /// Writes every file even when its content is unchanged.
    pub fn force(mut self, force: bool) -> Self {
        self.writer = self.writer.force(force);
        self
    }

    /// Sets the extension of generated files (without the leading dot).
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets how long [`Generator::generate_exclusive`] waits for the job lock.
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Runs [`Generator::generate_files`] while holding the job lock for
    /// `parameters_file`.
    pub fn generate_exclusive(
        &self,
        parameters_file: &Path,
        template_file: Option<&Path>,
        output_dir: Option<&Path>,
    ) -> Result<GenerationReport, GenerateError> {
        let _lock = JobLock::acquire(parameters_file, self.lock_timeout)?;
        self.generate_files(parameters_file, template_file, output_dir)
    }

    /// Loads the parameters and template from disk and generates every target.
    pub fn generate_files(
        &self,
        parameters_file: &Path,
        template_file: Option<&Path>,
        output_dir: Option<&Path>,
    ) -> Result<GenerationReport, GenerateError> {
        let params =
            ParameterSet::from_file(parameters_file).map_err(|source| GenerateError::Parameters {
                path: parameters_file.to_path_buf(),
                source,
            })?;

        let template_file = match template_file {
            Some(path) => path.to_path_buf(),
            None => default_template_path(parameters_file),
        };
        let output_dir = match output_dir {
            Some(path) => path.to_path_buf(),
            None => default_output_dir(&template_file)?,
        };

        tracing::debug!(
            parameters = %parameters_file.display(),
            template = %template_file.display(),
            output = %output_dir.display(),
            "starting generation"
        );

        let template = read_template(&template_file)?;
        self.generate(&params, &template, &output_dir)
    }

    /// Generates every target of `params` from `template` into `output_dir`.
    pub fn generate(
        &self,
        params: &ParameterSet,
        template: &str,
        output_dir: &Path,
    ) -> Result<GenerationReport, GenerateError> {
        fs::create_dir_all(output_dir).map_err(|source| GenerateError::OutputDirectory {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let targets = plan(params);
        let mut report = GenerationReport {
            targets: targets.len(),
            ..GenerationReport::default()
        };
        let mut seen = HashSet::new();

        for target in &targets {
            let path = output_dir.join(target.file_name(&self.extension));

            tracing::debug!(
                theme = %target.theme_name,
                display_name = %target.display_name,
                base = %target.base_color_scheme_name,
                scheme = %target.color_scheme_name,
                alternative = %target.alternative_color_scheme_name,
                high_contrast = target.is_high_contrast,
                file = %path.display(),
                "checking target"
            );

            if !seen.insert(path.clone()) {
                tracing::warn!(
                    file = %path.display(),
                    theme = %target.theme_name,
                    "several targets map to the same file; the last one wins"
                );
            }

            let content = self
                .renderer
                .render(template, &target.effective_values())
                .map_err(|source| GenerateError::Render {
                    theme: target.theme_name.clone(),
                    source,
                })?;

            let outcome = self
                .writer
                .write(&path, &content)
                .map_err(|source| GenerateError::Write {
                    path: path.clone(),
                    source,
                })?;

            match outcome {
                WriteOutcome::Written => {
                    tracing::info!(file = %path.display(), "resource dictionary saved")
                }
                WriteOutcome::Unchanged => {
                    tracing::debug!(file = %path.display(), "content unchanged, not written")
                }
            }
            report.record(path, outcome);
        }

        Ok(report)
    }
}

/// [`DEFAULT_TEMPLATE_FILE_NAME`] in the parameter file's directory.
pub fn default_template_path(parameters_file: &Path) -> PathBuf {
    parameters_file
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_TEMPLATE_FILE_NAME)
}

/// The absolute directory containing `template_file`.
pub fn default_output_dir(template_file: &Path) -> Result<PathBuf, GenerateError> {
    let absolute =
        std::path::absolute(template_file).map_err(|source| GenerateError::OutputDirectory {
            path: template_file.to_path_buf(),
            source,
        })?;

    absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| GenerateError::OutputDirectory {
            path: absolute.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "template path has no parent directory",
            ),
        })
}

fn read_template(path: &Path) -> Result<String, GenerateError> {
    let content = fs::read_to_string(path).map_err(|source| GenerateError::Template {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}
