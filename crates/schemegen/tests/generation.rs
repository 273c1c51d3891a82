//! End-to-end generation tests against a temporary directory.

use std::fs;
use std::path::Path;
use std::time::Duration;

use schemegen::{
    BaseColorScheme, ColorScheme, ColorSchemeVariant, GenerateError, Generator, JobLock,
    LockError, ParameterSet, DEFAULT_LOCK_TIMEOUT, DEFAULT_TEMPLATE_FILE_NAME,
};
use tempfile::TempDir;

const TEMPLATE: &str = "\
<ResourceDictionary>
    <x:String x:Key=\"Theme.Name\">{{ThemeName}}</x:String>
    <x:String x:Key=\"Theme.DisplayName\">{{ThemeDisplayName}}</x:String>
    <x:String x:Key=\"Theme.BaseColorScheme\">{{BaseColorScheme}}</x:String>
    <x:String x:Key=\"Theme.ColorScheme\">{{ColorScheme}}</x:String>
    <x:String x:Key=\"Theme.AlternativeColorScheme\">{{AlternativeColorScheme}}</x:String>
    <x:Boolean x:Key=\"Theme.IsHighContrast\">{{IsHighContrast}}</x:Boolean>
    <Color x:Key=\"Background\">{{Background}}</Color>
    <Color x:Key=\"Accent\">{{Accent}}</Color>
</ResourceDictionary>
";

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

fn expected(
    name: &str,
    display: &str,
    base: &str,
    scheme: &str,
    alternative: &str,
    high_contrast: &str,
    background: &str,
    accent: &str,
) -> String {
    TEMPLATE
        .replace("{{ThemeName}}", name)
        .replace("{{ThemeDisplayName}}", display)
        .replace("{{BaseColorScheme}}", base)
        .replace("{{ColorScheme}}", scheme)
        .replace("{{AlternativeColorScheme}}", alternative)
        .replace("{{IsHighContrast}}", high_contrast)
        .replace("{{Background}}", background)
        .replace("{{Accent}}", accent)
}

fn light() -> BaseColorScheme {
    BaseColorScheme::new("Light").with_value("Background", "#FFFFFFFF")
}

fn defaults() -> ParameterSet {
    ParameterSet::new()
        .with_default("Background", "#FF808080")
        .with_default("Accent", "#FF000000")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn base_only_configuration_generates_one_file_per_base() {
    let out = TempDir::new().unwrap();
    let params = defaults().with_base(light());

    let report = Generator::new().generate(&params, TEMPLATE, out.path()).unwrap();

    assert_eq!(report.targets, 1);
    assert_eq!(file_names(out.path()), ["Light.xaml"]);
    assert_eq!(
        read(&out, "Light.xaml"),
        expected("Light", "Light", "Light", "", "", "False", "#FFFFFFFF", "#FF000000")
    );
}

#[test]
fn named_scheme_suppresses_base_only_file() {
    let out = TempDir::new().unwrap();
    let params = defaults()
        .with_base(light().with_value("Accent", "#FF111111"))
        .with_scheme(ColorScheme::new("Blue").with_value("Accent", "#FF0078D7"));

    Generator::new().generate(&params, TEMPLATE, out.path()).unwrap();

    assert_eq!(file_names(out.path()), ["Light.Blue.xaml"]);
    assert_eq!(
        read(&out, "Light.Blue.xaml"),
        expected(
            "Light.Blue",
            "Blue (Light)",
            "Light",
            "Blue",
            "Blue",
            "False",
            "#FFFFFFFF",
            "#FF0078D7"
        )
    );
}

#[test]
fn variant_expansion_layers_variant_between_scheme_and_base() {
    let out = TempDir::new().unwrap();
    let params = defaults()
        .with_base(light())
        .with_scheme(ColorScheme::new("Blue").with_value("Accent", "#FF0078D7"))
        .with_variant(ColorSchemeVariant::new("HC").with_value("Background", "#FF000000"));

    Generator::new().generate(&params, TEMPLATE, out.path()).unwrap();

    assert_eq!(file_names(out.path()), ["Light.Blue.HC.xaml", "Light.Blue.xaml"]);
    assert_eq!(
        read(&out, "Light.Blue.HC.xaml"),
        expected(
            "Light.Blue.HC",
            "Blue.HC (Light)",
            "Light",
            "Blue.HC",
            "Blue",
            "False",
            "#FF000000",
            "#FF0078D7"
        )
    );
}

#[test]
fn high_contrast_scheme_naming() {
    let out = TempDir::new().unwrap();
    let params = defaults()
        .with_base(light())
        .with_scheme(
            ColorScheme::new("Green")
                .with_value("Accent", "#FF00FF00")
                .high_contrast(),
        );

    Generator::new().generate(&params, TEMPLATE, out.path()).unwrap();

    assert_eq!(file_names(out.path()), ["Light.Green.HighContrast.xaml"]);
    let content = read(&out, "Light.Green.HighContrast.xaml");
    assert!(content.contains(">Green (Light) HighContrast<"));
    assert!(content.contains(">True<"));
}

#[test]
fn full_matrix() {
    let out = TempDir::new().unwrap();
    let params = defaults()
        .with_base(light())
        .with_base(BaseColorScheme::new("Dark").with_value("Background", "#FF252525"))
        .with_scheme(ColorScheme::new("Blue"))
        .with_scheme(ColorScheme::new("Amoled").for_base_color("Dark").for_variant("None"))
        .with_scheme(ColorScheme::new("Lime").for_variant("Colorful").high_contrast())
        .with_variant(ColorSchemeVariant::new("Colorful"));

    let report = Generator::new().generate(&params, TEMPLATE, out.path()).unwrap();

    assert_eq!(report.targets, 7);
    assert_eq!(
        file_names(out.path()),
        [
            "Dark.Amoled.xaml",
            "Dark.Blue.Colorful.xaml",
            "Dark.Blue.xaml",
            "Dark.Lime.Colorful.HighContrast.xaml",
            "Light.Blue.Colorful.xaml",
            "Light.Blue.xaml",
            "Light.Lime.Colorful.HighContrast.xaml",
        ]
    );
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn rerun_with_unchanged_inputs_writes_nothing() {
    let out = TempDir::new().unwrap();
    let params = defaults()
        .with_base(light())
        .with_scheme(ColorScheme::new("Blue"))
        .with_variant(ColorSchemeVariant::new("HC"));
    let generator = Generator::new();

    let first = generator.generate(&params, TEMPLATE, out.path()).unwrap();
    assert_eq!(first.written.len(), 2);
    assert!(first.unchanged.is_empty());

    let second = generator.generate(&params, TEMPLATE, out.path()).unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), 2);
}

#[test]
fn changed_template_rewrites_every_file() {
    let out = TempDir::new().unwrap();
    let params = defaults().with_base(light()).with_scheme(ColorScheme::new("Blue"));
    let generator = Generator::new();

    generator.generate(&params, TEMPLATE, out.path()).unwrap();
    let report = generator
        .generate(&params, "{{ThemeName}}", out.path())
        .unwrap();

    assert_eq!(report.written.len(), 1);
    assert_eq!(read(&out, "Light.Blue.xaml"), "Light.Blue");
}

#[test]
fn force_rewrites_unchanged_files() {
    let out = TempDir::new().unwrap();
    let params = defaults().with_base(light());

    Generator::new().generate(&params, TEMPLATE, out.path()).unwrap();
    let report = Generator::new()
        .force(true)
        .generate(&params, TEMPLATE, out.path())
        .unwrap();

    assert_eq!(report.written.len(), 1);
    assert!(report.unchanged.is_empty());
}

// ============================================================================
// File-based runs
// ============================================================================

const PARAMETERS_JSON: &str = r##"{
    "DefaultValues": { "Background": "#FF808080", "Accent": "#FF000000" },
    "BaseColorSchemes": [ { "Name": "Light", "Values": { "Background": "#FFFFFFFF" } } ],
    "ColorSchemes": [ { "Name": "Blue", "Values": { "Accent": "#FF0078D7" } } ]
}"##;

#[test]
fn generate_files_uses_default_template_and_output_dir() {
    let dir = TempDir::new().unwrap();
    let parameters = dir.path().join("GeneratorParameters.json");
    fs::write(&parameters, PARAMETERS_JSON).unwrap();
    fs::write(dir.path().join(DEFAULT_TEMPLATE_FILE_NAME), "{{Accent}}").unwrap();

    let report = Generator::new()
        .generate_files(&parameters, None, None)
        .unwrap();

    assert_eq!(report.written, [dir.path().join("Light.Blue.xaml")]);
    assert_eq!(read(&dir, "Light.Blue.xaml"), "#FF0078D7");
}

#[test]
fn generate_files_with_explicit_template_and_output_dir() {
    let dir = TempDir::new().unwrap();
    let parameters = dir.path().join("params.yaml");
    fs::write(
        &parameters,
        "BaseColorSchemes:\n  - Name: Dark\n    Values:\n      Background: black\n",
    )
    .unwrap();
    let template = dir.path().join("custom.template");
    fs::write(&template, "bg={{Background}}").unwrap();
    let out = dir.path().join("generated");

    Generator::new()
        .generate_exclusive(&parameters, Some(&template), Some(&out))
        .unwrap();

    assert_eq!(fs::read_to_string(out.join("Dark.xaml")).unwrap(), "bg=black");
}

#[test]
fn missing_parameters_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();

    let err = Generator::new()
        .generate_files(&dir.path().join("missing.json"), None, None)
        .unwrap_err();

    assert!(matches!(err, GenerateError::Parameters { .. }));
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn malformed_parameters_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let parameters = dir.path().join("params.json");
    fs::write(&parameters, "{ not json").unwrap();

    let err = Generator::new()
        .generate_files(&parameters, None, None)
        .unwrap_err();

    assert!(matches!(err, GenerateError::Parameters { .. }));
}

#[test]
fn missing_template_is_template_error() {
    let dir = TempDir::new().unwrap();
    let parameters = dir.path().join("params.json");
    fs::write(&parameters, PARAMETERS_JSON).unwrap();

    let err = Generator::new()
        .generate_files(&parameters, None, None)
        .unwrap_err();

    assert!(matches!(err, GenerateError::Template { .. }));
}

// ============================================================================
// Job lock
// ============================================================================

#[test]
fn held_lock_times_out_without_writing() {
    let dir = TempDir::new().unwrap();
    let parameters = dir.path().join("GeneratorParameters.json");
    fs::write(&parameters, PARAMETERS_JSON).unwrap();
    fs::write(dir.path().join(DEFAULT_TEMPLATE_FILE_NAME), "{{Accent}}").unwrap();
    let out = dir.path().join("out");

    let _held = JobLock::acquire(&parameters, DEFAULT_LOCK_TIMEOUT).unwrap();
    let err = Generator::new()
        .lock_timeout(Duration::from_millis(100))
        .generate_exclusive(&parameters, None, Some(&out))
        .unwrap_err();

    assert!(matches!(err, GenerateError::Lock(LockError::Timeout { .. })));
    assert!(!out.exists());
    assert!(!dir.path().join("Light.Blue.xaml").exists());
}

#[test]
fn lock_is_released_after_exclusive_run() {
    let dir = TempDir::new().unwrap();
    let parameters = dir.path().join("GeneratorParameters.json");
    fs::write(&parameters, PARAMETERS_JSON).unwrap();
    fs::write(dir.path().join(DEFAULT_TEMPLATE_FILE_NAME), "{{Accent}}").unwrap();
    let generator = Generator::new().lock_timeout(Duration::from_millis(100));

    generator.generate_exclusive(&parameters, None, None).unwrap();
    let report = generator.generate_exclusive(&parameters, None, None).unwrap();

    assert_eq!(report.unchanged, [dir.path().join("Light.Blue.xaml")]);
}
