//! Placeholder substitution.
//!
//! [`TemplateRenderer`] is the seam between the generator and whatever turns a
//! template plus resolved values into file content. The crate ships
//! [`PlaceholderRenderer`], which replaces `{{Key}}` placeholders with values.
//!
//! # Syntax
//!
//! - `{{Key}}` - replaced by the value of `Key`
//! - `{{ Key }}` - whitespace inside the braces is ignored
//! - `{` and `}` on their own are literal, so markup extensions such as
//!   `{StaticResource Accent}` pass through untouched
//!
//! Keys are looked up verbatim. Dots are part of the key, not a path:
//! `{{Colors.Accent}}` looks up the key `"Colors.Accent"`.
//!
//! # Unresolved Placeholders
//!
//! In strict mode (the default) a placeholder with no value is an error. In
//! lenient mode it is copied to the output unchanged, which makes the gap
//! easy to spot in the generated file.
//!
//! ```rust
//! use schemegen::{PlaceholderRenderer, TemplateRenderer, ValueMap};
//!
//! let values = ValueMap::from([("Accent".to_string(), "#FF0078D7".to_string())]);
//! let renderer = PlaceholderRenderer::new();
//!
//! let output = renderer
//!     .render(r#"<Color x:Key="Accent">{{Accent}}</Color>"#, &values)
//!     .unwrap();
//! assert_eq!(output, r##"<Color x:Key="Accent">#FF0078D7</Color>"##);
//! ```

use crate::error::RenderError;
use crate::params::ValueMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Turns a template and resolved values into output content.
pub trait TemplateRenderer {
    fn render(&self, template: &str, values: &ValueMap) -> Result<String, RenderError>;
}

impl<F> TemplateRenderer for F
where
    F: Fn(&str, &ValueMap) -> Result<String, RenderError>,
{
    fn render(&self, template: &str, values: &ValueMap) -> Result<String, RenderError> {
        self(template, values)
    }
}

/// `{{Key}}` substitution renderer.
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    strict: bool,
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderRenderer {
    /// Creates a strict renderer.
    pub fn new() -> Self {
        Self { strict: true }
    }

    /// Creates a renderer that leaves unresolved placeholders in place.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, values: &ValueMap) -> Result<String, RenderError> {
        let mut result = String::with_capacity(template.len());

        scan(template, |segment| {
            match segment {
                Segment::Text(text) => result.push_str(text),
                Segment::Placeholder { key, raw } => match values.get(key) {
                    Some(value) => result.push_str(value),
                    None if self.strict => return Err(RenderError::Unresolved(key.to_string())),
                    None => result.push_str(raw),
                },
            }
            Ok(())
        })?;

        Ok(result)
    }
}

enum Segment<'t> {
    Text(&'t str),
    /// `raw` is the placeholder including its braces.
    Placeholder { key: &'t str, raw: &'t str },
}

fn scan<'t, F>(template: &'t str, mut visit: F) -> Result<(), RenderError>
where
    F: FnMut(Segment<'t>) -> Result<(), RenderError>,
{
    let mut pos = 0;

    while let Some(found) = template[pos..].find(OPEN) {
        let start = pos + found;
        if start > pos {
            visit(Segment::Text(&template[pos..start]))?;
        }

        let inner_start = start + OPEN.len();
        let inner_len = template[inner_start..]
            .find(CLOSE)
            .ok_or(RenderError::Unclosed { offset: start })?;
        let end = inner_start + inner_len + CLOSE.len();

        let key = template[inner_start..inner_start + inner_len].trim();
        if key.is_empty() {
            return Err(RenderError::EmptyPlaceholder { offset: start });
        }

        visit(Segment::Placeholder {
            key,
            raw: &template[start..end],
        })?;
        pos = end;
    }

    if pos < template.len() {
        visit(Segment::Text(&template[pos..]))?;
    }

    Ok(())
}
