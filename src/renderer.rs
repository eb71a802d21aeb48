//! Template rendering for structura.
//! Templates are plain source files with `{{name}}` placeholder tokens that are replaced
//! literally, without any expression language.
use indexmap::IndexMap;

/// Placeholder name (without braces) to substitution text.
pub type Placeholders = IndexMap<String, String>;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Formats the token of a placeholder name, e.g. `class` -> `{{class}}`.
pub fn token(name: &str) -> String {
    format!("{OPEN}{name}{CLOSE}")
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given placeholders.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `placeholders` - Substitution text of each known token
    ///
    /// # Returns
    /// * `String` - Rendered template string
    fn render(&self, template: &str, placeholders: &Placeholders) -> String;
}

/// Literal, single pass placeholder substitution.
///
/// Every occurrence of a known token is replaced by its text. Substituted text is never
/// scanned again and unknown tokens are copied to the output untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, placeholders: &Placeholders) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let replacement = after_open
                .find(CLOSE)
                .and_then(|end| placeholders.get(&after_open[..end]).map(|text| (end, text)));
            match replacement {
                Some((end, text)) => {
                    output.push_str(text);
                    rest = &after_open[end + CLOSE.len()..];
                }
                None => {
                    // Only the first brace is literal, the next one may open a token.
                    output.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }
        output.push_str(rest);
        output
    }
}

/// Tokens of `names` still present in a rendered text.
pub fn unresolved_tokens<'a>(rendered: &str, names: &[&'a str]) -> Vec<&'a str> {
    names.iter().copied().filter(|name| rendered.contains(&token(name))).collect()
}
