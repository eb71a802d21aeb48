//! Placeholder maps of each artifact kind.

use crate::error::{Error, Result};
use crate::kind::ArtifactKind;
use crate::name::ResolvedName;
use crate::options::EffectiveOptions;
use crate::renderer::Placeholders;
use regex::Regex;
use std::sync::LazyLock;

static PHP_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*$")
        .expect("valid identifier pattern")
});

const EMPTY_BODY: &str = "    //";

/// Inputs shared by every placeholder builder.
pub struct Context<'a> {
    pub name: &'a ResolvedName,
    pub namespace: &'a str,
    pub options: &'a EffectiveOptions,
    pub support_namespace: &'a str,
}

impl Context<'_> {
    fn base(&self) -> Placeholders {
        let mut placeholders = Placeholders::new();
        placeholders.insert("namespace".to_string(), self.namespace.to_string());
        placeholders.insert("class".to_string(), self.name.class_name().to_string());
        placeholders
    }

    fn import(&self, path: &str) -> String {
        format!("\nuse {}\\{path};\n", self.support_namespace)
    }
}

fn method(signature: &str) -> String {
    format!("    public function {signature}()\n    {{\n        //\n    }}")
}

fn insert(placeholders: &mut Placeholders, name: &str, value: impl Into<String>) {
    placeholders.insert(name.to_string(), value.into());
}

/// Builds the placeholder map of a kind.
///
/// # Errors
/// * `Error::InvalidNameError` if an enum case cannot be turned into a PHP identifier
pub fn placeholders(kind: ArtifactKind, context: &Context) -> Result<Placeholders> {
    match kind {
        ArtifactKind::Action => Ok(action(context)),
        ArtifactKind::Service => Ok(service(context)),
        ArtifactKind::Cache => Ok(cache(context)),
        ArtifactKind::Dto => Ok(dto(context)),
        ArtifactKind::Enum => enumeration(context),
        ArtifactKind::Helper => Ok(helper(context)),
        ArtifactKind::Trait => Ok(context.base()),
    }
}

fn action(context: &Context) -> Placeholders {
    let options = context.options;
    let mut placeholders = context.base();

    let constructor = if options.flag("construct") && !options.flag("raw") {
        format!("{}\n\n", method("__construct"))
    } else {
        String::new()
    };
    let body = if options.flag("handle") {
        method("handle")
    } else if options.flag("invokable") {
        method("__invoke")
    } else if options.flag("raw") {
        EMPTY_BODY.to_string()
    } else {
        method("execute")
    };

    insert(&mut placeholders, "constructor", constructor);
    insert(&mut placeholders, "method", body);
    placeholders
}

fn service(context: &Context) -> Placeholders {
    let options = context.options;
    let mut placeholders = context.base();
    let body = if options.flag("construct") && !options.flag("raw") {
        method("__construct")
    } else {
        EMPTY_BODY.to_string()
    };
    insert(&mut placeholders, "method", body);
    placeholders
}

/// Cache key prefix: the class name without its `Cache` suffix, lower-cased.
///
/// The suffix matches in any casing as long as it starts a word (`SampleCACHE` -> `sample`),
/// so a name that merely ends in the letters (`Precache`) is kept whole.
pub fn cache_prefix(class_name: &str) -> String {
    const WORD: &str = "cache";
    let split = class_name.len().saturating_sub(WORD.len());
    let stem = match class_name.get(split..) {
        Some(tail) if tail.eq_ignore_ascii_case(WORD) && tail.starts_with('C') => {
            &class_name[..split]
        }
        _ => class_name,
    };
    stem.to_lowercase()
}

fn cache(context: &Context) -> Placeholders {
    let options = context.options;
    let mut placeholders = context.base();
    let extend = options.flag("extend") && !options.flag("raw");

    let imports = if extend { context.import("Support\\Cache\\CacheSupport") } else { String::new() };
    let extends = if extend { " extends CacheSupport" } else { "" };
    let prefix = if options.flag("raw") {
        EMPTY_BODY.to_string()
    } else {
        format!(
            "    /**\n     * Name of the cache key.\n     *\n     * @var string\n     */\n    protected string $prefix = '{}';",
            cache_prefix(context.name.class_name())
        )
    };

    insert(&mut placeholders, "imports", imports);
    insert(&mut placeholders, "extends", extends);
    insert(&mut placeholders, "prefix", prefix);
    placeholders
}

fn dto(context: &Context) -> Placeholders {
    let options = context.options;
    let raw = options.flag("raw");
    let with_trait = !raw && options.flag("trait");
    let mut placeholders = context.base();

    insert(&mut placeholders, "final", if raw || options.flag("no-final") { "" } else { "final " });
    insert(
        &mut placeholders,
        "readonly",
        if raw || options.flag("no-readonly") { "" } else { "readonly " },
    );
    insert(
        &mut placeholders,
        "imports",
        if with_trait { context.import("Concerns\\InteractsWithDTO") } else { String::new() },
    );
    insert(
        &mut placeholders,
        "trait",
        if with_trait { "    use InteractsWithDTO;\n\n" } else { "" },
    );
    let constructor = if raw || options.flag("no-construct") {
        EMPTY_BODY
    } else {
        "    public function __construct(\n        // Define your DTO properties here\n    ) {}"
    };
    insert(&mut placeholders, "constructor", constructor);
    placeholders
}

/// One case of a generated enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    pub identifier: String,
    pub label: String,
    /// Normalized source token, used as the value of string-backed enums.
    pub token: String,
}

fn title_words(token: &str) -> Vec<String> {
    token
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split(' ')
        .map(crate::name::capitalize)
        .collect()
}

/// Parses a comma separated case list. Tokens are trimmed and empty ones dropped.
///
/// # Errors
/// * `Error::InvalidNameError` if a token does not produce a valid PHP identifier, or two
///   tokens produce the same identifier
pub fn parse_cases(cases: &str) -> Result<Vec<EnumCase>> {
    let mut parsed: Vec<EnumCase> = Vec::new();
    for token in cases.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        let words = title_words(token);
        let identifier = words.concat();
        if !PHP_IDENTIFIER.is_match(&identifier) {
            return Err(Error::InvalidNameError {
                message: format!("Invalid enum case '{token}'."),
            });
        }
        if parsed.iter().any(|case| case.identifier == identifier) {
            return Err(Error::InvalidNameError {
                message: format!("Duplicate enum case '{identifier}'."),
            });
        }
        parsed.push(EnumCase { identifier, label: words.join(" "), token: token.to_lowercase() });
    }
    Ok(parsed)
}

fn case_lines(cases: &[EnumCase], backed: Option<&str>) -> String {
    if cases.is_empty() {
        return EMPTY_BODY.to_string();
    }
    cases
        .iter()
        .enumerate()
        .map(|(index, case)| match backed {
            Some("string") => format!("    case {} = '{}';", case.identifier, case.token),
            Some("int") => format!("    case {} = {};", case.identifier, index + 1),
            _ => format!("    case {};", case.identifier),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn label_method(cases: &[EnumCase]) -> String {
    let arms = if cases.is_empty() {
        "            default => '',".to_string()
    } else {
        cases
            .iter()
            .map(|case| format!("            self::{} => '{}',", case.identifier, case.label))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "\n\n    public function label(): string\n    {{\n        return match ($this) {{\n{arms}\n        }};\n    }}"
    )
}

fn enumeration(context: &Context) -> Result<Placeholders> {
    let options = context.options;
    let cases = parse_cases(options.text("cases").unwrap_or_default())?;
    let backed = options.text("backed");
    let with_trait = options.flag("trait");
    let mut placeholders = context.base();

    let enum_declaration = match backed {
        Some(backing) => format!("{}: {backing}", context.name.class_name()),
        None => context.name.class_name().to_string(),
    };
    insert(&mut placeholders, "enum", enum_declaration);
    insert(
        &mut placeholders,
        "imports",
        if with_trait { context.import("Concerns\\InteractsWithEnum") } else { String::new() },
    );
    insert(
        &mut placeholders,
        "trait",
        if with_trait { "    use InteractsWithEnum;\n\n" } else { "" },
    );
    insert(&mut placeholders, "cases", case_lines(&cases, backed));
    insert(
        &mut placeholders,
        "methods",
        if options.flag("label") { label_method(&cases) } else { String::new() },
    );
    Ok(placeholders)
}

fn helper(context: &Context) -> Placeholders {
    let mut placeholders = context.base();
    let example = if context.options.flag("raw") {
        EMPTY_BODY
    } else {
        "    /**\n     * Example helper method.\n     *\n     * @param mixed $value\n     * @return mixed\n     */\n    public static function example(mixed $value): mixed\n    {\n        return $value;\n    }"
    };
    insert(&mut placeholders, "example", example);
    placeholders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_identifiers_and_labels() {
        let cases = parse_cases(" first_value , second-value,,THIRD ").unwrap();
        let identifiers: Vec<&str> = cases.iter().map(|c| c.identifier.as_str()).collect();
        let labels: Vec<&str> = cases.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(identifiers, ["FirstValue", "SecondValue", "Third"]);
        assert_eq!(labels, ["First Value", "Second Value", "Third"]);
    }

    #[test]
    fn test_int_values_follow_non_empty_tokens() {
        let cases = parse_cases("a,,b").unwrap();
        assert_eq!(case_lines(&cases, Some("int")), "    case A = 1;\n    case B = 2;");
    }

    #[test]
    fn test_string_values_are_lowercased_tokens() {
        let cases = parse_cases("First,Second").unwrap();
        assert_eq!(
            case_lines(&cases, Some("string")),
            "    case First = 'first';\n    case Second = 'second';"
        );
        assert_eq!(case_lines(&cases, None), "    case First;\n    case Second;");
    }

    #[test]
    fn test_invalid_cases_are_rejected() {
        for cases in ["1st", "it's", "first,FIRST"] {
            assert!(
                matches!(parse_cases(cases), Err(Error::InvalidNameError { .. })),
                "{cases:?}"
            );
        }
    }

    #[test]
    fn test_label_method_without_cases_has_default_arm() {
        assert!(label_method(&[]).contains("default => '',"));
        assert_eq!(case_lines(&[], None), EMPTY_BODY);
    }

    #[test]
    fn test_cache_prefix() {
        assert_eq!(cache_prefix("SampleCache"), "sample");
        assert_eq!(cache_prefix("UserProfileCache"), "userprofile");
        assert_eq!(cache_prefix("SampleCACHE"), "sample");
        assert_eq!(cache_prefix("Precache"), "precache");
    }
}
