//! Artifact kinds and their declarative rule tables.
//! Each kind carries its suffix rule, the options it understands, the exclusivity
//! groups between those options and the placeholder tokens its template expects.

use std::fmt;

/// Category of generated source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Action,
    Service,
    Cache,
    Dto,
    Enum,
    Helper,
    Trait,
}

/// How the kind word is applied to the last segment of a resolved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixRule {
    /// Append the word unless the name already ends with it (case-insensitive).
    Append(&'static str),
    /// Remove the word from the end of the name.
    Strip(&'static str),
}

/// Value type accepted by an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    /// Boolean switch.
    Flag,
    /// Free-form text.
    Text,
    /// Text restricted to the listed values.
    Choice(&'static [&'static str]),
}

/// Declaration of a single generator option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub option_type: OptionType,
    /// Hard-coded fallback for flags. Text and choice options fall back to "unset".
    pub default: bool,
}

impl OptionSpec {
    const fn flag(name: &'static str, default: bool) -> Self {
        Self { name, option_type: OptionType::Flag, default }
    }

    const fn text(name: &'static str) -> Self {
        Self { name, option_type: OptionType::Text, default: false }
    }

    const fn choice(name: &'static str, choices: &'static [&'static str]) -> Self {
        Self { name, option_type: OptionType::Choice(choices), default: false }
    }
}

/// Rule table of one artifact kind.
#[derive(Debug)]
pub struct KindRules {
    pub options: &'static [OptionSpec],
    /// Groups of flags of which at most one may be true.
    pub exclusive: &'static [&'static [&'static str]],
    /// Tokens the placeholder map of this kind must define.
    pub placeholders: &'static [&'static str],
}

impl KindRules {
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.name == name)
    }

    /// Exclusivity groups the given option belongs to.
    pub fn groups_of<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'static [&'static str]> + 'a {
        self.exclusive
            .iter()
            .copied()
            .filter(move |group| group.iter().any(|member| *member == name))
    }
}

pub const BACKED_TYPES: &[&str] = &["string", "int"];

static ACTION_RULES: KindRules = KindRules {
    options: &[
        OptionSpec::flag("construct", false),
        OptionSpec::flag("execute", true),
        OptionSpec::flag("handle", false),
        OptionSpec::flag("invokable", false),
        OptionSpec::flag("raw", false),
    ],
    exclusive: &[&["execute", "handle", "invokable", "raw"], &["construct", "raw"]],
    placeholders: &["namespace", "class", "constructor", "method"],
};

static SERVICE_RULES: KindRules = KindRules {
    options: &[OptionSpec::flag("construct", true), OptionSpec::flag("raw", false)],
    exclusive: &[&["construct", "raw"]],
    placeholders: &["namespace", "class", "method"],
};

static CACHE_RULES: KindRules = KindRules {
    options: &[OptionSpec::flag("extend", true), OptionSpec::flag("raw", false)],
    exclusive: &[&["extend", "raw"]],
    placeholders: &["namespace", "class", "imports", "extends", "prefix"],
};

static DTO_RULES: KindRules = KindRules {
    options: &[
        OptionSpec::flag("no-final", false),
        OptionSpec::flag("no-readonly", false),
        OptionSpec::flag("no-construct", false),
        OptionSpec::flag("trait", false),
        OptionSpec::flag("raw", false),
    ],
    exclusive: &[
        &["raw", "no-final"],
        &["raw", "no-readonly"],
        &["raw", "no-construct"],
        &["raw", "trait"],
    ],
    placeholders: &[
        "namespace",
        "class",
        "final",
        "readonly",
        "imports",
        "trait",
        "constructor",
    ],
};

static ENUM_RULES: KindRules = KindRules {
    options: &[
        OptionSpec::choice("backed", BACKED_TYPES),
        OptionSpec::text("cases"),
        OptionSpec::flag("label", false),
        OptionSpec::flag("trait", false),
    ],
    exclusive: &[],
    placeholders: &["namespace", "imports", "enum", "trait", "cases", "methods"],
};

static HELPER_RULES: KindRules = KindRules {
    options: &[
        OptionSpec::flag("example", true),
        OptionSpec::flag("global", false),
        OptionSpec::flag("stub", false),
        OptionSpec::flag("raw", false),
    ],
    exclusive: &[&["example", "global", "stub", "raw"]],
    placeholders: &["namespace", "class", "example"],
};

static TRAIT_RULES: KindRules =
    KindRules { options: &[], exclusive: &[], placeholders: &["namespace", "class"] };

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 7] = [
        ArtifactKind::Action,
        ArtifactKind::Service,
        ArtifactKind::Cache,
        ArtifactKind::Dto,
        ArtifactKind::Enum,
        ArtifactKind::Helper,
        ArtifactKind::Trait,
    ];

    /// Key used in configuration tables and stub file names.
    pub fn key(&self) -> &'static str {
        match self {
            ArtifactKind::Action => "action",
            ArtifactKind::Service => "service",
            ArtifactKind::Cache => "cache",
            ArtifactKind::Dto => "dto",
            ArtifactKind::Enum => "enum",
            ArtifactKind::Helper => "helper",
            ArtifactKind::Trait => "trait",
        }
    }

    /// Word used for suffixes and user-facing messages.
    pub fn word(&self) -> &'static str {
        match self {
            ArtifactKind::Action => "Action",
            ArtifactKind::Service => "Service",
            ArtifactKind::Cache => "Cache",
            ArtifactKind::Dto => "DTO",
            ArtifactKind::Enum => "Enum",
            ArtifactKind::Helper => "Helper",
            ArtifactKind::Trait => "Trait",
        }
    }

    pub fn suffix_rule(&self) -> SuffixRule {
        match self {
            ArtifactKind::Trait => SuffixRule::Strip(self.word()),
            _ => SuffixRule::Append(self.word()),
        }
    }

    pub fn rules(&self) -> &'static KindRules {
        match self {
            ArtifactKind::Action => &ACTION_RULES,
            ArtifactKind::Service => &SERVICE_RULES,
            ArtifactKind::Cache => &CACHE_RULES,
            ArtifactKind::Dto => &DTO_RULES,
            ArtifactKind::Enum => &ENUM_RULES,
            ArtifactKind::Helper => &HELPER_RULES,
            ArtifactKind::Trait => &TRAIT_RULES,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}
