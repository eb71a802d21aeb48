//! Option resolution for generator commands.
//! Merges the flags of one invocation with the configured defaults of the artifact kind,
//! falling back to the hard-coded defaults of the kind's rule table.

use crate::error::{Error, Result};
use crate::kind::{ArtifactKind, KindRules, OptionSpec, OptionType};
use indexmap::IndexMap;
use log::debug;

/// Value of a resolved option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

/// Options passed explicitly on the command line. Absent flags are not present.
pub type Flags = IndexMap<String, OptionValue>;

/// Configured defaults of one kind, as read from the configuration file.
pub type ConfiguredOptions = IndexMap<String, serde_json::Value>;

/// Final option set of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveOptions {
    values: IndexMap<String, OptionValue>,
}

impl EffectiveOptions {
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Flag(true)))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Names of the flags that resolved to true.
    pub fn selected(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, value)| **value == OptionValue::Flag(true))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Picks the explicit value if the flag was passed, then the configured default, then the
/// hard default.
pub fn resolve<T>(explicit: Option<T>, configured: Option<T>, hard_default: T) -> T {
    explicit.or(configured).unwrap_or(hard_default)
}

/// Fails if more than one option of any exclusivity group is selected.
///
/// # Errors
/// * `Error::ConflictingOptionsError` naming the selected members of the first violated group
pub fn validate_exclusive(groups: &[&[&str]], selected: &[&str]) -> Result<()> {
    for group in groups {
        let chosen: Vec<String> = group
            .iter()
            .filter(|member| selected.iter().any(|name| name == *member))
            .map(|member| member.to_string())
            .collect();
        if chosen.len() > 1 {
            return Err(Error::ConflictingOptionsError { options: chosen });
        }
    }
    Ok(())
}

fn check_choice(spec: &OptionSpec, value: &str) -> Result<()> {
    if let OptionType::Choice(choices) = spec.option_type {
        if !choices.iter().any(|choice| *choice == value) {
            return Err(Error::UnsupportedValueError {
                option: spec.name.to_string(),
                value: value.to_string(),
                expected: choices.join(" or "),
            });
        }
    }
    Ok(())
}

/// Converts a configured value to the option's type. `null` means "unset".
fn configured_value(
    kind: ArtifactKind,
    spec: &OptionSpec,
    value: &serde_json::Value,
) -> Result<Option<OptionValue>> {
    match (spec.option_type, value) {
        (_, serde_json::Value::Null) => Ok(None),
        (OptionType::Flag, serde_json::Value::Bool(flag)) => Ok(Some(OptionValue::Flag(*flag))),
        (OptionType::Text | OptionType::Choice(_), serde_json::Value::String(text)) => {
            check_choice(spec, text)?;
            Ok(Some(OptionValue::Text(text.clone())))
        }
        _ => Err(Error::ConfigError(format!(
            "default option '{}.{}' has an invalid value: {}",
            kind.key(),
            spec.name,
            value
        ))),
    }
}

/// Resolves the effective options of one invocation.
pub struct OptionResolver {
    kind: ArtifactKind,
    rules: &'static KindRules,
}

impl OptionResolver {
    pub fn new(kind: ArtifactKind) -> Self {
        Self { kind, rules: kind.rules() }
    }

    /// Checks the explicit flags on their own, before any default is consulted.
    pub fn validate_flags(&self, flags: &Flags) -> Result<()> {
        for name in flags.keys() {
            if self.rules.option(name).is_none() {
                return Err(Error::ConfigError(format!(
                    "unknown option '{}' for {}",
                    name,
                    self.kind.key()
                )));
            }
        }
        let explicit: Vec<&str> = flags
            .iter()
            .filter(|(_, value)| **value == OptionValue::Flag(true))
            .map(|(name, _)| name.as_str())
            .collect();
        validate_exclusive(self.rules.exclusive, &explicit)
    }

    /// Merges flags, configured defaults and hard defaults.
    ///
    /// A group member without an explicit or configured value only takes its hard default
    /// when none of its groups was touched by a flag or by the configuration. A flag passed
    /// explicitly overrides every default of the groups it belongs to.
    ///
    /// # Errors
    /// * `Error::ConflictingOptionsError` if the flags, or the configuration, select more
    ///   than one member of a group
    /// * `Error::UnsupportedValueError` if a choice option holds a value outside its choices
    /// * `Error::ConfigError` if a configured default has the wrong type
    pub fn resolve(
        &self,
        flags: &Flags,
        configured: Option<&ConfiguredOptions>,
    ) -> Result<EffectiveOptions> {
        self.validate_flags(flags)?;

        let mut defaults: IndexMap<&str, Option<OptionValue>> = IndexMap::new();
        if let Some(configured) = configured {
            for (name, value) in configured {
                match self.rules.option(name) {
                    Some(spec) => {
                        defaults.insert(spec.name, configured_value(self.kind, spec, value)?);
                    }
                    None => {
                        debug!("Ignoring unknown default option '{}.{}'.", self.kind.key(), name)
                    }
                }
            }
        }

        let touched = |group: &[&str]| {
            group
                .iter()
                .any(|member| flags.contains_key(*member) || defaults.contains_key(*member))
        };

        let mut values = IndexMap::new();
        for spec in self.rules.options {
            if let Some(OptionValue::Text(value)) = flags.get(spec.name) {
                check_choice(spec, value)?;
            }
            let hard_default = match spec.option_type {
                OptionType::Flag => {
                    let untouched = self.rules.groups_of(spec.name).all(|group| !touched(group));
                    Some(OptionValue::Flag(spec.default && untouched))
                }
                OptionType::Text | OptionType::Choice(_) => None,
            };
            let explicit = flags.get(spec.name).cloned().map(Some);
            let configured = defaults.get(spec.name).cloned();
            if let Some(value) = resolve(explicit, configured, hard_default) {
                values.insert(spec.name.to_string(), value);
            }
        }

        for group in self.rules.exclusive {
            let explicit_selection = group
                .iter()
                .any(|member| flags.get(*member) == Some(&OptionValue::Flag(true)));
            if explicit_selection {
                for member in group.iter().filter(|member| !flags.contains_key(**member)) {
                    values.insert(member.to_string(), OptionValue::Flag(false));
                }
            }
        }

        let effective = EffectiveOptions { values };
        validate_exclusive(self.rules.exclusive, &effective.selected())?;
        debug!("Effective {} options: {:?}", self.kind.key(), effective.selected());
        Ok(effective)
    }
}
