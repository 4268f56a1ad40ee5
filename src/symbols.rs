//! The variables and aliases a formula is rendered against.

use std::collections::{BTreeMap, BTreeSet};

/// The state a formula is rendered against.
///
/// A variable is either assigned a value or absent. An absent variable is
/// different to a variable assigned the empty string, although both render as
/// nothing only an assigned non-empty value activates a block.
///
/// An alias is either enabled or disabled, any alias that was never enabled
/// is disabled.
///
/// With the `serde` feature the table can be saved and restored using any
/// serde data format, for example the following JSON.
///
/// ```json
/// { "variables": { "name": "Stan" }, "aliases": ["target"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolTable {
    #[cfg_attr(feature = "serde", serde(default))]
    variables: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    aliases: BTreeSet<String>,
}

impl SymbolTable {
    /// Construct a new empty symbol table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value to the variable, or discard it if `value` is `None`.
    pub fn set_variable(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.variables.insert(name.to_owned(), value.to_owned());
            }
            None => {
                self.variables.remove(name);
            }
        }
    }

    /// Returns the value assigned to the variable, if any.
    #[inline]
    pub fn get_variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Enable or disable the alias.
    pub fn set_alias(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.aliases.insert(name.to_owned());
        } else {
            self.aliases.remove(name);
        }
    }

    /// Returns whether the alias is enabled.
    #[inline]
    pub fn is_alias_enabled(&self, name: &str) -> bool {
        self.aliases.contains(name)
    }

    /// Discard all variables and disable all aliases.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.aliases.clear();
    }

    /// Returns `true` if no variable is assigned and no alias is enabled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.aliases.is_empty()
    }

    /// Returns an iterator over the assigned variables, ordered by name.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns an iterator over the enabled aliases, ordered by name.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }
}
