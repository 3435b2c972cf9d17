//! The result of a parse.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{ClothError, Result};
use crate::option::{CliOption, OptionValue};
use crate::specifier::Specifier;

/// Parsed options plus leftover positional arguments.
///
/// Holds exactly one [`CliOption`] per name declared in the schema, flags
/// first in sorted order and then parameters in sorted order. Options that
/// did not appear on the command line carry their default value.
///
/// # Examples
///
/// ```
/// use cloth_core::{OptionValue, Schema};
///
/// let mut schema = Schema::new();
/// schema.add_flag("quiet", Some("q"))?.add_parameter("config", Some("c"))?;
///
/// let result = schema.parse(["-q", "build", "--config=dev.ini"])?;
/// assert!(result.option_by_short_name("q")?.is_enabled());
/// assert_eq!(result.option_by_long_name("config")?.as_str(), Some("dev.ini"));
/// assert_eq!(result.args(), ["build"]);
///
/// let map = result.options_as_map();
/// assert_eq!(map.get("quiet"), Some(OptionValue::Flag(true)));
/// # Ok::<(), cloth_core::ClothError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSet<'s> {
    #[serde(serialize_with = "serialize_options")]
    options: Vec<CliOption<'s>>,
    args: Vec<String>,
}

impl<'s> OptionSet<'s> {
    pub(crate) fn new(options: Vec<CliOption<'s>>, args: Vec<String>) -> Self {
        Self { options, args }
    }

    /// Returns every option's value keyed by long name, in result order.
    pub fn options_as_map(&self) -> OptionMap<'_> {
        OptionMap {
            entries: self
                .options
                .iter()
                .map(|option| (option.long_name(), option.value()))
                .collect(),
        }
    }

    /// Returns the option with the given long name.
    ///
    /// # Errors
    ///
    /// Returns a format error for a malformed name, or
    /// [`UndefinedLongName`](ClothError::UndefinedLongName) if no option has
    /// it.
    pub fn option_by_long_name(&self, name: &str) -> Result<&CliOption<'s>> {
        Specifier::validate_long_name(name)?;
        self.options
            .iter()
            .find(|option| option.long_name() == name)
            .ok_or_else(|| ClothError::UndefinedLongName(name.to_string()))
    }

    /// Returns the option with the given short name.
    ///
    /// # Errors
    ///
    /// Returns a format error for a malformed name, or
    /// [`UndefinedShortName`](ClothError::UndefinedShortName) if no option
    /// has it.
    pub fn option_by_short_name(&self, name: &str) -> Result<&CliOption<'s>> {
        let name = Specifier::validate_short_name(name)?;
        self.options
            .iter()
            .find(|option| option.specifier().short_name() == Some(name))
            .ok_or(ClothError::UndefinedShortName(name))
    }

    /// Returns all options in result order.
    pub fn options(&self) -> &[CliOption<'s>] {
        &self.options
    }

    /// Returns the positional arguments in the order they were encountered.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Consumes the set and returns the positional arguments.
    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

fn serialize_options<S: Serializer>(
    options: &[CliOption<'_>],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(options.len()))?;
    for option in options {
        map.serialize_entry(option.long_name(), &option.value())?;
    }
    map.end()
}

/// Ordered long name to value mapping returned by
/// [`OptionSet::options_as_map`].
///
/// Iteration and serialization follow the order of the parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMap<'a> {
    entries: Vec<(&'a str, OptionValue<'a>)>,
}

impl<'a> OptionMap<'a> {
    /// Returns the value for `long_name`, if declared.
    pub fn get(&self, long_name: &str) -> Option<OptionValue<'a>> {
        self.entries
            .iter()
            .find(|(name, _)| *name == long_name)
            .map(|(_, value)| *value)
    }

    /// Iterates over `(long name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, OptionValue<'a>)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the long names in order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the schema declared nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for OptionMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
