//! Parsed option values.

use serde::Serialize;

use crate::specifier::Specifier;

/// One option in a parse result, bound to the specifier it was declared with.
///
/// Flags carry an on/off state; parameters carry a string value that is
/// either absent (`None`) or explicitly supplied, possibly empty.
///
/// # Examples
///
/// ```
/// use cloth_core::{CliOption, OptionValue, Specifier};
///
/// let spec = Specifier::new("password", Some("p")).unwrap();
///
/// let absent = CliOption::parameter(&spec, None);
/// let empty = CliOption::parameter(&spec, Some(String::new()));
/// assert_eq!(absent.value(), OptionValue::Parameter(None));
/// assert_eq!(empty.value(), OptionValue::Parameter(Some("")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOption<'s> {
    /// A boolean switch.
    Flag {
        /// Declared identity.
        specifier: &'s Specifier,
        /// `true` when the flag appeared on the command line.
        enabled: bool,
    },
    /// A string-valued option.
    Parameter {
        /// Declared identity.
        specifier: &'s Specifier,
        /// Supplied value, `None` when the parameter was not given.
        value: Option<String>,
    },
}

impl<'s> CliOption<'s> {
    /// Creates a flag option.
    pub fn flag(specifier: &'s Specifier, enabled: bool) -> Self {
        Self::Flag { specifier, enabled }
    }

    /// Creates a parameter option.
    pub fn parameter(specifier: &'s Specifier, value: Option<String>) -> Self {
        Self::Parameter { specifier, value }
    }

    /// Returns the specifier this option is bound to.
    pub fn specifier(&self) -> &'s Specifier {
        match self {
            Self::Flag { specifier, .. } | Self::Parameter { specifier, .. } => *specifier,
        }
    }

    /// Returns the long name of the bound specifier.
    pub fn long_name(&self) -> &'s str {
        self.specifier().long_name()
    }

    /// Returns the option's value.
    pub fn value(&self) -> OptionValue<'_> {
        match self {
            Self::Flag { enabled, .. } => OptionValue::Flag(*enabled),
            Self::Parameter { value, .. } => OptionValue::Parameter(value.as_deref()),
        }
    }

    /// Returns `true` for an enabled flag. Parameters always return `false`.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Flag { enabled: true, .. })
    }

    /// Returns the value of a parameter. Flags always return `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Parameter { value, .. } => value.as_deref(),
            Self::Flag { .. } => None,
        }
    }

    /// Returns `true` if this option is a flag.
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag { .. })
    }
}

/// The value of a parsed option.
///
/// Serializes as a bare boolean for flags and as a string or `null` for
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue<'a> {
    /// Flag state.
    Flag(bool),
    /// Parameter value, `None` when absent.
    Parameter(Option<&'a str>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_accessors() {
        let spec = Specifier::new("quiet", Some("q")).unwrap();
        let on = CliOption::flag(&spec, true);
        let off = CliOption::flag(&spec, false);

        assert!(on.is_flag());
        assert!(on.is_enabled());
        assert!(!off.is_enabled());
        assert_eq!(off.value(), OptionValue::Flag(false));
        assert_eq!(on.as_str(), None);
        assert_eq!(on.long_name(), "quiet");
        assert!(std::ptr::eq(on.specifier(), &spec));
    }

    #[test]
    fn test_parameter_accessors() {
        let spec = Specifier::new("hostname", Some("h")).unwrap();
        let host = CliOption::parameter(&spec, Some("localhost".into()));

        assert!(!host.is_flag());
        assert!(!host.is_enabled());
        assert_eq!(host.as_str(), Some("localhost"));
        assert_eq!(host.value(), OptionValue::Parameter(Some("localhost")));
    }

    #[test]
    fn test_value_serialization() {
        assert_eq!(
            serde_json::to_string(&OptionValue::Flag(true)).unwrap(),
            "true"
        );
        assert_eq!(
            serde_json::to_string(&OptionValue::Parameter(None)).unwrap(),
            "null"
        );
        assert_eq!(
            serde_json::to_string(&OptionValue::Parameter(Some(""))).unwrap(),
            "\"\""
        );
    }
}
