//! The declared option vocabulary.
//!
//! A [`Schema`] holds two groups of [`Specifier`]s: flags, which take no
//! value, and parameters, which take exactly one string value. Names are
//! unique across both groups; the check runs at registration time so a schema
//! is always consistent once built.

use tracing::trace;

use crate::context::Context;
use crate::error::{ClothError, Result};
use crate::option_set::OptionSet;
use crate::specifier::Specifier;

/// Classification of a name against a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    /// No declared option has the name.
    Undefined,
    /// The name belongs to a flag.
    Flag,
    /// The name belongs to a parameter.
    Parameter,
}

/// Registry of declared flags and parameters.
///
/// # Examples
///
/// ```
/// use cloth_core::{OptionType, Schema};
///
/// let mut schema = Schema::new();
/// schema
///     .add_flag("verbose", Some("v"))?
///     .add_flag("dry-run", None)?
///     .add_parameter("output", Some("o"))?;
///
/// assert_eq!(schema.type_by_long_name("dry-run")?, OptionType::Flag);
/// assert_eq!(schema.type_by_short_name("o")?, OptionType::Parameter);
/// assert_eq!(schema.flag_names(), vec!["dry-run", "verbose"]);
///
/// // "v" is already taken by --verbose
/// assert!(schema.add_parameter("volume", Some("v")).is_err());
/// # Ok::<(), cloth_core::ClothError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    flags: Vec<Specifier>,
    parameters: Vec<Specifier>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a flag.
    ///
    /// # Errors
    ///
    /// Returns a format error if either name is malformed, or
    /// [`DuplicateName`](ClothError::DuplicateName) if the names overlap an
    /// option already declared in either group.
    pub fn add_flag(&mut self, long_name: &str, short_name: Option<&str>) -> Result<&mut Self> {
        let specifier = self.create_specifier(long_name, short_name)?;
        trace!(%specifier, "declared flag");
        self.flags.push(specifier);
        Ok(self)
    }

    /// Alias for [`add_flag`](Self::add_flag).
    pub fn flag(&mut self, long_name: &str, short_name: Option<&str>) -> Result<&mut Self> {
        self.add_flag(long_name, short_name)
    }

    /// Declares a parameter.
    ///
    /// # Errors
    ///
    /// Same as [`add_flag`](Self::add_flag).
    pub fn add_parameter(
        &mut self,
        long_name: &str,
        short_name: Option<&str>,
    ) -> Result<&mut Self> {
        let specifier = self.create_specifier(long_name, short_name)?;
        trace!(%specifier, "declared parameter");
        self.parameters.push(specifier);
        Ok(self)
    }

    /// Alias for [`add_parameter`](Self::add_parameter).
    pub fn param(&mut self, long_name: &str, short_name: Option<&str>) -> Result<&mut Self> {
        self.add_parameter(long_name, short_name)
    }

    fn create_specifier(&self, long_name: &str, short_name: Option<&str>) -> Result<Specifier> {
        let specifier = Specifier::new(long_name, short_name)?;
        if self.specifiers().any(|s| s.overlaps(&specifier)) {
            return Err(ClothError::DuplicateName(specifier.to_string()));
        }
        Ok(specifier)
    }

    /// Classifies a long name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLongName`](ClothError::InvalidLongName) if `name` is
    /// malformed.
    pub fn type_by_long_name(&self, name: &str) -> Result<OptionType> {
        Specifier::validate_long_name(name)?;
        Ok(Self::classify(
            self.flags.iter().any(|s| s.long_name() == name),
            self.parameters.iter().any(|s| s.long_name() == name),
        ))
    }

    /// Classifies a short name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidShortName`](ClothError::InvalidShortName) if `name` is
    /// not a single alphanumeric character.
    pub fn type_by_short_name(&self, name: &str) -> Result<OptionType> {
        let name = Specifier::validate_short_name(name)?;
        Ok(self.type_by_short_char(name))
    }

    pub(crate) fn type_by_short_char(&self, name: char) -> OptionType {
        Self::classify(
            self.flags.iter().any(|s| s.has_short_name(name)),
            self.parameters.iter().any(|s| s.has_short_name(name)),
        )
    }

    fn classify(is_flag: bool, is_parameter: bool) -> OptionType {
        if is_flag {
            OptionType::Flag
        } else if is_parameter {
            OptionType::Parameter
        } else {
            OptionType::Undefined
        }
    }

    /// Returns the specifier with the given long name.
    ///
    /// # Errors
    ///
    /// Returns a format error for a malformed name, or
    /// [`UndefinedLongName`](ClothError::UndefinedLongName) if no option has
    /// it.
    pub fn specifier_by_long_name(&self, name: &str) -> Result<&Specifier> {
        Specifier::validate_long_name(name)?;
        self.specifiers()
            .find(|s| s.long_name() == name)
            .ok_or_else(|| ClothError::UndefinedLongName(name.to_string()))
    }

    /// Returns the specifier with the given short name.
    ///
    /// # Errors
    ///
    /// Returns a format error for a malformed name, or
    /// [`UndefinedShortName`](ClothError::UndefinedShortName) if no option
    /// has it.
    pub fn specifier_by_short_name(&self, name: &str) -> Result<&Specifier> {
        let name = Specifier::validate_short_name(name)?;
        self.specifier_by_short_char(name)
    }

    pub(crate) fn specifier_by_short_char(&self, name: char) -> Result<&Specifier> {
        self.specifiers()
            .find(|s| s.has_short_name(name))
            .ok_or(ClothError::UndefinedShortName(name))
    }

    /// Returns `true` if every name is the short name of a declared flag.
    ///
    /// An empty input is rejected. Parameter short names never pass, so a
    /// cluster such as `-lqh` is refused as a whole when `h` is a parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloth_core::Schema;
    ///
    /// let mut schema = Schema::new();
    /// schema.add_flag("list", Some("l"))?.add_parameter("hostname", Some("h"))?;
    ///
    /// assert!(schema.check_short_names(['l']));
    /// assert!(!schema.check_short_names(['l', 'h']));
    /// assert!(!schema.check_short_names("".chars()));
    /// # Ok::<(), cloth_core::ClothError>(())
    /// ```
    pub fn check_short_names(&self, names: impl IntoIterator<Item = char>) -> bool {
        let mut names = names.into_iter().peekable();
        if names.peek().is_none() {
            return false;
        }
        names.all(|name| self.flags.iter().any(|s| s.has_short_name(name)))
    }

    /// Returns the long names of all flags in byte order.
    pub fn flag_names(&self) -> Vec<&str> {
        Self::sorted_names(&self.flags)
    }

    /// Returns the long names of all parameters in byte order.
    pub fn parameter_names(&self) -> Vec<&str> {
        Self::sorted_names(&self.parameters)
    }

    fn sorted_names(specifiers: &[Specifier]) -> Vec<&str> {
        let mut names: Vec<&str> = specifiers.iter().map(Specifier::long_name).collect();
        names.sort_unstable();
        names
    }

    /// Returns the flag specifiers in declaration order.
    pub fn flags(&self) -> &[Specifier] {
        &self.flags
    }

    /// Returns the parameter specifiers in declaration order.
    pub fn parameters(&self) -> &[Specifier] {
        &self.parameters
    }

    /// Iterates over all specifiers, flags first.
    pub fn specifiers(&self) -> impl Iterator<Item = &Specifier> {
        self.flags.iter().chain(self.parameters.iter())
    }

    /// Returns `true` if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.parameters.is_empty()
    }

    /// Parses `args` against this schema.
    ///
    /// Shorthand for [`Context::new`] followed by [`Context::parse`].
    ///
    /// # Errors
    ///
    /// See [`Context::parse`].
    pub fn parse<I, S>(&self, args: I) -> Result<OptionSet<'_>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Context::new(args, self).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .flag("list", Some("l"))
            .and_then(|s| s.flag("version", Some("v")))
            .and_then(|s| s.flag("help", None))
            .and_then(|s| s.param("username", Some("u")))
            .and_then(|s| s.param("password", Some("p")))
            .and_then(|s| s.param("hostname", Some("h")))
            .unwrap();
        schema
    }

    #[test]
    fn test_add_flag_returns_schema() {
        let mut schema = test_schema();
        assert!(!schema.is_empty());
        assert!(Schema::new().is_empty());
        schema.add_flag("test", None).unwrap();
        assert_eq!(schema.type_by_long_name("test").unwrap(), OptionType::Flag);
    }

    #[test]
    fn test_add_parameter_returns_schema() {
        let mut schema = test_schema();
        schema.add_parameter("test-value", None).unwrap();
        assert_eq!(
            schema.type_by_long_name("test-value").unwrap(),
            OptionType::Parameter
        );
    }

    #[test]
    fn test_duplicate_names_rejected_across_groups() {
        let cases: [(&str, Option<&str>); 6] = [
            ("version", None),
            ("verbose", Some("v")),
            ("human-readable", Some("h")),
            ("username", None),
            ("priority", Some("p")),
            ("volume", Some("v")),
        ];
        for (long, short) in cases {
            let mut schema = test_schema();
            assert!(
                matches!(schema.add_flag(long, short), Err(ClothError::DuplicateName(_))),
                "flag {long}"
            );
            assert!(
                matches!(
                    schema.add_parameter(long, short),
                    Err(ClothError::DuplicateName(_))
                ),
                "parameter {long}"
            );
        }
    }

    #[test]
    fn test_failed_declaration_leaves_schema_unchanged() {
        let mut schema = test_schema();
        let _ = schema.add_flag("verbose", Some("v"));
        let _ = schema.add_flag("bad name", None);
        assert_eq!(schema.flag_names(), vec!["help", "list", "version"]);
    }

    #[test]
    fn test_type_by_long_name() {
        let schema = test_schema();
        assert_eq!(schema.type_by_long_name("help").unwrap(), OptionType::Flag);
        assert_eq!(
            schema.type_by_long_name("hostname").unwrap(),
            OptionType::Parameter
        );
        assert_eq!(
            schema.type_by_long_name("verbose").unwrap(),
            OptionType::Undefined
        );
        for bad in ["", "test/key", "-test-key-"] {
            assert!(schema.type_by_long_name(bad).unwrap_err().is_format_error());
        }
    }

    #[test]
    fn test_type_by_short_name() {
        let schema = test_schema();
        assert_eq!(schema.type_by_short_name("v").unwrap(), OptionType::Flag);
        assert_eq!(
            schema.type_by_short_name("h").unwrap(),
            OptionType::Parameter
        );
        assert_eq!(
            schema.type_by_short_name("t").unwrap(),
            OptionType::Undefined
        );
        for bad in ["", "vv", "-"] {
            assert!(schema.type_by_short_name(bad).unwrap_err().is_format_error());
        }
    }

    #[test]
    fn test_specifier_lookup() {
        let schema = test_schema();
        assert_eq!(
            schema.specifier_by_long_name("password").unwrap().short_name(),
            Some('p')
        );
        assert_eq!(
            schema.specifier_by_short_name("l").unwrap().long_name(),
            "list"
        );
        assert!(matches!(
            schema.specifier_by_long_name("verbose"),
            Err(ClothError::UndefinedLongName(name)) if name == "verbose"
        ));
        assert!(matches!(
            schema.specifier_by_short_name("x"),
            Err(ClothError::UndefinedShortName('x'))
        ));
        assert!(schema.specifier_by_short_name("xy").unwrap_err().is_format_error());
    }

    #[test]
    fn test_check_short_names() {
        let schema = test_schema();
        assert!(schema.check_short_names("lv".chars()));
        assert!(schema.check_short_names("ll".chars()));
        assert!(!schema.check_short_names("lvh".chars()));
        assert!(!schema.check_short_names("lx".chars()));
        assert!(!schema.check_short_names("".chars()));
    }

    #[test]
    fn test_names_are_sorted_and_disjoint() {
        let mut schema = Schema::new();
        schema
            .add_flag("zeta", None)
            .and_then(|s| s.add_flag("Alpha", None))
            .and_then(|s| s.add_flag("alpha", None))
            .and_then(|s| s.add_flag("a-b", None))
            .and_then(|s| s.add_parameter("m", None))
            .and_then(|s| s.add_parameter("b", None))
            .unwrap();

        assert_eq!(schema.flag_names(), vec!["Alpha", "a-b", "alpha", "zeta"]);
        assert_eq!(schema.parameter_names(), vec!["b", "m"]);
        assert!(
            schema
                .flag_names()
                .iter()
                .all(|name| !schema.parameter_names().contains(name))
        );
    }
}
