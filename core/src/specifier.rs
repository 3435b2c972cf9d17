//! Option identity: a long name plus an optional single-character short name.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ClothError, Result};

static LONG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+(-[a-zA-Z0-9]+)*$").expect("static regex must compile")
});
static SHORT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]$").expect("static regex must compile"));

/// The declared identity of one option.
///
/// Every specifier has a long name (`--dry-run`) and may have a short name
/// (`-n`). Specifiers are created by [`Schema`](crate::Schema) when an option
/// is declared and are immutable afterwards.
///
/// # Examples
///
/// ```
/// use cloth_core::Specifier;
///
/// let s = Specifier::new(" output-dir ", Some("d")).unwrap();
/// assert_eq!(s.long_name(), "output-dir");
/// assert_eq!(s.short_name(), Some('d'));
/// assert_eq!(s.to_string(), "long name: 'output-dir', short name: 'd'");
///
/// assert!(Specifier::new("", None).is_err());
/// assert!(Specifier::new("bad--name", None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Specifier {
    long_name: String,
    short_name: Option<char>,
}

impl Specifier {
    /// Creates a specifier from a long name and an optional short name.
    ///
    /// Both names are trimmed first. A short name that is empty after
    /// trimming is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`MissingLongName`](ClothError::MissingLongName) for an empty
    /// long name, and [`InvalidLongName`](ClothError::InvalidLongName) or
    /// [`InvalidShortName`](ClothError::InvalidShortName) when a name is
    /// malformed.
    pub fn new(long_name: &str, short_name: Option<&str>) -> Result<Self> {
        let long_name = long_name.trim();
        if long_name.is_empty() {
            return Err(ClothError::MissingLongName);
        }
        Self::validate_long_name(long_name)?;

        let short_name = match short_name.map(str::trim).filter(|s| !s.is_empty()) {
            Some(short) => Some(Self::validate_short_name(short)?),
            None => None,
        };

        Ok(Self {
            long_name: long_name.to_string(),
            short_name,
        })
    }

    /// Checks that `name` is exactly one ASCII alphanumeric character and
    /// returns that character.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloth_core::Specifier;
    ///
    /// assert_eq!(Specifier::validate_short_name("h").unwrap(), 'h');
    /// assert!(Specifier::validate_short_name("").is_err());
    /// assert!(Specifier::validate_short_name("hv").is_err());
    /// assert!(Specifier::validate_short_name("-").is_err());
    /// ```
    pub fn validate_short_name(name: &str) -> Result<char> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if SHORT_NAME_RE.is_match(name) => Ok(c),
            _ => Err(ClothError::InvalidShortName(name.to_string())),
        }
    }

    /// Checks that `name` is one or more alphanumeric words joined by single
    /// hyphens.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloth_core::Specifier;
    ///
    /// assert!(Specifier::validate_long_name("sample-option-var1").is_ok());
    /// assert!(Specifier::validate_long_name("-test-key-").is_err());
    /// assert!(Specifier::validate_long_name("test/key").is_err());
    /// ```
    pub fn validate_long_name(name: &str) -> Result<()> {
        if LONG_NAME_RE.is_match(name) {
            Ok(())
        } else {
            Err(ClothError::InvalidLongName(name.to_string()))
        }
    }

    /// Returns the long name.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// Returns the short name, if one was declared.
    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    /// Returns `true` if the long names are equal, or both specifiers have the
    /// same short name.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloth_core::Specifier;
    ///
    /// let version = Specifier::new("version", Some("v")).unwrap();
    /// let verbose = Specifier::new("verbose", Some("v")).unwrap();
    /// let help = Specifier::new("help", None).unwrap();
    ///
    /// assert!(version.overlaps(&verbose));
    /// assert!(!version.overlaps(&help));
    /// ```
    pub fn overlaps(&self, other: &Specifier) -> bool {
        self.long_name == other.long_name
            || (self.short_name.is_some() && self.short_name == other.short_name)
    }

    /// Returns `true` if `name` is this specifier's short name.
    pub(crate) fn has_short_name(&self, name: char) -> bool {
        self.short_name == Some(name)
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "long name: '{}'", self.long_name)?;
        if let Some(short) = self.short_name {
            write!(f, ", short name: '{short}'")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_names() {
        let s = Specifier::new("  verbose\t", Some(" v ")).unwrap();
        assert_eq!(s.long_name(), "verbose");
        assert_eq!(s.short_name(), Some('v'));
    }

    #[test]
    fn test_blank_short_name_is_absent() {
        let s = Specifier::new("help", Some("  ")).unwrap();
        assert_eq!(s.short_name(), None);
        assert_eq!(s.to_string(), "long name: 'help'");
    }

    #[test]
    fn test_new_rejects_bad_names() {
        assert!(matches!(
            Specifier::new("   ", Some("a")),
            Err(ClothError::MissingLongName)
        ));
        assert!(matches!(
            Specifier::new("test_key", None),
            Err(ClothError::InvalidLongName(name)) if name == "test_key"
        ));
        assert!(matches!(
            Specifier::new("test", Some("ab")),
            Err(ClothError::InvalidShortName(name)) if name == "ab"
        ));
        assert!(matches!(
            Specifier::new("test", Some("@")),
            Err(ClothError::InvalidShortName(_))
        ));
    }

    #[test]
    fn test_long_name_rules() {
        for name in ["a", "x1", "dry-run", "sample-option-var1", "A-B-C"] {
            assert!(Specifier::validate_long_name(name).is_ok(), "{name}");
        }
        for name in ["", "-a", "a-", "a--b", "a b", "ä", "a=b"] {
            assert!(Specifier::validate_long_name(name).is_err(), "{name}");
        }
    }

    #[test]
    fn test_short_name_rejects_non_ascii() {
        assert!(Specifier::validate_short_name("é").is_err());
        assert!(Specifier::validate_short_name("9").is_ok());
    }

    #[test]
    fn test_overlaps_ignores_missing_short_names() {
        let a = Specifier::new("alpha", None).unwrap();
        let b = Specifier::new("beta", None).unwrap();
        assert!(!a.overlaps(&b));

        let c = Specifier::new("alpha", Some("x")).unwrap();
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }
}
