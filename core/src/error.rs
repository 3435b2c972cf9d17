//! Error types for schema declaration, parsing, and result lookups.
//!
//! Every failure in the crate is a variant of [`ClothError`]. None of them are
//! recovered internally: a failed declaration leaves the schema unchanged and
//! a failed parse returns no partial result.

use thiserror::Error;

/// Errors that can occur while declaring a schema, parsing arguments, or
/// querying a parse result.
#[derive(Debug, Error)]
pub enum ClothError {
    /// A long name is empty after trimming.
    #[error("Long name is required")]
    MissingLongName,

    /// A long name does not match `[a-zA-Z0-9]+(-[a-zA-Z0-9]+)*`.
    #[error("Invalid long name specified: ('{0}')")]
    InvalidLongName(String),

    /// A short name is not exactly one ASCII alphanumeric character.
    #[error("A short name must be a single ASCII alphanumeric character ('{0}')")]
    InvalidShortName(String),

    /// A declared specifier overlaps one that is already registered.
    #[error("Specified names are already registered ({0})")]
    DuplicateName(String),

    /// A token names an option the schema does not declare.
    #[error("Undefined option: {0}")]
    UnknownOption(String),

    /// A clustered short-flag token contains a name that is not a flag.
    #[error("Invalid options: {0}")]
    InvalidCluster(String),

    /// An inline `--name=value` token targets a flag.
    #[error("Cannot specify values: {0}")]
    UnexpectedValue(String),

    /// Input ended while a parameter was waiting for its value.
    #[error("Option value is required: ({0})")]
    MissingValue(String),

    /// No declared option has the requested long name.
    #[error("This long name is not registered ('{0}')")]
    UndefinedLongName(String),

    /// No declared option has the requested short name.
    #[error("This short name is not registered ('{0}')")]
    UndefinedShortName(char),

    /// Schema definition file could not be read or written.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Schema definition could not be parsed or serialized.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl ClothError {
    /// Returns `true` for errors caused by a malformed long or short name.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MissingLongName | Self::InvalidLongName(_) | Self::InvalidShortName(_)
        )
    }

    /// Returns `true` for errors raised while walking the argument list.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownOption(_)
                | Self::InvalidCluster(_)
                | Self::UnexpectedValue(_)
                | Self::MissingValue(_)
        )
    }
}

/// Convenience alias for results with [`ClothError`].
pub type Result<T> = std::result::Result<T, ClothError>;
