//! Schema definitions stored as YAML or JSON.
//!
//! A definition file lists flags and parameters by long and short name. It is
//! turned into a [`Schema`] through the regular registration path, so every
//! name and duplicate check applies.
//!
//! # Example YAML
//!
//! ```yaml
//! flags:
//!   - long: list
//!     short: l
//!   - long: dry-run
//! parameters:
//!   - long: config
//!     short: c
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::schema::Schema;
use crate::specifier::Specifier;

/// One declared option in a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDefinition {
    /// Long name, without the leading `--`.
    pub long: String,
    /// Optional single-character short name, without the leading `-`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
}

impl OptionDefinition {
    /// Creates a definition entry.
    pub fn new(long: &str, short: Option<&str>) -> Self {
        Self {
            long: long.to_string(),
            short: short.map(String::from),
        }
    }
}

impl From<&Specifier> for OptionDefinition {
    fn from(specifier: &Specifier) -> Self {
        Self {
            long: specifier.long_name().to_string(),
            short: specifier.short_name().map(String::from),
        }
    }
}

/// Serializable description of a [`Schema`].
///
/// # Examples
///
/// ```
/// use cloth_core::{OptionType, SchemaDefinition};
///
/// let definition = SchemaDefinition::from_yaml_str(
///     "flags:\n  - long: verbose\n    short: v\nparameters:\n  - long: output\n",
/// )?;
/// let schema = definition.into_schema()?;
/// assert_eq!(schema.type_by_short_name("v")?, OptionType::Flag);
/// assert_eq!(schema.parameter_names(), vec!["output"]);
/// # Ok::<(), cloth_core::ClothError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDefinition {
    /// Flags in declaration order.
    #[serde(default)]
    pub flags: Vec<OptionDefinition>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<OptionDefinition>,
}

impl SchemaDefinition {
    /// Loads a definition from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ClothError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::ClothError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let definition: Self = serde_yaml::from_reader(reader)?;
        debug!(
            path = %path.display(),
            flags = definition.flags.len(),
            parameters = definition.parameters.len(),
            "loaded schema definition"
        );
        Ok(definition)
    }

    /// Parses a definition from YAML (or JSON) text.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](crate::ClothError::YamlError) on malformed input.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Saves the definition as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ClothError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::ClothError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Describes an existing schema.
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            flags: schema.flags().iter().map(OptionDefinition::from).collect(),
            parameters: schema.parameters().iter().map(OptionDefinition::from).collect(),
        }
    }

    /// Declares every entry on a fresh [`Schema`], flags first.
    ///
    /// # Errors
    ///
    /// Returns the first format or duplicate-name error raised during
    /// registration.
    pub fn into_schema(self) -> Result<Schema> {
        let mut schema = Schema::new();
        self.declare_on(&mut schema)?;
        Ok(schema)
    }

    /// Declares every entry on an existing schema, flags first.
    ///
    /// # Errors
    ///
    /// Same as [`into_schema`](Self::into_schema). Entries declared before
    /// the failing one stay registered.
    pub fn declare_on(&self, schema: &mut Schema) -> Result<()> {
        for flag in &self.flags {
            schema.add_flag(&flag.long, flag.short.as_deref())?;
        }
        for parameter in &self.parameters {
            schema.add_parameter(&parameter.long, parameter.short.as_deref())?;
        }
        Ok(())
    }
}
