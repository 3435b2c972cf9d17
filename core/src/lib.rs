//! Schema-driven command-line option parsing.
//!
//! Declare the option vocabulary once, then parse raw arguments against it:
//!
//! - [`Specifier`]: the long/short name pair identifying one option.
//! - [`Schema`]: the declared flags and parameters, with name checks.
//! - [`CliOption`]: a parsed flag (on/off) or parameter (optional string).
//! - [`OptionSet`]: every declared option, set or defaulted, plus the
//!   leftover positional arguments.
//! - [`Context`]: the state machine that walks the argument list.
//!
//! Schemas can also be loaded from YAML or JSON files through
//! [`SchemaDefinition`].
//!
//! # Example
//!
//! ```
//! use cloth_core::*;
//!
//! let mut schema = Schema::new();
//! schema
//!     .add_flag("list", Some("l"))?
//!     .add_flag("quiet", Some("q"))?
//!     .add_flag("dry-run", None)?
//!     .add_parameter("config", Some("c"))?
//!     .add_parameter("password", Some("p"))?;
//!
//! let result = parse(["-ql", "--password=", "build", "--", "-c"], &schema)?;
//!
//! let map = result.options_as_map();
//! assert_eq!(map.get("quiet"), Some(OptionValue::Flag(true)));
//! assert_eq!(map.get("dry-run"), Some(OptionValue::Flag(false)));
//! assert_eq!(map.get("password"), Some(OptionValue::Parameter(Some(""))));
//! assert_eq!(map.get("config"), Some(OptionValue::Parameter(None)));
//! assert_eq!(result.args(), ["build", "-c"]);
//! # Ok::<(), ClothError>(())
//! ```

mod context;
mod definition;
mod error;
mod option;
mod option_set;
mod schema;
mod specifier;

pub use context::{Context, Mode, Token};
pub use definition::{OptionDefinition, SchemaDefinition};
pub use error::{ClothError, Result};
pub use option::{CliOption, OptionValue};
pub use option_set::{OptionMap, OptionSet};
pub use schema::{OptionType, Schema};
pub use specifier::Specifier;

/// Parses `args` against `schema`.
///
/// # Errors
///
/// See [`Context::parse`].
pub fn parse<I, S>(args: I, schema: &Schema) -> Result<OptionSet<'_>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Context::new(args, schema).parse()
}
