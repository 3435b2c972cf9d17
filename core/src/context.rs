//! The argument-parsing state machine.
//!
//! [`Context`] walks the raw argument list one token at a time. Each step is
//! a transition from the current [`Mode`] to the next one; the pattern a
//! token matches is decided up front by [`Token::classify`], which checks the
//! `--` sentinel first, then single short options, short-flag clusters, bare
//! long options, and finally long options with an inline value.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::{ClothError, Result};
use crate::option::CliOption;
use crate::option_set::OptionSet;
use crate::schema::{OptionType, Schema};
use crate::specifier::Specifier;

static SHORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-([a-zA-Z0-9])$").expect("static regex must compile"));
static CLUSTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-([a-zA-Z0-9]{2,})$").expect("static regex must compile"));
static LONG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--([a-zA-Z0-9]+(?:-[a-zA-Z0-9]+)*)$").expect("static regex must compile")
});
static LONG_WITH_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^--([a-zA-Z0-9]+(?:-[a-zA-Z0-9]+)*)=(.*)$")
        .expect("static regex must compile")
});

/// Syntactic shape of one raw argument.
///
/// # Examples
///
/// ```
/// use cloth_core::Token;
///
/// assert_eq!(Token::classify("--"), Token::Separator);
/// assert_eq!(Token::classify("-v"), Token::Short('v'));
/// assert_eq!(Token::classify("-ql"), Token::Cluster("ql"));
/// assert_eq!(Token::classify("--dry-run"), Token::Long("dry-run"));
/// assert_eq!(
///     Token::classify("--password="),
///     Token::LongWithValue("password", "")
/// );
/// assert_eq!(Token::classify("-"), Token::Positional("-"));
/// assert_eq!(Token::classify("---x"), Token::Positional("---x"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A bare `--`; everything after it is positional.
    Separator,
    /// `-X` with one alphanumeric character.
    Short(char),
    /// `-XYZ` with two or more alphanumeric characters.
    Cluster(&'a str),
    /// `--name`.
    Long(&'a str),
    /// `--name=value`, value possibly empty.
    LongWithValue(&'a str, &'a str),
    /// Anything that is not an option, including malformed option-like text.
    Positional(&'a str),
}

impl<'a> Token<'a> {
    /// Classifies `raw` by pattern.
    pub fn classify(raw: &'a str) -> Self {
        if raw == "--" {
            return Self::Separator;
        }
        if let Some(c) = SHORT_RE
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().chars().next())
        {
            return Self::Short(c);
        }
        if let Some(m) = CLUSTER_RE.captures(raw).and_then(|caps| caps.get(1)) {
            return Self::Cluster(m.as_str());
        }
        if let Some(m) = LONG_RE.captures(raw).and_then(|caps| caps.get(1)) {
            return Self::Long(m.as_str());
        }
        if let Some(caps) = LONG_WITH_VALUE_RE.captures(raw) {
            if let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) {
                return Self::LongWithValue(name.as_str(), value.as_str());
            }
        }
        Self::Positional(raw)
    }
}

/// Parser mode between two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'s> {
    /// Options and positional arguments are both accepted.
    Default,
    /// The previous token named a parameter; the next token is its value.
    ParameterValue(&'s Specifier),
    /// A `--` was seen; every remaining token is positional.
    Arguments,
    /// All tokens have been consumed.
    Finished,
}

/// Parsing state for one argument list against one schema.
///
/// A context is consumed by [`parse`](Context::parse), so each argument list
/// is parsed exactly once.
///
/// # Examples
///
/// ```
/// use cloth_core::{Context, Schema};
///
/// let mut schema = Schema::new();
/// schema.add_flag("quiet", Some("q"))?.add_parameter("config", Some("c"))?;
///
/// let args = ["-q", "--config", "settings.ini", "--", "--dry-run"];
/// let result = Context::new(args, &schema).parse()?;
///
/// assert!(result.option_by_long_name("quiet")?.is_enabled());
/// assert_eq!(result.option_by_short_name("c")?.as_str(), Some("settings.ini"));
/// assert_eq!(result.args(), ["--dry-run"]);
/// # Ok::<(), cloth_core::ClothError>(())
/// ```
#[derive(Debug)]
pub struct Context<'s> {
    schema: &'s Schema,
    inputs: Vec<String>,
    index: usize,
    mode: Mode<'s>,
    options: HashMap<&'s str, CliOption<'s>>,
    args: Vec<String>,
}

impl<'s> Context<'s> {
    /// Creates a context over `args`.
    pub fn new<I, S>(args: I, schema: &'s Schema) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema,
            inputs: args.into_iter().map(Into::into).collect(),
            index: 0,
            mode: Mode::Default,
            options: HashMap::new(),
            args: Vec::new(),
        }
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode<'s> {
        self.mode
    }

    /// Runs the state machine to completion and assembles the result.
    ///
    /// # Errors
    ///
    /// - [`UnknownOption`](ClothError::UnknownOption) for an undeclared
    ///   `-x`, `--name` or `--name=value`.
    /// - [`InvalidCluster`](ClothError::InvalidCluster) when a `-xyz` cluster
    ///   contains anything but flag short names.
    /// - [`UnexpectedValue`](ClothError::UnexpectedValue) for
    ///   `--flag=value`.
    /// - [`MissingValue`](ClothError::MissingValue) when the list ends while
    ///   a parameter waits for its value.
    pub fn parse(mut self) -> Result<OptionSet<'s>> {
        while self.step()? != Mode::Finished {}

        let schema = self.schema;
        let mut options = Vec::with_capacity(schema.flags().len() + schema.parameters().len());
        for name in schema.flag_names() {
            options.push(self.take_or_default(name, OptionType::Flag)?);
        }
        for name in schema.parameter_names() {
            options.push(self.take_or_default(name, OptionType::Parameter)?);
        }

        debug!(
            options = options.len(),
            args = self.args.len(),
            "parsed command line"
        );
        Ok(OptionSet::new(options, self.args))
    }

    /// Consumes one token and moves to the next mode.
    ///
    /// Returns the new mode. Once [`Mode::Finished`] is reached further calls
    /// keep returning it.
    pub fn step(&mut self) -> Result<Mode<'s>> {
        let next = self.transition()?;
        if next != self.mode {
            debug!(index = self.index, from = ?self.mode, to = ?next, "mode transition");
        }
        self.mode = next;
        if next != Mode::Finished {
            self.index += 1;
        }
        Ok(next)
    }

    fn transition(&mut self) -> Result<Mode<'s>> {
        let Some(raw) = self.inputs.get(self.index).cloned() else {
            return match self.mode {
                Mode::ParameterValue(pending) => {
                    Err(ClothError::MissingValue(pending.to_string()))
                }
                _ => Ok(Mode::Finished),
            };
        };

        match self.mode {
            Mode::Finished => return Ok(Mode::Finished),
            Mode::Arguments => {
                self.args.push(raw);
                return Ok(Mode::Arguments);
            }
            Mode::ParameterValue(pending) => {
                self.register(CliOption::parameter(pending, Some(raw)));
                return Ok(Mode::Default);
            }
            Mode::Default => {}
        }

        match Token::classify(&raw) {
            Token::Separator => Ok(Mode::Arguments),
            Token::Short(name) => self.handle_short_name(name),
            Token::Cluster(names) => self.handle_cluster(names),
            Token::Long(name) => self.handle_long_name(name),
            Token::LongWithValue(name, value) => self.handle_long_name_with_value(name, value),
            Token::Positional(arg) => {
                self.args.push(arg.to_string());
                Ok(Mode::Default)
            }
        }
    }

    fn handle_short_name(&mut self, name: char) -> Result<Mode<'s>> {
        let schema = self.schema;
        match schema.type_by_short_char(name) {
            OptionType::Undefined => Err(ClothError::UnknownOption(format!("-{name}"))),
            OptionType::Flag => {
                self.register(CliOption::flag(schema.specifier_by_short_char(name)?, true));
                Ok(Mode::Default)
            }
            OptionType::Parameter => Ok(Mode::ParameterValue(
                schema.specifier_by_short_char(name)?,
            )),
        }
    }

    fn handle_cluster(&mut self, names: &str) -> Result<Mode<'s>> {
        let schema = self.schema;
        if !schema.check_short_names(names.chars()) {
            return Err(ClothError::InvalidCluster(format!("-{names}")));
        }
        for name in names.chars() {
            self.register(CliOption::flag(schema.specifier_by_short_char(name)?, true));
        }
        Ok(Mode::Default)
    }

    fn handle_long_name(&mut self, name: &str) -> Result<Mode<'s>> {
        let schema = self.schema;
        match schema.type_by_long_name(name)? {
            OptionType::Undefined => Err(ClothError::UnknownOption(format!("--{name}"))),
            OptionType::Flag => {
                self.register(CliOption::flag(schema.specifier_by_long_name(name)?, true));
                Ok(Mode::Default)
            }
            OptionType::Parameter => Ok(Mode::ParameterValue(
                schema.specifier_by_long_name(name)?,
            )),
        }
    }

    fn handle_long_name_with_value(&mut self, name: &str, value: &str) -> Result<Mode<'s>> {
        let schema = self.schema;
        match schema.type_by_long_name(name)? {
            OptionType::Undefined => Err(ClothError::UnknownOption(format!("--{name}"))),
            OptionType::Flag => Err(ClothError::UnexpectedValue(format!("--{name}"))),
            OptionType::Parameter => {
                let specifier = schema.specifier_by_long_name(name)?;
                self.register(CliOption::parameter(specifier, Some(value.to_string())));
                Ok(Mode::Default)
            }
        }
    }

    fn register(&mut self, option: CliOption<'s>) {
        trace!(specifier = %option.specifier(), value = ?option.value(), "registered option");
        self.options.insert(option.long_name(), option);
    }

    fn take_or_default(&mut self, name: &str, kind: OptionType) -> Result<CliOption<'s>> {
        if let Some(option) = self.options.remove(name) {
            return Ok(option);
        }
        let specifier = self.schema.specifier_by_long_name(name)?;
        Ok(match kind {
            OptionType::Parameter => CliOption::parameter(specifier, None),
            _ => CliOption::flag(specifier, false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_flag("list", Some("l"))
            .and_then(|s| s.add_flag("quiet", Some("q")))
            .and_then(|s| s.add_parameter("hostname", Some("h")))
            .unwrap();
        schema
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(Token::classify("-1"), Token::Short('1'));
        assert_eq!(Token::classify("-l1"), Token::Cluster("l1"));
        assert_eq!(Token::classify("--a-b-c"), Token::Long("a-b-c"));
        assert_eq!(
            Token::classify("--name=a=b c"),
            Token::LongWithValue("name", "a=b c")
        );
        assert_eq!(
            Token::classify("--note=line1\nline2"),
            Token::LongWithValue("note", "line1\nline2")
        );
    }

    #[test]
    fn test_classify_malformed_options_are_positional() {
        for raw in ["", "-", "-l-q", "--a--b", "--end-", "-@", "--=x", "x-y", "---"] {
            assert_eq!(Token::classify(raw), Token::Positional(raw), "{raw:?}");
        }
    }

    #[test]
    fn test_step_transitions() {
        let schema = test_schema();
        let mut context = Context::new(["-h", "example.org", "--", "-q"], &schema);
        assert_eq!(context.mode(), Mode::Default);

        let host = schema.specifier_by_long_name("hostname").unwrap();
        assert_eq!(context.step().unwrap(), Mode::ParameterValue(host));
        assert_eq!(context.step().unwrap(), Mode::Default);
        assert_eq!(context.step().unwrap(), Mode::Arguments);
        assert_eq!(context.step().unwrap(), Mode::Arguments);
        assert_eq!(context.step().unwrap(), Mode::Finished);
        assert_eq!(context.step().unwrap(), Mode::Finished);
    }

    #[test]
    fn test_value_mode_accepts_option_like_token() {
        let schema = test_schema();
        let result = Context::new(["-h", "-q"], &schema).parse().unwrap();
        assert_eq!(
            result.option_by_long_name("hostname").unwrap().as_str(),
            Some("-q")
        );
        assert!(!result.option_by_long_name("quiet").unwrap().is_enabled());
    }

    #[test]
    fn test_missing_value_names_pending_specifier() {
        let schema = test_schema();
        let err = Context::new(["--hostname"], &schema).parse().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Option value is required: (long name: 'hostname', short name: 'h')"
        );
    }

    #[test]
    fn test_last_occurrence_wins() {
        let schema = test_schema();
        let result = Context::new(["-h", "a", "--hostname=b", "-ll"], &schema)
            .parse()
            .unwrap();
        assert_eq!(
            result.option_by_short_name("h").unwrap().as_str(),
            Some("b")
        );
        assert!(result.option_by_short_name("l").unwrap().is_enabled());
    }

    #[test]
    fn test_cluster_failure_is_atomic() {
        let schema = test_schema();
        let mut context = Context::new(["-lqh"], &schema);
        assert!(matches!(
            context.step(),
            Err(ClothError::InvalidCluster(token)) if token == "-lqh"
        ));
        assert!(context.options.is_empty());
    }
}
