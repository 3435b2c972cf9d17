use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cloth_core::{Schema, SchemaDefinition};
use serde::Serialize;
use tracing::debug;

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "cloth")]
#[command(about = "Parse command-line arguments against a declared option schema")]
struct Cli {
    /// Log parser transitions to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the arguments after `--` and print the resulting option set.
    Parse(ParseArgs),
    /// Validate a schema and print its sorted option names.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// YAML or JSON schema definition file.
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Declare a flag as LONG or LONG:SHORT (repeatable).
    #[arg(long = "flag", value_name = "LONG[:SHORT]")]
    flags: Vec<String>,
    /// Declare a parameter as LONG or LONG:SHORT (repeatable).
    #[arg(long = "param", value_name = "LONG[:SHORT]")]
    parameters: Vec<String>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Arguments to parse.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct NameReport<'a> {
    flags: Vec<&'a str>,
    parameters: Vec<&'a str>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("cloth_core=debug,cloth=debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let schema = build_schema(&args.schema)?;
    debug!(tokens = args.args.len(), "parsing arguments");
    let result = schema.parse(&args.args).map_err(|err| err.to_string())?;
    print_output(&result, args.format)
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let declared = &args.schema;
    if declared.schema.is_none() && declared.flags.is_empty() && declared.parameters.is_empty() {
        return Err("Specify a schema with --schema, --flag, or --param".to_string());
    }
    let schema = build_schema(declared)?;
    let report = NameReport {
        flags: schema.flag_names(),
        parameters: schema.parameter_names(),
    };
    print_output(&report, args.format)
}

/// Builds a schema from the definition file first, then inline declarations.
fn build_schema(args: &SchemaArgs) -> Result<Schema, String> {
    let mut schema = Schema::new();

    if let Some(path) = &args.schema {
        let definition = SchemaDefinition::load(path)
            .map_err(|err| format!("Failed to load schema '{}': {err}", path.display()))?;
        definition
            .declare_on(&mut schema)
            .map_err(|err| format!("Invalid schema '{}': {err}", path.display()))?;
    }

    for declaration in &args.flags {
        let (long, short) = split_declaration(declaration);
        schema
            .add_flag(long, short)
            .map_err(|err| format!("Invalid --flag '{declaration}': {err}"))?;
    }
    for declaration in &args.parameters {
        let (long, short) = split_declaration(declaration);
        schema
            .add_parameter(long, short)
            .map_err(|err| format!("Invalid --param '{declaration}': {err}"))?;
    }

    Ok(schema)
}

fn split_declaration(declaration: &str) -> (&str, Option<&str>) {
    match declaration.split_once(':') {
        Some((long, short)) => (long, Some(short)),
        None => (declaration, None),
    }
}

fn print_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<(), String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|err| err.to_string())?,
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|err| err.to_string())?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
