use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, error::ErrorKind};

use crate::config::PipelineConfig;
use crate::constants::handoff::{ENV_CANONICAL_JSON, ENV_ID, GITHUB_ENV};
use crate::constants::store::{DEFAULT_CLEANED_FILENAME, DEFAULT_STORE_FILENAME};
use crate::errors::CatalogError;
use crate::pipeline;
use crate::submission::SubmissionInput;

#[derive(Debug, Parser)]
#[command(
    name = "sunscreen-catalog",
    disable_help_subcommand = true,
    about = "Moderated ingestion for the sunscreen catalog",
    long_about = "Normalize parsed sunscreen submissions into canonical records and append them to the JSON catalog, rejecting duplicates.",
    after_help = "Diagnostics go to stderr; set RUST_LOG=info (or debug) for pipeline logs."
)]
/// CLI for the catalog pipeline.
///
/// Typical CI usage:
/// - `sunscreen-catalog parse --input submission.json` (exports hand-off vars to `$GITHUB_ENV`)
/// - `sunscreen-catalog write` (reads `$SUNSCREEN_CANONICAL_JSON` and `$SUNSCREEN_ID`)
struct CatalogCli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the canonical record for a submission (dry run, no store write).
    Parse(ParseArgs),
    /// Append an encoded canonical record to the catalog.
    Write(WriteArgs),
    /// Parse a submission and append it in one step.
    Ingest(IngestArgs),
    /// Check every catalog entry for required fields.
    Validate(StoreArgs),
    /// Write a cleaned, brand-sorted copy of the catalog.
    Cleanup(CleanupArgs),
}

#[derive(Debug, Args)]
struct SubmissionArgs {
    #[arg(
        long,
        value_name = "PATH",
        default_value = "-",
        help = "JSON mapping produced by the issue parser ('-' reads stdin)"
    )]
    input: PathBuf,
    #[arg(
        long = "github-env",
        value_name = "PATH",
        env = GITHUB_ENV,
        help = "CI environment file receiving SUNSCREEN_* hand-off variables"
    )]
    github_env: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct StoreArgs {
    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_STORE_FILENAME,
        help = "Catalog file holding the JSON array"
    )]
    store: PathBuf,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    submission: SubmissionArgs,
}

#[derive(Debug, Args)]
struct WriteArgs {
    #[arg(
        long,
        value_name = "BASE64",
        env = ENV_CANONICAL_JSON,
        help = "Base64-encoded canonical record JSON"
    )]
    canonical: String,
    #[arg(
        long,
        value_name = "ID",
        env = ENV_ID,
        help = "Id the payload must carry"
    )]
    id: Option<String>,
    #[command(flatten)]
    store: StoreArgs,
    #[arg(long, help = "Hold an exclusive lock file while appending")]
    lock: bool,
}

#[derive(Debug, Args)]
struct IngestArgs {
    #[command(flatten)]
    submission: SubmissionArgs,
    #[command(flatten)]
    store: StoreArgs,
    #[arg(long, help = "Hold an exclusive lock file while appending")]
    lock: bool,
}

#[derive(Debug, Args)]
struct CleanupArgs {
    #[command(flatten)]
    store: StoreArgs,
    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_CLEANED_FILENAME,
        help = "Destination of the cleaned copy"
    )]
    output: PathBuf,
}

/// Parse `args` (program name first), run the command, and print its output.
///
/// Output is printed only after the command succeeded.
pub fn run<I>(args: I) -> Result<(), Box<dyn Error>>
where
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<CatalogCli, _>(args)? else {
        return Ok(());
    };
    let output = execute(cli.command)?;
    print!("{output}");
    Ok(())
}

fn execute(command: Command) -> Result<String, CatalogError> {
    match command {
        Command::Parse(args) => {
            let config = PipelineConfig {
                env_file: args.submission.github_env.clone(),
                ..PipelineConfig::default()
            };
            let input = read_submission(&args.submission.input)?;
            let (record, _) = pipeline::parse_submission(&input, &config)?;
            render_record(&record)
        }
        Command::Write(args) => {
            let config = PipelineConfig {
                store_path: args.store.store,
                exclusive_lock: args.lock,
                ..PipelineConfig::default()
            };
            let record = pipeline::write_canonical(&args.canonical, args.id.as_deref(), &config)?;
            Ok(format!(
                "added {} to {}\n",
                record.id,
                config.store_path.display()
            ))
        }
        Command::Ingest(args) => {
            let config = PipelineConfig {
                store_path: args.store.store,
                env_file: args.submission.github_env.clone(),
                exclusive_lock: args.lock,
                ..PipelineConfig::default()
            };
            let input = read_submission(&args.submission.input)?;
            let record = pipeline::ingest(&input, &config)?;
            render_record(&record)
        }
        Command::Validate(args) => {
            let config = PipelineConfig {
                store_path: args.store,
                ..PipelineConfig::default()
            };
            let count = pipeline::validate_store(&config)?;
            Ok(format!("schema validation passed ({count} entries)\n"))
        }
        Command::Cleanup(args) => {
            let config = PipelineConfig {
                store_path: args.store.store,
                cleaned_path: args.output,
                ..PipelineConfig::default()
            };
            let count = pipeline::cleanup_store(&config)?;
            Ok(format!(
                "wrote {count} entries to {}\n",
                config.cleaned_path.display()
            ))
        }
    }
}

fn read_submission(path: &Path) -> Result<SubmissionInput, CatalogError> {
    let raw = if path.as_os_str() == "-" {
        io::read_to_string(io::stdin())?
    } else {
        fs::read_to_string(path)?
    };
    SubmissionInput::from_json(&raw)
}

fn render_record(record: &crate::data::CanonicalRecord) -> Result<String, CatalogError> {
    let mut text = serde_json::to_string_pretty(record)
        .map_err(|err| CatalogError::Decode(format!("canonical record not encodable: {err}")))?;
    text.push('\n');
    Ok(text)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
