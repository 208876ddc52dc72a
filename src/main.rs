use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::io::Write;

use docpath_core::config::{output_format_from_env_value, CoreConfig, OutputFormat};
use docpath_core::constants::{ID_COUNT_ENV_VAR, OUTPUT_ENV_VAR};
use docpath_core::{join_path, split_path, validate_id_named, IdGenerator};

#[derive(Parser)]
#[command(name = "docpath")]
#[command(about = "Document path and identifier utilities")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a slash-delimited path into segments
    Split {
        /// Path such as users/alice/orders
        path: String,
    },
    /// Join segments into a slash-delimited path
    Join {
        /// Segments to join, in order
        #[arg(required = true)]
        segments: Vec<String>,
    },
    /// Validate a document or collection ID
    Validate {
        /// ID to check
        id: String,
        /// Parameter name used in error messages
        #[arg(long, default_value = "id")]
        param: String,
    },
    /// Generate random auto-IDs
    Generate {
        /// Number of IDs (defaults to DOCPATH_ID_COUNT, then 1)
        #[arg(long)]
        count: Option<usize>,
    },
}

/// Entry point for the `docpath` CLI.
///
/// # Environment Variables
/// - `DOCPATH_OUTPUT`: `text` (default) or `json`
/// - `DOCPATH_ID_COUNT`: default number of IDs for `generate` (default: 1)
/// - `RUST_LOG`: tracing filter (default directive: `docpath=info`)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docpath=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    run(
        cli,
        std::env::var(OUTPUT_ENV_VAR).ok(),
        std::env::var(ID_COUNT_ENV_VAR).ok(),
        &mut std::io::stdout().lock(),
    )
}

/// Executes a parsed command, writing results to `out`.
///
/// Configuration is resolved from the raw environment values only as far as the command
/// needs it, so a bad `DOCPATH_ID_COUNT` does not affect `split`.
fn run(
    cli: Cli,
    output: Option<String>,
    id_count: Option<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let output_format =
        || output_format_from_env_value(output.clone()).context("invalid configuration");

    match cli.command {
        Some(Commands::Split { path }) => {
            let format = output_format()?;
            let segments = split_path(path.as_str())
                .inspect_err(|e| tracing::debug!(error = %e, "path validation failed"))?;
            tracing::debug!(count = segments.len(), "split path");
            write!(out, "{}", render_values(format, &segments)?)?;
        }
        Some(Commands::Join { segments }) => {
            let format = output_format()?;
            let path = join_path(&segments)
                .inspect_err(|e| tracing::debug!(error = %e, "segment validation failed"))?;
            write!(out, "{}", render_values(format, std::slice::from_ref(&path))?)?;
        }
        Some(Commands::Validate { id, param }) => {
            let format = output_format()?;
            let id = validate_id_named(id.as_str(), &param)
                .inspect_err(|e| tracing::debug!(error = %e, "ID validation failed"))?;
            write!(out, "{}", render_values(format, &[id])?)?;
        }
        Some(Commands::Generate { count }) => {
            let config = CoreConfig::from_env_values(output.clone(), id_count)
                .context("invalid configuration")?;
            let count = count.unwrap_or(config.id_count());
            anyhow::ensure!(count > 0, "--count must be at least 1");

            let generator = IdGenerator::new();
            let ids = (0..count)
                .map(|_| generator.generate().map(|id| id.into_inner()))
                .collect::<Result<Vec<_>, _>>()
                .context("failed to generate IDs")?;
            tracing::debug!(count, "generated auto-IDs");
            write!(out, "{}", render_values(config.output_format(), &ids)?)?;
        }
        None => {
            writeln!(out, "Use 'docpath --help' for commands")?;
        }
    }

    Ok(())
}

/// Renders values as one per line, or as a JSON array followed by a newline.
fn render_values<S: AsRef<str>>(format: OutputFormat, values: &[S]) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Text => values
            .iter()
            .map(|value| format!("{}\n", value.as_ref()))
            .collect(),
        OutputFormat::Json => {
            let values: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
            format!("{}\n", serde_json::to_string(&values)?)
        }
    };
    Ok(rendered)
}
