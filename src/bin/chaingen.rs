//! chaingen CLI - generate typed chain constants from per-chain files
//!
//! Reads a directory of flat `key: value` chain documents and writes a
//! TypeScript module with one `ChainInfo` constant per chain.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use chaingen::codegen::QuoteStyle;
use chaingen::config::{ConfigOverrides, GeneratorConfig};
use chaingen::orchestration::GenerationReport;
use chaingen::schema::{Schema, SchemaKind};

/// Exit code when `--strict` is set and a document was skipped.
const EXIT_SKIPPED: i32 = 2;

#[derive(Parser)]
#[command(name = "chaingen")]
#[command(version, about = "Generate typed chain constants from per-chain config files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every chain document and write the TypeScript module
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Path of the generated module
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write string values without escaping quotes
        #[arg(long)]
        verbatim: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Parse every chain document without writing anything
    Validate {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Parse a single chain document and print the resulting record
    Inspect {
        /// Chain document to parse
        file: PathBuf,

        /// Document layout to accept
        #[arg(short, long, value_enum, default_value_t = SchemaKind::Full)]
        schema: SchemaKind,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path to chaingen.yaml (default: ./chaingen.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing one document per chain
    #[arg(short = 'd', long = "source")]
    source_dir: Option<PathBuf>,

    /// Document layout to accept
    #[arg(short, long, value_enum)]
    schema: Option<SchemaKind>,
}

#[derive(Args)]
struct ReportArgs {
    /// Print the run report as JSON instead of the chain list
    #[arg(long)]
    json: bool,

    /// Exit with code 2 if any document was skipped
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    chaingen::logs::init_logs();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { source, output, verbatim, report } => {
            let quote_style = verbatim.then_some(QuoteStyle::Verbatim);
            run_generate(source, output, quote_style, report).await
        }
        Commands::Validate { source, report } => {
            run_validate(source, report).await
        }
        Commands::Inspect { file, schema } => {
            inspect(&file, schema).map(|()| 0)
        }
    };

    match result {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Resolve the config: CLI > environment > config file > defaults
fn resolve_config(
    source: SourceArgs,
    output: Option<PathBuf>,
    quote_style: Option<QuoteStyle>,
) -> Result<GeneratorConfig, String> {
    let file_config = GeneratorConfig::load(source.config.as_deref()).map_err(|e| e.to_string())?;

    let overrides = ConfigOverrides {
        source_dir: source.source_dir,
        output,
        schema: source.schema,
        quote_style,
    };

    overrides.apply(file_config, |key| std::env::var(key).ok())
}

async fn run_generate(
    source: SourceArgs,
    output: Option<PathBuf>,
    quote_style: Option<QuoteStyle>,
    args: ReportArgs,
) -> Result<i32, String> {
    let config = resolve_config(source, output, quote_style)?;
    tracing::info!(
        source = %config.source_dir.display(),
        schema = %config.schema,
        "Generating chain informations"
    );

    let report = chaingen::generate(&config).await.map_err(|e| e.to_string())?;

    if args.json {
        print_json(&report)?;
    } else {
        print_chains(&report);
        println!("\nSuccessfully written to '{}'!", config.output.display());
    }

    Ok(exit_code(&report, args.strict))
}

async fn run_validate(source: SourceArgs, args: ReportArgs) -> Result<i32, String> {
    let config = resolve_config(source, None, None)?;

    let report = chaingen::validate(&config).await.map_err(|e| e.to_string())?;

    if args.json {
        print_json(&report)?;
    } else {
        print_chains(&report);
        println!(
            "\n{} valid, {} skipped in '{}'",
            report.chains.len(),
            report.skipped.len(),
            config.source_dir.display()
        );
    }

    Ok(exit_code(&report, args.strict))
}

fn inspect(file: &Path, schema: SchemaKind) -> Result<(), String> {
    let bytes = std::fs::read(file)
        .map_err(|e| format!("Unable to read '{}': {}", file.display(), e))?;
    let content = String::from_utf8_lossy(&bytes);

    let chain = chaingen::parse_document(&content, &Schema::for_kind(schema))
        .map_err(|e| format!("There is a mistake inside {}: {}", file.display(), e))?;

    let json = serde_json::to_string_pretty(&chain)
        .map_err(|e| format!("Failed to serialize chain: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn print_chains(report: &GenerationReport) {
    println!("Chains:");
    for name in report.chain_names() {
        println!("    {}", name);
    }

    if report.has_skips() {
        println!("\nSkipped:");
        for skipped in &report.skipped {
            println!("    {} ({})", skipped.file_name, skipped.reason);
        }
    }
}

fn print_json(report: &GenerationReport) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn exit_code(report: &GenerationReport, strict: bool) -> i32 {
    if strict && report.has_skips() {
        EXIT_SKIPPED
    } else {
        0
    }
}
