use clap::{Parser, ValueEnum};
use docschema::input::{self, InputError};
use docschema::report;
use docschema::ConversionResult;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Full result as pretty JSON
    Json,
    /// Indented plain-text report
    Text,
    /// Relationship analysis lines only
    Analysis,
}

#[derive(Parser)]
#[command(
    name = "docschema",
    about = "Translate SQL CREATE TABLE scripts into a document-store schema"
)]
struct Cli {
    /// Input .sql file, or - to read stdin
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Emit only the collections map (JSON format)
    #[arg(long)]
    collections_only: bool,

    /// Log skipped SQL constructs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "docschema=debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(cli: &Cli) -> Result<String, InputError> {
    if cli.input.as_os_str() == "-" {
        input::read_sql(std::io::stdin().lock(), "<stdin>")
    } else {
        input::load_sql(&cli.input)
    }
}

fn render(cli: &Cli, result: &ConversionResult) -> Result<String, serde_json::Error> {
    let rendered = match cli.format {
        Format::Json if cli.collections_only => result.collections_json_pretty()?,
        Format::Json => result.to_json_pretty()?,
        Format::Text => report::render_text(result),
        Format::Analysis => result
            .relationships_analysis
            .iter()
            .map(|line| format!("{line}\n"))
            .collect(),
    };
    Ok(rendered)
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let sql = match read_input(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let result = docschema::convert(&sql);
    tracing::info!(
        collections = result.collections.len(),
        relationships = result.relationships_analysis.len(),
        "conversion finished"
    );

    let output = match render(&cli, &result) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: failed to serialize result: {e}");
            process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &output) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                process::exit(1);
            }
        }
        None => {
            print!("{}", output);
            if cli.format == Format::Json {
                println!();
            }
        }
    }
}
