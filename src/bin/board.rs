//! Registry Board CLI
//!
//! Browse a schema registry, test candidate schemas for compatibility and
//! validate payloads against registered JSON schemas.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use registry_board::{logging, Board, BoardConfig, Compatibility, CompatibilityResult};

#[derive(Parser)]
#[command(name = "registry-board")]
#[command(about = "Browse a schema registry and test schema compatibility")]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long)]
    config: Option<String>,

    /// Registry URL (overrides configuration)
    #[arg(short, long)]
    registry: Option<String>,

    /// Print JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List subjects, optionally fuzzy-filtered
    Subjects {
        /// Search term
        #[arg(short, long, default_value = "")]
        search: String,
        /// Maximum results
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Global config and the config of every subject
    Overview,

    /// Registered versions of a subject
    Schemas {
        subject: String,
    },

    /// Fetch a schema by id
    Schema {
        id: u32,
    },

    /// Test a candidate JSON schema against a registered version
    TestSchema {
        #[arg(short, long)]
        subject: String,
        #[arg(short = 'V', long)]
        version: i32,
        #[command(flatten)]
        input: SchemaInput,
    },

    /// Validate a payload against a registered JSON schema
    Validate {
        /// Schema id
        #[arg(short, long)]
        id: u32,
        #[command(flatten)]
        input: PayloadInput,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SchemaInput {
    /// Candidate schema as inline JSON
    #[arg(long)]
    schema: Option<String>,
    /// Read the candidate schema from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct PayloadInput {
    /// Payload as inline JSON
    #[arg(long)]
    payload: Option<String>,
    /// Read the payload from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn read_input(inline: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    match (inline, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => Ok(String::new()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// `Ok(false)` when the command ran but the answer was negative
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = BoardConfig::load_from(cli.config.as_deref())?;
    if let Some(url) = cli.registry {
        config.registry.url = url;
    }
    logging::init(&config.logging);

    let board = Board::from_config(&config)?;
    let json = cli.json;

    match cli.command {
        Commands::Subjects { search, limit } => {
            let matches = board.search_subjects(&search, limit).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if matches.is_empty() {
                println!("No subjects found");
            } else {
                for m in &matches {
                    println!("{}", m.subject);
                }
            }
            Ok(true)
        }

        Commands::Overview => {
            let overview = board.overview().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                println!("📋 Global Config");
                println!("  Level: {}", overview.global.level_display());
                println!("  Group: {}", overview.global.group_display());
                println!("  Alias: {}", overview.global.alias_display());
                println!();
                println!("Subjects ({}):", overview.subjects.len());
                for subject in &overview.subjects {
                    let origin = if subject.takes_global_default() { " (global default)" } else { "" };
                    println!(
                        "  {} - {}{}",
                        subject.subject(),
                        subject.effective_level(&overview.global),
                        origin
                    );
                }
            }
            Ok(true)
        }

        Commands::Schemas { subject } => {
            let schemas = board.schemas(&subject).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schemas)?);
            } else if schemas.is_empty() {
                println!("No schemas registered for {}", subject);
            } else {
                for schema in &schemas {
                    println!("── {} v{} (id {}, {})", schema.subject, schema.version, schema.id, schema.schema_type);
                    println!("{}", schema.formatted());
                }
            }
            Ok(true)
        }

        Commands::Schema { id } => {
            let schema = board.client().schema_by_id(id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                println!("── id {} ({})", schema.id, schema.schema_type);
                println!("{}", schema.formatted());
            }
            Ok(true)
        }

        Commands::TestSchema { subject, version, input } => {
            let raw = read_input(input.schema, input.file)?;
            let result = board.test_schema(&subject, version, &raw).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_compatibility(&subject, version, &result);
            }
            Ok(result.compatibility() == Compatibility::Compatible)
        }

        Commands::Validate { id, input } => {
            let raw = read_input(input.payload, input.file)?;
            let outcome = board
                .validate_payload(id, serde_json::Value::String(raw))
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if outcome.is_valid() {
                println!("✅ Payload validates against schema {}", id);
            } else {
                println!("❌ Payload does not validate against schema {}", id);
                for error in outcome.errors() {
                    println!("   └─ {}", error);
                }
            }
            Ok(outcome.is_valid())
        }
    }
}

fn print_compatibility(subject: &str, version: i32, result: &CompatibilityResult) {
    match result.compatibility() {
        Compatibility::Compatible => println!("✅ Compatible with {} v{}", subject, version),
        Compatibility::Incompatible => println!("❌ Not compatible with {} v{}", subject, version),
        Compatibility::Undetermined if result.is_bad_request() => println!("⚠️  Candidate schema rejected"),
        Compatibility::Undetermined => println!("⚠️  Compatibility could not be determined"),
    }
    println!("   Message: {}", result.message());
    println!("   Status: {} (error code {})", result.status_code(), result.error_code());
}
