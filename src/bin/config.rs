//! Board Config CLI
//!
//! View and manage registry board configuration.

use clap::{Parser, Subcommand};
use registry_board::BoardConfig;

#[derive(Parser)]
#[command(name = "board-config")]
#[command(about = "View and manage registry board configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show effective configuration
    Show {
        /// Config file to load (optional)
        #[arg(short, long)]
        config: Option<String>,

        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a config file with default settings
    Init {
        /// Output path (default: board.toml)
        #[arg(short, long, default_value = "board.toml")]
        output: String,
    },

    /// Validate configuration
    Validate {
        /// Config file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show { config, toml, json } => {
            let cfg = BoardConfig::load_from(config.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else if toml {
                println!("{}", ::toml::to_string_pretty(&cfg)?);
            } else {
                println!("📋 Registry Board Configuration\n");
                println!("Registry:");
                println!("  URL: {}", cfg.registry.url);
                println!("  Timeout: {}s", cfg.registry.timeout_secs);
                println!("  Connect timeout: {}s", cfg.registry.connect_timeout_secs);
                println!("  Verbose compatibility: {}", cfg.registry.verbose_compatibility);

                println!("\nLogging:");
                println!("  Level: {}", cfg.logging.level);
            }
        }

        Commands::Init { output } => {
            let cfg = BoardConfig::default();
            cfg.save(&output)?;
            println!("✅ Created config file: {}", output);
        }

        Commands::Validate { config } => {
            let checked = BoardConfig::load_from(config.as_deref())
                .map_err(registry_board::BoardError::from)
                .and_then(|cfg| cfg.validate().map(|()| cfg));
            match checked {
                Ok(cfg) => {
                    println!("✅ Configuration is valid");
                    println!("   Registry: {}", cfg.registry.url);
                    println!("   Timeout: {}s", cfg.registry.timeout_secs);
                }
                Err(e) => {
                    eprintln!("❌ Configuration error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
