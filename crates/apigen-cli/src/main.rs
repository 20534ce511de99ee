//! apigen CLI - Haskell binding generator
//!
//! Commands:
//! - `apigen generate` - Generate binding modules from an API model
//! - `apigen scan` - Print the hints recovered from an existing module
//! - `apigen check` - Validate an apigen.toml configuration

use clap::{Parser, Subcommand};

mod check;
mod generate;
mod inputs;
mod logging;
mod scan;

#[derive(Parser)]
#[command(name = "apigen")]
#[command(author, version, about = "Binding generator for GObject-style C libraries", long_about = None)]
struct Cli {
    /// Log filter, e.g. `debug` or `apigen_codegen=trace` (default: RUST_LOG, then info)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate binding modules
    Generate {
        /// Path to the API model (JSON list of namespaces)
        #[arg(short, long)]
        api: String,

        /// Output directory for generated modules
        #[arg(short, long)]
        output: String,

        /// Path to the documentation (JSON list of module docs)
        #[arg(short, long)]
        docs: Option<String>,

        /// Directory holding previously generated modules
        #[arg(short, long)]
        existing: Option<String>,

        /// Path to apigen.toml (default: ./apigen.toml when present)
        #[arg(short, long)]
        config: Option<String>,

        /// Generate only this object (C type name)
        #[arg(long)]
        object: Option<String>,

        /// Module template replacing the built-in one
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Print the ordering and call hints of an existing module as JSON
    Scan {
        /// Path to the module file
        module: String,

        /// C function prefix assumed when the module declares none
        #[arg(short, long, default_value = "gtk")]
        prefix: String,
    },

    /// Validate an apigen.toml configuration
    Check {
        /// Path to apigen.toml (default: ./apigen.toml)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Generate {
            api,
            output,
            docs,
            existing,
            config,
            object,
            template,
        } => {
            generate::run(generate::GenerateArgs {
                api,
                output,
                docs,
                existing,
                config,
                object,
                template,
            })?;
        }
        Commands::Scan { module, prefix } => {
            scan::run(&module, &prefix)?;
        }
        Commands::Check { config } => {
            check::check(config)?;
        }
    }

    Ok(())
}
