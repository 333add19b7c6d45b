//! Swaggerize - Command-line tool for generating Swagger 2.0 documents.
//!
//! Reads a route manifest, finds the models it names among the Rust sources of
//! a model directory, and prints (or writes) the resulting Swagger document.
//!
//! # Usage
//!
//! ```bash
//! swaggerize [OPTIONS] <MANIFEST>
//! ```
//!
//! # Examples
//!
//! Generate JSON next to the manifest's models:
//! ```bash
//! swaggerize api/routes.yaml -o swagger.json
//! ```
//!
//! Models kept elsewhere, YAML output:
//! ```bash
//! swaggerize api/routes.yaml -m src/models -f yaml -o swagger.yaml
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! swaggerize api/routes.yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swaggerize::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    // Verbose raises the default level; RUST_LOG still takes precedence
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    info!("Swaggerize starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Swagger document generation completed successfully");

    Ok(())
}
