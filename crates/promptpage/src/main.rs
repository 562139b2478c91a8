mod cli;
mod commands;
mod context;
mod output;
mod sources;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("PROMPTPAGE_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config;
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Parse { template, json } => commands::parse::run(config, template, json, verbose),
        Commands::Render {
            template,
            set,
            segments,
            json,
        } => commands::render::run(config, template, set, segments, json, verbose),
        Commands::Export {
            template,
            set,
            output,
        } => commands::export::run(config, template, set, output, verbose),
        Commands::Templates { json } => commands::templates::run(config, json, verbose),
        Commands::Search { query, limit, json } => {
            commands::search::run(config, query, limit, json, verbose)
        }
        Commands::Catalog { items, json } => commands::catalog::run(config, items, json, verbose),
        Commands::Autofill { kind, name, json } => {
            commands::autofill::run(config, kind, name, json, verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
