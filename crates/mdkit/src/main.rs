//! mdkit CLI - Markdown to HTML rendering.
//!
//! Provides commands for:
//! - `render`: Convert a markdown file (or stdin) to HTML
//! - `template`: Render a minijinja template with the `markdown` filter and function
//! - `init`: Write a default `mdkit.toml`

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{InitArgs, RenderArgs, TemplateArgs};
use output::Output;

/// mdkit - Markdown to HTML rendering.
#[derive(Parser)]
#[command(name = "mdkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to HTML.
    Render(RenderArgs),
    /// Render a template using the markdown component.
    Template(TemplateArgs),
    /// Create a default configuration file.
    Init(InitArgs),
}

/// `--verbose` enables INFO level, otherwise `RUST_LOG` applies (ERROR only when unset).
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Template(args) => args.verbose,
        Commands::Init(_) => false,
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Template(args) => args.execute(),
        Commands::Init(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
