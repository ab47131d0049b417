mod report;

use clap::{Parser, Subcommand};
use cxcursor_ast::Index;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cxcursor")]
#[command(author, version, about = "Inspect C++ AST manifests through cursor handles")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every cursor query for the declarations of a manifest
    Inspect {
        /// Manifest file (TOML, or JSON with a .json extension)
        manifest: PathBuf,

        /// Only report declarations with this name
        #[arg(long)]
        decl: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Load manifests and report whether they are well formed
    Check {
        /// Manifest files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Indented text
    Text,
    /// Pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect {
            manifest,
            decl,
            format,
        } => {
            let mut index = Index::new();
            let unit = cxcursor_manifest::load(&mut index, &manifest)?;
            let report = report::build(&index, unit, decl.as_deref())?;
            debug!(decls = report.decls.len(), "built report");

            match format {
                OutputFormat::Text => print!("{}", report::render_text(&report)),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
                    println!("{json}");
                }
            }
        }

        Commands::Check { files } => {
            let mut index = Index::new();

            for file in &files {
                match cxcursor_manifest::load(&mut index, file) {
                    Ok(unit) => {
                        let decls = index.unit(unit).map(|u| u.decl_count()).unwrap_or(0);
                        println!("{}: OK ({decls} declarations)", file.display());
                        index.dispose(unit)?;
                    }
                    Err(e) => {
                        eprintln!("{}: Error", file.display());
                        return Err(e.into());
                    }
                }
            }
            info!(files = files.len(), "all manifests loaded");
        }
    }

    Ok(())
}
