use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use docgraph::docgraph::DocGraph;
use docgraph::errors::DocGraphError;

/// Cross-referenced documentation model builder.
#[derive(Parser)]
#[command(
    name = "docgraph",
    about = "Builds a cross-referenced documentation model from structural metadata and XML doc comments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the resolved model from metadata (.json) and doc (.xml) files
    Build {
        /// Input files, any order: structural metadata (.json) and
        /// documentation comments (.xml)
        inputs: Vec<PathBuf>,
        /// Write the resolved model as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the resolved model as JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> docgraph::errors::Result<()> {
    match cli.command {
        Commands::Build {
            inputs,
            output,
            json,
        } => {
            if inputs.is_empty() {
                return Err(DocGraphError::Argument {
                    message: "no input files given".to_string(),
                });
            }

            let mut metadata = Vec::new();
            let mut docs = Vec::new();
            for input in inputs {
                match input.extension().and_then(|e| e.to_str()) {
                    Some("json") => metadata.push(input),
                    Some("xml") => docs.push(input),
                    _ => {
                        return Err(DocGraphError::Argument {
                            message: format!(
                                "unrecognized input '{}': expected .json or .xml",
                                input.display()
                            ),
                        })
                    }
                }
            }

            let mut graph = DocGraph::with_logging();
            let (model, summary) = graph.build_from_paths(&metadata, &docs)?;

            if let Some(path) = &output {
                std::fs::write(path, serde_json::to_string_pretty(&model)?)?;
                println!("Wrote resolved model to {}", path.display());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            }

            println!(
                "Built {} namespaces, {} types, {} members ({} external references) in {}ms",
                summary.namespace_count,
                summary.type_count,
                summary.member_count,
                summary.external_count,
                summary.duration_ms
            );
        }
    }
    Ok(())
}
