use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use typed_id::{
    attribute_source, check_graph, generate, GeneratorOptions, TypeGraph, TypedIdError, ATTRIBUTE_ARTIFACT_NAME,
};

#[derive(Parser)]
#[command(name = "typedid")]
#[command(about = "Generate strongly-typed id value types from annotated C# declarations", long_about = None)]
struct Cli {
    /// Log every generation decision (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a generation pass over a JSON type graph
    Generate {
        /// Input type graph (`.json`)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory receiving the `.g.cs` artifacts (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Process candidates one after the other
        #[arg(long)]
        sequential: bool,

        /// Do not emit the `StronglyTypedIdAttribute.g.cs` definition
        #[arg(long)]
        no_attribute: bool,
    },

    /// Verify a type graph and list the annotations it would generate from
    Check {
        /// Input type graph (`.json`)
        #[arg(short, long)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print or write the annotation definition source
    Attribute {
        /// Output `.cs` file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn read_graph(input: &Path) -> Result<TypeGraph, TypedIdError> {
    let text = fs::read_to_string(input)?;
    Ok(TypeGraph::from_json(&text)?)
}

fn main() -> Result<(), TypedIdError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Generate { input, output, sequential, no_attribute } => {
            let graph = read_graph(input)?;
            let options = GeneratorOptions {
                parallel: !sequential,
                emit_attribute_definition: !no_attribute,
                ..GeneratorOptions::default()
            };
            let result = generate(&graph, options)?;

            for diagnostic in &result.diagnostics {
                eprintln!("{}", diagnostic);
            }

            if let Some(dir) = output {
                fs::create_dir_all(dir)?;
                for (name, text) in &result.artifacts {
                    fs::write(dir.join(name), text)?;
                }
                info!("wrote {} artifact(s) to {}", result.artifacts.len(), dir.display());
                println!("Generated {} file(s) in {}", result.artifacts.len(), dir.display());
            } else {
                for (name, text) in &result.artifacts {
                    println!("// ---- {} ----", name);
                    println!("{}", text);
                }
            }

            if result.has_errors() {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Check { input, json } => {
            let graph = read_graph(input)?;
            let report = check_graph(&graph)?;

            if *json {
                let text = serde_json::to_string_pretty(&report).map_err(typed_id::SchemaError::from)?;
                println!("{}", text);
            } else {
                for candidate in &report.candidates {
                    for (descriptor, artifact) in candidate.descriptors.iter().zip(&candidate.artifacts) {
                        println!(
                            "{} ({}): {:?} -> {}",
                            candidate.qualified_name,
                            candidate.declaration.keyword(),
                            descriptor.kind,
                            artifact
                        );
                    }
                }
                for diagnostic in &report.diagnostics {
                    eprintln!("{}", diagnostic);
                }
            }

            if report.diagnostics.iter().any(|d| d.severity == typed_id::Severity::Error) {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Attribute { output } => {
            let options = GeneratorOptions::default();
            let text = attribute_source(&options.tool_name, &options.tool_version);
            if let Some(out_path) = output {
                fs::write(out_path, &text)?;
                println!("{} written to {}", ATTRIBUTE_ARTIFACT_NAME, out_path.display());
            } else {
                print!("{}", text);
            }
            Ok(())
        }
    }
}
