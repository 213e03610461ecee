use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swaggen_core::build;
use swaggen_core::config::{self, CONFIG_FILE_NAME};
use swaggen_core::diag::LogSink;
use swaggen_core::model::ApiModel;
use swaggen_core::parse;

#[derive(Parser)]
#[command(name = "swaggen", about = "Swagger 2.0 client-binding compiler", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a Swagger 2.0 document
    Validate {
        /// Path to the document (defaults to the configured input)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Inspect the assembled binding model of a document
    Inspect {
        /// Path to the document (defaults to the configured input)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a new swaggen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            format,
            output,
        } => cmd_inspect(input, format, output),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swaggen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Resolve the input path from the flag or the project config file.
fn resolve_input(input: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = input {
        return Ok(path);
    }
    let cfg = config::load_config(&PathBuf::from(CONFIG_FILE_NAME))
        .map_err(|e| anyhow::anyhow!(e))?
        .unwrap_or_default();
    Ok(PathBuf::from(cfg.input))
}

/// Read and assemble a document. Individual dropped operations surface as
/// log diagnostics; only a structurally invalid document is an error.
fn load_model(input: &PathBuf) -> Result<ApiModel> {
    let content =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
    let document = parse::from_json(&content)
        .with_context(|| format!("invalid Swagger document {}", input.display()))?;
    Ok(build::build_model(&document, &LogSink))
}

fn cmd_validate(input: Option<PathBuf>) -> Result<()> {
    let input = resolve_input(input)?;
    let model = load_model(&input)?;

    eprintln!("Valid Swagger 2.0 document: {}", model.info.title);
    eprintln!("  Version: {}", model.info.version);
    eprintln!("  Paths: {}", model.paths.len());
    eprintln!("  Operations: {}", model.operations().count());
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(
    input: Option<PathBuf>,
    format: InspectFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let input = resolve_input(input)?;
    let model = load_model(&input)?;
    let summary = build_inspect_summary(&model);

    let rendered = match format {
        InspectFormat::Yaml => serde_yaml_ng::to_string(&summary)?,
        InspectFormat::Json => {
            let mut json = serde_json::to_string_pretty(&summary)?;
            json.push('\n');
            json
        }
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("  wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn build_inspect_summary(model: &ApiModel) -> serde_json::Value {
    let operations: Vec<serde_json::Value> = model
        .paths
        .iter()
        .flat_map(|item| {
            item.operations.values().map(|op| {
                let parameters: Vec<serde_json::Value> = op
                    .parameters
                    .ordered()
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "name": p.name,
                            "ident": p.ident.text,
                            "in": p.location.as_str(),
                            "kind": p.kind.map(|k| k.as_str()),
                            "required": p.required,
                            "default": p.default,
                        })
                    })
                    .collect();
                serde_json::json!({
                    "id": op.id.text,
                    "method": op.method.as_str(),
                    "route": item.route(),
                    "deprecated": op.deprecated,
                    "parameters": parameters,
                    "responses": op.responses.iter().map(|r| &r.status).collect::<Vec<_>>(),
                })
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": model.info.title,
            "version": model.info.version,
        },
        "host": model.host,
        "basePath": model.base_path,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
