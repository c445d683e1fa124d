//! sdkgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use sdkgen_core::{ArtifactKind, Config, SdkLanguage};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdkgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate SDK sources from an annotated OpenAPI document
    Generate {
        /// Path or URL to the OpenAPI document (YAML or JSON)
        ///
        /// Example: --schema-path path/to/openapi.yaml
        /// Example: --schema-path https://example.com/openapi.json
        #[arg(long)]
        schema_path: Option<String>,
        /// Target language (java, python, ruby)
        #[arg(long)]
        language: Option<String>,
        /// Output directory for generated code
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Custom template directory replacing the built-in templates
        #[arg(long)]
        template_dir: Option<PathBuf>,
        /// YAML configuration file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Artifact kind to generate, repeatable (default: all)
        #[arg(long = "artifact")]
        artifacts: Vec<String>,
        /// SDK name, the root namespace of generated code
        #[arg(long)]
        sdk_name: Option<String>,
        /// Replace existing files
        #[arg(long)]
        overwrite: bool,
        /// Print the planned file operations without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Skip the template set's post-generation hooks
        #[arg(long)]
        no_hooks: bool,
    },
    /// List the supported target languages
    Languages,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Languages => {
            for language in SdkLanguage::all() {
                println!("{}", language);
            }
        }
        Commands::Generate {
            schema_path,
            language,
            output_dir,
            template_dir,
            config,
            artifacts,
            sdk_name,
            overwrite,
            dry_run,
            no_hooks,
        } => {
            // Start from the config file, if any
            let mut config = match config {
                Some(path) => Config::from_file(&path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => {
                    let schema_path = schema_path
                        .clone()
                        .context("--schema-path is required without --config")?;
                    let output_dir = output_dir
                        .clone()
                        .context("--output-dir is required without --config")?;
                    Config::new("sdk", schema_path, output_dir.to_string_lossy())
                }
            };

            // Flags override file values
            if let Some(schema_path) = schema_path {
                config.openapi_schema_path = schema_path;
            }
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir.to_string_lossy().to_string();
            }
            if let Some(language) = language {
                config.language = language
                    .parse()
                    .map_err(|e| anyhow::anyhow!("Invalid language '{language}': {e}"))?;
            }
            if let Some(template_dir) = template_dir {
                config.template_dir = Some(template_dir.to_string_lossy().to_string());
            }
            if let Some(sdk_name) = sdk_name {
                config.sdk_name = sdk_name;
            }
            if !artifacts.is_empty() {
                config.artifacts = artifacts
                    .iter()
                    .map(|kind| {
                        kind.parse::<ArtifactKind>()
                            .map_err(|e| anyhow::anyhow!("Invalid artifact '{kind}': {e}"))
                    })
                    .collect::<anyhow::Result<_>>()?;
            }
            config.overwrite |= overwrite;
            config.run_hooks &= !no_hooks;

            tracing::info!(
                "Generating {} SDK '{}' from {} into {}",
                config.language,
                config.sdk_name,
                config.openapi_schema_path,
                config.output_dir
            );

            let report = sdkgen_core::generate(&config, dry_run)
                .await
                .context("SDK generation failed")?;

            match report.applied {
                None => {
                    for op in &report.planned {
                        println!("{}", op);
                    }
                }
                Some(applied) => {
                    println!(
                        "Wrote {} files to {}",
                        applied.files_written, config.output_dir
                    );
                    for skipped in &applied.files_skipped {
                        println!("Skipped existing {}", skipped.display());
                    }
                }
            }
        }
    }

    Ok(())
}
