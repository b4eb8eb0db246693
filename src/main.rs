// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HQC-MDD CLI entrypoint.
//!
//! Artifacts go to stdout or `-o`; logs go to stderr (`RUST_LOG`, default `info`).

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use hqc_mdd::pipeline::RunArtifacts;
use hqc_mdd::report::ContextMetrics;
use hqc_mdd::server::{self, AppState, DEFAULT_PORT};
use hqc_mdd::store::{read_source, write_artifact, WriteDurability};
use hqc_mdd::{DiagramView, Pipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "hqc-mdd")]
#[command(about = "i* diagrams to feature models to Quantum-UML", version)]
struct Cli {
    /// JSON pipeline configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Namespace written into feature models
    #[arg(long, global = true)]
    namespace: Option<String>,
    /// Sync artifacts to disk before returning
    #[arg(long, global = true)]
    durable_writes: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized graph of a draw.io diagram as JSON
    Extract {
        /// draw.io XML file
        input: PathBuf,
    },
    /// Transform a draw.io diagram into feature-model text
    CimToPim {
        /// draw.io XML file
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render feature-model text as PlantUML
    PimToPsm {
        /// Feature-model text file
        input: PathBuf,
        /// architecture or feature-tree
        #[arg(long, default_value = "architecture")]
        view: DiagramView,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the viewer URL instead of the diagram
        #[arg(long)]
        url: bool,
    },
    /// Run the whole pipeline over one or more diagrams
    Run {
        /// draw.io XML files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Directory for the .uvl, .puml and .url artifacts
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// architecture or feature-tree
        #[arg(long, default_value = "architecture")]
        view: DiagramView,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let pipeline = Pipeline::new(load_config(cli.config.as_deref(), cli.namespace)?);
    let durability = if cli.durable_writes {
        WriteDurability::Durable
    } else {
        WriteDurability::BestEffort
    };

    match cli.command {
        Commands::Extract { input } => {
            let graph = pipeline.extract(&read_source(&input)?)?;
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
        Commands::CimToPim { input, output } => {
            let result = pipeline.cim_to_pim(&read_source(&input)?)?;
            tracing::info!(
                features = result.report.feature_model.features,
                constraints = result.report.feature_model.constraints,
                "feature model built"
            );
            emit(output.as_deref(), &result.text, durability)?;
        }
        Commands::PimToPsm {
            input,
            view,
            output,
            url,
        } => {
            let result =
                pipeline.pim_to_psm(&read_source(&input)?, view, ContextMetrics::default())?;
            let text = if url {
                format!("{}\n", result.diagram_url)
            } else {
                result.diagram
            };
            emit(output.as_deref(), &text, durability)?;
        }
        Commands::Run {
            inputs,
            out_dir,
            view,
        } => run_all(&pipeline, &inputs, &out_dir, view, durability)?,
        Commands::Serve { host, port } => serve(pipeline, &host, port)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>, namespace: Option<String>) -> anyhow::Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    }
    .with_env_overrides()?;
    if let Some(namespace) = namespace {
        config.namespace = namespace;
        config.validate()?;
    }
    Ok(config)
}

fn emit(output: Option<&Path>, text: &str, durability: WriteDurability) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            write_artifact(path, text, durability)?;
            tracing::info!(path = %path.display(), "written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn run_all(
    pipeline: &Pipeline,
    inputs: &[PathBuf],
    out_dir: &Path,
    view: DiagramView,
    durability: WriteDurability,
) -> anyhow::Result<()> {
    let results: Vec<(&PathBuf, Result<RunArtifacts, _>)> = inputs
        .par_iter()
        .map(|input| (input, pipeline.run_file(input, out_dir, view, durability)))
        .collect();

    let mut failed = 0usize;
    for (input, result) in results {
        match result {
            Ok(artifacts) => println!("{}", artifacts.diagram.display()),
            Err(err) => {
                failed += 1;
                tracing::error!(input = %input.display(), stage = err.stage(), error = %err, "run failed");
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} inputs failed", inputs.len());
    }
    Ok(())
}

fn serve(pipeline: Pipeline, host: &str, port: u16) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind((host, port)).await?;
        tracing::info!(addr = %listener.local_addr()?, "serving");
        axum::serve(listener, server::router(AppState::new(pipeline)))
            .with_graceful_shutdown(async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %err, "cannot listen for shutdown signal");
                }
            })
            .await?;
        Ok(())
    })
}
