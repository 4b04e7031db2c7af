// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! pipegraph - Pipeline Task Graphs
//!
//! Render the task dependencies of pipelines as DOT, PlantUML or Mermaid.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipegraph::cli::{Cli, Commands, GraphAction, ResourceKind};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for graph output
    let default_filter = if cli.verbose {
        "pipegraph=debug"
    } else {
        "pipegraph=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Pipeline {
            action: GraphAction::Graph(args),
        } => pipegraph::cli::graph::run(ResourceKind::Pipeline, args),
        Commands::PipelineRun {
            action: GraphAction::Graph(args),
        } => pipegraph::cli::graph::run(ResourceKind::PipelineRun, args),
    }
}
