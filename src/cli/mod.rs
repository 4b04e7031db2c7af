// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for pipegraph.

pub mod graph;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Pipeline task graph renderer
///
/// Draw the task dependencies of pipelines and pipeline runs.
#[derive(Parser, Debug)]
#[clap(
    name = "pipegraph",
    version,
    about = "Render pipeline task dependencies as DOT, PlantUML or Mermaid",
    long_about = None,
    after_help = "Examples:\n\
        pipegraph pipeline graph -f tekton/              Print every pipeline as DOT\n\
        pipegraph pipeline graph build -f build.yaml     Print a single pipeline\n\
        pipegraph pipelinerun graph --output-format mmd --output-dir out\n\n\
        See 'pipegraph <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with Pipelines
    #[clap(alias = "p")]
    Pipeline {
        #[clap(subcommand)]
        action: GraphAction,
    },

    /// Work with PipelineRuns
    #[clap(name = "pipelinerun", alias = "pr")]
    PipelineRun {
        #[clap(subcommand)]
        action: GraphAction,
    },
}

/// Actions available on pipelines and pipeline runs
#[derive(Subcommand, Debug, Clone)]
pub enum GraphAction {
    /// Generates Graph
    #[clap(alias = "g")]
    Graph(GraphArgs),
}

/// Options of the graph command
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Name to draw (default: all)
    pub name: Option<String>,

    /// Manifest files, directories or glob patterns
    #[clap(short, long = "filename", value_name = "PATH", default_value = ".")]
    pub filename: Vec<String>,

    /// The output format (dot - DOT, puml - PlantUML or mmd - Mermaid)
    #[clap(long, default_value = "dot", env = "PIPEGRAPH_OUTPUT_FORMAT")]
    pub output_format: String,

    /// The directory to save the output files. Otherwise, the output is printed to the screen
    #[clap(long, value_name = "DIR", env = "PIPEGRAPH_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Include TaskRefName information in the output
    #[clap(long, env = "PIPEGRAPH_WITH_TASK_REF")]
    pub with_task_ref: bool,
}

/// Which manifests a graph command draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pipeline,
    PipelineRun,
}
