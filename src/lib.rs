// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! # pipegraph - Pipeline Task Graphs
//!
//! `pipegraph` draws the task dependencies of Tekton-style pipelines as
//! Graphviz (`dot`), PlantUML (`puml`) or Mermaid (`mmd`) diagrams.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print every pipeline in ./tekton as DOT
//! pipegraph pipeline graph -f tekton/
//!
//! # Write one Mermaid file per pipeline run, with task refs
//! pipegraph pipelinerun graph -f 'runs/*.yaml' --output-format mmd \
//!     --output-dir diagrams --with-task-ref
//! ```
//!
//! ## Library use
//!
//! ```
//! use pipegraph::{render, PipelineTask, TaskGraph};
//!
//! let graph = TaskGraph::build(&[
//!     PipelineTask::new("build").with_task_ref("kaniko"),
//!     PipelineTask::new("deploy").with_run_after(["build"]),
//! ])
//! .named("release");
//!
//! let mermaid = render(&graph, "mmd", false).unwrap();
//! assert!(mermaid.contains("build --> deploy"));
//! ```

pub mod cli;
pub mod errors;
pub mod format;
pub mod output;
pub mod pipeline;
pub mod source;

// Re-export commonly used types
pub use errors::{FormatError, GraphError, GraphResult};
pub use format::{render, Codec, CodecRegistry, OutputFormat};
pub use output::{print_all_graphs, write_all_graphs};
pub use pipeline::{PipelineTask, TaskGraph, TaskNode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
