// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Error types
//!
//! The rendering core can only fail one way: an unrecognized output format.
//! Everything else here belongs to the edges of the tool (reading manifests,
//! writing files) and carries enough context to tell which stage failed.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipegraph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// An output format identifier that none of the codecs understands.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("Invalid output format: {format}")]
#[diagnostic(
    code(pipegraph::invalid_format),
    help("Allowed formats are: dot, puml, mmd")
)]
pub struct FormatError {
    /// The identifier exactly as it was supplied
    pub format: String,
}

impl FormatError {
    pub fn new(format: impl Into<String>) -> Self {
        Self { format: format.into() }
    }
}

/// Main error type for pipegraph
#[derive(Error, Debug, Diagnostic)]
pub enum GraphError {
    // ─────────────────────────────────────────────────────────────────────────
    // Rendering Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidFormat(#[from] FormatError),

    #[error("failed to generate output: {source}")]
    #[diagnostic(code(pipegraph::generate_output))]
    GenerateOutput {
        #[source]
        source: FormatError,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Output Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("failed to create directory {}: {source}", path.display())]
    #[diagnostic(
        code(pipegraph::create_dir),
        help("Check that the parent directory is writable")
    )]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {}: {source}", path.display())]
    #[diagnostic(code(pipegraph::write_file))]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {source}")]
    #[diagnostic(code(pipegraph::write_output))]
    WriteOutput {
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Manifest Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Manifest path not found: {}", path.display())]
    #[diagnostic(
        code(pipegraph::manifest_not_found),
        help("Pass pipeline manifests with -f/--filename")
    )]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to read file '{}': {error}", path.display())]
    #[diagnostic(code(pipegraph::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("YAML parsing error in '{}': {message}", path.display())]
    #[diagnostic(code(pipegraph::yaml_error))]
    Yaml { path: PathBuf, message: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(pipegraph::glob_error))]
    GlobPattern { message: String },

    #[error("No input files matched pattern: {pattern}")]
    #[diagnostic(
        code(pipegraph::no_input_files),
        help("Check that files matching '{pattern}' exist")
    )]
    NoInputFiles { pattern: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Pipeline '{name}' not found")]
    #[diagnostic(code(pipegraph::pipeline_not_found))]
    PipelineNotFound { name: String },

    #[error("PipelineRun '{name}' not found")]
    #[diagnostic(code(pipegraph::pipeline_run_not_found))]
    PipelineRunNotFound { name: String },

    #[error("no {kind} found")]
    #[diagnostic(
        code(pipegraph::no_pipelines),
        help("Check that the manifests contain documents with the expected 'kind'")
    )]
    NoPipelines { kind: &'static str },

    #[error("PipelineRun '{run}' has neither pipelineRef nor pipelineSpec")]
    #[diagnostic(code(pipegraph::missing_pipeline_ref))]
    MissingPipelineRef { run: String },
}

impl From<glob::PatternError> for GraphError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl GraphError {
    /// Wrap a dispatch failure that happened while emitting a batch
    pub fn generate(source: FormatError) -> Self {
        Self::GenerateOutput { source }
    }
}
