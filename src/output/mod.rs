// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Batch output
//!
//! Renders a list of graphs either to one shared stream or to one file per
//! graph. Both paths stop at the first failure; files written before the
//! failure are left in place.

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{GraphError, GraphResult};
use crate::format::CodecRegistry;
use crate::pipeline::TaskGraph;

/// Render every graph and write it to `writer`, each followed by a blank line
pub fn print_all_graphs<W: Write>(
    graphs: &[TaskGraph],
    format: &str,
    with_task_ref: bool,
    writer: &mut W,
) -> GraphResult<()> {
    let registry = CodecRegistry::default();

    for graph in graphs {
        let output = registry
            .render(graph, format, with_task_ref)
            .map_err(GraphError::generate)?;

        debug!(pipeline = %graph.pipeline_name(), format, "printing graph");
        writeln!(writer, "{}", output).map_err(|source| GraphError::WriteOutput { source })?;
    }

    writer
        .flush()
        .map_err(|source| GraphError::WriteOutput { source })
}

/// Render every graph into `dir/{pipeline_name}.{format}`.
///
/// `dir` is created if missing. A graph whose name matches an earlier one
/// overwrites its file. Returns the written paths in input order.
pub fn write_all_graphs(
    graphs: &[TaskGraph],
    format: &str,
    dir: &Path,
    with_task_ref: bool,
) -> GraphResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| GraphError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let registry = CodecRegistry::default();
    let mut written = Vec::with_capacity(graphs.len());

    for graph in graphs {
        let output = registry
            .render(graph, format, with_task_ref)
            .map_err(GraphError::generate)?;

        let path = dir.join(format!("{}.{}", graph.pipeline_name(), format));
        std::fs::write(&path, output).map_err(|source| GraphError::WriteFile {
            path: path.clone(),
            source,
        })?;

        info!(pipeline = %graph.pipeline_name(), path = %path.display(), "wrote graph");
        written.push(path);
    }

    Ok(written)
}
