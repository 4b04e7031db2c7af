// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Graph command - render pipelines or pipeline runs as diagrams

use colored::Colorize;
use miette::{Result, WrapErr};

use super::{GraphArgs, ResourceKind};
use crate::errors::GraphError;
use crate::format::OutputFormat;
use crate::output::{print_all_graphs, write_all_graphs};
use crate::pipeline::TaskGraph;
use crate::source::{GraphFetcher, GraphSource, Manifests, PipelineFetcher, PipelineRunFetcher};

/// Run the graph command
pub fn run(kind: ResourceKind, args: GraphArgs) -> Result<()> {
    // Reject a bad format before touching any manifest
    args.output_format
        .parse::<OutputFormat>()
        .map_err(GraphError::from)?;

    let cwd = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;
    let manifests = Manifests::load(&args.filename, &cwd)?;

    let fetcher: Box<dyn GraphFetcher + '_> = match kind {
        ResourceKind::Pipeline => Box::new(PipelineFetcher::new(&manifests)),
        ResourceKind::PipelineRun => Box::new(PipelineRunFetcher::new(&manifests)),
    };

    let sources = match &args.name {
        Some(name) => vec![fetcher.get_by_name(name)?],
        None => fetcher.get_all()?,
    };

    let graphs: Vec<TaskGraph> = sources.into_iter().map(GraphSource::into_graph).collect();

    match &args.output_dir {
        Some(dir) => {
            let written =
                write_all_graphs(&graphs, &args.output_format, dir, args.with_task_ref)
                    .wrap_err("failed to save graph")?;

            for path in written {
                println!("  {} {}", "✓".green(), path.display());
            }
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            print_all_graphs(&graphs, &args.output_format, args.with_task_ref, &mut handle)
                .wrap_err("failed to print graph")?;
        }
    }

    Ok(())
}
