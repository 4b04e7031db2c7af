// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Graph sources
//!
//! A fetcher picks the task lists to draw out of loaded manifests. Pipelines
//! are drawn under their own name; pipeline runs are drawn under the run's
//! name using the tasks of the pipeline they execute.

use crate::errors::{GraphError, GraphResult};
use crate::pipeline::{PipelineRun, PipelineTask, TaskGraph};
use crate::source::Manifests;

/// Name and tasks of one graph to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSource {
    pub name: String,
    pub tasks: Vec<PipelineTask>,
}

impl GraphSource {
    pub fn into_graph(self) -> TaskGraph {
        TaskGraph::build(&self.tasks).named(self.name)
    }
}

/// Trait for looking up graph sources
pub trait GraphFetcher {
    /// Fetch a single source by name
    fn get_by_name(&self, name: &str) -> GraphResult<GraphSource>;

    /// Fetch every available source
    fn get_all(&self) -> GraphResult<Vec<GraphSource>>;
}

/// Draws `Pipeline` documents
pub struct PipelineFetcher<'a> {
    manifests: &'a Manifests,
}

impl<'a> PipelineFetcher<'a> {
    pub fn new(manifests: &'a Manifests) -> Self {
        Self { manifests }
    }
}

impl GraphFetcher for PipelineFetcher<'_> {
    fn get_by_name(&self, name: &str) -> GraphResult<GraphSource> {
        let pipeline = self
            .manifests
            .pipeline(name)
            .ok_or_else(|| GraphError::PipelineNotFound {
                name: name.to_string(),
            })?;

        Ok(GraphSource {
            name: pipeline.name().to_string(),
            tasks: pipeline.spec.tasks.clone(),
        })
    }

    fn get_all(&self) -> GraphResult<Vec<GraphSource>> {
        if self.manifests.pipelines.is_empty() {
            return Err(GraphError::NoPipelines { kind: "Pipelines" });
        }

        Ok(self
            .manifests
            .pipelines
            .iter()
            .map(|pipeline| GraphSource {
                name: pipeline.name().to_string(),
                tasks: pipeline.spec.tasks.clone(),
            })
            .collect())
    }
}

/// Draws `PipelineRun` documents
pub struct PipelineRunFetcher<'a> {
    manifests: &'a Manifests,
}

impl<'a> PipelineRunFetcher<'a> {
    pub fn new(manifests: &'a Manifests) -> Self {
        Self { manifests }
    }

    fn resolve(&self, run: &PipelineRun) -> GraphResult<GraphSource> {
        let tasks = match (&run.spec.pipeline_ref, &run.spec.pipeline_spec) {
            (Some(pipeline_ref), _) => self
                .manifests
                .pipeline(&pipeline_ref.name)
                .map(|pipeline| pipeline.spec.tasks.clone())
                .ok_or_else(|| GraphError::PipelineNotFound {
                    name: pipeline_ref.name.clone(),
                })?,
            (None, Some(spec)) => spec.tasks.clone(),
            (None, None) => {
                return Err(GraphError::MissingPipelineRef {
                    run: run.name().to_string(),
                })
            }
        };

        Ok(GraphSource {
            name: run.name().to_string(),
            tasks,
        })
    }
}

impl GraphFetcher for PipelineRunFetcher<'_> {
    fn get_by_name(&self, name: &str) -> GraphResult<GraphSource> {
        let run = self
            .manifests
            .pipeline_run(name)
            .ok_or_else(|| GraphError::PipelineRunNotFound {
                name: name.to_string(),
            })?;

        self.resolve(run)
    }

    fn get_all(&self) -> GraphResult<Vec<GraphSource>> {
        if self.manifests.pipeline_runs.is_empty() {
            return Err(GraphError::NoPipelines {
                kind: "PipelineRuns",
            });
        }

        self.manifests
            .pipeline_runs
            .iter()
            .map(|run| self.resolve(run))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFESTS: &str = r#"
kind: Pipeline
metadata:
  name: release
spec:
  tasks:
    - name: build
      taskRef:
        name: kaniko
    - name: push
      taskRef:
        name: crane
      runAfter: [build]
---
kind: PipelineRun
metadata:
  name: release-run-7
spec:
  pipelineRef:
    name: release
---
kind: PipelineRun
metadata:
  name: inline-run
spec:
  pipelineSpec:
    tasks:
      - name: hello
        taskRef:
          name: echo
---
kind: PipelineRun
metadata:
  name: dangling-run
spec:
  pipelineRef:
    name: gone
"#;

    fn manifests() -> Manifests {
        Manifests::from_yaml(MANIFESTS).unwrap()
    }

    #[test]
    fn test_pipeline_get_by_name() {
        let manifests = manifests();
        let source = PipelineFetcher::new(&manifests).get_by_name("release").unwrap();

        assert_eq!(source.name, "release");
        assert_eq!(source.tasks.len(), 2);

        let graph = source.into_graph();
        assert_eq!(graph.pipeline_name(), "release");
        assert!(graph.node("build").unwrap().is_root);
    }

    #[test]
    fn test_pipeline_not_found() {
        let manifests = manifests();
        let err = PipelineFetcher::new(&manifests).get_by_name("nope").unwrap_err();

        assert_eq!(err.to_string(), "Pipeline 'nope' not found");
    }

    #[test]
    fn test_pipeline_get_all_empty() {
        let manifests = Manifests::default();
        let err = PipelineFetcher::new(&manifests).get_all().unwrap_err();

        assert_eq!(err.to_string(), "no Pipelines found");
    }

    #[test]
    fn test_run_uses_referenced_pipeline_under_run_name() {
        let manifests = manifests();
        let source = PipelineRunFetcher::new(&manifests)
            .get_by_name("release-run-7")
            .unwrap();

        assert_eq!(source.name, "release-run-7");
        assert_eq!(source.tasks, manifests.pipeline("release").unwrap().spec.tasks);
    }

    #[test]
    fn test_run_with_inline_spec() {
        let manifests = manifests();
        let source = PipelineRunFetcher::new(&manifests)
            .get_by_name("inline-run")
            .unwrap();

        assert_eq!(source.tasks.len(), 1);
        assert_eq!(source.tasks[0].task_ref_name(), Some("echo"));
    }

    #[test]
    fn test_run_with_unknown_pipeline() {
        let manifests = manifests();
        let fetcher = PipelineRunFetcher::new(&manifests);

        let err = fetcher.get_by_name("dangling-run").unwrap_err();
        assert!(matches!(err, GraphError::PipelineNotFound { ref name } if name == "gone"));

        // get_all stops at the first run it cannot resolve
        assert!(fetcher.get_all().is_err());
    }

    #[test]
    fn test_run_get_all() {
        let yaml = MANIFESTS
            .split("---")
            .take(3)
            .collect::<Vec<_>>()
            .join("---");
        let manifests = Manifests::from_yaml(&yaml).unwrap();
        let sources = PipelineRunFetcher::new(&manifests).get_all().unwrap();

        let names: Vec<_> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["release-run-7", "inline-run"]);
    }

    #[test]
    fn test_run_without_pipeline() {
        let manifests =
            Manifests::from_yaml("kind: PipelineRun\nmetadata:\n  name: empty\n").unwrap();
        let err = PipelineRunFetcher::new(&manifests)
            .get_by_name("empty")
            .unwrap_err();

        assert!(matches!(err, GraphError::MissingPipelineRef { .. }));
    }
}
