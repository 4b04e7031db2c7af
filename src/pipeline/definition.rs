// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Pipeline manifest structures
//!
//! The subset of the Tekton `Pipeline` and `PipelineRun` schema that matters
//! for drawing task dependencies. Unknown fields are ignored.

use serde::Deserialize;

/// A task entry inside a pipeline spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTask {
    /// Task name (unique within the pipeline)
    pub name: String,

    /// Referenced `Task` resource; absent for inline task specs
    #[serde(default)]
    pub task_ref: Option<TaskRef>,

    /// Names of tasks that must complete before this one starts
    #[serde(default)]
    pub run_after: Vec<String>,
}

impl PipelineTask {
    /// Create a task with no reference and no ordering constraints
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the referenced task name
    pub fn with_task_ref(mut self, task_ref: impl Into<String>) -> Self {
        self.task_ref = Some(TaskRef {
            name: task_ref.into(),
        });
        self
    }

    /// Set the tasks this one runs after
    pub fn with_run_after<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run_after = names.into_iter().map(Into::into).collect();
        self
    }

    /// Name of the referenced task, if any
    pub fn task_ref_name(&self) -> Option<&str> {
        self.task_ref.as_ref().map(|r| r.name.as_str())
    }
}

/// Reference to a `Task` resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskRef {
    #[serde(default)]
    pub name: String,
}

/// Resource metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
}

/// Body of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PipelineSpec {
    #[serde(default)]
    pub tasks: Vec<PipelineTask>,
}

/// `kind: Pipeline`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pipeline {
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: PipelineSpec,
}

impl Pipeline {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Reference from a run to the pipeline it executes
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PipelineRef {
    pub name: String,
}

/// Body of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunSpec {
    #[serde(default)]
    pub pipeline_ref: Option<PipelineRef>,

    /// Inline pipeline, used instead of `pipelineRef`
    #[serde(default)]
    pub pipeline_spec: Option<PipelineSpec>,
}

/// `kind: PipelineRun`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineRun {
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: PipelineRunSpec,
}

impl PipelineRun {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
