// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Manifest loading
//!
//! Reads `Pipeline` and `PipelineRun` documents from YAML files. A file may
//! hold several documents separated by `---`; documents of any other kind
//! are skipped.

mod fetcher;

pub use fetcher::{GraphFetcher, GraphSource, PipelineFetcher, PipelineRunFetcher};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{GraphError, GraphResult};
use crate::pipeline::{Pipeline, PipelineRun};

/// All pipelines and pipeline runs found in a set of files
#[derive(Debug, Clone, Default)]
pub struct Manifests {
    pub pipelines: Vec<Pipeline>,
    pub pipeline_runs: Vec<PipelineRun>,
}

impl Manifests {
    /// Load every manifest matched by `patterns`.
    ///
    /// Relative patterns are resolved against `base_dir`. A directory stands
    /// for the YAML files directly inside it.
    pub fn load(patterns: &[String], base_dir: &Path) -> GraphResult<Self> {
        let mut manifests = Self::default();

        for path in resolve_paths(patterns, base_dir)? {
            manifests.add_file(&path)?;
        }

        debug!(
            pipelines = manifests.pipelines.len(),
            pipeline_runs = manifests.pipeline_runs.len(),
            "loaded manifests"
        );

        Ok(manifests)
    }

    fn add_file(&mut self, path: &Path) -> GraphResult<()> {
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        self.add_yaml(&content).map_err(|e| GraphError::Yaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse one or more YAML documents and keep the pipeline kinds
    pub fn add_yaml(&mut self, yaml: &str) -> Result<(), serde_yaml::Error> {
        for document in serde_yaml::Deserializer::from_str(yaml) {
            let value = serde_yaml::Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }

            let kind = value
                .get("kind")
                .and_then(serde_yaml::Value::as_str)
                .map(str::to_owned);

            match kind.as_deref() {
                Some("Pipeline") => self.pipelines.push(serde_yaml::from_value(value)?),
                Some("PipelineRun") => self.pipeline_runs.push(serde_yaml::from_value(value)?),
                other => debug!(kind = ?other, "skipping document"),
            }
        }

        Ok(())
    }

    /// Parse manifests from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let mut manifests = Self::default();
        manifests.add_yaml(yaml)?;
        Ok(manifests)
    }

    pub fn pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.name() == name)
    }

    pub fn pipeline_run(&self, name: &str) -> Option<&PipelineRun> {
        self.pipeline_runs.iter().find(|r| r.name() == name)
    }
}

/// Expand file names, directories and glob patterns into files
fn resolve_paths(patterns: &[String], base_dir: &Path) -> GraphResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let full_path = if Path::new(pattern).is_absolute() {
            PathBuf::from(pattern)
        } else {
            base_dir.join(pattern)
        };

        if full_path.is_dir() {
            files.extend(yaml_files_in(&full_path)?);
            continue;
        }

        if !is_glob(pattern) {
            if !full_path.exists() {
                return Err(GraphError::ManifestNotFound { path: full_path });
            }
            files.push(full_path);
            continue;
        }

        // Only the user's part of the path is a pattern
        let glob_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            Path::new(&glob::Pattern::escape(&base_dir.to_string_lossy()))
                .join(pattern)
                .to_string_lossy()
                .into_owned()
        };

        let mut matches: Vec<_> = glob::glob(&glob_pattern)?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();

        if matches.is_empty() {
            return Err(GraphError::NoInputFiles {
                pattern: pattern.to_string(),
            });
        }

        matches.sort();
        files.extend(matches);
    }

    Ok(files)
}

fn yaml_files_in(dir: &Path) -> GraphResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| GraphError::FileReadError {
        path: dir.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("yaml") | Some("yml")
                )
        })
        .collect();

    files.sort();
    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
