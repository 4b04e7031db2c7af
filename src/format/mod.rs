// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Output formats
//!
//! A codec turns a [`TaskGraph`] into the source text of one diagram
//! language. [`CodecRegistry`] maps format identifiers to codecs and is the
//! only place where identifiers are validated.

mod dot;
mod mermaid;
mod plantuml;

pub use dot::DotCodec;
pub use mermaid::MermaidCodec;
pub use plantuml::PlantUmlCodec;

use std::collections::HashMap;

use crate::errors::FormatError;
use crate::pipeline::TaskGraph;

/// Trait for diagram codecs
pub trait Codec: Send + Sync {
    /// Render the graph, labelling nodes with their task ref when asked
    fn render(&self, graph: &TaskGraph, with_task_ref: bool) -> String;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Graphviz digraph
    Dot,
    /// PlantUML state diagram
    Puml,
    /// Mermaid flowchart
    Mmd,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [Self::Dot, Self::Puml, Self::Mmd];

    /// Identifier, also used as file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Puml => "puml",
            Self::Mmd => "mmd",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(OutputFormat::as_str).collect()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" => Ok(Self::Dot),
            "puml" => Ok(Self::Puml),
            "mmd" => Ok(Self::Mmd),
            _ => Err(FormatError::new(s)),
        }
    }
}

/// Lookup table from format to codec
pub struct CodecRegistry {
    codecs: HashMap<OutputFormat, Box<dyn Codec>>,
}

impl CodecRegistry {
    /// A registry with no codecs
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Register the codec for a format, replacing any previous one
    pub fn with_codec(mut self, format: OutputFormat, codec: Box<dyn Codec>) -> Self {
        self.codecs.insert(format, codec);
        self
    }

    /// Render `graph` in the format named by `format_name` (case-insensitive)
    pub fn render(
        &self,
        graph: &TaskGraph,
        format_name: &str,
        with_task_ref: bool,
    ) -> Result<String, FormatError> {
        let format: OutputFormat = format_name.parse()?;
        let codec = self
            .codecs
            .get(&format)
            .ok_or_else(|| FormatError::new(format_name))?;

        Ok(codec.render(graph, with_task_ref))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::empty()
            .with_codec(OutputFormat::Dot, Box::new(DotCodec))
            .with_codec(OutputFormat::Puml, Box::new(PlantUmlCodec))
            .with_codec(OutputFormat::Mmd, Box::new(MermaidCodec))
    }
}

/// Render with the built-in codecs
pub fn render(
    graph: &TaskGraph,
    format_name: &str,
    with_task_ref: bool,
) -> Result<String, FormatError> {
    CodecRegistry::default().render(graph, format_name, with_task_ref)
}
