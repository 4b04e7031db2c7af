// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! PlantUML state diagram codec
//!
//! State identifiers cannot contain hyphens, so `build-image` is drawn as
//! `build_image`. With task refs enabled each state gets a description line
//! that keeps the original name.

use std::collections::HashSet;
use std::fmt::Write;

use super::Codec;
use crate::pipeline::{TaskEdge, TaskGraph, TaskNode};

/// Built-in initial/final pseudo state
const TERMINAL: &str = "[*]";

/// Renders a state diagram titled with the pipeline name
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlCodec;

impl Codec for PlantUmlCodec {
    fn render(&self, graph: &TaskGraph, with_task_ref: bool) -> String {
        let mut out = String::from("@startuml\nhide empty description\n");
        let _ = writeln!(out, "title {}", graph.pipeline_name());
        out.push('\n');

        for edge in graph.edges() {
            match edge {
                TaskEdge::Start(node) => {
                    let _ = writeln!(out, "{} --> {}", TERMINAL, identifier(&node.name));
                }
                TaskEdge::Link(node, dep) => {
                    let _ = writeln!(
                        out,
                        "{} -down-> {}",
                        identifier(&node.name),
                        identifier(&dep.name)
                    );
                }
                TaskEdge::End(node) => {
                    let _ = writeln!(out, "{} --> {}", identifier(&node.name), TERMINAL);
                }
            }
        }

        if with_task_ref {
            out.push('\n');
            for (id, node) in descriptions(graph) {
                let _ = writeln!(out, "{} : {}", id, node.label(true, " "));
            }
        }

        out.push_str("\n@enduml\n");
        out
    }
}

/// One node per identifier; the first node to claim an identifier wins.
fn descriptions(graph: &TaskGraph) -> Vec<(String, &TaskNode)> {
    let mut seen = HashSet::new();
    graph
        .nodes()
        .filter_map(|node| {
            let id = identifier(&node.name);
            seen.insert(id.clone()).then_some((id, node))
        })
        .collect()
}

fn identifier(name: &str) -> String {
    name.replace('-', "_")
}
