// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Graphviz DOT codec

use std::fmt::Write;

use super::Codec;
use crate::pipeline::{TaskEdge, TaskGraph, TaskNode};

const START: &str = "start";
const END: &str = "end";

/// Renders a `digraph` titled with the pipeline name
#[derive(Debug, Clone, Copy, Default)]
pub struct DotCodec;

impl DotCodec {
    fn node(node: &TaskNode, with_task_ref: bool) -> String {
        quote(&node.label(with_task_ref, "\n"))
    }
}

impl Codec for DotCodec {
    fn render(&self, graph: &TaskGraph, with_task_ref: bool) -> String {
        let mut out = String::from("digraph {\n");
        out.push_str("  labelloc=\"t\"\n");
        let _ = writeln!(out, "  label={}", quote(graph.pipeline_name()));
        let _ = writeln!(out, "  {} [shape=\"point\" width=0.2]", END);
        let _ = writeln!(out, "  {} [shape=\"point\" width=0.2]", START);

        for edge in graph.edges() {
            let (from, to) = match edge {
                TaskEdge::Start(node) => (quote(START), Self::node(node, with_task_ref)),
                TaskEdge::Link(node, dep) => (
                    Self::node(node, with_task_ref),
                    Self::node(dep, with_task_ref),
                ),
                TaskEdge::End(node) => (Self::node(node, with_task_ref), quote(END)),
            };
            let _ = writeln!(out, "  {} -> {}", from, to);
        }

        out.push_str("}\n");
        out
    }
}

/// Double-quote a DOT identifier
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
