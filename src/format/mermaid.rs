// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Mermaid flowchart codec

use std::fmt::Write;

use super::Codec;
use crate::pipeline::{TaskEdge, TaskGraph, TaskNode};

const START: &str = "start([fa:fa-circle])";
const STOP: &str = "stop([fa:fa-circle])";

/// Renders a top-down flowchart with the pipeline name in the front matter
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidCodec;

impl MermaidCodec {
    /// Node reference; annotated nodes carry a two-line label
    fn node(node: &TaskNode, with_task_ref: bool) -> String {
        match (&node.task_ref_name, with_task_ref) {
            (Some(_), true) => format!(
                "{}(\"{}\")",
                node.name,
                node.label(true, "\n   ").replace('"', "#quot;")
            ),
            _ => node.name.clone(),
        }
    }
}

impl Codec for MermaidCodec {
    fn render(&self, graph: &TaskGraph, with_task_ref: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "---\ntitle: {}\n---", graph.pipeline_name());
        out.push_str("flowchart TD\n");

        for edge in graph.edges() {
            let (from, to) = match edge {
                TaskEdge::Start(node) => (START.to_string(), Self::node(node, with_task_ref)),
                TaskEdge::Link(node, dep) => (
                    Self::node(node, with_task_ref),
                    Self::node(dep, with_task_ref),
                ),
                TaskEdge::End(node) => (Self::node(node, with_task_ref), STOP.to_string()),
            };
            let _ = writeln!(out, "   {} --> {}", from, to);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineTask;

    fn test_graph() -> TaskGraph {
        TaskGraph::build(&[
            PipelineTask::new("task1")
                .with_task_ref("taskRef1")
                .with_run_after(["task2", "task3"]),
            PipelineTask::new("task2")
                .with_task_ref("taskRef2")
                .with_run_after(["task3"]),
            PipelineTask::new("task3").with_task_ref("taskRef3"),
            PipelineTask::new("task-with-dash").with_task_ref("taskRef4"),
        ])
        .named("test-pipeline")
    }

    #[test]
    fn test_mermaid_output() {
        let mermaid = MermaidCodec.render(&test_graph(), false);

        insta::assert_snapshot!(mermaid, @r"
---
title: test-pipeline
---
flowchart TD
   task1 --> stop([fa:fa-circle])
   task2 --> task1
   start([fa:fa-circle]) --> task3
   task3 --> task1
   task3 --> task2
   start([fa:fa-circle]) --> task-with-dash
   task-with-dash --> stop([fa:fa-circle])
");
    }

    #[test]
    fn test_mermaid_with_task_ref() {
        let mermaid = MermaidCodec.render(&test_graph(), true);

        assert!(mermaid.starts_with("---\ntitle: test-pipeline\n---\nflowchart TD\n"));
        assert!(mermaid.contains(
            "   task2(\"task2\n   (taskRef2)\") --> task1(\"task1\n   (taskRef1)\")\n"
        ));
        assert!(mermaid.contains(
            "   task3(\"task3\n   (taskRef3)\") --> task1(\"task1\n   (taskRef1)\")\n"
        ));
        assert!(mermaid.contains(
            "   task3(\"task3\n   (taskRef3)\") --> task2(\"task2\n   (taskRef2)\")\n"
        ));
        assert!(mermaid.contains("   task1(\"task1\n   (taskRef1)\") --> stop([fa:fa-circle])\n"));
        assert!(mermaid.contains(
            "   task-with-dash(\"task-with-dash\n   (taskRef4)\") --> stop([fa:fa-circle])\n"
        ));
        assert!(mermaid.contains("   start([fa:fa-circle]) --> task3(\"task3\n   (taskRef3)\")\n"));
        assert!(mermaid.contains(
            "   start([fa:fa-circle]) --> task-with-dash(\"task-with-dash\n   (taskRef4)\")\n"
        ));
    }

    #[test]
    fn test_mermaid_empty_graph() {
        let mermaid = MermaidCodec.render(&TaskGraph::build(&[]), true);

        assert_eq!(mermaid, "---\ntitle: \n---\nflowchart TD\n");
    }

    #[test]
    fn test_mermaid_escapes_quotes_in_labels() {
        let graph = TaskGraph::build(&[PipelineTask::new("odd").with_task_ref("say\"hi")]);
        let mermaid = MermaidCodec.render(&graph, true);

        assert!(mermaid.contains("odd(\"odd\n   (say#quot;hi)\")"));
    }
}
