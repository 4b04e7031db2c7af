// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Task dependency graph
//!
//! Turns the flat task list of a pipeline into a graph whose edges point
//! from a task to the tasks that run after it. Nodes live in a petgraph
//! arena and are looked up by task name.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use tracing::debug;

use crate::pipeline::PipelineTask;

/// A task in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNode {
    /// Task name
    pub name: String,

    /// Name of the referenced `Task`; `None` for placeholders and inline tasks
    pub task_ref_name: Option<String>,

    /// Nothing has to run before this task
    pub is_root: bool,
}

impl TaskNode {
    fn new(name: &str, task_ref_name: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            task_ref_name: task_ref_name.map(str::to_string),
            is_root: true,
        }
    }

    /// Visible label: the bare name, or name and task ref joined by `separator`
    /// and wrapped as `name{separator}(ref)` when annotating.
    pub fn label(&self, with_task_ref: bool, separator: &str) -> String {
        match (&self.task_ref_name, with_task_ref) {
            (Some(task_ref), true) => format!("{}{}({})", self.name, separator, task_ref),
            _ => self.name.clone(),
        }
    }
}

/// One edge of the rendered graph, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEdge<'a> {
    /// Synthetic start marker to a root task
    Start(&'a TaskNode),
    /// A task to one of the tasks that run after it
    Link(&'a TaskNode, &'a TaskNode),
    /// A leaf task to the synthetic end marker
    End(&'a TaskNode),
}

/// Dependency graph of a single pipeline
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    pipeline_name: String,
    graph: DiGraph<TaskNode, ()>,
    name_to_index: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    /// Build a graph from a pipeline's tasks.
    ///
    /// `b` running after `a` adds `b` to the dependencies of `a`. Names that
    /// appear only in a `runAfter` list get a placeholder node.
    pub fn build(tasks: &[PipelineTask]) -> Self {
        let mut builder = Self::default();

        // Every task first, so runAfter can point forward in the list
        for task in tasks {
            if !builder.name_to_index.contains_key(&task.name) {
                builder.insert(TaskNode::new(&task.name, task.task_ref_name()));
            }
        }

        for task in tasks {
            let dependent = builder.name_to_index[&task.name];

            for dep_name in &task.run_after {
                let dep_node = match builder.name_to_index.get(dep_name) {
                    Some(index) => *index,
                    None => {
                        debug!(
                            task = %task.name,
                            dependency = %dep_name,
                            "runAfter names an unknown task, adding placeholder"
                        );
                        builder.insert(TaskNode::new(dep_name, None))
                    }
                };

                builder.graph.add_edge(dep_node, dependent, ());
                builder.graph[dependent].is_root = false;
            }
        }

        debug!(
            tasks = tasks.len(),
            nodes = builder.graph.node_count(),
            edges = builder.graph.edge_count(),
            "built task graph"
        );

        builder
    }

    /// Attach the pipeline name used as title and output file name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.pipeline_name = name.into();
        self
    }

    fn insert(&mut self, node: TaskNode) -> NodeIndex {
        let name = node.name.clone();
        let index = self.graph.add_node(node);
        self.name_to_index.insert(name, index);
        index
    }

    pub fn pipeline_name(&self) -> &str {
        &self.pipeline_name
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up a node by task name
    pub fn node(&self, name: &str) -> Option<&TaskNode> {
        self.name_to_index.get(name).map(|index| &self.graph[*index])
    }

    /// All nodes, in the order tasks were declared
    pub fn nodes(&self) -> impl Iterator<Item = &TaskNode> {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// Tasks that run after `name`, in declaration order
    pub fn dependencies(&self, name: &str) -> Option<Vec<&TaskNode>> {
        let index = self.name_to_index.get(name)?;
        Some(self.neighbors(*index, Direction::Outgoing))
    }

    /// Tasks that `name` runs after
    pub fn dependents(&self, name: &str) -> Option<Vec<&TaskNode>> {
        let index = self.name_to_index.get(name)?;
        Some(self.neighbors(*index, Direction::Incoming))
    }

    // petgraph yields neighbors newest-first; edge ids keep insertion order.
    fn neighbors(&self, index: NodeIndex, direction: Direction) -> Vec<&TaskNode> {
        let mut edges: Vec<_> = self.graph.edges_directed(index, direction).collect();
        edges.sort_by_key(|edge| edge.id());
        edges
            .into_iter()
            .map(|edge| match direction {
                Direction::Outgoing => &self.graph[edge.target()],
                Direction::Incoming => &self.graph[edge.source()],
            })
            .collect()
    }

    /// Every edge to draw: for each node a start edge if it is a root, one
    /// link per dependency, and an end edge if it has none.
    pub fn edges(&self) -> Vec<TaskEdge<'_>> {
        let mut edges = Vec::with_capacity(self.graph.edge_count() + 2 * self.len());

        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            let deps = self.neighbors(index, Direction::Outgoing);

            if node.is_root {
                edges.push(TaskEdge::Start(node));
            }
            if deps.is_empty() {
                edges.push(TaskEdge::End(node));
            }
            for dep in deps {
                edges.push(TaskEdge::Link(node, dep));
            }
        }

        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_tasks() -> Vec<PipelineTask> {
        vec![
            PipelineTask::new("task1")
                .with_task_ref("taskRef1")
                .with_run_after(["task2", "task3"]),
            PipelineTask::new("task2")
                .with_task_ref("taskRef2")
                .with_run_after(["task3"]),
            PipelineTask::new("task3").with_task_ref("taskRef3"),
        ]
    }

    fn names<'a>(nodes: &[&'a TaskNode]) -> Vec<&'a str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_build_worked_example() {
        let graph = TaskGraph::build(&test_tasks());

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.node("task1").unwrap().task_ref_name.as_deref(), Some("taskRef1"));

        // task3 has two downstream tasks, task2 one, task1 none
        assert_eq!(names(&graph.dependencies("task3").unwrap()), vec!["task1", "task2"]);
        assert_eq!(names(&graph.dependencies("task2").unwrap()), vec!["task1"]);
        assert!(graph.dependencies("task1").unwrap().is_empty());

        assert!(graph.node("task3").unwrap().is_root);
        assert!(!graph.node("task2").unwrap().is_root);
        assert!(!graph.node("task1").unwrap().is_root);
    }

    #[test]
    fn test_build_empty() {
        let graph = TaskGraph::build(&[]);

        assert!(graph.is_empty());
        assert_eq!(graph.pipeline_name(), "");
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_forward_reference() {
        // task-a names task-b before task-b is declared
        let tasks = vec![
            PipelineTask::new("task-a").with_run_after(["task-b"]),
            PipelineTask::new("task-b").with_task_ref("ref-b"),
        ];
        let graph = TaskGraph::build(&tasks);

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.node("task-b").unwrap().task_ref_name.as_deref(), Some("ref-b"));
        assert_eq!(names(&graph.dependencies("task-b").unwrap()), vec!["task-a"]);
    }

    #[test]
    fn test_placeholder_for_unknown_dependency() {
        let tasks = vec![PipelineTask::new("deploy").with_run_after(["missing"])];
        let graph = TaskGraph::build(&tasks);

        assert_eq!(graph.len(), 2);
        let placeholder = graph.node("missing").unwrap();
        assert_eq!(placeholder.task_ref_name, None);
        assert!(placeholder.is_root);
        assert_eq!(names(&graph.dependencies("missing").unwrap()), vec!["deploy"]);
    }

    #[test]
    fn test_one_node_per_distinct_name() {
        let tasks = vec![
            PipelineTask::new("a").with_run_after(["x", "y"]),
            PipelineTask::new("b").with_run_after(["a", "x"]),
            PipelineTask::new("c"),
        ];
        let graph = TaskGraph::build(&tasks);

        let expected: HashSet<&str> = ["a", "b", "c", "x", "y"].into_iter().collect();
        let actual: HashSet<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(actual, expected);
        assert_eq!(graph.len(), expected.len());
    }

    #[test]
    fn test_root_iff_not_a_dependency_of_any_node() {
        let tasks = vec![
            PipelineTask::new("lint"),
            PipelineTask::new("unit").with_run_after(["lint"]),
            PipelineTask::new("build").with_run_after(["lint", "ghost"]),
            PipelineTask::new("publish").with_run_after(["unit", "build"]),
            PipelineTask::new("docs"),
        ];
        let graph = TaskGraph::build(&tasks);

        for node in graph.nodes() {
            let referenced = graph.nodes().any(|other| {
                graph
                    .dependencies(&other.name)
                    .unwrap()
                    .iter()
                    .any(|dep| dep.name == node.name)
            });
            assert_eq!(node.is_root, !referenced, "root flag of {}", node.name);
            assert_eq!(
                node.is_root,
                graph.dependents(&node.name).unwrap().is_empty(),
                "dependents of {}",
                node.name
            );
        }
    }

    #[test]
    fn test_dependents_mirror_dependencies() {
        let graph = TaskGraph::build(&test_tasks());

        assert_eq!(names(&graph.dependents("task1").unwrap()), vec!["task2", "task3"]);
        assert!(graph.dependents("task3").unwrap().is_empty());
        assert!(graph.dependents("nope").is_none());
    }

    #[test]
    fn test_self_reference_is_accepted() {
        let tasks = vec![PipelineTask::new("loop").with_run_after(["loop"])];
        let graph = TaskGraph::build(&tasks);

        let node = graph.node("loop").unwrap();
        assert!(!node.is_root);
        assert_eq!(names(&graph.dependencies("loop").unwrap()), vec!["loop"]);
    }

    #[test]
    fn test_edges_follow_traversal_contract() {
        let graph = TaskGraph::build(&test_tasks());
        let edges: Vec<(String, String)> = graph
            .edges()
            .into_iter()
            .map(|edge| match edge {
                TaskEdge::Start(n) => ("start".to_string(), n.name.clone()),
                TaskEdge::Link(a, b) => (a.name.clone(), b.name.clone()),
                TaskEdge::End(n) => (n.name.clone(), "end".to_string()),
            })
            .collect();

        let expected = [
            ("task1", "end"),
            ("task2", "task1"),
            ("start", "task3"),
            ("task3", "task1"),
            ("task3", "task2"),
        ];
        assert_eq!(
            edges,
            expected
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_label() {
        let graph = TaskGraph::build(&test_tasks());
        let node = graph.node("task1").unwrap();

        assert_eq!(node.label(false, " "), "task1");
        assert_eq!(node.label(true, " "), "task1 (taskRef1)");
        assert_eq!(node.label(true, "\n"), "task1\n(taskRef1)");

        let bare = TaskNode::new("placeholder", None);
        assert_eq!(bare.label(true, "\n"), "placeholder");
    }

    #[test]
    fn test_named() {
        let graph = TaskGraph::build(&test_tasks()).named("test-pipeline");
        assert_eq!(graph.pipeline_name(), "test-pipeline");
    }
}
