// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipegraph contributors

//! Pipeline definitions and the task graph built from them

mod dag;
mod definition;

pub use dag::{TaskEdge, TaskGraph, TaskNode};
pub use definition::*;
