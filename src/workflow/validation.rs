// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of a step list before it is compiled.
//!
//! Checks run in a fixed order, and each one assumes the previous passed:
//!
//! 1. **Uniqueness**: every step name appears once
//! 2. **References**: every dependency names a step in the same list
//! 3. **Acyclicity**: DFS with a recursion stack, reporting the cycle path
//!
//! Cycle detection needs a graph whose edges all resolve, so it only runs
//! once the reference check has passed.

use std::collections::{HashMap, HashSet};

use crate::errors::GraphError;
use crate::observability::messages::validation::{
    CyclicDependencyDetected, DanglingDependency, DuplicateStepName,
};
use crate::observability::messages::StructuredLog;
use crate::workflow::Step;

/// Validate a step list, returning the first defect found.
pub fn validate_step_graph(steps: &[Step]) -> Result<(), GraphError> {
    validate_unique_names(steps)?;
    validate_dependency_references(steps)?;
    validate_acyclic(steps)
}

fn validate_unique_names(steps: &[Step]) -> Result<(), GraphError> {
    let mut seen = HashSet::new();
    for step in steps {
        if !seen.insert(step.name.as_str()) {
            DuplicateStepName { name: &step.name }.log();
            return Err(GraphError::DuplicateStepName {
                name: step.name.clone(),
            });
        }
    }
    Ok(())
}

fn validate_dependency_references(steps: &[Step]) -> Result<(), GraphError> {
    let names: HashSet<&str> = steps.iter().map(|s| s.name.as_str()).collect();
    for step in steps {
        for dependency in &step.dependencies {
            if !names.contains(dependency.as_str()) {
                DanglingDependency {
                    step: &step.name,
                    dependency,
                }
                .log();
                return Err(GraphError::DanglingDependency {
                    step: step.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Walks edges dependency -> dependent. Roots are visited in step order so
/// the reported cycle is stable.
fn validate_acyclic(steps: &[Step]) -> Result<(), GraphError> {
    let mut graph: HashMap<&str, Vec<&str>> = steps
        .iter()
        .map(|s| (s.name.as_str(), Vec::new()))
        .collect();
    for step in steps {
        for dependency in &step.dependencies {
            if let Some(dependents) = graph.get_mut(dependency.as_str()) {
                dependents.push(step.name.as_str());
            }
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for step in steps {
        if visited.contains(step.name.as_str()) {
            continue;
        }
        if let Some(cycle) =
            dfs_cycle_detection(&step.name, &graph, &mut visited, &mut rec_stack, &mut path)
        {
            let cycle_refs: Vec<&str> = cycle.iter().map(String::as_str).collect();
            CyclicDependencyDetected { cycle: &cycle_refs }.log();
            return Err(GraphError::CyclicDependency { cycle });
        }
    }

    Ok(())
}

/// Three-colour DFS. A neighbour still on the recursion stack closes a cycle;
/// the path from that neighbour to the current node, plus the back edge, is
/// the cycle.
fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path)
                {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let cycle_start = path.iter().position(|&n| n == neighbor).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[cycle_start..].iter().map(|n| n.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}
