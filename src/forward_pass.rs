//! Forward pass: topological ordering with earliest-start relaxation.
//!
//! Kahn's algorithm over the task graph. Precondition: the graph is
//! acyclic, enforced by the caller running cycle detection first.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use thiserror::Error;

use crate::graph::TaskGraph;
use crate::models::TaskId;
use crate::{log_debug, log_passes, log_tasks};

/// Errors raised when a pass observes a broken precondition. These are
/// programming-contract failures, not user-facing input errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassError {
    #[error("scheduling invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result of the forward pass over an acyclic graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardPassResult {
    /// Tasks in topological order (predecessors before dependents).
    pub order: Vec<TaskId>,
    /// Earliest possible start time of each task.
    pub earliest_start: FxHashMap<TaskId, u64>,
    /// Fastest possible completion time of the whole project.
    pub completion_time: u64,
}

/// Compute a topological order and each task's earliest start time.
///
/// The worklist is FIFO and seeded in ascending id order, so the output
/// order is deterministic; worklist discipline affects only the order
/// among simultaneously-ready tasks, never the computed start times.
///
/// Returns [`PassError::InvariantViolation`] if fewer than N tasks drain
/// from the worklist, which means the cycle gate was skipped on a
/// cyclic graph.
pub fn compute_schedule(graph: &TaskGraph, verbosity: u8) -> Result<ForwardPassResult, PassError> {
    let n = graph.len();
    let mut remaining = graph.predecessor_counts();
    let mut earliest = vec![0u64; n];
    let mut order = Vec::with_capacity(n);

    let mut worklist: VecDeque<TaskId> = graph
        .ids()
        .filter(|&v| remaining[(v - 1) as usize] == 0)
        .collect();
    log_debug!(verbosity, "forward: seeded worklist {worklist:?}");

    while let Some(v) = worklist.pop_front() {
        order.push(v);
        let finish = earliest[(v - 1) as usize] + graph.task(v).duration;

        for &u in graph.out_edges(v) {
            let idx = (u - 1) as usize;
            remaining[idx] -= 1;
            if finish > earliest[idx] {
                log_tasks!(verbosity, "forward: task {u} earliest start -> {finish}");
                earliest[idx] = finish;
            }
            if remaining[idx] == 0 {
                worklist.push_back(u);
            }
        }
    }

    if order.len() != n {
        return Err(PassError::InvariantViolation(format!(
            "topological order covers {} of {} tasks; graph was not checked for cycles",
            order.len(),
            n
        )));
    }

    let completion_time = graph
        .ids()
        .map(|v| earliest[(v - 1) as usize] + graph.task(v).duration)
        .max()
        .unwrap_or(0);
    log_passes!(verbosity, "forward: completion time {completion_time}");

    let earliest_start = graph
        .ids()
        .map(|v| (v, earliest[(v - 1) as usize]))
        .collect();

    Ok(ForwardPassResult {
        order,
        earliest_start,
        completion_time,
    })
}
