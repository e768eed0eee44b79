//! Backward pass: latest start times, slack, and the critical path.
//!
//! Processes tasks in reverse topological order so every dependent's
//! latest start is known before its predecessors are visited.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::forward_pass::{ForwardPassResult, PassError};
use crate::graph::TaskGraph;
use crate::models::TaskId;
use crate::{log_passes, log_tasks};

/// Result of the backward pass over an acyclic graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackwardPassResult {
    /// Latest start time of each task that does not delay completion.
    pub latest_start: FxHashMap<TaskId, u64>,
    /// Slack of each task: `latest_start - earliest_start`.
    pub slack: FxHashMap<TaskId, u64>,
    /// All zero-slack tasks. In general a DAG of critical tasks, not
    /// necessarily a single linear chain.
    pub critical_path: FxHashSet<TaskId>,
}

/// Compute latest start times, slack, and the critical path from the
/// forward pass output.
///
/// A task with no dependents must finish by the completion time; any
/// other task must finish no later than the earliest of its dependents'
/// latest starts. Slack can never go negative on a correctly computed
/// schedule; underflow here means an upstream pass is defective and is
/// reported as [`PassError::InvariantViolation`].
pub fn compute_critical_path(
    graph: &TaskGraph,
    forward: &ForwardPassResult,
    verbosity: u8,
) -> Result<BackwardPassResult, PassError> {
    let n = graph.len();
    let mut latest = vec![0u64; n];

    let earliest_of = |v: TaskId| -> Result<u64, PassError> {
        forward.earliest_start.get(&v).copied().ok_or_else(|| {
            PassError::InvariantViolation(format!(
                "task {v} missing from the forward pass earliest-start map"
            ))
        })
    };

    for &v in forward.order.iter().rev() {
        let duration = graph.task(v).duration;
        // A task with no dependents is bounded by project completion.
        let mut latest_start = forward.completion_time.checked_sub(duration).ok_or_else(|| {
            PassError::InvariantViolation(format!(
                "task {v} is longer than the reported completion time"
            ))
        })?;

        for &u in graph.out_edges(v) {
            let candidate = latest[(u - 1) as usize].checked_sub(duration).ok_or_else(|| {
                PassError::InvariantViolation(format!(
                    "task {v} cannot finish before dependent {u} must start"
                ))
            })?;
            if candidate < latest_start {
                latest_start = candidate;
            }
        }

        log_tasks!(verbosity, "backward: task {v} latest start {latest_start}");
        latest[(v - 1) as usize] = latest_start;
    }

    let mut latest_start = FxHashMap::default();
    let mut slack = FxHashMap::default();
    let mut critical_path = FxHashSet::default();

    for v in graph.ids() {
        let ls = latest[(v - 1) as usize];
        let task_slack = ls.checked_sub(earliest_of(v)?).ok_or_else(|| {
            PassError::InvariantViolation(format!(
                "task {v} has negative slack; forward and backward passes disagree"
            ))
        })?;

        latest_start.insert(v, ls);
        slack.insert(v, task_slack);
        if task_slack == 0 {
            critical_path.insert(v);
        }
    }

    log_passes!(
        verbosity,
        "backward: {} of {} tasks on the critical path",
        critical_path.len(),
        n
    );

    Ok(BackwardPassResult {
        latest_start,
        slack,
        critical_path,
    })
}
