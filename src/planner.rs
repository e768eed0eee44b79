//! Planning pipeline: graph construction, cycle gate, forward and
//! backward passes, timeline projection.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::backward_pass::compute_critical_path;
use crate::config::PlanConfig;
use crate::cycles::detect_cycles;
use crate::forward_pass::{compute_schedule, PassError};
use crate::graph::{GraphError, TaskGraph};
use crate::log_passes;
use crate::models::{TaskDescriptor, TaskId};
use crate::projector::{project_timeline, TimeSlot};

/// Errors raised by the planning pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A task or dependency id is out of range; surfaced before any
    /// pass runs.
    #[error(transparent)]
    MalformedInput(#[from] GraphError),
    /// A pass observed a broken precondition; an internal defect, never
    /// silently tolerated.
    #[error(transparent)]
    Pass(#[from] PassError),
}

/// Complete schedule for an acyclic project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectSchedule {
    /// Tasks in topological order.
    pub order: Vec<TaskId>,
    pub earliest_start: FxHashMap<TaskId, u64>,
    pub latest_start: FxHashMap<TaskId, u64>,
    pub slack: FxHashMap<TaskId, u64>,
    /// Fastest possible completion time of the project.
    pub completion_time: u64,
    /// All zero-slack tasks.
    pub critical_path: FxHashSet<TaskId>,
    /// Chronological start/finish events with staffing levels.
    pub timeline: Vec<TimeSlot>,
}

/// Outcome of planning a project.
///
/// Cyclic dependencies are a domain result, not an error: the cycle set
/// is reported and the scheduling passes never run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectPlan {
    /// The project is not realizable; each inner sequence is a closed
    /// walk with the first id repeated at the end.
    Cyclic { cycles: Vec<Vec<TaskId>> },
    /// The project is schedulable.
    Schedule(ProjectSchedule),
}

impl ProjectPlan {
    pub fn has_cycle(&self) -> bool {
        matches!(self, ProjectPlan::Cyclic { .. })
    }
}

/// Run the full planning pipeline over loader descriptors.
///
/// Passes run in strict sequence on a graph built fresh for this call:
/// cycle detection gates the forward pass, whose output feeds the
/// backward pass and the timeline projection. The pipeline is a
/// deterministic pure function of its input.
pub fn plan_project(
    descriptors: Vec<TaskDescriptor>,
    config: &PlanConfig,
) -> Result<ProjectPlan, PlanError> {
    let graph = TaskGraph::from_descriptors(descriptors)?;
    plan_graph(&graph, config)
}

/// Run the pipeline over an already-constructed graph.
pub fn plan_graph(graph: &TaskGraph, config: &PlanConfig) -> Result<ProjectPlan, PlanError> {
    let verbosity = config.verbosity;

    let report = detect_cycles(graph, verbosity);
    if report.has_cycle {
        log_passes!(
            verbosity,
            "planner: {} cycle(s) found, project is not schedulable",
            report.cycles.len()
        );
        return Ok(ProjectPlan::Cyclic {
            cycles: report.cycles,
        });
    }
    log_passes!(verbosity, "planner: graph is acyclic, scheduling {} tasks", graph.len());

    let forward = compute_schedule(graph, verbosity)?;
    let backward = compute_critical_path(graph, &forward, verbosity)?;
    let timeline = project_timeline(graph, &forward)?;

    Ok(ProjectPlan::Schedule(ProjectSchedule {
        order: forward.order,
        earliest_start: forward.earliest_start,
        latest_start: backward.latest_start,
        slack: backward.slack,
        completion_time: forward.completion_time,
        critical_path: backward.critical_path,
        timeline,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_descriptor(
        id: TaskId,
        duration: u64,
        staff: u32,
        deps: Vec<TaskId>,
    ) -> TaskDescriptor {
        TaskDescriptor::new(id, format!("task-{id}"), duration, staff, deps)
    }

    fn schedule(plan: ProjectPlan) -> ProjectSchedule {
        match plan {
            ProjectPlan::Schedule(s) => s,
            ProjectPlan::Cyclic { cycles } => panic!("unexpected cycles: {cycles:?}"),
        }
    }

    #[test]
    fn test_fan_out_scenario_end_to_end() {
        // A(3, no deps), B(2, dep A), C(4, dep A)
        let plan = plan_project(
            vec![
                make_descriptor(1, 3, 1, vec![]),
                make_descriptor(2, 2, 1, vec![1]),
                make_descriptor(3, 4, 1, vec![1]),
            ],
            &PlanConfig::default(),
        )
        .unwrap();

        let s = schedule(plan);
        assert_eq!(s.order[0], 1);
        assert_eq!(s.earliest_start[&1], 0);
        assert_eq!(s.earliest_start[&2], 3);
        assert_eq!(s.earliest_start[&3], 3);
        assert_eq!(s.completion_time, 7);
        assert_eq!(s.critical_path, FxHashSet::from_iter([1, 3]));
        assert_eq!(s.slack[&2], 2);
    }

    #[test]
    fn test_mutual_dependency_reports_cycle() {
        // A dep B, B dep A
        let plan = plan_project(
            vec![
                make_descriptor(1, 3, 1, vec![2]),
                make_descriptor(2, 2, 1, vec![1]),
            ],
            &PlanConfig::default(),
        )
        .unwrap();

        match plan {
            ProjectPlan::Cyclic { cycles } => {
                assert_eq!(cycles.len(), 1);
                assert!(cycles[0].contains(&1));
                assert!(cycles[0].contains(&2));
            }
            ProjectPlan::Schedule(_) => panic!("expected a cycle report"),
        }
    }

    #[test]
    fn test_self_loop_reports_single_node_cycle() {
        let plan = plan_project(
            vec![
                make_descriptor(1, 3, 1, vec![]),
                make_descriptor(2, 2, 1, vec![2]),
            ],
            &PlanConfig::default(),
        )
        .unwrap();

        match plan {
            ProjectPlan::Cyclic { cycles } => {
                assert_eq!(cycles, vec![vec![2, 2]]);
            }
            ProjectPlan::Schedule(_) => panic!("expected a cycle report"),
        }
    }

    #[test]
    fn test_malformed_input_fails_before_any_pass() {
        let result = plan_project(
            vec![make_descriptor(1, 3, 1, vec![9])],
            &PlanConfig::default(),
        );

        assert!(matches!(result, Err(PlanError::MalformedInput(_))));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let descriptors = || {
            vec![
                make_descriptor(1, 2, 2, vec![]),
                make_descriptor(2, 3, 1, vec![1]),
                make_descriptor(3, 5, 4, vec![1]),
                make_descriptor(4, 1, 2, vec![2, 3]),
                make_descriptor(5, 6, 1, vec![]),
            ]
        };

        let first = plan_project(descriptors(), &PlanConfig::default()).unwrap();
        let second = plan_project(descriptors(), &PlanConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_schedule_invariants_hold() {
        let plan = plan_project(
            vec![
                make_descriptor(1, 2, 2, vec![]),
                make_descriptor(2, 3, 1, vec![1]),
                make_descriptor(3, 5, 4, vec![1]),
                make_descriptor(4, 1, 2, vec![2, 3]),
            ],
            &PlanConfig::default(),
        )
        .unwrap();
        let s = schedule(plan);

        let durations = [2u64, 3, 5, 1];
        let max_finish = s
            .order
            .iter()
            .map(|&v| s.earliest_start[&v] + durations[(v - 1) as usize])
            .max()
            .unwrap();
        assert_eq!(s.completion_time, max_finish);

        for &v in &s.order {
            assert!(s.latest_start[&v] >= s.earliest_start[&v]);
            assert_eq!(s.slack[&v], s.latest_start[&v] - s.earliest_start[&v]);
        }
        assert!(!s.critical_path.is_empty());
    }

    #[test]
    fn test_single_task_project() {
        let plan = plan_project(
            vec![make_descriptor(1, 8, 3, vec![])],
            &PlanConfig::default(),
        )
        .unwrap();
        let s = schedule(plan);

        assert_eq!(s.completion_time, 8);
        assert_eq!(s.critical_path, FxHashSet::from_iter([1]));
        assert_eq!(s.timeline.len(), 2);
        assert_eq!(s.timeline[0].staff, 3);
    }
}
