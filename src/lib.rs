//! Critical path method scheduling core.
//!
//! Given tasks with durations, staffing needs, and dependency edges,
//! this crate detects cyclic dependencies (enumerating every offending
//! cycle) or, for acyclic projects, computes a topological execution
//! order, earliest and latest start times, per-task slack, the overall
//! completion time, and the critical path. A boundary projector turns
//! the result into a chronological event timeline with staffing levels.
//!
//! The pipeline runs in strict sequence on a graph built fresh per
//! invocation: cycle detection gates the forward pass, whose output
//! feeds the backward pass and the projector. Everything is
//! single-threaded and deterministic; parallel use across projects
//! requires separate [`TaskGraph`] instances.

pub mod backward_pass;
mod config;
pub mod cycles;
pub mod forward_pass;
pub mod graph;
pub mod logging;
mod models;
pub mod planner;
pub mod projector;

pub use backward_pass::{compute_critical_path, BackwardPassResult};
pub use config::PlanConfig;
pub use cycles::{detect_cycles, CycleReport};
pub use forward_pass::{compute_schedule, ForwardPassResult, PassError};
pub use graph::{GraphError, TaskGraph};
pub use models::{Task, TaskDescriptor, TaskId};
pub use planner::{plan_graph, plan_project, PlanError, ProjectPlan, ProjectSchedule};
pub use projector::{project_timeline, TimeSlot};
