//! Core data types for the project-scheduling engine.

/// Task identifier. Ids form a contiguous `1..=N` range assigned at
/// graph-construction time and are never reassigned.
pub type TaskId = u32;

/// A task as described by the loader, before graph construction.
#[derive(Clone, Debug)]
pub struct TaskDescriptor {
    pub id: TaskId,
    pub name: String,
    /// Time units needed to complete the task once started.
    pub duration: u64,
    /// Concurrent staff consumed while the task is running.
    pub staff: u32,
    /// Ids of tasks that must finish before this one can start.
    pub dependency_ids: Vec<TaskId>,
}

impl TaskDescriptor {
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        duration: u64,
        staff: u32,
        dependency_ids: Vec<TaskId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
            staff,
            dependency_ids,
        }
    }
}

/// An immutable task node owned by a [`TaskGraph`](crate::graph::TaskGraph).
///
/// Pass-computed results (earliest start, latest start, slack) are not
/// stored here; each pass keeps its own result mapping so the task
/// description stays immutable for the lifetime of a run.
#[derive(Clone, Debug)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub duration: u64,
    pub staff: u32,
}
