//! Task graph construction and adjacency storage.
//!
//! The graph exclusively owns its task nodes and edge lists for the
//! lifetime of one scheduling run. It is immutable once built; traversal
//! scratch state lives inside the individual passes, never on the graph.

use thiserror::Error;

use crate::models::{Task, TaskDescriptor, TaskId};

/// Errors raised during graph construction. All variants are
/// malformed-input conditions surfaced before any pass runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("task id {id} is outside the valid range 1..={task_count}")]
    TaskIdOutOfRange { id: TaskId, task_count: usize },
    #[error("duplicate task id {0}")]
    DuplicateTaskId(TaskId),
    #[error("task {task} references dependency {dependency}, outside the valid range 1..={task_count}")]
    DependencyOutOfRange {
        task: TaskId,
        dependency: TaskId,
        task_count: usize,
    },
}

/// Directed graph of tasks. An edge u -> v means v cannot start before
/// u finishes.
#[derive(Clone, Debug)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    /// Outgoing edges per task, indexed by `id - 1`, in input order.
    out_edges: Vec<Vec<TaskId>>,
    /// Incoming edge counts per task, tallied at construction.
    predecessor_counts: Vec<u32>,
}

impl TaskGraph {
    /// Build a graph from tasks and `(dependency, dependent)` edge pairs.
    ///
    /// Task ids must be exactly the range `1..=N`. Edge endpoints must
    /// reference ids in that range. No other validation is performed
    /// here; cycle legality is the cycle detector's job.
    pub fn new(tasks: Vec<Task>, edges: &[(TaskId, TaskId)]) -> Result<Self, GraphError> {
        let n = tasks.len();

        let mut ordered: Vec<Option<Task>> = (0..n).map(|_| None).collect();
        for task in tasks {
            if task.id == 0 || task.id as usize > n {
                return Err(GraphError::TaskIdOutOfRange {
                    id: task.id,
                    task_count: n,
                });
            }
            let idx = (task.id - 1) as usize;
            if ordered[idx].is_some() {
                return Err(GraphError::DuplicateTaskId(task.id));
            }
            ordered[idx] = Some(task);
        }
        // Every slot is filled: n tasks landed in n distinct slots.
        let tasks: Vec<Task> = ordered.into_iter().flatten().collect();

        let mut out_edges: Vec<Vec<TaskId>> = vec![Vec::new(); n];
        let mut predecessor_counts = vec![0u32; n];
        for &(dependency, dependent) in edges {
            if dependency == 0 || dependency as usize > n {
                return Err(GraphError::DependencyOutOfRange {
                    task: dependent,
                    dependency,
                    task_count: n,
                });
            }
            if dependent == 0 || dependent as usize > n {
                return Err(GraphError::TaskIdOutOfRange {
                    id: dependent,
                    task_count: n,
                });
            }
            out_edges[(dependency - 1) as usize].push(dependent);
            predecessor_counts[(dependent - 1) as usize] += 1;
        }

        Ok(Self {
            tasks,
            out_edges,
            predecessor_counts,
        })
    }

    /// Build a graph from loader descriptors, converting each
    /// descriptor's dependency list into `(dependency, dependent)` edges.
    pub fn from_descriptors(descriptors: Vec<TaskDescriptor>) -> Result<Self, GraphError> {
        let mut tasks = Vec::with_capacity(descriptors.len());
        let mut edges = Vec::new();
        for desc in descriptors {
            for &dep in &desc.dependency_ids {
                edges.push((dep, desc.id));
            }
            tasks.push(Task {
                id: desc.id,
                name: desc.name,
                duration: desc.duration,
                staff: desc.staff,
            });
        }
        Self::new(tasks, &edges)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in ascending id order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id. Panics if the id is out of range; graph
    /// construction guarantees ids `1..=N`.
    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[(id - 1) as usize]
    }

    /// Direct dependents of a task, in input order.
    pub fn out_edges(&self, id: TaskId) -> &[TaskId] {
        &self.out_edges[(id - 1) as usize]
    }

    /// Number of incoming edges of a task.
    pub fn predecessor_count(&self, id: TaskId) -> u32 {
        self.predecessor_counts[(id - 1) as usize]
    }

    /// Copy of all predecessor counts, indexed by `id - 1`. Passes that
    /// consume counts (Kahn's algorithm) take their own mutable copy.
    pub fn predecessor_counts(&self) -> Vec<u32> {
        self.predecessor_counts.clone()
    }

    /// All task ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        1..=self.tasks.len() as TaskId
    }
}
