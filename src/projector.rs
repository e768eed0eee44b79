//! Schedule projection: chronological start/finish events and staffing.
//!
//! Boundary component that turns computed earliest starts into data a
//! reporter can render. Text formatting itself stays outside the core.

use std::collections::BTreeMap;

use crate::forward_pass::{ForwardPassResult, PassError};
use crate::graph::TaskGraph;
use crate::models::TaskId;

/// One point on the project timeline at which at least one task starts
/// or finishes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: u64,
    /// Tasks starting at this time, ascending id order.
    pub started: Vec<TaskId>,
    /// Tasks finishing at this time, ascending id order.
    pub finished: Vec<TaskId>,
    /// Concurrent staff in use from this time until the next slot.
    pub staff: u32,
}

/// Project the forward pass output into a chronological event timeline.
///
/// Every task contributes a start event at its earliest start and a
/// finish event at start plus duration; a task occupies staff over
/// `[start, finish)`, so it no longer counts at its finish time. Slots
/// are emitted only for times carrying at least one event.
pub fn project_timeline(
    graph: &TaskGraph,
    forward: &ForwardPassResult,
) -> Result<Vec<TimeSlot>, PassError> {
    let mut slots: BTreeMap<u64, TimeSlot> = BTreeMap::new();

    for task in graph.tasks() {
        let start = forward.earliest_start.get(&task.id).copied().ok_or_else(|| {
            PassError::InvariantViolation(format!(
                "task {} missing from the forward pass earliest-start map",
                task.id
            ))
        })?;
        let finish = start + task.duration;

        slots.entry(start).or_default().started.push(task.id);
        slots.entry(finish).or_default().finished.push(task.id);
    }

    // Staff level changes only at event times: each slot picks up the
    // running level, plus its starters, minus its finishers.
    let mut running: u32 = 0;
    let mut timeline = Vec::with_capacity(slots.len());
    for (time, mut slot) in slots {
        slot.time = time;
        slot.started.sort_unstable();
        slot.finished.sort_unstable();

        // Starters before finishers: a zero-duration task starts and
        // finishes in the same slot and must not drive the level
        // negative.
        for &v in &slot.started {
            running += graph.task(v).staff;
        }
        for &v in &slot.finished {
            running -= graph.task(v).staff;
        }
        slot.staff = running;
        timeline.push(slot);
    }

    Ok(timeline)
}
