//! Cycle detection over the task graph.
//!
//! Depth-first traversal with two-flag coloring: `visited` marks a
//! discovered node (on the active path or already finished), `closed`
//! marks a node that is fully processed and off the active path. A
//! back-edge to a visited-but-not-closed node closes a cycle.

use crate::graph::TaskGraph;
use crate::log_debug;
use crate::models::TaskId;

/// Outcome of the cycle detection pass.
///
/// Each reported cycle is a closed walk: the first id is repeated at
/// the end. Cycles are raw back-edge enumerations, not a minimal cycle
/// basis; a node targeted by several back-edges appears in several
/// reported cycles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub has_cycle: bool,
    pub cycles: Vec<Vec<TaskId>>,
}

struct CycleDetector<'a> {
    graph: &'a TaskGraph,
    visited: Vec<bool>,
    closed: Vec<bool>,
    /// Active DFS path, root to current node.
    stack: Vec<TaskId>,
    cycles: Vec<Vec<TaskId>>,
    verbosity: u8,
}

impl<'a> CycleDetector<'a> {
    fn new(graph: &'a TaskGraph, verbosity: u8) -> Self {
        let n = graph.len();
        Self {
            graph,
            visited: vec![false; n],
            closed: vec![false; n],
            stack: Vec::new(),
            cycles: Vec::new(),
            verbosity,
        }
    }

    fn visit(&mut self, v: TaskId) {
        self.visited[(v - 1) as usize] = true;
        self.stack.push(v);
        log_debug!(self.verbosity, "dfs: push {v}, path {:?}", self.stack);

        for &u in self.graph.out_edges(v) {
            if !self.visited[(u - 1) as usize] {
                self.visit(u);
            } else if !self.closed[(u - 1) as usize] {
                // Back-edge v -> u into the active path: copy the path
                // segment from u through v out of the live stack and
                // close the walk by repeating u.
                if let Some(pos) = self.stack.iter().position(|&t| t == u) {
                    let mut cycle = self.stack[pos..].to_vec();
                    cycle.push(u);
                    log_debug!(self.verbosity, "dfs: back-edge {v} -> {u}, cycle {cycle:?}");
                    self.cycles.push(cycle);
                }
            }
        }

        self.stack.pop();
        self.closed[(v - 1) as usize] = true;
    }

    fn run(mut self) -> CycleReport {
        // Scan all nodes in id order so disjoint components are covered
        // and reported cycles come out in a reproducible order.
        for v in self.graph.ids() {
            if !self.visited[(v - 1) as usize] {
                self.visit(v);
            }
        }
        CycleReport {
            has_cycle: !self.cycles.is_empty(),
            cycles: self.cycles,
        }
    }
}

/// Detect all cycles reachable by a full depth-first scan of the graph.
///
/// Detection never stops early: every component is scanned and every
/// back-edge is reported. If `has_cycle` is set, the project is not
/// schedulable and the downstream passes must not run.
pub fn detect_cycles(graph: &TaskGraph, verbosity: u8) -> CycleReport {
    CycleDetector::new(graph, verbosity).run()
}
