//! Interval collection and the maximum-weight scheduling solve.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::graph::{GraphError, VertexGraph};
use crate::log_changes;
use crate::models::{Interval, IntervalError, Schedule};

/// Errors from the solve entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// A raw triple failed validation; `index` is its position in the input.
    #[error("Interval at position {index}: {source}")]
    InvalidInterval {
        index: usize,
        source: IntervalError,
    },
    /// The derived graph could not be ordered. Compatibility edges always
    /// point forward in time, so a well-formed collection never triggers it.
    #[error("Compatibility graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Bit-exact key over an interval's span, used to detect duplicate spans.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct SpanKey {
    start: u64,
    finish: u64,
}

impl SpanKey {
    fn of(interval: &Interval) -> Self {
        // Fold -0.0 into 0.0 so the key agrees with float equality.
        fn bits(value: f64) -> u64 {
            if value == 0.0 {
                0.0f64.to_bits()
            } else {
                value.to_bits()
            }
        }
        Self {
            start: bits(interval.start()),
            finish: bits(interval.finish()),
        }
    }
}

/// A collection of weighted intervals, possibly overlapping.
///
/// Intervals are kept in insertion order, and that order becomes the vertex
/// numbering of every derived graph, so solves over the same contents are
/// reproducible. Inserting a span that is already present keeps the heavier
/// weight instead of storing a second copy.
#[derive(Clone, Debug, Default)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
    by_span: FxHashMap<SpanKey, usize>,
}

impl IntervalSet {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with room for `capacity` intervals.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            intervals: Vec::with_capacity(capacity),
            by_span: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Build a collection from already-validated intervals.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut set = Self::new();
        for interval in intervals {
            set.insert(interval);
        }
        set
    }

    /// Validate a raw triple and insert it.
    ///
    /// On error the collection is left unchanged.
    pub fn add(&mut self, start: f64, finish: f64, weight: f64) -> Result<(), IntervalError> {
        self.insert(Interval::new(start, finish, weight)?);
        Ok(())
    }

    /// Insert a validated interval, merging duplicate spans by max weight.
    pub fn insert(&mut self, interval: Interval) {
        match self.by_span.entry(SpanKey::of(&interval)) {
            Entry::Occupied(slot) => {
                let existing = &mut self.intervals[*slot.get()];
                if interval.weight() > existing.weight() {
                    *existing = interval;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(self.intervals.len());
                self.intervals.push(interval);
            }
        }
    }

    /// Number of stored intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the collection holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Stored intervals in insertion order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Compute the maximum-weight subset of pairwise non-overlapping
    /// intervals.
    ///
    /// Works on a snapshot of the current contents: the compatibility graph
    /// and all cost state are allocated inside the call and dropped on
    /// return, so repeated or concurrent solves never share state.
    pub fn solve(&self, verbosity: u8) -> Result<Schedule, SolveError> {
        let graph = self.compatibility_graph();
        log_changes!(
            verbosity,
            "Built compatibility graph: {} vertices, {} edges",
            graph.order(),
            graph.size()
        );

        let best = graph.max_cost_path(verbosity)?;
        let schedule = Schedule {
            intervals: best.path.iter().map(|&v| self.intervals[v]).collect(),
            cost: best.cost,
        };
        log_changes!(
            verbosity,
            "Best schedule: {} intervals, total cost {}",
            schedule.intervals.len(),
            schedule.cost
        );
        Ok(schedule)
    }

    /// Derive the forward-compatibility graph of the current contents.
    ///
    /// Vertex numbering follows insertion order and an edge `u -> v` exists
    /// iff `u` finishes no later than `v` starts. The inner loop visits
    /// targets in increasing index order, so adjacency lists come out
    /// sorted, which keeps the downstream passes deterministic.
    fn compatibility_graph(&self) -> VertexGraph {
        let mut graph = VertexGraph::with_capacity(self.intervals.len());
        for interval in &self.intervals {
            graph.add_vertex(interval.weight());
        }
        for (u, earlier) in self.intervals.iter().enumerate() {
            for (v, later) in self.intervals.iter().enumerate() {
                // A valid interval never precedes itself (start < finish),
                // so u == v never yields an edge.
                if earlier.can_precede(later) {
                    graph.add_edge(u, v);
                }
            }
        }
        graph
    }
}

/// Solve over already-validated intervals.
pub fn solve_intervals(intervals: &[Interval], verbosity: u8) -> Result<Schedule, SolveError> {
    IntervalSet::from_intervals(intervals.iter().copied()).solve(verbosity)
}

/// Validate raw `(start, finish, weight)` triples and solve.
///
/// Stops at the first invalid triple, reporting its position in the input;
/// no partial schedule is produced.
pub fn solve_triples(triples: &[(f64, f64, f64)], verbosity: u8) -> Result<Schedule, SolveError> {
    let mut set = IntervalSet::with_capacity(triples.len());
    for (index, &(start, finish, weight)) in triples.iter().enumerate() {
        let interval = Interval::new(start, finish, weight)
            .map_err(|source| SolveError::InvalidInterval { index, source })?;
        set.insert(interval);
    }
    set.solve(verbosity)
}
