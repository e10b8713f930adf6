//! Vertex-weighted digraph and the maximum-cost path computation.

use std::collections::VecDeque;

use crate::{log_checks, log_debug};

/// Errors from graph traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Kahn's algorithm ordered fewer vertices than the graph holds.
    Cyclic { ordered: usize, order: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::Cyclic { ordered, order } => write!(
                f,
                "Graph contains a cycle: only {} of {} vertices could be ordered",
                ordered, order
            ),
        }
    }
}

impl std::error::Error for GraphError {}

/// A path through the graph together with its accumulated cost.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathCost {
    /// Vertex indices in path order.
    pub path: Vec<usize>,
    /// Sum of the path members' weights.
    pub cost: f64,
}

/// A directed graph over dense integer vertices, each carrying a weight.
///
/// Vertices are numbered from 0 in creation order. Edges live in adjacency
/// lists of target indices, so neighbor iteration follows insertion order.
#[derive(Clone, Debug, Default)]
pub struct VertexGraph {
    adj: Vec<Vec<usize>>,
    in_degrees: Vec<usize>,
    weights: Vec<f64>,
    edges: usize,
}

impl VertexGraph {
    /// Create a graph with no vertices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            adj: Vec::with_capacity(capacity),
            in_degrees: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
            edges: 0,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn order(&self) -> usize {
        self.weights.len()
    }

    /// Number of edges.
    #[inline]
    pub fn size(&self) -> usize {
        self.edges
    }

    /// Add a vertex with the given weight and return its index.
    pub fn add_vertex(&mut self, weight: f64) -> usize {
        self.adj.push(Vec::new());
        self.in_degrees.push(0);
        self.weights.push(weight);
        self.weights.len() - 1
    }

    /// Add a directed edge from `src` to `dest`.
    ///
    /// # Panics
    /// Panics if either vertex is out of range.
    pub fn add_edge(&mut self, src: usize, dest: usize) {
        assert!(src < self.order(), "edge source {} out of range", src);
        assert!(dest < self.order(), "edge target {} out of range", dest);
        self.adj[src].push(dest);
        self.in_degrees[dest] += 1;
        self.edges += 1;
    }

    /// Weight of a vertex.
    #[inline]
    pub fn weight(&self, vertex: usize) -> f64 {
        self.weights[vertex]
    }

    /// Targets of a vertex's out-edges, in insertion order.
    #[inline]
    pub fn out_edges(&self, vertex: usize) -> &[usize] {
        &self.adj[vertex]
    }

    /// Number of edges terminating at a vertex.
    #[inline]
    pub fn in_degree(&self, vertex: usize) -> usize {
        self.in_degrees[vertex]
    }

    /// Vertices with no incoming edge, in increasing index order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.in_degrees
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(vertex, _)| vertex)
    }

    /// One valid topological order over all vertices (Kahn's algorithm).
    ///
    /// Roots enter a FIFO queue in increasing index order, and a vertex is
    /// enqueued the moment its remaining in-degree drops to zero. For a
    /// fixed construction sequence the order is fully deterministic.
    pub fn topological_order(&self) -> Result<Vec<usize>, GraphError> {
        let mut remaining = self.in_degrees.clone();
        let mut queue: VecDeque<usize> = self.roots().collect();
        let mut sorted = Vec::with_capacity(self.order());

        while let Some(src) = queue.pop_front() {
            sorted.push(src);
            for &dest in &self.adj[src] {
                remaining[dest] -= 1;
                if remaining[dest] == 0 {
                    queue.push_back(dest);
                }
            }
        }

        if sorted.len() != self.order() {
            return Err(GraphError::Cyclic {
                ordered: sorted.len(),
                order: self.order(),
            });
        }

        Ok(sorted)
    }

    /// Find the maximum-cost path, where cost is the sum of vertex weights.
    ///
    /// Every vertex is a candidate path start and every vertex a candidate
    /// end, so after relaxing all edges in topological order the answer is
    /// the vertex with the highest accumulated cost. Cost ties keep the
    /// first relaxation; endpoint ties keep the smallest vertex index.
    ///
    /// An empty graph yields an empty path with cost 0.
    pub fn max_cost_path(&self, verbosity: u8) -> Result<PathCost, GraphError> {
        if self.order() == 0 {
            return Ok(PathCost::default());
        }

        let sorted = self.topological_order()?;
        let (costs, parents) = self.relax_in_order(&sorted, verbosity);

        // Ascending scan with strict > keeps the smallest index on ties.
        let mut end = 0;
        for vertex in 1..self.order() {
            if costs[vertex] > costs[end] {
                end = vertex;
            }
        }
        log_checks!(
            verbosity,
            "Selected path endpoint {} with cost {}",
            end,
            costs[end]
        );

        let mut path = Vec::new();
        let mut current = Some(end);
        while let Some(vertex) = current {
            path.push(vertex);
            current = parents[vertex];
        }
        path.reverse();

        Ok(PathCost {
            path,
            cost: costs[end],
        })
    }

    /// Relax every edge in topological order.
    ///
    /// Returns the best accumulated cost per vertex and the predecessor that
    /// produced it (None for vertices best reached as path starts). Only a
    /// strictly greater candidate replaces a recorded cost.
    fn relax_in_order(&self, sorted: &[usize], verbosity: u8) -> (Vec<f64>, Vec<Option<usize>>) {
        let mut costs = self.weights.clone();
        let mut parents: Vec<Option<usize>> = vec![None; self.order()];

        for &src in sorted {
            for &dest in &self.adj[src] {
                let candidate = costs[src] + self.weights[dest];
                if candidate > costs[dest] {
                    log_debug!(
                        verbosity,
                        "Relaxed {} -> {}: cost {} (was {})",
                        src,
                        dest,
                        candidate,
                        costs[dest]
                    );
                    costs[dest] = candidate;
                    parents[dest] = Some(src);
                }
            }
        }

        (costs, parents)
    }
}
