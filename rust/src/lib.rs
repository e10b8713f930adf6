//! Rust implementation of the wi scheduler data types and algorithms.
//!
//! This module provides the computational core for weighted interval
//! scheduling: interval validation, compatibility graph construction, and
//! the maximum-cost path solve.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

pub mod graph;
pub mod intervals;
pub mod logging;
mod models;
pub mod parse;

pub use graph::{GraphError, PathCost, VertexGraph};
pub use intervals::{solve_intervals, solve_triples, IntervalSet, SolveError};
pub use models::{Interval, IntervalError, Schedule};
pub use parse::{parse_intervals, ParseError};

/// Solve for the maximum-weight subset of non-overlapping intervals.
///
/// Builds the compatibility graph over the given intervals and extracts the
/// maximum-cost path through it. The returned schedule lists the chosen
/// intervals in path order (non-decreasing start).
///
/// # Arguments
/// * `intervals` - Validated intervals, in entry order
/// * `verbosity` - Logging level (0=silent, 1=changes, 2=checks, 3=debug)
///
/// # Returns
/// * Schedule with the chosen intervals and their total cost
///
/// # Raises
/// * ValueError if the derived graph cannot be ordered
#[pyfunction]
#[pyo3(signature = (intervals, verbosity=0))]
fn solve_schedule(intervals: Vec<Interval>, verbosity: u8) -> PyResult<Schedule> {
    match solve_intervals(&intervals, verbosity) {
        Ok(schedule) => Ok(schedule),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Parse `start finish weight` lines into validated intervals.
///
/// `#` starts a comment and blank lines are skipped.
///
/// # Arguments
/// * `text` - The interval descriptions, one per line
///
/// # Returns
/// * List of intervals in input order
///
/// # Raises
/// * ValueError naming the first malformed line (numbered from 1)
#[pyfunction]
fn py_parse_intervals(text: &str) -> PyResult<Vec<Interval>> {
    match parse_intervals(text) {
        Ok(intervals) => Ok(intervals),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The wi.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Interval>()?;
    m.add_class::<Schedule>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(solve_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_intervals, m)?)?;

    Ok(())
}
