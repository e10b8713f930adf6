//! Core data types for the interval scheduling system.

use pyo3::prelude::*;
use thiserror::Error;

/// Errors from interval validation.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum IntervalError {
    #[error("Interval {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("Interval from {start} to {finish} has nonpositive duration")]
    NonpositiveDuration { start: f64, finish: f64 },
    #[error("Interval weight must be positive, got {weight}")]
    NonpositiveWeight { weight: f64 },
}

/// A half-open time span `[start, finish)` carrying a positive weight.
///
/// Instances can only be built through [`Interval::new`], which checks that
/// all three values are finite, that `start < finish`, and that the weight
/// is positive. An accepted interval is immutable.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    #[pyo3(get)]
    start: f64,
    #[pyo3(get)]
    finish: f64,
    #[pyo3(get)]
    weight: f64,
}

impl Interval {
    /// Validate a `(start, finish, weight)` triple and build an interval.
    pub fn new(start: f64, finish: f64, weight: f64) -> Result<Self, IntervalError> {
        // Finiteness first, so the ordering checks below never see NaN.
        for (field, value) in [("start", start), ("finish", finish), ("weight", weight)] {
            if !value.is_finite() {
                return Err(IntervalError::NonFinite { field, value });
            }
        }
        if start >= finish {
            return Err(IntervalError::NonpositiveDuration { start, finish });
        }
        if weight <= 0.0 {
            return Err(IntervalError::NonpositiveWeight { weight });
        }
        Ok(Self {
            start,
            finish,
            weight,
        })
    }

    /// Left endpoint.
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Right endpoint.
    #[inline]
    pub fn finish(&self) -> f64 {
        self.finish
    }

    /// Weight collected by scheduling this interval.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether this interval can run to completion before `other` begins.
    ///
    /// Touching endpoints are compatible: a span finishing at time t does
    /// not overlap one starting at t.
    #[inline]
    pub fn can_precede(&self, other: &Interval) -> bool {
        self.finish <= other.start
    }
}

#[pymethods]
impl Interval {
    #[new]
    fn py_new(start: f64, finish: f64, weight: f64) -> PyResult<Self> {
        Interval::new(start, finish, weight)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Interval(start={}, finish={}, weight={})",
            self.start, self.finish, self.weight
        )
    }

    fn __str__(&self) -> String {
        format!("{} {} {}", self.start, self.finish, self.weight)
    }
}

/// Result of a solve: the chosen intervals and their combined weight.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    /// Chosen intervals in path order (non-decreasing start).
    #[pyo3(get)]
    pub intervals: Vec<Interval>,
    /// Sum of the chosen intervals' weights.
    #[pyo3(get)]
    pub cost: f64,
}

#[pymethods]
impl Schedule {
    #[new]
    #[pyo3(signature = (intervals=None, cost=0.0))]
    fn py_new(intervals: Option<Vec<Interval>>, cost: f64) -> Self {
        Self {
            intervals: intervals.unwrap_or_default(),
            cost,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Schedule(intervals={}, cost={})",
            self.intervals.len(),
            self.cost
        )
    }

    fn __len__(&self) -> usize {
        self.intervals.len()
    }
}
