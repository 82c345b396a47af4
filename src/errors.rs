//! Error types for the handful of entry points that are naturally fallible at
//! construction time.
//!
//! Everything else in this crate degrades silently per the documented policy for
//! geometry-degenerate, topology-degenerate, and stalled-assembly inputs (see the
//! `assemble_tagged_paths` and `left_offset` doc comments on [`crate::geom2::path::Path`])
//! rather than returning `Result`. `GeometryError` exists only for the explicit
//! opt-in "checked"/"try_" constructors.

use std::fmt;

/// Errors surfaced by the explicit "checked" constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A constructor received degenerate input it was not willing to silently repair,
    /// e.g. fewer than two points, or a zero-length segment where one is disallowed.
    DegenerateInput(String),

    /// `SimpleRegion::try_new` was given a hole that is not contained by the outer
    /// path, or two holes that overlap.
    MismatchedWinding(String),

    /// A caller-supplied scalar is out of its documented domain, e.g. infill density
    /// <= 0 or extrusion width <= 0 passed to a `_checked` entry point.
    InvalidArguments(String),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GeometryError::*;
        match self {
            DegenerateInput(msg) => write!(f, "degenerate input: {msg}"),
            MismatchedWinding(msg) => write!(f, "mismatched winding/nesting: {msg}"),
            InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for GeometryError {}
