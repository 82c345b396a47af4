//! Format-only output: SVG path-data emission.
//!
//! This module does not emit enclosing `<svg>`/`<g>`/styling — that's a
//! collaborator's concern (see the crate-level docs). It is exposed as the
//! [`svg::ToPathData`] trait so `Path`, `SimpleRegion`, and `CompoundRegion` share
//! one formatting implementation.

pub mod svg;
