//! A 2D computational-geometry kernel for a 3D-printing slicer.
//!
//! Given a triangle mesh and a horizontal Z plane, [`mesh::slice::region_for_slice_at_z`]
//! produces the planar [`geom2::CompoundRegion`] occupied by the solid at that
//! height. From there the kernel supports the operations a slicer needs: boolean
//! combination of regions (union/difference/intersection), offsetting for
//! perimeters and shells, containment queries, line-segment clipping for infill,
//! and [`io::svg::ToPathData`] for preview export.
//!
//! # Scope
//! - **In scope**: paths, simple and compound regions, their booleans, mesh
//!   slicing, segment clipping, and path offsetting — see [`geom2`] and [`mesh`].
//! - **Out of scope** (external collaborators): STL parsing, G-code emission,
//!   CLIs, configuration file/argv loading, and SVG document wrapping beyond
//!   path-data text. The core assumes triangles arrive in a canonical form and
//!   consumes/produces the value types defined here.
//! - **Non-goals**: exact (rational) arithmetic, arbitrary-dimension geometry,
//!   curved (arc/Bezier) segments, and multithreaded evaluation.
//!
//! # Tolerance
//! Every operation that compares points for equality, tests containment, or
//! detects a degenerate intersection does so through a runtime [`config::GeometryConfig`]
//! rather than a compile-time constant, so a caller working in different units or
//! needing a looser tolerance isn't stuck with the crate's default epsilon.
//!
//! # Error handling
//! Almost nothing here returns `Result`. Geometry- and topology-degenerate inputs
//! (zero-length segments, an unclosable path, a stalled boolean assembly) degrade
//! silently to a well-defined output per the policy documented on
//! [`geom2::path::Path::assemble_tagged_paths`] and [`geom2::path::Path::left_offset`].
//! [`errors::GeometryError`] exists only for the small set of explicit "checked"
//! constructors such as [`geom2::simple_region::SimpleRegion::try_new`].

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod float_types;
pub mod geom2;
pub mod io;
pub mod mesh;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");
