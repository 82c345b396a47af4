//! Scalar type and the handful of constants shared by every module.

/// Our scalar type. Selected by the mutually exclusive `f32`/`f64` features.
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(not(feature = "f32"))]
pub type Real = f64;

/// Default tolerance for point equality, containment, and degenerate-intersection
/// detection ("CLOSEENOUGH" in the reference implementation this crate is built from).
///
/// This is the *default* only; call sites that need a non-default tolerance should
/// thread a [`crate::config::GeometryConfig`] through instead of reaching for this
/// constant directly.
#[cfg(feature = "f32")]
pub const CLOSEENOUGH: Real = 1e-4;
#[cfg(not(feature = "f32"))]
pub const CLOSEENOUGH: Real = 1e-5;

/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
#[cfg(not(feature = "f32"))]
pub const PI: Real = core::f64::consts::PI;

/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
#[cfg(not(feature = "f32"))]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
#[cfg(not(feature = "f32"))]
pub const TAU: Real = core::f64::consts::TAU;

/// SVG user units per millimetre (90 dpi / 25.4 mm per inch).
pub const SVG_UNITS_PER_MM: Real = 90.0 / 25.4;
