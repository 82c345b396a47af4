//! Runtime-configurable tolerance and scale, threaded through path/region operations
//! instead of baked in as compile-time constants.

use crate::float_types::{CLOSEENOUGH, Real, SVG_UNITS_PER_MM};

/// Tolerance and scale bundle used by geometry and SVG-export operations.
///
/// Most call sites use [`GeometryConfig::default`], which reproduces the fixed
/// `CLOSEENOUGH` tolerance and 90/25.4 px-per-mm scale. Callers that need a looser or
/// tighter tolerance (e.g. for a mesh scaled to meters instead of millimetres) build
/// their own and pass it to the `_with_config` entry points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Tolerance used for point equality, containment tests, and degenerate
    /// intersection detection.
    pub epsilon: Real,
    /// SVG user units per millimetre.
    pub svg_scale: Real,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            epsilon: CLOSEENOUGH,
            svg_scale: SVG_UNITS_PER_MM,
        }
    }
}

impl GeometryConfig {
    /// A config with the default scale but a caller-chosen epsilon.
    pub fn with_epsilon(epsilon: Real) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_closeenough() {
        let cfg = GeometryConfig::default();
        assert_eq!(cfg.epsilon, CLOSEENOUGH);
        assert_eq!(cfg.svg_scale, SVG_UNITS_PER_MM);
    }

    #[test]
    fn with_epsilon_overrides_only_epsilon() {
        let cfg = GeometryConfig::with_epsilon(1e-3);
        assert_eq!(cfg.epsilon, 1e-3);
        assert_eq!(cfg.svg_scale, SVG_UNITS_PER_MM);
    }
}
