//! A disjoint union of `SimpleRegion`s sharing one Z-slice.

use crate::config::GeometryConfig;
use crate::diagnostics::Diagnostics;
use crate::float_types::Real;
use crate::geom2::infill;
use crate::geom2::path::Path;
use crate::geom2::point::Point2;
use crate::geom2::segment::Segment;
use crate::geom2::simple_region::SimpleRegion;

/// A set of pairwise-disjoint `SimpleRegion`s produced by one mesh slice (or by a
/// boolean combination of other `CompoundRegion`s at the same Z).
#[derive(Debug, Clone)]
pub struct CompoundRegion {
    pub subregions: Vec<SimpleRegion>,
    pub z_level: Real,
}

impl CompoundRegion {
    pub fn new(subregions: Vec<SimpleRegion>, z_level: Real) -> Self {
        Self { subregions, z_level }
    }

    pub fn empty(z_level: Real) -> Self {
        Self {
            subregions: Vec::new(),
            z_level,
        }
    }

    pub fn contains(&self, point: &Point2, config: &GeometryConfig) -> bool {
        self.subregions.iter().any(|r| r.contains(point, config))
    }

    pub fn area(&self, config: &GeometryConfig) -> Real {
        self.subregions.iter().map(|r| r.area(config)).sum()
    }

    /// Classify a flat set of closed paths produced by mesh slicing (or any other
    /// source of unordered closed paths) into a forest of outer/hole regions, by
    /// nesting depth.
    pub fn assemble_compound_region_from(paths: Vec<Path>, z_level: Real, config: &GeometryConfig) -> CompoundRegion {
        let regions = crate::geom2::simple_region::classify_into_regions_pub(paths, config);
        CompoundRegion { subregions: regions, z_level }
    }

    pub fn union_with_region(&self, other: &SimpleRegion, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> CompoundRegion {
        let merged_outers = Path::union_of(
            &self.subregions.iter().map(|r| r.outer.clone()).chain(std::iter::once(other.outer.clone())).collect::<Vec<_>>(),
            config,
            diagnostics,
        );
        let mut holes: Vec<Path> = self.subregions.iter().flat_map(|r| r.holes.iter().cloned()).collect();
        holes.extend(other.holes.iter().cloned());
        let mut combined = merged_outers;
        combined.extend(holes);
        CompoundRegion {
            subregions: crate::geom2::simple_region::classify_into_regions_pub(combined, config),
            z_level: self.z_level,
        }
    }

    pub fn union_with(&self, other: &CompoundRegion, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> CompoundRegion {
        let mut result = self.clone();
        for r in &other.subregions {
            result = result.union_with_region(r, config, diagnostics);
        }
        result
    }

    pub fn difference_with(&self, other: &CompoundRegion, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> CompoundRegion {
        let mut subregions = self.subregions.clone();
        for other_region in &other.subregions {
            subregions = subregions
                .iter()
                .flat_map(|r| r.difference(other_region, config, diagnostics))
                .collect();
        }
        CompoundRegion {
            subregions,
            z_level: self.z_level,
        }
    }

    pub fn intersection_with(&self, other: &CompoundRegion, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> CompoundRegion {
        let mut subregions = Vec::new();
        for a in &self.subregions {
            for b in &other.subregions {
                subregions.extend(a.intersection(b, config, diagnostics));
            }
        }
        CompoundRegion {
            subregions,
            z_level: self.z_level,
        }
    }

    pub fn contained_segments_of_line(&self, line: &Segment, config: &GeometryConfig) -> Vec<Segment> {
        self.subregions
            .iter()
            .flat_map(|r| {
                let mut segs = r.outer.contained_segments(line, config);
                for hole in &r.holes {
                    let hole_segs = hole.contained_segments(line, config);
                    // segments inside a hole are not inside the region; drop them.
                    segs.retain(|s| {
                        !hole_segs
                            .iter()
                            .any(|h| h.close_to(s, config.epsilon))
                    });
                }
                segs
            })
            .collect()
    }

    /// Parallel-scanline infill raster for every subregion, at orientation `theta`
    /// and spacing `extrusion_width / density`. Non-positive `density` or
    /// `extrusion_width` silently yields no segments rather than failing; callers
    /// that want to reject such inputs instead should use
    /// [`CompoundRegion::infill_paths_for_region_with_density_checked`].
    pub fn infill_paths_for_region_with_density(
        &self,
        density: Real,
        extrusion_width: Real,
        theta: Real,
        config: &GeometryConfig,
    ) -> Vec<Segment> {
        infill::generate(self, density, extrusion_width, theta, config)
    }

    /// As [`CompoundRegion::infill_paths_for_region_with_density`], but rejects a
    /// non-positive `density` or `extrusion_width` with [`crate::errors::GeometryError::InvalidArguments`]
    /// instead of silently returning no segments.
    pub fn infill_paths_for_region_with_density_checked(
        &self,
        density: Real,
        extrusion_width: Real,
        theta: Real,
        config: &GeometryConfig,
    ) -> Result<Vec<Segment>, crate::errors::GeometryError> {
        if density <= 0.0 {
            return Err(crate::errors::GeometryError::InvalidArguments(format!(
                "density must be positive, got {density}"
            )));
        }
        if extrusion_width <= 0.0 {
            return Err(crate::errors::GeometryError::InvalidArguments(format!(
                "extrusion_width must be positive, got {extrusion_width}"
            )));
        }
        Ok(infill::generate(self, density, extrusion_width, theta, config))
    }
}
