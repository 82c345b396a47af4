//! A single outer boundary with zero or more holes.

use crate::config::GeometryConfig;
use crate::diagnostics::Diagnostics;
use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::geom2::path::Path;
use crate::geom2::point::Point2;

/// An outer closed path plus the (disjoint, strictly-contained) holes punched out
/// of it.
#[derive(Debug, Clone)]
pub struct SimpleRegion {
    pub outer: Path,
    pub holes: Vec<Path>,
}

impl SimpleRegion {
    /// Build a region without validating nesting; callers that know their input is
    /// well-formed (e.g. output of `assemble_compound_region_from`) use this.
    pub fn new(outer: Path, holes: Vec<Path>) -> Self {
        Self { outer, holes }
    }

    /// As [`SimpleRegion::new`], but validates that every hole nests inside the
    /// outer and that no two holes overlap, returning a [`GeometryError`] otherwise.
    pub fn try_new(outer: Path, holes: Vec<Path>, config: &GeometryConfig) -> Result<Self, GeometryError> {
        if !outer.is_closed_with_epsilon(config.epsilon) {
            return Err(GeometryError::DegenerateInput(
                "outer path is not closed".to_string(),
            ));
        }
        for (i, hole) in holes.iter().enumerate() {
            if !hole.is_closed_with_epsilon(config.epsilon) {
                return Err(GeometryError::DegenerateInput(format!(
                    "hole {i} is not closed"
                )));
            }
            if let Some(p) = hole.start() {
                if !outer.contains(&p, config) {
                    return Err(GeometryError::MismatchedWinding(format!(
                        "hole {i} is not contained by the outer path"
                    )));
                }
            }
        }
        for i in 0..holes.len() {
            for j in (i + 1)..holes.len() {
                if let Some(p) = holes[j].start() {
                    if holes[i].contains(&p, config) {
                        return Err(GeometryError::MismatchedWinding(format!(
                            "hole {j} overlaps hole {i}"
                        )));
                    }
                }
            }
        }
        Ok(Self { outer, holes })
    }

    pub fn contains(&self, point: &Point2, config: &GeometryConfig) -> bool {
        self.outer.contains(point, config) && !self.holes.iter().any(|h| h.contains(point, config))
    }

    pub fn area(&self, config: &GeometryConfig) -> Real {
        let _ = config;
        self.outer.area() - self.holes.iter().map(Path::area).sum::<Real>()
    }

    /// Union with another region: union the boundary paths, then reclassify the
    /// result into outer/hole by nesting depth.
    pub fn union(&self, other: &SimpleRegion, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> Vec<SimpleRegion> {
        let mut combined = self.outer.union(&other.outer, config, diagnostics);
        combined.extend(self.holes.iter().cloned());
        combined.extend(other.holes.iter().cloned());
        classify_into_regions(combined, config)
    }

    /// `self - other`, treating each region as (outer minus its holes). The area
    /// removed is `other.outer` minus `other`'s own holes (a hole in the
    /// subtrahend leaves that area untouched, since it was never solid there).
    pub fn difference(&self, other: &SimpleRegion, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> Vec<SimpleRegion> {
        // self's own holes are removed unconditionally.
        let mut remaining = Path::difference_of(&[self.outer.clone()], &self.holes, config, diagnostics);
        // subtract other's solid area
        remaining = Path::difference_of(&remaining, std::slice::from_ref(&other.outer), config, diagnostics);
        // but add back whatever lay in one of other's holes (never solid in `other`)
        for hole in &other.holes {
            let candidates = self.outer.intersection(hole, config, diagnostics);
            let restored = Path::difference_of(&candidates, &self.holes, config, diagnostics);
            remaining = Path::union_of(
                &remaining.into_iter().chain(restored).collect::<Vec<_>>(),
                config,
                diagnostics,
            );
        }
        classify_into_regions(remaining, config)
    }

    pub fn intersection(&self, other: &SimpleRegion, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> Vec<SimpleRegion> {
        let outers = self.outer.intersection(&other.outer, config, diagnostics);
        let mut combined = outers;
        combined.extend(self.holes.iter().cloned());
        combined.extend(other.holes.iter().cloned());
        classify_into_regions(combined, config)
    }

    /// Inset the outer and each hole by `d` (holes effectively grow outward, since
    /// they wind opposite the outer); a hole whose inset collapses is dropped, and
    /// the whole region is dropped if the outer's inset collapses.
    pub fn inset(&self, d: Real, config: &GeometryConfig) -> Option<SimpleRegion> {
        let outer_result = self.outer.inset(d, config);
        let outer = outer_result.into_iter().next()?;
        let holes = self
            .holes
            .iter()
            .filter_map(|h| h.inset(-d, config).into_iter().next())
            .collect();
        Some(SimpleRegion { outer, holes })
    }
}

/// Classify a flat list of closed paths into outer/hole `SimpleRegion`s by nesting
/// depth: a path is a hole of the smallest-area path that strictly contains it;
/// even-depth paths are outers.
///
/// Exposed crate-wide (under a `_pub` name to keep the un-prefixed name free for
/// this module's own call sites) because `CompoundRegion::assemble_compound_region_from`
/// needs the same nesting analysis.
pub(crate) fn classify_into_regions_pub(paths: Vec<Path>, config: &GeometryConfig) -> Vec<SimpleRegion> {
    classify_into_regions(paths, config)
}

fn classify_into_regions(paths: Vec<Path>, config: &GeometryConfig) -> Vec<SimpleRegion> {
    let n = paths.len();
    let mut parent = vec![None; n];

    for i in 0..n {
        let mut best: Option<(usize, Real)> = None;
        let Some(p) = paths[i].start() else { continue };
        for j in 0..n {
            if i == j {
                continue;
            }
            if paths[j].contains(&p, config) {
                let area = paths[j].area();
                if best.map(|(_, a)| area < a).unwrap_or(true) {
                    best = Some((j, area));
                }
            }
        }
        parent[i] = best.map(|(j, _)| j);
    }

    let depth = |mut i: usize| -> usize {
        let mut d = 0;
        let mut seen = vec![false; n];
        while let Some(p) = parent[i] {
            if seen[p] {
                break;
            }
            seen[p] = true;
            d += 1;
            i = p;
        }
        d
    };

    let mut regions: Vec<SimpleRegion> = Vec::new();
    for i in 0..n {
        if depth(i) % 2 == 0 {
            regions.push(SimpleRegion::new(paths[i].clone(), Vec::new()));
        }
    }
    for i in 0..n {
        if depth(i) % 2 == 1 {
            if let Some(parent_idx) = parent[i] {
                if let Some(region) = regions
                    .iter_mut()
                    .find(|r| paths_equal(&r.outer, &paths[parent_idx]))
                {
                    region.holes.push(paths[i].clone());
                }
            }
        }
    }
    regions
}

fn paths_equal(a: &Path, b: &Path) -> bool {
    std::ptr::eq(a.segments.as_slice(), b.segments.as_slice())
        || (a.segments.len() == b.segments.len()
            && a.segments
                .iter()
                .zip(b.segments.iter())
                .all(|(s1, s2)| s1.close_to(s2, 1e-9)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::point::Point2;

    fn square(x0: Real, y0: Real, side: Real) -> Path {
        let pts = [
            Point2::new(x0, y0),
            Point2::new(x0 + side, y0),
            Point2::new(x0 + side, y0 + side),
            Point2::new(x0, y0 + side),
            Point2::new(x0, y0),
        ];
        Path::from_points(&pts)
    }

    #[test]
    fn contains_respects_hole() {
        let outer = square(0.0, 0.0, 10.0);
        let hole = square(3.0, 3.0, 4.0);
        let region = SimpleRegion::new(outer, vec![hole]);
        let config = GeometryConfig::default();
        assert!(!region.contains(&Point2::new(5.0, 5.0), &config));
        assert!(region.contains(&Point2::new(1.0, 1.0), &config));
        assert!(!region.contains(&Point2::new(11.0, 5.0), &config));
    }

    #[test]
    fn try_new_rejects_hole_outside_outer() {
        let outer = square(0.0, 0.0, 1.0);
        let hole = square(5.0, 5.0, 1.0);
        let config = GeometryConfig::default();
        assert!(SimpleRegion::try_new(outer, vec![hole], &config).is_err());
    }

    #[test]
    fn inset_drops_region_on_full_collapse() {
        let outer = square(0.0, 0.0, 1.0);
        let region = SimpleRegion::new(outer, Vec::new());
        let config = GeometryConfig::default();
        assert!(region.inset(0.6, &config).is_none());
    }
}
