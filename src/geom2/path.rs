//! Ordered sequences of segments, and the boolean/offset/assembly algorithms that
//! operate on them.
//!
//! This module is the largest in the crate; it hosts everything built on top of
//! `Path::attach` (assembly from an unordered segment soup, repair of open paths,
//! self-intersection splitting, tagging against a reference path, boolean
//! combination, simplification, and offsetting).

use crate::config::GeometryConfig;
use crate::diagnostics::Diagnostics;
use crate::float_types::{FRAC_PI_2, PI, Real};
use crate::geom2::intersection::{IndexedIntersection, Intersection};
use crate::geom2::point::Point2;
use crate::geom2::segment::{Segment, Tag};

/// An ordered chain of segments, open or closed.
#[derive(Debug, Clone, Default)]
pub struct Path {
    pub segments: Vec<Segment>,
    /// Path-level classification, set by nesting analysis (`SimpleRegion` assembly)
    /// and consulted (then inverted) by `tag_segments_relative_to_closed_path`.
    pub inside: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path by chaining consecutive pairs of an ordered point list.
    pub fn from_points(points: &[Point2]) -> Self {
        let mut path = Path::new();
        for pair in points.windows(2) {
            path.segments.push(Segment::new(pair[0], pair[1]));
        }
        path
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            inside: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Point2> {
        self.segments.first().map(|s| s.start)
    }

    pub fn end(&self) -> Option<Point2> {
        self.segments.last().map(|s| s.end)
    }

    /// Closed iff the path has at least two segments and its ends coincide.
    pub fn is_closed_with_epsilon(&self, epsilon: Real) -> bool {
        if self.segments.len() < 2 {
            return false;
        }
        match (self.start(), self.end()) {
            (Some(s), Some(e)) => s.close_to(&e, epsilon),
            _ => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed_with_epsilon(GeometryConfig::default().epsilon)
    }

    /// Attach `segment` to whichever end it chains with. See the module doc for the
    /// five-rule precedence (append, prepend, append-reversed, prepend-reversed,
    /// reject), evaluated in that order against `self`'s current ends.
    pub fn attach(&mut self, segment: Segment) -> bool {
        self.attach_with_epsilon(segment, GeometryConfig::default().epsilon)
    }

    pub fn attach_with_epsilon(&mut self, segment: Segment, epsilon: Real) -> bool {
        if self.is_empty() {
            self.segments.push(segment);
            return true;
        }
        let start = self.start().unwrap();
        let end = self.end().unwrap();

        if end.close_to(&segment.start, epsilon) {
            self.segments.push(segment);
        } else if start.close_to(&segment.end, epsilon) {
            self.segments.insert(0, segment);
        } else if end.close_to(&segment.end, epsilon) {
            self.segments.push(segment.reversed());
        } else if start.close_to(&segment.start, epsilon) {
            self.segments.insert(0, segment.reversed());
        } else {
            return false;
        }
        true
    }

    /// True if `other`'s path could plausibly chain onto `self`: either path is
    /// empty, or some endpoint of `other` matches some endpoint of `self`.
    pub fn could_attach(&self, other: &Path, epsilon: Real) -> bool {
        if self.is_empty() || other.is_empty() {
            return true;
        }
        let (s1, e1) = (self.start().unwrap(), self.end().unwrap());
        let (s2, e2) = (other.start().unwrap(), other.end().unwrap());
        [s1, e1]
            .iter()
            .any(|a| [s2, e2].iter().any(|b| a.close_to(b, epsilon)))
    }

    /// Attempt to chain all of `other`'s segments onto `self`, one at a time, in
    /// order (re-trying reversed order internally via `attach`). Returns whether
    /// every segment was consumed.
    pub fn attach_path(&mut self, other: &Path, epsilon: Real) -> bool {
        if !self.could_attach(other, epsilon) {
            return false;
        }
        if self.is_empty() {
            self.segments = other.segments.clone();
            return true;
        }
        let mut remaining = other.segments.clone();
        let mut progress = true;
        while progress && !remaining.is_empty() {
            progress = false;
            let mut i = 0;
            while i < remaining.len() {
                if self.attach_with_epsilon(remaining[i], epsilon) {
                    remaining.remove(i);
                    progress = true;
                } else {
                    i += 1;
                }
            }
        }
        remaining.is_empty()
    }

    /// Greedily link an unordered bag of segments into paths by chaining endpoints.
    pub fn assemble_paths_from_segments(segments: Vec<Segment>, epsilon: Real) -> Vec<Path> {
        let mut pool = segments;
        let mut paths = Vec::new();

        while !pool.is_empty() {
            let mut current = Path::new();
            current.segments.push(pool.remove(0));

            loop {
                let mut attached_any = false;
                let mut i = 0;
                while i < pool.len() {
                    if current.attach_with_epsilon(pool[i], epsilon) {
                        pool.remove(i);
                        attached_any = true;
                    } else {
                        i += 1;
                    }
                }
                if !attached_any {
                    break;
                }
            }
            paths.push(current);
        }
        paths
    }

    /// Splice open paths together at their nearest endpoints until each is closed
    /// or cannot be closed (in which case it is dropped, per the topology-degenerate
    /// policy).
    pub fn repair_unclosed_paths(paths: Vec<Path>, epsilon: Real) -> Vec<Path> {
        let mut closed = Vec::new();
        let mut open: Vec<Path> = Vec::new();

        for p in paths {
            if p.is_closed_with_epsilon(epsilon) {
                closed.push(p);
            } else {
                open.push(p);
            }
        }

        while let Some(mut current) = open.pop() {
            loop {
                if current.segments.len() < 2 {
                    break;
                }
                let end = current.end().unwrap();
                let start = current.start().unwrap();
                let own_gap = end.distance_to(&start);

                let mut best: Option<(usize, Point2, Real)> = None;
                for (idx, candidate) in open.iter().enumerate() {
                    let cs = candidate.start().unwrap();
                    let ce = candidate.end().unwrap();
                    for &p in &[cs, ce] {
                        let d = end.distance_to(&p);
                        if best.map(|(_, _, bd)| d < bd).unwrap_or(true) {
                            best = Some((idx, p, d));
                        }
                    }
                }

                match best {
                    Some((idx, matched_point, dist)) if dist < own_gap => {
                        let mut other = open.remove(idx);
                        if !other.start().unwrap().close_to(&matched_point, epsilon) {
                            other.reverse();
                        }
                        current
                            .segments
                            .push(Segment::new(end, other.start().unwrap()));
                        current.attach_path(&other, epsilon);
                    }
                    _ => {
                        current.segments.push(Segment::new(end, start));
                        break;
                    }
                }
            }
            if current.is_closed_with_epsilon(epsilon) {
                closed.push(current);
            }
            // else: cannot be closed (fewer than 2 segments) — dropped.
        }

        closed
    }

    pub fn reverse(&mut self) {
        self.segments.reverse();
        for s in &mut self.segments {
            s.reverse();
        }
    }

    pub fn reversed(&self) -> Path {
        let mut p = self.clone();
        p.reverse();
        p
    }

    /// Signed area enclosed by a closed path via the shoelace formula. Positive
    /// indicates clockwise winding, by the convention this crate adopts.
    pub fn winding_area(&self) -> Real {
        let mut area = 0.0;
        for seg in &self.segments {
            area += seg.start.x * seg.end.y - seg.end.x * seg.start.y;
        }
        -0.5 * area
    }

    pub fn area(&self) -> Real {
        self.winding_area().abs()
    }

    /// Ray-casting point-in-polygon test. Undefined (`false`) on a non-closed path.
    pub fn contains(&self, point: &Point2, config: &GeometryConfig) -> bool {
        if !self.is_closed_with_epsilon(config.epsilon) {
            return false;
        }
        let nudge = config.epsilon * 1.5;
        let far_x = 1e9;
        let ray = Segment::new(*point, Point2::new(far_x, point.y));

        let mut crossings = 0usize;
        for seg in &self.segments {
            let mut s = *seg;
            if (s.start.y - point.y).abs() <= config.epsilon {
                s.start.y += nudge;
            }
            if (s.end.y - point.y).abs() <= config.epsilon {
                s.end.y += nudge;
            }
            if !matches!(
                s.intersection_with_segment(&ray, config.epsilon),
                Intersection::None
            ) {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// Intersect every segment of `self` with `line`, skipping a `Point`
    /// intersection that coincides with the segment's own start point (it will
    /// have been reported against the previous segment already) unless the path is
    /// open and this is the first segment.
    pub fn intersections_with(&self, line: &Segment, config: &GeometryConfig) -> Vec<IndexedIntersection> {
        let open = !self.is_closed_with_epsilon(config.epsilon);
        let mut out = Vec::new();
        for (i, seg) in self.segments.iter().enumerate() {
            let hit = seg.intersection_with_segment(line, config.epsilon);
            if hit.is_none() {
                continue;
            }
            if let Intersection::Point(p) = hit {
                let at_own_start = p.close_to(&seg.start, config.epsilon);
                if at_own_start && !(open && i == 0) {
                    continue;
                }
            }
            out.push(IndexedIntersection {
                segment_index: i,
                intersection: hit,
            });
        }
        out
    }

    /// Split every segment of `self` at its intersection points with every segment
    /// of `other`, returning a new path with the same overall shape but finer
    /// segmentation.
    pub fn split_segments_at_intersections_with(&self, other: &Path, config: &GeometryConfig) -> Path {
        let mut segments = self.segments.clone();

        for other_seg in &other.segments {
            let mut next = Vec::with_capacity(segments.len());
            for seg in segments {
                next.extend(Self::split_one_against(&seg, other_seg, config));
            }
            segments = next;
        }

        Path {
            segments,
            inside: self.inside,
        }
    }

    fn split_one_against(seg: &Segment, other: &Segment, config: &GeometryConfig) -> Vec<Segment> {
        let epsilon = config.epsilon;
        let splits: Vec<Point2> = match seg.intersection_with_segment(other, epsilon) {
            Intersection::Point(p) => {
                if seg.has_endpoint(&p, epsilon) {
                    Vec::new()
                } else {
                    vec![p]
                }
            }
            Intersection::Segment(p1, p2) => {
                let mut pts = Vec::new();
                for p in [p1, p2] {
                    if !seg.has_endpoint(&p, epsilon) {
                        pts.push(p);
                    }
                }
                pts
            }
            Intersection::None => Vec::new(),
        };

        if splits.is_empty() {
            return vec![*seg];
        }

        let mut ordered = splits;
        ordered.sort_by(|a, b| {
            seg.start
                .distance_to(a)
                .partial_cmp(&seg.start.distance_to(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut result = Vec::with_capacity(ordered.len() + 1);
        let mut current_start = seg.start;
        for p in ordered {
            result.push(Segment { start: current_start, end: p, ..*seg });
            current_start = p;
        }
        result.push(Segment {
            start: current_start,
            end: seg.end,
            ..*seg
        });
        result
    }

    /// Reset every segment's tag to [`Tag::Used`] and the path's `inside` flag to
    /// `false` (outside), ahead of a fresh classification pass.
    pub fn untag(&mut self) {
        for seg in &mut self.segments {
            seg.tag = Tag::Used;
        }
        self.inside = false;
    }

    /// Classify every segment of `self` relative to the closed path `other`. See
    /// the composition table on the module's grounding notes for the exact
    /// transition rules; segments already carrying a non-`Used` tag compose with
    /// the new observation rather than being overwritten outright.
    pub fn tag_segments_relative_to_closed_path(&mut self, other: &Path, config: &GeometryConfig) {
        self.simplify(2.0 * config.epsilon);
        *self = self.split_segments_at_intersections_with(other, config);

        let opposite_winding = self.winding_area().signum() != other.winding_area().signum();

        for seg in &mut self.segments {
            let midpoint = seg.midpoint();
            let on_edge = other
                .segments
                .iter()
                .find(|e| e.contains_point(&midpoint, config.epsilon));

            let observed_inside_like = match on_edge {
                Some(edge) => {
                    let same_dir = seg.angle_delta(edge).abs() < FRAC_PI_2;
                    let mut shared = same_dir;
                    if opposite_winding {
                        shared = !shared; // opposite-wound operands flip the shared/unshared call
                    }
                    if self.inside {
                        shared = !shared; // composing against a second reference path inverts again
                    }
                    compose_on_edge(seg.tag, shared)
                }
                None => {
                    let inside = other.contains(&midpoint, config);
                    let inside = inside != self.inside;
                    compose_off_edge(seg.tag, inside)
                }
            };
            seg.tag = observed_inside_like;
        }
    }

    /// Assemble the segments of `p1`/`p2` whose tag lies in the respective mask
    /// into new closed paths, switching between the two source paths when the
    /// current chain runs dry. `diagnostics`, if provided, receives a trace message
    /// when assembly stalls.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble_tagged_paths(
        p1: &Path,
        mask1: &[Tag],
        p2: &Path,
        mask2: &[Tag],
        config: &GeometryConfig,
        diagnostics: Option<&dyn Diagnostics>,
    ) -> Vec<Path> {
        let mut segs1 = p1.segments.clone();
        let mut segs2 = p2.segments.clone();
        for s in &mut segs1 {
            if !mask1.contains(&s.tag) {
                s.consumed = true;
            }
        }
        for s in &mut segs2 {
            if !mask2.contains(&s.tag) {
                s.consumed = true;
            }
        }

        let mut remaining = segs1.iter().filter(|s| !s.consumed).count()
            + segs2.iter().filter(|s| !s.consumed).count();

        let mut results = Vec::new();

        'outer: while remaining > 0 {
            let mut current = Path::new();
            let (mut on_first, mut idx) = match find_unused(&segs1) {
                Some(i) => (true, i),
                None => match find_unused(&segs2) {
                    Some(i) => (false, i),
                    None => break,
                },
            };

            let mut unproductive_switches = 0usize;

            loop {
                let list = if on_first { &mut segs1 } else { &mut segs2 };
                if idx >= list.len() || list[idx].consumed {
                    break;
                }
                let next_seg = list[idx];
                list[idx].consumed = true;
                remaining -= 1;
                // Attach rather than raw-push: a switch point matched either endpoint
                // of `next_seg` (see `switch_idx` below), so it may need reversing to
                // keep `seg[i].end == seg[i+1].start` when the two operand paths wind
                // oppositely.
                current.attach_with_epsilon(next_seg, config.epsilon);

                if current.is_closed_with_epsilon(config.epsilon) {
                    break;
                }

                // try to keep attaching from the same list first
                let mut attached = false;
                loop {
                    let list = if on_first { &mut segs1 } else { &mut segs2 };
                    let mut found = None;
                    for (i, s) in list.iter().enumerate() {
                        if !s.consumed && current.attach_with_epsilon(*s, config.epsilon) {
                            found = Some(i);
                            break;
                        }
                    }
                    match found {
                        Some(i) => {
                            list[i].consumed = true;
                            remaining -= 1;
                            attached = true;
                            if current.is_closed_with_epsilon(config.epsilon) {
                                break;
                            }
                        }
                        None => break,
                    }
                }

                if current.is_closed_with_epsilon(config.epsilon) {
                    break;
                }

                if attached {
                    unproductive_switches = 0;
                    continue;
                }

                // switch to the other path, resuming adjacent to the switch point
                let next_list_is_first = !on_first;
                let other_list = if next_list_is_first { &segs1 } else { &segs2 };
                let switch_idx = other_list
                    .iter()
                    .position(|s| !s.consumed && current.end().map(|e| s.has_endpoint(&e, config.epsilon)).unwrap_or(false));

                match switch_idx {
                    Some(i) => {
                        on_first = next_list_is_first;
                        idx = i;
                        unproductive_switches = 0;
                    }
                    None => {
                        unproductive_switches += 1;
                        if unproductive_switches >= 2 {
                            if let Some(d) = diagnostics {
                                d.trace(&format!(
                                    "boolean assembly stalled after {} unproductive switches, {} segments remaining",
                                    unproductive_switches, remaining
                                ));
                            }
                            if !current.segments.is_empty() {
                                results.push(current);
                            }
                            break 'outer;
                        }
                        match find_unused(if on_first { &segs1 } else { &segs2 }) {
                            Some(i) => idx = i,
                            None => match find_unused(if on_first { &segs2 } else { &segs1 }) {
                                Some(i) => {
                                    on_first = !on_first;
                                    idx = i;
                                }
                                None => break,
                            },
                        }
                    }
                }
            }

            if current.is_closed_with_epsilon(config.epsilon) {
                current.simplify(2.0 * config.epsilon);
                results.push(current);
            }
        }

        results
    }

    /// Union of two closed paths (segment-tagging boolean combination).
    pub fn union(&self, other: &Path, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> Vec<Path> {
        let mut p1 = self.clone();
        let mut p2 = other.clone();
        p1.untag();
        p2.untag();
        p1.tag_segments_relative_to_closed_path(&p2, config);
        p2.tag_segments_relative_to_closed_path(&p1, config);
        Self::assemble_tagged_paths(
            &p1,
            &[Tag::Outside, Tag::Shared],
            &p2,
            &[Tag::Outside],
            config,
            diagnostics,
        )
    }

    /// Difference `self - other` of two closed paths.
    pub fn difference(&self, other: &Path, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> Vec<Path> {
        let mut p1 = self.clone();
        let mut p2 = other.clone();
        p1.untag();
        p2.untag();
        p1.tag_segments_relative_to_closed_path(&p2, config);
        p2.tag_segments_relative_to_closed_path(&p1, config);
        Self::assemble_tagged_paths(
            &p1,
            &[Tag::Outside, Tag::Unshared],
            &p2,
            &[Tag::Inside],
            config,
            diagnostics,
        )
    }

    /// Intersection of two closed paths.
    pub fn intersection(&self, other: &Path, config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> Vec<Path> {
        let mut p1 = self.clone();
        let mut p2 = other.clone();
        p1.untag();
        p2.untag();
        p1.tag_segments_relative_to_closed_path(&p2, config);
        p2.tag_segments_relative_to_closed_path(&p1, config);
        Self::assemble_tagged_paths(
            &p1,
            &[Tag::Inside, Tag::Shared],
            &p2,
            &[Tag::Inside],
            config,
            diagnostics,
        )
    }

    /// n-ary union: pairwise-reduce the list, restarting the scan whenever a pair
    /// collapses into zero or one output path.
    pub fn union_of(paths: &[Path], config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> Vec<Path> {
        let mut pool: Vec<Path> = paths.to_vec();
        let mut i = 0;
        while i < pool.len() {
            let mut collapsed = false;
            let mut j = i + 1;
            while j < pool.len() {
                let combined = pool[i].union(&pool[j], config, diagnostics);
                if combined.len() <= 1 {
                    pool.remove(j);
                    pool.remove(i);
                    for p in combined {
                        pool.push(p);
                    }
                    collapsed = true;
                    break;
                }
                j += 1;
            }
            if !collapsed {
                i += 1;
            } else {
                i = 0;
            }
        }
        pool
    }

    /// Fold `subtrahends` over `minuends`, differencing every running path against
    /// each subtrahend in turn.
    pub fn difference_of(minuends: &[Path], subtrahends: &[Path], config: &GeometryConfig, diagnostics: Option<&dyn Diagnostics>) -> Vec<Path> {
        let mut running = minuends.to_vec();
        for sub in subtrahends {
            let mut next = Vec::new();
            for p in &running {
                next.extend(p.difference(sub, config, diagnostics));
            }
            running = next;
        }
        running
    }

    /// Collinear-merge adjacent segment pairs whose shared vertex lies within
    /// `epsilon` of the line joining their outer endpoints.
    pub fn simplify(&mut self, epsilon: Real) {
        if self.segments.len() < 2 {
            return;
        }
        loop {
            let mut merged = false;
            let mut i = 0;
            while i + 1 < self.segments.len() {
                let a = self.segments[i];
                let b = self.segments[i + 1];
                let probe = Segment::new(a.start, b.end);
                let dist = probe.minimum_extended_line_distance_from_point(&a.end);
                if dist <= epsilon {
                    self.segments[i] = Segment { start: a.start, end: b.end, ..a };
                    self.segments.remove(i + 1);
                    merged = true;
                } else {
                    i += 1;
                }
            }
            if !merged {
                break;
            }
        }
    }

    /// Split off self-intersecting "lasso" subpaths recursively until every
    /// returned path is simple.
    pub fn separate_self_intersecting_subpaths(&self, config: &GeometryConfig) -> Vec<Path> {
        let split = self.split_segments_at_intersections_with(self, config);
        Self::extract_lassos(split, config)
    }

    fn extract_lassos(path: Path, config: &GeometryConfig) -> Vec<Path> {
        let n = path.segments.len();
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue; // adjacent via closure, not a genuine self-intersection
                }
                if path.segments[i]
                    .start
                    .close_to(&path.segments[j].end, config.epsilon)
                {
                    let inner = Path::from_segments(path.segments[i..=j].to_vec());
                    let mut outer_segs = path.segments[..i].to_vec();
                    outer_segs.extend_from_slice(&path.segments[j + 1..]);
                    let outer = Path::from_segments(outer_segs);
                    let mut result = Self::extract_lassos(inner, config);
                    result.extend(Self::extract_lassos(outer, config));
                    return result;
                }
            }
        }
        vec![path]
    }

    /// Segments of `self` that lie inside, shared with, or unshared-but-covering
    /// `line`: tag a single-segment path for `line` against `self` and keep what's
    /// classified as covered.
    pub fn contained_segments(&self, line: &Segment, config: &GeometryConfig) -> Vec<Segment> {
        let mut probe = Path::from_segments(vec![*line]);
        probe.untag();
        probe.tag_segments_relative_to_closed_path(self, config);
        probe
            .segments
            .into_iter()
            .filter(|s| matches!(s.tag, Tag::Inside | Tag::Shared | Tag::Unshared))
            .collect()
    }

    /// Tag `path` against `self` and reassemble the inside/shared/unshared
    /// segments into closed subpaths.
    pub fn contained_subpaths_of(&self, path: &Path, config: &GeometryConfig) -> Vec<Path> {
        let mut tagged = path.clone();
        tagged.untag();
        tagged.tag_segments_relative_to_closed_path(self, config);
        let kept: Vec<Segment> = tagged
            .segments
            .into_iter()
            .filter(|s| matches!(s.tag, Tag::Inside | Tag::Shared | Tag::Unshared))
            .collect();
        Self::assemble_paths_from_segments(kept, config.epsilon)
    }

    /// Offset every segment perpendicular-left by `d` via the angle-bisector
    /// method, pruning invalid runs produced at sharp corners. See the module's
    /// design notes for the closed-path "consecutive invalid runs" rule, which
    /// completes the bracketed source algorithm's incomplete case.
    pub fn left_offset(&self, d: Real, config: &GeometryConfig) -> Vec<Path> {
        if self.segments.is_empty() {
            return Vec::new();
        }
        let closed = self.is_closed_with_epsilon(config.epsilon);
        let n = self.segments.len();
        let mut offset_segments: Vec<Segment> = Vec::with_capacity(n);

        if closed {
            for i in 0..n {
                let prev = &self.segments[(i + n - 1) % n];
                let curr = &self.segments[i];
                let next_idx = (i + 1) % n;
                let next = &self.segments[next_idx];

                let start_vertex = bisected_vertex(prev, curr, d);
                let end_vertex = bisected_vertex(curr, next, d);
                let mut seg = Segment { start: start_vertex, end: end_vertex, ..*curr };
                seg.invalid = curr.left_offset(d).angle_delta(&seg).abs() > FRAC_PI_2;
                offset_segments.push(seg);
            }
        } else {
            for i in 0..n {
                let curr = &self.segments[i];
                let offset_line = curr.left_offset(d);
                let start_vertex = if i == 0 {
                    offset_line.start
                } else {
                    bisected_vertex(&self.segments[i - 1], curr, d)
                };
                let end_vertex = if i == n - 1 {
                    offset_line.end
                } else {
                    bisected_vertex(curr, &self.segments[i + 1], d)
                };
                let mut seg = Segment { start: start_vertex, end: end_vertex, ..*curr };
                seg.invalid = offset_line.angle_delta(&seg).abs() > FRAC_PI_2;
                offset_segments.push(seg);
            }
        }

        prune_invalid_runs(offset_segments, closed, config)
    }

    /// `left_offset(d)` with the sign chosen by winding: clockwise paths (positive
    /// winding area, by this crate's convention) use `-d` so that a positive `d`
    /// always shrinks the enclosed region.
    pub fn inset(&self, d: Real, config: &GeometryConfig) -> Vec<Path> {
        let signed = if self.winding_area() >= 0.0 { -d } else { d };
        self.left_offset(signed, config)
    }

    pub fn translated(&self, dx: Real, dy: Real) -> Path {
        Path {
            segments: self.segments.iter().map(|s| s.translated(dx, dy)).collect(),
            inside: self.inside,
        }
    }

    pub fn scaled_about(&self, center: &Point2, factor: Real) -> Path {
        Path {
            segments: self
                .segments
                .iter()
                .map(|s| s.scaled_about(center, factor))
                .collect(),
            inside: self.inside,
        }
    }

    pub fn rotated_about(&self, center: &Point2, angle: Real) -> Path {
        Path {
            segments: self
                .segments
                .iter()
                .map(|s| s.rotated_about(center, angle))
                .collect(),
            inside: self.inside,
        }
    }
}

fn find_unused(segments: &[Segment]) -> Option<usize> {
    segments.iter().position(|s| !s.consumed)
}

fn compose_on_edge(current: Tag, shared: bool) -> Tag {
    match current {
        Tag::Used | Tag::Outside | Tag::Unshared | Tag::Untagged => {
            if shared {
                Tag::Shared
            } else {
                Tag::Unshared
            }
        }
        Tag::Shared => Tag::Shared,
        Tag::Inside => {
            if shared {
                Tag::Unshared
            } else {
                Tag::Shared
            }
        }
    }
}

fn compose_off_edge(current: Tag, inside: bool) -> Tag {
    if inside {
        match current {
            Tag::Used | Tag::Untagged => Tag::Inside,
            Tag::Inside => Tag::Outside,
            Tag::Outside => Tag::Inside,
            Tag::Shared => Tag::Unshared,
            Tag::Unshared => Tag::Shared,
        }
    } else {
        match current {
            Tag::Used | Tag::Untagged => Tag::Outside,
            other => other,
        }
    }
}

/// The angle-bisector offset vertex shared by `prev`'s end / `curr`'s start,
/// offset perpendicular-left by `d / sin((pi - delta) / 2)` along the bisector.
fn bisected_vertex(prev: &Segment, curr: &Segment, d: Real) -> Point2 {
    let delta = prev.angle_delta(curr);
    let half = (PI - delta) / 2.0;
    let sin_half = half.sin();
    if sin_half.abs() <= Real::EPSILON {
        return curr.left_offset(d).start;
    }
    let magnitude = d / sin_half;
    let bisector_dir = {
        let a = prev.vector().normalized();
        let b = curr.vector().normalized();
        (a + b).normalized().perp()
    };
    curr.start + bisector_dir * magnitude
}

/// Prune runs of `invalid` segments produced by `left_offset`'s bisector method at
/// sharp corners.
///
/// An isolated invalid segment is spliced out by intersecting the extended lines
/// of its two valid neighbours and moving both neighbours' shared ends to that
/// intersection. A run of two or more consecutive invalids has no such natural
/// splice point, so its bracketing valid ends are connected directly and the run
/// is dropped — this is the closed-path completion of the source algorithm's
/// open "case II" TODO (see DESIGN.md).
fn prune_invalid_runs(segments: Vec<Segment>, closed: bool, config: &GeometryConfig) -> Vec<Path> {
    if segments.is_empty() || segments.iter().all(|s| s.invalid) {
        return Vec::new();
    }

    // Identify maximal runs of invalid indices, in original-index space, tolerating
    // a run that wraps across index 0 on a closed path.
    let n = segments.len();
    let mut runs: Vec<(usize, usize)> = Vec::new(); // inclusive [start, end] possibly end < start meaning wrap
    let mut visited = vec![false; n];
    for start in 0..n {
        if !segments[start].invalid || visited[start] {
            continue;
        }
        let mut end = start;
        loop {
            visited[end] = true;
            let next = (end + 1) % n;
            if next == start || !segments[next].invalid {
                break;
            }
            if next == 0 && !closed {
                break;
            }
            end = next;
        }
        runs.push((start, end));
    }

    if runs.is_empty() {
        return vec![Path::from_segments(segments)];
    }

    // An open path cannot wrap; runs touching either boundary have no bracketing
    // neighbour on that side and are simply dropped along with the boundary.
    let mut segs = segments;
    // Process runs back-to-front by start index so earlier removals don't shift
    // later indices we still need.
    runs.sort_by(|a, b| b.0.cmp(&a.0));

    for (start, end) in runs {
        let before = if start == 0 {
            if closed { Some(n - 1) } else { None }
        } else {
            Some(start - 1)
        };
        let after = if end + 1 == n {
            if closed { Some(0) } else { None }
        } else {
            Some(end + 1)
        };

        let run_len = if end >= start { end - start + 1 } else { n - start + end + 1 };

        if run_len == 1 {
            if let (Some(b), Some(a)) = (before, after) {
                if let Intersection::Point(p) =
                    segs[b].intersection_with_extended_line(&segs[a], config.epsilon)
                {
                    segs[b].end = p;
                    segs[a].start = p;
                }
            }
        }
        // run_len >= 2 is bridged directly in the drop pass below.
    }

    // Now drop every segment still marked invalid (and, for multi-length runs,
    // insert the bracketing bridge in its place).
    let mut result = Vec::with_capacity(segs.len());
    let mut i = 0;
    while i < n {
        if !segs[i].invalid {
            result.push(segs[i]);
            i += 1;
            continue;
        }
        let run_start = i;
        let mut run_end = i;
        while run_end + 1 < n && segs[run_end + 1].invalid {
            run_end += 1;
        }
        let run_len = run_end - run_start + 1;
        if run_len >= 2 {
            let before_idx = if run_start == 0 { n - 1 } else { run_start - 1 };
            let after_idx = if run_end + 1 == n { 0 } else { run_end + 1 };
            if before_idx < n && after_idx < n && !segs[before_idx].invalid {
                result.push(Segment {
                    start: segs[before_idx].end,
                    end: segs[after_idx].start,
                    ..segs[run_start]
                });
            }
        }
        i = run_end + 1;
    }

    if result.is_empty() {
        Vec::new()
    } else {
        vec![Path::from_segments(result)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn unit_square_is_closed() {
        let sq = square(0.0, 0.0, 1.0);
        assert!(sq.is_closed());
        assert_eq!(sq.segments.len(), 4);
    }

    #[test]
    fn unit_square_area_is_one() {
        let sq = square(0.0, 0.0, 1.0);
        assert!((sq.area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn assemble_paths_from_segments_reassembles_square() {
        let sq = square(0.0, 0.0, 1.0);
        let mut segs = sq.segments.clone();
        segs.reverse();
        let paths = Path::assemble_paths_from_segments(segs, 1e-9);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].is_closed());
    }

    #[test]
    fn contains_basic_square() {
        let sq = square(0.0, 0.0, 10.0);
        let config = GeometryConfig::default();
        assert!(sq.contains(&Point2::new(5.0, 5.0), &config));
        assert!(!sq.contains(&Point2::new(15.0, 5.0), &config));
    }

    #[test]
    fn union_of_overlapping_squares_has_area_1_5() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(0.5, 0.0, 1.0);
        let config = GeometryConfig::default();
        let result = a.union(&b, &config, None);
        let total_area: Real = result.iter().map(|p| p.area()).sum();
        assert!((total_area - 1.5).abs() < 1e-6, "area was {total_area}");
    }

    #[test]
    fn intersection_of_overlapping_squares_has_area_half() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(0.5, 0.0, 1.0);
        let config = GeometryConfig::default();
        let result = a.intersection(&b, &config, None);
        let total_area: Real = result.iter().map(|p| p.area()).sum();
        assert!((total_area - 0.5).abs() < 1e-6, "area was {total_area}");
    }

    #[test]
    fn union_of_oppositely_wound_squares_has_area_1_5() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(0.5, 0.0, 1.0).reversed();
        let config = GeometryConfig::default();
        let result = a.union(&b, &config, None);
        let total_area: Real = result.iter().map(|p| p.area()).sum();
        assert!((total_area - 1.5).abs() < 1e-6, "area was {total_area}");
    }

    #[test]
    fn intersection_of_oppositely_wound_squares_has_area_half() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(0.5, 0.0, 1.0).reversed();
        let config = GeometryConfig::default();
        let result = a.intersection(&b, &config, None);
        let total_area: Real = result.iter().map(|p| p.area()).sum();
        assert!((total_area - 0.5).abs() < 1e-6, "area was {total_area}");
    }

    #[test]
    fn difference_of_identical_squares_is_empty() {
        let a = square(0.0, 0.0, 1.0);
        let config = GeometryConfig::default();
        let result = a.difference(&a, &config, None);
        let total_area: Real = result.iter().map(|p| p.area()).sum();
        assert!(total_area < 1e-6, "area was {total_area}");
    }

    #[test]
    fn inset_unit_square_by_quarter() {
        let sq = square(0.0, 0.0, 1.0);
        let config = GeometryConfig::default();
        let result = sq.inset(0.25, &config);
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn inset_collapses_when_offset_exceeds_half_width() {
        let sq = square(0.0, 0.0, 1.0);
        let config = GeometryConfig::default();
        let result = sq.inset(0.6, &config);
        assert!(result.is_empty());
    }

    #[test]
    fn simplify_merges_collinear_segments() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.0),
            Point2::new(1.0, 0.0),
        ];
        let mut p = Path::from_points(&pts);
        assert_eq!(p.segments.len(), 2);
        p.simplify(1e-9);
        assert_eq!(p.segments.len(), 1);
    }
}
