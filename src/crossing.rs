//! Polyline crossing queries against the planar projection of a trajectory.
//!
//! Crossings are searched on a dense arc-length ladder, then each bracketed
//! sign change of the line-side function is sharpened by bisection. Results
//! are window-relative arc lengths, ascending, deduplicated.

use crate::trajectory::PointTrajectory;
use crate::types::Point;

/// Bisection stops once the bracketing interval is this narrow.
const REFINE_TOLERANCE: f64 = 1e-9;

/// Two crossings closer than this collapse into one.
const DEDUPE_TOLERANCE: f64 = 1e-6;

/// Largest arc-length gap between successive search samples; curved spans
/// between knots are subdivided down to this resolution.
const SEARCH_STEP: f64 = 0.1;

pub(crate) fn crossings(trajectory: &PointTrajectory, polyline: &[Point]) -> Vec<f64> {
    let mut hits = Vec::new();
    if polyline.len() < 2 {
        return hits;
    }

    let ladder = search_ladder(trajectory);
    let samples: Vec<Point> = ladder.iter().map(|&s| trajectory.compute(s)).collect();

    for i in 0..ladder.len().saturating_sub(1) {
        let (a, b) = (samples[i], samples[i + 1]);
        for segment in polyline.windows(2) {
            let (p, q) = (segment[0], segment[1]);
            let d0 = side(p, q, a);
            let d1 = side(p, q, b);
            // A collinear chord slides along the line instead of crossing it.
            if (d0 == 0.0 && d1 == 0.0) || d0 * d1 > 0.0 {
                continue;
            }
            // The chord straddles the segment's line; the segment must also
            // straddle the chord for the crossing to lie inside both.
            if side(a, b, p) * side(a, b, q) > 0.0 {
                continue;
            }
            hits.push(refine(trajectory, p, q, ladder[i], ladder[i + 1], d0));
        }
    }

    hits.sort_by(f64::total_cmp);
    hits.dedup_by(|b, a| (*b - *a).abs() < DEDUPE_TOLERANCE);
    hits
}

/// Underlying window bases subdivided down to [`SEARCH_STEP`].
fn search_ladder(trajectory: &PointTrajectory) -> Vec<f64> {
    let bases = trajectory.get_underlying_bases();
    let mut out = Vec::new();
    for pair in bases.windows(2) {
        let gap = pair[1] - pair[0];
        let pieces = (gap / SEARCH_STEP).ceil().max(1.0) as usize;
        for k in 0..pieces {
            out.push(pair[0] + gap * k as f64 / pieces as f64);
        }
    }
    if let Some(&last) = bases.last() {
        out.push(last);
    }
    out
}

/// Signed area of the triangle (p, q, r) projected to the x/y plane;
/// its sign says which side of the line through p and q the point r is on.
fn side(p: Point, q: Point, r: Point) -> f64 {
    (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
}

/// Bisect the sign change of the line-side function inside `[lo, hi]`.
fn refine(
    trajectory: &PointTrajectory,
    p: Point,
    q: Point,
    mut lo: f64,
    mut hi: f64,
    mut side_lo: f64,
) -> f64 {
    if side_lo == 0.0 {
        return lo;
    }
    while hi - lo > REFINE_TOLERANCE {
        let mid = 0.5 * (lo + hi);
        let side_mid = side(p, q, trajectory.compute(mid));
        if side_mid == 0.0 {
            return mid;
        }
        if side_mid * side_lo > 0.0 {
            lo = mid;
            side_lo = side_mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
