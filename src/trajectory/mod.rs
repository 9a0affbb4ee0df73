//! Layered arc-length trajectories: position, orientation, kinematics.
//!
//! Each layer composes the one below it and forwards its query surface;
//! all layers share one ordered basis set owned by the position layer.

mod path_point;
mod point;
mod pose;

pub use path_point::{ChannelMut, PathPointTrajectory, PathPointTrajectoryBuilder, RangeMut};
pub use point::{PointTrajectory, PointTrajectoryBuilder};
pub use pose::{PoseTrajectory, PoseTrajectoryBuilder};

use crate::types::BASE_EPS;

/// Insert every value of `new` into the sorted, deduplicated basis set.
pub(crate) fn merge_bases(bases: &mut Vec<f64>, new: &[f64]) {
    for &s in new {
        if let Err(idx) = bases.binary_search_by(|b| b.total_cmp(&s)) {
            let duplicate = (idx > 0 && (s - bases[idx - 1]).abs() <= BASE_EPS)
                || (idx < bases.len() && (bases[idx] - s).abs() <= BASE_EPS);
            if !duplicate {
                bases.insert(idx, s);
            }
        }
    }
}

/// Bases restricted to `[start, end]`, with both window endpoints pinned
/// exactly.
pub(crate) fn crop_bases(bases: &[f64], start: f64, end: f64) -> Vec<f64> {
    let mut out = vec![start];
    for &s in bases {
        if s > start + BASE_EPS && s < end - BASE_EPS {
            out.push(s);
        }
    }
    if end > start + BASE_EPS {
        out.push(end);
    }
    out
}

/// Subdivide the gaps of `bases` evenly until at least `min_points` samples
/// exist. Existing bases are always kept.
pub(crate) fn fill_bases(bases: &[f64], min_points: usize) -> Vec<f64> {
    if bases.len() >= min_points || bases.len() < 2 {
        return bases.to_vec();
    }
    let gaps = bases.len() - 1;
    let to_add = min_points - bases.len();
    let per_gap = to_add / gaps;
    let remainder = to_add % gaps;

    let mut out = Vec::with_capacity(min_points);
    for i in 0..gaps {
        let extra = per_gap + usize::from(i < remainder);
        out.push(bases[i]);
        let step = (bases[i + 1] - bases[i]) / (extra + 1) as f64;
        for k in 1..=extra {
            out.push(bases[i] + step * k as f64);
        }
    }
    out.push(bases[gaps]);
    out
}

/// Ascending ladder from `start` to `end` with step `tick`. A tick landing
/// on `end` (within float noise) is always part of the ladder; the
/// `end_inclusive` flag additionally forces an off-grid `end` to be appended
/// exactly once.
pub(crate) fn arange(start: f64, end: f64, tick: f64, end_inclusive: bool) -> Vec<f64> {
    let mut ss = Vec::new();
    if end < start || tick <= 0.0 {
        return ss;
    }
    let mut i = 0usize;
    loop {
        let s = start + tick * i as f64;
        if s > end + BASE_EPS {
            break;
        }
        ss.push(s.min(end));
        i += 1;
    }
    if end_inclusive && ss.last().is_none_or(|&last| end - last > BASE_EPS) {
        ss.push(end);
    }
    ss
}

/// Shared restore driver: sample at `underlying` (densified to `min_points`),
/// dropping consecutive samples the caller considers identical; when dedupe
/// leaves fewer than `min_points`, refill the surviving bases once more.
/// Best-effort: the second pass is returned as-is.
pub(crate) fn restore_with<T>(
    underlying: &[f64],
    min_points: usize,
    compute: impl Fn(f64) -> T,
    almost_same: impl Fn(&T, &T) -> bool,
) -> Vec<T> {
    let bases = fill_bases(underlying, min_points);
    let mut sanitized = Vec::with_capacity(bases.len());
    let mut out: Vec<T> = Vec::with_capacity(bases.len());
    for &s in &bases {
        let sample = compute(s);
        if out.last().is_none_or(|prev| !almost_same(prev, &sample)) {
            out.push(sample);
            sanitized.push(s);
        }
    }
    if out.len() >= min_points {
        return out;
    }

    let bases = fill_bases(&sanitized, min_points);
    let mut out: Vec<T> = Vec::with_capacity(bases.len());
    for &s in &bases {
        let sample = compute(s);
        if out.last().is_none_or(|prev| !almost_same(prev, &sample)) {
            out.push(sample);
        }
    }
    out
}
