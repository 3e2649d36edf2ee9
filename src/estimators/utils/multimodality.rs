// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dip-style unimodality check.
//!
//! The empirical CDF is compared with the closest unimodal CDF built from a greatest convex
//! minorant left of a candidate mode and a least concave majorant right of it. The smallest
//! worst-case gap over all candidate modes, halved, is the dip. A sample is flagged when
//! `dip * sqrt(n)` exceeds a critical value.
//!
//! ECDF heights are taken at the midpoint of each jump, so evenly spaced data has a dip of
//! exactly zero. A sample with only two distinct values has no interior ECDF point, so its
//! dip is taken as half the mass of the lighter value, the dip of a two-point law. The
//! statistic is a heuristic and not calibrated to Hartigan's tables.

use log::debug;

use crate::sample::Sample;

/// Default critical value for `dip * sqrt(n)`.
pub const DEFAULT_DIP_CRITICAL: f64 = 0.7;

/// Largest number of ECDF points examined; larger samples are thinned to evenly spaced
/// order statistics.
pub const MAX_DIP_POINTS: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultimodalityDetector {
    critical: f64,
}

impl Default for MultimodalityDetector {
    fn default() -> Self {
        Self {
            critical: DEFAULT_DIP_CRITICAL,
        }
    }
}

impl MultimodalityDetector {
    pub fn with_critical_value(mut self, critical: f64) -> Self {
        self.critical = critical;
        self
    }

    pub fn is_likely_multimodal(&self, sample: &Sample) -> bool {
        let n = sample.len();
        if n < 4 {
            return false;
        }
        let dip = dip_statistic(sample);
        let scaled = dip * (n as f64).sqrt();
        debug!("dip={dip:.5}, dip*sqrt(n)={scaled:.4}, critical={}", self.critical);
        scaled > self.critical
    }
}

#[derive(Debug, Clone, Copy)]
struct Point {
    x: f64,
    y: f64,
}

/// Dip of the sample's ECDF against the closest convex-then-concave CDF.
pub fn dip_statistic(sample: &Sample) -> f64 {
    let sorted = sample.sorted();
    let points = ecdf_points(sorted);
    match points.len() {
        0 | 1 => return 0.0,
        // Two atoms: half the lighter mass
        2 => {
            let first = sorted.partition_point(|&v| v <= sorted[0]) as f64 / sorted.len() as f64;
            return first.min(1.0 - first) / 2.0;
        }
        _ => {}
    }
    let best = (0..points.len())
        .map(|m| {
            let left = &points[..=m];
            let right = &points[m..];
            let below = max_gap(left, &hull(left, Turn::Lower));
            let above = max_gap(right, &hull(right, Turn::Upper));
            below.max(above)
        })
        .fold(f64::INFINITY, f64::min);
    best / 2.0
}

/// One point per distinct value at the midpoint of its ECDF jump, thinned if needed.
fn ecdf_points(sorted: &[f64]) -> Vec<Point> {
    let n = sorted.len() as f64;
    let mut points = Vec::new();
    let mut start = 0;
    while start < sorted.len() {
        let x = sorted[start];
        let end = start + sorted[start..].partition_point(|&v| v <= x);
        points.push(Point {
            x,
            y: (start + end) as f64 / (2.0 * n),
        });
        start = end;
    }

    if points.len() <= MAX_DIP_POINTS {
        return points;
    }
    let last = points.len() - 1;
    (0..MAX_DIP_POINTS)
        .map(|i| points[i * last / (MAX_DIP_POINTS - 1)])
        .collect()
}

#[derive(Clone, Copy, PartialEq)]
enum Turn {
    /// Greatest convex minorant
    Lower,
    /// Least concave majorant
    Upper,
}

#[inline]
fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Monotone-chain hull over points sorted by x.
fn hull(points: &[Point], turn: Turn) -> Vec<Point> {
    let mut stack: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        while stack.len() >= 2 {
            let c = cross(stack[stack.len() - 2], stack[stack.len() - 1], p);
            let pop = match turn {
                Turn::Lower => c <= 0.0,
                Turn::Upper => c >= 0.0,
            };
            if !pop {
                break;
            }
            stack.pop();
        }
        stack.push(p);
    }
    stack
}

/// Largest vertical distance between the points and the piecewise-linear hull.
fn max_gap(points: &[Point], hull: &[Point]) -> f64 {
    if hull.len() < 2 {
        return 0.0;
    }
    let mut seg = 0;
    points
        .iter()
        .map(|p| {
            while seg + 2 < hull.len() && hull[seg + 1].x < p.x {
                seg += 1;
            }
            let (a, b) = (hull[seg], hull[seg + 1]);
            let fitted = if b.x > a.x {
                a.y + (b.y - a.y) * (p.x - a.x) / (b.x - a.x)
            } else {
                a.y
            };
            (p.y - fitted).abs()
        })
        .fold(0.0, f64::max)
}
