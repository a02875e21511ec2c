//! Minimal enclosing circle of a set of circles.
//!
//! The classical minimum enclosing circle of a point set is fixed by at
//! most three boundary points. The same holds for radius-weighted circles,
//! so a brute-force search over every pair ([`circumscribed_of_two`]) and
//! every triple ([`apollonian_circle`]) finds it. Each candidate is checked
//! against the whole set, which makes the search O(n⁴) in the worst case.

use crate::construct::{apollonian_circle, circumscribed_of_two};
use crate::geometry::Circle;
use crate::precision::THRESHOLD;
use crate::{PackError, Result};

/// The winning enclosing circle and the circles that define it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnclosingCircle {
    pub circle: Circle,
    /// Indices (into the input slice) of the pair or triple the circle
    /// was built from. A single input circle is its own support.
    pub support: Vec<usize>,
}

/// True when every circle in `circles` lies inside `candidate`.
#[inline]
pub fn encloses_all(candidate: &Circle, circles: &[Circle]) -> bool {
    circles.iter().all(|c| c.is_inside(candidate))
}

/// Find the smallest pair- or triple-generated circle containing all `circles`.
///
/// Pairs `i < j` are tried before the triples `i < j < k` that extend
/// them, in index order; a candidate replaces the current best only when
/// its radius is strictly smaller, so the first one found wins ties.
///
/// A single circle encloses itself (inflated by the threshold). An empty
/// slice is a caller error.
pub fn minimal_enclosing_circle(circles: &[Circle]) -> Result<EnclosingCircle> {
    match circles.len() {
        0 => return Err(PackError::EmptyInput),
        1 => {
            return Ok(EnclosingCircle {
                circle: circles[0].inflated(THRESHOLD),
                support: vec![0],
            });
        }
        _ => {}
    }

    let mut best: Option<EnclosingCircle> = None;
    let mut best_radius = f64::INFINITY;

    for i in 0..circles.len() {
        for j in (i + 1)..circles.len() {
            let candidate = circumscribed_of_two(&circles[i], &circles[j]);
            if candidate.radius < best_radius && encloses_all(&candidate, circles) {
                best_radius = candidate.radius;
                best = Some(EnclosingCircle { circle: candidate, support: vec![i, j] });
            }

            for k in (j + 1)..circles.len() {
                let Some(candidate) = apollonian_circle(&circles[i], &circles[j], &circles[k]) else {
                    continue;
                };
                if candidate.radius < best_radius && encloses_all(&candidate, circles) {
                    best_radius = candidate.radius;
                    best = Some(EnclosingCircle { circle: candidate, support: vec![i, j, k] });
                }
            }
        }
    }

    best.ok_or(PackError::NoEnclosingCircle { count: circles.len() })
}
