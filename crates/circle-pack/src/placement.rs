//! Greedy placement of circles from a list of radii.
//!
//! Both strategies seed the arrangement the same way (first circle at the
//! origin, second touching it on the positive x axis) and then place every
//! further radius on a circle tangent to two already placed ones.
//! Placements are never revisited.
//!
//! ## Strategies
//!
//! - **Greedy**: first non-overlapping candidate wins. Cheap per step; the
//!   enclosing circle is computed once, at the end.
//! - **Holding enclosing**: prefer candidates that fit inside the current
//!   enclosing circle and hug its boundary; only grow (and recompute) the
//!   enclosing circle when nothing fits. Usually gives a tighter result.
//!
//! Radii are expected sorted descending by the caller. A radius for which
//! no candidate exists is reported in [`Placement::unplaced`].

use std::time::{Duration, Instant};

use crate::construct::tangent_circles_of_radius;
use crate::enclosing::{minimal_enclosing_circle, EnclosingCircle};
use crate::geometry::Circle;
use crate::{PackError, Result};

/// A radius the strategy found no position for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unplaced {
    /// Position in the input radius list.
    pub index: usize,
    pub radius: f64,
}

/// Cost of the enclosing-circle searches done during one placement run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlacementStats {
    pub enclosing_computations: usize,
    pub enclosing_duration: Duration,
}

impl PlacementStats {
    pub fn enclosing_millis(&self) -> f64 {
        self.enclosing_duration.as_secs_f64() * 1000.0
    }
}

/// Result of one placement run.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Placed circles, in placement order.
    pub circles: Vec<Circle>,
    /// Minimal enclosing circle of `circles`.
    pub enclosing: EnclosingCircle,
    /// Radii that could not be placed, in input order.
    pub unplaced: Vec<Unplaced>,
    pub stats: PlacementStats,
}

impl Placement {
    /// Placed circles followed by the enclosing circle.
    pub fn arrangement(&self) -> Vec<Circle> {
        let mut arrangement = Vec::with_capacity(self.circles.len() + 1);
        arrangement.extend_from_slice(&self.circles);
        arrangement.push(self.enclosing.circle);
        arrangement
    }

    /// Ratio of the theoretical lower bound to the achieved enclosing
    /// radius. 1.0 would be a perfect (and impossible) packing.
    pub fn optimality(&self) -> f64 {
        optimal_enclosing_radius(&self.circles) / self.enclosing.circle.radius
    }
}

/// Placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// First valid tangent position, enclosing circle computed at the end
    #[default]
    Greedy,
    /// Keep circles inside the tracked enclosing circle where possible
    HoldingEnclosing,
}

impl Strategy {
    /// Get strategy name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::HoldingEnclosing => "holding",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Greedy => "first non-overlapping tangent position wins",
            Strategy::HoldingEnclosing => "stay inside the current enclosing circle, grow it only when needed",
        }
    }

    /// Parse strategy from string.
    pub fn from_name(name: &str) -> Option<Strategy> {
        match name.to_lowercase().as_str() {
            "greedy" | "a" | "1" => Some(Strategy::Greedy),
            "holding" | "enclosing" | "holding-enclosing" | "b" | "2" => Some(Strategy::HoldingEnclosing),
            _ => None,
        }
    }

    /// All available strategies.
    pub fn all() -> &'static [Strategy] {
        &[Strategy::Greedy, Strategy::HoldingEnclosing]
    }

    /// Run this strategy on `radii`.
    pub fn place(&self, radii: &[f64]) -> Result<Placement> {
        match self {
            Strategy::Greedy => place_greedy(radii),
            Strategy::HoldingEnclosing => place_holding_enclosing(radii),
        }
    }
}

/// Lower bound for the enclosing radius of non-overlapping circles:
/// the radius of one disc with their total area, `sqrt(Σ r²)`.
pub fn optimal_enclosing_radius(circles: &[Circle]) -> f64 {
    circles.iter().map(|c| c.radius * c.radius).sum::<f64>().sqrt()
}

/// True when `candidate` neither crosses nor sits inside any placed circle.
pub fn is_placeable(candidate: &Circle, placed: &[Circle]) -> bool {
    !placed
        .iter()
        .any(|circle| candidate.intersection(circle).overlaps() || candidate.is_inside(circle))
}

/// Strategy A: place each radius at the first valid tangent position.
///
/// Pairs `(j, k)` with `j < k` are scanned in order, the left candidate
/// before the right one.
pub fn place_greedy(radii: &[f64]) -> Result<Placement> {
    validate_radii(radii)?;

    let mut tracker = EnclosingTracker::default();
    let mut placed = seed(radii);
    let mut unplaced = Vec::new();

    for (index, &radius) in radii.iter().enumerate().skip(2) {
        let found = tangent_candidates(&placed, radius).find(|c| is_placeable(c, &placed));
        match found {
            Some(circle) => placed.push(circle),
            None => unplaced.push(Unplaced { index, radius }),
        }
    }

    let enclosing = tracker.compute(&placed)?;
    Ok(Placement {
        circles: placed,
        enclosing,
        unplaced,
        stats: tracker.stats,
    })
}

/// Strategy B: place each radius as close to the tracked enclosing
/// boundary as possible, preferring positions inside it.
///
/// Every valid candidate is classified as good (inside the current
/// enclosing circle) or bad. The enclosing circle is recomputed only after
/// a bad candidate had to be taken.
pub fn place_holding_enclosing(radii: &[f64]) -> Result<Placement> {
    validate_radii(radii)?;

    let mut tracker = EnclosingTracker::default();
    let mut placed = seed(radii);
    let mut unplaced = Vec::new();
    let mut enclosing = tracker.compute(&placed)?;

    for (index, &radius) in radii.iter().enumerate().skip(2) {
        let bound = enclosing.circle;
        let mut good = Vec::new();
        let mut bad = Vec::new();

        for candidate in tangent_candidates(&placed, radius) {
            if !is_placeable(&candidate, &placed) {
                continue;
            }
            if candidate.is_inside(&bound) {
                good.push(candidate);
            } else {
                bad.push(candidate);
            }
        }

        if let Some(circle) = closest_to_boundary(&good, &bound) {
            placed.push(circle);
        } else if let Some(circle) = closest_to_boundary(&bad, &bound) {
            placed.push(circle);
            enclosing = tracker.compute(&placed)?;
        } else {
            unplaced.push(Unplaced { index, radius });
        }
    }

    Ok(Placement {
        circles: placed,
        enclosing,
        unplaced,
        stats: tracker.stats,
    })
}

fn validate_radii(radii: &[f64]) -> Result<()> {
    if radii.is_empty() {
        return Err(PackError::EmptyInput);
    }
    match radii.iter().position(|r| !(r.is_finite() && *r > 0.0)) {
        Some(index) => Err(PackError::InvalidRadius { index, radius: radii[index] }),
        None => Ok(()),
    }
}

/// First circle at the origin, second touching it on the x axis.
fn seed(radii: &[f64]) -> Vec<Circle> {
    let mut placed = Vec::with_capacity(radii.len());
    placed.push(Circle::at_origin(radii[0]));
    if let Some(&second) = radii.get(1) {
        placed.push(Circle::new(radii[0] + second, 0.0, second));
    }
    placed
}

/// Tangent candidates for every pair `(j, k)`, `j < k`, left before right.
fn tangent_candidates(placed: &[Circle], radius: f64) -> impl Iterator<Item = Circle> + '_ {
    (0..placed.len())
        .flat_map(move |j| ((j + 1)..placed.len()).map(move |k| (j, k)))
        .filter_map(move |(j, k)| tangent_circles_of_radius(&placed[j], &placed[k], radius))
        .flatten()
}

/// Candidate whose far edge `distance(candidate, bound) + radius` is
/// smallest; the earliest one wins ties.
fn closest_to_boundary(candidates: &[Circle], bound: &Circle) -> Option<Circle> {
    let mut best: Option<(f64, Circle)> = None;
    for candidate in candidates {
        let reach = candidate.distance_to(bound) + candidate.radius;
        if best.is_none_or(|(best_reach, _)| reach < best_reach) {
            best = Some((reach, *candidate));
        }
    }
    best.map(|(_, circle)| circle)
}

/// Times and counts enclosing-circle searches for one placement run.
#[derive(Default)]
struct EnclosingTracker {
    stats: PlacementStats,
}

impl EnclosingTracker {
    fn compute(&mut self, circles: &[Circle]) -> Result<EnclosingCircle> {
        let start = Instant::now();
        let enclosing = minimal_enclosing_circle(circles);
        self.stats.enclosing_duration += start.elapsed();
        self.stats.enclosing_computations += 1;
        enclosing
    }
}
