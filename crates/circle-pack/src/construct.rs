//! Constructions of new circles from existing ones.
//!
//! - [`tangent_circles_of_radius`]: circles of a given radius touching two
//!   circles from outside (where the next circle of a packing can go)
//! - [`circumscribed_of_two`]: smallest circle holding two circles
//! - [`apollonian_circle`]: circle internally tangent to three circles
//!
//! Enclosing constructions return circles inflated by
//! [`THRESHOLD`](crate::precision::THRESHOLD) so the circles they were
//! built from still test as inside after rounding.

use crate::geometry::{distance_of_centers, Circle};
use crate::precision::{round_to, QUADRATIC_EPSILON, THRESHOLD, TRANSLATION_DECIMALS};

/// The two circles of radius `radius` externally tangent to both `a` and `b`.
///
/// Trilateration: the new center is at distance `r_a + radius` from `a` and
/// `r_b + radius` from `b`. Project it onto the line `a`→`b` (signed
/// offset `p` from `a`), get the height `h` above that line from the right
/// triangle, and reflect across the line for the second solution.
///
/// The first circle lies to the left of the direction `a`→`b`, the second
/// to the right. Returns `None` when `a` and `b` are too far apart for a
/// circle of this radius to touch both, or share a center.
pub fn tangent_circles_of_radius(a: &Circle, b: &Circle, radius: f64) -> Option<[Circle; 2]> {
    let centers_distance = distance_of_centers(a, b);
    if centers_distance == 0.0 || centers_distance > a.radius + b.radius + radius * 2.0 {
        return None;
    }

    let to_a = a.radius + radius;
    let to_b = b.radius + radius;

    let along = (to_a * to_a - to_b * to_b + centers_distance * centers_distance)
        / (2.0 * centers_distance);
    let height_squared = to_a * to_a - along * along;
    // Rounding of the center distance can push an exact fit just below zero.
    if height_squared < -THRESHOLD {
        return None;
    }
    let height = height_squared.max(0.0).sqrt();

    let normal = along / centers_distance;
    let perpendicular = height / centers_distance;

    let dx = b.center_x - a.center_x;
    let dy = b.center_y - a.center_y;

    let left = Circle::new(
        a.center_x + normal * dx - perpendicular * dy,
        a.center_y + normal * dy + perpendicular * dx,
        radius,
    );
    let right = Circle::new(
        a.center_x + normal * dx + perpendicular * dy,
        a.center_y + normal * dy - perpendicular * dx,
        radius,
    );

    Some([left, right])
}

/// Smallest circle containing both `a` and `b`, tangent to each from inside.
///
/// Its center lies on the line through both centers and its radius is
/// `(d + r_a + r_b) / 2`, plus the inflation threshold.
pub fn circumscribed_of_two(a: &Circle, b: &Circle) -> Circle {
    let centers_distance = distance_of_centers(a, b);
    if centers_distance == 0.0 {
        // Concentric: the bigger one already holds the other.
        let bigger = if a.radius >= b.radius { a } else { b };
        return bigger.inflated(THRESHOLD);
    }

    let translation = round_to(
        (centers_distance + b.radius - a.radius) / (2.0 * centers_distance),
        TRANSLATION_DECIMALS,
    );
    let radius = (centers_distance + a.radius + b.radius) / 2.0;

    Circle::new(
        a.center_x + translation * (b.center_x - a.center_x),
        a.center_y + translation * (b.center_y - a.center_y),
        radius + THRESHOLD,
    )
}

/// Circle internally tangent to `a`, `b` and `c`, taking the largest radius.
///
/// Solves `|center - center_i| = r - r_i` for the three circles. Subtracting
/// the equations pairwise leaves two linear equations, which give the center
/// as `x = m + n·r`, `y = p + q·r`. Substituting back into the first
/// equation yields a quadratic in `r`.
///
/// The equations only encode tangency; the caller still has to check the
/// result really contains all three circles. Returns `None` when no
/// non-negative real radius exists or no ordering of the triple can be
/// eliminated (e.g. collinear centers).
pub fn apollonian_circle(a: &Circle, b: &Circle, c: &Circle) -> Option<Circle> {
    let (first, line) = elimination_orders(*a, *b, *c)
        .iter()
        .find_map(|order| eliminate(order).map(|line| (order[0], line)))?;

    let CenterLine { m, n, p, q } = line;
    let (x1, y1, r1) = (first.center_x, first.center_y, first.radius);

    let quad_a = n * n + q * q - 1.0;
    let quad_b = 2.0 * m * n - 2.0 * n * x1 + 2.0 * p * q - 2.0 * q * y1 + 2.0 * r1;
    let quad_c = x1 * x1 + m * m - 2.0 * m * x1 + p * p + y1 * y1 - 2.0 * p * y1 - r1 * r1;

    let radius = largest_quadratic_root(quad_a, quad_b, quad_c)?;
    if !radius.is_finite() || radius < 0.0 {
        return None;
    }

    let center_x = m + n * radius;
    let center_y = p + q * radius;
    if !center_x.is_finite() || !center_y.is_finite() {
        return None;
    }

    Some(Circle::new(center_x, center_y, radius + THRESHOLD))
}

/// Center of the Apollonius circle as a function of its radius:
/// `x = m + n·r`, `y = p + q·r`.
struct CenterLine {
    m: f64,
    n: f64,
    p: f64,
    q: f64,
}

/// Run the two eliminations for one ordering of the triple.
///
/// `None` when a divisor is within [`THRESHOLD`] of zero: consecutive
/// circles sharing an x coordinate, or the two difference equations being
/// parallel.
fn eliminate([first, second, third]: &[Circle; 3]) -> Option<CenterLine> {
    let (x1, y1, r1) = (first.center_x, first.center_y, first.radius);
    let (x2, y2, r2) = (second.center_x, second.center_y, second.radius);
    let (x3, y3, r3) = (third.center_x, third.center_y, third.radius);

    if (x2 - x1).abs() < THRESHOLD || (x3 - x2).abs() < THRESHOLD {
        return None;
    }

    // first - second:  u_x·x + u_y·y + u_c = u_r·r
    let u_x = 2.0 * x2 - 2.0 * x1;
    let u_y = 2.0 * y2 - 2.0 * y1;
    let u_c = x1 * x1 - x2 * x2 + y1 * y1 - y2 * y2 - r1 * r1 + r2 * r2;
    let u_r = 2.0 * r2 - 2.0 * r1;

    // second - third
    let v_x = 2.0 * x3 - 2.0 * x2;
    let v_y = 2.0 * y3 - 2.0 * y2;
    let v_c = x2 * x2 - x3 * x3 + y2 * y2 - y3 * y3 - r2 * r2 + r3 * r3;
    let v_r = 2.0 * r3 - 2.0 * r2;

    // Normalise both by their x coefficient and subtract to drop x.
    let u_y_n = u_y / u_x;
    let u_c_n = u_c / u_x;
    let u_r_n = u_r / u_x;

    let w_y = v_y / v_x - u_y_n;
    if w_y.abs() < THRESHOLD {
        return None;
    }
    let w_c = v_c / v_x - u_c_n;
    let w_r = v_r / v_x - u_r_n;

    let p = -w_c / w_y;
    let q = w_r / w_y;
    Some(CenterLine {
        m: -u_y_n * p - u_c_n,
        n: u_r_n - u_y_n * q,
        p,
        q,
    })
}

/// Orderings of a triple to try for elimination, best guess first.
///
/// The guess moves a circle that shares a coordinate with its neighbour out
/// of the middle. When that is not enough (a right angle with axis-parallel
/// legs), every permutation follows.
fn elimination_orders(a: Circle, b: Circle, c: Circle) -> [[Circle; 3]; 7] {
    let (mut first, mut second, mut third) = (a, b, c);
    if (second.center_x - first.center_x).abs() < THRESHOLD
        || (second.center_y - first.center_y).abs() < THRESHOLD
    {
        std::mem::swap(&mut second, &mut third);
    }
    if (second.center_x - third.center_x).abs() < THRESHOLD
        || (second.center_y - third.center_y).abs() < THRESHOLD
    {
        std::mem::swap(&mut second, &mut first);
    }

    [
        [first, second, third],
        [a, b, c],
        [a, c, b],
        [b, a, c],
        [b, c, a],
        [c, a, b],
        [c, b, a],
    ]
}

/// Largest real root of `a·x² + b·x + c = 0`.
///
/// A discriminant within [`QUADRATIC_EPSILON`] of zero yields the double
/// root. `a == 0` falls back to the linear equation; `a == b == 0` and a
/// negative discriminant have no root.
pub fn largest_quadratic_root(a: f64, b: f64, c: f64) -> Option<f64> {
    if a == 0.0 {
        return if b == 0.0 { None } else { Some(-c / b) };
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    if discriminant < QUADRATIC_EPSILON {
        return Some(-b / (2.0 * a));
    }

    let root = discriminant.sqrt();
    Some(((-b + root) / (2.0 * a)).max((-b - root) / (2.0 * a)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-3;

    fn assert_touches(candidate: &Circle, other: &Circle) {
        let d = candidate.center().distance(other.center());
        assert!(
            (d - (candidate.radius + other.radius)).abs() < TOL,
            "{:?} should touch {:?}: distance {} vs radii {}",
            candidate, other, d, candidate.radius + other.radius
        );
    }

    #[test]
    fn tangent_circles_touch_both_parents() {
        let a = Circle::new(0.0, 0.0, 10.0);
        let b = Circle::new(20.0, 0.0, 10.0);
        let [left, right] = tangent_circles_of_radius(&a, &b, 10.0).unwrap();

        assert!((left.center_x - 10.0).abs() < TOL);
        assert!((left.center_y - 300f64.sqrt()).abs() < TOL);
        assert!((right.center_y + 300f64.sqrt()).abs() < TOL);
        for candidate in [left, right] {
            assert_eq!(candidate.radius, 10.0);
            assert_touches(&candidate, &a);
            assert_touches(&candidate, &b);
        }
    }

    #[test]
    fn tangent_circles_with_unequal_parents() {
        let pairs = [
            (Circle::new(0.0, 0.0, 10.0), Circle::new(13.0, 0.0, 3.0), 2.0),
            (Circle::new(5.0, -4.0, 7.0), Circle::new(-6.0, 9.0, 4.0), 3.5),
            (Circle::new(0.0, 0.0, 2.0), Circle::new(0.0, 30.0, 8.0), 12.0),
            // Smaller circle first: the projection lands behind `a`.
            (Circle::new(0.0, 0.0, 1.0), Circle::new(11.0, 0.0, 10.0), 5.0),
        ];
        for (a, b, r) in pairs {
            let candidates = tangent_circles_of_radius(&a, &b, r)
                .unwrap_or_else(|| panic!("expected candidates for {:?} {:?}", a, b));
            for candidate in &candidates {
                assert_touches(candidate, &a);
                assert_touches(candidate, &b);
            }
            assert!(!candidates[0].geometrically_equal(&candidates[1]));
        }
    }

    #[test]
    fn tangent_circles_too_far_apart() {
        let a = Circle::new(0.0, 0.0, 1.0);
        let b = Circle::new(100.0, 0.0, 1.0);
        assert!(tangent_circles_of_radius(&a, &b, 5.0).is_none());
    }

    #[test]
    fn tangent_circles_of_concentric_parents() {
        let a = Circle::new(4.0, 4.0, 1.0);
        let b = Circle::new(4.0, 4.0, 3.0);
        assert!(tangent_circles_of_radius(&a, &b, 2.0).is_none());
    }

    #[test]
    fn tangent_circles_at_exact_reach_coincide() {
        let a = Circle::new(0.0, 0.0, 1.0);
        let b = Circle::new(12.0, 0.0, 1.0);
        let [left, right] = tangent_circles_of_radius(&a, &b, 5.0).unwrap();
        assert!((left.center_x - 6.0).abs() < TOL);
        assert!(left.center_y.abs() < TOL);
        assert!((right.center_x - 6.0).abs() < TOL);
    }

    #[test]
    fn circumscribed_of_equal_circles() {
        let a = Circle::new(0.0, 0.0, 10.0);
        let b = Circle::new(20.0, 0.0, 10.0);
        let outer = circumscribed_of_two(&a, &b);
        assert_eq!(outer.center_x, 10.0);
        assert_eq!(outer.center_y, 0.0);
        assert!((outer.radius - (20.0 + THRESHOLD)).abs() < 1e-12);
        assert!(a.is_inside(&outer));
        assert!(b.is_inside(&outer));
    }

    #[test]
    fn circumscribed_of_unequal_circles_touches_both() {
        let a = Circle::new(0.0, 0.0, 10.0);
        let b = Circle::new(0.0, 15.0, 5.0);
        let outer = circumscribed_of_two(&a, &b);
        // Diameter spans from y=-10 to y=20.
        assert!((outer.radius - (15.0 + THRESHOLD)).abs() < 1e-9);
        assert!((outer.center_y - 5.0).abs() < 1e-4);
        assert!(a.is_inside(&outer));
        assert!(b.is_inside(&outer));
    }

    #[test]
    fn circumscribed_of_concentric_keeps_bigger() {
        let a = Circle::new(1.0, 1.0, 2.0);
        let b = Circle::new(1.0, 1.0, 5.0);
        let outer = circumscribed_of_two(&a, &b);
        assert_eq!(outer.radius, 5.0 + THRESHOLD);
    }

    #[test]
    fn apollonian_of_three_touching_equal_circles() {
        let a = Circle::new(0.0, 0.0, 10.0);
        let b = Circle::new(20.0, 0.0, 10.0);
        let c = Circle::new(10.0, 300f64.sqrt(), 10.0);
        let outer = apollonian_circle(&a, &b, &c).unwrap();

        let expected = 10.0 + 20.0 / 3f64.sqrt();
        assert!((outer.radius - expected).abs() < 1e-2, "radius {}", outer.radius);
        assert!((outer.center_x - 10.0).abs() < 1e-6);
        assert!((outer.center_y - 10.0 / 3f64.sqrt()).abs() < 1e-6);
        for inner in [a, b, c] {
            assert!(inner.is_inside(&outer), "{:?} not inside {:?}", inner, outer);
        }
    }

    #[test]
    fn apollonian_is_order_independent() {
        let a = Circle::new(0.0, 0.0, 10.0);
        let b = Circle::new(20.0, 0.0, 10.0);
        let c = Circle::new(10.0, 300f64.sqrt(), 10.0);
        let reference = apollonian_circle(&a, &b, &c).unwrap();
        for (x, y, z) in [(b, c, a), (c, a, b), (b, a, c)] {
            let other = apollonian_circle(&x, &y, &z).unwrap();
            assert!((other.radius - reference.radius).abs() < 1e-6);
        }
    }

    #[test]
    fn apollonian_with_unequal_radii_is_tangent() {
        let a = Circle::new(0.0, 0.0, 6.0);
        let b = Circle::new(11.0, 1.0, 4.0);
        let c = Circle::new(4.0, 9.0, 3.0);
        let outer = apollonian_circle(&a, &b, &c).unwrap();
        for inner in [a, b, c] {
            let d = outer.center().distance(inner.center());
            let expected = outer.radius - THRESHOLD - inner.radius;
            assert!((d - expected).abs() < 1e-6, "distance {} expected {}", d, expected);
        }
    }

    #[test]
    fn apollonian_of_vertical_line_is_degenerate() {
        let a = Circle::new(0.0, 0.0, 1.0);
        let b = Circle::new(0.0, 2.0, 1.0);
        let c = Circle::new(0.0, 4.0, 1.0);
        assert!(apollonian_circle(&a, &b, &c).is_none());
    }

    #[test]
    fn apollonian_of_right_angle_triple_in_any_order() {
        // b and c sit on the axes through a, so a and c share x and a and
        // b share y.
        let a = Circle::new(0.0, 0.0, 3.0);
        let b = Circle::new(4.0, 0.0, 1.0);
        let c = Circle::new(0.0, 4.0, 1.0);
        let orders = [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]];
        for [x, y, z] in orders {
            let outer = apollonian_circle(&x, &y, &z)
                .unwrap_or_else(|| panic!("no circle for {:?} {:?} {:?}", x, y, z));
            assert!((outer.center_x - 0.8787).abs() < 1e-3, "{:?}", outer);
            assert!((outer.center_y - 0.8787).abs() < 1e-3, "{:?}", outer);
            assert!((outer.radius - 4.2436).abs() < 1e-3, "{:?}", outer);
            for inner in [a, b, c] {
                assert!(inner.is_inside(&outer), "{:?} not inside {:?}", inner, outer);
            }
        }
    }

    #[test]
    fn apollonian_of_horizontal_line_is_degenerate() {
        let a = Circle::new(0.0, 0.0, 1.0);
        let b = Circle::new(2.0, 0.0, 1.0);
        let c = Circle::new(4.0, 0.0, 1.0);
        assert!(apollonian_circle(&a, &b, &c).is_none());
    }

    #[test]
    fn quadratic_cases() {
        assert_eq!(largest_quadratic_root(1.0, -3.0, 2.0), Some(2.0));
        assert_eq!(largest_quadratic_root(-1.0, 3.0, -2.0), Some(2.0));
        assert_eq!(largest_quadratic_root(1.0, -2.0, 1.0), Some(1.0));
        assert_eq!(largest_quadratic_root(1.0, 0.0, 1.0), None);
        assert_eq!(largest_quadratic_root(0.0, 2.0, -4.0), Some(2.0));
        assert_eq!(largest_quadratic_root(0.0, 0.0, 5.0), None);
    }
}
