//! Segment predicates: orientation and proper crossings.
//!
//! Visibility between two nodes is decided by whether the straight segment
//! joining them *properly* crosses an obstacle edge. A proper crossing is a
//! transversal intersection strictly inside both segments. Touching at an
//! endpoint or vertex and collinear overlap are not crossings, so a node
//! sitting exactly on a coastline vertex still sees its neighbours.
//!
//! # Example
//!
//! ```
//! use cf_planar::{Obstacle, segment_crosses_obstacle};
//! use nalgebra::Point2;
//!
//! let island = Obstacle::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ]);
//!
//! // Straight through the island
//! assert!(segment_crosses_obstacle(
//!     &Point2::new(-5.0, 5.0),
//!     &Point2::new(15.0, 5.0),
//!     &island,
//! ));
//!
//! // Grazing the corner at the origin
//! assert!(!segment_crosses_obstacle(
//!     &Point2::new(-5.0, 5.0),
//!     &Point2::new(5.0, -5.0),
//!     &island,
//! ));
//! ```

use nalgebra::Point2;

use crate::bounds::Bounds;
use crate::polygon::Obstacle;

/// Tolerance below which an orientation determinant counts as zero.
pub const EPSILON: f64 = 1e-9;

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Positive when `c` lies to the left of the directed line `a → b`,
/// negative to the right, zero when the three points are collinear.
///
/// # Example
///
/// ```
/// use cf_planar::orientation;
/// use nalgebra::Point2;
///
/// let a = Point2::new(0.0, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// assert!(orientation(&a, &b, &Point2::new(0.5, 1.0)) > 0.0);
/// assert!(orientation(&a, &b, &Point2::new(0.5, -1.0)) < 0.0);
/// ```
#[must_use]
pub fn orientation(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Checks if `p` lies on the closed segment `a`–`b`, within [`EPSILON`].
#[must_use]
pub fn point_on_segment(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> bool {
    let length = (b - a).norm();
    if length < EPSILON {
        return (p - a).norm() < EPSILON;
    }
    // Perpendicular distance from the supporting line
    if orientation(a, b, p).abs() / length > EPSILON {
        return false;
    }
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

/// Checks if segments `p1`–`p2` and `q1`–`q2` cross properly.
///
/// Requires strictly opposite orientation signs on both segments. Any
/// near-zero determinant (an endpoint touching the other segment, or
/// collinear overlap) is reported as not crossing.
///
/// # Example
///
/// ```
/// use cf_planar::segments_cross_properly;
/// use nalgebra::Point2;
///
/// let p1 = Point2::new(0.0, 0.0);
/// let p2 = Point2::new(2.0, 2.0);
///
/// // An X crossing
/// assert!(segments_cross_properly(&p1, &p2, &Point2::new(0.0, 2.0), &Point2::new(2.0, 0.0)));
///
/// // A T junction touches but does not cross
/// assert!(!segments_cross_properly(&p1, &p2, &Point2::new(1.0, 1.0), &Point2::new(2.0, 0.0)));
/// ```
#[must_use]
pub fn segments_cross_properly(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);

    if [o1, o2, o3, o4].iter().any(|o| o.abs() < EPSILON) {
        return false;
    }

    (o1 > 0.0) != (o2 > 0.0) && (o3 > 0.0) != (o4 > 0.0)
}

/// Checks if the segment `p`–`q` properly crosses any edge of the obstacle.
///
/// A segment that enters and leaves the polygon exclusively through
/// vertices is not reported, matching the touch rule above.
#[must_use]
pub fn segment_crosses_obstacle(p: &Point2<f64>, q: &Point2<f64>, obstacle: &Obstacle) -> bool {
    let span = Bounds::from_corners(*p, *q);
    if !span.intersects(obstacle.bounds()) {
        return false;
    }
    obstacle
        .edges()
        .any(|(a, b)| segments_cross_properly(p, q, a, b))
}

/// Checks if the segment `p`–`q` properly crosses any of the obstacles.
#[must_use]
pub fn segment_crosses_any_obstacle(
    p: &Point2<f64>,
    q: &Point2<f64>,
    obstacles: &[Obstacle],
) -> bool {
    obstacles
        .iter()
        .any(|obstacle| segment_crosses_obstacle(p, q, obstacle))
}
