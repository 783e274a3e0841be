//! Obstacle polygons and point containment.
//!
//! An [`Obstacle`] is a closed ring of vertices describing a landmass
//! boundary. The ring is implicitly closed: the last vertex connects back to
//! the first, so it should not be repeated.
//!
//! Containment uses the even-odd (ray casting) rule. Points lying exactly on
//! the boundary are reported as outside, so a waypoint placed on a coastline
//! is treated as water.
//!
//! # Example
//!
//! ```
//! use cf_planar::{Obstacle, point_in_obstacle, point_on_any_land};
//! use nalgebra::Point2;
//!
//! let island = Obstacle::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(5.0, 8.0),
//! ]);
//!
//! assert!(point_in_obstacle(&Point2::new(5.0, 3.0), &island));
//! assert!(!point_in_obstacle(&Point2::new(5.0, 0.0), &island)); // on the shore
//! assert!(!point_on_any_land(&Point2::new(20.0, 3.0), &[island]));
//! ```

use nalgebra::Point2;

use crate::PlanarError;
use crate::bounds::Bounds;
use crate::segment::point_on_segment;

/// A closed polygon ring representing a landmass.
///
/// The axis-aligned bounds of the ring are computed once at construction and
/// used to reject most queries without touching the edges.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Point2<f64>>", into = "Vec<Point2<f64>>")
)]
pub struct Obstacle {
    ring: Vec<Point2<f64>>,
    bounds: Bounds,
}

impl Obstacle {
    /// Creates an obstacle from a ring of vertices without validation.
    ///
    /// Rings with fewer than three vertices contain no points, but their
    /// edges still block crossings.
    #[must_use]
    pub fn new(ring: Vec<Point2<f64>>) -> Self {
        let bounds = Bounds::enclosing(&ring).unwrap_or_default();
        Self { ring, bounds }
    }

    /// Creates an obstacle, rejecting degenerate rings.
    ///
    /// # Errors
    ///
    /// - [`PlanarError::DegenerateRing`] if the ring has fewer than 3 vertices
    /// - [`PlanarError::NonFiniteVertex`] if any coordinate is NaN or infinite
    ///
    /// # Example
    ///
    /// ```
    /// use cf_planar::{Obstacle, PlanarError};
    /// use nalgebra::Point2;
    ///
    /// let sliver = Obstacle::try_new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
    /// assert!(matches!(sliver, Err(PlanarError::DegenerateRing(2))));
    /// ```
    pub fn try_new(ring: Vec<Point2<f64>>) -> Result<Self, PlanarError> {
        if ring.len() < 3 {
            return Err(PlanarError::DegenerateRing(ring.len()));
        }
        if let Some(index) = ring
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(PlanarError::NonFiniteVertex { index });
        }
        Ok(Self::new(ring))
    }

    /// Checks the ring the same way [`Obstacle::try_new`] does.
    ///
    /// # Errors
    ///
    /// See [`Obstacle::try_new`].
    pub fn validate(&self) -> Result<(), PlanarError> {
        Self::try_new(self.ring.clone()).map(|_| ())
    }

    /// Returns the ring vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.ring
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` if the ring has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns the cached bounds of the ring.
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Iterates over the ring edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> {
        let n = self.ring.len();
        (0..n).map(move |i| (&self.ring[i], &self.ring[(i + 1) % n]))
    }

    /// Signed area (shoelace formula); positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            * 0.5
    }

    /// Checks if the point lies strictly inside the ring.
    #[must_use]
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point_in_obstacle(point, self)
    }

    /// Checks if the point lies on any edge of the ring.
    #[must_use]
    pub fn on_boundary(&self, point: &Point2<f64>) -> bool {
        self.edges().any(|(a, b)| point_on_segment(point, a, b))
    }
}

impl TryFrom<Vec<Point2<f64>>> for Obstacle {
    type Error = PlanarError;

    fn try_from(ring: Vec<Point2<f64>>) -> Result<Self, Self::Error> {
        Self::try_new(ring)
    }
}

impl From<Obstacle> for Vec<Point2<f64>> {
    fn from(obstacle: Obstacle) -> Self {
        obstacle.ring
    }
}

/// Ray-casting parity test.
///
/// Casts a ray towards +x and counts edge crossings using half-open
/// intervals in y, so a vertex shared by two edges is never counted twice.
/// Boundary points are reported as outside.
#[must_use]
pub fn point_in_obstacle(point: &Point2<f64>, obstacle: &Obstacle) -> bool {
    let ring = obstacle.vertices();
    if ring.len() < 3 || !obstacle.bounds().contains(point) {
        return false;
    }
    if obstacle.on_boundary(point) {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (&ring[i], &ring[j]);
        if (a.y > point.y) != (b.y > point.y) {
            // a.y != b.y here, so the division is safe
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Checks if any obstacle contains the point.
#[must_use]
pub fn point_on_any_land(point: &Point2<f64>, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| point_in_obstacle(point, o))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Obstacle {
        Obstacle::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
    }

    /// A "C" shape opening to the right.
    fn notch() -> Obstacle {
        Obstacle::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 3.0),
            Point2::new(3.0, 3.0),
            Point2::new(3.0, 7.0),
            Point2::new(10.0, 7.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
    }

    #[test]
    fn test_inside_and_outside() {
        let s = square();
        assert!(point_in_obstacle(&Point2::new(5.0, 5.0), &s));
        assert!(!point_in_obstacle(&Point2::new(15.0, 5.0), &s));
        assert!(!point_in_obstacle(&Point2::new(-0.1, 5.0), &s));
    }

    #[test]
    fn test_boundary_is_outside() {
        let s = square();
        assert!(!point_in_obstacle(&Point2::new(0.0, 5.0), &s));
        assert!(!point_in_obstacle(&Point2::new(5.0, 10.0), &s));
        assert!(!point_in_obstacle(&Point2::new(10.0, 10.0), &s));
        assert!(s.on_boundary(&Point2::new(10.0, 3.0)));
    }

    #[test]
    fn test_concave_notch() {
        let c = notch();
        assert!(point_in_obstacle(&Point2::new(1.5, 5.0), &c));
        assert!(!point_in_obstacle(&Point2::new(6.0, 5.0), &c));
        assert!(point_in_obstacle(&Point2::new(6.0, 1.5), &c));
    }

    #[test]
    fn test_ray_through_vertex_counts_once() {
        // Ray at y = 5 from the left passes the apex of this diamond
        let diamond = Obstacle::new(vec![
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(5.0, 10.0),
            Point2::new(0.0, 5.0),
        ]);
        assert!(point_in_obstacle(&Point2::new(5.0, 5.0), &diamond));
        assert!(!point_in_obstacle(&Point2::new(-1.0, 5.0), &diamond));
    }

    #[test]
    fn test_degenerate_ring_contains_nothing() {
        let line = Obstacle::new(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)]);
        assert!(!point_in_obstacle(&Point2::new(5.0, 5.0), &line));
        let empty = Obstacle::new(Vec::new());
        assert!(empty.is_empty());
        assert!(!point_in_obstacle(&Point2::new(0.0, 0.0), &empty));
    }

    #[test]
    fn test_try_new_rejects_non_finite() {
        let result = Obstacle::try_new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(f64::INFINITY, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        assert_eq!(result, Err(PlanarError::NonFiniteVertex { index: 1 }));
        assert!(square().validate().is_ok());
    }

    #[test]
    fn test_point_on_any_land() {
        let far = Obstacle::new(vec![
            Point2::new(100.0, 100.0),
            Point2::new(110.0, 100.0),
            Point2::new(105.0, 110.0),
        ]);
        let obstacles = vec![square(), far];
        assert!(point_on_any_land(&Point2::new(5.0, 5.0), &obstacles));
        assert!(point_on_any_land(&Point2::new(105.0, 103.0), &obstacles));
        assert!(!point_on_any_land(&Point2::new(50.0, 50.0), &obstacles));
        assert!(!point_on_any_land(&Point2::new(5.0, 5.0), &[]));
    }

    #[test]
    fn test_edges_close_the_ring() {
        let s = square();
        let edges: Vec<_> = s.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(*edges[3].0, Point2::new(0.0, 10.0));
        assert_eq!(*edges[3].1, Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_signed_area() {
        assert_relative_eq!(square().signed_area(), 100.0);
        let mut reversed = square().vertices().to_vec();
        reversed.reverse();
        assert_relative_eq!(Obstacle::new(reversed).signed_area(), -100.0);
    }

    #[test]
    fn test_cached_bounds() {
        let s = notch();
        assert_eq!(s.bounds().min, Point2::new(0.0, 0.0));
        assert_eq!(s.bounds().max, Point2::new(10.0, 10.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_recomputes_bounds() {
        let json = serde_json::to_string(&square()).unwrap();
        let parsed: Obstacle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, square());

        let bad: Result<Obstacle, _> = serde_json::from_str("[[0.0, 0.0], [1.0, 1.0]]");
        assert!(bad.is_err());
    }
}
