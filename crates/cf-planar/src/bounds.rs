//! Axis-aligned bounds in the plane.
//!
//! [`Bounds`] serves two roles: the search box that waypoints must stay
//! inside, and the cached extent of an obstacle ring used to reject
//! containment and crossing queries early.

use nalgebra::{Point2, Vector2};

use crate::PlanarError;

/// An axis-aligned rectangle in the plane.
///
/// Containment is inclusive on every side.
///
/// # Example
///
/// ```
/// use cf_planar::Bounds;
/// use nalgebra::Point2;
///
/// let bounds = Bounds::new(Point2::new(0.0, 0.0), Point2::new(1280.0, 720.0));
/// assert!(bounds.contains(&Point2::new(640.0, 360.0)));
/// assert!(!bounds.contains(&Point2::new(-1.0, 360.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Minimum corner.
    pub min: Point2<f64>,
    /// Maximum corner.
    pub max: Point2<f64>,
}

impl Bounds {
    /// Creates bounds from a minimum and a maximum corner, as given.
    ///
    /// The corners are not reordered, so swapped input is reported by
    /// [`Bounds::validate`] instead of being silently fixed.
    #[must_use]
    pub const fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self { min, max }
    }

    /// Creates bounds spanning two arbitrary corners.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_planar::Bounds;
    /// use nalgebra::Point2;
    ///
    /// let bounds = Bounds::from_corners(Point2::new(5.0, 0.0), Point2::new(0.0, 5.0));
    /// assert_eq!(bounds.min, Point2::new(0.0, 0.0));
    /// assert_eq!(bounds.max, Point2::new(5.0, 5.0));
    /// ```
    #[must_use]
    pub fn from_corners(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Returns the tightest bounds around a set of points, or `None` if empty.
    #[must_use]
    pub fn enclosing(points: &[Point2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(*first, *first);
        for p in &points[1..] {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Checks that both corners are finite and `min < max` on both axes.
    ///
    /// # Errors
    ///
    /// Returns [`PlanarError::InvalidBounds`] otherwise.
    pub fn validate(&self) -> Result<(), PlanarError> {
        let finite = self.min.iter().all(|v| v.is_finite())
            && self.max.iter().all(|v| v.is_finite());
        if finite && self.min.x < self.max.x && self.min.y < self.max.y {
            Ok(())
        } else {
            Err(PlanarError::InvalidBounds {
                min: [self.min.x, self.min.y],
                max: [self.max.x, self.max.y],
            })
        }
    }

    /// Checks if a point lies inside the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Checks if two bounds overlap (touching counts as overlapping).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns the nearest point inside the bounds.
    #[must_use]
    pub fn clamp(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Returns the width and height.
    #[must_use]
    pub fn extent(&self) -> Vector2<f64> {
        self.max - self.min
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            f64::midpoint(self.min.x, self.max.x),
            f64::midpoint(self.min.y, self.max.y),
        )
    }

    /// Returns the bounds grown by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vector2::new(margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point2::origin(), Point2::origin())
    }
}
