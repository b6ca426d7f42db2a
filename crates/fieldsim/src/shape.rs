//! Geometric regions for scoping fields and describing body footprints
//!
//! A [`Shape`] is a pure predicate over the plane: it answers whether a
//! point lies inside it. Shapes are templates defined in their own local
//! frame; the anchor passed to [`Shape::contains`] places the template in
//! world space, so one shape can be reused at several positions.

use nalgebra::Point2;

use crate::error::{Result, SimError};

/// An axis-aligned rectangle in world coordinates.
///
/// Used as a quick reject before the exact polygon test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner (bottom-left)
    pub min: Point2<f64>,
    /// Maximum corner (top-right)
    pub max: Point2<f64>,
}

impl BoundingBox {
    /// Creates the smallest bounding box enclosing every point.
    ///
    /// An empty slice yields an inverted box that contains nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldsim::shape::BoundingBox;
    /// use nalgebra::Point2;
    ///
    /// let bounds = BoundingBox::from_points(&[
    ///     Point2::new(-2.0, -1.0),
    ///     Point2::new(3.0, 4.0),
    /// ]);
    ///
    /// assert_eq!(bounds.min, Point2::new(-2.0, -1.0));
    /// assert_eq!(bounds.max, Point2::new(3.0, 4.0));
    /// ```
    pub fn from_points(points: &[Point2<f64>]) -> Self {
        points.iter().fold(
            Self {
                min: Point2::new(f64::INFINITY, f64::INFINITY),
                max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            },
            |bounds, p| Self {
                min: Point2::new(bounds.min.x.min(p.x), bounds.min.y.min(p.y)),
                max: Point2::new(bounds.max.x.max(p.x), bounds.max.y.max(p.y)),
            },
        )
    }

    /// Returns true if the point lies inside or on the edge of the box
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns the center point of the bounding box
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

/// A disk given by its center and radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    center: Point2<f64>,
    radius: f64,
}

impl Circle {
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Closed-disk test: a point exactly on the rim is inside
    fn contains_local(&self, point: &Point2<f64>) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }
}

/// A closed polygon given by its ordered vertices
///
/// The vertex list is always stored closed: the last vertex repeats the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2<f64>>,
    bounds: BoundingBox,
}

impl Polygon {
    /// Vertices of the closed boundary, first vertex repeated at the end
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Crossing-number test.
    ///
    /// Casts a ray towards +x and counts the edges it crosses, using the
    /// exact x-intersection of each edge at the query height. Each edge is
    /// treated as half-open in y so a ray through a shared vertex is counted
    /// exactly once.
    fn contains_local(&self, point: &Point2<f64>) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }

        let crossings = self
            .vertices
            .windows(2)
            .filter(|edge| {
                let (a, b) = (edge[0], edge[1]);
                (a.y > point.y) != (b.y > point.y)
                    && point.x < a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y)
            })
            .count();

        crossings % 2 == 1
    }
}

/// A 2D region used purely as a point-in-region predicate
///
/// # Examples
///
/// ```
/// use fieldsim::shape::Shape;
/// use nalgebra::Point2;
///
/// let disk = Shape::circle(Point2::origin(), 5.0).unwrap();
///
/// assert!(disk.contains_point(&Point2::new(3.0, 4.0)));
/// assert!(!disk.contains_point(&Point2::new(10.0, 0.0)));
///
/// // The same template anchored elsewhere
/// let anchor = Point2::new(10.0, 0.0);
/// assert!(disk.contains(&Point2::new(10.0, 0.0), &anchor));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    /// Creates a circle; the radius must be finite and strictly positive
    pub fn circle(center: Point2<f64>, radius: f64) -> Result<Self> {
        if !(center.x.is_finite() && center.y.is_finite()) {
            return Err(SimError::InvalidGeometry(format!(
                "circle center must be finite, got ({}, {})",
                center.x, center.y
            )));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidGeometry(format!(
                "circle radius must be positive, got {radius}"
            )));
        }

        Ok(Shape::Circle(Circle { center, radius }))
    }

    /// Creates a polygon from an ordered vertex list.
    ///
    /// The boundary is closed automatically when the last vertex does not
    /// already repeat the first. At least two vertices are required.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldsim::shape::Shape;
    /// use nalgebra::Point2;
    ///
    /// let square = Shape::polygon(vec![
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(4.0, 0.0),
    ///     Point2::new(4.0, 4.0),
    ///     Point2::new(0.0, 4.0),
    /// ])
    /// .unwrap();
    ///
    /// assert!(square.contains_point(&Point2::new(2.0, 2.0)));
    /// assert!(Shape::polygon(vec![Point2::new(0.0, 0.0)]).is_err());
    /// ```
    pub fn polygon(mut vertices: Vec<Point2<f64>>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(SimError::InvalidGeometry(format!(
                "polygon needs at least 2 vertices, got {}",
                vertices.len()
            )));
        }
        if vertices.iter().any(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(SimError::InvalidGeometry(
                "polygon vertices must be finite".to_string(),
            ));
        }

        if vertices.first() != vertices.last() {
            vertices.push(vertices[0]);
        }
        let bounds = BoundingBox::from_points(&vertices);

        Ok(Shape::Polygon(Polygon { vertices, bounds }))
    }

    /// Returns true if `point`, expressed in world space, lies inside the
    /// shape placed at `anchor`.
    ///
    /// The point is translated by `-anchor` into the shape's local frame
    /// before testing.
    pub fn contains(&self, point: &Point2<f64>, anchor: &Point2<f64>) -> bool {
        let local = point - anchor.coords;
        match self {
            Shape::Circle(circle) => circle.contains_local(&local),
            Shape::Polygon(polygon) => polygon.contains_local(&local),
        }
    }

    /// Containment with the shape left at its own origin
    pub fn contains_point(&self, point: &Point2<f64>) -> bool {
        self.contains(point, &Point2::origin())
    }

    /// Local-frame bounding box of the shape
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Circle(circle) => BoundingBox {
                min: circle.center - nalgebra::Vector2::repeat(circle.radius),
                max: circle.center + nalgebra::Vector2::repeat(circle.radius),
            },
            Shape::Polygon(polygon) => polygon.bounds,
        }
    }
}
