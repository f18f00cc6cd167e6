use crate::Point;

/// Axis-aligned bounding box in 3D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Computes the bounds of all `points`.
    ///
    /// Points are processed in pairs: the two are compared against each other first, so
    /// only the smaller one is tested against `min` and only the larger against `max`.
    /// That is 3 comparisons per pair and axis instead of 4.
    ///
    /// An empty slice yields an inverted box (`min = +inf`, `max = -inf`).
    pub fn from_points(points: &[Point]) -> Self {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        let even = points.len() & !1;

        for pair in points[..even].chunks_exact(2) {
            let (a, b) = (&pair[0], &pair[1]);
            for axis in 0..3 {
                let (lo, hi) = if a[axis] > b[axis] { (b[axis], a[axis]) } else { (a[axis], b[axis]) };
                if lo < min[axis] { min[axis] = lo; }
                if hi > max[axis] { max[axis] = hi; }
            }
        }

        // odd length: last element on its own
        if even != points.len() {
            let p = &points[even];
            for axis in 0..3 {
                if p[axis] < min[axis] { min[axis] = p[axis]; }
                if p[axis] > max[axis] { max[axis] = p[axis]; }
            }
        }

        Self { min, max }
    }

    /// Extent along each axis.
    pub fn size(&self) -> Point {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Axis with the largest extent. Ties go to the lower axis.
    pub fn largest_axis(&self) -> usize {
        let size = self.size();
        let mut axis = 0;
        if size[axis] < size[1] { axis = 1; }
        if size[axis] < size[2] { axis = 2; }
        axis
    }

    /// The point of the box closest to `p` (`p` itself if it is inside).
    #[inline]
    pub fn closest_point(&self, p: &Point) -> Point {
        [
            p[0].clamp(self.min[0], self.max[0]),
            p[1].clamp(self.min[1], self.max[1]),
            p[2].clamp(self.min[2], self.max[2]),
        ]
    }

    /// Squared distance from `p` to the box, zero when inside.
    #[inline]
    pub fn distance_sq(&self, p: &Point) -> f64 {
        let dx = (self.min[0] - p[0]).max(0.0).max(p[0] - self.max[0]);
        let dy = (self.min[1] - p[1]).max(0.0).max(p[1] - self.max[1]);
        let dz = (self.min[2] - p[2]).max(0.0).max(p[2] - self.max[2]);
        dx * dx + dy * dy + dz * dz
    }

    pub fn contains(&self, p: &Point) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] &&
        p[1] >= self.min[1] && p[1] <= self.max[1] &&
        p[2] >= self.min[2] && p[2] <= self.max[2]
    }
}

/// Squared euclidean distance between two points.
#[inline]
pub fn distance_sq(a: &Point, b: &Point) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}
