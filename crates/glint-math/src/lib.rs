#![warn(missing_docs)]

//! Math types for the glint scene bridge.
//!
//! Thin wrappers around nalgebra providing the domain types used when
//! translating CAD geometry into renderer scenes: points, vectors,
//! 4x4 view transforms with a homogeneous scale slot, and axis-aligned
//! bounding boxes.

use nalgebra::{Matrix4, Vector3, Vector4};

/// A point in 3D model space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D model space.
pub type Vec3 = Vector3<f64>;

/// Coordinate magnitude at or beyond which a model bound is treated as
/// infinite and replaced by a unit fallback.
pub const INFINITE_BOUND: f64 = 1.0e38;

/// A 4x4 transformation matrix.
///
/// Follows the classic ray-tracer convention: the `[3][3]` slot carries a
/// uniform scale divisor and [`Transform::apply_point`] performs the full
/// homogeneous divide. An affine transform (slot left at 1) behaves as
/// usual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix, (row, column) indexed.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Composed rotation from Euler angles in degrees, applied about X,
    /// then Y, then Z (`Rx * Ry * Rz`).
    ///
    /// Sines of angles that are exactly ±180 degrees are forced to zero so
    /// the matrix can be converted back to azimuth/elevation without drift.
    pub fn rotation_euler_deg(x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        if x_deg == 0.0 && y_deg == 0.0 && z_deg == 0.0 {
            return Self::identity();
        }
        let (sx, cx) = sin_cos_deg(x_deg);
        let (sy, cy) = sin_cos_deg(y_deg);
        let (sz, cz) = sin_cos_deg(z_deg);
        let mut m = Matrix4::identity();
        m[(0, 0)] = cy * cz;
        m[(0, 1)] = -cy * sz;
        m[(0, 2)] = sy;
        m[(1, 0)] = sx * sy * cz + cx * sz;
        m[(1, 1)] = -sx * sy * sz + cx * cz;
        m[(1, 2)] = -sx * cy;
        m[(2, 0)] = -cx * sy * cz + sx * sz;
        m[(2, 1)] = cx * sy * sz + sx * cz;
        m[(2, 2)] = cx * cy;
        Self { matrix: m }
    }

    /// Build a transform from row-major 4x4 entries.
    pub fn from_rows(rows: &[[f64; 4]; 4]) -> Self {
        let mut m = Matrix4::identity();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                m[(r, c)] = *value;
            }
        }
        Self { matrix: m }
    }

    /// Set the uniform scale divisor in the `[3][3]` homogeneous slot.
    ///
    /// Points pushed through [`Transform::apply_point`] are divided by this
    /// factor, which is how the view transform maps the model sphere onto
    /// the unit view sphere.
    pub fn set_homogeneous_scale(&mut self, scale: f64) {
        self.matrix[(3, 3)] = scale;
    }

    /// Compose: `self` then `other` (`self.matrix * other.matrix`), so the
    /// result applies `other` first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point, applying the full homogeneous divide.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// The matrix entries in row-major order.
    pub fn to_row_major(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = self.matrix[(row, col)];
            }
        }
        out
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Sine and cosine of an angle given in degrees, with the sine of exact
/// ±180 degree inputs snapped to zero.
fn sin_cos_deg(deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    let s = if (deg.abs() - 180.0).abs() < 1.0e-12 {
        0.0
    } else {
        rad.sin()
    };
    (s, rad.cos())
}

/// An axis-aligned bounding box in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox {
    /// Box from explicit corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// The empty box: +inf minimum, -inf maximum. Unioning anything into
    /// it yields that thing.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// True if the box contains no volume (any min above its max).
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Diagonal vector from min to max corner.
    pub fn diagonal(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: &Point3) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// Expand the box outward to the nearest integer grid: floor on each
    /// min coordinate, ceil on each max.
    ///
    /// Avoids aliasing when a surface lies exactly on the box boundary
    /// during the renderer's ray-box tests.
    pub fn pad_to_grid(&mut self) {
        for i in 0..3 {
            self.min[i] = self.min[i].floor();
            self.max[i] = self.max[i].ceil();
        }
    }

    /// Replace coordinates at or beyond [`INFINITE_BOUND`] with a unit
    /// fallback, per axis: -1 for min coordinates, +1 for max coordinates.
    ///
    /// Returns true if anything was clamped. Infinite bounds indicate a
    /// degenerate model, not corrupt input, so callers typically warn and
    /// continue.
    pub fn clamp_infinite(&mut self) -> bool {
        let mut clamped = false;
        for i in 0..3 {
            if self.min[i].abs() >= INFINITE_BOUND {
                self.min[i] = -1.0;
                clamped = true;
            }
            if self.max[i].abs() >= INFINITE_BOUND {
                self.max[i] = 1.0;
                clamped = true;
            }
        }
        clamped
    }

    /// The eight corner points of the box.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Axis-aligned box containing this box transformed by `t`.
    ///
    /// Re-boxes the eight transformed corners, so the result is exact for
    /// translations and conservative for rotations. Empty boxes are
    /// returned unchanged.
    pub fn transformed(&self, t: &Transform) -> Self {
        if self.is_empty() {
            return *self;
        }
        let mut out = Self::empty();
        for corner in self.corners() {
            out.include(&t.apply_point(&corner));
        }
        out
    }
}
