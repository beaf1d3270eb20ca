//! Single-precision affine transform with an implicit `(0, 0, 1)` perspective row.
//!
//! Layout follows the usual raster-backend convention:
//!
//! ```text
//! [ scale_x  skew_x   trans_x ]   [x]   [x']
//! [ skew_y   scale_y  trans_y ] * [y] = [y']
//! [ 0        0        1       ]   [1]   [1 ]
//! ```

use std::fmt;

use crate::foundation::core::{Point32, Rect32};
use crate::foundation::math::sin_cos_snapped;

/// Determinants at or below this magnitude are treated as singular: `(1/4096)^3`.
const DETERMINANT_NEARLY_ZERO: f64 = 1.0 / (4096.0 * 4096.0 * 4096.0);

/// Where a new transform is placed relative to the existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatrixOrder {
    /// The new transform is applied to points before the existing one.
    #[default]
    Prepend,
    /// The new transform is applied to points after the existing one.
    Append,
}

/// 2D affine transform with six free `f32` components.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Matrix {
    scale_x: f32,
    skew_x: f32,
    trans_x: f32,
    skew_y: f32,
    scale_y: f32,
    trans_y: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        skew_x: 0.0,
        trans_x: 0.0,
        skew_y: 0.0,
        scale_y: 1.0,
        trans_y: 0.0,
    };

    /// Builds a matrix from its six components in row-major order.
    pub fn from_row_major(
        scale_x: f32,
        skew_x: f32,
        trans_x: f32,
        skew_y: f32,
        scale_y: f32,
        trans_y: f32,
    ) -> Self {
        Self {
            scale_x,
            skew_x,
            trans_x,
            skew_y,
            scale_y,
            trans_y,
        }
    }

    /// Builds a matrix from SVG/`kurbo` coefficient order `[a b c d e f]`, where
    /// `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.
    pub fn from_coeffs([a, b, c, d, e, f]: [f32; 6]) -> Self {
        Self::from_row_major(a, c, e, b, d, f)
    }

    /// Pure translation.
    pub fn translation(dx: f32, dy: f32) -> Self {
        Self::from_row_major(1.0, 0.0, dx, 0.0, 1.0, dy)
    }

    /// Pure scale about the origin.
    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self::from_row_major(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Rotation about the origin. Positive angles map the x axis towards the y axis.
    pub fn rotation_deg(degrees: f32) -> Self {
        let (sin, cos) = sin_cos_snapped(f64::from(degrees).to_radians());
        Self::from_row_major(cos as f32, -sin as f32, 0.0, sin as f32, cos as f32, 0.0)
    }

    /// Rotation about `pivot`.
    pub fn rotation_deg_at(degrees: f32, pivot: Point32) -> Self {
        let (sin, cos) = sin_cos_snapped(f64::from(degrees).to_radians());
        let (px, py) = (f64::from(pivot.x), f64::from(pivot.y));
        let one_minus_cos = 1.0 - cos;
        Self::from_row_major(
            cos as f32,
            -sin as f32,
            (sin * py + one_minus_cos * px) as f32,
            sin as f32,
            cos as f32,
            (-sin * px + one_minus_cos * py) as f32,
        )
    }

    /// Shear with `sx` as the x-by-y factor and `sy` as the y-by-x factor.
    pub fn skewing(sx: f32, sy: f32) -> Self {
        Self::from_row_major(1.0, sx, 0.0, sy, 1.0, 0.0)
    }

    /// Row 0, column 0.
    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    /// Row 0, column 1.
    pub fn skew_x(&self) -> f32 {
        self.skew_x
    }

    /// Horizontal translation.
    pub fn offset_x(&self) -> f32 {
        self.trans_x
    }

    /// Row 1, column 0.
    pub fn skew_y(&self) -> f32 {
        self.skew_y
    }

    /// Row 1, column 1.
    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    /// Vertical translation.
    pub fn offset_y(&self) -> f32 {
        self.trans_y
    }

    /// All nine entries in row-major order, including the implicit perspective row.
    pub fn elements(&self) -> [f32; 9] {
        [
            self.scale_x,
            self.skew_x,
            self.trans_x,
            self.skew_y,
            self.scale_y,
            self.trans_y,
            0.0,
            0.0,
            1.0,
        ]
    }

    /// Exact comparison against the identity; no epsilon.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Determinant of the 2x2 linear part.
    pub fn determinant(&self) -> f32 {
        self.determinant_f64() as f32
    }

    /// Whether the determinant magnitude exceeds `(1/4096)^3`.
    pub fn is_invertible(&self) -> bool {
        self.determinant_f64().abs() > DETERMINANT_NEARLY_ZERO
    }

    /// Best-effort rotation readout, `atan(skew_y / scale_y)`.
    ///
    /// Only meaningful for rotation combined with uniform scale; it is not a polar
    /// decomposition.
    pub fn rotation(&self) -> f32 {
        (f64::from(self.skew_y) / f64::from(self.scale_y)).atan() as f32
    }

    /// [`Matrix::rotation`] in degrees.
    pub fn rotation_degrees(&self) -> f32 {
        (f64::from(self.skew_y) / f64::from(self.scale_y))
            .atan()
            .to_degrees() as f32
    }

    /// Composes `other` into `self`; see [`MatrixOrder`].
    pub fn combine(&mut self, other: &Matrix, order: MatrixOrder) -> &mut Self {
        *self = match order {
            MatrixOrder::Prepend => concat(self, other),
            MatrixOrder::Append => concat(other, self),
        };
        self
    }

    /// Prepends `other`.
    pub fn multiply(&mut self, other: &Matrix) -> &mut Self {
        self.combine(other, MatrixOrder::Prepend)
    }

    /// Composes a translation; see [`MatrixOrder`].
    pub fn translate(&mut self, dx: f32, dy: f32, order: MatrixOrder) -> &mut Self {
        self.combine(&Self::translation(dx, dy), order)
    }

    /// Composes a scale about the origin.
    pub fn scale(&mut self, sx: f32, sy: f32, order: MatrixOrder) -> &mut Self {
        self.combine(&Self::scaling(sx, sy), order)
    }

    /// Composes a rotation about the origin.
    pub fn rotate(&mut self, degrees: f32, order: MatrixOrder) -> &mut Self {
        self.combine(&Self::rotation_deg(degrees), order)
    }

    /// Composes a rotation about `pivot`.
    pub fn rotate_at(&mut self, degrees: f32, pivot: Point32, order: MatrixOrder) -> &mut Self {
        self.combine(&Self::rotation_deg_at(degrees, pivot), order)
    }

    /// Prepends a skew.
    pub fn shear(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.combine(&Self::skewing(sx, sy), MatrixOrder::Prepend)
    }

    /// The inverse transform, or `None` when the linear part is singular.
    pub fn inverted(&self) -> Option<Matrix> {
        let det = self.determinant_f64();
        if det.abs() <= DETERMINANT_NEARLY_ZERO {
            return None;
        }
        let inv_det = 1.0 / det;
        let (a, b, tx) = (
            f64::from(self.scale_x),
            f64::from(self.skew_x),
            f64::from(self.trans_x),
        );
        let (c, d, ty) = (
            f64::from(self.skew_y),
            f64::from(self.scale_y),
            f64::from(self.trans_y),
        );
        Some(Self::from_row_major(
            (d * inv_det) as f32,
            (-b * inv_det) as f32,
            ((b * ty - d * tx) * inv_det) as f32,
            (-c * inv_det) as f32,
            (a * inv_det) as f32,
            ((c * tx - a * ty) * inv_det) as f32,
        ))
    }

    /// Inverts in place. A singular transform is left unchanged and `false` is returned.
    pub fn invert(&mut self) -> bool {
        match self.inverted() {
            Some(inv) => {
                *self = inv;
                true
            }
            None => {
                tracing::trace!(matrix = %self, "singular matrix left unchanged by invert");
                false
            }
        }
    }

    /// Maps a point, translation included.
    pub fn transform_point(&self, p: Point32) -> Point32 {
        let (x, y) = (f64::from(p.x), f64::from(p.y));
        Point32::new(
            (f64::from(self.scale_x) * x + f64::from(self.skew_x) * y + f64::from(self.trans_x))
                as f32,
            (f64::from(self.skew_y) * x + f64::from(self.scale_y) * y + f64::from(self.trans_y))
                as f32,
        )
    }

    /// Maps every point in place.
    pub fn transform_points(&self, points: &mut [Point32]) {
        for p in points {
            *p = self.transform_point(*p);
        }
    }

    /// Like [`Matrix::transform_points`] but ignores translation.
    pub fn transform_vectors(&self, vectors: &mut [Point32]) {
        for v in vectors {
            let (x, y) = (f64::from(v.x), f64::from(v.y));
            *v = Point32::new(
                (f64::from(self.scale_x) * x + f64::from(self.skew_x) * y) as f32,
                (f64::from(self.skew_y) * x + f64::from(self.scale_y) * y) as f32,
            );
        }
    }

    /// Maps the four corners of `rect` and returns their axis-aligned bounding box.
    pub fn transform_rectangle(&self, rect: Rect32) -> Rect32 {
        let mut corners = [
            Point32::new(rect.left(), rect.top()),
            Point32::new(rect.right(), rect.top()),
            Point32::new(rect.right(), rect.bottom()),
            Point32::new(rect.left(), rect.bottom()),
        ];
        self.transform_points(&mut corners);
        Rect32::from_points(&corners)
    }

    /// Same transform as a kurbo [`kurbo::Affine`].
    pub fn to_affine(&self) -> kurbo::Affine {
        kurbo::Affine::new([
            f64::from(self.scale_x),
            f64::from(self.skew_y),
            f64::from(self.skew_x),
            f64::from(self.scale_y),
            f64::from(self.trans_x),
            f64::from(self.trans_y),
        ])
    }

    /// Narrows a `kurbo` transform to single precision.
    pub fn from_affine(affine: kurbo::Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self::from_coeffs([a as f32, b as f32, c as f32, d as f32, e as f32, f as f32])
    }

    fn determinant_f64(&self) -> f64 {
        f64::from(self.scale_x) * f64::from(self.scale_y)
            - f64::from(self.skew_x) * f64::from(self.skew_y)
    }
}

/// `a * b` in column-vector convention: `b` is applied first.
fn concat(a: &Matrix, b: &Matrix) -> Matrix {
    let (a00, a01, a02) = (
        f64::from(a.scale_x),
        f64::from(a.skew_x),
        f64::from(a.trans_x),
    );
    let (a10, a11, a12) = (
        f64::from(a.skew_y),
        f64::from(a.scale_y),
        f64::from(a.trans_y),
    );
    let (b00, b01, b02) = (
        f64::from(b.scale_x),
        f64::from(b.skew_x),
        f64::from(b.trans_x),
    );
    let (b10, b11, b12) = (
        f64::from(b.skew_y),
        f64::from(b.scale_y),
        f64::from(b.trans_y),
    );
    Matrix::from_row_major(
        (a00 * b00 + a01 * b10) as f32,
        (a00 * b01 + a01 * b11) as f32,
        (a00 * b02 + a01 * b12 + a02) as f32,
        (a10 * b00 + a11 * b10) as f32,
        (a10 * b01 + a11 * b11) as f32,
        (a10 * b02 + a11 * b12 + a12) as f32,
    )
}

impl std::ops::Mul for Matrix {
    type Output = Matrix;

    /// `self * rhs`: `rhs` is applied to points first.
    fn mul(self, rhs: Matrix) -> Matrix {
        concat(&self, &rhs)
    }
}

impl From<kurbo::Affine> for Matrix {
    fn from(affine: kurbo::Affine) -> Self {
        Self::from_affine(affine)
    }
}

impl From<Matrix> for kurbo::Affine {
    fn from(m: Matrix) -> Self {
        m.to_affine()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.elements();
        write!(
            f,
            "[{};{};{}],[{};{};{}],[{};{};{}]",
            e[0], e[1], e[2], e[3], e[4], e[5], e[6], e[7], e[8]
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
