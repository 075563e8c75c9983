use std::fmt;

use error::Error;
use rect::Rect;
use stream::SwfRead;
use units::{twips_to_pixels, Point};

/// A 2x3 affine transform, as stored in the SWF MATRIX record.
///
/// A point maps as
///
/// ```text
/// x' = scale_x * x + rotate_skew0 * y + translate_x
/// y' = rotate_skew1 * x + scale_y * y + translate_y
/// ```
///
/// Translations are in twips. Singular matrices are legal values, see
/// [`set_inverse`](#method.set_inverse) for how they invert.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Matrix23 {
    /// Scale (and rotation cosine) along x.
    pub scale_x: f32,
    /// Skew term that feeds y into x'.
    pub rotate_skew0: f32,
    /// Skew term that feeds x into y'.
    pub rotate_skew1: f32,
    /// Scale (and rotation cosine) along y.
    pub scale_y: f32,
    /// Translation along x.
    pub translate_x: f32,
    /// Translation along y.
    pub translate_y: f32
}

impl Default for Matrix23 {
    /// The identity matrix.
    fn default() -> Self {
        Matrix23 {
            scale_x: 1.0,
            rotate_skew0: 0.0,
            rotate_skew1: 0.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0
        }
    }
}

fn lerp(from: f32, to: f32, factor: f32) -> f32 {
    from + (to - from) * factor
}

impl Matrix23 {
    /// Resets to the identity matrix.
    pub fn identity(&mut self) {
        *self = Matrix23::default();
    }

    /// Reads a MATRIX record.
    ///
    /// The record starts byte aligned. Scale and rotate/skew pairs are each
    /// behind a one bit flag and a 5 bit field width, and hold 16.16 fixed
    /// point values. The translation pair always has its 5 bit width and holds
    /// whole twips. On the wire the skew pair comes as rotate_skew1 first,
    /// then rotate_skew0.
    pub fn read<S: SwfRead>(stream: &mut S) -> Result<Self, Error> {
        stream.byte_align();

        let (scale_x, scale_y) = if stream.get_bool()? {
            let bit_count = stream.get_word(5)?;
            let scale_x = stream.get_fixed_bits(bit_count)?;
            let scale_y = stream.get_fixed_bits(bit_count)?;
            (scale_x, scale_y)
        } else {
            (1.0, 1.0)
        };

        let (rotate_skew1, rotate_skew0) = if stream.get_bool()? {
            let bit_count = stream.get_word(5)?;
            let rotate_skew1 = stream.get_fixed_bits(bit_count)?;
            let rotate_skew0 = stream.get_fixed_bits(bit_count)?;
            (rotate_skew1, rotate_skew0)
        } else {
            (0.0, 0.0)
        };

        let bit_count = stream.get_word(5)?;
        let (translate_x, translate_y) = if bit_count != 0 {
            let translate_x = stream.get_int(bit_count)? as f32;
            let translate_y = stream.get_int(bit_count)? as f32;
            (translate_x, translate_y)
        } else {
            (0.0, 0.0)
        };

        let matrix = Matrix23 {
            scale_x: scale_x,
            rotate_skew0: rotate_skew0,
            rotate_skew1: rotate_skew1,
            scale_y: scale_y,
            translate_x: translate_x,
            translate_y: translate_y
        };
        trace!("Read {:?}", matrix);
        Ok(matrix)
    }

    /// Concatenates `other` onto this matrix. Transforming a point with the
    /// result applies `other` first, then the original `self`.
    pub fn concatenate(&mut self, other: &Matrix23) {
        let translate_x = self.scale_x * other.translate_x + (self.rotate_skew0 * other.translate_y + self.translate_x);
        let translate_y = self.rotate_skew1 * other.translate_x + (self.scale_y * other.translate_y + self.translate_y);
        let scale_x = self.scale_x * other.scale_x + self.rotate_skew0 * other.rotate_skew1;
        let rotate_skew1 = self.rotate_skew1 * other.scale_x + self.scale_y * other.rotate_skew1;
        let rotate_skew0 = self.scale_x * other.rotate_skew0 + self.rotate_skew0 * other.scale_y;
        let scale_y = self.rotate_skew1 * other.rotate_skew0 + self.scale_y * other.scale_y;

        self.scale_x = scale_x;
        self.rotate_skew0 = rotate_skew0;
        self.rotate_skew1 = rotate_skew1;
        self.scale_y = scale_y;
        self.translate_x = translate_x;
        self.translate_y = translate_y;
    }

    /// Concatenates a translation, which then happens before this transform.
    pub fn concatenate_translation(&mut self, x: f32, y: f32) {
        self.translate_x += self.scale_x * x + self.rotate_skew0 * y;
        self.translate_y += self.rotate_skew1 * x + self.scale_y * y;
    }

    /// Concatenates a uniform scale, which then happens before this transform.
    pub fn concatenate_scale(&mut self, scale: f32) {
        self.scale_x *= scale;
        self.rotate_skew0 *= scale;
        self.rotate_skew1 *= scale;
        self.scale_y *= scale;
    }

    /// Blends two matrices field by field. A `factor` of 0.0 gives `from`,
    /// 1.0 gives `to`.
    pub fn interpolate(from: &Matrix23, to: &Matrix23, factor: f32) -> Matrix23 {
        Matrix23 {
            scale_x: lerp(from.scale_x, to.scale_x, factor),
            rotate_skew1: lerp(from.rotate_skew1, to.rotate_skew1, factor),
            rotate_skew0: lerp(from.rotate_skew0, to.rotate_skew0, factor),
            scale_y: lerp(from.scale_y, to.scale_y, factor),
            translate_x: lerp(from.translate_x, to.translate_x, factor),
            translate_y: lerp(from.translate_y, to.translate_y, factor)
        }
    }

    /// Replaces the scale and rotation, keeping the translation.
    ///
    /// `rotation` is in radians.
    pub fn set_scale_rotation(&mut self, x_scale: f32, y_scale: f32, rotation: f32) {
        let (sin, cos) = rotation.sin_cos();
        self.scale_x = x_scale * cos;
        self.rotate_skew0 = y_scale * -sin;
        self.rotate_skew1 = x_scale * sin;
        self.scale_y = y_scale * cos;
    }

    /// Transforms a point.
    pub fn transform(&self, point: Point) -> Point {
        self.transform_xy(point.x, point.y)
    }

    /// Transforms a point given as separate coordinates.
    pub fn transform_xy(&self, x: f32, y: f32) -> Point {
        Point {
            x: self.scale_x * x + self.rotate_skew0 * y + self.translate_x,
            y: self.rotate_skew1 * x + self.scale_y * y + self.translate_y
        }
    }

    /// Transforms the four corners of a rectangle and returns their bounds.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let mut bounds = Rect::default();
        bounds.set_rect(self, *rect);
        bounds
    }

    /// Transforms a direction. Translation is not applied.
    pub fn transform_vector(&self, vector: Point) -> Point {
        Point {
            x: self.scale_x * vector.x + self.rotate_skew0 * vector.y,
            y: self.rotate_skew1 * vector.x + self.scale_y * vector.y
        }
    }

    /// Transforms a point by the inverse of this matrix.
    pub fn transform_by_inverse(&self, point: Point) -> Point {
        self.inverse().transform(point)
    }

    /// Transforms a rectangle by the inverse of this matrix and returns the
    /// bounds.
    pub fn transform_rect_by_inverse(&self, rect: &Rect) -> Rect {
        self.inverse().transform_rect(rect)
    }

    /// Returns the inverse of this matrix.
    pub fn inverse(&self) -> Matrix23 {
        let mut result = Matrix23::default();
        result.set_inverse(self);
        result
    }

    /// Sets this matrix to the inverse of `source`.
    ///
    /// When the determinant of `source` is exactly 0.0 there is no inverse.
    /// The fallback keeps the player going: the linear part becomes the
    /// identity and only the translation is negated.
    pub fn set_inverse(&mut self, source: &Matrix23) {
        let determinant = source.determinant();
        if determinant == 0.0 {
            // Arbitrary fallback
            self.scale_x = 1.0;
            self.scale_y = 1.0;
            self.rotate_skew0 = 0.0;
            self.rotate_skew1 = 0.0;
            self.translate_x = -source.translate_x;
            self.translate_y = -source.translate_y;
        } else {
            let inverse_determinant = 1.0 / determinant;
            self.scale_x = source.scale_y * inverse_determinant;
            self.scale_y = source.scale_x * inverse_determinant;
            self.rotate_skew0 = -source.rotate_skew0 * inverse_determinant;
            self.rotate_skew1 = -source.rotate_skew1 * inverse_determinant;
            self.translate_x = -(self.scale_x * source.translate_x + self.rotate_skew0 * source.translate_y);
            self.translate_y = -(self.rotate_skew1 * source.translate_x + self.scale_y * source.translate_y);
        }
    }

    /// True if the matrix mirrors (negative determinant).
    pub fn does_flip(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Determinant of the 2x2 scale/rotate/skew part.
    pub fn determinant(&self) -> f32 {
        self.scale_x * self.scale_y - self.rotate_skew0 * self.rotate_skew1
    }

    /// The larger of the two axis scale magnitudes.
    pub fn max_scale(&self) -> f32 {
        let basis_x = self.scale_x * self.scale_x + self.rotate_skew0 * self.rotate_skew0;
        let basis_y = self.scale_y * self.scale_y + self.rotate_skew1 * self.rotate_skew1;
        basis_x.max(basis_y).sqrt()
    }

    /// Scale magnitude along x, negative when the matrix flips.
    pub fn x_scale(&self) -> f32 {
        let scale = (self.scale_x * self.scale_x + self.rotate_skew1 * self.rotate_skew1).sqrt();
        if self.determinant() < 0.0 {
            -scale
        } else {
            scale
        }
    }

    /// Scale magnitude along y.
    ///
    /// Unlike [`x_scale`](#method.x_scale) this is never negative, the flip
    /// is carried entirely by the x scale.
    pub fn y_scale(&self) -> f32 {
        (self.scale_y * self.scale_y + self.rotate_skew0 * self.rotate_skew0).sqrt()
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f32 {
        let scale_x = if self.determinant() < 0.0 { -self.scale_x } else { self.scale_x };
        self.rotate_skew1.atan2(scale_x)
    }
}

impl fmt::Display for Matrix23 {
    /// Two rows, with the translation column in pixels.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "| {:4.4} {:4.4} {:4.4} |", self.scale_x, self.rotate_skew0, twips_to_pixels(self.translate_x))?;
        writeln!(f, "| {:4.4} {:4.4} {:4.4} |", self.rotate_skew1, self.scale_y, twips_to_pixels(self.translate_y))
    }
}
