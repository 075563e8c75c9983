use std::fmt;

use color::RgbaColor;
use error::Error;
use stream::SwfRead;

/// Per channel multiply and add terms for recoloring pixels.
///
/// A channel `c` becomes `c * mult + add`. Multipliers are nominally in
/// 0.0 to 1.0 and adders in -255.0 to 255.0, but nothing enforces that
/// until [`clamp`](#method.clamp) is called. Transforms are usually
/// concatenated down the display list first and clamped once at the end.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ColorTransform {
    /// Red multiplier.
    pub red_mult: f32,
    /// Green multiplier.
    pub green_mult: f32,
    /// Blue multiplier.
    pub blue_mult: f32,
    /// Alpha multiplier.
    pub alpha_mult: f32,
    /// Red adder.
    pub red_add: f32,
    /// Green adder.
    pub green_add: f32,
    /// Blue adder.
    pub blue_add: f32,
    /// Alpha adder.
    pub alpha_add: f32
}

impl Default for ColorTransform {
    /// The identity transform.
    fn default() -> Self {
        ColorTransform {
            red_mult: 1.0,
            green_mult: 1.0,
            blue_mult: 1.0,
            alpha_mult: 1.0,
            red_add: 0.0,
            green_add: 0.0,
            blue_add: 0.0,
            alpha_add: 0.0
        }
    }
}

fn transform_channel(value: u8, mult: f32, add: f32) -> u8 {
    (value as f32 * mult + add).clamp(0.0, 255.0) as i32 as u8
}

impl ColorTransform {
    /// Resets to the identity transform.
    pub fn identity(&mut self) {
        *self = ColorTransform::default();
    }

    /// Concatenates `other` onto this transform. Applying the result to a
    /// color applies `other` first, then the original `self`.
    pub fn concatenate(&mut self, other: &ColorTransform) {
        // Adders go first, they need the old multipliers
        self.red_add += self.red_mult * other.red_add;
        self.green_add += self.green_mult * other.green_add;
        self.blue_add += self.blue_mult * other.blue_add;
        self.alpha_add += self.alpha_mult * other.alpha_add;

        self.red_mult *= other.red_mult;
        self.green_mult *= other.green_mult;
        self.blue_mult *= other.blue_mult;
        self.alpha_mult *= other.alpha_mult;
    }

    /// Applies the transform to a color. Every channel is clamped to 0..255
    /// and truncated.
    pub fn transform(&self, color: RgbaColor) -> RgbaColor {
        RgbaColor {
            red: transform_channel(color.red, self.red_mult, self.red_add),
            green: transform_channel(color.green, self.green_mult, self.green_add),
            blue: transform_channel(color.blue, self.blue_mult, self.blue_add),
            alpha: transform_channel(color.alpha, self.alpha_mult, self.alpha_add)
        }
    }

    /// Clamps the multipliers to 0.0..1.0 and the adders to -255.0..255.0.
    pub fn clamp(&mut self) {
        self.red_mult = self.red_mult.clamp(0.0, 1.0);
        self.green_mult = self.green_mult.clamp(0.0, 1.0);
        self.blue_mult = self.blue_mult.clamp(0.0, 1.0);
        self.alpha_mult = self.alpha_mult.clamp(0.0, 1.0);
        self.red_add = self.red_add.clamp(-255.0, 255.0);
        self.green_add = self.green_add.clamp(-255.0, 255.0);
        self.blue_add = self.blue_add.clamp(-255.0, 255.0);
        self.alpha_add = self.alpha_add.clamp(-255.0, 255.0);
    }

    /// Reads a CXFORM record, which has no alpha terms.
    ///
    /// After byte aligning come the has-add and has-mult flags (in that
    /// order) and a 4 bit field width. The multipliers follow as 8.8 fixed
    /// point, then the adders as whole numbers. Alpha is left as identity.
    pub fn read_rgb<S: SwfRead>(stream: &mut S) -> Result<Self, Error> {
        stream.byte_align();
        let has_add = stream.get_bool()?;
        let has_mult = stream.get_bool()?;
        let bit_count = stream.get_word(4)?;

        let mut transform = ColorTransform::default();
        if has_mult {
            transform.red_mult = stream.get_fixed8_bits(bit_count)?;
            transform.green_mult = stream.get_fixed8_bits(bit_count)?;
            transform.blue_mult = stream.get_fixed8_bits(bit_count)?;
        }
        if has_add {
            transform.red_add = stream.get_int(bit_count)? as f32;
            transform.green_add = stream.get_int(bit_count)? as f32;
            transform.blue_add = stream.get_int(bit_count)? as f32;
        }
        trace!("Read RGB {:?}", transform);
        Ok(transform)
    }

    /// Reads a CXFORMWITHALPHA record.
    ///
    /// Same layout as [`read_rgb`](#method.read_rgb), with a fourth alpha
    /// value in both the multiplier and the adder groups.
    pub fn read_rgba<S: SwfRead>(stream: &mut S) -> Result<Self, Error> {
        stream.byte_align();
        let has_add = stream.get_bool()?;
        let has_mult = stream.get_bool()?;
        let bit_count = stream.get_word(4)?;

        let mut transform = ColorTransform::default();
        if has_mult {
            transform.red_mult = stream.get_fixed8_bits(bit_count)?;
            transform.green_mult = stream.get_fixed8_bits(bit_count)?;
            transform.blue_mult = stream.get_fixed8_bits(bit_count)?;
            transform.alpha_mult = stream.get_fixed8_bits(bit_count)?;
        }
        if has_add {
            transform.red_add = stream.get_int(bit_count)? as f32;
            transform.green_add = stream.get_int(bit_count)? as f32;
            transform.blue_add = stream.get_int(bit_count)? as f32;
            transform.alpha_add = stream.get_int(bit_count)? as f32;
        }
        trace!("Read RGBA {:?}", transform);
        Ok(transform)
    }
}

impl fmt::Display for ColorTransform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Red transform {:4.4} {:4.4}", self.red_mult, self.red_add)?;
        writeln!(f, "Green transform {:4.4} {:4.4}", self.green_mult, self.green_add)?;
        writeln!(f, "Blue transform {:4.4} {:4.4}", self.blue_mult, self.blue_add)?;
        writeln!(f, "Alpha transform {:4.4} {:4.4}", self.alpha_mult, self.alpha_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use stream::Stream;

    fn sample_colors() -> Vec<RgbaColor> {
        vec![
            RgbaColor::new(0, 0, 0, 0),
            RgbaColor::new(255, 255, 255, 255),
            RgbaColor::new(12, 200, 99, 128),
            RgbaColor::new(1, 254, 127, 3)
        ]
    }

    #[test]
    fn identity_leaves_colors_alone() {
        let mut transform = ColorTransform {
            red_mult: 0.5,
            ..ColorTransform::default()
        };
        transform.identity();
        assert_eq!(transform, ColorTransform::default());
        for color in sample_colors() {
            assert_eq!(transform.transform(color), color);
        }
    }

    #[test]
    fn transform_clamps_high() {
        let transform = ColorTransform {
            red_mult: 2.0,
            green_mult: 2.0,
            blue_mult: 2.0,
            alpha_mult: 2.0,
            ..ColorTransform::default()
        };
        let white = RgbaColor::new(255, 255, 255, 255);
        assert_eq!(transform.transform(white), white);
    }

    #[test]
    fn transform_clamps_low() {
        let transform = ColorTransform {
            green_mult: 0.1,
            green_add: -300.0,
            ..ColorTransform::default()
        };
        let color = transform.transform(RgbaColor::new(255, 255, 255, 255));
        assert_eq!(color, RgbaColor::new(255, 0, 255, 255));
    }

    #[test]
    fn transform_truncates() {
        let transform = ColorTransform {
            red_mult: 0.5,
            blue_add: 0.75,
            ..ColorTransform::default()
        };
        let color = transform.transform(RgbaColor::new(3, 0, 10, 255));
        assert_eq!(color, RgbaColor::new(1, 0, 10, 255));
    }

    #[test]
    fn concatenate_applies_other_first() {
        let mut outer = ColorTransform {
            red_mult: 2.0,
            red_add: -20.0,
            green_mult: 0.5,
            green_add: 4.0,
            alpha_add: 8.0,
            ..ColorTransform::default()
        };
        let inner = ColorTransform {
            red_mult: 0.5,
            red_add: 10.0,
            green_mult: 0.25,
            blue_add: 16.0,
            alpha_mult: 0.5,
            ..ColorTransform::default()
        };
        let color = RgbaColor::new(100, 200, 40, 64);
        let expected = outer.transform(inner.transform(color));

        outer.concatenate(&inner);
        assert_eq!(outer.transform(color), expected);
        assert_eq!(outer.red_mult, 1.0);
        assert_eq!(outer.red_add, 0.0);
    }

    #[test]
    fn clamp_limits_terms() {
        let mut transform = ColorTransform {
            red_mult: 1.5,
            green_mult: -0.5,
            blue_mult: 0.25,
            red_add: 300.0,
            green_add: -1000.0,
            blue_add: 12.0,
            ..ColorTransform::default()
        };
        transform.clamp();
        assert_eq!(transform.red_mult, 1.0);
        assert_eq!(transform.green_mult, 0.0);
        assert_eq!(transform.blue_mult, 0.25);
        assert_eq!(transform.red_add, 255.0);
        assert_eq!(transform.green_add, -255.0);
        assert_eq!(transform.blue_add, 12.0);
    }

    #[test]
    fn empty_record_is_identity() {
        let data = [0x00, 0x00];
        let mut stream = Stream::from_slice(&data);
        assert_eq!(ColorTransform::read_rgb(&mut stream).unwrap(), ColorTransform::default());
        assert_eq!(ColorTransform::read_rgba(&mut stream).unwrap(), ColorTransform::default());
        assert_eq!(stream.position(), 2);
    }

    #[test]
    fn reads_rgb_multipliers() {
        // mult only, nbits = 10: 128, 256, -64
        let data = [0x68, 0x80, 0x40, 0x3C, 0x00];
        let mut stream = Stream::from_slice(&data);
        let transform = ColorTransform::read_rgb(&mut stream).unwrap();
        assert_eq!(transform, ColorTransform {
            red_mult: 0.5,
            green_mult: 1.0,
            blue_mult: -0.25,
            ..ColorTransform::default()
        });
    }

    #[test]
    fn reads_rgb_adders() {
        // add only, nbits = 9: -255, 100, 255
        let data = [0xA6, 0x02, 0x64, 0x7F, 0x80];
        let mut stream = Stream::from_slice(&data);
        let transform = ColorTransform::read_rgb(&mut stream).unwrap();
        assert_eq!(transform, ColorTransform {
            red_add: -255.0,
            green_add: 100.0,
            blue_add: 255.0,
            ..ColorTransform::default()
        });
    }

    #[test]
    fn reads_rgba_with_both_groups() {
        // nbits = 10, mult 256, 128, 64, 256 then add 10, -10, 0, 255
        let data = [0xE9, 0x00, 0x20, 0x04, 0x04, 0x00, 0x0A, 0xFD, 0x80, 0x03, 0xFC];
        let mut stream = Stream::from_slice(&data);
        let transform = ColorTransform::read_rgba(&mut stream).unwrap();
        assert_eq!(transform, ColorTransform {
            red_mult: 1.0,
            green_mult: 0.5,
            blue_mult: 0.25,
            alpha_mult: 1.0,
            red_add: 10.0,
            green_add: -10.0,
            blue_add: 0.0,
            alpha_add: 255.0
        });
        assert_eq!(stream.position(), 11);
    }

    #[test]
    fn display_lists_each_channel() {
        let text = ColorTransform::default().to_string();
        assert_eq!(text.lines().next(), Some("Red transform 1.0000 0.0000"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn truncated_rgba_record_is_eof() {
        let data = [0xE9, 0x00, 0x20, 0x04];
        let mut stream = Stream::from_slice(&data);
        match ColorTransform::read_rgba(&mut stream) {
            Err(Error::IoError(ref err)) => assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected eof, got {:?}", other)
        }
    }
}
