use error::Error;
use stream::SwfRead;

/// Highest shape version whose colors are stored without alpha.
///
/// DefineShape and DefineShape2 (versions 1 and 2) use RGB records,
/// DefineShape3 (numbered 32 by the player) uses RGBA.
pub const LAST_RGB_SHAPE_VERSION: u32 = 22;

/// An 8 bit per channel color with alpha. Not premultiplied.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct RgbaColor {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel, 255 is opaque.
    pub alpha: u8
}

impl Default for RgbaColor {
    /// Opaque white.
    fn default() -> Self {
        RgbaColor::new(255, 255, 255, 255)
    }
}

impl RgbaColor {
    /// Makes a color out of its four channels.
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        RgbaColor { red: red, green: green, blue: blue, alpha: alpha }
    }

    /// Reads an RGB record (three bytes) and makes it opaque.
    ///
    /// No byte alignment beyond what byte reads do on their own.
    pub fn read_rgb<S: SwfRead>(stream: &mut S) -> Result<Self, Error> {
        let red = stream.get_byte()?;
        let green = stream.get_byte()?;
        let blue = stream.get_byte()?;
        Ok(RgbaColor::new(red, green, blue, 255))
    }

    /// Reads an RGBA record (four bytes).
    pub fn read_rgba<S: SwfRead>(stream: &mut S) -> Result<Self, Error> {
        let red = stream.get_byte()?;
        let green = stream.get_byte()?;
        let blue = stream.get_byte()?;
        let alpha = stream.get_byte()?;
        Ok(RgbaColor::new(red, green, blue, alpha))
    }

    /// Reads the color record that goes with a shape of the given version.
    ///
    /// Versions up to [`LAST_RGB_SHAPE_VERSION`](constant.LAST_RGB_SHAPE_VERSION.html)
    /// carry RGB, anything later carries RGBA.
    pub fn read<S: SwfRead>(stream: &mut S, shape_version: u32) -> Result<Self, Error> {
        if shape_version <= LAST_RGB_SHAPE_VERSION {
            RgbaColor::read_rgb(stream)
        } else {
            RgbaColor::read_rgba(stream)
        }
    }

    /// Sets the color from a packed 0xRRGGBB value.
    ///
    /// Alpha is always reset to 255, whatever it was before and whatever sits
    /// in the top byte of `color`.
    pub fn set(&mut self, color: u32) {
        self.red = (color >> 16) as u8;
        self.green = (color >> 8) as u8;
        self.blue = color as u8;
        self.alpha = 255;
    }

    /// Packs the color channels as 0xRRGGBB, dropping alpha.
    pub fn to_u32(&self) -> u32 {
        (self.red as u32) << 16 | (self.green as u32) << 8 | self.blue as u32
    }
}

impl From<u32> for RgbaColor {
    fn from(color: u32) -> Self {
        let mut result = RgbaColor::default();
        result.set(color);
        result
    }
}
