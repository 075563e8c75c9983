//! Decoders and geometry for the small value records that sit underneath
//! every SWF tag: the 2x3 matrix, the rectangle, the color and the color
//! transform.
//!
//! SWF packs these records as bit fields whose widths are stored inline,
//! with fixed point values and flags deciding which fields are even there.
//! Getting any of that wrong doesn't crash, it just quietly skews the picture.
//! This crate reads them off a [`Stream`](struct.Stream.html) (or anything
//! implementing [`SwfRead`](trait.SwfRead.html)) and then lets you
//! concatenate, invert and apply them.
//!
//! It also still does what it grew out of: reading the headers of any SWF
//! file and handing you a stream of everything after the header, with all
//! compression issues sorted out for you.
//!
//! ```rust
//! use swf_primitives::{Matrix23, Point, Stream};
//!
//! // No scale, no rotation, translate by (100, -20) twips
//! let data = [0x10, 0xC9, 0xD8];
//! let mut stream = Stream::from_slice(&data);
//! let matrix = Matrix23::read(&mut stream).unwrap();
//! assert_eq!(matrix.transform(Point::new(0.0, 0.0)), Point::new(100.0, -20.0));
//! ```

#![warn(missing_docs)]

extern crate byteorder;
extern crate flate2;
#[macro_use]
extern crate log;
extern crate lzma_rs;

mod color;
mod color_transform;
mod decoded_swf;
mod error;
mod matrix;
mod rect;
mod stream;
mod units;

use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use color::{RgbaColor, LAST_RGB_SHAPE_VERSION};
pub use color_transform::ColorTransform;
pub use decoded_swf::DecodedSwf;
pub use error::Error;
pub use matrix::Matrix23;
pub use rect::Rect;
pub use stream::{get_encoded_u32_length, Stream, SwfRead};
pub use units::{pixels_to_twips, point_pixels_to_twips, point_twips_to_pixels,
                texture_size_power2, twips_to_pixels, Point, TWIPS_PER_PIXEL};

use byteorder::{LittleEndian, ReadBytesExt};

/// An enum representing all the valid signatures of a SWF file.
///
/// As of the latest SWF specification, there are 3 valid signatures a SWF file
/// can have. The first three bytes of a SWF file act as the magic numbers, FWS
/// (SWF backwards) was defined with the original specification, and designates
/// an uncompressed SWF file. CWS was introduced with SWF 6, and specifies that
/// all bytes beyond the first 8 are compressed using zlib. ZWS was added with
/// SWF 13, and displays the same concept, but with LZMA instead of zlib.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Signature {
    /// A signature of FWS, meaning an uncompressed SWF file.
    Uncompressed,
    /// A signature of CWS, meaning a zlib-compressed SWF file.
    ZlibCompressed,
    /// A signature of ZWS, meaning an LZMA-compressed SWF file.
    LzmaCompressed
}

/// The parsed SWF file header.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SwfHeaders {
    signature: Signature,
    version: u8,
    file_length: u32,
    frame_size: Rect,
    frame_rate: f32,
    frame_count: u16
}

impl SwfHeaders {
    /// Wraps over read_from(), taking a path and opening it for you.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swf_primitives::SwfHeaders;
    /// if let Ok((headers, stream)) = SwfHeaders::open("example.swf") {
    ///     // ...
    /// }
    /// ```
    pub fn open<T: AsRef<Path>>(path: T) -> Result<(Self, Stream<DecodedSwf<File>>), Error> {
        Self::read_from(File::open(path)?)
    }

    /// Takes a SWF file and parses its headers, returning the header struct
    /// along with a Stream positioned at the first tag, if you wish to
    /// continue parsing the file.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swf_primitives::{Signature, SwfHeaders};
    ///
    /// let data = [
    ///     b'F', b'W', b'S', 10, 21, 0, 0, 0, // signature, version, length
    ///     0x78, 0x00, 0x05, 0x5F, 0x00, 0x00, 0x0F, 0xA0, 0x00, // 550x400
    ///     0x00, 0x18, 0x01, 0x00 // 24 fps, 1 frame
    /// ];
    /// let (headers, _stream) = SwfHeaders::read_from(&data[..]).unwrap();
    /// assert_eq!(headers.signature(), Signature::Uncompressed);
    /// assert_eq!(headers.dimensions(), (550, 400));
    /// assert_eq!(headers.frame_rate(), 24.0);
    /// ```
    pub fn read_from<R: Read>(mut file: R) -> Result<(Self, Stream<DecodedSwf<R>>), Error> {
        // SWF header structure overview:
        // Everything is little endian.
        //
        // Signature: u8. Either 'F', 'C', or 'Z' for uncompressed, zlib, or LZMA respectively
        // Magic number: u8. Always 0x57 ('W')
        // Magic number: u8. Always 0x53 ('S')
        // Version: u8
        // File length: u32.
        // Frame size: RECT, bit packed
        // Frame rate: u16, but really an 8.8 fixed point value
        // Frame count: u16

        // Get the signature
        let sig = match file.read_u8()? as char {
            'F' => Signature::Uncompressed,
            'C' => Signature::ZlibCompressed,
            'Z' => Signature::LzmaCompressed,
            _ => return Err(Error::NotSwf)
        };

        // Verify that the magic numbers are correct
        match (file.read_u8()?, file.read_u8()?) {
            (0x57, 0x53) => {},
            _ => return Err(Error::NotSwf)
        }

        let version = file.read_u8()?;
        let file_length = file.read_u32::<LittleEndian>()?;

        // From this point on (the 8th byte), the rest of the file will be likely compressed, so
        // we have to work with a decoded copy.
        let decoded = DecodedSwf::decompress(file, sig, file_length)?;
        let mut stream = Stream::new(decoded);

        let frame_size = Rect::read(&mut stream)?;
        let frame_rate = stream.get_short()? as f32 / 256.0;
        let frame_count = stream.get_short()?;

        debug!("{:?} version {}, {} bytes, frame {:?}, {} fps, {} frames",
               sig, version, file_length, frame_size, frame_rate, frame_count);

        Ok((SwfHeaders {
            signature: sig,
            version: version,
            file_length: file_length,
            frame_size: frame_size,
            frame_rate: frame_rate,
            frame_count: frame_count
        }, stream))
    }
    /// Returns the signature as an enum representing all valid values.
    pub fn signature(&self) -> Signature {
        self.signature
    }
    /// Returns the version number.
    pub fn version(&self) -> u8 {
        self.version
    }
    /// Returns the uncompressed total file length in bytes.
    pub fn file_length(&self) -> u32 {
        self.file_length
    }
    /// Returns the stage rectangle in twips.
    pub fn frame_size(&self) -> Rect {
        self.frame_size
    }
    /// Returns the dimensions in twips (the measurement unit flash uses, 1/20th of a pixel).
    pub fn dimensions_twips(&self) -> (u32, u32) {
        (self.frame_size.width() as u32, self.frame_size.height() as u32)
    }
    /// Returns the dimensions in pixels (converted from twips, sometimes losing accuracy).
    pub fn dimensions(&self) -> (u32, u32) {
        let mut size = self.frame_size;
        size.twips_to_pixels();
        (size.width() as u32, size.height() as u32)
    }
    /// Returns the frame rate, fractional rates included.
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }
    /// Returns the frame count.
    pub fn frame_count(&self) -> u16 {
        self.frame_count
    }
}
