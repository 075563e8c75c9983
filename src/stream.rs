use std::io;
use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use error::Error;

/// The bit-level primitives every SWF record decoder is built on.
///
/// SWF mixes whole-byte data with what it calls bit fields: non-byte-aligned
/// numbers whose width is often stored inline just before them. Bits are
/// consumed most significant bit first. The record decoders in this crate
/// only ever talk to this trait, so anything that can hand out bits can feed
/// them.
pub trait SwfRead {
    /// Reads a single unsigned byte. Any leftover bits are discarded first.
    fn get_byte(&mut self) -> Result<u8, Error>;

    /// Reads a little endian u16. Any leftover bits are discarded first.
    fn get_short(&mut self) -> Result<u16, Error>;

    /// Reads an unsigned bit field of `bit_count` bits (0 to 32).
    ///
    /// # Panics
    ///
    /// Panics if `bit_count` is larger than 32.
    fn get_word(&mut self, bit_count: u32) -> Result<u32, Error>;

    /// Discards whatever is left of the partially consumed byte, so the next
    /// bit field starts on a byte boundary.
    fn byte_align(&mut self);

    /// Reads a signed bit field of `bit_count` bits, sign extended from the
    /// top bit of the field.
    fn get_int(&mut self, bit_count: u32) -> Result<i32, Error> {
        let word = self.get_word(bit_count)?;
        Ok(sign_extend(word, bit_count))
    }

    /// Reads a one bit flag.
    fn get_bool(&mut self) -> Result<bool, Error> {
        Ok(self.get_word(1)? != 0)
    }

    /// Reads a signed 16.16 fixed point bit field and converts it to a float.
    fn get_fixed_bits(&mut self, bit_count: u32) -> Result<f32, Error> {
        Ok(self.get_int(bit_count)? as f32 / 65536.0)
    }

    /// Reads a signed 8.8 fixed point bit field and converts it to a float.
    fn get_fixed8_bits(&mut self, bit_count: u32) -> Result<f32, Error> {
        Ok(self.get_int(bit_count)? as f32 * (1.0 / 256.0))
    }
}

fn sign_extend(word: u32, bit_count: u32) -> i32 {
    if bit_count == 0 || bit_count >= 32 {
        return word as i32;
    }
    if word & (1 << (bit_count - 1)) != 0 {
        (word | (!0u32 << bit_count)) as i32
    } else {
        word as i32
    }
}

/// A SWF data stream sitting on top of any `Read`.
///
/// Besides the bit fields of [`SwfRead`](trait.SwfRead.html) it knows the
/// handful of byte encodings SWF uses (variable length integers, half
/// floats, strings) and the tag framing that wraps every record after the
/// file header.
pub struct Stream<R: Read> {
    inner: R,
    position: u64,
    bit_bucket: u32,
    bits_remaining: u32,
    tag_stack: Vec<u64>
}

impl<'a> Stream<&'a [u8]> {
    /// Convenience constructor for decoding straight out of a byte slice.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Stream::new(data)
    }
}

impl<R: Read> Stream<R> {
    /// Wraps a reader. The stream starts byte aligned at position 0.
    pub fn new(inner: R) -> Self {
        Stream {
            inner: inner,
            position: 0,
            bit_bucket: 0,
            bits_remaining: 0,
            tag_stack: Vec::new()
        }
    }

    /// Number of bytes pulled from the underlying reader so far.
    ///
    /// A byte that is only partly consumed by bit field reads counts as read.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps the stream, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads a little endian u32.
    pub fn get_u32(&mut self) -> Result<u32, Error> {
        self.byte_align();
        let value = self.inner.read_u32::<LittleEndian>()?;
        self.position += 4;
        Ok(value)
    }

    /// Reads a signed byte.
    pub fn get_i8(&mut self) -> Result<i8, Error> {
        Ok(self.get_byte()? as i8)
    }

    /// Reads a little endian i16.
    pub fn get_i16(&mut self) -> Result<i16, Error> {
        Ok(self.get_short()? as i16)
    }

    /// Reads a little endian i32.
    pub fn get_i32(&mut self) -> Result<i32, Error> {
        Ok(self.get_u32()? as i32)
    }

    /// Reads a 32 bit 16.16 fixed point number as a float.
    pub fn get_fixed(&mut self) -> Result<f32, Error> {
        Ok(self.get_u32()? as i32 as f32 / 65536.0)
    }

    /// Reads a little endian 32 bit float.
    pub fn get_f32(&mut self) -> Result<f32, Error> {
        self.byte_align();
        let value = self.inner.read_f32::<LittleEndian>()?;
        self.position += 4;
        Ok(value)
    }

    /// Reads a little endian 64 bit float.
    pub fn get_f64(&mut self) -> Result<f64, Error> {
        self.byte_align();
        let value = self.inner.read_f64::<LittleEndian>()?;
        self.position += 8;
        Ok(value)
    }

    /// Reads a SWF 16 bit float and widens it to an f32.
    ///
    /// The packed form is 1 sign bit, 5 exponent bits with a bias of 16 and
    /// 10 mantissa bits. A zero exponent keeps the exponent field of the
    /// result at zero.
    pub fn get_float16(&mut self) -> Result<f32, Error> {
        let packed = self.get_short()? as u32;
        let mut bits = (packed & 0x8000) << 16;
        let exponent = packed & 0x7C00;
        if exponent != 0 {
            bits |= ((exponent >> 10) + (127 - 16)) << 23;
        }
        bits |= (packed & 0x3FF) << 13;
        Ok(f32::from_bits(bits))
    }

    /// Reads a variable length u32 of one to five bytes.
    ///
    /// Each byte carries 7 bits of the value, low bits first, and sets its
    /// top bit when another byte follows.
    pub fn get_encoded_u32(&mut self) -> Result<u32, Error> {
        let mut result = self.get_byte()? as u32;
        if result & 0x80 != 0 {
            result = (result ^ 0x80) | ((self.get_byte()? as u32) << 7);
            if result & 0x4000 != 0 {
                result = (result ^ 0x4000) | ((self.get_byte()? as u32) << 14);
                if result & 0x20_0000 != 0 {
                    result = (result ^ 0x20_0000) | ((self.get_byte()? as u32) << 21);
                    if result & 0x1000_0000 != 0 {
                        result = (result ^ 0x1000_0000) | ((self.get_byte()? as u32) << 28);
                    }
                }
            }
        }
        Ok(result)
    }

    /// Reads a variable length integer and reinterprets it as signed.
    pub fn get_encoded_i32(&mut self) -> Result<i32, Error> {
        Ok(self.get_encoded_u32()? as i32)
    }

    /// Reads a variable length integer that only has 30 significant bits.
    pub fn get_encoded_u30(&mut self) -> Result<u32, Error> {
        Ok(self.get_encoded_u32()? & 0x3FFF_FFFF)
    }

    /// Reads a count stored as one byte, or as 0xFF followed by a u16.
    pub fn get_variable_count(&mut self) -> Result<u16, Error> {
        let count = self.get_byte()?;
        if count == 0xFF {
            self.get_short()
        } else {
            Ok(count as u16)
        }
    }

    /// Reads a zero terminated string. Invalid UTF-8 is replaced, not rejected.
    pub fn read_string(&mut self) -> Result<String, Error> {
        let mut bytes = Vec::new();
        loop {
            match self.get_byte()? {
                0 => break,
                byte => bytes.push(byte)
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads a string prefixed with a one byte length.
    pub fn read_pstring(&mut self) -> Result<String, Error> {
        let length = self.get_byte()? as usize;
        self.read_string_len(length)
    }

    /// Reads exactly `length` bytes as a string.
    pub fn read_string_len(&mut self, length: usize) -> Result<String, Error> {
        self.byte_align();
        let mut bytes = vec![0u8; length];
        self.inner.read_exact(&mut bytes)?;
        self.position += length as u64;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Opens a tag and returns its type.
    ///
    /// The record header is a u16 holding the type in the upper 10 bits and
    /// the length in the lower 6. A length of 0x3F means the real length
    /// follows as a u32. The end of the tag is remembered until the matching
    /// [`close_tag`](#method.close_tag).
    pub fn start_tag(&mut self) -> Result<u16, Error> {
        let header = self.get_short()?;
        let tag_type = header >> 6;
        let mut tag_length = (header & 0x3F) as u32;
        if tag_length == 0x3F {
            tag_length = self.get_u32()?;
        }
        debug!("Tag type = {}, Tag length = {}", tag_type, tag_length);
        let end = self.position + tag_length as u64;
        self.tag_stack.push(end);
        Ok(tag_type)
    }

    /// The byte position where the innermost open tag ends, if any is open.
    pub fn tag_end_position(&self) -> Option<u64> {
        self.tag_stack.last().cloned()
    }

    /// Closes the innermost tag and moves the stream to its end.
    ///
    /// Unread tag data is skipped. Reading past the end can't be undone on a
    /// plain `Read`, so that fails with `Error::TagOverrun`. Closing with no
    /// open tag fails with `Error::NoOpenTag` and leaves the stream alone.
    pub fn close_tag(&mut self) -> Result<(), Error> {
        let end = match self.tag_stack.pop() {
            Some(end) => end,
            None => return Err(Error::NoOpenTag)
        };
        self.byte_align();
        if end != self.position {
            warn!("Tag is not correctly read, tag length is not respected");
        }
        if self.position > end {
            return Err(Error::TagOverrun { end: end, position: self.position });
        }
        let remaining = end - self.position;
        let skipped = io::copy(&mut (&mut self.inner).take(remaining), &mut io::sink())?;
        self.position += skipped;
        if skipped < remaining {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "tag extends past end of stream").into());
        }
        Ok(())
    }
}

impl<R: Read> SwfRead for Stream<R> {
    fn get_byte(&mut self) -> Result<u8, Error> {
        self.byte_align();
        let value = self.inner.read_u8()?;
        self.position += 1;
        Ok(value)
    }

    fn get_short(&mut self) -> Result<u16, Error> {
        self.byte_align();
        let value = self.inner.read_u16::<LittleEndian>()?;
        self.position += 2;
        Ok(value)
    }

    fn get_word(&mut self, bit_count: u32) -> Result<u32, Error> {
        assert!(bit_count <= 32, "bit fields are at most 32 bits wide");

        let mut result: u32 = 0;
        let mut needed = bit_count;
        while needed != 0 {
            if self.bits_remaining == 0 {
                // Refill the bit bucket
                self.bit_bucket = self.inner.read_u8()? as u32;
                self.position += 1;
                self.bits_remaining = 8;
            }
            if needed >= self.bits_remaining {
                // Consume all the unused bits
                result |= self.bit_bucket << (needed - self.bits_remaining);
                needed -= self.bits_remaining;
                self.bits_remaining = 0;
            } else {
                // Consume some of them and mask off what was taken
                let keep = self.bits_remaining - needed;
                result |= self.bit_bucket >> keep;
                self.bit_bucket &= (1 << keep) - 1;
                self.bits_remaining = keep;
                needed = 0;
            }
        }
        Ok(result)
    }

    fn byte_align(&mut self) {
        self.bits_remaining = 0;
    }
}

/// Decodes a variable length u32 straight out of a byte slice.
///
/// Same encoding as [`Stream::get_encoded_u32`](struct.Stream.html#method.get_encoded_u32).
/// Returns the value and the number of bytes it took (1 through 5). Bytes
/// missing off the end of the slice read as zero.
pub fn get_encoded_u32_length(input: &[u8]) -> (u32, usize) {
    let byte = |i: usize| input.get(i).cloned().unwrap_or(0) as u32;

    let mut result = byte(0);
    let mut length = 1;
    if result & 0x80 != 0 {
        length = 2;
        result = (result ^ 0x80) | (byte(1) << 7);
        if result & 0x4000 != 0 {
            length = 3;
            result = (result ^ 0x4000) | (byte(2) << 14);
            if result & 0x20_0000 != 0 {
                length = 4;
                result = (result ^ 0x20_0000) | (byte(3) << 21);
                if result & 0x1000_0000 != 0 {
                    length = 5;
                    result = (result ^ 0x1000_0000) | (byte(4) << 28);
                }
            }
        }
    }
    (result, length)
}
