use std::io;
use std::io::{BufReader, Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;
use lzma_rs;
use lzma_rs::decompress::{Options, UnpackedSize};

use super::Signature;
use error::Error;

// The header's file length is untrusted, so only this much is reserved up front
const MAX_PREALLOCATION: u32 = 1 << 20;

enum Inner<R: Read> {
    Raw(R),
    Zlib(ZlibDecoder<R>),
    Lzma(Cursor<Vec<u8>>)
}

/// Handles decompressing swf innards and reading the results.
pub struct DecodedSwf<R: Read> {
    inner: Inner<R>
}

impl<R: Read> DecodedSwf<R> {
    /// Takes a reader positioned just after the 8 byte file header, along
    /// with the signature and file length from that header, and returns a
    /// DecodedSwf that handles all the compression for you.
    ///
    /// LZMA files are decompressed up front, since the SWF flavour of LZMA
    /// has to be told the uncompressed size (`file_length` minus the header).
    pub fn decompress(mut reader: R, sig: Signature, file_length: u32) -> Result<Self, Error> {
        let inner = match sig {
            Signature::Uncompressed => Inner::Raw(reader),
            Signature::ZlibCompressed => Inner::Zlib(ZlibDecoder::new(reader)),
            Signature::LzmaCompressed => {
                // The compressed length isn't needed, the decoder stops on the
                // uncompressed size
                let compressed_length = reader.read_u32::<LittleEndian>()?;
                let uncompressed_length = file_length.saturating_sub(8);
                debug!("LZMA payload: {} bytes compressed, {} uncompressed",
                       compressed_length, uncompressed_length);

                // The dictionary buffer never needs to outgrow the output
                let options = Options {
                    unpacked_size: UnpackedSize::UseProvided(Some(uncompressed_length as u64)),
                    memlimit: Some(uncompressed_length as usize),
                    allow_incomplete: true
                };
                let mut input = BufReader::new(reader);
                let mut output = Vec::with_capacity(uncompressed_length.min(MAX_PREALLOCATION) as usize);
                lzma_rs::lzma_decompress_with_options(&mut input, &mut output, &options)?;
                Inner::Lzma(Cursor::new(output))
            }
        };
        Ok(DecodedSwf {
            inner: inner
        })
    }
}

impl<R: Read> Read for DecodedSwf<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner {
            Inner::Raw(ref mut f) => f.read(buf),
            Inner::Zlib(ref mut f) => f.read(buf),
            Inner::Lzma(ref mut f) => f.read(buf)
        }
    }
}
