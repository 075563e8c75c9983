use std::error;
use std::fmt;
use std::io;

use lzma_rs;

/// The error type used by swf-primitives.
#[derive(Debug)]
pub enum Error {
    /// Any IO error, either from directly reading files or from other libraries.
    ///
    /// Running out of data in the middle of a record shows up here as
    /// `io::ErrorKind::UnexpectedEof`.
    IoError(io::Error),
    /// All-encompassing variant for anything that can't be a swf file.
    NotSwf,
    /// A tag body was read past the length declared in its header.
    TagOverrun {
        /// Byte position where the tag should have ended.
        end: u64,
        /// Byte position the stream had actually reached.
        position: u64
    },
    /// A tag was closed while no tag was open.
    NoOpenTag
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => write!(f, "io error: {}", err),
            Error::NotSwf => f.write_str("not a swf file"),
            Error::TagOverrun { end, position } => {
                write!(f, "tag ends at byte {} but was read up to byte {}", end, position)
            }
            Error::NoOpenTag => f.write_str("close_tag without a matching start_tag"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<lzma_rs::error::Error> for Error {
    fn from(err: lzma_rs::error::Error) -> Self {
        use lzma_rs::error::Error::*;
        match err {
            IoError(error) => error.into(),
            _ => Error::NotSwf
        }
    }
}
