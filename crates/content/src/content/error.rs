use std::fmt;
use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The constructor argument a range violation refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RangeArgument {
    Offset,
    Count,
}

impl fmt::Display for RangeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeArgument::Offset => f.write_str("offset"),
            RangeArgument::Count => f.write_str("count"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("invalid argument `{argument}`: must not be null")]
    InvalidArgument { argument: &'static str },

    #[error("argument `{argument}` out of range: {value} is not within 0..={max}")]
    OutOfRange { argument: RangeArgument, value: i64, max: i64 },

    #[error("content has been consumed")]
    Consumed,

    #[error("content serialization canceled")]
    Canceled,

    #[error("content is not valid utf-8: {source}")]
    Decode {
        #[from]
        source: FromUtf8Error,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ContentError {
    pub fn invalid_argument(argument: &'static str) -> Self {
        Self::InvalidArgument { argument }
    }

    pub fn offset_out_of_range(value: i64, max: i64) -> Self {
        Self::OutOfRange { argument: RangeArgument::Offset, value, max }
    }

    pub fn count_out_of_range(value: i64, max: i64) -> Self {
        Self::OutOfRange { argument: RangeArgument::Count, value, max }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns the underlying io error kind when this error came from a sink or stream.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source } => Some(source.kind()),
            _ => None,
        }
    }
}
