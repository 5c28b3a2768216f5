//! HTTP message content.
//!
//! A content is the payload of an outgoing request or response, independent of
//! how it is held in memory. Every variant implements [`HttpContent`]:
//!
//! - [`ByteRangeContent`]: a window over a shared in-memory buffer
//! - [`StringContent`]: text with a media type, layered over a byte range
//! - [`StreamContent`]: a single-shot async reader, the only duplex-capable variant
//!
//! Readers handed out for in-memory content are [`ByteRangeReader`]s, which
//! share the buffer and reject every write.

mod error;
pub use error::ContentError;
pub use error::RangeArgument;

mod http_content;
pub use http_content::ContentKind;
pub use http_content::ContentReadStream;
pub use http_content::HttpContent;

mod reader;
pub use reader::ByteRangeReader;

mod byte_range;
pub use byte_range::ByteRangeContent;

mod string;
pub use string::StringContent;

mod stream;
pub use stream::DEFAULT_BUFFER_SIZE;
pub use stream::StreamContent;
