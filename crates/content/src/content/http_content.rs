use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::content::{ContentError, DEFAULT_BUFFER_SIZE};

/// Upper bound for the buffer reserved up front by [`HttpContent::read_as_bytes`].
const MAX_PREALLOCATED_CAPACITY: usize = 64 * DEFAULT_BUFFER_SIZE;

/// A pull-style reader over the bytes of a content.
pub type ContentReadStream = Pin<Box<dyn AsyncRead + Send>>;

/// Explicit variant tag reported by every [`HttpContent`].
///
/// The tag decides whether [`HttpContent::read_stream`] may use the synchronous
/// fast path: only plain byte range content takes it, anything built on top of
/// a byte range reports its own kind and goes through
/// [`HttpContent::create_read_stream`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContentKind {
    /// Unspecialized [`ByteRangeContent`](crate::content::ByteRangeContent)
    ByteRange,
    /// Text content layered over a byte range
    String,
    /// Single-shot content backed by an async reader
    Stream,
    /// Any content defined outside this crate
    Other,
}

impl ContentKind {
    #[inline]
    pub fn is_byte_range(&self) -> bool {
        matches!(self, ContentKind::ByteRange)
    }
}

/// The capability set of an HTTP message payload.
///
/// A transport holds content through this trait: it asks for the length before
/// sending headers, then either pushes the payload with [`serialize_to`] or pulls
/// it with [`read_stream`], and checks [`allows_duplex`] when deciding how to
/// reuse the connection.
///
/// Implementations must not change a length once reported as known.
///
/// [`serialize_to`]: HttpContent::serialize_to
/// [`read_stream`]: HttpContent::read_stream
/// [`allows_duplex`]: HttpContent::allows_duplex
#[async_trait]
pub trait HttpContent: Send + Sync {
    fn kind(&self) -> ContentKind;

    /// Returns the exact payload length when it is known without consuming the payload.
    fn compute_length(&self) -> Option<u64>;

    /// Writes the payload to `sink`.
    ///
    /// Exactly `compute_length()` bytes are written when the length is known.
    /// Sink failures are returned as [`ContentError::Io`] carrying the original error.
    async fn serialize_to(&self, sink: &mut (dyn AsyncWrite + Send + Unpin)) -> Result<(), ContentError>;

    /// The general asynchronous path for producing a reader over the payload.
    async fn create_read_stream(&self) -> Result<ContentReadStream, ContentError>;

    /// Whether the content may be read and written concurrently over one connection.
    fn allows_duplex(&self) -> bool;

    /// Synchronous fast path for [`read_stream`](HttpContent::read_stream).
    fn try_create_read_stream(&self) -> Option<ContentReadStream> {
        None
    }

    fn content_type(&self) -> Option<&Mime> {
        None
    }

    /// Produces a reader over the payload.
    ///
    /// Plain byte range content answers synchronously, every other kind defers to
    /// [`create_read_stream`](HttpContent::create_read_stream). Both paths yield the same bytes.
    async fn read_stream(&self) -> Result<ContentReadStream, ContentError> {
        if self.kind().is_byte_range() {
            if let Some(stream) = self.try_create_read_stream() {
                trace!("read stream created without the async path");
                return Ok(stream);
            }
        }

        self.create_read_stream().await
    }

    /// Buffers the whole payload into memory.
    async fn read_as_bytes(&self) -> Result<Bytes, ContentError> {
        let capacity = self
            .compute_length()
            .map_or(0, |length| usize::try_from(length).unwrap_or(usize::MAX).min(MAX_PREALLOCATED_CAPACITY));
        let mut buf: Vec<u8> = Vec::with_capacity(capacity);
        self.serialize_to(&mut buf).await?;
        Ok(Bytes::from(buf))
    }

    async fn read_as_string(&self) -> Result<String, ContentError> {
        let bytes = self.read_as_bytes().await?;
        Ok(String::from_utf8(Vec::from(bytes))?)
    }

    /// Same as [`serialize_to`](HttpContent::serialize_to), but gives up with
    /// [`ContentError::Canceled`] as soon as `token` is cancelled.
    async fn serialize_to_cancellable(
        &self,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
        token: &CancellationToken,
    ) -> Result<(), ContentError> {
        tokio::select! {
            biased;

            () = token.cancelled() => {
                debug!(kind = ?self.kind(), "content serialization canceled");
                Err(ContentError::Canceled)
            }

            result = self.serialize_to(sink) => result,
        }
    }
}
