use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, BufReader, ReadBuf, Take};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::body::ContentBody;
use crate::content::{ContentError, ContentKind, ContentReadStream, HttpContent};

/// Buffer size used when copying a stream into a sink.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Single-shot content backed by an async reader.
///
/// The reader is handed out by the first call to [`serialize_to`](HttpContent::serialize_to)
/// or [`read_stream`](HttpContent::read_stream); any later call fails with
/// [`ContentError::Consumed`]. When a length is declared, no more than that many
/// bytes are read, and a reader that ends early fails with
/// [`io::ErrorKind::UnexpectedEof`](std::io::ErrorKind::UnexpectedEof).
pub struct StreamContent {
    reader: Mutex<Option<ContentReadStream>>,
    length: Option<u64>,
    buffer_size: usize,
}

impl StreamContent {
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self { reader: Mutex::new(Some(Box::pin(reader))), length: None, buffer_size: DEFAULT_BUFFER_SIZE }
    }

    pub fn with_length<R>(reader: R, length: u64) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self { length: Some(length), ..Self::new(reader) }
    }

    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub async fn is_consumed(&self) -> bool {
        self.reader.lock().await.is_none()
    }

    /// Turns the content into a body that streams the reader frame by frame.
    pub fn into_body(self) -> Result<ContentBody, ContentError> {
        let reader = self.reader.into_inner().ok_or(ContentError::Consumed)?;
        Ok(match self.length {
            Some(length) => ContentBody::from_reader(LengthCheckedReader::new(reader, length), Some(length)),
            None => ContentBody::from_reader(reader, None),
        })
    }

    async fn take_reader(&self) -> Result<ContentReadStream, ContentError> {
        let mut guard = self.reader.lock().await;
        guard.take().ok_or_else(|| {
            warn!("stream content read more than once");
            ContentError::Consumed
        })
    }
}

/// Yields at most `length` bytes and fails with [`io::ErrorKind::UnexpectedEof`]
/// when the inner reader ends before that.
struct LengthCheckedReader {
    inner: Take<ContentReadStream>,
    received: u64,
    length: u64,
}

impl LengthCheckedReader {
    fn new(reader: ContentReadStream, length: u64) -> Self {
        Self { inner: reader.take(length), received: 0, length }
    }
}

impl AsyncRead for LengthCheckedReader {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if buf.remaining() == 0 {
            return Poll::Ready(Ok(()));
        }

        let before = buf.filled().len();
        ready!(Pin::new(&mut this.inner).poll_read(cx, buf))?;
        let read = buf.filled().len() - before;
        this.received += read as u64;

        if read == 0 && this.received < this.length {
            warn!(received = this.received, length = this.length, "stream content ended before its declared length");
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("stream content ended after {} of {} bytes", this.received, this.length),
            )));
        }

        Poll::Ready(Ok(()))
    }
}

impl fmt::Debug for StreamContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamContent").field("length", &self.length).field("buffer_size", &self.buffer_size).finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpContent for StreamContent {
    #[inline]
    fn kind(&self) -> ContentKind {
        ContentKind::Stream
    }

    #[inline]
    fn compute_length(&self) -> Option<u64> {
        self.length
    }

    async fn serialize_to(&self, sink: &mut (dyn AsyncWrite + Send + Unpin)) -> Result<(), ContentError> {
        let reader = self.take_reader().await?;
        let reader: ContentReadStream = match self.length {
            Some(length) => Box::pin(LengthCheckedReader::new(reader, length)),
            None => reader,
        };

        let mut reader = BufReader::with_capacity(self.buffer_size, reader);
        let copied = tokio::io::copy_buf(&mut reader, sink).await?;
        debug!(copied, "serialized stream content");
        Ok(())
    }

    async fn create_read_stream(&self) -> Result<ContentReadStream, ContentError> {
        let reader = self.take_reader().await?;
        Ok(match self.length {
            Some(length) => Box::pin(LengthCheckedReader::new(reader, length)),
            None => reader,
        })
    }

    #[inline]
    fn allows_duplex(&self) -> bool {
        true
    }
}
