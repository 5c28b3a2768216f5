use std::ops::Range;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::body::ContentBody;
use crate::content::{ByteRangeReader, ContentError, ContentKind, ContentReadStream, HttpContent};
use crate::ensure;

/// Content backed by a window of an in-memory buffer.
///
/// The buffer is shared, not copied: cloning a [`Bytes`] only bumps a reference
/// count, so the content aliases whatever the caller handed in. The window
/// `[offset, offset + count)` is validated once at construction and never changes.
///
/// # Example
///
/// ```
/// use micro_content::content::{ByteRangeContent, HttpContent};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), micro_content::content::ContentError> {
/// let content = ByteRangeContent::with_range(vec![0u8, 1, 2, 3, 4, 5], 2, 3)?;
/// assert_eq!(content.compute_length(), Some(3));
///
/// let mut sink: Vec<u8> = Vec::new();
/// content.serialize_to(&mut sink).await?;
/// assert_eq!(sink, [2, 3, 4]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ByteRangeContent {
    buffer: Bytes,
    offset: usize,
    count: usize,
}

impl ByteRangeContent {
    /// Creates content over the whole buffer.
    pub fn new<B: Into<Bytes>>(buffer: B) -> Self {
        let buffer = buffer.into();
        let count = buffer.len();
        Self { buffer, offset: 0, count }
    }

    /// Creates content over `buffer[offset..offset + count]`.
    ///
    /// The offset is checked before the count, so when both are wrong the error
    /// names the offset.
    pub fn with_range<B: Into<Bytes>>(buffer: B, offset: usize, count: usize) -> Result<Self, ContentError> {
        let buffer = buffer.into();
        let len = buffer.len();

        ensure!(offset <= len, ContentError::offset_out_of_range(to_i64(offset), to_i64(len)));
        ensure!(count <= len - offset, ContentError::count_out_of_range(to_i64(count), to_i64(len - offset)));

        Ok(Self { buffer, offset, count })
    }

    /// Creates content from a nullable buffer and signed window bounds.
    ///
    /// Arguments are checked in order: a missing buffer fails with
    /// [`ContentError::InvalidArgument`], then the offset and the count with
    /// [`ContentError::OutOfRange`].
    pub fn from_raw_parts<B: Into<Bytes>>(buffer: Option<B>, offset: i64, count: i64) -> Result<Self, ContentError> {
        let Some(buffer) = buffer else {
            return Err(ContentError::invalid_argument("buffer"));
        };
        let buffer = buffer.into();
        let len = to_i64(buffer.len());

        ensure!((0..=len).contains(&offset), ContentError::offset_out_of_range(offset, len));
        ensure!(count >= 0, ContentError::count_out_of_range(count, len - offset));

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        Self::with_range(buffer, offset, count)
    }

    /// The full backing buffer, including bytes outside the window.
    #[inline]
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.count
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[self.range()]
    }

    /// The window as its own [`Bytes`], sharing the backing buffer.
    #[inline]
    pub fn to_bytes(&self) -> Bytes {
        self.buffer.slice(self.range())
    }

    /// A non-writable reader over the window.
    pub fn reader(&self) -> ByteRangeReader {
        ByteRangeReader::new(self.to_bytes())
    }

    pub fn to_body(&self) -> ContentBody {
        ContentBody::once(self.to_bytes())
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl From<Bytes> for ByteRangeContent {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for ByteRangeContent {
    fn from(vec: Vec<u8>) -> Self {
        Self::new(vec)
    }
}

impl From<&'static [u8]> for ByteRangeContent {
    fn from(slice: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(slice))
    }
}

impl From<ByteRangeContent> for ContentBody {
    fn from(content: ByteRangeContent) -> Self {
        content.to_body()
    }
}

#[async_trait]
impl HttpContent for ByteRangeContent {
    #[inline]
    fn kind(&self) -> ContentKind {
        ContentKind::ByteRange
    }

    #[inline]
    fn compute_length(&self) -> Option<u64> {
        Some(self.count as u64)
    }

    async fn serialize_to(&self, sink: &mut (dyn AsyncWrite + Send + Unpin)) -> Result<(), ContentError> {
        trace!(offset = self.offset, count = self.count, "serialize byte range content");
        sink.write_all(self.as_slice()).await?;
        Ok(())
    }

    async fn create_read_stream(&self) -> Result<ContentReadStream, ContentError> {
        Ok(Box::pin(self.reader()))
    }

    #[inline]
    fn allows_duplex(&self) -> bool {
        false
    }

    fn try_create_read_stream(&self) -> Option<ContentReadStream> {
        Some(Box::pin(self.reader()))
    }

    async fn read_as_bytes(&self) -> Result<Bytes, ContentError> {
        Ok(self.to_bytes())
    }
}
