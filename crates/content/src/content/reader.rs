use std::cmp;
use std::io::{self, SeekFrom};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncSeek, AsyncWrite, ReadBuf};
use tracing::warn;

/// A read-only, seekable stream over a window of a shared buffer.
///
/// The reader holds its own reference to the buffer, so it stays valid after the
/// content it came from is dropped. Every write attempt fails with
/// [`io::ErrorKind::Unsupported`].
#[derive(Debug, Clone)]
pub struct ByteRangeReader {
    bytes: Bytes,
    position: u64,
}

impl ByteRangeReader {
    pub(crate) fn new(bytes: Bytes) -> Self {
        Self { bytes, position: 0 }
    }

    /// Total length of the window, regardless of the current position.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of bytes left to read from the current position.
    pub fn remaining(&self) -> usize {
        self.remaining_slice().len()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        false
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    fn remaining_slice(&self) -> &[u8] {
        let start = usize::try_from(self.position).map_or(self.bytes.len(), |position| cmp::min(position, self.bytes.len()));
        &self.bytes[start..]
    }

    fn advance(&mut self, amt: usize) {
        self.position = self.position.saturating_add(amt as u64);
    }
}

fn read_only_error() -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, "content stream is read-only")
}

impl AsyncRead for ByteRangeReader {
    fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let remaining = this.remaining_slice();
        let amt = cmp::min(remaining.len(), buf.remaining());
        buf.put_slice(&remaining[..amt]);
        this.advance(amt);
        Poll::Ready(Ok(()))
    }
}

impl AsyncBufRead for ByteRangeReader {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        Poll::Ready(Ok(self.get_mut().remaining_slice()))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        self.get_mut().advance(amt);
    }
}

impl AsyncSeek for ByteRangeReader {
    fn start_seek(self: Pin<&mut Self>, position: SeekFrom) -> io::Result<()> {
        let this = self.get_mut();
        let (base, delta) = match position {
            SeekFrom::Start(n) => {
                this.position = n;
                return Ok(());
            }
            SeekFrom::End(delta) => (this.bytes.len() as u64, delta),
            SeekFrom::Current(delta) => (this.position, delta),
        };

        match base.checked_add_signed(delta) {
            Some(n) => {
                this.position = n;
                Ok(())
            }
            None => Err(io::Error::new(io::ErrorKind::InvalidInput, "invalid seek to a negative or overflowing position")),
        }
    }

    fn poll_complete(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<u64>> {
        Poll::Ready(Ok(self.position))
    }
}

impl AsyncWrite for ByteRangeReader {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        warn!(size = buf.len(), "rejected write on read-only content stream");
        Poll::Ready(Err(read_only_error()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
