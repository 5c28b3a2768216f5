//! [`http_body::Body`] adapter for content.
//!
//! Lets a transport built on `http`/`http-body` send in-memory content as one
//! data frame, or stream reader-backed content frame by frame.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::TryStreamExt;
use http_body::{Body as HttpBody, Frame, SizeHint};
use http_body_util::StreamBody;
use http_body_util::combinators::UnsyncBoxBody;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::content::ContentError;

/// An `http_body::Body` over in-memory or reader-backed content.
pub struct ContentBody {
    inner: Kind,
}

enum Kind {
    Once(Option<Bytes>),
    Stream { body: UnsyncBoxBody<Bytes, ContentError>, length: Option<u64> },
}

impl ContentBody {
    /// A body with no data frames.
    pub fn empty() -> Self {
        Self { inner: Kind::Once(None) }
    }

    /// A body yielding `bytes` as a single data frame.
    pub fn once(bytes: Bytes) -> Self {
        if bytes.is_empty() { Self::empty() } else { Self { inner: Kind::Once(Some(bytes)) } }
    }

    /// Streams `reader` as data frames. A declared `length` becomes the exact size hint.
    pub fn from_reader<R>(reader: R, length: Option<u64>) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        let stream = ReaderStream::new(reader).map_ok(Frame::data).map_err(ContentError::from);
        Self { inner: Kind::Stream { body: UnsyncBoxBody::new(StreamBody::new(stream)), length } }
    }
}

impl std::fmt::Debug for ContentBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Kind::Once(bytes) => f.debug_tuple("ContentBody::Once").field(&bytes.as_ref().map(Bytes::len)).finish(),
            Kind::Stream { length, .. } => f.debug_struct("ContentBody::Stream").field("length", length).finish_non_exhaustive(),
        }
    }
}

impl HttpBody for ContentBody {
    type Data = Bytes;
    type Error = ContentError;

    fn poll_frame(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match &mut self.get_mut().inner {
            Kind::Once(option_bytes) => Poll::Ready(option_bytes.take().map(|bytes| Ok(Frame::data(bytes)))),
            Kind::Stream { body, .. } => Pin::new(body).poll_frame(cx),
        }
    }

    fn is_end_stream(&self) -> bool {
        match &self.inner {
            Kind::Once(option_bytes) => option_bytes.is_none(),
            Kind::Stream { body, .. } => body.is_end_stream(),
        }
    }

    fn size_hint(&self) -> SizeHint {
        match &self.inner {
            Kind::Once(None) => SizeHint::with_exact(0),
            Kind::Once(Some(bytes)) => SizeHint::with_exact(bytes.len() as u64),
            Kind::Stream { length: Some(length), .. } => SizeHint::with_exact(*length),
            Kind::Stream { body, .. } => body.size_hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ByteRangeContent, StreamContent, StringContent};
    use http_body_util::BodyExt;

    fn check_send<T: Send>() {}

    #[test]
    fn is_send() {
        check_send::<ContentBody>();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_byte_range_body() {
        let content = ByteRangeContent::with_range(vec![0u8, 1, 2, 3, 4, 5], 2, 3).unwrap();
        let mut body = content.to_body();

        assert_eq!(body.size_hint().exact(), Some(3));
        assert!(!body.is_end_stream());

        let bytes = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert_eq!(bytes.as_ref(), [2, 3, 4]);

        assert!(body.is_end_stream());
        assert!(body.frame().await.is_none());

        // the content itself is untouched and can produce another body
        assert_eq!(content.to_body().collect().await.unwrap().to_bytes().as_ref(), [2, 3, 4]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_empty_body() {
        let mut body = ContentBody::from(ByteRangeContent::with_range(vec![1u8, 2, 3], 3, 0).unwrap());

        assert!(body.is_end_stream());
        assert_eq!(body.size_hint().exact(), Some(0));
        assert!(body.frame().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_string_body() {
        let body = ContentBody::from(StringContent::new("Hello world"));
        assert_eq!(body.size_hint().exact(), Some(11));
        assert_eq!(body.collect().await.unwrap().to_bytes(), Bytes::from_static(b"Hello world"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_reader_body() {
        let body = ContentBody::from_reader(&b"streamed"[..], Some(8));
        assert_eq!(body.size_hint().exact(), Some(8));
        assert_eq!(body.collect().await.unwrap().to_bytes(), Bytes::from_static(b"streamed"));

        let body = ContentBody::from_reader(&b"unknown"[..], None);
        assert!(body.size_hint().exact().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_stream_content_body() {
        let content = StreamContent::with_length(&b"0123456789"[..], 6);
        let body = content.into_body().unwrap();

        assert_eq!(body.size_hint().exact(), Some(6));
        assert_eq!(body.collect().await.unwrap().to_bytes(), Bytes::from_static(b"012345"));
    }
}
