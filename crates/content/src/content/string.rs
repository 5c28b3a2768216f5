use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;
use tokio::io::AsyncWrite;
use tracing::trace;

use crate::body::ContentBody;
use crate::content::{ByteRangeContent, ContentError, ContentKind, ContentReadStream, HttpContent};

/// Text content with a media type, stored as a [`ByteRangeContent`] over its utf-8 bytes.
///
/// It reports [`ContentKind::String`], so [`HttpContent::read_stream`] always goes
/// through this type's own [`create_read_stream`](HttpContent::create_read_stream).
#[derive(Debug, Clone)]
pub struct StringContent {
    inner: ByteRangeContent,
    media_type: Mime,
}

impl StringContent {
    /// Creates `text/plain; charset=utf-8` content.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self::with_media_type(text, mime::TEXT_PLAIN_UTF_8)
    }

    pub fn with_media_type<S: Into<String>>(text: S, media_type: Mime) -> Self {
        let bytes = Bytes::from(text.into());
        Self { inner: ByteRangeContent::new(bytes), media_type }
    }

    #[inline]
    pub fn media_type(&self) -> &Mime {
        &self.media_type
    }

    pub fn as_str(&self) -> &str {
        // built from a `String`, so the whole buffer is valid utf-8
        std::str::from_utf8(self.inner.as_slice()).unwrap_or_default()
    }

    pub fn to_body(&self) -> ContentBody {
        self.inner.to_body()
    }
}

impl From<String> for StringContent {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StringContent {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<StringContent> for ContentBody {
    fn from(content: StringContent) -> Self {
        content.to_body()
    }
}

#[async_trait]
impl HttpContent for StringContent {
    #[inline]
    fn kind(&self) -> ContentKind {
        ContentKind::String
    }

    #[inline]
    fn compute_length(&self) -> Option<u64> {
        self.inner.compute_length()
    }

    async fn serialize_to(&self, sink: &mut (dyn AsyncWrite + Send + Unpin)) -> Result<(), ContentError> {
        self.inner.serialize_to(sink).await
    }

    async fn create_read_stream(&self) -> Result<ContentReadStream, ContentError> {
        trace!(media_type = %self.media_type, "create string content read stream");
        Ok(Box::pin(self.inner.reader()))
    }

    #[inline]
    fn allows_duplex(&self) -> bool {
        false
    }

    fn content_type(&self) -> Option<&Mime> {
        Some(&self.media_type)
    }

    async fn read_as_bytes(&self) -> Result<Bytes, ContentError> {
        Ok(self.inner.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::AsyncReadExt;

    /// Wraps a byte range and counts trips through its own stream creation.
    struct CountingContent {
        inner: ByteRangeContent,
        created: AtomicUsize,
    }

    #[async_trait]
    impl HttpContent for CountingContent {
        fn kind(&self) -> ContentKind {
            ContentKind::Other
        }

        fn compute_length(&self) -> Option<u64> {
            self.inner.compute_length()
        }

        async fn serialize_to(&self, sink: &mut (dyn AsyncWrite + Send + Unpin)) -> Result<(), ContentError> {
            self.inner.serialize_to(sink).await
        }

        async fn create_read_stream(&self) -> Result<ContentReadStream, ContentError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            self.inner.create_read_stream().await
        }

        fn allows_duplex(&self) -> bool {
            false
        }

        // forwards the fast path, which must still be ignored for a non byte range kind
        fn try_create_read_stream(&self) -> Option<ContentReadStream> {
            self.inner.try_create_read_stream()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_string_content() {
        let content = StringContent::new("Hello world");

        assert_eq!(content.kind(), ContentKind::String);
        assert_eq!(content.compute_length(), Some(11));
        assert_eq!(content.content_type(), Some(&mime::TEXT_PLAIN_UTF_8));
        assert_eq!(content.as_str(), "Hello world");
        assert!(!content.allows_duplex());

        let mut sink: Vec<u8> = Vec::new();
        content.serialize_to(&mut sink).await.unwrap();
        assert_eq!(sink, b"Hello world");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_read_stream_matches_serialization() {
        let content = StringContent::with_media_type(r#"{"a":1}"#, mime::APPLICATION_JSON);
        assert!(content.try_create_read_stream().is_none());

        let mut streamed = String::new();
        content.read_stream().await.unwrap().read_to_string(&mut streamed).await.unwrap();

        assert_eq!(streamed, r#"{"a":1}"#);
        assert_eq!(content.read_as_string().await.unwrap(), streamed);
        assert_eq!(content.media_type(), &mime::APPLICATION_JSON);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_specialized_content_skips_fast_path() {
        let content = CountingContent { inner: ByteRangeContent::new(Bytes::from_static(b"abc")), created: AtomicUsize::new(0) };
        assert!(content.try_create_read_stream().is_some());

        let mut out = Vec::new();
        content.read_stream().await.unwrap().read_to_end(&mut out).await.unwrap();

        assert_eq!(out, b"abc");
        assert_eq!(content.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_multibyte_length() {
        let content = StringContent::from("héllo");
        assert_eq!(content.compute_length(), Some(6));
        assert_eq!(content.read_as_string().await.unwrap(), "héllo");
    }
}
