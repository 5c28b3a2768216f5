//! Asynchronous HTTP message content
//!
//! This crate provides the payload side of an HTTP exchange: a polymorphic content
//! object that a transport can measure, push to a sink, or pull as a stream,
//! without caring how the bytes are held in memory.
//!
//! # Features
//!
//! - Zero-copy byte range content over shared [`bytes::Bytes`] buffers
//! - Text content with a media type
//! - Single-shot streaming content backed by any `tokio::io::AsyncRead`
//! - Read-only, seekable readers for replaying a payload (retries, redirects)
//! - Cooperative cancellation of in-flight serialization
//! - An `http_body::Body` adapter and `Content-Length` / `Content-Type` derivation
//!
//! # Example
//!
//! ```no_run
//! use micro_content::content::{ByteRangeContent, ContentError, HttpContent};
//! use micro_content::headers::content_headers;
//! use tokio::io::AsyncReadExt;
//! use tokio::net::TcpStream;
//! use tracing::{info, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ContentError> {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
//!     tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//!     let payload = bytes::Bytes::from_static(b"--Hello World!--");
//!     let content = ByteRangeContent::with_range(payload, 2, 12)?;
//!
//!     let headers = content_headers(&content);
//!     info!(?headers, "derived content headers");
//!
//!     let mut stream = TcpStream::connect("127.0.0.1:8080").await?;
//!     content.serialize_to(&mut stream).await?;
//!
//!     // replay the same bytes, e.g. after a redirect
//!     let mut replay = String::new();
//!     content.read_stream().await?.read_to_string(&mut replay).await?;
//!     assert_eq!(replay, "Hello World!");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`content`]: the [`content::HttpContent`] capability set and its variants
//! - [`body`]: [`body::ContentBody`], an `http_body::Body` over content
//! - [`headers`]: header values derived from a content
//!
//! # Error Handling
//!
//! All fallible operations return [`content::ContentError`]. Argument errors are
//! reported at construction, so a content never exists with an invalid window.
//! Sink and stream failures are passed through untouched; nothing is retried here.

pub mod body;
pub mod content;
pub mod headers;

mod utils;
pub(crate) use utils::ensure;
