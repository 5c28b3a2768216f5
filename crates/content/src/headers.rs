//! Header values a transport derives from a content before sending it.

use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use tracing::warn;

use crate::content::HttpContent;

/// Builds the `Content-Length` and `Content-Type` headers describing `content`.
///
/// `Content-Length` is present only when the length is known; a transport that
/// gets none back has to pick another framing for the body.
pub fn content_headers(content: &dyn HttpContent) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);

    if let Some(length) = content.compute_length() {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    }

    if let Some(media_type) = content.content_type() {
        match HeaderValue::from_str(media_type.as_ref()) {
            Ok(value) => {
                headers.insert(CONTENT_TYPE, value);
            }
            Err(e) => warn!(media_type = %media_type, cause = %e, "skip invalid content-type"),
        }
    }

    headers
}
