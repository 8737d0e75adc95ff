//! Adapts HTTP header maps to the dispatcher's header lookup.

use axum::http::HeaderMap;

use fulfilment::HeaderLookup;

/// Borrowed view over request headers.
///
/// Lookups are case-insensitive. Values that are not visible ASCII read as
/// absent.
#[derive(Debug, Clone, Copy)]
pub struct HttpHeaders<'a>(pub &'a HeaderMap);

impl HeaderLookup for HttpHeaders<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn reads_headers_regardless_of_case() {
        let mut map = HeaderMap::new();
        map.insert("api-key", HeaderValue::from_static("secret"));
        let headers = HttpHeaders(&map);
        assert_eq!(headers.header("API-Key"), Some("secret"));
        assert_eq!(headers.header("x-api-key"), None);
    }

    #[rstest]
    fn opaque_values_read_as_absent() {
        let mut map = HeaderMap::new();
        map.insert(
            "api-key",
            HeaderValue::from_bytes(b"caf\xe9").expect("opaque header value"),
        );
        assert_eq!(HttpHeaders(&map).header("api-key"), None);
    }
}
