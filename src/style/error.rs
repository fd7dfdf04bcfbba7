//! Payload decoding errors.

/// Error returned when an engine response cannot be decoded into a
/// [`PropertyMap`](super::PropertyMap).
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The response is not valid JSON.
    #[error("malformed style payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The response is valid JSON but not an object.
    #[error("style payload is a {found}, expected an object")]
    NotAnObject { found: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_object_display() {
        let err = PayloadError::NotAnObject { found: "array" };
        let msg = err.to_string();
        assert!(msg.contains("array"));
        assert!(msg.contains("object"));
    }

    #[test]
    fn test_json_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = PayloadError::from(source);
        assert!(err.to_string().starts_with("malformed style payload"));
    }
}
