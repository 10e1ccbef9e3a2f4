use thiserror::Error;

/// Errors surfaced by the typing engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The reference text is empty; there is nothing to type.
    #[error("no content to type")]
    NoContent,
}

/// Errors raised while fetching reference text.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unable to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("source returned no text")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(EngineError::NoContent.to_string(), "no content to type");
        assert_eq!(SourceError::Empty.to_string(), "source returned no text");
    }

    #[test]
    fn decode_error_converts() {
        let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: SourceError = err.into();
        assert!(err.to_string().starts_with("unable to decode response"));
    }
}
