use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;

use super::{RemoteEndpoints, TextSource};

/// A client that fails to build is reported as `SourceError::Http` from `fetch`
fn build_client(timeout: Duration) -> Result<Client, SourceError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Word list from a `?words=N&length=L` service answering with a JSON array
#[derive(Debug, Clone)]
pub struct WordApiSource {
    timeout: Duration,
    endpoint: String,
    count: usize,
    length: Option<usize>,
    fallback: String,
}

impl WordApiSource {
    pub fn new(
        endpoints: &RemoteEndpoints,
        count: usize,
        length: Option<usize>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            timeout: endpoints.timeout,
            endpoint: endpoints.word_api_url.clone(),
            count,
            length,
            fallback: fallback.into(),
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("words", self.count.to_string())];
        if let Some(length) = self.length {
            query.push(("length", length.to_string()));
        }
        query
    }
}

impl TextSource for WordApiSource {
    fn fetch(&self) -> Result<String, SourceError> {
        debug!(endpoint = %self.endpoint, count = self.count, "fetching words");
        let body = build_client(self.timeout)?
            .get(&self.endpoint)
            .query(&self.query())
            .send()?
            .error_for_status()?
            .text()?;
        parse_word_list(&body)
    }

    fn fallback(&self) -> &str {
        &self.fallback
    }

    fn is_remote(&self) -> bool {
        true
    }
}

/// Single snippet from a service answering with `{"code": "..."}`
#[derive(Debug, Clone)]
pub struct CodeSnippetSource {
    timeout: Duration,
    endpoint: String,
    fallback: String,
}

impl CodeSnippetSource {
    pub fn new(endpoints: &RemoteEndpoints, fallback: impl Into<String>) -> Self {
        Self {
            timeout: endpoints.timeout,
            endpoint: endpoints.code_api_url.clone(),
            fallback: fallback.into(),
        }
    }
}

impl TextSource for CodeSnippetSource {
    fn fetch(&self) -> Result<String, SourceError> {
        debug!(endpoint = %self.endpoint, "fetching code snippet");
        let body = build_client(self.timeout)?
            .get(&self.endpoint)
            .send()?
            .error_for_status()?
            .text()?;
        parse_snippet(&body)
    }

    fn fallback(&self) -> &str {
        &self.fallback
    }

    fn is_remote(&self) -> bool {
        true
    }
}

#[derive(Deserialize)]
struct Snippet {
    code: Option<String>,
}

pub fn parse_word_list(body: &str) -> Result<String, SourceError> {
    let words: Vec<String> = serde_json::from_str(body)?;
    let words: Vec<&str> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(words.join(" "))
}

pub fn parse_snippet(body: &str) -> Result<String, SourceError> {
    let snippet: Snippet = serde_json::from_str(body)?;
    // CRLF would demand a carriage return nobody can type
    let code = snippet.code.unwrap_or_default().replace("\r\n", "\n");
    let code = code.trim_end();
    if code.trim().is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::load_text;

    #[test]
    fn word_list_is_joined_with_single_spaces() {
        assert_eq!(
            parse_word_list(r#"["alpha", "beta", " gamma "]"#).unwrap(),
            "alpha beta gamma"
        );
    }

    #[test]
    fn empty_word_list_is_an_error() {
        assert!(matches!(parse_word_list("[]"), Err(SourceError::Empty)));
        assert!(matches!(
            parse_word_list(r#"{"error": true}"#),
            Err(SourceError::Decode(_))
        ));
    }

    #[test]
    fn snippet_is_normalised() {
        let body = r#"{"code": "let x = 1;\r\nlet y = 2;\n\n"}"#;
        assert_eq!(parse_snippet(body).unwrap(), "let x = 1;\nlet y = 2;");
    }

    #[test]
    fn missing_snippet_is_empty() {
        assert!(matches!(parse_snippet("{}"), Err(SourceError::Empty)));
        assert!(matches!(
            parse_snippet(r#"{"code": "  "}"#),
            Err(SourceError::Empty)
        ));
    }

    #[test]
    fn query_includes_optional_length() {
        let endpoints = RemoteEndpoints::default();
        let with_len = WordApiSource::new(&endpoints, 10, Some(4), "x");
        assert_eq!(
            with_len.query(),
            vec![("words", "10".to_string()), ("length", "4".to_string())]
        );
        let without = WordApiSource::new(&endpoints, 5, None, "x");
        assert_eq!(without.query(), vec![("words", "5".to_string())]);
    }

    #[test]
    fn sources_keep_the_configured_timeout() {
        let endpoints = RemoteEndpoints {
            timeout: Duration::from_secs(2),
            ..RemoteEndpoints::default()
        };
        let words = WordApiSource::new(&endpoints, 1, None, "x");
        let code = CodeSnippetSource::new(&endpoints, "x");
        assert_eq!(words.timeout, Duration::from_secs(2));
        assert_eq!(code.timeout, Duration::from_secs(2));
        assert!(build_client(endpoints.timeout).is_ok());
    }

    #[test]
    fn unreachable_service_falls_back() {
        // port 9 on loopback refuses connections
        let endpoints = RemoteEndpoints {
            word_api_url: "http://127.0.0.1:9/api".to_string(),
            code_api_url: "http://127.0.0.1:9/code".to_string(),
            timeout: Duration::from_millis(500),
        };
        let words = WordApiSource::new(&endpoints, 3, None, "hello world");
        assert!(matches!(words.fetch(), Err(SourceError::Http(_))));
        assert_eq!(load_text(&words), "hello world");

        let code = CodeSnippetSource::new(&endpoints, "fn main() {}");
        assert!(matches!(code.fetch(), Err(SourceError::Http(_))));
        assert_eq!(load_text(&code), "fn main() {}");
    }
}
