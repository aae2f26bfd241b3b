//! URL shape validation for source and base URLs.

use url::Url;

use crate::error::AppError;

/// Validates that `input` is a well-formed http(s) URL with a host.
///
/// # Errors
///
/// Returns [`AppError::InvalidSourceUrl`] for anything else, including
/// non-http schemes like `javascript:` or `file:`.
pub fn validate_source_url(input: &str) -> Result<(), AppError> {
    check_http_url(input).map_err(AppError::InvalidSourceUrl)
}

/// Validates the configured base URL used to compose short links.
///
/// # Errors
///
/// Returns [`AppError::InvalidBaseUrl`] when the base URL is not a
/// well-formed http(s) URL.
pub fn validate_base_url(input: &str) -> Result<(), AppError> {
    check_http_url(input).map_err(AppError::InvalidBaseUrl)
}

fn check_http_url(input: &str) -> Result<(), String> {
    let url = Url::parse(input).map_err(|e| format!("{input:?}: {e}"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("{input:?}: unsupported scheme {other:?}")),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("{input:?}: missing host"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_source_url("http://example.com").is_ok());
        assert!(validate_source_url("https://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_rejects_malformed() {
        for input in ["", "not-a-url", "example.com", "http//broken"] {
            let result = validate_source_url(input);
            assert!(
                matches!(result, Err(AppError::InvalidSourceUrl(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        for input in ["ftp://example.com", "javascript:alert(1)", "file:///etc/passwd"] {
            assert!(validate_source_url(input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_base_url_error_kind() {
        let result = validate_base_url("nope");
        assert!(matches!(result, Err(AppError::InvalidBaseUrl(_))));
    }
}
