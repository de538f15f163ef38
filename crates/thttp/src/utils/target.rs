use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

use crate::errors::{ThttpError, ThttpResult};

/// Resolve a fetch target into a URL.
///
/// A target with its own scheme and host is used as given. A target starting
/// with `//` gets the `http` scheme. Anything else is treated as a path on
/// the local server, `http://localhost:<port>/`.
pub fn resolve_target(target: &str, port: &str) -> ThttpResult<Url> {
    let invalid = || ThttpError::InvalidUrl {
        url: target.to_string(),
    };

    if target.starts_with("//") {
        return Url::parse(&format!("http:{}", target)).map_err(|_| invalid());
    }

    match Url::parse(target) {
        Ok(url) if url.has_host() => Ok(url),
        Ok(_) => Err(invalid()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(&format!("http://localhost:{}/", port)).map_err(|_| invalid())?;
            base.join(target).map_err(|_| invalid())
        }
        Err(_) => Err(invalid()),
    }
}

/// Local file name for a fetched URL: its last non-empty path segment,
/// percent-decoded.
pub fn file_name_for(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;
    let name = percent_decode_str(segment).decode_utf8().ok()?;

    match name.as_ref() {
        "." | ".." => None,
        name if name.contains('/') || name.contains('\\') => None,
        name => Some(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_path_resolves_to_local_server() {
        let url = resolve_target("foo.txt", "9090").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9090/foo.txt");

        let url = resolve_target("/dir/bar.bin", "8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/dir/bar.bin");
    }

    #[test]
    fn test_hostless_name_is_a_local_path() {
        let url = resolve_target("example.com/index.html", "9090").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9090/example.com/index.html");
    }

    #[test]
    fn test_absolute_url_is_kept() {
        let url = resolve_target("https://example.com/a/b.txt?x=1", "9090").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a/b.txt?x=1");
    }

    #[test]
    fn test_scheme_relative_defaults_to_http() {
        let url = resolve_target("//example.com/file", "9090").unwrap();
        assert_eq!(url.as_str(), "http://example.com/file");
    }

    #[test]
    fn test_schemes_without_host_are_invalid() {
        let result = resolve_target("mailto:someone@example.com", "9090");
        assert!(matches!(result, Err(ThttpError::InvalidUrl { .. })));
    }

    #[test]
    fn test_file_name_for() {
        let url = Url::parse("http://localhost:9090/dir/report.txt").unwrap();
        assert_eq!(file_name_for(&url).as_deref(), Some("report.txt"));

        let url = Url::parse("http://localhost:9090/dir/").unwrap();
        assert_eq!(file_name_for(&url).as_deref(), Some("dir"));

        let url = Url::parse("http://localhost:9090/my%20file.txt").unwrap();
        assert_eq!(file_name_for(&url).as_deref(), Some("my file.txt"));

        let url = Url::parse("http://localhost:9090/").unwrap();
        assert_eq!(file_name_for(&url), None);

        let url = Url::parse("http://localhost:9090/a%2F..%2Fb").unwrap();
        assert_eq!(file_name_for(&url), None);
    }
}
