use std::path::Path;

use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped in a listing link so it stays a relative path reference
const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const LISTING_HEAD: &str =
    "<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n";

/// HTML page linking every entry of `dir`, sorted by name.
///
/// Subdirectories carry a trailing `/` in both the link and the label.
pub async fn directory_listing(dir: &Path) -> std::io::Result<Response> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    Ok(([(CONTENT_TYPE, "text/html; charset=utf-8")], render(&names)).into_response())
}

fn render(names: &[String]) -> String {
    let mut page = String::from(LISTING_HEAD);
    for name in names {
        let href = utf8_percent_encode(name, HREF).to_string();
        page.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            escape_html(&href),
            escape_html(name)
        ));
    }
    page.push_str("</pre>\n");
    page
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
