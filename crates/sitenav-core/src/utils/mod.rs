/// Escape markup characters so a page title is safe to display.
///
/// # Examples
///
/// ```
/// use sitenav_core::sanitize_html;
///
/// assert_eq!(sanitize_html("Home"), "Home");
/// assert_eq!(sanitize_html("<b>New</b> & \"hot\""), "&lt;b&gt;New&lt;&#x2F;b&gt; &amp; &quot;hot&quot;");
/// ```
pub fn sanitize_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Last non-empty segment of a slash-delimited path.
///
/// ```
/// use sitenav_core::utils::last_segment;
///
/// assert_eq!(last_segment("/site/_pages/about"), Some("about"));
/// assert_eq!(last_segment("/site/about/"), Some("about"));
/// assert_eq!(last_segment("/"), None);
/// ```
pub fn last_segment(path: &str) -> Option<&str> {
    path.split('/').rev().find(|s| !s.is_empty())
}

/// Everything before the last segment, without a trailing slash.
///
/// ```
/// use sitenav_core::utils::parent_path;
///
/// assert_eq!(parent_path("/site/_pages/about"), Some("/site/_pages"));
/// assert_eq!(parent_path("/site"), Some(""));
/// assert_eq!(parent_path("site"), None);
/// ```
pub fn parent_path(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    trimmed.rfind('/').map(|idx| &trimmed[..idx])
}
