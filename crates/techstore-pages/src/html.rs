use std::borrow::Cow;

/// Escapes text for use in HTML element content and quoted attribute values.
pub(crate) fn escape(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 16);
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Inverse of [`escape`] for the five entities it produces.
#[cfg(test)]
pub(crate) fn unescape(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

const STAR_ICON: &str = r#"<svg class="rating-icon" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 22 20" fill="orange" height="15px" width="15px"><path d="M20.924 7.625a1.523 1.523 0 0 0-1.238-1.044l-5.051-.734-2.259-4.577a1.534 1.534 0 0 0-2.752 0L7.365 5.847l-5.051.734A1.535 1.535 0 0 0 1.463 9.2l3.656 3.563-.863 5.031a1.532 1.532 0 0 0 2.226 1.616L11 17.033l4.518 2.375a1.534 1.534 0 0 0 2.226-1.617l-.863-5.03L20.537 9.2a1.523 1.523 0 0 0 .387-1.575Z"/></svg>"#;

/// `count` star icons in a row.
pub(crate) fn star_icons(count: usize) -> String {
    let mut out = String::with_capacity(count * (STAR_ICON.len() + 13));
    for _ in 0..count {
        out.push_str("<span>");
        out.push_str(STAR_ICON);
        out.push_str("</span>");
    }
    out
}
