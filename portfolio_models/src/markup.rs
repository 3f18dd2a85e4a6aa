//! Escaping of markup-significant characters.

use std::sync::LazyLock;

use regex::Regex;

static CHARACTER_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").unwrap()
});

/// Escapes `&`, `<`, `>`, `"` and `'` so the value can be embedded verbatim
/// in HTML.
///
/// An ampersand that already starts a character reference is kept as is, so
/// escaping an escaped value is a no-op.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        match c {
            '&' if CHARACTER_REFERENCE_REGEX.is_match(&value[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x" title='y'>Tom & Jerry</a>"#),
            "&lt;a href=&quot;x&quot; title=&#039;y&#039;&gt;Tom &amp; Jerry&lt;/a&gt;"
        );
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(escape_html("Hello, Wörld!"), "Hello, Wörld!");
    }

    #[test]
    fn idempotent() {
        for input in [
            "<script>alert('x')</script>",
            "a & b",
            "AT&T; &amp; &lt;",
            r#""quoted" & 'single'"#,
            "&#039; &#x27; &nbsp; & #39;",
            "&",
            "&;",
        ] {
            let once = escape_html(input);
            let twice = escape_html(&once);
            assert_eq!(once, twice, "{input}");
        }
    }

    #[test]
    fn keeps_character_references() {
        assert_eq!(escape_html("&lt; &#60; &#x3C;"), "&lt; &#60; &#x3C;");
        assert_eq!(escape_html("& lt;"), "&amp; lt;");
    }
}
