//! Server-side HTML rendering.
//!
//! Every dynamic value goes through `escape`; pages are plain strings wrapped
//! by `layout`.

pub mod appeals;
pub mod clamps;
pub mod invoices;

use std::fmt::Write;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; color: #222; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #ccc; padding: .3rem .6rem; text-align: left; }
.notice { background: #fff3cd; border: 1px solid #e0c36a; padding: .5rem 1rem; }
form.inline { display: inline; }
label { display: block; margin-top: .4rem; }
"#;

pub fn layout(title: &str, notice: Option<&str>, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} · Clamping Business Admin</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="/">Clamps</a><a href="/appeals">Appeals</a><a href="/invoicing">Invoicing</a></nav>
<h1>{title}</h1>
"#,
        title = escape(title),
    );

    if let Some(n) = notice.filter(|n| !n.is_empty()) {
        let _ = writeln!(html, r#"<p class="notice">{}</p>"#, escape(n));
    }

    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

/// `<select>` with `selected` on the option equal to `current`.
pub(crate) fn select(name: &str, options: &[&str], current: &str) -> String {
    let mut html = format!(r#"<select name="{}">"#, escape(name));
    for opt in options {
        let sel = if *opt == current { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{v}"{sel}>{v}</option>"#,
            v = escape(opt)
        );
    }
    html.push_str("</select>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom's" & co</b>"#),
            "&lt;b&gt;&quot;Tom&#39;s&quot; &amp; co&lt;/b&gt;"
        );
    }

    #[test]
    fn layout_shows_notice_only_when_present() {
        assert!(layout("Clamps", Some("Saved"), "").contains(r#"<p class="notice">Saved</p>"#));
        assert!(!layout("Clamps", None, "").contains("notice\">"));
    }

    #[test]
    fn select_marks_current_option() {
        let html = select("payment_status", &["Processing", "Paid"], "Paid");
        assert!(html.contains(r#"<option value="Paid" selected>"#));
        assert!(html.contains(r#"<option value="Processing">"#));
    }
}
