//! HTML text helpers: escaping, comment formatting and id slugs.

use crate::parser::line;

/// Escape text for use in element content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Convert a description into `<p>`/`<ul>` markup.
///
/// Empty lines separate paragraphs, wrapped lines of one paragraph are
/// joined with a space, and consecutive bullet lines (`-`, `*`, `•`) become
/// one list. All literal text is escaped.
pub fn format_comment(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut bullets: Vec<&str> = Vec::new();

    fn flush_paragraph(paragraph: &mut Vec<&str>, out: &mut Vec<String>) {
        if paragraph.is_empty() {
            return;
        }
        out.push(format!("<p>{}</p>", html_escape(&paragraph.join(" "))));
        paragraph.clear();
    }

    fn flush_bullets(bullets: &mut Vec<&str>, out: &mut Vec<String>) {
        if bullets.is_empty() {
            return;
        }
        out.push("<ul>".to_string());
        for item in bullets.iter() {
            out.push(format!("<li>{}</li>", html_escape(bullet_text(item))));
        }
        out.push("</ul>".to_string());
        bullets.clear();
    }

    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            flush_bullets(&mut bullets, &mut out);
            flush_paragraph(&mut paragraph, &mut out);
        } else if line::is_bullet(trimmed) {
            flush_paragraph(&mut paragraph, &mut out);
            bullets.push(trimmed);
        } else {
            flush_bullets(&mut bullets, &mut out);
            paragraph.push(trimmed);
        }
    }

    flush_bullets(&mut bullets, &mut out);
    flush_paragraph(&mut paragraph, &mut out);
    out.join("\n")
}

/// Item text of a trimmed bullet line, without its marker.
fn bullet_text(item: &str) -> &str {
    let mut chars = item.chars();
    chars.next();
    chars.as_str().trim_start()
}

/// Lower-case id fragment: whitespace becomes `-`, other characters outside
/// `[a-z0-9_-]` are dropped.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            out.push('-');
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        }
    }
    out
}
