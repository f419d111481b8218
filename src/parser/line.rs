//! Single-line predicates for `//` comments.

/// Line comment marker of the scanned sources.
pub const COMMENT_MARKER: &str = "//";

/// Markers that start a bullet item inside a comment.
const BULLET_MARKERS: &[char] = &['-', '*', '•'];

/// True if the line is a `//` comment, ignoring leading indentation.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}

/// Strip indentation, the comment marker and one following space.
///
/// Non-comment lines are returned without their surrounding whitespace.
pub fn trim_comment_marker(line: &str) -> &str {
    let s = line.trim_start();
    let s = match s.strip_prefix(COMMENT_MARKER) {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => s,
    };
    s.trim_end()
}

/// True if trimmed comment text starts a bullet item (`- `, `* `, `• `).
///
/// One extra level of indentation (a single space or tab) is tolerated, so
/// `//  - item` counts as a bullet too.
pub fn is_bullet(text: &str) -> bool {
    let t = text
        .strip_prefix(|c: char| c == ' ' || c == '\t')
        .unwrap_or(text);
    let mut chars = t.chars();
    match (chars.next(), chars.next()) {
        (Some(marker), Some(' ')) => BULLET_MARKERS.contains(&marker),
        _ => false,
    }
}
