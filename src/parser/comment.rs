//! Description text for a tag, built from the comment block around it.
//!
//! A tag usually sits somewhere inside a `//` block: documentation above,
//! below, or both. Every physically contiguous comment line is collected,
//! then grouped into paragraph and bullet segments.

use crate::parser::line;

/// Collect the comment block around `anchor` (exclusive) and join its
/// segments with `\n`.
pub fn surrounding_comment(lines: &[&str], anchor: usize) -> String {
    let mut comment_lines = comment_lines_before(lines, anchor);
    comment_lines.extend(comment_lines_after(lines, anchor));
    group_segments(&comment_lines).join("\n")
}

/// Trimmed comment lines directly above `anchor`, in top-down order.
fn comment_lines_before<'a>(lines: &[&'a str], anchor: usize) -> Vec<&'a str> {
    let mut before: Vec<&str> = lines[..anchor.min(lines.len())]
        .iter()
        .copied()
        .rev()
        .take_while(|l| line::is_comment(l))
        .map(line::trim_comment_marker)
        .collect();
    before.reverse();
    before
}

/// Trimmed comment lines directly below `anchor`.
fn comment_lines_after<'a>(lines: &[&'a str], anchor: usize) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .skip(anchor + 1)
        .take_while(|l| line::is_comment(l))
        .map(line::trim_comment_marker)
        .collect()
}

/// Group trimmed comment lines into segments.
///
/// Bullet lines become their own segment with the marker kept. Runs of
/// other lines form one paragraph joined by `\n`; an empty line ends the
/// current paragraph.
pub fn group_segments<S: AsRef<str>>(comment_lines: &[S]) -> Vec<String> {
    let mut segments = Vec::new();
    let mut paragraph = String::new();

    fn flush(paragraph: &mut String, segments: &mut Vec<String>) {
        if !paragraph.is_empty() {
            segments.push(std::mem::take(paragraph));
        }
    }

    for text in comment_lines.iter().map(AsRef::as_ref) {
        if line::is_bullet(text) {
            flush(&mut paragraph, &mut segments);
            segments.push(text.to_string());
            continue;
        }
        if text.trim().is_empty() {
            flush(&mut paragraph, &mut segments);
            continue;
        }
        if !paragraph.is_empty() {
            paragraph.push('\n');
        }
        paragraph.push_str(text);
    }

    flush(&mut paragraph, &mut segments);
    segments
}
