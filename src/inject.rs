//! Insert the rendered fragment into an existing HTML document.
//!
//! The document is streamed through `lol_html` twice: once to count the
//! elements matching the selector, once to append the fragment to the last
//! of them. Everything else passes through unchanged. A last match without
//! an end tag (void, or left open until EOF) is an error rather than a
//! silent no-op.

use crate::error::{Error, Result};
use lol_html::html_content::{ContentType, EndTag};
use lol_html::{element, rewrite_str, EndTagHandler, HandlerResult, RewriteStrSettings, Selector};
use std::cell::Cell;
use std::rc::Rc;

/// Container of the generated site pages.
pub const DEFAULT_SELECTOR: &str = "div.content";

/// Append `fragment` as the trailing content of the last element matching
/// `selector` and return the updated document.
pub fn inject(document: &str, fragment: &str, selector: &str) -> Result<String> {
    selector
        .parse::<Selector>()
        .map_err(|e| Error::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

    let mut matches = 0usize;
    rewrite_str(
        document,
        RewriteStrSettings {
            element_content_handlers: vec![element!(selector, |_el| {
                matches += 1;
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| Error::Rewrite(e.to_string()))?;

    if matches == 0 {
        return Err(Error::NotFound {
            selector: selector.to_string(),
        });
    }
    let target = matches - 1;
    tracing::debug!(selector, matches, "appending fragment to last match");

    let mut seen = 0usize;
    // set by the end tag handler of the target, which is where `append` lands
    let appended = Rc::new(Cell::new(false));
    let updated = rewrite_str(
        document,
        RewriteStrSettings {
            element_content_handlers: vec![element!(selector, |el| {
                if seen == target {
                    el.append(fragment, ContentType::Html);
                    if let Some(handlers) = el.end_tag_handlers() {
                        let appended = Rc::clone(&appended);
                        let handler: EndTagHandler<'static> =
                            Box::new(move |_end: &mut EndTag<'_>| -> HandlerResult {
                                appended.set(true);
                                Ok(())
                            });
                        handlers.push(handler);
                    }
                }
                seen += 1;
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| Error::Rewrite(e.to_string()))?;

    if !appended.get() {
        return Err(Error::Unclosed {
            selector: selector.to_string(),
        });
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Docs</title></head>
<body>
<div class="content"><p>first</p></div>
<div class="sidebar content-like">skip</div>
<div class="main content"><p>last</p></div>
</body></html>
"#;

    #[test]
    fn appends_to_last_container() {
        let out = inject(PAGE, "<section>generated</section>", DEFAULT_SELECTOR).unwrap();
        assert!(out.contains(r#"<div class="content"><p>first</p></div>"#));
        assert!(out.contains(
            r#"<div class="main content"><p>last</p><section>generated</section></div>"#
        ));
        assert_eq!(out.matches("generated").count(), 1);
    }

    #[test]
    fn rest_of_document_is_untouched() {
        let out = inject(PAGE, "<i>x</i>", DEFAULT_SELECTOR).unwrap();
        assert_eq!(out.replace("<i>x</i>", ""), PAGE);
    }

    #[test]
    fn missing_container_is_not_found() {
        let err = inject("<html><body><div>nothing</div></body></html>", "<p/>", DEFAULT_SELECTOR)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { ref selector } if selector == "div.content"));
    }

    #[test]
    fn custom_selector() {
        let out = inject(r#"<main id="docs"></main>"#, "<p>hi</p>", "main#docs").unwrap();
        assert_eq!(out, r#"<main id="docs"><p>hi</p></main>"#);
    }

    #[test]
    fn unclosed_last_container_is_an_error() {
        let err = inject(
            r#"<div class="content"><p>x</p>"#,
            "<section>generated</section>",
            DEFAULT_SELECTOR,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unclosed { ref selector } if selector == "div.content"));
    }

    #[test]
    fn void_element_cannot_receive_content() {
        let err = inject(r#"<p><img class="content"></p>"#, "<b>x</b>", "img.content").unwrap_err();
        assert!(matches!(err, Error::Unclosed { .. }));
    }

    #[test]
    fn invalid_selector_is_rejected() {
        let err = inject(PAGE, "<p/>", "div[").unwrap_err();
        assert!(matches!(err, Error::InvalidSelector { .. }));
    }
}
