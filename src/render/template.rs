//! Placeholder templates for the render tree.
//!
//! Syntax:
//! - `{{key}}` is replaced by the value of `key` (unknown keys render empty)
//! - `{{?key}}...{{/key}}` is kept only when `key` is non-empty
//! - `{{!key}}...{{/key}}` is kept only when `key` is empty
//!
//! Blocks do not nest. Values are inserted verbatim; callers escape them
//! beforehand.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{([?!])(\w+)\}\}(.*?)\{\{/(\w+)\}\}").unwrap()
});

static RE_BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[?!/]\w+\}\}").unwrap());

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap());

const SECTION_TEMPLATE: &str = r#"
<div class="card">
  <div class="card-header">
    <span class="icon icon-cog"></span>
    <div>
      <strong>{{title}}</strong>
      <div style="font-size: 0.9rem; opacity: 0.8;">Condition types &amp; reasons</div>
    </div>
  </div>

  <div class="card-body">
    <div class="accordion" id="conditions-root">
      {{?children}}{{children}}{{/children}}{{!children}}<p class="muted">No conditions found.</p>{{/children}}
    </div>
  </div>
</div>"#;

const RESOURCE_TEMPLATE: &str = r#"
<div class="accordion-item">
  <button class="accordion-button collapsed" type="button" onclick="toggleAccordion(this)">
    <div style="width: 100%;">
      <div class="property-info">
        <span class="property-name">{{name}}</span>
        <span class="property-type property-required">Condition Options</span>
      </div>
      <div class="property-description">Condition types for the {{name}} resource.</div>
    </div>
  </button>
  <div class="collapse">
    <div class="accordion-body">
      <div class="accordion" id="conditions-{{id}}">
        {{?children}}{{children}}{{/children}}{{!children}}<p class="muted">No conditions documented for this resource.</p>{{/children}}
      </div>
    </div>
  </div>
</div>"#;

const CONDITION_TEMPLATE: &str = r#"
<div class="accordion-item">
  <button class="accordion-button collapsed" type="button" onclick="toggleAccordion(this)">
    <div style="width: 100%;">
      <div class="property-info">
        <span class="property-name">{{name}}</span>
        <span class="property-type property-required">Condition Type</span>
        <span class="property-type">string</span>
      </div>
      {{?description}}<div class="property-description">{{description}}</div>{{/description}}
    </div>
  </button>
  <div class="collapse">
    <div class="accordion-body">
      <h4 class="d-flex align-items-center gap-2 mb-4">
        Reasons
      </h4>
      <p>
        <span class="icon icon-info"></span>
        Possible reasons for the condition
      </p>
      <div class="accordion" id="reasons-{{id}}">
        {{?children}}{{children}}{{/children}}{{!children}}<p class="muted">No specific reasons documented.</p>{{/children}}
      </div>
    </div>
  </div>
</div>"#;

const REASON_TEMPLATE: &str = r#"
<div class="accordion-item-static">
  <div class="property-info">
    <span class="property-name">{{name}}</span>
    <span class="property-type property-required">Reason Type</span>
    <span class="property-type">string</span>
  </div>
  {{?description}}<div class="property-description">{{description}}</div>{{/description}}
</div>"#;

/// An immutable template source.
#[derive(Debug, Clone)]
pub struct Template {
    source: Cow<'static, str>,
}

impl Template {
    pub fn new(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Check that every `{{?key}}`/`{{!key}}` is closed by its own
    /// `{{/key}}`, with no nesting and no stray closing tags.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let balanced = RE_BLOCK.replace_all(&self.source, |caps: &Captures| {
            if caps[2] == caps[4] {
                String::new()
            } else {
                caps[0].to_string()
            }
        });
        match RE_BLOCK_TAG.find(&balanced) {
            Some(tag) => Err(format!("unbalanced block tag `{}`", tag.as_str())),
            None => Ok(()),
        }
    }

    /// Fill the template with `vars`.
    ///
    /// Conditional blocks are resolved against the raw template first, then
    /// placeholders are substituted in a single pass, so substituted values
    /// are never interpreted as template syntax.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let lookup = |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .unwrap_or_default()
        };

        let resolved = RE_BLOCK.replace_all(&self.source, |caps: &Captures| {
            let (mode, key, body, closing) = (&caps[1], &caps[2], &caps[3], &caps[4]);
            if key != closing {
                // not a matched pair, leave it alone
                return caps[0].to_string();
            }
            let present = !lookup(key).is_empty();
            let keep = if mode == "?" { present } else { !present };
            if keep {
                body.to_string()
            } else {
                String::new()
            }
        });

        RE_PLACEHOLDER
            .replace_all(&resolved, |caps: &Captures| lookup(&caps[1]).to_string())
            .into_owned()
    }
}

/// The template of every node type, built once per run.
#[derive(Debug, Clone)]
pub struct Templates {
    pub section: Template,
    pub resource: Template,
    pub condition: Template,
    pub reason: Template,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            section: Template::new(SECTION_TEMPLATE),
            resource: Template::new(RESOURCE_TEMPLATE),
            condition: Template::new(CONDITION_TEMPLATE),
            reason: Template::new(REASON_TEMPLATE),
        }
    }
}

impl Templates {
    /// Built-in templates, overridden by `section.html`, `resource.html`,
    /// `condition.html` and `reason.html` found in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut templates = Self::default();
        for (file, slot) in [
            ("section.html", &mut templates.section),
            ("resource.html", &mut templates.resource),
            ("condition.html", &mut templates.condition),
            ("reason.html", &mut templates.reason),
        ] {
            let path = dir.join(file);
            if !path.is_file() {
                continue;
            }
            let source = fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let template = Template::new(source);
            template
                .validate()
                .map_err(|message| Error::InvalidTemplate {
                    path: path.clone(),
                    message,
                })?;
            tracing::debug!(path = %path.display(), "using template override");
            *slot = template;
        }
        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_substituted() {
        let tpl = Template::new("<b>{{name}}</b> {{ id }} {{missing}}.");
        assert_eq!(
            tpl.render(&[("name", "Ready"), ("id", "ready")]),
            "<b>Ready</b> ready ."
        );
    }

    #[test]
    fn conditional_blocks() {
        let tpl = Template::new("{{?children}}[{{children}}]{{/children}}{{!children}}none{{/children}}");
        assert_eq!(tpl.render(&[("children", "x")]), "[x]");
        assert_eq!(tpl.render(&[("children", "")]), "none");
        assert_eq!(tpl.render(&[]), "none");
    }

    #[test]
    fn blocks_span_lines() {
        let tpl = Template::new("a{{?d}}\n<p>{{d}}</p>\n{{/d}}b");
        assert_eq!(tpl.render(&[("d", "text")]), "a\n<p>text</p>\nb");
        assert_eq!(tpl.render(&[]), "ab");
    }

    #[test]
    fn values_are_not_reinterpreted() {
        let tpl = Template::new("{{name}}");
        assert_eq!(tpl.render(&[("name", "{{id}}"), ("id", "oops")]), "{{id}}");
    }

    #[test]
    fn builtin_templates_are_balanced() {
        let templates = Templates::default();
        for tpl in [
            &templates.section,
            &templates.resource,
            &templates.condition,
            &templates.reason,
        ] {
            assert_eq!(tpl.validate(), Ok(()));
        }
    }

    #[test]
    fn unbalanced_blocks_detected() {
        let mismatched = Template::new("{{?name}}<b>{{name}}</b>{{/other}}");
        assert_eq!(
            mismatched.validate(),
            Err("unbalanced block tag `{{?name}}`".to_string())
        );
        assert!(Template::new("{{!children}}none").validate().is_err());
        assert!(Template::new("text{{/children}}").validate().is_err());
        assert!(Template::new("{{?a}}{{?b}}x{{/b}}{{/a}}").validate().is_err());
    }

    #[test]
    fn load_rejects_unbalanced_override() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("condition.html"), "{{?description}}{{description}}").unwrap();

        let err = Templates::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate { ref path, .. } if path.ends_with("condition.html")));
        assert!(err.to_string().contains("{{?description}}"));
    }

    #[test]
    fn load_overrides_only_present_files() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("reason.html"), "<li>{{name}}</li>").unwrap();

        let templates = Templates::load(dir.path()).unwrap();
        assert_eq!(templates.reason.render(&[("name", "Failed")]), "<li>Failed</li>");
        assert!(templates
            .section
            .render(&[("title", "T")])
            .contains("<strong>T</strong>"));
    }
}
