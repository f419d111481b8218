//! `+cty` tag recognition, one dispatch entry per [`TagKind`].
//!
//! ```text
//! // +cty:condition:for=ZeebeCluster
//! // +cty:reason:for=ZeebeCluster/EncryptionReady
//! ```

use crate::error::TagError;
use crate::model::{Declaration, TagKind, TagTarget};
use crate::parser::declaration;
use regex::Regex;
use std::sync::LazyLock;

static RE_CONDITION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*//.*\+cty:condition:for\b").unwrap());

static RE_CONDITION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+cty:condition:for\s*(?:=\s*(?P<resource>\S*))?").unwrap()
});

static RE_REASON_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*//.*\+cty:reason:for\b").unwrap());

// optional spaces around '=' and '/'
static RE_REASON_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\+cty:reason:for\s*(?:=\s*(?P<resource>[^\s/]*)\s*(?:/\s*(?P<condition>\S*))?)?",
    )
    .unwrap()
});

/// Matching and extraction functions of one tag kind.
struct TagRule {
    matches: fn(&str) -> bool,
    parse_target: fn(&str) -> Result<TagTarget, TagError>,
}

static CONDITION: TagRule = TagRule {
    matches: is_condition_tag,
    parse_target: parse_condition_target,
};

static REASON: TagRule = TagRule {
    matches: is_reason_tag,
    parse_target: parse_reason_target,
};

impl TagKind {
    /// Every kind, in the order the scanner tries them.
    pub const ALL: [TagKind; 2] = [TagKind::Condition, TagKind::Reason];

    fn rule(self) -> &'static TagRule {
        match self {
            TagKind::Condition => &CONDITION,
            TagKind::Reason => &REASON,
        }
    }

    /// Name used in the tag syntax (`+cty:<name>:for`).
    pub fn name(self) -> &'static str {
        match self {
            TagKind::Condition => "condition",
            TagKind::Reason => "reason",
        }
    }

    /// True if the line is a comment carrying this kind's tag marker.
    pub fn matches(self, line: &str) -> bool {
        (self.rule().matches)(line)
    }

    /// Extract the resource (and parent condition) named by the tag.
    pub fn parse_target(self, line: &str) -> Result<TagTarget, TagError> {
        (self.rule().parse_target)(line)
    }

    /// Extract identifier and value from the declaration following the tag.
    pub fn parse_declaration(self, line: &str) -> Result<Declaration, TagError> {
        declaration::parse(line)
    }
}

fn is_condition_tag(line: &str) -> bool {
    RE_CONDITION_MARKER.is_match(line)
}

fn is_reason_tag(line: &str) -> bool {
    RE_REASON_MARKER.is_match(line)
}

fn parse_condition_target(line: &str) -> Result<TagTarget, TagError> {
    let missing = TagError::MissingValue {
        kind: TagKind::Condition.name(),
    };
    let caps = RE_CONDITION_TAG.captures(line).ok_or(missing.clone())?;
    let resource = caps
        .name("resource")
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .ok_or(missing)?;

    Ok(TagTarget {
        resource: resource.to_string(),
        condition: None,
    })
}

fn parse_reason_target(line: &str) -> Result<TagTarget, TagError> {
    let caps = RE_REASON_TAG
        .captures(line)
        .ok_or(TagError::MissingValue {
            kind: TagKind::Reason.name(),
        })?;
    let group = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
    };

    if caps.name("resource").is_none() {
        return Err(TagError::MissingValue {
            kind: TagKind::Reason.name(),
        });
    }
    match (group("resource"), group("condition")) {
        (Some(resource), Some(condition)) => Ok(TagTarget {
            resource: resource.to_string(),
            condition: Some(condition.to_string()),
        }),
        _ => Err(TagError::InvalidReasonTarget),
    }
}
