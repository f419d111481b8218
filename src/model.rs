//! Data model for scanned condition documentation.

/// The two documentation tag kinds recognized in source comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `+cty:condition:for=<Resource>`
    Condition,
    /// `+cty:reason:for=<Resource>/<Condition>`
    Reason,
}

/// Parameters captured from the tag line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTarget {
    pub resource: String,
    /// Parent condition, only set for reason tags.
    pub condition: Option<String>,
}

/// Metadata extracted from the declaration line following a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared identifier, e.g. `ConditionReady`.
    pub const_name: String,
    /// String literal value, or the identifier when no literal is present.
    pub value: String,
}

/// One tag occurrence as produced by the file scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagResult {
    pub kind: TagKind,
    pub target: TagTarget,
    pub declaration: Declaration,
    /// Paragraph and bullet segments joined with `\n`.
    pub comment: String,
    /// 1-based line of the tag.
    pub line: usize,
}

/// A documented reason for a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonDoc {
    /// Display name (the literal value).
    pub name: String,
    pub const_name: String,
    pub description: String,
}

/// A documented condition type and its reasons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionDoc {
    pub name: String,
    /// Empty while the entry is a placeholder created by a reason tag.
    pub const_name: String,
    pub description: String,
    /// Sorted by name once aggregation finishes.
    pub reasons: Vec<ReasonDoc>,
}

/// A resource and every condition documented for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDoc {
    pub name: String,
    pub conditions: Vec<ConditionDoc>,
}
