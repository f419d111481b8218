//! Fold scanned tags into the resource → condition → reason hierarchy.
//!
//! Tags arrive in scan order from many files. A reason may be seen before
//! its condition, in which case a placeholder condition is created and
//! completed in place once the condition tag shows up.

use crate::model::*;
use std::collections::BTreeMap;

/// Aggregate tag results into resources sorted by name, each with its
/// conditions and their reasons sorted by name.
pub fn aggregate(results: &[TagResult]) -> Vec<ResourceDoc> {
    // resource -> condition name -> condition
    let mut resources: BTreeMap<String, BTreeMap<String, ConditionDoc>> = BTreeMap::new();

    for result in results {
        match result.kind {
            TagKind::Condition => add_condition(&mut resources, result),
            TagKind::Reason => add_reason(&mut resources, result),
        }
    }

    resources
        .into_iter()
        .map(|(name, conditions)| ResourceDoc {
            name,
            conditions: conditions
                .into_values()
                .map(|mut condition| {
                    condition.reasons.sort_by(|a, b| a.name.cmp(&b.name));
                    condition
                })
                .collect(),
        })
        .collect()
}

fn add_condition(
    resources: &mut BTreeMap<String, BTreeMap<String, ConditionDoc>>,
    result: &TagResult,
) {
    let resource = result.target.resource.as_str();
    let name = result.declaration.value.as_str();
    if resource.is_empty() || name.is_empty() {
        tracing::debug!(line = result.line, "skipping condition tag without resource or name");
        return;
    }

    let description = result.comment.trim();
    let condition = resources
        .entry(resource.to_string())
        .or_default()
        .entry(name.to_string())
        .or_insert_with(|| ConditionDoc {
            name: name.to_string(),
            ..Default::default()
        });

    // Placeholders from earlier reason tags get completed here
    if condition.const_name.is_empty() {
        condition.const_name = result.declaration.const_name.clone();
    }
    if condition.description.is_empty() && !description.is_empty() {
        condition.description = description.to_string();
    }
}

fn add_reason(
    resources: &mut BTreeMap<String, BTreeMap<String, ConditionDoc>>,
    result: &TagResult,
) {
    let resource = result.target.resource.as_str();
    let condition_name = result.target.condition.as_deref().unwrap_or_default();
    let name = result.declaration.value.as_str();
    if resource.is_empty() || condition_name.is_empty() || name.is_empty() {
        tracing::debug!(line = result.line, "skipping reason tag without resource, condition or name");
        return;
    }

    let condition = resources
        .entry(resource.to_string())
        .or_default()
        .entry(condition_name.to_string())
        .or_insert_with(|| {
            tracing::debug!(resource, condition = condition_name, "creating placeholder condition");
            ConditionDoc {
                name: condition_name.to_string(),
                ..Default::default()
            }
        });

    let reason = ReasonDoc {
        name: name.to_string(),
        const_name: result.declaration.const_name.clone(),
        description: result.comment.trim().to_string(),
    };
    add_reason_unique(&mut condition.reasons, reason);
}

/// Append unless a reason with the same name or identifier already exists.
fn add_reason_unique(reasons: &mut Vec<ReasonDoc>, reason: ReasonDoc) {
    let duplicate = reasons
        .iter()
        .any(|r| r.name == reason.name || r.const_name == reason.const_name);
    if duplicate {
        tracing::debug!(reason = %reason.name, "dropping duplicate reason");
        return;
    }
    reasons.push(reason);
}
