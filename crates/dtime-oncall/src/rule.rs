use dtime_common::types::EmailMessage;
use serde::{Deserialize, Serialize};

/// A configured on-call rule: which sender it watches and which
/// keywords recognize an alert in the subject or body.
///
/// An empty keyword list leaves that field unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRule {
    pub name: String,
    /// Case-sensitive substring the sender address must contain.
    pub from_address_pattern: String,
    pub subject_keywords: Vec<String>,
    pub body_keywords: Vec<String>,
}

/// Splits a configured comma-separated keyword string into trimmed
/// keywords, order preserved. An absent string yields an empty list,
/// never a list containing one empty string; blank elements are
/// dropped for the same reason.
pub fn parse_keywords(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

impl DispatchRule {
    /// Tests whether `message` triggers this rule: the sender must
    /// contain the address pattern, and each keyword-constrained field
    /// must be present and contain at least one of its keywords.
    pub fn matches(&self, message: &EmailMessage) -> bool {
        if !message.sender.contains(&self.from_address_pattern) {
            return false;
        }
        field_matches(&self.subject_keywords, message.subject.as_deref())
            && field_matches(&self.body_keywords, message.body.as_deref())
    }
}

fn field_matches(keywords: &[String], field: Option<&str>) -> bool {
    if keywords.is_empty() {
        return true;
    }
    match field {
        Some(text) => keywords.iter().any(|keyword| text.contains(keyword.as_str())),
        None => false,
    }
}
