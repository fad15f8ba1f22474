//! Message templating.
//!
//! Templates use `%s` for the field label and `%<key>` for detail values.
//! Substitution is literal and happens in a single left-to-right pass, so text
//! coming from a label or a detail value is never substituted again.

use std::collections::BTreeMap;

use crate::config::Messages;
use crate::error::ValidateError;
use crate::verdict::Verdict;

/// Renders user-facing messages from the configured templates.
#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter<'a> {
    messages: &'a Messages,
}

impl<'a> MessageFormatter<'a> {
    pub fn new(messages: &'a Messages) -> Self {
        Self { messages }
    }

    /// Render the message for `rule`.
    pub fn format(
        &self,
        rule: &str,
        label: &str,
        details: Option<&BTreeMap<String, String>>,
    ) -> Result<String, ValidateError> {
        let template = self
            .messages
            .get(rule)
            .ok_or_else(|| ValidateError::TemplateNotFound(rule.to_string()))?;
        Ok(substitute(template, label, details))
    }

    /// Render the message for a failed verdict.
    pub fn format_verdict(
        &self,
        rule: &str,
        label: &str,
        verdict: &Verdict,
    ) -> Result<String, ValidateError> {
        self.format(rule, label, verdict.details())
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Replace every `%s` with `label` and every `%<key>` with its detail value.
///
/// When several detail keys could match at one position the longest wins.
/// A `%` that starts no known placeholder is kept as is.
pub fn substitute(
    template: &str,
    label: &str,
    details: Option<&BTreeMap<String, String>>,
) -> String {
    let mut out = String::with_capacity(template.len() + label.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let run_len = after
            .char_indices()
            .find(|&(_, c)| !is_key_char(c))
            .map_or(after.len(), |(i, _)| i);
        let run = &after[..run_len];

        let detail = details.and_then(|details| {
            details
                .iter()
                .filter(|(key, _)| !key.is_empty() && run.starts_with(key.as_str()))
                .max_by_key(|(key, _)| key.len())
        });

        match detail {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len()..];
            }
            None if run.starts_with('s') => {
                out.push_str(label);
                rest = &after[1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
