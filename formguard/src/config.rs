//! Engine configuration.
//!
//! Every setting has a default, and overriding one never requires overriding
//! the others. Message templates in particular are merged over the defaults.

use std::collections::BTreeMap;

use formdom::Selector;
use serde::{Deserialize, Deserializer};

use crate::error::ValidateError;
use crate::placement::ErrorPlacement;

/// Rule name to message template.
///
/// `%s` stands for the field label, `%<key>` for a detail value reported by
/// the rule (e.g. `%maxlength`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages(BTreeMap<String, String>);

impl Messages {
    /// Templates for the built-in rules.
    pub fn defaults() -> Self {
        let templates = [
            ("required", "Field '%s' is required!"),
            (
                "minlength",
                "Input '%s' length is too short, must be at least '%minlength'",
            ),
            (
                "maxlength",
                "Input '%s' length is too long, must be at most '%maxlength'",
            ),
            ("email", "Field '%s' should be a valid e-mail address!"),
            ("tel", "Field '%s' is not a valid telephone number!"),
            (
                "image",
                "Uploaded file '%s' should be an image (jpeg, png, bmp, gif, or svg)",
            ),
        ];
        Self(
            templates
                .into_iter()
                .map(|(rule, template)| (rule.to_string(), template.to_string()))
                .collect(),
        )
    }

    /// An empty set, for hosts that want to supply every template themselves.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, rule: &str) -> Option<&str> {
        self.0.get(rule).map(String::as_str)
    }

    pub fn insert(&mut self, rule: impl Into<String>, template: impl Into<String>) {
        self.0.insert(rule.into(), template.into());
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.0.contains_key(rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::defaults()
    }
}

impl<'de> Deserialize<'de> for Messages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut messages = Self::defaults();
        messages.0.extend(overrides);
        Ok(messages)
    }
}

/// Markup conventions and message templates used by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Marker class toggled on a field group while it shows an error.
    pub error_class: String,

    /// Class of the container bundling a label, an input and its error slot.
    pub form_group_class: String,

    /// Class of the label whose text is inserted into messages.
    pub form_label_class: String,

    /// Tag name of created error containers.
    pub error_container_tag: String,

    /// Class given to created error containers.
    pub error_container_class: String,

    pub error_placement: ErrorPlacement,

    pub messages: Messages,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            error_class: "has-danger".into(),
            form_group_class: "form-group".into(),
            form_label_class: "form-control-label".into(),
            error_container_tag: "small".into(),
            error_container_class: "text-help".into(),
            error_placement: ErrorPlacement::default(),
            messages: Messages::defaults(),
        }
    }
}

impl ValidateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ValidateError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    pub fn error_class(mut self, class: impl Into<String>) -> Self {
        self.error_class = class.into();
        self
    }

    pub fn form_group_class(mut self, class: impl Into<String>) -> Self {
        self.form_group_class = class.into();
        self
    }

    pub fn form_label_class(mut self, class: impl Into<String>) -> Self {
        self.form_label_class = class.into();
        self
    }

    pub fn error_container_tag(mut self, tag: impl Into<String>) -> Self {
        self.error_container_tag = tag.into();
        self
    }

    pub fn error_container_class(mut self, class: impl Into<String>) -> Self {
        self.error_container_class = class.into();
        self
    }

    pub fn error_placement(mut self, placement: ErrorPlacement) -> Self {
        self.error_placement = placement;
        self
    }

    /// Override (or add) the template for one rule.
    pub fn message(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(rule, template);
        self
    }

    /// Replace the whole template set.
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Reject class and tag names that cannot be used as single selector tokens.
    pub fn check(&self) -> Result<(), ValidateError> {
        let tokens = [
            ("error_class", &self.error_class),
            ("form_group_class", &self.form_group_class),
            ("form_label_class", &self.form_label_class),
            ("error_container_tag", &self.error_container_tag),
            ("error_container_class", &self.error_container_class),
        ];
        for (key, value) in tokens {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ValidateError::InvalidConfig(format!(
                    "{key} must be a single non-empty token, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn group_selector(&self) -> Selector {
        Selector::class(&self.form_group_class)
    }

    pub(crate) fn label_selector(&self) -> Selector {
        Selector::class(&self.form_label_class)
    }

    pub(crate) fn container_selector(&self) -> Selector {
        Selector {
            tag: Some(self.error_container_tag.to_ascii_lowercase()),
            classes: vec![self.error_container_class.clone()],
            ..Default::default()
        }
    }
}
