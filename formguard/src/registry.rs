//! Named rules in registration order.

use std::fmt;
use std::sync::Arc;

use crate::field::Field;
use crate::rules;
use crate::verdict::Verdict;

/// A pure predicate over a field.
pub type Rule = Arc<dyn Fn(&Field) -> Verdict + Send + Sync>;

/// Ordered mapping from rule name to rule.
///
/// Order is significant: the first failing rule decides which message a field
/// shows, so rules always run in the order they were registered.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<(String, Rule)>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules: `required`, `minlength`, `maxlength`, `email`,
    /// `tel`, `image`, in that order.
    pub fn with_builtins() -> Self {
        Self::new()
            .with("required", rules::required)
            .with("minlength", rules::min_length)
            .with("maxlength", rules::max_length)
            .with("email", rules::email)
            .with("tel", rules::tel)
            .with("image", rules::image)
    }

    /// Register a rule. Re-registering a name replaces the rule in place and
    /// keeps its original position.
    pub fn register<F>(&mut self, name: impl Into<String>, rule: F)
    where
        F: Fn(&Field) -> Verdict + Send + Sync + 'static,
    {
        let name = name.into();
        let rule: Rule = Arc::new(rule);
        match self.rules.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = rule,
            None => self.rules.push((name, rule)),
        }
    }

    /// Builder form of [`RuleRegistry::register`].
    pub fn with<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Field) -> Verdict + Send + Sync + 'static,
    {
        self.register(name, rule);
        self
    }

    /// Remove a rule. Returns true if it was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|(n, _)| n != name);
        self.rules.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|(n, _)| n == name)
    }

    /// Run one rule. `None` if no rule has that name.
    pub fn evaluate(&self, name: &str, field: &Field) -> Option<Verdict> {
        self.rules
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule(field))
    }

    /// Rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
