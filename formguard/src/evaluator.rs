//! Runs registered rules against a field.

use crate::error::ValidateError;
use crate::field::Field;
use crate::message::MessageFormatter;
use crate::registry::RuleRegistry;
use crate::verdict::Verdict;

/// Message reported when a single-rule check names an unknown rule.
pub const VALIDATOR_NOT_FOUND: &str = "ERROR: Validator not found";

/// Verdict for one field: valid, or invalid with the message to display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    pub valid: bool,
    /// Empty when valid.
    pub message: String,
}

impl CheckResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Outcome of one rule inside a full evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: String,
    pub valid: bool,
    pub message: String,
}

/// Outcome of every rule for one field, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl FieldReport {
    /// A field is valid only if every rule passed.
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|o| o.valid)
    }

    /// The first failing rule, which decides the displayed message.
    pub fn first_failure(&self) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| !o.valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.valid)
    }

    /// Collapse into the message a field group shows.
    pub fn to_check(&self) -> CheckResult {
        match self.first_failure() {
            Some(failure) => CheckResult::invalid(failure.message.clone()),
            None => CheckResult::valid(),
        }
    }
}

/// Evaluates fields against a registry, formatting failures.
#[derive(Debug, Clone, Copy)]
pub struct FieldEvaluator<'a> {
    registry: &'a RuleRegistry,
    formatter: MessageFormatter<'a>,
}

impl<'a> FieldEvaluator<'a> {
    pub fn new(registry: &'a RuleRegistry, formatter: MessageFormatter<'a>) -> Self {
        Self {
            registry,
            formatter,
        }
    }

    /// Run rules in order and stop at the first failure.
    pub fn check(&self, field: &Field, label: &str) -> CheckResult {
        for (name, rule) in self.registry.iter() {
            let verdict = rule(field);
            if let Some(message) = self.failure_message(name, field, label, &verdict) {
                return CheckResult::invalid(message);
            }
        }
        CheckResult::valid()
    }

    /// Run every rule, even after a failure.
    pub fn evaluate_all(&self, field: &Field, label: &str) -> FieldReport {
        let outcomes = self
            .registry
            .iter()
            .map(|(name, rule)| {
                let verdict = rule(field);
                match self.failure_message(name, field, label, &verdict) {
                    Some(message) => RuleOutcome {
                        rule: name.to_string(),
                        valid: false,
                        message,
                    },
                    None => RuleOutcome {
                        rule: name.to_string(),
                        valid: true,
                        message: String::new(),
                    },
                }
            })
            .collect();
        FieldReport { outcomes }
    }

    /// Run a single named rule.
    ///
    /// An unknown rule is a configuration error: it is logged and reported as
    /// invalid with [`VALIDATOR_NOT_FOUND`] instead of panicking.
    pub fn check_against(&self, field: &Field, label: &str, rule: &str) -> CheckResult {
        let Some(verdict) = self.registry.evaluate(rule, field) else {
            log::error!("{}", ValidateError::ValidatorNotFound(rule.to_string()));
            return CheckResult::invalid(VALIDATOR_NOT_FOUND);
        };
        match self.failure_message(rule, field, label, &verdict) {
            Some(message) => CheckResult::invalid(message),
            None => CheckResult::valid(),
        }
    }

    /// The formatted message of a failed verdict.
    ///
    /// A failure without a template is logged and counted as a pass, so a
    /// configuration mistake never blocks submission.
    fn failure_message(
        &self,
        rule: &str,
        field: &Field,
        label: &str,
        verdict: &Verdict,
    ) -> Option<String> {
        if verdict.is_valid() {
            return None;
        }
        match self.formatter.format_verdict(rule, label, verdict) {
            Ok(message) => Some(message),
            Err(err) => {
                log::error!("{err}; treating field '{}' as valid", field.name);
                None
            }
        }
    }
}
