//! Shared engine: configuration plus rules, and the group-level queries.

use std::sync::Arc;

use formdom::Selector;

use crate::config::ValidateConfig;
use crate::error::ValidateError;
use crate::evaluator::{CheckResult, FieldEvaluator};
use crate::field::Field;
use crate::form::{FormValidator, SubmitHandler, ValidateOptions};
use crate::host::{GroupRef, HostTree};
use crate::message::MessageFormatter;
use crate::registry::RuleRegistry;

/// The input, label and group making up one field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputElements<N> {
    pub group: N,
    /// First descendant carrying a `name` attribute.
    pub input: N,
    pub label: Option<N>,
}

impl<N: Copy> InputElements<N> {
    /// Label text used in messages. Empty when the group has no label.
    pub fn label_text<H: HostTree<Node = N>>(&self, host: &H) -> String {
        self.label
            .map(|label| host.text_content(label).trim().to_string())
            .unwrap_or_default()
    }
}

/// Result of checking one field group outside a submit pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome<N> {
    pub valid: bool,
    /// Empty when valid.
    pub message: String,
    pub elements: InputElements<N>,
}

impl<N> CheckOutcome<N> {
    fn new(result: CheckResult, elements: InputElements<N>) -> Self {
        Self {
            valid: result.valid,
            message: result.message,
            elements,
        }
    }
}

struct EngineInner {
    config: ValidateConfig,
    registry: RuleRegistry,
    group_selector: Selector,
    label_selector: Selector,
    input_selector: Selector,
    label_tag_selector: Selector,
}

/// Immutable configuration and rule set, cheap to clone and share between forms.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    /// Build an engine, rejecting unusable configuration.
    ///
    /// Rules without a message template are accepted but logged: their
    /// failures will be treated as passes.
    pub fn new(config: ValidateConfig, registry: RuleRegistry) -> Result<Self, ValidateError> {
        config.check()?;
        for rule in registry.names() {
            if !config.messages.contains(rule) {
                log::warn!("{}", ValidateError::TemplateNotFound(rule.to_string()));
            }
        }
        Ok(Self {
            inner: Arc::new(EngineInner {
                group_selector: config.group_selector(),
                label_selector: config.label_selector(),
                input_selector: Selector::has_attribute("name"),
                label_tag_selector: Selector::tag("label"),
                config,
                registry,
            }),
        })
    }

    /// Default configuration and the built-in rules.
    pub fn with_builtins(config: ValidateConfig) -> Result<Self, ValidateError> {
        Self::new(config, RuleRegistry::with_builtins())
    }

    pub fn config(&self) -> &ValidateConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.inner.registry
    }

    pub fn formatter(&self) -> MessageFormatter<'_> {
        MessageFormatter::new(&self.inner.config.messages)
    }

    pub fn evaluator(&self) -> FieldEvaluator<'_> {
        FieldEvaluator::new(&self.inner.registry, self.formatter())
    }

    pub(crate) fn group_selector(&self) -> &Selector {
        &self.inner.group_selector
    }

    /// Take over submission of `form`.
    ///
    /// Native validation is switched off with `novalidate`; the host then
    /// routes submit events to [`FormValidator::handle_submit`].
    pub fn attach<'g, H: HostTree>(
        &self,
        host: &mut H,
        form: impl Into<GroupRef<'g, H::Node>>,
        options: ValidateOptions<H>,
        submit_handler: Option<SubmitHandler<H>>,
    ) -> Result<FormValidator<H>, ValidateError> {
        let form = self.resolve(&*host, form.into())?;
        host.set_attribute(form, "novalidate", "");
        Ok(FormValidator::new(self.clone(), form, options, submit_handler))
    }

    /// Turn a [`GroupRef`] into a node.
    pub fn resolve<H: HostTree>(
        &self,
        host: &H,
        group: GroupRef<'_, H::Node>,
    ) -> Result<H::Node, ValidateError> {
        match group {
            GroupRef::Node(node) => Ok(node),
            GroupRef::Id(id) => host
                .element_by_id(id)
                .ok_or_else(|| ValidateError::ElementNotFound(id.to_string())),
        }
    }

    /// Group, input and label of a field group.
    pub fn input_elements<'g, H: HostTree>(
        &self,
        host: &H,
        group: impl Into<GroupRef<'g, H::Node>>,
    ) -> Result<InputElements<H::Node>, ValidateError> {
        let group = self.resolve(host, group.into())?;
        self.elements_of(host, group)
            .ok_or(ValidateError::NotAFieldGroup)
    }

    /// Whether the group contains a named input.
    pub fn is_form_group_for_input<'g, H: HostTree>(
        &self,
        host: &H,
        group: impl Into<GroupRef<'g, H::Node>>,
    ) -> bool {
        self.input_elements(host, group).is_ok()
    }

    /// Check a group, stopping at the first failing rule.
    pub fn check_input<'g, H: HostTree>(
        &self,
        host: &H,
        group: impl Into<GroupRef<'g, H::Node>>,
    ) -> Result<CheckOutcome<H::Node>, ValidateError> {
        let elements = self.input_elements(host, group)?;
        let field = Field::read(host, elements.input);
        let result = self.evaluator().check(&field, &elements.label_text(host));
        Ok(CheckOutcome::new(result, elements))
    }

    /// Check a group against one named rule.
    ///
    /// An unknown rule is not an `Err`: it yields an invalid outcome whose
    /// message is [`crate::VALIDATOR_NOT_FOUND`].
    pub fn check_input_against_validator<'g, H: HostTree>(
        &self,
        host: &H,
        group: impl Into<GroupRef<'g, H::Node>>,
        rule: &str,
    ) -> Result<CheckOutcome<H::Node>, ValidateError> {
        let elements = self.input_elements(host, group)?;
        let field = Field::read(host, elements.input);
        let result = self
            .evaluator()
            .check_against(&field, &elements.label_text(host), rule);
        Ok(CheckOutcome::new(result, elements))
    }

    pub(crate) fn elements_of<H: HostTree>(
        &self,
        host: &H,
        group: H::Node,
    ) -> Option<InputElements<H::Node>> {
        let inner = &self.inner;
        let input = host.query_first(group, &inner.input_selector)?;
        let label = host
            .query_first(group, &inner.label_selector)
            .or_else(|| host.query_first(group, &inner.label_tag_selector));
        Some(InputElements {
            group,
            input,
            label,
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.inner.config)
            .field("registry", &self.inner.registry)
            .finish()
    }
}
