//! Form orchestration: submit interception and section validation.

use crate::engine::{CheckOutcome, Engine, InputElements};
use crate::error::ValidateError;
use crate::event::SubmitEvent;
use crate::field::{Field, FieldKey};
use crate::host::{GroupRef, HostTree};
use crate::presenter::ErrorPresenter;
use crate::result::{FieldError, ValidationResult};

/// Called with `(host, input, group)` for the first invalid field of a pass.
pub type FocusHandler<H> = Box<dyn FnMut(&mut H, <H as HostTree>::Node, <H as HostTree>::Node)>;

/// Called instead of the host's submit action once every field is valid.
pub type SubmitHandler<H> = Box<dyn FnMut(&mut H)>;

/// Optional callbacks for a validation pass.
pub struct ValidateOptions<H: HostTree> {
    on_focus: Option<FocusHandler<H>>,
}

impl<H: HostTree> ValidateOptions<H> {
    pub fn new() -> Self {
        Self { on_focus: None }
    }

    /// Replace the default focus-and-scroll behavior.
    pub fn on_focus<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut H, H::Node, H::Node) + 'static,
    {
        self.on_focus = Some(Box::new(f));
        self
    }
}

impl<H: HostTree> Default for ValidateOptions<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Focuses the first invalid field of a pass, once.
struct FocusTracker<'a, H: HostTree> {
    on_focus: &'a mut Option<FocusHandler<H>>,
    focused: bool,
}

impl<'a, H: HostTree> FocusTracker<'a, H> {
    fn new(on_focus: &'a mut Option<FocusHandler<H>>) -> Self {
        Self {
            on_focus,
            focused: false,
        }
    }

    fn focus(&mut self, host: &mut H, input: H::Node, group: H::Node) {
        if self.focused {
            return;
        }
        self.focused = true;
        match self.on_focus.as_mut() {
            Some(on_focus) => on_focus(host, input, group),
            None => {
                host.focus(input);
                host.scroll_into_view(input, false);
            }
        }
    }
}

/// A form whose submission is guarded by the engine.
///
/// Holds the error containers shown on this form across repeated passes.
pub struct FormValidator<H: HostTree> {
    engine: Engine,
    form: H::Node,
    presenter: ErrorPresenter<H::Node>,
    on_focus: Option<FocusHandler<H>>,
    submit_handler: Option<SubmitHandler<H>>,
}

impl<H: HostTree> FormValidator<H> {
    pub(crate) fn new(
        engine: Engine,
        form: H::Node,
        options: ValidateOptions<H>,
        submit_handler: Option<SubmitHandler<H>>,
    ) -> Self {
        let presenter = ErrorPresenter::new(engine.config());
        Self {
            engine,
            form,
            presenter,
            on_focus: options.on_focus,
            submit_handler,
        }
    }

    pub fn form(&self) -> H::Node {
        self.form
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn presenter(&self) -> &ErrorPresenter<H::Node> {
        &self.presenter
    }

    /// Handle a submit event.
    ///
    /// The default action is always prevented. Every field group is evaluated
    /// in document order; when all are valid the submit handler (or the host's
    /// own submit action) runs, otherwise nothing is submitted.
    pub fn handle_submit(
        &mut self,
        host: &mut H,
        event: &mut SubmitEvent,
    ) -> ValidationResult<H::Node> {
        event.prevent_default();

        let evaluator = self.engine.evaluator();
        let mut focus = FocusTracker::new(&mut self.on_focus);
        let mut errors = Vec::new();

        for group in host.query_all(self.form, self.engine.group_selector()) {
            let Some(elements) = self.engine.elements_of(&*host, group) else {
                log::trace!("skipping field group {group:?} without a named input");
                continue;
            };
            let field = Field::read(&*host, elements.input);
            let key = FieldKey::of(&*host, group);
            let report = evaluator.evaluate_all(&field, &elements.label_text(&*host));

            match report.first_failure() {
                Some(failure) => {
                    self.presenter.show_error(
                        host,
                        group,
                        key.clone(),
                        Some(elements.input),
                        &failure.message,
                    );
                    focus.focus(host, elements.input, group);
                    errors.push(FieldError {
                        key,
                        field_name: field.name,
                        group,
                        input: elements.input,
                        rule: failure.rule.clone(),
                        message: failure.message.clone(),
                    });
                }
                None => {
                    self.presenter.clear_error(host, group, &key);
                }
            }
        }

        if errors.is_empty() {
            match self.submit_handler.as_mut() {
                Some(handler) => handler(host),
                None => host.submit(self.form),
            }
        } else {
            log::debug!("submission suppressed: {} invalid field(s)", errors.len());
        }

        ValidationResult::from_errors(errors)
    }

    /// Run a submit pass without an event from the host.
    pub fn submit(&mut self, host: &mut H) -> ValidationResult<H::Node> {
        self.handle_submit(host, &mut SubmitEvent::new())
    }

    /// Validate every field group under `container` and update their errors.
    ///
    /// Uses the first-failure check per group and the same focus rule as a
    /// submit pass. Groups without a named input are ignored.
    pub fn validate_section<'g>(
        &mut self,
        host: &mut H,
        container: impl Into<GroupRef<'g, H::Node>>,
        options: ValidateOptions<H>,
    ) -> Result<bool, ValidateError> {
        let container = self.engine.resolve(&*host, container.into())?;
        let mut on_focus = options.on_focus;
        let mut focus = FocusTracker::new(&mut on_focus);
        let mut section_valid = true;

        for group in host.query_all(container, self.engine.group_selector()) {
            let outcome = match self.engine.check_input(&*host, GroupRef::Node(group)) {
                Ok(outcome) => outcome,
                Err(ValidateError::NotAFieldGroup) => continue,
                Err(err) => return Err(err),
            };
            let key = FieldKey::of(&*host, group);
            let input = outcome.elements.input;

            if outcome.valid {
                self.presenter.clear_error(host, group, &key);
            } else {
                section_valid = false;
                self.presenter
                    .show_error(host, group, key, Some(input), &outcome.message);
                focus.focus(host, input, group);
            }
        }

        Ok(section_valid)
    }

    /// Show `message` on a field group, creating or updating its container.
    ///
    /// An error container already present in the group's markup is reused.
    pub fn set_error_message<'g>(
        &mut self,
        host: &mut H,
        group: impl Into<GroupRef<'g, H::Node>>,
        message: &str,
    ) -> Result<(), ValidateError> {
        let group = self.engine.resolve(&*host, group.into())?;
        let input = self.engine.elements_of(&*host, group).map(|e| e.input);
        let key = FieldKey::of(&*host, group);
        self.presenter
            .show_error_in_markup(host, group, key, input, message);
        Ok(())
    }

    /// Remove the error container of a field group and its marker class,
    /// including one rendered outside this validator.
    pub fn remove_error_container<'g>(
        &mut self,
        host: &mut H,
        group: impl Into<GroupRef<'g, H::Node>>,
    ) -> Result<(), ValidateError> {
        let group = self.engine.resolve(&*host, group.into())?;
        let key = FieldKey::of(&*host, group);
        self.presenter.clear_error_in_markup(host, group, &key);
        Ok(())
    }

    pub fn check_input<'g>(
        &self,
        host: &H,
        group: impl Into<GroupRef<'g, H::Node>>,
    ) -> Result<CheckOutcome<H::Node>, ValidateError> {
        self.engine.check_input(host, group)
    }

    pub fn check_input_against_validator<'g>(
        &self,
        host: &H,
        group: impl Into<GroupRef<'g, H::Node>>,
        rule: &str,
    ) -> Result<CheckOutcome<H::Node>, ValidateError> {
        self.engine.check_input_against_validator(host, group, rule)
    }

    pub fn input_elements<'g>(
        &self,
        host: &H,
        group: impl Into<GroupRef<'g, H::Node>>,
    ) -> Result<InputElements<H::Node>, ValidateError> {
        self.engine.input_elements(host, group)
    }

    pub fn is_form_group_for_input<'g>(
        &self,
        host: &H,
        group: impl Into<GroupRef<'g, H::Node>>,
    ) -> bool {
        self.engine.is_form_group_for_input(host, group)
    }
}

impl<H: HostTree> std::fmt::Debug for FormValidator<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("form", &self.form)
            .field("presenter", &self.presenter)
            .field("on_focus", &self.on_focus.is_some())
            .field("submit_handler", &self.submit_handler.is_some())
            .finish()
    }
}
