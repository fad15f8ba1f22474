//! Markup-driven form validation.
//!
//! Field groups are found by class, each group's named input is read into a
//! typed [`Field`], every registered rule runs against it, and the first
//! failure is shown in an error container inside the group. Containers are
//! created, updated and removed as fields move between valid and invalid, so
//! repeated submits never stack duplicates.
//!
//! # Example
//!
//! ```ignore
//! use formdom::{Document, Element};
//! use formguard::prelude::*;
//!
//! let mut doc = Document::new(
//!     Element::form().id("signup").child(
//!         Element::div()
//!             .class("form-group")
//!             .child(Element::label("Email").class("form-control-label"))
//!             .child(Element::input("email").name("email").flag("required")),
//!     ),
//! );
//!
//! let engine = Engine::with_builtins(ValidateConfig::default())?;
//! let mut form = engine.attach(&mut doc, "signup", ValidateOptions::new(), None)?;
//!
//! let result = form.submit(&mut doc);
//! assert!(result.is_invalid());
//! ```

mod config;
mod engine;
mod error;
mod evaluator;
mod event;
mod field;
mod form;
mod host;
mod message;
mod placement;
mod presenter;
mod registry;
mod result;
pub mod rules;
mod verdict;

pub use config::{Messages, ValidateConfig};
pub use engine::{CheckOutcome, Engine, InputElements};
pub use error::ValidateError;
pub use evaluator::{CheckResult, FieldEvaluator, FieldReport, RuleOutcome, VALIDATOR_NOT_FOUND};
pub use event::SubmitEvent;
pub use field::{Field, FieldConstraints, FieldKey, ValueKind};
pub use form::{FocusHandler, FormValidator, SubmitHandler, ValidateOptions};
pub use host::{GroupRef, HostTree};
pub use message::{substitute, MessageFormatter};
pub use placement::ErrorPlacement;
pub use presenter::{ErrorPresenter, GroupState, Transition};
pub use registry::{Rule, RuleRegistry};
pub use result::{FieldError, ValidationResult};
pub use verdict::Verdict;

pub mod prelude {
    pub use crate::{
        Engine, ErrorPlacement, Field, FormValidator, GroupRef, HostTree, RuleRegistry,
        SubmitEvent, ValidateConfig, ValidateError, ValidateOptions, ValidationResult, Verdict,
    };
}
