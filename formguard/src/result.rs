use crate::field::FieldKey;

/// Information about a single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError<N> {
    /// Identity of the field group.
    pub key: FieldKey,
    /// Input `name` attribute.
    pub field_name: String,
    /// The field group element.
    pub group: N,
    /// The input element (for focusing).
    pub input: N,
    /// Name of the first failing rule.
    pub rule: String,
    /// Message shown in the error container.
    pub message: String,
}

/// Result of validating every field group of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult<N> {
    /// All fields passed validation.
    Valid,
    /// One or more fields failed validation, in document order.
    Invalid(Vec<FieldError<N>>),
}

impl<N> Default for ValidationResult<N> {
    fn default() -> Self {
        Self::Valid
    }
}

impl<N> ValidationResult<N> {
    pub(crate) fn from_errors(errors: Vec<FieldError<N>>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError<N>] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError<N>> {
        self.errors().first()
    }

    /// The input of the first invalid field, which received focus.
    pub fn first_invalid_input(&self) -> Option<&N> {
        self.first_error().map(|e| &e.input)
    }
}
