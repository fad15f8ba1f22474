//! Typed snapshot of an input element.

use std::fmt;
use std::str::FromStr;

use crate::host::HostTree;

/// What kind of value an input holds, taken from its `type` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueKind {
    #[default]
    Text,
    Email,
    Tel,
    File,
    Number,
    Url,
    Password,
    Other,
}

impl ValueKind {
    /// Parse an input `type`. Unknown types map to [`ValueKind::Other`].
    pub fn parse(input_type: &str) -> Self {
        match input_type.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "search" => Self::Text,
            "email" => Self::Email,
            "tel" => Self::Tel,
            "file" => Self::File,
            "number" | "range" => Self::Number,
            "url" => Self::Url,
            "password" => Self::Password,
            _ => Self::Other,
        }
    }
}

/// Constraints declared on an input, parsed once per evaluation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldConstraints {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Raw `accept` filter of a file input.
    pub accept: Option<String>,
    /// Numeric bounds of a number input. No built-in rule reads them; they
    /// are there for rules registered by the host.
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub kind: ValueKind,
    pub constraints: FieldConstraints,
    /// Declared MIME types of attached files, in attachment order.
    pub files: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Read an input element from the host.
    pub fn read<H: HostTree>(host: &H, input: H::Node) -> Self {
        let name = host.attribute(input, "name").unwrap_or_default().to_string();
        let kind = host
            .attribute(input, "type")
            .map(ValueKind::parse)
            .unwrap_or_default();
        let numeric = kind == ValueKind::Number;
        let constraints = FieldConstraints {
            required: host.attribute(input, "required").is_some(),
            min_length: parse_bound(host, input, &name, "minlength"),
            max_length: parse_bound(host, input, &name, "maxlength"),
            accept: host.attribute(input, "accept").map(|a| a.trim().to_string()),
            min: numeric.then(|| parse_bound(host, input, &name, "min")).flatten(),
            max: numeric.then(|| parse_bound(host, input, &name, "max")).flatten(),
        };
        let files = if kind == ValueKind::File {
            host.file_types(input)
        } else {
            Vec::new()
        };

        Self {
            value: host.value(input).to_string(),
            name,
            kind,
            constraints,
            files,
        }
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.constraints.accept = Some(accept.into());
        self
    }

    pub fn file(mut self, mime: impl Into<String>) -> Self {
        self.files.push(mime.into());
        self
    }

    /// Length of the value in characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

fn parse_bound<H: HostTree, T: FromStr>(
    host: &H,
    input: H::Node,
    field: &str,
    attribute: &str,
) -> Option<T> {
    let raw = host.attribute(input, attribute)?;
    match raw.trim().parse() {
        Ok(bound) => Some(bound),
        Err(_) => {
            log::warn!("ignoring malformed {attribute}={raw:?} on field '{field}'");
            None
        }
    }
}

/// Stable identity of a field group across submit passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// The group's declared `id`.
    Id(String),
    /// Child indices from the document root.
    Path(Vec<usize>),
}

impl FieldKey {
    pub fn of<H: HostTree>(host: &H, group: H::Node) -> Self {
        match host.attribute(group, "id") {
            Some(id) if !id.is_empty() => Self::Id(id.to_string()),
            _ => Self::Path(host.path(group)),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Path(path) => {
                let parts: Vec<String> = path.iter().map(usize::to_string).collect();
                write!(f, "/{}", parts.join("/"))
            }
        }
    }
}
