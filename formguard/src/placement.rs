use serde::Deserialize;

/// Where a newly created error container is inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPlacement {
    /// Last child of the field group (default).
    #[default]
    Append,
    /// First child of the field group.
    Prepend,
    /// Right after the input element.
    AfterField,
}
