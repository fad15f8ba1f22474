use std::collections::BTreeMap;

/// Outcome of running one rule against one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Verdict {
    #[default]
    Valid,
    Invalid,
    /// Invalid, with values the message can report (e.g. `maxlength -> 10`).
    InvalidWithDetail(BTreeMap<String, String>),
}

impl Verdict {
    /// Invalid with a single detail entry.
    pub fn detail(key: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidWithDetail(BTreeMap::from([(key.into(), value.to_string())]))
    }

    /// `Valid` when `ok`, `Invalid` otherwise.
    pub fn check(ok: bool) -> Self {
        if ok { Self::Valid } else { Self::Invalid }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Detail values of an `InvalidWithDetail` verdict, `None` otherwise.
    pub fn details(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::InvalidWithDetail(details) => Some(details),
            Self::Valid | Self::Invalid => None,
        }
    }
}
