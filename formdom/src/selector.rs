//! A small subset of CSS selectors.
//!
//! Only compound selectors are supported: an optional tag name followed by any
//! mix of `#id`, `.class`, `[attr]` and `[attr=value]`. Combinators (spaces,
//! `>`, `,`) are rejected.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("attribute selector is missing a closing ']'")]
    UnclosedAttribute,

    #[error("expected a name after '{0}'")]
    MissingName(char),
}

/// A single attribute condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrCondition {
    pub name: String,
    /// `None` only checks presence.
    pub value: Option<String>,
}

/// A parsed compound selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttrCondition>,
}

impl Selector {
    /// Parse a selector string such as `input.form-control[type=email]`.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        let chars: Vec<char> = input.chars().collect();
        let mut selector = Selector::default();
        let mut pos = 0;

        if chars[0] == '*' {
            pos = 1;
        } else if is_name_char(chars[0]) {
            let name = read_name(&chars, &mut pos);
            selector.tag = Some(name.to_ascii_lowercase());
        }

        while pos < chars.len() {
            let c = chars[pos];
            match c {
                '#' | '.' => {
                    pos += 1;
                    let name = read_name(&chars, &mut pos);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName(c));
                    }
                    if c == '#' {
                        selector.id = Some(name);
                    } else {
                        selector.classes.push(name);
                    }
                }
                '[' => {
                    pos += 1;
                    selector.attributes.push(read_attribute(&chars, &mut pos)?);
                }
                _ => {
                    return Err(SelectorError::UnexpectedChar {
                        found: c,
                        position: pos,
                    })
                }
            }
        }

        Ok(selector)
    }

    /// Match every element carrying `class`.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Default::default()
        }
    }

    /// Match every element with the given tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into().to_ascii_lowercase()),
            ..Default::default()
        }
    }

    /// Match every element that declares `name`, whatever its value.
    pub fn has_attribute(name: impl Into<String>) -> Self {
        Self {
            attributes: vec![AttrCondition {
                name: name.into().to_ascii_lowercase(),
                value: None,
            }],
            ..Default::default()
        }
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{tag}")?,
            None if self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty() => {
                write!(f, "*")?
            }
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for attr in &self.attributes {
            match &attr.value {
                Some(value) => write!(f, "[{}=\"{}\"]", attr.name, value)?,
                None => write!(f, "[{}]", attr.name)?,
            }
        }
        Ok(())
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_name(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_name_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn skip_whitespace(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && chars[*pos].is_whitespace() {
        *pos += 1;
    }
}

fn read_attribute(chars: &[char], pos: &mut usize) -> Result<AttrCondition, SelectorError> {
    skip_whitespace(chars, pos);
    let name = read_name(chars, pos);
    if name.is_empty() {
        return Err(SelectorError::MissingName('['));
    }
    skip_whitespace(chars, pos);

    let value = match chars.get(*pos) {
        Some(']') => None,
        Some('=') => {
            *pos += 1;
            skip_whitespace(chars, pos);
            let value = match chars.get(*pos) {
                Some(&quote @ ('"' | '\'')) => {
                    *pos += 1;
                    let start = *pos;
                    while *pos < chars.len() && chars[*pos] != quote {
                        *pos += 1;
                    }
                    if *pos == chars.len() {
                        return Err(SelectorError::UnclosedAttribute);
                    }
                    let value: String = chars[start..*pos].iter().collect();
                    *pos += 1;
                    value
                }
                _ => read_name(chars, pos),
            };
            skip_whitespace(chars, pos);
            Some(value)
        }
        Some(&found) => {
            return Err(SelectorError::UnexpectedChar {
                found,
                position: *pos,
            })
        }
        None => return Err(SelectorError::UnclosedAttribute),
    };

    if chars.get(*pos) != Some(&']') {
        return Err(SelectorError::UnclosedAttribute);
    }
    *pos += 1;

    Ok(AttrCondition {
        name: name.to_ascii_lowercase(),
        value,
    })
}
