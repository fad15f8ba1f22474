//! Built-in rules.
//!
//! Every rule runs against every field. A rule that does not apply to a field
//! (an `email` rule on a text input, a length bound that was never declared)
//! returns [`Verdict::Valid`].

use std::sync::LazyLock;

use email_address::EmailAddress;
use regex::Regex;

use crate::field::{Field, ValueKind};
use crate::verdict::Verdict;

/// MIME types accepted by the `image` rule.
pub const IMAGE_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/bmp",
    "image/gif",
    "image/svg+xml",
];

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    )
    .expect("email pattern is valid")
});

static TEL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+()#* -]{6,20}$").expect("tel pattern is valid"));

/// Fails when the field is required and its value is the empty string.
pub fn required(field: &Field) -> Verdict {
    Verdict::check(!(field.constraints.required && field.value.is_empty()))
}

/// Fails when the value is shorter than a declared `minlength`.
pub fn min_length(field: &Field) -> Verdict {
    match field.constraints.min_length {
        Some(min) if field.len() < min => Verdict::detail("minlength", min),
        _ => Verdict::Valid,
    }
}

/// Fails when the value is longer than a declared `maxlength`.
pub fn max_length(field: &Field) -> Verdict {
    match field.constraints.max_length {
        Some(max) if field.len() > max => Verdict::detail("maxlength", max),
        _ => Verdict::Valid,
    }
}

/// Checks the shape of a non-empty value on an e-mail input.
pub fn email(field: &Field) -> Verdict {
    if field.kind != ValueKind::Email || field.value.is_empty() {
        return Verdict::Valid;
    }
    Verdict::check(EMAIL_SHAPE.is_match(&field.value) && EmailAddress::is_valid(&field.value))
}

/// Accepts 6 to 20 characters of digits, `-`, `+`, `(`, `)`, `#`, `*` and spaces.
pub fn tel(field: &Field) -> Verdict {
    if field.kind != ValueKind::Tel || field.value.is_empty() {
        return Verdict::Valid;
    }
    Verdict::check(TEL_SHAPE.is_match(&field.value))
}

/// On an `accept="image/*"` file input holding exactly one file, that file
/// must be an image.
///
/// An input with nothing attached passes; pair it with `required` to demand an
/// upload. Multi-file selections are not checked.
pub fn image(field: &Field) -> Verdict {
    let image_only = field.constraints.accept.as_deref() == Some("image/*");
    if field.kind != ValueKind::File || !image_only {
        return Verdict::Valid;
    }
    match field.files.as_slice() {
        [mime] => Verdict::check(is_image(mime)),
        _ => Verdict::Valid,
    }
}

fn is_image(mime: &str) -> bool {
    IMAGE_MIME_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(mime.trim()))
}
