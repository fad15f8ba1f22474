use std::collections::BTreeMap;

use formguard::{substitute, MessageFormatter, Messages, ValidateError, Verdict};

fn details(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_format_email_message() {
    let messages = Messages::defaults();
    let formatter = MessageFormatter::new(&messages);
    assert_eq!(
        formatter.format("email", "Email", None).unwrap(),
        "Field 'Email' should be a valid e-mail address!"
    );
}

#[test]
fn test_format_verdict_with_detail() {
    let messages = Messages::defaults();
    let formatter = MessageFormatter::new(&messages);
    let message = formatter
        .format_verdict("maxlength", "Nickname", &Verdict::detail("maxlength", 10))
        .unwrap();
    assert_eq!(
        message,
        "Input 'Nickname' length is too long, must be at most '10'"
    );
}

#[test]
fn test_format_missing_template() {
    let messages = Messages::empty();
    let formatter = MessageFormatter::new(&messages);
    assert_eq!(
        formatter.format("required", "Name", None),
        Err(ValidateError::TemplateNotFound("required".into()))
    );
}

#[test]
fn test_substitute_replaces_every_occurrence() {
    let d = details(&[("max", "5")]);
    assert_eq!(
        substitute("%s, %s: at most %max (%max)", "Name", Some(&d)),
        "Name, Name: at most 5 (5)"
    );
}

#[test]
fn test_substitute_does_not_rescan_inserted_text() {
    let d = details(&[("maxlength", "3")]);
    assert_eq!(
        substitute("'%s' > %maxlength", "100%maxlength %s", Some(&d)),
        "'100%maxlength %s' > 3"
    );
}

#[test]
fn test_substitute_prefers_detail_over_label() {
    let d = details(&[("step", "0.5"), ("size", "2")]);
    assert_eq!(
        substitute("%s uses %step and %size", "Amount", Some(&d)),
        "Amount uses 0.5 and 2"
    );
}

#[test]
fn test_substitute_longest_key_wins() {
    let d = details(&[("max", "1"), ("maxlength", "10")]);
    assert_eq!(substitute("%maxlength/%max", "", Some(&d)), "10/1");
}

#[test]
fn test_substitute_keeps_unknown_placeholders() {
    assert_eq!(substitute("100% of %unknown", "x", None), "100% of %unknown");
    assert_eq!(substitute("trailing %", "x", None), "trailing %");
}
