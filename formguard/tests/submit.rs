use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formdom::{Document, Element, File, NodeId, Selector};
use formguard::{
    Engine, ErrorPlacement, FieldKey, FormValidator, GroupState, SubmitEvent, SubmitHandler,
    ValidateConfig, ValidateError, ValidateOptions,
};

fn group(id: &str, label: &str, input: Element) -> Element {
    Element::div()
        .class("form-group")
        .id(id)
        .child(Element::label(label).class("form-control-label"))
        .child(input)
}

fn signup() -> Document {
    Document::new(
        Element::form()
            .id("signup")
            .child(group(
                "group-name",
                "Name",
                Element::input("text")
                    .name("name")
                    .flag("required")
                    .attr("maxlength", "10"),
            ))
            .child(group(
                "group-email",
                "Email",
                Element::input("email").name("email").flag("required"),
            ))
            .child(group(
                "group-phone",
                "Phone",
                Element::input("tel").name("phone"),
            ))
            .child(
                Element::div()
                    .class("form-group")
                    .child(Element::new("button").text("Send")),
            ),
    )
}

fn input(doc: &Document, name: &str) -> NodeId {
    let selector = Selector::parse(&format!("[name={name}]")).unwrap();
    doc.query_selector(doc.root(), &selector).unwrap()
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id).unwrap()
}

fn containers(doc: &Document, group_id: &str) -> Vec<NodeId> {
    let selector = Selector::parse("small.text-help").unwrap();
    doc.query_selector_all(by_id(doc, group_id), &selector)
}

fn message(doc: &Document, group_id: &str) -> Option<String> {
    containers(doc, group_id)
        .first()
        .map(|&c| doc.text_content(c))
}

fn attach(doc: &mut Document) -> FormValidator<Document> {
    Engine::with_builtins(ValidateConfig::default())
        .unwrap()
        .attach(doc, "signup", ValidateOptions::new(), None)
        .unwrap()
}

fn fill_valid(doc: &mut Document) {
    let name = input(doc, "name");
    let email = input(doc, "email");
    doc.set_value(name, "Jane");
    doc.set_value(email, "jane@example.com");
}

// ============================================================================
// Attaching
// ============================================================================

#[test]
fn test_attach_disables_native_validation() {
    let mut doc = signup();
    let form = attach(&mut doc);
    assert_eq!(form.form(), doc.root());
    assert_eq!(doc.attribute(doc.root(), "novalidate"), Some(""));
}

#[test]
fn test_attach_unknown_form() {
    let mut doc = signup();
    let engine = Engine::with_builtins(ValidateConfig::default()).unwrap();
    let err = engine
        .attach(&mut doc, "nope", ValidateOptions::new(), None)
        .unwrap_err();
    assert_eq!(err, ValidateError::ElementNotFound("nope".into()));
}

// ============================================================================
// Invalid submission
// ============================================================================

#[test]
fn test_invalid_submit_shows_errors_and_suppresses_submit() {
    let mut doc = signup();
    let mut form = attach(&mut doc);
    let mut event = SubmitEvent::new();

    let result = form.handle_submit(&mut doc, &mut event);

    assert!(event.default_prevented());
    assert!(result.is_invalid());
    assert!(doc.submissions().is_empty());

    let fields: Vec<&str> = result.errors().iter().map(|e| e.field_name.as_str()).collect();
    assert_eq!(fields, vec!["name", "email"]);
    assert_eq!(result.errors()[0].rule, "required");

    assert_eq!(message(&doc, "group-name").as_deref(), Some("Field 'Name' is required!"));
    assert_eq!(message(&doc, "group-email").as_deref(), Some("Field 'Email' is required!"));
    assert!(containers(&doc, "group-phone").is_empty());

    assert!(doc.has_class(by_id(&doc, "group-name"), "has-danger"));
    assert!(doc.has_class(by_id(&doc, "group-email"), "has-danger"));
    assert!(!doc.has_class(by_id(&doc, "group-phone"), "has-danger"));
}

#[test]
fn test_invalid_submit_focuses_first_invalid_field() {
    let mut doc = signup();
    let mut form = attach(&mut doc);

    let result = form.submit(&mut doc);

    let name = input(&doc, "name");
    assert_eq!(doc.focused(), Some(name));
    assert_eq!(doc.scrolled_into_view(), Some((name, false)));
    assert_eq!(result.first_invalid_input(), Some(&name));
}

#[test]
fn test_container_is_appended_to_group() {
    let mut doc = signup();
    let mut form = attach(&mut doc);
    form.submit(&mut doc);

    let group = by_id(&doc, "group-name");
    let container = containers(&doc, "group-name")[0];
    assert_eq!(doc.children(group).last(), Some(&container));
    assert_eq!(doc.tag(container), "small");
}

#[test]
fn test_email_scenario_message() {
    let mut doc = signup();
    let mut form = attach(&mut doc);
    let name = input(&doc, "name");
    let email = input(&doc, "email");
    doc.set_value(name, "Jane");
    doc.set_value(email, "not-an-email");

    let result = form.submit(&mut doc);

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].rule, "email");
    assert_eq!(
        message(&doc, "group-email").as_deref(),
        Some("Field 'Email' should be a valid e-mail address!")
    );
    assert_eq!(doc.focused(), Some(email));
}

#[test]
fn test_maxlength_message_reports_bound() {
    let mut doc = signup();
    let mut form = attach(&mut doc);
    fill_valid(&mut doc);
    let name = input(&doc, "name");
    doc.set_value(name, "Bartholomew Jr");

    form.submit(&mut doc);

    let text = message(&doc, "group-name").unwrap();
    assert!(text.contains("'10'"), "{text}");
    assert!(text.contains("Name"), "{text}");
}

// ============================================================================
// Repeated submission
// ============================================================================

#[test]
fn test_repeated_submit_keeps_one_container_per_group() {
    let mut doc = signup();
    let mut form = attach(&mut doc);

    form.submit(&mut doc);
    let first = containers(&doc, "group-name");

    let name = input(&doc, "name");
    doc.set_value(name, "A name that is too long");
    form.submit(&mut doc);

    let second = containers(&doc, "group-name");
    assert_eq!(second.len(), 1);
    assert_eq!(first, second);
    assert!(message(&doc, "group-name").unwrap().contains("too long"));
    assert_eq!(containers(&doc, "group-email").len(), 1);

    // Still marked exactly once: removing it once clears it.
    let group = by_id(&doc, "group-name");
    assert!(doc.remove_class(group, "has-danger"));
    assert!(!doc.has_class(group, "has-danger"));
}

#[test]
fn test_invalid_to_valid_removes_container_and_marker() {
    let mut doc = signup();
    let mut form = attach(&mut doc);

    form.submit(&mut doc);
    assert_eq!(form.presenter().len(), 2);

    fill_valid(&mut doc);
    let result = form.submit(&mut doc);

    assert!(result.is_valid());
    assert!(form.presenter().is_empty());
    for id in ["group-name", "group-email", "group-phone"] {
        assert!(containers(&doc, id).is_empty(), "{id}");
        assert!(!doc.has_class(by_id(&doc, id), "has-danger"), "{id}");
    }
    assert_eq!(doc.submissions(), &[doc.root()]);
}

#[test]
fn test_valid_to_invalid_adds_one_container() {
    let mut doc = signup();
    let mut form = attach(&mut doc);
    fill_valid(&mut doc);
    assert!(form.submit(&mut doc).is_valid());

    let phone = input(&doc, "phone");
    doc.set_value(phone, "12345");
    let result = form.submit(&mut doc);

    assert_eq!(result.errors().len(), 1);
    assert_eq!(containers(&doc, "group-phone").len(), 1);
    assert!(doc.has_class(by_id(&doc, "group-phone"), "has-danger"));
    assert_eq!(
        form.presenter().state(&FieldKey::Id("group-phone".into())),
        GroupState::Erroring
    );
    assert_eq!(doc.submissions().len(), 1);
}

#[test]
fn test_container_removed_by_host_is_recreated_once() {
    let mut doc = signup();
    let mut form = attach(&mut doc);
    form.submit(&mut doc);

    let stale = containers(&doc, "group-name")[0];
    doc.remove(stale);
    form.submit(&mut doc);

    let fresh = containers(&doc, "group-name");
    assert_eq!(fresh.len(), 1);
    assert_ne!(fresh[0], stale);
}

// ============================================================================
// Callbacks
// ============================================================================

/// A group whose markup already carries a help text styled like an error.
fn with_static_help(value: &str) -> Document {
    Document::new(
        Element::form().id("profile").child(
            Element::div()
                .class("form-group")
                .id("group-nick")
                .child(Element::label("Nickname").class("form-control-label"))
                .child(Element::input("text").name("nick").flag("required").value(value))
                .child(Element::new("small").class("text-help").text("Static help")),
        ),
    )
}

fn attach_profile(doc: &mut Document) -> FormValidator<Document> {
    Engine::with_builtins(ValidateConfig::default())
        .unwrap()
        .attach(doc, "profile", ValidateOptions::new(), None)
        .unwrap()
}

#[test]
fn test_valid_submit_leaves_untracked_markup_alone() {
    let mut doc = with_static_help("neo");
    let mut form = attach_profile(&mut doc);

    let result = form.submit(&mut doc);

    assert!(result.is_valid());
    let found = containers(&doc, "group-nick");
    assert_eq!(found.len(), 1);
    assert_eq!(doc.text_content(found[0]), "Static help");
    assert_eq!(doc.submissions().len(), 1);
}

#[test]
fn test_invalid_submit_does_not_overwrite_untracked_markup() {
    let mut doc = with_static_help("");
    let mut form = attach_profile(&mut doc);

    form.submit(&mut doc);

    let found = containers(&doc, "group-nick");
    assert_eq!(found.len(), 2);
    assert_eq!(doc.text_content(found[0]), "Static help");
    assert_eq!(doc.text_content(found[1]), "Field 'Nickname' is required!");
    assert!(doc.has_class(by_id(&doc, "group-nick"), "has-danger"));

    let nick = input(&doc, "nick");
    doc.set_value(nick, "neo");
    assert!(form.submit(&mut doc).is_valid());

    let found = containers(&doc, "group-nick");
    assert_eq!(found.len(), 1);
    assert_eq!(doc.text_content(found[0]), "Static help");
    assert!(!doc.has_class(by_id(&doc, "group-nick"), "has-danger"));
}

#[test]
fn test_submit_handler_replaces_default_submit() {
    let mut doc = signup();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let handler: SubmitHandler<Document> = Box::new(move |_doc| counter.set(counter.get() + 1));
    let mut form = Engine::with_builtins(ValidateConfig::default())
        .unwrap()
        .attach(&mut doc, "signup", ValidateOptions::new(), Some(handler))
        .unwrap();

    form.submit(&mut doc);
    assert_eq!(calls.get(), 0);

    fill_valid(&mut doc);
    form.submit(&mut doc);
    assert_eq!(calls.get(), 1);
    assert!(doc.submissions().is_empty());
}

#[test]
fn test_on_focus_called_once_for_first_invalid() {
    let mut doc = signup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let options = ValidateOptions::<Document>::new().on_focus(move |_doc, input, group| {
        log.borrow_mut().push((input, group));
    });
    let mut form = Engine::with_builtins(ValidateConfig::default())
        .unwrap()
        .attach(&mut doc, "signup", options, None)
        .unwrap();

    form.submit(&mut doc);

    let expected = (input(&doc, "name"), by_id(&doc, "group-name"));
    assert_eq!(*seen.borrow(), vec![expected]);
    assert_eq!(doc.focused(), None);
    assert_eq!(doc.scrolled_into_view(), None);
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_anonymous_groups_are_tracked_by_position() {
    let mut doc = Document::new(
        Element::form()
            .id("f")
            .child(
                Element::div()
                    .class("form-group")
                    .child(Element::label("A"))
                    .child(Element::input("text").name("a").flag("required")),
            )
            .child(
                Element::div()
                    .class("form-group")
                    .child(Element::label("B"))
                    .child(Element::input("text").name("b").flag("required")),
            ),
    );
    let mut form = Engine::with_builtins(ValidateConfig::default())
        .unwrap()
        .attach(&mut doc, "f", ValidateOptions::new(), None)
        .unwrap();

    form.submit(&mut doc);
    form.submit(&mut doc);

    let result = form.submit(&mut doc);
    assert_eq!(result.errors()[0].key, FieldKey::Path(vec![0]));
    assert_eq!(result.errors()[1].key, FieldKey::Path(vec![1]));
    assert_eq!(result.errors()[1].message, "Field 'B' is required!");

    let all = doc.query_selector_all(doc.root(), &Selector::parse("small.text-help").unwrap());
    assert_eq!(all.len(), 2);
}

#[test]
fn test_label_falls_back_to_label_tag() {
    let mut doc = Document::new(
        Element::form().id("f").child(
            Element::div()
                .class("form-group")
                .child(Element::label("  Nickname "))
                .child(Element::input("text").name("nick").flag("required")),
        ),
    );
    let mut form = Engine::with_builtins(ValidateConfig::default())
        .unwrap()
        .attach(&mut doc, "f", ValidateOptions::new(), None)
        .unwrap();

    let result = form.submit(&mut doc);
    assert_eq!(result.errors()[0].message, "Field 'Nickname' is required!");
}

#[test]
fn test_image_upload_scenario() {
    let mut doc = Document::new(
        Element::form().id("f").child(group(
            "group-avatar",
            "Avatar",
            Element::input("file")
                .name("avatar")
                .attr("accept", "image/*")
                .file(File::new("cv.pdf", "application/pdf")),
        )),
    );
    let mut form = Engine::with_builtins(ValidateConfig::default())
        .unwrap()
        .attach(&mut doc, "f", ValidateOptions::new(), None)
        .unwrap();

    let result = form.submit(&mut doc);
    assert_eq!(result.errors()[0].rule, "image");

    let avatar = input(&doc, "avatar");
    doc.set_files(avatar, Vec::new());
    assert!(form.submit(&mut doc).is_valid());
    assert!(containers(&doc, "group-avatar").is_empty());
}

// ============================================================================
// Placement and custom markup
// ============================================================================

#[test]
fn test_after_field_placement() {
    let mut doc = signup();
    let config = ValidateConfig::new().error_placement(ErrorPlacement::AfterField);
    let mut form = Engine::with_builtins(config)
        .unwrap()
        .attach(&mut doc, "signup", ValidateOptions::new(), None)
        .unwrap();

    form.submit(&mut doc);

    let group = by_id(&doc, "group-name");
    let name = input(&doc, "name");
    let children = doc.children(group);
    let at = children.iter().position(|&c| c == name).unwrap();
    assert_eq!(doc.tag(children[at + 1]), "small");
}

#[test]
fn test_prepend_placement_and_custom_classes() {
    let mut doc = signup();
    let config = ValidateConfig::new()
        .error_placement(ErrorPlacement::Prepend)
        .error_class("is-invalid")
        .error_container_tag("div")
        .error_container_class("invalid-feedback");
    let mut form = Engine::with_builtins(config)
        .unwrap()
        .attach(&mut doc, "signup", ValidateOptions::new(), None)
        .unwrap();

    form.submit(&mut doc);
    form.submit(&mut doc);

    let group = by_id(&doc, "group-name");
    let first = doc.children(group)[0];
    assert_eq!(doc.tag(first), "div");
    assert!(doc.has_class(first, "invalid-feedback"));
    assert!(doc.has_class(group, "is-invalid"));

    let feedback = Selector::parse("div.invalid-feedback").unwrap();
    assert_eq!(doc.query_selector_all(group, &feedback).len(), 1);
}
