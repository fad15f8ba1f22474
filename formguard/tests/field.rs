use std::collections::BTreeMap;

use formdom::{Document, Element, File, Selector};
use formguard::{
    Engine, Field, FieldKey, RuleRegistry, ValidateConfig, ValidateOptions, ValueKind, Verdict,
};

fn read(input: Element) -> Field {
    let doc = Document::new(Element::form().child(input));
    let node = doc
        .query_selector(doc.root(), &Selector::has_attribute("name"))
        .unwrap();
    Field::read(&doc, node)
}

// ============================================================================
// Field::read
// ============================================================================

#[test]
fn test_read_text_input() {
    let field = read(
        Element::input("text")
            .name("nick")
            .flag("required")
            .attr("minlength", "2")
            .attr("maxlength", " 8 ")
            .value("neo"),
    );
    assert_eq!(field.name, "nick");
    assert_eq!(field.value, "neo");
    assert_eq!(field.kind, ValueKind::Text);
    assert!(field.constraints.required);
    assert_eq!(field.constraints.min_length, Some(2));
    assert_eq!(field.constraints.max_length, Some(8));
    assert_eq!(field.constraints.min, None);
}

#[test]
fn test_read_malformed_bound_is_absent() {
    let field = read(Element::input("text").name("nick").attr("minlength", "abc"));
    assert_eq!(field.constraints.min_length, None);
}

#[test]
fn test_read_numeric_bounds_on_number_input() {
    let field = read(
        Element::input("number")
            .name("qty")
            .attr("min", "1")
            .attr("max", "2.5"),
    );
    assert_eq!(field.kind, ValueKind::Number);
    assert_eq!(field.constraints.min, Some(1.0));
    assert_eq!(field.constraints.max, Some(2.5));
}

#[test]
fn test_read_numeric_bounds_ignored_elsewhere() {
    let field = read(Element::input("date").name("day").attr("min", "2024-01-01"));
    assert_eq!(field.kind, ValueKind::Other);
    assert_eq!(field.constraints.min, None);
}

#[test]
fn test_read_file_input() {
    let field = read(
        Element::input("file")
            .name("avatar")
            .attr("accept", "image/*")
            .file(File::new("me.png", "image/png")),
    );
    assert_eq!(field.kind, ValueKind::File);
    assert_eq!(field.constraints.accept.as_deref(), Some("image/*"));
    assert_eq!(field.files, vec!["image/png".to_string()]);
}

#[test]
fn test_field_key_display() {
    assert_eq!(FieldKey::Id("group-name".into()).to_string(), "#group-name");
    assert_eq!(FieldKey::Path(vec![0, 2]).to_string(), "/0/2");
}

// ============================================================================
// Custom rules over numeric bounds
// ============================================================================

fn range(field: &Field) -> Verdict {
    let (Some(min), Some(max)) = (field.constraints.min, field.constraints.max) else {
        return Verdict::Valid;
    };
    match field.value.trim().parse::<f64>() {
        Ok(n) if n < min || n > max => Verdict::InvalidWithDetail(BTreeMap::from([
            ("min".to_string(), min.to_string()),
            ("max".to_string(), max.to_string()),
        ])),
        _ => Verdict::Valid,
    }
}

#[test]
fn test_custom_rule_reads_numeric_bounds() {
    let mut doc = Document::new(
        Element::form().id("order").child(
            Element::div()
                .class("form-group")
                .id("group-qty")
                .child(Element::label("Quantity").class("form-control-label"))
                .child(
                    Element::input("number")
                        .name("qty")
                        .attr("min", "1")
                        .attr("max", "10")
                        .value("12"),
                ),
        ),
    );
    let config = ValidateConfig::new().message("range", "%s must be between %min and %max");
    let engine = Engine::new(config, RuleRegistry::with_builtins().with("range", range)).unwrap();
    let mut form = engine
        .attach(&mut doc, "order", ValidateOptions::new(), None)
        .unwrap();

    let result = form.submit(&mut doc);

    let error = result.first_error().unwrap();
    assert_eq!(error.rule, "range");
    assert_eq!(error.message, "Quantity must be between 1 and 10");

    let qty = form.input_elements(&doc, "group-qty").unwrap().input;
    doc.set_value(qty, "4");
    assert!(form.submit(&mut doc).is_valid());
}
