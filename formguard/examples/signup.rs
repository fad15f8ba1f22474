use std::fs::File;

use formdom::{Document, Element, NodeId, Selector};
use formguard::{Engine, ValidateConfig, ValidateOptions};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut doc = Document::new(form());
    let engine = Engine::with_builtins(ValidateConfig::default())?;
    let mut form = engine.attach(&mut doc, "signup", ValidateOptions::new(), None)?;

    println!("-- first attempt");
    let result = form.submit(&mut doc);
    for error in result.errors() {
        println!("{}: {}", error.key, error.message);
    }
    print_errors(&doc);

    let name = form.input_elements(&doc, "group-name")?.input;
    let email = form.input_elements(&doc, "group-email")?.input;
    doc.set_value(name, "Ada Lovelace");
    doc.set_value(email, "ada@example.com");

    println!("-- second attempt");
    let result = form.submit(&mut doc);
    println!("valid: {}", result.is_valid());
    println!("submitted: {}", doc.submissions().len());
    print_errors(&doc);

    Ok(())
}

fn form() -> Element {
    Element::form()
        .id("signup")
        .child(group(
            "group-name",
            "Full name",
            Element::input("text")
                .name("name")
                .flag("required")
                .attr("maxlength", "20"),
        ))
        .child(group(
            "group-email",
            "E-mail",
            Element::input("email").name("email").flag("required"),
        ))
        .child(group(
            "group-phone",
            "Phone",
            Element::input("tel").name("phone"),
        ))
}

fn group(id: &str, label: &str, input: Element) -> Element {
    Element::div()
        .class("form-group")
        .id(id)
        .child(Element::label(label).class("form-control-label"))
        .child(input)
}

fn print_errors(doc: &Document) {
    let Ok(selector) = Selector::parse(".text-help") else {
        return;
    };
    let shown: Vec<NodeId> = doc.query_selector_all(doc.root(), &selector);
    println!("{} error container(s) shown", shown.len());
    for container in shown {
        println!("  {}", doc.text_content(container));
    }
}
