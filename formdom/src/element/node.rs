use super::File;

/// An owned element tree used to describe a document before it is loaded.
///
/// Elements are built fluently and handed to [`crate::Document::new`], which
/// flattens them into an addressable arena.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    // Identity
    pub tag: String,
    pub id: Option<String>,

    // Markup
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,

    // Content
    pub text: String,
    pub children: Vec<Element>,

    // Form state (what a browser keeps as properties, not attributes)
    pub value: String,
    pub files: Vec<File>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn form() -> Self {
        Self::new("form")
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn section() -> Self {
        Self::new("section")
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new("label").text(text)
    }

    /// Create an `<input>` of the given type.
    pub fn input(input_type: impl Into<String>) -> Self {
        Self::new("input").attr("type", input_type)
    }

    pub fn textarea() -> Self {
        Self::new("textarea")
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    // Markup
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// `id` and `class` are routed to their dedicated fields so the element
    /// reads the same no matter how it was declared.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "id" => self.id = Some(value),
            "class" => {
                for class in value.split_whitespace() {
                    self = self.class(class);
                }
            }
            _ => match self.attributes.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => *existing = value,
                None => self.attributes.push((name, value)),
            },
        }
        self
    }

    /// Shorthand for a boolean attribute such as `required`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.attr("name", name)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    // Form state
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn file(mut self, file: File) -> Self {
        self.files.push(file);
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }
}
