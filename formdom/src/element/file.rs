/// A file attached to a file-upload input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: String,
    /// Declared MIME type, e.g. `image/png`. Empty when the host could not tell.
    pub mime: String,
}

impl File {
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
        }
    }
}
