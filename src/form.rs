//! Submitted form payloads and icon sources.
//!
//! Multipart parsing happens in the host web layer. This module holds the
//! already-parsed result: an ordered list of named text or file fields.

/// An uploaded file received in a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name, if any.
    pub file_name: Option<String>,
    /// Client-supplied content type, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("upload")
    }

    /// Returns true if the client declared the upload as `image/svg+xml`.
    ///
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn is_declared_svg(&self) -> bool {
        self.content_type.as_deref().is_some_and(|ct| {
            ct.split(';')
                .next()
                .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("image/svg+xml"))
        })
    }
}

/// A single form field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text(String),
    File(UploadedFile),
}

/// A parsed form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, FormField)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), FormField::Text(value.into())));
        self
    }

    /// Appends a file field.
    pub fn file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.fields.push((name.into(), FormField::File(file)));
        self
    }

    /// Returns the first value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Where the icon image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource<'a> {
    /// A named icon shipped with the assets.
    BuiltIn(&'a str),
    /// Bytes uploaded with the request.
    Upload(&'a UploadedFile),
}

impl<'a> IconSource<'a> {
    /// Interprets a form field as an icon source.
    ///
    /// Text values name a built-in icon. Empty text counts as no value.
    pub fn from_field(field: &'a FormField) -> Option<Self> {
        match field {
            FormField::Text(id) if id.trim().is_empty() => None,
            FormField::Text(id) => Some(Self::BuiltIn(id.trim())),
            FormField::File(file) => Some(Self::Upload(file)),
        }
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> &str {
        match self {
            Self::BuiltIn(id) => id,
            Self::Upload(file) => file.display_name(),
        }
    }
}
