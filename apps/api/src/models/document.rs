use bytes::Bytes;

/// An uploaded resume: raw bytes plus what the uploader declared about them.
/// Immutable once received; dropped as soon as its text has been extracted.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Bytes,
    /// Declared media type, e.g. `application/pdf`. May carry parameters.
    pub media_type: Option<String>,
    /// Original file name, used only to infer the type when none was declared.
    pub file_name: Option<String>,
}

impl Document {
    pub fn new(bytes: impl Into<Bytes>, media_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type,
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Normalized text of one resume or job description: folded, lowercased,
/// control characters stripped and whitespace collapsed to single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Wraps text that is already normalized. Use `text_extractor::normalize` otherwise.
    pub(crate) fn from_normalized(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
