//! Request parameters and body encoders
//!
//! Bodies for POST/PUT are produced by a [`FormEncoder`]. Plain parameter sets
//! use [`UrlEncoded`]; as soon as a file field is present the body switches to
//! [`Multipart`]. Both encoders see the same inputs, so the call path in the
//! client stays the same either way.

use std::fmt::Display;

use url::form_urlencoded;

/// `Content-Type` of a url-encoded form body
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Fallback MIME type for uploads whose type cannot be guessed
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Ordered request parameters
///
/// Values are stringified on insert. Re-inserting a name replaces the value
/// but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter set
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        let name = name.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    /// Builder-style [`Params::insert`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a parameter value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encode as `application/x-www-form-urlencoded`
    #[must_use]
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// A file field in a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// Filename reported to the server
    pub filename: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
    /// MIME type of the contents
    pub content_type: String,
}

impl FilePart {
    /// Create a file part, guessing the MIME type from the filename
    #[must_use]
    pub fn new(field: impl Into<String>, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename);
        Self {
            field: field.into(),
            filename,
            bytes,
            content_type,
        }
    }

    /// Override the guessed MIME type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Guess a MIME type from a filename, defaulting to `application/octet-stream`
#[must_use]
pub fn guess_content_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// An encoded request body with its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    /// Value for the `Content-Type` header
    pub content_type: String,
    /// Body bytes
    pub bytes: Vec<u8>,
}

/// Turns parameters and file fields into a request body
pub trait FormEncoder {
    /// Encode the body
    fn encode(&self, params: &Params, files: &[FilePart]) -> EncodedBody;
}

/// `application/x-www-form-urlencoded` encoder
///
/// Files cannot be represented and are ignored; use [`encoder_for`] to pick
/// the right encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlEncoded;

impl FormEncoder for UrlEncoded {
    fn encode(&self, params: &Params, _files: &[FilePart]) -> EncodedBody {
        EncodedBody {
            content_type: FORM_URLENCODED.to_string(),
            bytes: params.to_urlencoded().into_bytes(),
        }
    }
}

/// `multipart/form-data` encoder
///
/// Scalar fields come first, then file fields, each in the order supplied.
#[derive(Debug, Clone)]
pub struct Multipart {
    boundary: String,
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}

impl Multipart {
    /// Create an encoder with a fresh random boundary
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Create an encoder with a fixed boundary
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
        }
    }

    /// Boundary token used between parts
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    fn open_part(&self, body: &mut Vec<u8>) {
        body.extend_from_slice(b"--");
        body.extend_from_slice(self.boundary.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
}

impl FormEncoder for Multipart {
    fn encode(&self, params: &Params, files: &[FilePart]) -> EncodedBody {
        let mut body = Vec::new();

        for (name, value) in params.iter() {
            self.open_part(&mut body);
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    escape_quoted(name)
                )
                .as_bytes(),
            );
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }

        for file in files {
            self.open_part(&mut body);
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: {}\r\n\r\n",
                    escape_quoted(&file.field),
                    escape_quoted(&file.filename),
                    file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(&file.bytes);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(b"--");
        body.extend_from_slice(self.boundary.as_bytes());
        body.extend_from_slice(b"--\r\n");

        EncodedBody {
            content_type: format!("multipart/form-data; boundary={}", self.boundary),
            bytes: body,
        }
    }
}

/// Pick the encoder for a body: multipart when any file is present
#[must_use]
pub fn encoder_for(files: &[FilePart]) -> Box<dyn FormEncoder> {
    if files.is_empty() {
        Box::new(UrlEncoded)
    } else {
        Box::new(Multipart::new())
    }
}

// Quotes and line breaks would end the header value early.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
