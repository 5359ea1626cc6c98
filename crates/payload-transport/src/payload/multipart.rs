//! Multipart form payload
//!
//! Encodes form fields and an optional single file as `multipart/form-data`.
//! A fresh boundary is generated for every encoding.

use super::Payload;
use crate::error::Result;
use futures::TryStreamExt;
use reqwest::multipart::{Form, Part};
use std::io;
use std::sync::{Mutex, PoisonError};

const FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// File part of a multipart payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFile {
    /// Form field name
    pub key: String,
    /// File name reported to the server
    pub name: String,
    /// Raw file content
    pub content: Vec<u8>,
}

impl MultipartFile {
    /// Create a new file part
    pub fn new(key: impl Into<String>, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Payload made of form fields followed by an optional file
///
/// The boundary of the latest encoding is remembered so that
/// [`Payload::content_type`] matches the body just produced. Encode one
/// instance from one task at a time.
#[derive(Debug, Default)]
pub struct MultipartPayload {
    form: Vec<(String, String)>,
    file: Option<MultipartFile>,
    boundary: Mutex<String>,
}

impl MultipartPayload {
    /// Create an empty multipart payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a form field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    /// Attach the file part, replacing any previous one
    pub fn file(mut self, file: MultipartFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Form fields in insertion order
    pub fn form(&self) -> &[(String, String)] {
        &self.form
    }

    /// The file part, if any
    pub fn file_part(&self) -> Option<&MultipartFile> {
        self.file.as_ref()
    }

    /// Boundary used by the most recent [`Payload::content`] call.
    ///
    /// Empty until the payload has been encoded once.
    pub fn boundary(&self) -> String {
        self.boundary
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn build_form(&self) -> io::Result<Form> {
        // Names go into part headers verbatim
        let mut form = Form::new().percent_encode_noop();

        for (key, value) in &self.form {
            form = form.text(header_safe(key)?.to_string(), value.clone());
        }

        if let Some(file) = &self.file {
            let part = Part::bytes(file.content.clone())
                .file_name(header_safe(&file.name)?.to_string())
                .mime_str(FILE_CONTENT_TYPE)
                .map_err(io::Error::other)?;
            form = form.part(header_safe(&file.key)?.to_string(), part);
        }

        Ok(form)
    }
}

impl Payload for MultipartPayload {
    fn accept(&self) -> String {
        "application/json".to_string()
    }

    fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary())
    }

    fn content(&self) -> Result<Vec<u8>> {
        let form = self.build_form()?;
        let boundary = form.boundary().to_string();

        // Every part is in memory, so the stream resolves without a runtime
        let chunks: Vec<_> = futures::executor::block_on(form.into_stream().try_collect())
            .map_err(io::Error::other)?;

        let mut body = Vec::with_capacity(chunks.iter().map(|chunk| chunk.len()).sum());
        for chunk in &chunks {
            body.extend_from_slice(chunk);
        }

        *self.boundary.lock().unwrap_or_else(PoisonError::into_inner) = boundary;
        Ok(body)
    }
}

/// Reject names that would break out of a part header line or its quoting.
fn header_safe(value: &str) -> io::Result<&str> {
    if value.contains(['\r', '\n', '"']) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("multipart name contains a line break or quote: {value:?}"),
        ));
    }
    Ok(value)
}
