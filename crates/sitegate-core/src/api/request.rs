//! Request descriptors and header resolution.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

/// Body of an outgoing request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized as JSON; the gateway sets `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Sent as `multipart/form-data`; the transport picks the boundary.
    Multipart(MultipartForm),
}

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Multipart form fields, kept inspectable until dispatch.
///
/// `reqwest::multipart::Form` is consumed on send and cannot be examined,
/// so fields are collected here and converted at the last moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type,
            bytes,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Convert into the transport's form type.
    pub fn into_reqwest(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let mut file_part = Part::bytes(bytes).file_name(file_name);
                    if let Some(mime) = content_type {
                        file_part = file_part.mime_str(&mime)?;
                    }
                    form.part(name, file_part)
                }
            };
        }
        Ok(form)
    }
}

/// Everything that varies between gateway calls besides the endpoint.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    pub require_auth: bool,
    pub extra_headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post_json(body: serde_json::Value) -> Self {
        Self::new(Method::POST).json(body)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Attach the session's bearer credential, if one is held.
    pub fn authenticated(mut self) -> Self {
        self.require_auth = true;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self.body, Some(RequestBody::Multipart(_)))
    }

    /// Compute the headers the gateway sets for this request.
    ///
    /// Multipart bodies never get a `Content-Type` here and only forward an
    /// `Authorization` entry from `extra_headers`. Other requests get the JSON
    /// content type when they carry a body on a non-GET method, and forward
    /// every extra header, which win over the computed ones.
    pub fn resolve_headers(&self, auth: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if self.is_multipart() {
            if self.require_auth {
                merge(&mut headers, auth);
            }
            if let Some(value) = self.extra_headers.get(header::AUTHORIZATION) {
                headers.insert(header::AUTHORIZATION, value.clone());
            }
            return headers;
        }

        if self.method != Method::GET && self.body.is_some() {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        if self.require_auth {
            merge(&mut headers, auth);
        }
        merge(&mut headers, &self.extra_headers);
        headers
    }
}

fn merge(target: &mut HeaderMap, source: &HeaderMap) {
    for (name, value) in source {
        target.insert(name.clone(), value.clone());
    }
}
