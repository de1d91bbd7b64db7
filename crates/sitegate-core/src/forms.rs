//! Landing-page and admin-panel forms.
//!
//! Forms are validated before anything is sent: a contact form with a blank
//! field, a malformed email, a create without an image or an unsupported
//! image type is rejected locally. The
//! multipart body only carries the fields that were actually filled in, so a
//! partial update leaves the rest (including the stored image) untouched.

use std::path::Path;

use thiserror::Error;

use crate::api::MultipartForm;
use crate::models::ContactSubmission;

/// Image types the backend accepts.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Multipart field name for the image attachment
const IMAGE_FIELD: &str = "image";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Please select an image")]
    MissingImage,

    #[error("Please enter a {0}")]
    MissingField(&'static str),

    #[error("Invalid file type. Allowed: {}", ALLOWED_IMAGE_EXTENSIONS.join(", "))]
    UnsupportedImage(String),

    #[error("Could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Please fill in all fields.")]
    IncompleteContact,

    #[error("Please enter your email address.")]
    MissingEmail,

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Whether a form creates a new entry or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Create,
    Edit(String),
}

impl EditTarget {
    pub fn is_create(&self) -> bool {
        matches!(self, EditTarget::Create)
    }
}

/// An image chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_for(&file_name).map(str::to_string);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk.
    pub fn from_path(path: &Path) -> Result<Self, FormError> {
        let bytes = std::fs::read(path).map_err(|e| FormError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| IMAGE_FIELD.to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// Lowercased extension, if the file name has one.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.file_name)
    }

    fn validate(&self) -> Result<(), FormError> {
        match self.extension() {
            Some(ext) if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(FormError::UnsupportedImage(self.file_name.clone())),
        }
    }

    fn attach(&self, form: MultipartForm) -> MultipartForm {
        form.file(
            IMAGE_FIELD,
            self.file_name.clone(),
            self.content_type.clone(),
            self.bytes.clone(),
        )
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    match extension_of(file_name)?.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Check a text field: required on create, non-blank whenever present.
fn check_text(value: &Option<String>, label: &'static str, required: bool) -> Result<(), FormError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(FormError::MissingField(label)),
        None if required => Err(FormError::MissingField(label)),
        _ => Ok(()),
    }
}

fn check_image(image: &Option<ImageUpload>, target: &EditTarget) -> Result<(), FormError> {
    match image {
        Some(image) => image.validate(),
        None if target.is_create() => Err(FormError::MissingImage),
        None => Ok(()),
    }
}

fn push_text(form: MultipartForm, name: &str, value: &Option<String>) -> MultipartForm {
    match value {
        Some(v) => form.text(name, v.trim()),
        None => form,
    }
}

/// Fields of the project create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
}

impl ProjectForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn validate(&self, target: &EditTarget) -> Result<(), FormError> {
        let required = target.is_create();
        check_text(&self.name, "name", required)?;
        check_text(&self.description, "description", required)?;
        check_image(&self.image, target)
    }

    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new();
        form = push_text(form, "name", &self.name);
        form = push_text(form, "description", &self.description);
        match &self.image {
            Some(image) => image.attach(form),
            None => form,
        }
    }
}

/// Fields of the client create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub designation: Option<String>,
    pub image: Option<ImageUpload>,
}

impl ClientForm {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        designation: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            designation: Some(designation.into()),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn validate(&self, target: &EditTarget) -> Result<(), FormError> {
        let required = target.is_create();
        check_text(&self.name, "name", required)?;
        check_text(&self.description, "description", required)?;
        check_text(&self.designation, "designation", required)?;
        check_image(&self.image, target)
    }

    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new();
        form = push_text(form, "name", &self.name);
        form = push_text(form, "description", &self.description);
        form = push_text(form, "designation", &self.designation);
        match &self.image {
            Some(image) => image.attach(form),
            None => form,
        }
    }
}

/// Loose email shape check: one `@`, no whitespace, and a dot inside the
/// domain with something on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Trim a contact submission and check it is complete with a usable email.
pub fn check_contact(submission: &ContactSubmission) -> Result<ContactSubmission, FormError> {
    let trimmed = ContactSubmission {
        full_name: submission.full_name.trim().to_string(),
        email: submission.email.trim().to_string(),
        mobile_number: submission.mobile_number.trim().to_string(),
        city: submission.city.trim().to_string(),
    };
    let fields = [
        &trimmed.full_name,
        &trimmed.email,
        &trimmed.mobile_number,
        &trimmed.city,
    ];
    if fields.iter().any(|f| f.is_empty()) {
        return Err(FormError::IncompleteContact);
    }
    if !is_valid_email(&trimmed.email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(trimmed)
}

/// Trim a newsletter email and check its shape.
pub fn check_newsletter_email(email: &str) -> Result<String, FormError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FormError::MissingEmail);
    }
    if !is_valid_email(email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(email.to_string())
}
