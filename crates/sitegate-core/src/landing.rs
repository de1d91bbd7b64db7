//! Landing-page flow: the contact form and newsletter signup.
//!
//! Input is trimmed and checked locally; nothing reaches the backend until
//! it passes.

use tracing::info;

use crate::admin::SaveError;
use crate::api::ApiClient;
use crate::forms::{check_contact, check_newsletter_email};
use crate::models::{Contact, ContactSubmission, Subscriber};

/// Check and send a contact form submission.
pub async fn send_contact(
    api: &ApiClient,
    submission: &ContactSubmission,
) -> Result<Contact, SaveError> {
    let submission = check_contact(submission)?;
    let contact = api.submit_contact(&submission).await?;
    info!(id = ?contact.id, "Contact form submitted");
    Ok(contact)
}

/// Check an email address and subscribe it to the newsletter.
pub async fn subscribe(api: &ApiClient, email: &str) -> Result<Subscriber, SaveError> {
    let email = check_newsletter_email(email)?;
    let subscriber = api.subscribe_newsletter(&email).await?;
    info!(id = ?subscriber.id, "Newsletter subscription added");
    Ok(subscriber)
}
