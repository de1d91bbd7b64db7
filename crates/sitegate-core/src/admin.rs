//! Admin panel flow on top of the gateway.
//!
//! Covers what the admin screens do between user gestures: checking whether
//! the held token is still good, signing in and out, saving project/client
//! forms, and loading the dashboard lists one after another.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiClient, ApiError};
use crate::forms::{ClientForm, EditTarget, FormError, ProjectForm};
use crate::models::{Client, Contact, LoginResponse, Project, Subscriber};

/// Shown when the login form is submitted with a blank field
pub const MISSING_CREDENTIALS: &str = "Please enter both username and password";

/// Outcome of saving a form: rejected locally or by the backend.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum SignInError {
    #[error("{}", MISSING_CREDENTIALS)]
    MissingCredentials,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Everything the admin panel shows after login.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminDashboard {
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
    pub contacts: Vec<Contact>,
    pub subscribers: Vec<Subscriber>,
}

/// Whether the held credential is accepted by the backend.
///
/// Any failure, including an unreachable backend, counts as signed out.
pub async fn check_auth(api: &ApiClient) -> bool {
    match api.verify().await {
        Ok(resp) => {
            debug!(username = ?resp.username(), "Admin session verified");
            resp.authenticated
        }
        Err(e) => {
            debug!(error = %e, "Admin session not valid");
            false
        }
    }
}

/// Log in with trimmed credentials and hold the returned token.
pub async fn sign_in(
    api: &mut ApiClient,
    username: &str,
    password: &str,
) -> Result<LoginResponse, SignInError> {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(SignInError::MissingCredentials);
    }

    let response = api.authenticate(username, password).await?;
    info!(username = username, "Login successful");
    Ok(response)
}

pub fn sign_out(api: &mut ApiClient) {
    api.logout();
    info!("Logged out");
}

/// Validate then create or update a project.
pub async fn save_project(
    api: &ApiClient,
    target: &EditTarget,
    form: &ProjectForm,
) -> Result<Project, SaveError> {
    form.validate(target)?;
    let project = match target {
        EditTarget::Create => api.create_project(form).await?,
        EditTarget::Edit(id) => api.update_project(id, form).await?,
    };
    info!(id = ?project.id, name = %project.name, "Project saved");
    Ok(project)
}

/// Validate then create or update a client.
pub async fn save_client(
    api: &ApiClient,
    target: &EditTarget,
    form: &ClientForm,
) -> Result<Client, SaveError> {
    form.validate(target)?;
    let client = match target {
        EditTarget::Create => api.create_client(form).await?,
        EditTarget::Edit(id) => api.update_client(id, form).await?,
    };
    info!(id = ?client.id, name = %client.name, "Client saved");
    Ok(client)
}

/// Load projects, clients, contacts and subscribers in that order.
pub async fn load_dashboard(api: &ApiClient) -> Result<AdminDashboard, ApiError> {
    let projects = api.list_projects().await?;
    let clients = api.list_clients().await?;
    let contacts = api.list_contacts().await?;
    let subscribers = api.list_subscribers().await?;

    debug!(
        projects = projects.len(),
        clients = clients.len(),
        contacts = contacts.len(),
        subscribers = subscribers.len(),
        "Dashboard loaded"
    );

    Ok(AdminDashboard {
        projects,
        clients,
        contacts,
        subscribers,
    })
}
