//! API client for the website backend.
//!
//! This module provides the `ApiClient` struct, the one place requests to the
//! backend are built and sent. Every typed wrapper fixes an endpoint, method,
//! auth requirement and body encoding, then funnels through `request_as` or
//! the file-upload path.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::forms::{ClientForm, ProjectForm};
use crate::models::{
    Client, Contact, ContactSubmission, LoginRequest, LoginResponse, MessageResponse,
    NewsletterSignup, Project, Subscriber, VerifyResponse,
};

use super::request::{MultipartForm, RequestBody, RequestOptions};
use super::ApiError;

/// API client for the website backend.
///
/// Owns the process's `Session`; authenticated requests read the token held
/// at the moment they are dispatched.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a new API client for `base_url` (e.g. `https://example.com/api`)
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, ApiError> {
        let http = HttpClient::builder().build()?;
        Ok(Self::with_http_client(http, base_url, session))
    }

    /// Create a client around an existing `reqwest::Client`, sharing its pool.
    pub fn with_http_client(http: HttpClient, base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Store or clear the bearer credential, persisting the change.
    pub fn set_credential(&mut self, token: Option<String>) {
        self.session.set(token);
    }

    /// `Authorization: Bearer <token>` if a credential is held, else empty.
    pub fn get_auth_header(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value, sending no credential"),
            }
        }
        headers
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// `collection/<id>` with the id percent-encoded as one path segment.
    fn item_path(collection: &str, id: &str) -> String {
        format!("{}/{}", collection, urlencoding::encode(id))
    }

    /// Issue one request and return the decoded JSON body.
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<serde_json::Value, ApiError> {
        self.request_as(endpoint, options).await
    }

    /// Issue one request and decode the body into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        let headers = options.resolve_headers(&self.get_auth_header());
        let method = options.method.clone();

        debug!(
            method = %method,
            url = %url,
            authenticated = headers.contains_key(header::AUTHORIZATION),
            multipart = options.is_multipart(),
            "Dispatching request"
        );

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        builder = match options.body {
            Some(RequestBody::Json(value)) => builder.body(value.to_string()),
            Some(RequestBody::Multipart(form)) => match form.into_reqwest() {
                Ok(form) => builder.multipart(form),
                Err(e) => {
                    warn!(method = %method, url = %url, error = %e, "Multipart body rejected before sending");
                    return Err(ApiError::InvalidRequest(e.to_string()));
                }
            },
            None => builder,
        };

        let result = match builder.send().await {
            Ok(response) => Self::decode_response(response).await,
            Err(e) => Err(ApiError::Network(e)),
        };

        if let Err(ref e) = result {
            warn!(method = %method, url = %url, error = %e, "API request failed");
        }
        result
    }

    /// Read the body and turn it into the outcome: decoded JSON on 2xx, an
    /// `ApiError::Rejected` otherwise.
    async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn send_with_file<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        form: MultipartForm,
    ) -> Result<T, ApiError> {
        let options = RequestOptions::new(method).multipart(form).authenticated();
        self.request_as(endpoint, options).await
    }

    /// POST a multipart form with only the auth header attached.
    pub async fn create_with_file<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: MultipartForm,
    ) -> Result<T, ApiError> {
        self.send_with_file(Method::POST, endpoint, form).await
    }

    /// PUT a multipart form with only the auth header attached.
    pub async fn update_with_file<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: MultipartForm,
    ) -> Result<T, ApiError> {
        self.send_with_file(Method::PUT, endpoint, form).await
    }

    fn to_json<B: serde::Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }

    // ===== Public endpoints =====

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.request_as("/projects", RequestOptions::get()).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        self.request_as(&Self::item_path("/projects", id), RequestOptions::get())
            .await
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        self.request_as("/clients", RequestOptions::get()).await
    }

    pub async fn get_client(&self, id: &str) -> Result<Client, ApiError> {
        self.request_as(&Self::item_path("/clients", id), RequestOptions::get())
            .await
    }

    pub async fn submit_contact(&self, submission: &ContactSubmission) -> Result<Contact, ApiError> {
        let body = Self::to_json(submission)?;
        self.request_as("/contact", RequestOptions::post_json(body))
            .await
    }

    pub async fn subscribe_newsletter(&self, email: &str) -> Result<Subscriber, ApiError> {
        let body = Self::to_json(&NewsletterSignup {
            email: email.to_string(),
        })?;
        self.request_as("/newsletter", RequestOptions::post_json(body))
            .await
    }

    // ===== Admin auth =====

    /// Exchange credentials for a token. Does not touch the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = Self::to_json(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        self.request_as("/admin/auth/login", RequestOptions::post_json(body))
            .await
    }

    /// Log in and hold the returned token as the session credential.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self.login(username, password).await?;
        self.set_credential(Some(response.access_token.clone()));
        debug!(username = username, "Admin session established");
        Ok(response)
    }

    /// Drop the session credential. Tokens are stateless on the backend, so
    /// this is purely local.
    pub fn logout(&mut self) {
        self.set_credential(None);
        debug!("Admin session cleared");
    }

    pub async fn verify(&self) -> Result<VerifyResponse, ApiError> {
        self.request_as("/admin/auth/verify", RequestOptions::get().authenticated())
            .await
    }

    // ===== Admin projects =====

    pub async fn create_project(&self, form: &ProjectForm) -> Result<Project, ApiError> {
        self.create_with_file("/admin/projects", form.to_multipart())
            .await
    }

    pub async fn update_project(&self, id: &str, form: &ProjectForm) -> Result<Project, ApiError> {
        self.update_with_file(&Self::item_path("/admin/projects", id), form.to_multipart())
            .await
    }

    pub async fn delete_project(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.request_as(
            &Self::item_path("/admin/projects", id),
            RequestOptions::delete().authenticated(),
        )
        .await
    }

    // ===== Admin clients =====

    pub async fn create_client(&self, form: &ClientForm) -> Result<Client, ApiError> {
        self.create_with_file("/admin/clients", form.to_multipart())
            .await
    }

    pub async fn update_client(&self, id: &str, form: &ClientForm) -> Result<Client, ApiError> {
        self.update_with_file(&Self::item_path("/admin/clients", id), form.to_multipart())
            .await
    }

    pub async fn delete_client(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.request_as(
            &Self::item_path("/admin/clients", id),
            RequestOptions::delete().authenticated(),
        )
        .await
    }

    // ===== Admin read-only views =====

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.request_as("/admin/contacts", RequestOptions::get().authenticated())
            .await
    }

    pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>, ApiError> {
        self.request_as("/admin/newsletters", RequestOptions::get().authenticated())
            .await
    }
}
