//! Entry point that owns the shared transport and hands out resource clients.

use std::sync::Arc;

use posty5_core::{ClientOptions, Config, Error, HttpClient, StorageClient};

use crate::form_submission::FormSubmissionClient;
use crate::html_hosting::HtmlHostingClient;
use crate::html_hosting_variables::HtmlHostingVariablesClient;
use crate::qr_code::QrCodeClient;
use crate::short_link::ShortLinkClient;
use crate::social_task::SocialTaskClient;
use crate::workspace::WorkspaceClient;

/// Posty5 API client.
///
/// Every resource client handed out by this type shares one [`HttpClient`],
/// so an API key rotated through [`Posty5::http`] applies to all of them.
/// Resource clients are cheap to create; build one per call site.
#[derive(Clone)]
pub struct Posty5 {
    http: Arc<HttpClient>,
    storage: StorageClient,
}

impl Posty5 {
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_options(config, ClientOptions::default())
    }

    pub fn with_options(config: Config, options: ClientOptions) -> Result<Self, Error> {
        Ok(Self {
            http: Arc::new(HttpClient::with_options(config, options)?),
            storage: StorageClient::new()?,
        })
    }

    /// Builds a client from `POSTY5_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::with_options(Config::from_env(), ClientOptions::from_env())
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn short_links(&self) -> ShortLinkClient {
        ShortLinkClient::new(Arc::clone(&self.http))
    }

    pub fn qr_codes(&self) -> QrCodeClient {
        QrCodeClient::new(Arc::clone(&self.http))
    }

    pub fn html_hosting(&self) -> HtmlHostingClient {
        HtmlHostingClient::new(Arc::clone(&self.http), self.storage.clone())
    }

    pub fn html_hosting_variables(&self) -> HtmlHostingVariablesClient {
        HtmlHostingVariablesClient::new(Arc::clone(&self.http))
    }

    pub fn form_submissions(&self) -> FormSubmissionClient {
        FormSubmissionClient::new(Arc::clone(&self.http))
    }

    pub fn workspaces(&self) -> WorkspaceClient {
        WorkspaceClient::new(Arc::clone(&self.http), self.storage.clone())
    }

    pub fn social_tasks(&self) -> SocialTaskClient {
        SocialTaskClient::new(Arc::clone(&self.http), self.storage.clone())
    }
}
