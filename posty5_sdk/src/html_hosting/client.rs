use std::sync::Arc;

use posty5_core::{
    Error, FilePayload, FinalizeMode, HttpClient, MetadataCall, Paginated, Pagination,
    RequestOptions, StorageClient, UploadWorkflow,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::types::{
    FormLookup, GithubInfo, GithubPage, HtmlPage, HtmlPageListParams, HtmlPageLookup,
    HtmlPageRequest, HtmlPageWrite, PublishedPage, SourceType,
};
use crate::common::CREATED_FROM;

const BASE_PATH: &str = "/api/html-hosting";

/// Publish endpoint prefix; the page id is appended.
pub const PUBLISH_PREFIX: &str = "/api/html-hosting/publish";

const FINALIZE: FinalizeMode = FinalizeMode::Publish {
    prefix: PUBLISH_PREFIX,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileBody<'a> {
    #[serde(flatten)]
    request: &'a HtmlPageRequest,
    file_name: &'a str,
    source_type: SourceType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_new_file: bool,
    created_from: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GithubBody<'a> {
    #[serde(flatten)]
    request: &'a HtmlPageRequest,
    github_info: &'a GithubInfo,
    source_type: SourceType,
    created_from: &'static str,
}

pub struct HtmlHostingClient {
    http: Arc<HttpClient>,
    storage: StorageClient,
}

impl HtmlHostingClient {
    pub fn new(http: Arc<HttpClient>, storage: StorageClient) -> Self {
        Self { http, storage }
    }

    fn workflow(&self) -> UploadWorkflow<'_> {
        UploadWorkflow::new(&self.http, &self.storage, FINALIZE)
    }

    /// Creates a page, uploads `file` as its content and publishes it.
    ///
    /// If the upload or publish step fails the page record stays behind
    /// unpublished; delete it or retry with [`Self::update_with_file`].
    pub async fn create_with_file(
        &self,
        request: &HtmlPageRequest,
        file: &FilePayload,
    ) -> Result<PublishedPage, Error> {
        let body = FileBody {
            request,
            file_name: file.file_name(),
            source_type: SourceType::File,
            is_new_file: false,
            created_from: CREATED_FROM,
        };
        let uploaded = self
            .workflow()
            .run::<HtmlPageWrite, _>(MetadataCall::create(BASE_PATH, &body), file)
            .await?;
        tracing::info!("Published page {}", uploaded.metadata.details.id);
        Ok(PublishedPage {
            id: uploaded.metadata.details.id,
            shorter_link: uploaded.metadata.details.shorter_link,
            file_url: uploaded.file_url,
        })
    }

    /// Replaces a page's file. When the API answers without an upload URL the
    /// transfer is skipped, but the page is still republished.
    pub async fn update_with_file(
        &self,
        id: &str,
        request: &HtmlPageRequest,
        file: &FilePayload,
    ) -> Result<PublishedPage, Error> {
        let body = FileBody {
            request,
            file_name: file.file_name(),
            source_type: SourceType::File,
            is_new_file: true,
            created_from: CREATED_FROM,
        };
        let path = format!("{}/{}", BASE_PATH, id);
        let uploaded = self
            .workflow()
            .run::<HtmlPageWrite, _>(MetadataCall::update(&path, &body), file)
            .await?;
        Ok(PublishedPage {
            id: uploaded.metadata.details.id,
            shorter_link: uploaded.metadata.details.shorter_link,
            file_url: uploaded.file_url,
        })
    }

    pub async fn create_with_github(
        &self,
        request: &HtmlPageRequest,
        github: &GithubInfo,
    ) -> Result<GithubPage, Error> {
        let body = GithubBody {
            request,
            github_info: github,
            source_type: SourceType::Github,
            created_from: CREATED_FROM,
        };
        let write: HtmlPageWrite = self
            .http
            .post(BASE_PATH, &body, RequestOptions::new())
            .await?
            .require_result()?;
        Ok(github_page(write.details))
    }

    pub async fn update_with_github(
        &self,
        id: &str,
        request: &HtmlPageRequest,
        github: &GithubInfo,
    ) -> Result<GithubPage, Error> {
        let body = GithubBody {
            request,
            github_info: github,
            source_type: SourceType::Github,
            created_from: CREATED_FROM,
        };
        let write: HtmlPageWrite = self
            .http
            .put(&format!("{}/{}", BASE_PATH, id), &body, RequestOptions::new())
            .await?
            .require_result()?;
        Ok(github_page(write.details))
    }

    pub async fn get(&self, id: &str) -> Result<HtmlPage, Error> {
        self.http
            .get(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.http
            .delete::<Value>(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?;
        Ok(())
    }

    pub async fn list(
        &self,
        params: &HtmlPageListParams,
        pagination: &Pagination,
    ) -> Result<Paginated<HtmlPage>, Error> {
        let options = RequestOptions::new().query(params).query(pagination);
        self.http.get(BASE_PATH, options).await?.require_result()
    }

    pub async fn lookup(&self) -> Result<Vec<HtmlPageLookup>, Error> {
        self.http
            .get(&format!("{}/lookup", BASE_PATH), RequestOptions::new())
            .await?
            .require_result()
    }

    /// Forms found on the page, with the field names each one submits.
    pub async fn lookup_forms(&self, id: &str) -> Result<Vec<FormLookup>, Error> {
        // The API route is spelled "froms".
        self.http
            .get(&format!("{}/lookup-froms/{}", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    /// Drops the CDN cache for a page so the next visit sees fresh content.
    pub async fn clean_cache(&self, id: &str) -> Result<(), Error> {
        self.http
            .put::<Value, Value>(
                &format!("{}/{}/clean-cache", BASE_PATH, id),
                &json!({}),
                RequestOptions::new(),
            )
            .await?;
        Ok(())
    }
}

fn github_page(details: HtmlPage) -> GithubPage {
    GithubPage {
        id: details.id,
        shorter_link: details.shorter_link,
        github_info: details.github_info,
    }
}
