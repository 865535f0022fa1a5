use std::sync::Arc;

use posty5_core::{
    Error, FilePayload, FinalizeMode, HttpClient, MetadataCall, Paginated, Pagination,
    RequestOptions, StorageClient, UploadWorkflow,
};
use serde::Serialize;
use serde_json::Value;

use super::types::{
    SavedWorkspace, Workspace, WorkspaceListParams, WorkspaceRequest, WorkspaceSummary,
    WorkspaceWrite,
};
use crate::common::CREATED_FROM;

const BASE_PATH: &str = "/api/social-publisher-workspace";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceBody<'a> {
    #[serde(flatten)]
    request: &'a WorkspaceRequest,
    has_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_from: Option<&'static str>,
}

pub struct WorkspaceClient {
    http: Arc<HttpClient>,
    storage: StorageClient,
}

impl WorkspaceClient {
    pub fn new(http: Arc<HttpClient>, storage: StorageClient) -> Self {
        Self { http, storage }
    }

    pub async fn list(
        &self,
        params: &WorkspaceListParams,
        pagination: &Pagination,
    ) -> Result<Paginated<WorkspaceSummary>, Error> {
        let options = RequestOptions::new().query(params).query(pagination);
        self.http.get(BASE_PATH, options).await?.require_result()
    }

    pub async fn get(&self, id: &str) -> Result<Workspace, Error> {
        self.http
            .get(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    /// Creates a workspace, uploading `logo` when given.
    pub async fn create(
        &self,
        request: &WorkspaceRequest,
        logo: Option<&FilePayload>,
    ) -> Result<SavedWorkspace, Error> {
        let body = WorkspaceBody {
            request,
            has_image: logo.is_some(),
            created_from: Some(CREATED_FROM),
        };
        self.save(MetadataCall::create(BASE_PATH, &body), logo).await
    }

    /// Updates a workspace, replacing its logo when given.
    pub async fn update(
        &self,
        id: &str,
        request: &WorkspaceRequest,
        logo: Option<&FilePayload>,
    ) -> Result<SavedWorkspace, Error> {
        let body = WorkspaceBody {
            request,
            has_image: logo.is_some(),
            created_from: None,
        };
        let path = format!("{}/{}", BASE_PATH, id);
        self.save(MetadataCall::update(&path, &body), logo).await
    }

    async fn save(
        &self,
        call: MetadataCall<'_, WorkspaceBody<'_>>,
        logo: Option<&FilePayload>,
    ) -> Result<SavedWorkspace, Error> {
        match logo {
            Some(logo) => {
                let uploaded = UploadWorkflow::new(&self.http, &self.storage, FinalizeMode::ServerSide)
                    .run::<WorkspaceWrite, _>(call, logo)
                    .await?;
                Ok(SavedWorkspace {
                    workspace_id: uploaded.metadata.workspace_id,
                    image_url: uploaded.file_url,
                })
            }
            None => {
                let write: WorkspaceWrite = call.send(&self.http).await?;
                Ok(SavedWorkspace {
                    workspace_id: write.workspace_id,
                    image_url: None,
                })
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.http
            .delete::<Value>(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?;
        Ok(())
    }
}
