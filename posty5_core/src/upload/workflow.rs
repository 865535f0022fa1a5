//! The metadata -> transfer -> finalize sequence shared by every resource
//! that accepts a file.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::storage::{FilePayload, StorageClient, UploadTarget};
use crate::{client::HttpClient, client::RequestOptions, Error};

/// How an uploaded resource becomes live. Declared per resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeMode {
    /// The client publishes explicitly: `PUT {prefix}/{id}` with `{}` once
    /// the transfer succeeded.
    Publish { prefix: &'static str },
    /// The server finalizes on its own after the transfer.
    ServerSide,
    /// The resource has no publish concept.
    NotApplicable,
}

/// What the workflow reads out of a metadata response.
pub trait UploadMetadata {
    /// Identifier used to build the finalize path.
    fn resource_id(&self) -> &str;

    /// Where to send the bytes. `None` means the server expects no transfer.
    fn upload_target(&self) -> Option<UploadTarget>;

    /// Public URL announced by the API, preferred over the stripped
    /// pre-signed URL when present.
    fn public_url(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetadataMethod {
    Post,
    Put,
}

/// Step 1 of the workflow: the call that creates or updates the record.
#[derive(Debug)]
pub struct MetadataCall<'a, B: ?Sized> {
    method: MetadataMethod,
    path: &'a str,
    body: &'a B,
}

impl<'a, B: Serialize + ?Sized> MetadataCall<'a, B> {
    /// `POST` a new record. The response must carry an upload target.
    pub fn create(path: &'a str, body: &'a B) -> Self {
        Self {
            method: MetadataMethod::Post,
            path,
            body,
        }
    }

    /// `PUT` an existing record. A missing upload target skips the transfer.
    pub fn update(path: &'a str, body: &'a B) -> Self {
        Self {
            method: MetadataMethod::Put,
            path,
            body,
        }
    }

    /// Sends the metadata call on its own and unwraps the result. Used when
    /// there is no file to transfer.
    pub async fn send<M>(&self, http: &HttpClient) -> Result<M, Error>
    where
        M: DeserializeOwned,
    {
        let envelope = match self.method {
            MetadataMethod::Post => http.post::<M, B>(self.path, self.body, RequestOptions::new()).await?,
            MetadataMethod::Put => http.put::<M, B>(self.path, self.body, RequestOptions::new()).await?,
        };
        envelope.require_result()
    }
}

/// Outcome of a completed workflow.
#[derive(Debug, Clone)]
pub struct Uploaded<M> {
    /// The metadata call's result.
    pub metadata: M,
    /// Public URL of the transferred asset, if one is known.
    pub file_url: Option<String>,
    /// Whether an explicit finalize call was made and succeeded.
    pub finalized: bool,
}

/// Runs metadata -> transfer -> finalize for one resource type.
///
/// Steps are strictly sequential and the first failure aborts the run. A
/// record created in step 1 is left in place if a later step fails; cleaning
/// it up is the caller's job.
pub struct UploadWorkflow<'a> {
    http: &'a HttpClient,
    storage: &'a StorageClient,
    finalize: FinalizeMode,
}

impl<'a> UploadWorkflow<'a> {
    pub fn new(http: &'a HttpClient, storage: &'a StorageClient, finalize: FinalizeMode) -> Self {
        Self {
            http,
            storage,
            finalize,
        }
    }

    pub fn finalize_mode(&self) -> FinalizeMode {
        self.finalize
    }

    pub async fn run<M, B>(&self, call: MetadataCall<'_, B>, file: &FilePayload) -> Result<Uploaded<M>, Error>
    where
        M: DeserializeOwned + UploadMetadata,
        B: Serialize + ?Sized,
    {
        let metadata: M = call.send(self.http).await?;

        let file_url = match metadata.upload_target() {
            Some(target) => {
                let stored_at = self.storage.transfer(&target, file).await?;
                Some(metadata.public_url().unwrap_or(stored_at))
            }
            None if call.method == MetadataMethod::Post => {
                tracing::error!(
                    "Metadata call for {} returned no upload target",
                    metadata.resource_id()
                );
                return Err(Error::missing_upload_target(metadata.resource_id()));
            }
            None => {
                tracing::debug!(
                    "No upload target for {}, skipping transfer",
                    metadata.resource_id()
                );
                metadata.public_url()
            }
        };

        let finalized = match self.finalize {
            FinalizeMode::Publish { prefix } => {
                let path = format!("{}/{}", prefix, metadata.resource_id());
                self.http
                    .put::<Value, Value>(&path, &json!({}), RequestOptions::new())
                    .await?;
                true
            }
            FinalizeMode::ServerSide | FinalizeMode::NotApplicable => false,
        };

        Ok(Uploaded {
            metadata,
            file_url,
            finalized,
        })
    }
}
