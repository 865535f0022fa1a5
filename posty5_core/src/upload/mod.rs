//! Pre-signed storage transfers and the upload-then-finalize workflow.

mod storage;
mod workflow;

pub use self::storage::{FilePayload, StorageClient, UploadTarget};
pub use self::workflow::{FinalizeMode, MetadataCall, UploadMetadata, UploadWorkflow, Uploaded};
