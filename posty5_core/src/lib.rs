//! Core of the Posty5 SDK: the shared HTTP transport, the error taxonomy,
//! the response envelope and the pre-signed upload workflow.

mod client;
mod config;
pub mod errors;
mod query;
mod retry;
pub mod types;
pub mod upload;
pub use self::client::{HttpClient, RequestOptions, API_KEY_HEADER};
pub use self::config::{ClientOptions, Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::{normalize, Error, ErrorKind, Failure, InvalidField, PathSegment};
pub use self::query::{Pagination, Query, QueryPairs, SortDirection};
pub use self::retry::{RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};
pub use self::types::{Envelope, Paginated};
pub use self::upload::{
    FilePayload, FinalizeMode, MetadataCall, StorageClient, UploadMetadata, UploadTarget,
    UploadWorkflow, Uploaded,
};
