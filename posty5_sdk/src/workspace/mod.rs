//! Social publisher workspaces: `/api/social-publisher-workspace`.
//!
//! A workspace can carry a logo. When one is supplied the create/update call
//! returns a pre-signed image URL, the logo is uploaded there, and the server
//! picks it up on its own.

pub mod client;
pub mod types;

pub use client::WorkspaceClient;
pub use types::{
    SavedWorkspace, Workspace, WorkspaceAccount, WorkspaceListParams, WorkspaceRequest,
    WorkspaceSummary,
};
