//! Resource clients for the Posty5 API: short links, QR codes, hosted HTML
//! pages and their variables, form submissions, and the social publisher.
//!
//! Builds on `posty5_core` for the transport, the error taxonomy and the
//! pre-signed upload workflow. Start from [`Posty5`].

mod common;
pub mod client;
pub mod form_submission;
pub mod html_hosting;
pub mod html_hosting_variables;
pub mod qr_code;
pub mod short_link;
pub mod social_task;
pub mod validation;
pub mod workspace;

pub use posty5_core;
pub use posty5_core::{
    ClientOptions, Config, Error, ErrorKind, FilePayload, InvalidField, Paginated, Pagination,
    PathSegment, RequestOptions, RetryPolicy, SortDirection,
};

pub use client::Posty5;
pub use common::{LookupItem, PageInfo, PreviewStatus};
pub use form_submission::{FormStatus, FormSubmission, FormSubmissionClient};
pub use html_hosting::{HtmlHostingClient, HtmlPage, HtmlPageRequest};
pub use html_hosting_variables::{HtmlHostingVariablesClient, Variable, VariableRequest};
pub use qr_code::{QrCode, QrCodeClient, QrCodeRequest, QrCodeTarget};
pub use short_link::{CreateShortLinkRequest, ShortLink, ShortLinkClient};
pub use social_task::{Platform, SocialTaskClient, TaskSettings, VideoSource};
pub use workspace::{Workspace, WorkspaceClient, WorkspaceRequest};
