//! Hosted HTML pages: `/api/html-hosting`.
//!
//! File-backed pages go through the upload workflow: the metadata call hands
//! back a pre-signed URL, the file is `PUT` to storage, and the page is
//! published with `PUT /api/html-hosting/publish/{id}`.

pub mod client;
pub mod types;

pub use client::{HtmlHostingClient, PUBLISH_PREFIX};
pub use types::{
    FormLookup, GithubInfo, GithubPage, HtmlPage, HtmlPageListParams, HtmlPageLookup,
    HtmlPageRequest, PublishedPage, SourceType,
};
