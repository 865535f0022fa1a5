//! Submissions collected from forms on hosted pages:
//! `/api/html-hosting-form-submission`.

pub mod client;
pub mod types;

pub use client::FormSubmissionClient;
pub use types::{
    ChangeStatusRequest, ChangeStatusResult, FormStatus, FormSubmission,
    FormSubmissionListParams, NextPrevious, StatusHistoryEntry, SubmissionRef,
};
