use std::sync::Arc;

use posty5_core::{Error, HttpClient, Paginated, Pagination, RequestOptions};
use serde_json::Value;

use super::types::{
    ChangeStatusRequest, ChangeStatusResult, FormSubmission, FormSubmissionListParams,
    NextPrevious,
};

const BASE_PATH: &str = "/api/html-hosting-form-submission";

pub struct FormSubmissionClient {
    http: Arc<HttpClient>,
}

impl FormSubmissionClient {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn get(&self, id: &str) -> Result<FormSubmission, Error> {
        self.http
            .get(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    /// Neighbouring submissions of the same form, for paging through one at a time.
    pub async fn next_previous(&self, id: &str) -> Result<NextPrevious, Error> {
        self.http
            .get(&format!("{}/{}/next-previous", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    pub async fn list(
        &self,
        params: &FormSubmissionListParams,
        pagination: &Pagination,
    ) -> Result<Paginated<FormSubmission>, Error> {
        let options = RequestOptions::new().query(params).query(pagination);
        self.http.get(BASE_PATH, options).await?.require_result()
    }

    pub async fn change_status(
        &self,
        id: &str,
        request: &ChangeStatusRequest,
    ) -> Result<ChangeStatusResult, Error> {
        let envelope = self
            .http
            .put::<ChangeStatusResult, _>(
                &format!("{}/{}/status", BASE_PATH, id),
                request,
                RequestOptions::new(),
            )
            .await?;
        let message = envelope.message.clone();
        Ok(envelope.result().unwrap_or(ChangeStatusResult {
            message: Some(message).filter(|m| !m.is_empty()),
            status_history: Vec::new(),
        }))
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.http
            .delete::<Value>(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?;
        Ok(())
    }
}
