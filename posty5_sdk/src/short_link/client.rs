use std::sync::Arc;

use posty5_core::{Error, HttpClient, Paginated, Pagination, RequestOptions};
use serde::Serialize;
use serde_json::Value;

use super::types::{CreateShortLinkRequest, ShortLink, ShortLinkListParams, UpdateShortLinkRequest};
use crate::common::CREATED_FROM;

const BASE_PATH: &str = "/api/short-link";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody<'a> {
    #[serde(flatten)]
    request: &'a CreateShortLinkRequest,
    template_type: &'static str,
    created_from: &'static str,
}

pub struct ShortLinkClient {
    http: Arc<HttpClient>,
}

impl ShortLinkClient {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        params: &ShortLinkListParams,
        pagination: &Pagination,
    ) -> Result<Paginated<ShortLink>, Error> {
        let options = RequestOptions::new().query(params).query(pagination);
        self.http.get(BASE_PATH, options).await?.require_result()
    }

    pub async fn get(&self, id: &str) -> Result<ShortLink, Error> {
        self.http
            .get(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    pub async fn create(&self, request: &CreateShortLinkRequest) -> Result<ShortLink, Error> {
        let body = CreateBody {
            request,
            template_type: "user",
            created_from: CREATED_FROM,
        };
        self.http
            .post(BASE_PATH, &body, RequestOptions::new())
            .await?
            .require_result()
    }

    pub async fn update(&self, id: &str, request: &UpdateShortLinkRequest) -> Result<ShortLink, Error> {
        self.http
            .put(&format!("{}/{}", BASE_PATH, id), request, RequestOptions::new())
            .await?
            .require_result()
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.http
            .delete::<Value>(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?;
        Ok(())
    }
}
