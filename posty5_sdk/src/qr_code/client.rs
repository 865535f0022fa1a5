use std::sync::Arc;

use posty5_core::{Error, HttpClient, Paginated, Pagination, RequestOptions};
use serde::Serialize;
use serde_json::Value;

use super::types::{QrCode, QrCodeListParams, QrCodeRequest};
use crate::common::CREATED_FROM;

const BASE_PATH: &str = "/api/qr-code";

#[derive(Serialize)]
struct EncodedOptions {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QrCodeBody<'a> {
    #[serde(flatten)]
    request: &'a QrCodeRequest,
    options: EncodedOptions,
    template_type: &'static str,
    created_from: &'static str,
}

impl<'a> QrCodeBody<'a> {
    fn new(request: &'a QrCodeRequest) -> Self {
        Self {
            request,
            options: EncodedOptions {
                text: request.target.encode(),
            },
            template_type: "user",
            created_from: CREATED_FROM,
        }
    }
}

pub struct QrCodeClient {
    http: Arc<HttpClient>,
}

impl QrCodeClient {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &QrCodeRequest) -> Result<QrCode, Error> {
        tracing::debug!("Creating {} QR code", request.target.kind());
        self.http
            .post(BASE_PATH, &QrCodeBody::new(request), RequestOptions::new())
            .await?
            .require_result()
    }

    /// Replaces a QR code's target and settings. The API takes updates as a
    /// `POST` to the item path.
    pub async fn update(&self, id: &str, request: &QrCodeRequest) -> Result<QrCode, Error> {
        self.http
            .post(
                &format!("{}/{}", BASE_PATH, id),
                &QrCodeBody::new(request),
                RequestOptions::new(),
            )
            .await?
            .require_result()
    }

    pub async fn get(&self, id: &str) -> Result<QrCode, Error> {
        self.http
            .get(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.http
            .delete::<Value>(&format!("{}/{}", BASE_PATH, id), RequestOptions::new())
            .await?;
        Ok(())
    }

    pub async fn list(
        &self,
        params: &QrCodeListParams,
        pagination: &Pagination,
    ) -> Result<Paginated<QrCode>, Error> {
        let options = RequestOptions::new().query(params).query(pagination);
        self.http.get(BASE_PATH, options).await?.require_result()
    }
}
