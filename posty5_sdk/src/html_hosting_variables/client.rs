use std::sync::Arc;

use posty5_core::{Error, HttpClient, Paginated, Pagination, RequestOptions};
use serde_json::Value;

use super::types::{Variable, VariableListParams, VariableRequest};
use crate::common::WithOrigin;
use crate::validation::validate_variable_key;

const BASE_PATH: &str = "/api/html-hosting-variables";

pub struct HtmlHostingVariablesClient {
    http: Arc<HttpClient>,
}

impl HtmlHostingVariablesClient {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &VariableRequest) -> Result<(), Error> {
        validate_variable_key(&request.key)?;
        self.http
            .post::<Value, _>(BASE_PATH, &WithOrigin::new(request), RequestOptions::new())
            .await?;
        Ok(())
    }

    pub async fn update(&self, id: &str, request: &VariableRequest) -> Result<(), Error> {
        validate_variable_key(&request.key)?;
        self.http
            .put::<Value, _>(&format!("{}/{}", BASE_PATH, id), request, RequestOptions::new())
            .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Variable, Error> {
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
        params: &VariableListParams,
        pagination: &Pagination,
    ) -> Result<Paginated<Variable>, Error> {
        let options = RequestOptions::new().query(params).query(pagination);
        self.http.get(BASE_PATH, options).await?.require_result()
    }
}
