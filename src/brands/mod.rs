//! Typed client for the Brands resource.

pub mod messages;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::http::{HttpClient, HttpMethod, HttpResponse, RequestInput};

pub const BRANDS_PATH: &str = "brands";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBrand {
    pub name: String,
    pub slug: String,
}

/// Partial update; absent fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BrandUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UpdateOutcome {
    pub success: bool,
}

/// Field name to messages, as returned with a 422.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// How the service answered a call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    Invalid(ValidationErrors),
    NotFound(String),
    MethodNotAllowed(String),
    Unexpected { status: u16, body: String },
}

impl<T> ApiOutcome<T> {
    pub fn success(self) -> Option<T> {
        match self {
            ApiOutcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrandsClient {
    http: HttpClient,
}

impl BrandsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// POST /brands
    pub async fn create(&self, brand: &NewBrand) -> Result<ApiOutcome<Brand>> {
        let request = json_request(HttpMethod::Post, vec![BRANDS_PATH.to_string()])
            .json(serde_json::to_value(brand)?);
        let response = self.http.send(request).await?;
        Ok(classify(response, 201))
    }

    /// GET /brands/{id}
    pub async fn get(&self, id: &str) -> Result<ApiOutcome<Brand>> {
        let request = json_request(HttpMethod::Get, vec![BRANDS_PATH.to_string(), id.to_string()]);
        let response = self.http.send(request).await?;
        Ok(classify(response, 200))
    }

    /// PUT /brands/{id}
    pub async fn update(&self, id: &str, update: &BrandUpdate) -> Result<ApiOutcome<UpdateOutcome>> {
        let request = json_request(HttpMethod::Put, vec![BRANDS_PATH.to_string(), id.to_string()])
            .json(serde_json::to_value(update)?);
        let response = self.http.send(request).await?;
        Ok(classify(response, 200))
    }
}

fn json_request(method: HttpMethod, path_segments: Vec<String>) -> RequestInput {
    RequestInput::new(method, path_segments).header("Accept", "application/json")
}

fn classify<T: DeserializeOwned>(response: HttpResponse, success_status: u16) -> ApiOutcome<T> {
    let unexpected = |response: HttpResponse| ApiOutcome::Unexpected {
        status: response.status,
        body: response.body,
    };

    match response.status {
        status if status == success_status => match serde_json::from_str(&response.body) {
            Ok(value) => ApiOutcome::Success(value),
            Err(_) => unexpected(response),
        },
        422 => match serde_json::from_str::<ValidationErrors>(&response.body) {
            Ok(errors) => ApiOutcome::Invalid(errors),
            Err(_) => unexpected(response),
        },
        404 => ApiOutcome::NotFound(message_of(&response)),
        405 => ApiOutcome::MethodNotAllowed(message_of(&response)),
        _ => unexpected(response),
    }
}

fn message_of(response: &HttpResponse) -> String {
    response
        .json()
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}
