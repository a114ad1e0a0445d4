use reqwest::{header::HeaderMap, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{api::types::ApiError, config, utils::storage as storage_utils};

const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.trim_end_matches('/').to_string()
        } else {
            config::await_api_base_url().await
        }
    }

    fn auth_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        let token = storage_utils::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(ACCESS_TOKEN_KEY).ok().flatten());
        if let Some(token) = token {
            match format!("Bearer {}", token).parse() {
                Ok(value) => {
                    headers.insert(reqwest::header::AUTHORIZATION, value);
                }
                Err(_) => log::warn!("stored access token is not a valid header value"),
            }
        }
        headers
    }

    pub(crate) async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let base_url = self.resolved_base_url().await;
        let mut request = self.client.get(format!("{}{}", base_url, path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = Self::send(request).await?;
        Self::map_json_response(response).await
    }

    pub(crate) async fn put_json<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize,
    {
        let base_url = self.resolved_base_url().await;
        let request = self
            .client
            .put(format!("{}{}", base_url, path))
            .json(body);
        let response = Self::send(request).await?;
        Self::map_empty_response(response).await
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        request
            .headers(Self::auth_headers())
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))
    }

    async fn map_json_response<T>(response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    async fn map_empty_response(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("request rejected as unauthorized");
        }
        match response.json::<ApiError>().await {
            Ok(error) => error,
            Err(_) => status_error(status),
        }
    }
}

fn status_error(status: StatusCode) -> ApiError {
    ApiError {
        error: format!("Request failed with status {}", status.as_u16()),
        code: format!("HTTP_{}", status.as_u16()),
        details: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_http_code() {
        let error = status_error(StatusCode::BAD_GATEWAY);
        assert_eq!(error.code, "HTTP_502");
        assert!(error.error.contains("502"));
    }
}
