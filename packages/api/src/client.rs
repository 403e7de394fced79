//! # GrcClient — authenticated access to the backend REST API
//!
//! Every admin call carries `Authorization: Bearer <credential>` taken from the
//! [`SessionContext`] passed in by the caller. An unauthenticated session fails
//! with [`ApiError::Unauthenticated`] before anything is sent. Portal calls use
//! the configured `X-API-Key` instead.
//!
//! Responses are classified in one place ([`GrcClient::execute`]): a non-2xx
//! status becomes [`ApiError::Status`], a 2xx body that does not deserialize
//! into the endpoint's contract becomes [`ApiError::Decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{ClientConfig, SessionContext};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

/// How a request proves who is asking.
#[derive(Clone, Copy, Debug)]
pub enum Auth<'a> {
    Session(&'a SessionContext),
    PortalKey,
    Anonymous,
}

pub struct GrcClient<T: HttpTransport> {
    transport: T,
    base_url: String,
    portal_api_key: String,
}

impl<T: HttpTransport> GrcClient<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            portal_api_key: config.portal.api_key.clone(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, auth: Auth<'_>) -> Result<ApiRequest, ApiError> {
        let request = ApiRequest::new(method, self.url(path));
        Ok(match auth {
            Auth::Session(session) => {
                let credential = session.credential().ok_or(ApiError::Unauthenticated)?;
                request.with_header("Authorization", credential.bearer())
            }
            Auth::PortalKey => request.with_header("X-API-Key", self.portal_api_key.clone()),
            Auth::Anonymous => request,
        })
    }

    /// Send a request and require a 2xx status.
    pub async fn execute_raw(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        tracing::debug!("{} {}", request.method.as_str(), request.url);
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
            });
        }
        Ok(response)
    }

    /// Send a request and decode the body into `R`.
    pub async fn execute<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let endpoint = request.url.clone();
        let response = self.execute_raw(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }

    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth<'_>,
    ) -> Result<R, ApiError> {
        let request = self.request(Method::Get, path, auth)?;
        self.execute(request).await
    }

    pub(crate) async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth<'_>,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = self.post_request(path, auth, body)?;
        self.execute(request).await
    }

    /// POST where only the status matters.
    pub(crate) async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        auth: Auth<'_>,
        body: &B,
    ) -> Result<(), ApiError> {
        let request = self.post_request(path, auth, body)?;
        self.execute_raw(request).await.map(|_| ())
    }

    fn post_request<B: Serialize>(
        &self,
        path: &str,
        auth: Auth<'_>,
        body: &B,
    ) -> Result<ApiRequest, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Validation(e.to_string()))?;
        Ok(self.request(Method::Post, path, auth)?.with_body(body))
    }
}
