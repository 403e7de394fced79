//! Password login against the backend.

use serde::{Deserialize, Serialize};
use store::{Credential, Principal, SessionContext};

use crate::client::{Auth, GrcClient};
use crate::error::ApiError;
use crate::transport::HttpTransport;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Principal,
}

impl<T: HttpTransport> GrcClient<T> {
    /// Exchange email and password for a session. Both fields are required.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionContext, ApiError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/auth/login", Auth::Anonymous, &body).await?;

        let credential = Credential::new(response.token).ok_or_else(|| ApiError::Decode {
            endpoint: self.url("/auth/login"),
            message: "empty token".to_string(),
        })?;

        Ok(SessionContext::Authenticated {
            credential,
            principal: response.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, RecordingTransport};
    use store::{ClientConfig, Role};

    #[tokio::test]
    async fn test_login_success() {
        let transport = RecordingTransport::new();
        transport.respond(
            Method::Post,
            "/auth/login",
            200,
            r#"{"token":"tok-9","user":{"id":"u-1","email":"admin@company.com","name":"Admin","role":"admin"}}"#,
        );
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        let session = client.login(" admin@company.com ", "admin123").await.unwrap();
        assert_eq!(session.credential().map(|c| c.as_str()), Some("tok-9"));
        assert_eq!(session.role(), Some(Role::Admin));

        let request = &transport.requests()[0];
        assert!(request.header("Authorization").is_none());
        assert_eq!(
            request.body,
            Some(serde_json::json!({"email": "admin@company.com", "password": "admin123"}))
        );
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let transport = RecordingTransport::new();
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        assert!(matches!(
            client.login("", "x").await,
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            client.login("a@b.c", "").await,
            Err(ApiError::Validation(_))
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_credentials() {
        let transport = RecordingTransport::new();
        transport.respond(Method::Post, "/auth/login", 401, "Invalid credentials");
        let client = GrcClient::new(transport, &ClientConfig::default());

        assert_eq!(
            client.login("invalid@example.com", "wrongpassword").await,
            Err(ApiError::Status { status: 401 })
        );
    }
}
