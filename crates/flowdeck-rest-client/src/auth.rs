//! Authentication methods for the REST API client

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Authentication methods supported by the dashboard backend
#[derive(Debug, Clone, Default)]
pub enum AuthMethod {
    /// API Key authentication (`Authorization: ApiKey <token>`)
    ApiKey(String),
    /// Bearer token (`Authorization: Bearer <token>`)
    Bearer(String),
    /// No authentication (local development backend)
    #[default]
    None,
}

impl AuthMethod {
    /// Apply authentication headers to a request
    pub fn apply_to_headers(
        &self,
        headers: &mut HeaderMap,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self {
            AuthMethod::ApiKey(token) => {
                let value = format!("ApiKey {}", token);
                headers.insert(
                    HeaderName::from_static("authorization"),
                    HeaderValue::from_str(&value)?,
                );
            }
            AuthMethod::Bearer(token) => {
                let value = format!("Bearer {}", token);
                headers.insert(
                    HeaderName::from_static("authorization"),
                    HeaderValue::from_str(&value)?,
                );
            }
            AuthMethod::None => {
                // No headers to add
            }
        }
        Ok(())
    }

    /// Create API key authentication from a token string
    pub fn api_key(token: impl Into<String>) -> Self {
        Self::ApiKey(token.into())
    }

    /// Create bearer token authentication from a token string
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }
}

/// Authentication configuration for the client
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub tenant_id: Option<String>,
}

impl AuthConfig {
    /// Create a new auth config with API key authentication
    pub fn with_api_key(token: impl Into<String>) -> Self {
        Self {
            method: AuthMethod::api_key(token),
            tenant_id: None,
        }
    }

    /// Create a new auth config with bearer token authentication
    pub fn with_bearer(token: impl Into<String>) -> Self {
        Self {
            method: AuthMethod::bearer(token),
            tenant_id: None,
        }
    }

    /// Set the tenant ID for multi-tenant deployments
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Get headers for this authentication configuration
    pub fn headers(&self) -> Result<HeaderMap, Box<dyn std::error::Error + Send + Sync>> {
        let mut headers = HeaderMap::new();

        self.method.apply_to_headers(&mut headers)?;

        if let Some(tenant_id) = &self.tenant_id {
            headers.insert(
                HeaderName::from_static("x-tenant-id"),
                HeaderValue::from_str(tenant_id)?,
            );
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_auth_headers() {
        let auth = AuthMethod::api_key("test-token");
        let mut headers = HeaderMap::new();
        auth.apply_to_headers(&mut headers).unwrap();

        assert_eq!(headers.get("authorization").unwrap(), "ApiKey test-token");
    }

    #[test]
    fn bearer_auth_headers() {
        let auth = AuthMethod::bearer("jwt-token");
        let mut headers = HeaderMap::new();
        auth.apply_to_headers(&mut headers).unwrap();

        assert_eq!(headers.get("authorization").unwrap(), "Bearer jwt-token");
    }

    #[test]
    fn auth_config_with_tenant() {
        let config = AuthConfig::with_api_key("token").with_tenant_id("acme");
        let headers = config.headers().unwrap();

        assert_eq!(headers.get("authorization").unwrap(), "ApiKey token");
        assert_eq!(headers.get("x-tenant-id").unwrap(), "acme");
    }

    #[test]
    fn no_auth_produces_no_headers() {
        let headers = AuthConfig::default().headers().unwrap();
        assert!(headers.is_empty());
    }
}
